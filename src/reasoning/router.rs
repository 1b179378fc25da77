//! Reply router
//!
//! Maps (topic, intent, confidence, session, analysis) to exactly one
//! [`Action`]. Branches are checked in order and the first match wins. The
//! only side effect is advancing `session.new_project_stage`; recording
//! `last_action` is the caller's job.

use super::action::{Action, ActionKind, LabTool, OptionId, ReplyOption};
use super::analyzer::{contains_any, MessageAnalysis, MessageType, TopicHint, TRUST_MARKERS};
use super::state::{Intent, NewProjectStage, SessionMemory, Topic};

pub(crate) const COST_MARKERS: &[&str] = &[
    "budget",
    "how much",
    "cost",
    "price",
    "pricing",
    "estimate",
    "rough idea",
    "ballpark",
    "money",
];

pub(crate) const TECH_MARKERS: &[&str] = &[
    ".net",
    "dotnet",
    "react",
    "vite",
    "typescript",
    "javascript",
    "node",
    "next.js",
    "nextjs",
    "django",
    "python",
    "stack",
    "frontend",
    "front-end",
    "backend",
    "back-end",
];

/// Targeted clarifiers are offered while `clarifier_loops` is at most this
const HINTED_CLARIFIER_MAX_LOOPS: u32 = 2;

fn new_project_option() -> ReplyOption {
    ReplyOption::new(OptionId::NewProject, "Start a new project")
}

fn existing_system_option() -> ReplyOption {
    ReplyOption::new(OptionId::ExistingSystem, "Fix an existing system")
}

fn careers_option() -> ReplyOption {
    ReplyOption::new(OptionId::Careers, "Careers / jobs")
}

/// Decide the next reply.
///
/// `intent` and `confidence` are accepted for logging and future
/// scoring-based routing; no branch reads them.
pub fn route_message(
    topic: &Topic,
    _intent: Intent,
    _confidence: f32,
    session: &mut SessionMemory,
    analysis: &MessageAnalysis,
) -> Action {
    match topic {
        Topic::ContactHuman => Action::escalate(
            "I can connect you with someone from Ameotech. \
             Would you prefer to send a short note or book a quick call?",
        ),
        Topic::HandoffReady => Action::escalate(
            "This looks easier to handle in a direct conversation. \
             I can connect you with someone from the engineering team.",
        ),
        Topic::Careers => route_careers(analysis),
        Topic::NewProject => route_new_project(session, analysis),
        Topic::ExistingSystem => route_existing_system(session, analysis),
        Topic::PricingEngine => Action::message(
            "We build pricing engines, elasticity models and demand forecasters \
             for teams with large SKU catalogs or complex pricing rules. \
             What pricing challenge are you facing?",
        ),
        Topic::DataPlatform => Action::message(
            "We help teams with data engineering, ETL pipelines, warehouses \
             and analytics platforms. \
             What kind of data problem are you looking to solve?",
        ),
        Topic::Unknown => route_unknown(session, analysis),
        Topic::Other(_) => Action::message(
            "I can help with new projects, existing systems, pricing, data platforms \
             or careers at Ameotech.",
        ),
    }
}

fn route_careers(analysis: &MessageAnalysis) -> Action {
    if analysis.is_rejection
        || matches!(
            analysis.message_type,
            MessageType::Confused | MessageType::Meta | MessageType::Insult
        )
    {
        return Action::options(
            "I can help with jobs at Ameotech, or with projects and existing systems.\n\
             Which of these fits better with what you need right now?",
            vec![careers_option(), new_project_option(), existing_system_option()],
        );
    }

    Action::message_with_link(
        "You can explore open roles on the Careers page. \
         If you don\u{2019}t see a match, you can still share your profile.",
        "/careers",
    )
}

fn route_new_project(session: &mut SessionMemory, analysis: &MessageAnalysis) -> Action {
    if analysis.is_rejection {
        return Action::message(
            "No problem. Tell me a little about what you want to build. \
             A one-line description of the idea or main workflow is enough.",
        );
    }

    let clean = analysis.clean.to_lowercase();
    let asks_cost = contains_any(&clean, COST_MARKERS);

    if asks_cost {
        return Action::open_lab_tool(
            "We can sketch a budget band, timeline and delivery model \
             based on a few quick questions. \
             Do you want to run the Build Estimator?",
            LabTool::BuildEstimator,
        );
    }

    if contains_any(&clean, TECH_MARKERS) {
        return Action::message(
            ".NET for the backend and React with Vite on the frontend is a solid setup \
             for modern web/SaaS products.\n\n\
             A typical structure we use is:\n\
             - .NET 8 Web API for the backend\n\
             - PostgreSQL or SQL Server as the main database\n\
             - React + Vite + TypeScript for the frontend\n\
             - Tailwind CSS for UI components\n\n\
             We can fine-tune this once we know more about scale, integrations \
             and any AI features you have in mind.",
        );
    }

    if analysis.message_type == MessageType::Trust || contains_any(&clean, TRUST_MARKERS) {
        return Action::message_with_link(
            "Ameotech focuses on applied AI engineering, pricing engines, forecasting, \
             data platforms and automation for SaaS, retail, fintech and enterprise teams.\n\n\
             We usually start with a small, scoped engagement like a discovery sprint or pilot \
             so you can evaluate us on real delivery before committing to anything larger. \
             You can also review case studies on the site to see examples of previous work.",
            "/case-studies",
        );
    }

    if matches!(analysis.message_type, MessageType::Meta | MessageType::Insult) {
        return Action::message(
            "I may miss some of the nuance here, but I can help with new projects, \
             existing systems, pricing engines and data platforms.\n\n\
             For your project, we can talk through the idea, the tech stack, and then \
             rough timelines and budget if you\u{2019}d like.",
        );
    }

    match session.new_project_stage {
        NewProjectStage::Intro => {
            session.new_project_stage.advance_to(NewProjectStage::Idea);
            Action::message(
                "Great \u{2014} we can help with new builds. \
                 What\u{2019}s the idea or the main workflow you\u{2019}re thinking about?",
            )
        }
        NewProjectStage::Idea => {
            // The current message is taken as the idea itself.
            session.new_project_stage.advance_to(NewProjectStage::Shaping);
            Action::message(
                "Got it. For the first version, what matters most for you right now \u{2014} \
                 getting the tech stack right, hitting a specific timeline, \
                 or staying within a budget range?",
            )
        }
        NewProjectStage::Shaping if session.last_action == Some(ActionKind::ShowMessage) => {
            Action::message(
                "We can either stay high-level here or move into something concrete like a \
                 rough budget range and timeline. Which would you prefer?",
            )
        }
        NewProjectStage::Shaping => Action::message(
            "If you share your rough timelines and budget range, \
             we can suggest how to structure the engagement and what to build first.",
        ),
    }
}

fn route_existing_system(session: &SessionMemory, analysis: &MessageAnalysis) -> Action {
    if analysis.is_rejection {
        return Action::message(
            "Alright \u{2014} just tell me what\u{2019}s happening with the current system. \
             Is it bugs, performance issues, missing features, or something else?",
        );
    }

    if session.goal.is_none() {
        return Action::message(
            "We often help teams fix, stabilise or extend existing systems. \
             What seems to be the main issue right now?",
        );
    }

    Action::message(
        "Got it. A short description of the stack or the main bottleneck \
         will help us point you to next steps.",
    )
}

fn route_unknown(session: &SessionMemory, analysis: &MessageAnalysis) -> Action {
    let loops = session.clarifier_loops;

    if loops <= HINTED_CLARIFIER_MAX_LOOPS {
        match analysis.topic_hint {
            TopicHint::ProjectLike => {
                return Action::options(
                    "It sounds like you want to talk about a project.\n\
                     Are you looking to start a new project with us, fix an existing system, \
                     or is this more about roles and jobs?",
                    vec![new_project_option(), existing_system_option(), careers_option()],
                );
            }
            TopicHint::ExistingLike => {
                return Action::options(
                    "It sounds like this might be about an existing system or website.\n\
                     Do you mainly want to stabilise or fix an existing system, \
                     start something new, or talk about roles and jobs?",
                    vec![existing_system_option(), new_project_option(), careers_option()],
                );
            }
            TopicHint::CareersLike => {
                return Action::options(
                    "It sounds like you might be asking about roles or jobs at Ameotech.\n\
                     Is this mainly about careers, or are you looking to discuss a project \
                     or an existing system?",
                    vec![careers_option(), new_project_option(), existing_system_option()],
                );
            }
            TopicHint::None => {}
        }
    }

    match loops {
        0 | 1 => Action::options(
            "To point you in the right direction \u{2014} are you looking to:\n\
             - start a new project,\n\
             - fix an existing system,\n\
             - explore careers,\n\
             or something else related to Ameotech?",
            vec![
                new_project_option(),
                existing_system_option(),
                careers_option(),
                ReplyOption::new(OptionId::Contact, "Talk to someone"),
            ],
        ),
        2 => Action::options(
            "Got it \u{2014} just to avoid guessing:\n\
             Is this mainly about a project, an existing system, or jobs?",
            vec![
                ReplyOption::new(OptionId::NewProject, "Project"),
                ReplyOption::new(OptionId::ExistingSystem, "Existing system"),
                ReplyOption::new(OptionId::Careers, "Jobs"),
            ],
        ),
        _ => Action::escalate(
            "Let me connect you with someone directly \u{2014} \
             they can understand the situation faster.",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reasoning::action::{ActionPayload, CONTACT_LINK};

    fn analysis(clean: &str) -> MessageAnalysis {
        MessageAnalysis {
            clean: clean.to_string(),
            message_type: MessageType::Statement,
            ..MessageAnalysis::default()
        }
    }

    fn route(topic: Topic, session: &mut SessionMemory, analysis: &MessageAnalysis) -> Action {
        route_message(&topic, Intent::Unknown, 0.5, session, analysis)
    }

    #[test]
    fn test_contact_and_handoff_escalate() {
        for topic in [Topic::ContactHuman, Topic::HandoffReady] {
            let action = route(topic, &mut SessionMemory::new("s"), &analysis("budget"));
            assert_eq!(
                action.payload,
                ActionPayload::EscalateHuman {
                    link: CONTACT_LINK.to_string()
                }
            );
        }
    }

    #[test]
    fn test_careers_confused_offers_options() {
        let mut input = analysis("what?");
        input.message_type = MessageType::Confused;
        let action = route(Topic::Careers, &mut SessionMemory::new("s"), &input);
        assert_eq!(action.kind(), ActionKind::ShowOptions);
        assert_eq!(
            action.option_ids(),
            vec![OptionId::Careers, OptionId::NewProject, OptionId::ExistingSystem]
        );
    }

    #[test]
    fn test_careers_default_links_careers_page() {
        let action = route(Topic::Careers, &mut SessionMemory::new("s"), &analysis("jobs"));
        assert_eq!(
            action.payload,
            ActionPayload::ShowMessage {
                link: Some("/careers".to_string())
            }
        );
    }

    #[test]
    fn test_budget_question_opens_estimator_case_insensitively() {
        let mut session = SessionMemory::new("s");
        let action = route(
            Topic::NewProject,
            &mut session,
            &analysis("What's the BUDGET look like?"),
        );
        assert_eq!(
            action.payload,
            ActionPayload::OpenLabTool {
                lab_tool: LabTool::BuildEstimator
            }
        );
        assert_eq!(session.new_project_stage, NewProjectStage::Intro);
    }

    #[test]
    fn test_rejection_wins_over_cost_keyword() {
        let mut input = analysis("no, not the budget");
        input.is_rejection = true;
        let action = route(Topic::NewProject, &mut SessionMemory::new("s"), &input);
        assert_eq!(action.kind(), ActionKind::ShowMessage);
        assert!(action.bot_reply.contains("one-line description"));
    }

    #[test]
    fn test_tech_question_gets_stack_recommendation() {
        let action = route(
            Topic::NewProject,
            &mut SessionMemory::new("s"),
            &analysis("should we use react?"),
        );
        assert!(action.bot_reply.contains("React + Vite"));
    }

    #[test]
    fn test_trust_question_links_case_studies() {
        let mut input = analysis("are you legit");
        input.message_type = MessageType::Trust;
        let action = route(Topic::NewProject, &mut SessionMemory::new("s"), &input);
        assert_eq!(
            action.payload,
            ActionPayload::ShowMessage {
                link: Some("/case-studies".to_string())
            }
        );
    }

    #[test]
    fn test_meta_steers_back_without_advancing_stage() {
        let mut input = analysis("lol are you a bot");
        input.message_type = MessageType::Meta;
        let mut session = SessionMemory::new("s");
        let action = route(Topic::NewProject, &mut session, &input);
        assert!(action.bot_reply.contains("miss some of the nuance"));
        assert_eq!(session.new_project_stage, NewProjectStage::Intro);
    }

    #[test]
    fn test_new_project_stage_machine() {
        let mut session = SessionMemory::new("s");
        let input = analysis("a marketplace for dog walkers");

        let first = route(Topic::NewProject, &mut session, &input);
        assert_eq!(first.kind(), ActionKind::ShowMessage);
        assert_eq!(session.new_project_stage, NewProjectStage::Idea);

        let second = route(Topic::NewProject, &mut session, &input);
        assert!(second.bot_reply.contains("what matters most"));
        assert_eq!(session.new_project_stage, NewProjectStage::Shaping);

        session.last_action = None;
        let third = route(Topic::NewProject, &mut session, &input);
        assert!(third.bot_reply.starts_with("If you share"));

        session.last_action = Some(ActionKind::ShowMessage);
        let fourth = route(Topic::NewProject, &mut session, &input);
        assert!(fourth.bot_reply.contains("stay high-level"));
        assert_eq!(session.new_project_stage, NewProjectStage::Shaping);
    }

    #[test]
    fn test_existing_system_branches() {
        let mut session = SessionMemory::new("s");
        let ask_issue = route(Topic::ExistingSystem, &mut session, &analysis("our app"));
        assert!(ask_issue.bot_reply.contains("main issue"));

        session.goal = Some("checkout crashes".to_string());
        let ask_stack = route(Topic::ExistingSystem, &mut session, &analysis("yes"));
        assert!(ask_stack.bot_reply.contains("main bottleneck"));

        let mut rejecting = analysis("no");
        rejecting.is_rejection = true;
        let ask_again = route(Topic::ExistingSystem, &mut session, &rejecting);
        assert!(ask_again.bot_reply.contains("bugs, performance issues"));
    }

    #[test]
    fn test_unknown_clarifier_ladder() {
        let mut session = SessionMemory::new("s");
        let input = analysis("hmm");

        session.clarifier_loops = 1;
        let generic = route(Topic::Unknown, &mut session, &input);
        assert_eq!(generic.option_ids().len(), 4);
        assert_eq!(generic.option_ids()[3], OptionId::Contact);

        session.clarifier_loops = 2;
        let terse = route(Topic::Unknown, &mut session, &input);
        assert_eq!(
            terse.option_ids(),
            vec![OptionId::NewProject, OptionId::ExistingSystem, OptionId::Careers]
        );
        assert!(terse.bot_reply.contains("avoid guessing"));

        session.clarifier_loops = 3;
        let escalated = route(Topic::Unknown, &mut session, &input);
        assert_eq!(escalated.kind(), ActionKind::EscalateHuman);
    }

    #[test]
    fn test_unknown_topic_hints() {
        let mut session = SessionMemory::new("s");
        session.clarifier_loops = 2;

        let mut input = analysis("our site");
        input.topic_hint = TopicHint::ExistingLike;
        let action = route(Topic::Unknown, &mut session, &input);
        assert_eq!(action.option_ids()[0], OptionId::ExistingSystem);

        input.topic_hint = TopicHint::CareersLike;
        let action = route(Topic::Unknown, &mut session, &input);
        assert_eq!(action.option_ids()[0], OptionId::Careers);

        input.topic_hint = TopicHint::ProjectLike;
        session.clarifier_loops = 3;
        let action = route(Topic::Unknown, &mut session, &input);
        assert_eq!(action.kind(), ActionKind::EscalateHuman);
    }

    #[test]
    fn test_unrecognized_topic_falls_back() {
        let action = route(
            Topic::Other("weather".to_string()),
            &mut SessionMemory::new("s"),
            &analysis(""),
        );
        assert_eq!(action.kind(), ActionKind::ShowMessage);
        assert!(action.bot_reply.contains("data platforms"));
    }
}
