//! Property-based tests for the reply router
//!
//! These tests verify the routing invariants hold for arbitrary messages
//! and session states.

use super::action::{ActionKind, ActionPayload, LabTool, CONTACT_LINK};
use super::analyzer::{analyze, MessageAnalysis, MessageType, Tone, TopicHint};
use super::router::route_message;
use super::state::{Intent, NewProjectStage, SessionMemory, Topic};
use super::ReasoningEngine;
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_message_type() -> impl Strategy<Value = MessageType> {
    prop_oneof![
        Just(MessageType::Question),
        Just(MessageType::Statement),
        Just(MessageType::Confused),
        Just(MessageType::Meta),
        Just(MessageType::Insult),
        Just(MessageType::Trust),
        Just(MessageType::Greeting),
        Just(MessageType::Other),
    ]
}

fn arb_topic_hint() -> impl Strategy<Value = TopicHint> {
    prop_oneof![
        Just(TopicHint::ProjectLike),
        Just(TopicHint::ExistingLike),
        Just(TopicHint::CareersLike),
        Just(TopicHint::None),
    ]
}

fn arb_tone() -> impl Strategy<Value = Tone> {
    prop_oneof![Just(Tone::Neutral), Just(Tone::Positive), Just(Tone::Frustrated)]
}

fn arb_analysis() -> impl Strategy<Value = MessageAnalysis> {
    (
        "[a-zA-Z ?!.']{0,40}",
        arb_tone(),
        arb_message_type(),
        any::<bool>(),
        arb_topic_hint(),
    )
        .prop_map(|(clean, tone, message_type, is_rejection, topic_hint)| MessageAnalysis {
            clean,
            tone,
            message_type,
            is_rejection,
            topic_hint,
        })
}

fn arb_stage() -> impl Strategy<Value = NewProjectStage> {
    prop_oneof![
        Just(NewProjectStage::Intro),
        Just(NewProjectStage::Idea),
        Just(NewProjectStage::Shaping),
    ]
}

fn arb_last_action() -> impl Strategy<Value = Option<ActionKind>> {
    prop_oneof![
        Just(None),
        Just(Some(ActionKind::EscalateHuman)),
        Just(Some(ActionKind::ShowOptions)),
        Just(Some(ActionKind::ShowMessage)),
        Just(Some(ActionKind::OpenLabTool)),
    ]
}

fn arb_session() -> impl Strategy<Value = SessionMemory> {
    (
        arb_stage(),
        arb_last_action(),
        0u32..6,
        proptest::option::of("[a-z ]{1,20}"),
    )
        .prop_map(|(stage, last_action, loops, goal)| {
            let mut session = SessionMemory::new("prop-session");
            session.new_project_stage = stage;
            session.last_action = last_action;
            session.clarifier_loops = loops;
            session.goal = goal;
            session
        })
}

fn arb_topic() -> impl Strategy<Value = Topic> {
    prop_oneof![
        Just(Topic::ContactHuman),
        Just(Topic::HandoffReady),
        Just(Topic::Careers),
        Just(Topic::NewProject),
        Just(Topic::ExistingSystem),
        Just(Topic::PricingEngine),
        Just(Topic::DataPlatform),
        Just(Topic::Unknown),
        "[a-z_]{0,12}".prop_map(|s| Topic::parse(&s)),
    ]
}

fn arb_stateless_topic() -> impl Strategy<Value = Topic> {
    prop_oneof![
        Just(Topic::PricingEngine),
        Just(Topic::DataPlatform),
        Just(Topic::ContactHuman),
        Just(Topic::HandoffReady),
        "[a-z]{3,10}x".prop_map(Topic::Other),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    // Invariant 1: Hand-off topics always escalate to the contact link
    #[test]
    fn prop_handoff_topics_escalate(
        session in arb_session(),
        analysis in arb_analysis(),
        handoff in any::<bool>()
    ) {
        let topic = if handoff { Topic::HandoffReady } else { Topic::ContactHuman };
        let mut session = session;
        let action = route_message(&topic, Intent::Unknown, 0.0, &mut session, &analysis);
        prop_assert_eq!(
            action.payload,
            ActionPayload::EscalateHuman { link: CONTACT_LINK.to_string() }
        );
    }

    // Invariant 2: Payload shape always matches the action kind
    #[test]
    fn prop_payload_matches_kind(
        topic in arb_topic(),
        session in arb_session(),
        analysis in arb_analysis()
    ) {
        let mut session = session;
        let action = route_message(&topic, Intent::Unknown, 0.5, &mut session, &analysis);
        let value = serde_json::to_value(&action).unwrap();
        let payload = value["action_payload"].as_object().unwrap();
        match action.kind() {
            ActionKind::EscalateHuman => prop_assert!(payload.contains_key("link") && payload.len() == 1),
            ActionKind::ShowOptions => prop_assert!(payload.contains_key("options") && payload.len() == 1),
            ActionKind::OpenLabTool => prop_assert!(payload.contains_key("lab_tool") && payload.len() == 1),
            ActionKind::ShowMessage => prop_assert!(payload.is_empty() || (payload.len() == 1 && payload.contains_key("link"))),
        }
    }

    // Invariant 3: The new-project stage never moves backwards
    #[test]
    fn prop_stage_is_monotonic(
        topic in arb_topic(),
        session in arb_session(),
        analysis in arb_analysis()
    ) {
        let before = session.new_project_stage;
        let mut session = session;
        route_message(&topic, Intent::Unknown, 0.5, &mut session, &analysis);
        prop_assert!(session.new_project_stage >= before);
    }

    // Invariant 4: Intro stage with a plain message moves to Idea
    #[test]
    fn prop_intro_plain_message_advances(text in "[qwxzjk ]{1,30}") {
        let mut session = SessionMemory::new("s");
        let analysis = MessageAnalysis {
            clean: text,
            message_type: MessageType::Statement,
            ..MessageAnalysis::default()
        };
        let action = route_message(&Topic::NewProject, Intent::NewProject, 0.8, &mut session, &analysis);
        prop_assert_eq!(action.kind(), ActionKind::ShowMessage);
        prop_assert_eq!(session.new_project_stage, NewProjectStage::Idea);
    }

    // Invariant 5: Three clarifier loops always escalate, whatever the hint
    #[test]
    fn prop_third_clarifier_loop_escalates(analysis in arb_analysis()) {
        let mut session = SessionMemory::new("s");
        session.clarifier_loops = 3;
        let action = route_message(&Topic::Unknown, Intent::Unknown, 0.2, &mut session, &analysis);
        prop_assert_eq!(action.kind(), ActionKind::EscalateHuman);
    }

    // Invariant 6: Stateless topics give identical answers for identical input
    #[test]
    fn prop_stateless_topics_are_idempotent(
        topic in arb_stateless_topic(),
        session in arb_session(),
        analysis in arb_analysis()
    ) {
        let mut first_session = session.clone();
        let mut second_session = session.clone();
        let first = route_message(&topic, Intent::Unknown, 0.3, &mut first_session, &analysis);
        let second = route_message(&topic, Intent::Unknown, 0.3, &mut second_session, &analysis);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first_session, session);
    }

    // Invariant 7: Cost keywords open the estimator regardless of case
    #[test]
    fn prop_cost_keyword_opens_estimator(
        prefix in "[a-z ]{0,10}",
        keyword in prop_oneof![Just("BUDGET"), Just("Cost"), Just("PRICE"), Just("Ballpark"), Just("How Much")],
        suffix in "[a-z ?]{0,10}"
    ) {
        let raw = format!("{prefix} {keyword} {suffix}");
        let analysis = analyze(&raw);
        prop_assume!(!analysis.is_rejection);
        let mut session = SessionMemory::new("s");
        let action = route_message(&Topic::NewProject, Intent::NewProject, 0.7, &mut session, &analysis);
        prop_assert_eq!(action.payload, ActionPayload::OpenLabTool { lab_tool: LabTool::BuildEstimator });
    }

    // Invariant 8: The engine never panics and always answers
    #[test]
    fn prop_engine_always_answers(
        messages in proptest::collection::vec(".{0,40}", 1..8),
        page in prop_oneof![Just("/"), Just("/careers"), Just("/labs/audit"), Just("")]
    ) {
        let engine = ReasoningEngine::new();
        let mut session = SessionMemory::new("prop");
        let mut loops = 0;
        for message in &messages {
            let reply = engine.process(&mut session, message, page);
            prop_assert!(!reply.action.bot_reply.is_empty());
            prop_assert_eq!(session.last_action, Some(reply.action.kind()));
            prop_assert!(session.clarifier_loops >= loops);
            loops = session.clarifier_loops;
        }
        prop_assert_eq!(session.turns as usize, messages.len());
    }
}
