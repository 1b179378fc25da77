//! Reasoning engine: analyse, resolve, route, then record the turn

use serde::Serialize;

use super::action::{Action, ActionKind, OptionId};
use super::analyzer::{analyze, MessageType, Tone, TopicHint};
use super::resolver::resolve;
use super::router::route_message;
use super::state::{Intent, NewProjectStage, SessionMemory, Topic};

/// Diagnostic fields returned alongside every reply
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseMeta {
    pub state: Topic,
    pub tone: Tone,
    pub message_type: MessageType,
    pub topic_hint: TopicHint,
    pub clarifier_loops: u32,
    pub new_project_stage: NewProjectStage,
}

/// Engine output for one user turn
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemResponse {
    pub session_id: String,
    pub intent: Intent,
    pub intent_confidence: f32,
    #[serde(flatten)]
    pub action: Action,
    pub meta: ResponseMeta,
}

/// Stateless driver around the router. All conversation state lives in the
/// [`SessionMemory`] passed to [`ReasoningEngine::process`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ReasoningEngine;

impl ReasoningEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn process(&self, session: &mut SessionMemory, raw_message: &str, page: &str) -> SystemResponse {
        let analysis = analyze(raw_message);
        let resolution = resolve(&analysis, session, page);

        // Never reset within a session
        if resolution.topic == Topic::Unknown {
            session.clarifier_loops = session.clarifier_loops.saturating_add(1);
        }

        let action = route_message(
            &resolution.topic,
            resolution.intent,
            resolution.confidence,
            session,
            &analysis,
        );

        // The first existing-system reply asks for the issue; whatever the
        // visitor said in that flow becomes the goal from then on.
        if resolution.topic == Topic::ExistingSystem
            && session.goal.is_none()
            && !analysis.is_rejection
            && !analysis.clean.is_empty()
            && analysis.clean != OptionId::ExistingSystem.as_str()
        {
            session.goal = Some(analysis.clean.clone());
        }

        session.last_action = Some(action.kind());
        session.last_topic = Some(resolution.topic.clone());
        session.turns += 1;

        tracing::debug!(
            session_id = %session.session_id,
            state = %resolution.topic,
            intent = ?resolution.intent,
            confidence = resolution.confidence,
            action = action.kind().as_str(),
            clarifier_loops = session.clarifier_loops,
            "Routed chat message"
        );

        if action.kind() == ActionKind::EscalateHuman {
            tracing::info!(session_id = %session.session_id, state = %resolution.topic, "Chat escalated to a human");
        }

        SystemResponse {
            session_id: session.session_id.clone(),
            intent: resolution.intent,
            intent_confidence: resolution.confidence,
            meta: ResponseMeta {
                state: resolution.topic,
                tone: analysis.tone,
                message_type: analysis.message_type,
                topic_hint: analysis.topic_hint,
                clarifier_loops: session.clarifier_loops,
                new_project_stage: session.new_project_stage,
            },
            action,
        }
    }
}
