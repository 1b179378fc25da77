//! Conversation topic, intent and per-session memory types

use serde::{Serialize, Serializer};
use std::fmt;

use super::action::ActionKind;

/// Topic bucket the resolver assigns to a message.
///
/// Wire values that match none of the known buckets are kept in `Other`
/// and route to the safety fallback instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Topic {
    ContactHuman,
    HandoffReady,
    Careers,
    NewProject,
    ExistingSystem,
    PricingEngine,
    DataPlatform,
    Unknown,
    Other(String),
}

impl Topic {
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "contact_human" => Topic::ContactHuman,
            "handoff_ready" => Topic::HandoffReady,
            "careers" => Topic::Careers,
            "new_project" => Topic::NewProject,
            "existing_system" => Topic::ExistingSystem,
            "pricing_engine" => Topic::PricingEngine,
            "data_platform" => Topic::DataPlatform,
            "unknown" => Topic::Unknown,
            other => Topic::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Topic::ContactHuman => "contact_human",
            Topic::HandoffReady => "handoff_ready",
            Topic::Careers => "careers",
            Topic::NewProject => "new_project",
            Topic::ExistingSystem => "existing_system",
            Topic::PricingEngine => "pricing_engine",
            Topic::DataPlatform => "data_platform",
            Topic::Unknown => "unknown",
            Topic::Other(name) => name,
        }
    }

    /// Topics with a multi-turn flow the resolver may stay in when a
    /// follow-up message carries no keywords of its own.
    pub fn is_flow(&self) -> bool {
        matches!(
            self,
            Topic::Careers
                | Topic::NewProject
                | Topic::ExistingSystem
                | Topic::PricingEngine
                | Topic::DataPlatform
        )
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Topic {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Detected intent. Reported to the client and logged; the router does not
/// branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    ContactHuman,
    Handoff,
    Careers,
    NewProject,
    ExistingSystem,
    PricingEngine,
    DataPlatform,
    Greeting,
    Unknown,
}

impl Intent {
    pub fn for_topic(topic: &Topic) -> Self {
        match topic {
            Topic::ContactHuman => Intent::ContactHuman,
            Topic::HandoffReady => Intent::Handoff,
            Topic::Careers => Intent::Careers,
            Topic::NewProject => Intent::NewProject,
            Topic::ExistingSystem => Intent::ExistingSystem,
            Topic::PricingEngine => Intent::PricingEngine,
            Topic::DataPlatform => Intent::DataPlatform,
            Topic::Unknown | Topic::Other(_) => Intent::Unknown,
        }
    }
}

/// Progress through the new-project flow. Only ever moves forward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NewProjectStage {
    #[default]
    Intro,
    Idea,
    Shaping,
}

impl NewProjectStage {
    /// Advance to `next` unless the session is already past it.
    pub fn advance_to(&mut self, next: NewProjectStage) {
        if next > *self {
            *self = next;
        }
    }
}

/// Mutable state for one chat session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionMemory {
    pub session_id: String,
    pub new_project_stage: NewProjectStage,
    /// Action emitted by the previous router call
    pub last_action: Option<ActionKind>,
    /// Turns that resolved to `unknown` so far; never decreases
    pub clarifier_loops: u32,
    /// Problem statement captured in the existing-system flow
    pub goal: Option<String>,
    pub last_topic: Option<Topic>,
    pub turns: u32,
}

impl SessionMemory {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            new_project_stage: NewProjectStage::Intro,
            last_action: None,
            clarifier_loops: 0,
            goal: None,
            last_topic: None,
            turns: 0,
        }
    }
}
