//! Router output: one action per reply, each carrying its own payload shape

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Link used by every hand-off to a person
pub const CONTACT_LINK: &str = "mailto:hello@ameotech.com";

/// Action tag as sent to the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    EscalateHuman,
    ShowOptions,
    ShowMessage,
    OpenLabTool,
}

impl ActionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::EscalateHuman => "escalate_human",
            ActionKind::ShowOptions => "show_options",
            ActionKind::ShowMessage => "show_message",
            ActionKind::OpenLabTool => "open_lab_tool",
        }
    }
}

/// Lab tools the site exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LabTool {
    Audit,
    BuildEstimator,
    ArchitectureBlueprint,
    AiReadiness,
}

impl LabTool {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "audit" => Some(LabTool::Audit),
            "build_estimator" => Some(LabTool::BuildEstimator),
            "architecture_blueprint" => Some(LabTool::ArchitectureBlueprint),
            "ai_readiness" => Some(LabTool::AiReadiness),
            _ => None,
        }
    }

    /// Frontend route segment (`/labs/<slug>`)
    pub fn route_slug(self) -> &'static str {
        match self {
            LabTool::Audit => "audit",
            LabTool::BuildEstimator => "build-estimator",
            LabTool::ArchitectureBlueprint => "architecture-blueprint",
            LabTool::AiReadiness => "ai-readiness",
        }
    }
}

/// Id of a quick-reply option. Sending the id back as a message selects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionId {
    NewProject,
    ExistingSystem,
    Careers,
    Contact,
}

impl OptionId {
    pub fn as_str(self) -> &'static str {
        match self {
            OptionId::NewProject => "new_project",
            OptionId::ExistingSystem => "existing_system",
            OptionId::Careers => "careers",
            OptionId::Contact => "contact",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplyOption {
    pub id: OptionId,
    pub label: String,
}

impl ReplyOption {
    pub fn new(id: OptionId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }
}

/// Payload for each action kind. Serialized without a tag: the tag travels
/// in the sibling `action` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ActionPayload {
    EscalateHuman {
        link: String,
    },
    ShowOptions {
        options: Vec<ReplyOption>,
    },
    ShowMessage {
        #[serde(skip_serializing_if = "Option::is_none")]
        link: Option<String>,
    },
    OpenLabTool {
        lab_tool: LabTool,
    },
}

/// A single reply decided by the router
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub bot_reply: String,
    pub payload: ActionPayload,
}

impl Action {
    pub fn escalate(bot_reply: impl Into<String>) -> Self {
        Self {
            bot_reply: bot_reply.into(),
            payload: ActionPayload::EscalateHuman {
                link: CONTACT_LINK.to_string(),
            },
        }
    }

    pub fn options(bot_reply: impl Into<String>, options: Vec<ReplyOption>) -> Self {
        Self {
            bot_reply: bot_reply.into(),
            payload: ActionPayload::ShowOptions { options },
        }
    }

    pub fn message(bot_reply: impl Into<String>) -> Self {
        Self {
            bot_reply: bot_reply.into(),
            payload: ActionPayload::ShowMessage { link: None },
        }
    }

    pub fn message_with_link(bot_reply: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            bot_reply: bot_reply.into(),
            payload: ActionPayload::ShowMessage {
                link: Some(link.into()),
            },
        }
    }

    pub fn open_lab_tool(bot_reply: impl Into<String>, lab_tool: LabTool) -> Self {
        Self {
            bot_reply: bot_reply.into(),
            payload: ActionPayload::OpenLabTool { lab_tool },
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self.payload {
            ActionPayload::EscalateHuman { .. } => ActionKind::EscalateHuman,
            ActionPayload::ShowOptions { .. } => ActionKind::ShowOptions,
            ActionPayload::ShowMessage { .. } => ActionKind::ShowMessage,
            ActionPayload::OpenLabTool { .. } => ActionKind::OpenLabTool,
        }
    }

    /// Option ids in display order; empty for non-option actions
    #[allow(dead_code)] // Used by tests and diagnostics
    pub fn option_ids(&self) -> Vec<OptionId> {
        match &self.payload {
            ActionPayload::ShowOptions { options } => options.iter().map(|o| o.id).collect(),
            _ => vec![],
        }
    }
}

impl Serialize for Action {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Action", 3)?;
        s.serialize_field("action", &self.kind())?;
        s.serialize_field("bot_reply", &self.bot_reply)?;
        s.serialize_field("action_payload", &self.payload)?;
        s.end()
    }
}
