//! "What next?" advice for lab tool results
//!
//! Reads a few scores out of a lab result and suggests the follow-up lab
//! tool or a conversation with the team.

use serde::Serialize;
use serde_json::{json, Value};

use super::action::{ActionKind, LabTool, CONTACT_LINK};

/// Audit engineering score below which foundations come first
const AUDIT_ENGINEERING_FLOOR: f64 = 60.0;
/// Audit data/AI score below which foundations come first
const AUDIT_DATA_AI_FLOOR: f64 = 50.0;
/// AI readiness below this points at architecture work
const AI_READINESS_LOW: f64 = 60.0;
/// AI readiness at or above this is ready for a scoped build
const AI_READINESS_HIGH: f64 = 75.0;

const DEFAULT_REPLY: &str = "You can share these lab results with the Ameotech team, \
                             or start a conversation via the contact form.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NextAction {
    pub label: String,
    #[serde(rename = "type")]
    pub kind: ActionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<LabTool>,
    pub payload: Value,
}

impl NextAction {
    fn open_lab(label: &str, tool: LabTool) -> Self {
        Self {
            label: label.to_string(),
            kind: ActionKind::OpenLabTool,
            target: Some(tool),
            payload: json!({ "lab_tool": tool.route_slug() }),
        }
    }

    fn escalate(label: &str) -> Self {
        Self {
            label: label.to_string(),
            kind: ActionKind::EscalateHuman,
            target: None,
            payload: json!({ "link": CONTACT_LINK }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabAdvice {
    pub bot_reply: String,
    pub next_actions: Vec<NextAction>,
}

fn score(result: &Value, key: &str) -> f64 {
    result
        .get("scores")
        .and_then(|s| s.get(key))
        .and_then(Value::as_f64)
        .unwrap_or(0.0)
}

/// Suggest next steps for a lab run. Unknown or missing tools get the
/// generic contact suggestion.
pub fn advise(lab_tool: Option<&str>, lab_result: &Value) -> LabAdvice {
    let mut lines: Vec<&str> = Vec::new();
    let mut actions = Vec::new();

    match lab_tool.and_then(LabTool::parse) {
        Some(LabTool::Audit) => {
            lines.push("Here\u{2019}s how we usually think about next steps after a maturity audit:");
            if score(lab_result, "engineering") < AUDIT_ENGINEERING_FLOOR
                || score(lab_result, "data_ai") < AUDIT_DATA_AI_FLOOR
            {
                actions.push(NextAction::open_lab(
                    "Run Architecture Blueprint",
                    LabTool::ArchitectureBlueprint,
                ));
                lines.push(
                    "- Your engineering / data scores suggest stabilising foundations first \
                     via an architecture review.",
                );
            } else {
                actions.push(NextAction::open_lab("Run Build Estimator", LabTool::BuildEstimator));
                lines.push(
                    "- Your base looks reasonable. Next step is shaping budget and delivery \
                     via the estimator.",
                );
            }
            actions.push(NextAction::escalate("Talk to Ameotech"));
            lines.push("- If you prefer a live walkthrough, we can review this together.");
        }
        Some(LabTool::BuildEstimator) => {
            lines.push(
                "Based on this estimator run, there are usually two paths that make sense:",
            );
            actions.push(NextAction::open_lab(
                "Review architecture options",
                LabTool::ArchitectureBlueprint,
            ));
            actions.push(NextAction::escalate("Schedule a scoping call"));
        }
        Some(LabTool::ArchitectureBlueprint) => {
            lines.push(
                "Architecture blueprints typically feed directly into a scoped engagement \
                 or modernisation plan.",
            );
            actions.push(NextAction::escalate("Schedule a working session"));
        }
        Some(LabTool::AiReadiness) => {
            lines.push("Here\u{2019}s how we normally interpret an AI readiness profile like this:");
            let overall = score(lab_result, "score");
            if overall < AI_READINESS_LOW {
                lines.push(
                    "- The right move is to strengthen architecture, data and workflows \
                     before committing to AI projects.",
                );
                actions.push(NextAction::open_lab(
                    "Run Architecture Blueprint",
                    LabTool::ArchitectureBlueprint,
                ));
            } else if overall >= AI_READINESS_HIGH {
                lines.push(
                    "- You look reasonably ready for applied AI. It\u{2019}s worth scoping \
                     a concrete project instead of more diagnostics.",
                );
                actions.push(NextAction::open_lab("Run Build Estimator", LabTool::BuildEstimator));
            } else {
                lines.push(
                    "- You\u{2019}re in a mixed zone: there is potential, but also some gaps. \
                     A small, well-defined PoC or advisory sprint is usually safest.",
                );
            }
            actions.push(NextAction::escalate("Talk to Ameotech"));
        }
        None => {
            lines.push(DEFAULT_REPLY);
            actions.push(NextAction::escalate("Contact Ameotech"));
        }
    }

    LabAdvice {
        bot_reply: lines.join("\n"),
        next_actions: actions,
    }
}
