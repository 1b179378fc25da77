//! Topic and intent resolution
//!
//! Maps an analysed message, the session so far and the page the visitor is
//! on to a topic bucket with a rough confidence. Rules are checked in order
//! and the first match wins.

use super::analyzer::{contains_any, MessageAnalysis, MessageType, Tone};
use super::router::{COST_MARKERS, TECH_MARKERS};
use super::state::{Intent, SessionMemory, Topic};

#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub topic: Topic,
    pub intent: Intent,
    pub confidence: f32,
}

impl Resolution {
    fn new(topic: Topic, confidence: f32) -> Self {
        Self {
            intent: Intent::for_topic(&topic),
            topic,
            confidence,
        }
    }
}

const HUMAN_MARKERS: &[&str] = &[
    "talk to someone",
    "speak to someone",
    "talk to a human",
    "speak to a human",
    "talk to a person",
    "real person",
    "book a call",
    "schedule a call",
    "call me",
    "contact you",
    "get in touch",
    "talk to sales",
];

const CAREERS_MARKERS: &[&str] = &[
    "job",
    "career",
    "hiring",
    "vacanc",
    "internship",
    "open role",
    "apply for",
    "work at ameotech",
    "work for you",
];

const EXISTING_MARKERS: &[&str] = &[
    "existing",
    "current system",
    "legacy",
    "our system",
    "our app",
    "our website",
    "our platform",
    "bug",
    "crash",
    "broken",
    "slow",
    "performance",
    "stabilis",
    "stabiliz",
    "maintain",
    "refactor",
    "modernis",
    "moderniz",
    "fix",
];

const PRICING_ENGINE_MARKERS: &[&str] = &[
    "pricing engine",
    "dynamic pricing",
    "price optimi",
    "pricing optimi",
    "elasticity",
    "demand forecast",
    "forecasting",
    "markdown",
];

const DATA_PLATFORM_MARKERS: &[&str] = &[
    "data platform",
    "data pipeline",
    "etl",
    "warehouse",
    "data engineering",
    "analytics platform",
    "lakehouse",
    "dashboard",
];

const NEW_PROJECT_MARKERS: &[&str] = &[
    "new project",
    "build",
    "mvp",
    "startup",
    "new app",
    "an app",
    "idea",
    "prototype",
    "launch",
];

/// Minimum turns before frustration alone triggers a hand-off
const FRUSTRATION_HANDOFF_TURNS: u32 = 3;
/// Clarifier loops after which an insult triggers a hand-off
const INSULT_HANDOFF_LOOPS: u32 = 2;

pub fn resolve(analysis: &MessageAnalysis, session: &SessionMemory, page: &str) -> Resolution {
    let clean = analysis.clean.as_str();

    if clean == "contact" || contains_any(clean, HUMAN_MARKERS) {
        return Resolution::new(Topic::ContactHuman, 0.95);
    }

    if (analysis.tone == Tone::Frustrated && session.turns >= FRUSTRATION_HANDOFF_TURNS)
        || (analysis.message_type == MessageType::Insult
            && session.clarifier_loops >= INSULT_HANDOFF_LOOPS)
    {
        return Resolution::new(Topic::HandoffReady, 0.8);
    }

    // Quick-reply option ids come back verbatim
    match clean {
        "new_project" | "existing_system" | "careers" => {
            return Resolution::new(Topic::parse(clean), 1.0);
        }
        _ => {}
    }

    if contains_any(clean, CAREERS_MARKERS) {
        return Resolution::new(Topic::Careers, 0.85);
    }
    if contains_any(clean, PRICING_ENGINE_MARKERS) {
        return Resolution::new(Topic::PricingEngine, 0.85);
    }
    if contains_any(clean, DATA_PLATFORM_MARKERS) {
        return Resolution::new(Topic::DataPlatform, 0.8);
    }
    if contains_any(clean, EXISTING_MARKERS) {
        return Resolution::new(Topic::ExistingSystem, 0.8);
    }
    if contains_any(clean, NEW_PROJECT_MARKERS) {
        return Resolution::new(Topic::NewProject, 0.8);
    }
    if contains_any(clean, COST_MARKERS) || contains_any(clean, TECH_MARKERS) {
        return Resolution::new(Topic::NewProject, 0.7);
    }

    if let Some(topic) = session.last_topic.as_ref().filter(|t| t.is_flow()) {
        return Resolution::new(topic.clone(), 0.4);
    }

    if page.starts_with("/careers") {
        return Resolution::new(Topic::Careers, 0.5);
    }
    if page.starts_with("/labs") {
        return Resolution::new(Topic::NewProject, 0.5);
    }

    let mut resolution = Resolution::new(Topic::Unknown, 0.2);
    if analysis.message_type == MessageType::Greeting {
        resolution.intent = Intent::Greeting;
    }
    resolution
}
