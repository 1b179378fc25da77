//! Message analysis: normalisation plus keyword-based classification
//!
//! Everything here is substring or whole-word matching on the lowercased
//! message. There is no scoring model.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    #[default]
    Neutral,
    Positive,
    Frustrated,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    Question,
    Statement,
    Confused,
    Meta,
    Insult,
    Trust,
    Greeting,
    #[default]
    Other,
}

/// Soft topic guess used by the clarifier ladder
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TopicHint {
    ProjectLike,
    ExistingLike,
    CareersLike,
    #[default]
    None,
}

/// Result of analysing one raw user message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageAnalysis {
    /// Trimmed, lowercased text with whitespace collapsed
    pub clean: String,
    pub tone: Tone,
    pub message_type: MessageType,
    pub is_rejection: bool,
    pub topic_hint: TopicHint,
}

const INSULT_MARKERS: &[&str] = &[
    "stupid", "useless", "dumb", "idiot", "sucks", "garbage", "rubbish", "pathetic",
];

pub(crate) const TRUST_MARKERS: &[&str] = &[
    "trust",
    "scam",
    "fraud",
    "legit",
    "real company",
    "you guys real",
];

const META_MARKERS: &[&str] = &[
    "are you a bot",
    "are you human",
    "are you real",
    "you're a bot",
    "you are a bot",
    "are you ai",
    "is this ai",
    "chatgpt",
    "who made you",
];

const CONFUSED_MARKERS: &[&str] = &[
    "huh",
    "i don't understand",
    "i dont understand",
    "confused",
    "what do you mean",
    "makes no sense",
    "??",
];

const GREETINGS: &[&str] = &[
    "hi",
    "hello",
    "hey",
    "hiya",
    "yo",
    "good morning",
    "good afternoon",
    "good evening",
];

const QUESTION_WORDS: &[&str] = &[
    "what", "how", "why", "when", "where", "who", "which", "can", "could", "do", "does", "is",
    "are", "will", "would", "should",
];

const REJECTION_WORDS: &[&str] = &["no", "nope", "nah", "stop"];

const REJECTION_PHRASES: &[&str] = &[
    "not that",
    "not really",
    "not now",
    "no thanks",
    "i don't want",
    "i dont want",
    "don't want",
    "dont want",
    "not interested",
];

const FRUSTRATION_MARKERS: &[&str] = &["annoying", "frustrat", "waste of time", "!!"];

/// Matched as whole words only ("ugh" occurs inside "through")
const FRUSTRATION_WORDS: &[&str] = &["ugh", "argh"];

const POSITIVE_MARKERS: &[&str] = &["thanks", "thank you", "great", "awesome", "perfect", "cool"];

const CAREERS_HINTS: &[&str] = &[
    "job", "career", "hiring", "hire me", "vacanc", "internship", "position", "resume", "cv",
];

const EXISTING_HINTS: &[&str] = &[
    "existing", "current system", "our system", "website", "legacy", "bug", "broken", "slow",
    "maintain", "fix",
];

const PROJECT_HINTS: &[&str] = &["project", "build", "app", "idea", "mvp", "startup", "product"];

/// Whether any marker occurs as a substring of `text`
pub(crate) fn contains_any(text: &str, markers: &[&str]) -> bool {
    markers.iter().any(|m| text.contains(m))
}

fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|w| !w.is_empty())
}

/// Lowercase, trim and collapse internal whitespace
pub fn normalize(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

pub fn analyze(raw: &str) -> MessageAnalysis {
    let clean = normalize(raw);
    let message_type = classify(&clean);
    MessageAnalysis {
        is_rejection: is_rejection(&clean),
        tone: tone(&clean, message_type),
        topic_hint: topic_hint(&clean),
        message_type,
        clean,
    }
}

fn classify(clean: &str) -> MessageType {
    if clean.is_empty() {
        return MessageType::Other;
    }
    if contains_any(clean, INSULT_MARKERS) {
        return MessageType::Insult;
    }
    if contains_any(clean, TRUST_MARKERS) {
        return MessageType::Trust;
    }
    if contains_any(clean, META_MARKERS) {
        return MessageType::Meta;
    }
    let bare = clean.trim_matches(|c: char| !c.is_alphanumeric() && c != ' ');
    if bare == "what" || contains_any(clean, CONFUSED_MARKERS) {
        return MessageType::Confused;
    }
    if GREETINGS.contains(&bare) {
        return MessageType::Greeting;
    }
    let first = words(clean).next().unwrap_or_default();
    if clean.ends_with('?') || QUESTION_WORDS.contains(&first) {
        return MessageType::Question;
    }
    MessageType::Statement
}

fn is_rejection(clean: &str) -> bool {
    // "no," and "no." reject; "no-code" does not
    let first = clean
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .trim_end_matches(|c: char| c.is_ascii_punctuation());
    REJECTION_WORDS.contains(&first) || REJECTION_PHRASES.iter().any(|p| clean.starts_with(p))
}

fn tone(clean: &str, message_type: MessageType) -> Tone {
    if message_type == MessageType::Insult
        || contains_any(clean, FRUSTRATION_MARKERS)
        || words(clean).any(|w| FRUSTRATION_WORDS.contains(&w))
    {
        Tone::Frustrated
    } else if contains_any(clean, POSITIVE_MARKERS) {
        Tone::Positive
    } else {
        Tone::Neutral
    }
}

fn topic_hint(clean: &str) -> TopicHint {
    let has_word = |hints: &[&str]| {
        words(clean).any(|w| hints.iter().any(|h| w.starts_with(h)))
            || hints.iter().any(|h| h.contains(' ') && clean.contains(h))
    };
    if has_word(CAREERS_HINTS) {
        TopicHint::CareersLike
    } else if has_word(EXISTING_HINTS) {
        TopicHint::ExistingLike
    } else if has_word(PROJECT_HINTS) {
        TopicHint::ProjectLike
    } else {
        TopicHint::None
    }
}
