//! Deterministic chat reasoning
//!
//! Message analysis, topic resolution and the reply router, plus the
//! session store and lab follow-up advice that sit around them. No LLM is
//! involved; every reply is a static template picked by keyword rules.

mod action;
mod analyzer;
mod engine;
pub mod lab_next;
mod resolver;
mod router;
mod session_store;
mod state;

#[cfg(test)]
mod proptests;

pub use engine::{ReasoningEngine, SystemResponse};
pub use lab_next::advise;
pub use session_store::{spawn_sweeper, InMemorySessionStore, SessionStore};
