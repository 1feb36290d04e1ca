//! # golem-data
//!
//! Long-lived mutable state for the golem engine: the shared knowledge base
//! and the per-conversation sessions. Pure data structures - no IO, no
//! clocks, no randomness - so everything here is exercised directly by unit
//! tests and stays portable.
//!
//! ## Ownership model
//!
//! One [`KnowledgeBase`] is shared by all sessions of an engine; each
//! [`Session`] owns its own topic, variables, and three bounded history
//! rings. Variable reads resolve across four scopes
//! ([`scope::resolve`]): local → session → global → properties.

pub mod category;
pub mod knowledge;
pub mod scope;
pub mod session;

pub use category::Category;
pub use knowledge::{AddOutcome, KnowledgeBase};
pub use scope::{resolve, Scope};
pub use session::{HistoryRing, Session};
