//! # golem-engine
//!
//! The conversational core of golem: template evaluation and the embedding
//! API over the knowledge base and sessions.
//!
//! ## Quick start
//!
//! ```rust
//! use golem_engine::Engine;
//!
//! let engine = Engine::new();
//! engine
//!     .load_aiml_from_string(
//!         r#"<aiml version="2.0">
//!              <category>
//!                <pattern>HELLO</pattern>
//!                <template>Hi!</template>
//!              </category>
//!            </aiml>"#,
//!     )
//!     .unwrap();
//!
//! let session = engine.create_session("demo");
//! assert_eq!(engine.process_input("Hello", &session).unwrap(), "Hi!");
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Engine ──────────────── RwLock<KnowledgeBase>   (shared, writer-serialized)
//!   │                      RwLock sessions map
//!   ▼ per turn
//! select (pattern, that, topic) ──▶ Evaluator tree walk ──▶ response
//! ```
//!
//! The evaluator implements the full template tag language: variable
//! scopes, conditionals, `<random>`, SRAI recursion with a depth cap,
//! history tags, `<learn>`/`<learnf>`, pronoun/gender substitution, the
//! text transforms, and `<date>`/`<time>` formatting. Unknown tags pass
//! through verbatim; lookup misses render as the empty string.

pub mod config;
pub mod datetime;
pub mod diagnostic;
pub mod engine;
pub mod error;
mod eval;
pub mod transforms;

pub use config::EngineConfig;
pub use diagnostic::{Diagnostic, LoadReport};
pub use engine::{Engine, SessionRef};
pub use error::EngineError;

// Re-export what embedders commonly need alongside the engine.
pub use golem_data::{KnowledgeBase, Session};
pub use golem_system::{FileLearnSink, LearnfSink};
