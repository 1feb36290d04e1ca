//! # golem-language
//!
//! The text layer of the golem conversational engine: everything that turns
//! raw strings into matchable, evaluable structure, with no state and no IO.
//!
//! ## Pipeline position
//!
//! ```text
//! utterance ──▶ normalize ──▶ match words
//! pattern   ──▶ normalize ──▶ CompiledPattern ──▶ matcher ──▶ Bindings
//! template  ──▶ markup::parse_fragment ──▶ Vec<Node>  (evaluated upstream)
//! .aiml file ─▶ aiml::parse_document ──▶ RawCategory records
//! ```
//!
//! ## Modules
//!
//! - [`normalize`] - canonical matching form and the lossy-with-recovery
//!   preprocessor (`protect`/`denormalize`).
//! - [`split`] - sentence splitter and word tokenizer.
//! - [`token`] / [`pattern`] - pattern grammar, validation, priority.
//! - [`matcher`] - backtracking bind with axis-aware capture naming.
//! - [`markup`] - tolerant XML-fragment parser and serializer.
//! - [`aiml`] - AIML 2.0 document structure.
//!
//! Matching needs set membership (`<set>NAME</set>` pattern tokens); the
//! [`matcher::SetMembership`] trait keeps this crate ignorant of where
//! collections live.

pub mod aiml;
pub mod error;
pub mod markup;
pub mod matcher;
pub mod normalize;
pub mod pattern;
pub mod split;
pub mod token;

pub use aiml::{Document, RawCategory};
pub use error::{AimlError, MarkupError, PatternError, PatternErrorKind};
pub use markup::{Element, Node};
pub use matcher::{Axis, Bindings, SetMembership};
pub use normalize::{normalize, protect, Protected};
pub use pattern::CompiledPattern;
