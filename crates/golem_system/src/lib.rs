//! # golem-system
//!
//! Platform IO for the golem engine. Everything that touches the filesystem
//! lives here: reading AIML and collection files, walking knowledge
//! directories, parsing the properties file, and appending learnf output.
//!
//! This crate knows file formats but not engine semantics - it returns
//! plain strings and decoded shapes for the engine to interpret. IO
//! failures surface as [`SystemError`] with the offending path attached;
//! nothing in here panics on bad input.

pub mod collections;
pub mod error;
pub mod file;
pub mod learnstore;
pub mod properties;

pub use collections::{load_map_file, load_set_file, load_list_file};
pub use error::SystemError;
pub use file::{files_with_extension, read_file};
pub use learnstore::{FileLearnSink, LearnfSink};
pub use properties::{load_properties_file, parse_properties};
