//! Data types for the scrambling relay
//!
//! This module contains the fixed-shape records passed between the
//! lexical adapters and the scrambler phases.

mod outcome;
mod pos;
mod token;

pub use outcome::Outcome;
pub use pos::PartOfSpeech;
pub use token::{TaggedWord, Token};
