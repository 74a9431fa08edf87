//! Human-readable password generation.
//!
//! This crate builds passwords that satisfy a small policy (minimum length,
//! a number of digits, a number of punctuation symbols) from one of three
//! kinds of body:
//! - words picked from a per-language word list
//! - invented consonant-vowel-consonant syllables
//! - random alphanumeric characters
//!
//! [`PasswordEngine`] is the entry point. Randomness is injected through
//! [`RandomSource`] so every strategy can be driven deterministically.

/// Validated password policy and its textual accessors.
pub mod config;

/// Password strategies and the public generation entry points.
pub mod engine;

/// Digit and punctuation blocks, and their insertion into a body.
pub mod inject;

/// Uniform integer source abstraction over `rand`.
pub mod random;

/// Nonsense syllables.
pub mod syllable;

/// Word-list lookup with a per-source cache.
pub mod words;

mod error;

pub use config::{Configuration, MAX_COUNT, Property, Value};
pub use engine::{PasswordEngine, Strategy, parse_length};
pub use error::Error;
pub use random::{RandomSource, RngSource, SeededSource, ThreadSource};
pub use words::WordSource;

/// Result type for the library.
pub type Result<T> = std::result::Result<T, Error>;
