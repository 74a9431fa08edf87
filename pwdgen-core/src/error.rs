use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while configuring the engine or generating passwords.
///
/// Every validating operation returns one of these instead of panicking.
/// Nothing inside the crate recovers from them: they are handed back to the
/// caller untouched.
#[derive(Debug, Error)]
pub enum Error {
	/// A configuration value was rejected. The property keeps its old value.
	#[error("invalid value '{value}' supplied for property {property}")]
	InvalidValue {
		property: &'static str,
		value: String,
	},

	/// Attempt to read or write a property that does not exist.
	#[error("unknown property {0}")]
	UnknownProperty(String),

	/// No word-list file exists for the language.
	#[error("no word list for language '{language}' (expected {})", path.display())]
	MissingWordList {
		language: String,
		path: PathBuf,
	},

	/// The word-list file exists in configuration but could not be read.
	#[error("unable to read word list {}", path.display())]
	ResourceUnreadable {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	/// The word-list file holds no words.
	#[error("word list {} is empty", .0.display())]
	EmptyWordList(PathBuf),

	/// Punctuation symbols were requested from an empty alphabet.
	#[error("punctuation symbols requested but the punctuation alphabet is empty")]
	EmptyAlphabet,

	/// Bad argument passed to a generation call.
	#[error("invalid argument: {0}")]
	InvalidArgument(String),

	/// Split position outside the body or inside a multi-byte character.
	#[error("invalid split position {position} for a body of {length} bytes")]
	InvalidPosition {
		position: usize,
		length: usize,
	},
}

impl Error {
	/// Returns `true` when the error was caused by the caller's input rather
	/// than by the word-list files on disk.
	///
	/// Used by HTTP front-ends to pick between a 4xx and a 5xx status.
	pub fn is_client_error(&self) -> bool {
		matches!(
			self,
			Error::InvalidValue { .. }
				| Error::UnknownProperty(_)
				| Error::MissingWordList { .. }
				| Error::EmptyAlphabet
				| Error::InvalidArgument(_)
				| Error::InvalidPosition { .. }
		)
	}
}
