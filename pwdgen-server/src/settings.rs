use std::io;
use std::path::{Path, PathBuf};

use pwdgen_core::{Configuration, WordSource};
use serde::Deserialize;

/// Default location of the settings file.
pub const SETTINGS_FILE: &str = "./pwdgen.toml";

/// Server settings, read from a TOML file.
///
/// Every key is optional; missing keys keep their default.
///
/// ```toml
/// port = 5000
/// words_dir = "./words"
/// languages = ["en", "nl"]
/// num_characters_in_random_string = 12
///
/// [policy]
/// num_digits = 2
/// num_punctuation_symbols = 1
/// punctuation = ["!", "(", ")", "[", "]", ":", ";", ",", "?"]
/// ```
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
	pub bind: String,
	pub port: u16,
	pub words_dir: PathBuf,

	/// Languages of the word passwords listed by `/v1/passwords`.
	pub languages: Vec<String>,

	/// Length of the random password listed by `/v1/passwords`.
	pub num_characters_in_random_string: usize,

	pub policy: Policy,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			bind: "127.0.0.1".to_owned(),
			port: 5000,
			words_dir: PathBuf::from("./words"),
			languages: vec!["en".to_owned(), "nl".to_owned()],
			num_characters_in_random_string: 12,
			policy: Policy::default(),
		}
	}
}

/// Overrides of the default password policy.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Policy {
	pub min_length: Option<usize>,
	pub num_digits: Option<usize>,
	pub num_punctuation_symbols: Option<usize>,
	pub punctuation: Option<Vec<String>>,
	pub capitalize_words: Option<bool>,
}

impl Settings {
	/// Reads settings from `path`, or returns the defaults if it does not exist.
	///
	/// # Errors
	/// Returns an error if the file exists but cannot be read or parsed.
	pub fn load<P: AsRef<Path>>(path: P) -> io::Result<Self> {
		let path = path.as_ref();
		if !path.exists() {
			tracing::info!(path = %path.display(), "no settings file, using defaults");
			return Ok(Self::default());
		}
		let contents = std::fs::read_to_string(path)?;
		toml::from_str(&contents).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
	}

	/// Builds the base configuration every request starts from.
	///
	/// # Errors
	/// Fails if the punctuation list is invalid or a listed language has no
	/// word list.
	pub fn configuration(&self, words: &WordSource) -> pwdgen_core::Result<Configuration> {
		let mut config = Configuration::default();
		let policy = &self.policy;
		if let Some(min_length) = policy.min_length {
			config.set_min_length(min_length);
		}
		if let Some(num_digits) = policy.num_digits {
			config.set_num_digits(num_digits);
		}
		if let Some(num_punctuation_symbols) = policy.num_punctuation_symbols {
			config.set_num_punctuation_symbols(num_punctuation_symbols);
		}
		if let Some(punctuation) = &policy.punctuation {
			config.set_punctuation_alphabet(punctuation)?;
		}
		if let Some(capitalize_words) = policy.capitalize_words {
			config.set_capitalize_words(capitalize_words);
		}

		// Checks every listed language; the first one becomes the default.
		for language in self.languages.iter().rev() {
			config.set_language(language, words)?;
		}
		Ok(config)
	}
}
