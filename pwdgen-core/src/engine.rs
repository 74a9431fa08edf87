use std::fmt;
use std::path::Path;
use std::str::FromStr;

use tracing::{debug, instrument};

use crate::config::{Configuration, MAX_COUNT, Property, Value};
use crate::inject::{digit_block, inject, punctuation_block};
use crate::random::{RandomSource, ThreadSource};
use crate::syllable::build_syllable;
use crate::words::WordSource;
use crate::{Error, Result};

/// Characters of the body of a random password: digits, lower and upper case
/// ASCII letters.
pub const ALPHANUMERIC: &[char] = &[
	'0', '1', '2', '3', '4', '5', '6', '7', '8', '9',
	'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm',
	'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
	'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M',
	'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

/// The ways a password body can be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
	/// Words from the configured language's word list.
	Words,
	/// Invented consonant-vowel-consonant syllables.
	Nonsense,
	/// Random alphanumeric characters.
	Random,
}

impl FromStr for Strategy {
	type Err = Error;

	fn from_str(name: &str) -> Result<Self> {
		match name {
			"words" => Ok(Strategy::Words),
			"nonsense" => Ok(Strategy::Nonsense),
			"random" => Ok(Strategy::Random),
			_ => Err(Error::InvalidArgument(format!(
				"unknown strategy '{name}', expected 'words', 'nonsense' or 'random'"
			))),
		}
	}
}

impl fmt::Display for Strategy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Strategy::Words => "words",
			Strategy::Nonsense => "nonsense",
			Strategy::Random => "random",
		})
	}
}

/// Parses the character count of a random password.
///
/// # Errors
/// Returns [`Error::InvalidArgument`] unless `text` is an integer in
/// `0..=MAX_COUNT`.
pub fn parse_length(text: &str) -> Result<usize> {
	let invalid = || Error::InvalidArgument(format!("invalid number of characters '{text}', expected 0 to {MAX_COUNT}"));
	if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
		return Err(invalid());
	}
	match text.parse::<usize>() {
		Ok(length) if length <= MAX_COUNT => Ok(length),
		_ => Err(invalid()),
	}
}

/// Password generator.
///
/// # Responsibilities
/// - Hold the [`Configuration`] and apply it to every generated password
/// - Build password bodies from words, syllables or random characters
/// - Inject the digit and punctuation blocks
///
/// The random source is a type parameter so tests and reproducible runs can
/// supply their own; it defaults to the thread-local generator.
#[derive(Debug, Clone)]
pub struct PasswordEngine<R = ThreadSource> {
	config: Configuration,
	words: WordSource,
	rng: R,
}

impl PasswordEngine {
	/// Creates an engine with the default configuration, reading word lists
	/// from `words_root` and drawing from the thread-local generator.
	pub fn new<P: AsRef<Path>>(words_root: P) -> Self {
		Self::with_source(WordSource::new(words_root), ThreadSource::default())
	}
}

impl<R: RandomSource> PasswordEngine<R> {
	/// Creates an engine with the default configuration around an existing
	/// word source (sharing its cache) and random source.
	pub fn with_source(words: WordSource, rng: R) -> Self {
		Self { config: Configuration::default(), words, rng }
	}

	/// Replaces the whole configuration, keeping the word and random sources.
	pub fn with_config(mut self, config: Configuration) -> Self {
		self.config = config;
		self
	}

	pub fn config(&self) -> &Configuration {
		&self.config
	}

	/// Mutable access for the typed setters that need no word source.
	/// Use [`PasswordEngine::set_language`] to change the language.
	pub fn config_mut(&mut self) -> &mut Configuration {
		&mut self.config
	}

	pub fn words(&self) -> &WordSource {
		&self.words
	}

	/// Selects the word list used by [`PasswordEngine::generate_word_password`].
	///
	/// # Errors
	/// See [`Configuration::set_language`].
	pub fn set_language(&mut self, language: &str) -> Result<()> {
		self.config.set_language(language, &self.words)
	}

	/// Sets a property by name from its textual value.
	///
	/// # Errors
	/// - [`Error::UnknownProperty`] if `name` is not a property.
	/// - See [`Configuration::set`] for value errors.
	pub fn configure(&mut self, name: &str, value: &str) -> Result<()> {
		let property: Property = name.parse()?;
		self.config.set(property, value, &self.words)?;
		debug!(property = %property, value, "configuration changed");
		Ok(())
	}

	/// Reads a property by name.
	///
	/// # Errors
	/// Returns [`Error::UnknownProperty`] if `name` is not a property.
	pub fn get(&self, name: &str) -> Result<Value> {
		Ok(self.config.get(name.parse()?))
	}

	/// Generates a password with the given strategy.
	///
	/// `length` is only used by [`Strategy::Random`].
	pub fn generate(&mut self, strategy: Strategy, length: Option<usize>) -> Result<String> {
		match strategy {
			Strategy::Words => self.generate_word_password(),
			Strategy::Nonsense => self.generate_nonsense_password(),
			Strategy::Random => self.generate_random(length),
		}
	}

	/// Generates a password of random alphanumeric characters.
	///
	/// # Parameters
	/// - `num_characters`: number of body characters. Defaults to the body
	///   threshold of the configuration.
	///
	/// # Behavior
	/// - The digit and punctuation blocks are built once, each placed after
	///   the body character at an independently drawn position in
	///   `0..=num_characters` (both may land at the same spot).
	/// - A position equal to `num_characters` puts the block at the very end.
	/// - With zero body characters the password is just the two blocks.
	///
	/// # Errors
	/// Returns [`Error::EmptyAlphabet`] if punctuation is wanted but the
	/// alphabet is empty.
	#[instrument(skip(self))]
	pub fn generate_random(&mut self, num_characters: Option<usize>) -> Result<String> {
		let num_characters = num_characters.unwrap_or_else(|| self.config.body_threshold());

		let (digits_position, punctuation_position) = if num_characters > 0 {
			(self.rng.uniform_int(0, num_characters), self.rng.uniform_int(0, num_characters))
		} else {
			(0, 0)
		};

		let digits = digit_block(self.config.num_digits(), &mut self.rng);
		let punctuation = punctuation_block(
			self.config.num_punctuation_symbols(),
			self.config.punctuation_alphabet(),
			&mut self.rng,
		)?;

		if num_characters == 0 {
			return Ok(digits + &punctuation);
		}

		let mut password = String::new();
		for i in 0..num_characters {
			password.push(*self.rng.pick(ALPHANUMERIC));
			if i == digits_position {
				password.push_str(&digits);
			}
			if i == punctuation_position {
				password.push_str(&punctuation);
			}
		}
		if digits_position == num_characters {
			password.push_str(&digits);
		}
		if punctuation_position == num_characters {
			password.push_str(&punctuation);
		}

		debug!(digits_position, punctuation_position, "random password generated");
		Ok(password)
	}

	/// Generates a password made of words of the configured language.
	///
	/// # Errors
	/// Any [`WordSource::word_for`] or injection error.
	#[instrument(skip(self), fields(language = %self.config.language()))]
	pub fn generate_word_password(&mut self) -> Result<String> {
		let words = self.words.clone();
		let language = self.config.language().to_owned();
		self.generate_with(|rng| words.word_for(&language, rng))
	}

	/// Generates a password made of nonsense syllables.
	#[instrument(skip(self))]
	pub fn generate_nonsense_password(&mut self) -> Result<String> {
		self.generate_with(|rng| Ok(build_syllable(rng)))
	}

	/// Generates a password from the words produced by `next_word`.
	///
	/// # Behavior
	/// - Words are appended (capitalized if configured) until the body holds
	///   at least [`Configuration::body_threshold`] characters.
	/// - The digit and punctuation blocks are injected right before the last
	///   appended word, so the result may be longer than `min_length`.
	/// - An empty threshold yields a body-less password.
	///
	/// # Errors
	/// - Whatever `next_word` returns.
	/// - [`Error::InvalidArgument`] if `next_word` yields an empty word, which
	///   would never grow the body.
	/// - Injection errors, see [`inject`].
	pub fn generate_with<F>(&mut self, mut next_word: F) -> Result<String>
	where
		F: FnMut(&mut R) -> Result<String>,
	{
		let threshold = self.config.body_threshold();
		let mut body = String::new();
		let mut body_chars = 0;
		let mut last_boundary = 0;

		while body_chars < threshold {
			last_boundary = body.len();
			let word = next_word(&mut self.rng)?;
			if word.is_empty() {
				return Err(Error::InvalidArgument("word generator produced an empty word".to_owned()));
			}
			let word = if self.config.capitalize_words() { capitalize(&word) } else { word };
			body_chars += word.chars().count();
			body.push_str(&word);
		}

		debug!(threshold, body_chars, last_boundary, "password body built");
		inject(&body, last_boundary, &self.config, &mut self.rng)
	}
}

/// Upper-cases the first character of `word`.
fn capitalize(word: &str) -> String {
	let mut chars = word.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}
