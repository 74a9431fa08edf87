use std::fmt;
use std::str::FromStr;

use crate::words::WordSource;
use crate::{Error, Result};

/// Largest count accepted from text: `min_length`, `num_digits`,
/// `num_punctuation_symbols` and random password lengths.
///
/// The typed setters are not bounded.
pub const MAX_COUNT: usize = 4096;

/// Punctuation symbols used when none are configured.
pub const DEFAULT_PUNCTUATION: &[char] = &['!', '(', ')', '[', ']', ':', ';', ',', '?'];

/// Password policy shared by all generation strategies.
///
/// # Invariants
/// - Every punctuation symbol is a single character (guaranteed by `char`).
/// - `language` named an existing word list when it was set.
///
/// Setters validate their input first and leave the field untouched when
/// they fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
	/// Minimum length of a generated password.
	min_length: usize,

	/// Number of digits injected into every password.
	num_digits: usize,

	/// Number of punctuation symbols injected into every password.
	num_punctuation_symbols: usize,

	/// Symbols the punctuation block is drawn from, in insertion order.
	punctuation_alphabet: Vec<char>,

	/// Whether words and syllables start with a capital letter.
	capitalize_words: bool,

	/// Code of the word list used by word passwords.
	language: String,
}

impl Default for Configuration {
	fn default() -> Self {
		Self {
			min_length: 12,
			num_digits: 2,
			num_punctuation_symbols: 1,
			punctuation_alphabet: DEFAULT_PUNCTUATION.to_vec(),
			capitalize_words: true,
			language: "en".to_owned(),
		}
	}
}

impl Configuration {
	pub fn min_length(&self) -> usize {
		self.min_length
	}

	pub fn num_digits(&self) -> usize {
		self.num_digits
	}

	pub fn num_punctuation_symbols(&self) -> usize {
		self.num_punctuation_symbols
	}

	pub fn punctuation_alphabet(&self) -> &[char] {
		&self.punctuation_alphabet
	}

	pub fn capitalize_words(&self) -> bool {
		self.capitalize_words
	}

	pub fn language(&self) -> &str {
		&self.language
	}

	/// Length the password body must reach before digits and punctuation are
	/// injected: `min_length - num_digits - num_punctuation_symbols`, floored
	/// at zero.
	pub fn body_threshold(&self) -> usize {
		self.min_length
			.saturating_sub(self.num_digits)
			.saturating_sub(self.num_punctuation_symbols)
	}

	pub fn set_min_length(&mut self, min_length: usize) {
		self.min_length = min_length;
	}

	pub fn set_num_digits(&mut self, num_digits: usize) {
		self.num_digits = num_digits;
	}

	pub fn set_num_punctuation_symbols(&mut self, num_punctuation_symbols: usize) {
		self.num_punctuation_symbols = num_punctuation_symbols;
	}

	/// Replaces the punctuation alphabet.
	///
	/// Order and duplicates are kept as given.
	///
	/// # Errors
	/// Returns [`Error::InvalidValue`] if any symbol is not exactly one
	/// character; the alphabet is then left unchanged.
	pub fn set_punctuation_alphabet<I, S>(&mut self, symbols: I) -> Result<()>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let alphabet = symbols
			.into_iter()
			.map(|symbol| single_char(Property::PunctuationAlphabet, symbol.as_ref()))
			.collect::<Result<Vec<_>>>()?;
		self.punctuation_alphabet = alphabet;
		Ok(())
	}

	/// Adds `symbol` to the punctuation alphabet unless it is already there.
	///
	/// # Errors
	/// Returns [`Error::InvalidValue`] if `symbol` is not exactly one character.
	pub fn add_punctuation_symbol(&mut self, symbol: &str) -> Result<()> {
		let symbol = single_char(Property::PunctuationAlphabet, symbol)?;
		if !self.punctuation_alphabet.contains(&symbol) {
			self.punctuation_alphabet.push(symbol);
		}
		Ok(())
	}

	/// Removes the first occurrence of `symbol`. Does nothing if absent.
	///
	/// # Errors
	/// Returns [`Error::InvalidValue`] if `symbol` is not exactly one character.
	pub fn remove_punctuation_symbol(&mut self, symbol: &str) -> Result<()> {
		let symbol = single_char(Property::PunctuationAlphabet, symbol)?;
		if let Some(index) = self.punctuation_alphabet.iter().position(|&c| c == symbol) {
			self.punctuation_alphabet.remove(index);
		}
		Ok(())
	}

	pub fn set_capitalize_words(&mut self, capitalize_words: bool) {
		self.capitalize_words = capitalize_words;
	}

	/// Selects the word list used for word passwords.
	///
	/// # Errors
	/// - [`Error::InvalidValue`] if `language` is empty or looks like a path.
	/// - [`Error::MissingWordList`] if `words` has no list for it.
	pub fn set_language(&mut self, language: &str, words: &WordSource) -> Result<()> {
		let is_plain_code = !language.is_empty()
			&& !language.contains(['/', '\\'])
			&& !language.contains("..");
		if !is_plain_code {
			return Err(invalid(Property::Language, language));
		}
		if !words.has_language(language) {
			return Err(Error::MissingWordList {
				language: language.to_owned(),
				path: words.path_for(language),
			});
		}
		self.language = language.to_owned();
		Ok(())
	}

	/// Returns the current value of `property`.
	pub fn get(&self, property: Property) -> Value {
		match property {
			Property::MinLength => Value::Count(self.min_length),
			Property::NumDigits => Value::Count(self.num_digits),
			Property::NumPunctuationSymbols => Value::Count(self.num_punctuation_symbols),
			Property::PunctuationAlphabet => Value::Symbols(self.punctuation_alphabet.clone()),
			Property::CapitalizeWords => Value::Flag(self.capitalize_words),
			Property::Language => Value::Text(self.language.clone()),
		}
	}

	/// Sets `property` from its textual form.
	///
	/// # Formats
	/// - counts: decimal digits only, at most [`MAX_COUNT`] (`"12"`; `"-1"`
	///   and `"abc"` are rejected)
	/// - punctuation alphabet: whitespace-separated single characters
	///   (`"! ? ,"`). Whitespace only separates, so a space cannot be a symbol
	///   here; use [`Configuration::set_punctuation_alphabet`] for that.
	/// - capitalize words: `"true"` or `"false"`
	/// - language: a language code
	///
	/// # Errors
	/// [`Error::InvalidValue`] for malformed input, or the errors of the
	/// typed setter.
	pub fn set(&mut self, property: Property, value: &str, words: &WordSource) -> Result<()> {
		match property {
			Property::MinLength => self.set_min_length(parse_count(property, value)?),
			Property::NumDigits => self.set_num_digits(parse_count(property, value)?),
			Property::NumPunctuationSymbols => self.set_num_punctuation_symbols(parse_count(property, value)?),
			Property::PunctuationAlphabet => self.set_punctuation_alphabet(value.split_whitespace())?,
			Property::CapitalizeWords => match value {
				"true" => self.set_capitalize_words(true),
				"false" => self.set_capitalize_words(false),
				_ => return Err(invalid(property, value)),
			},
			Property::Language => self.set_language(value, words)?,
		}
		Ok(())
	}
}

/// Names of the configurable properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
	MinLength,
	NumDigits,
	NumPunctuationSymbols,
	PunctuationAlphabet,
	CapitalizeWords,
	Language,
}

impl Property {
	pub const ALL: [Property; 6] = [
		Property::MinLength,
		Property::NumDigits,
		Property::NumPunctuationSymbols,
		Property::PunctuationAlphabet,
		Property::CapitalizeWords,
		Property::Language,
	];

	pub fn name(self) -> &'static str {
		match self {
			Property::MinLength => "min_length",
			Property::NumDigits => "num_digits",
			Property::NumPunctuationSymbols => "num_punctuation_symbols",
			Property::PunctuationAlphabet => "punctuation_alphabet",
			Property::CapitalizeWords => "capitalize_words",
			Property::Language => "language",
		}
	}
}

impl FromStr for Property {
	type Err = Error;

	fn from_str(name: &str) -> Result<Self> {
		Property::ALL
			.into_iter()
			.find(|property| property.name() == name)
			.ok_or_else(|| Error::UnknownProperty(name.to_owned()))
	}
}

impl fmt::Display for Property {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// Value of a configuration property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
	Count(usize),
	Symbols(Vec<char>),
	Flag(bool),
	Text(String),
}

/// Formats the value in the textual form accepted by [`Configuration::set`].
impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Value::Count(n) => write!(f, "{n}"),
			Value::Symbols(symbols) => {
				let symbols: Vec<String> = symbols.iter().map(char::to_string).collect();
				f.write_str(&symbols.join(" "))
			}
			Value::Flag(flag) => write!(f, "{flag}"),
			Value::Text(text) => f.write_str(text),
		}
	}
}

fn invalid(property: Property, value: &str) -> Error {
	Error::InvalidValue { property: property.name(), value: value.to_owned() }
}

fn parse_count(property: Property, value: &str) -> Result<usize> {
	if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
		return Err(invalid(property, value));
	}
	match value.parse::<usize>() {
		Ok(count) if count <= MAX_COUNT => Ok(count),
		_ => Err(invalid(property, value)),
	}
}

fn single_char(property: Property, symbol: &str) -> Result<char> {
	let mut chars = symbol.chars();
	match (chars.next(), chars.next()) {
		(Some(c), None) => Ok(c),
		_ => Err(invalid(property, symbol)),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use tempfile::TempDir;

	fn words() -> (TempDir, WordSource) {
		let dir = tempfile::tempdir().unwrap();
		std::fs::write(dir.path().join("en.txt"), "cat\n").unwrap();
		std::fs::write(dir.path().join("nl.txt"), "kat\n").unwrap();
		let source = WordSource::new(dir.path());
		(dir, source)
	}

	#[test]
	fn defaults() {
		let config = Configuration::default();
		assert_eq!(config.min_length(), 12);
		assert_eq!(config.num_digits(), 2);
		assert_eq!(config.num_punctuation_symbols(), 1);
		assert_eq!(config.punctuation_alphabet(), DEFAULT_PUNCTUATION);
		assert!(config.capitalize_words());
		assert_eq!(config.language(), "en");
		assert_eq!(config.body_threshold(), 9);
	}

	#[test]
	fn threshold_never_goes_negative() {
		let mut config = Configuration::default();
		config.set_min_length(2);
		config.set_num_digits(4);
		assert_eq!(config.body_threshold(), 0);
	}

	#[test]
	fn min_length_accepts_only_plain_integers() {
		let (_dir, words) = words();
		let mut config = Configuration::default();

		for bad in ["-1", "abc", "", "1.5", " 3"] {
			let err = config.set(Property::MinLength, bad, &words).unwrap_err();
			assert!(matches!(err, Error::InvalidValue { property: "min_length", .. }), "{bad}");
			assert_eq!(config.min_length(), 12);
		}

		config.set(Property::MinLength, "20", &words).unwrap();
		assert_eq!(config.get(Property::MinLength), Value::Count(20));
	}

	#[test]
	fn textual_counts_are_bounded() {
		let (_dir, words) = words();
		let mut config = Configuration::default();

		for property in [Property::MinLength, Property::NumDigits, Property::NumPunctuationSymbols] {
			for too_big in [(MAX_COUNT + 1).to_string(), (usize::MAX - 1).to_string(), "99999999999999999999999".to_owned()] {
				assert!(matches!(config.set(property, &too_big, &words), Err(Error::InvalidValue { .. })), "{property} {too_big}");
			}
			config.set(property, &MAX_COUNT.to_string(), &words).unwrap();
			assert_eq!(config.get(property), Value::Count(MAX_COUNT));
		}
	}

	#[test]
	fn space_is_a_separator_in_text_but_a_symbol_when_typed() {
		let (_dir, words) = words();
		let mut config = Configuration::default();

		config.set(Property::PunctuationAlphabet, "  !\t? ", &words).unwrap();
		assert_eq!(config.punctuation_alphabet(), &['!', '?']);

		config.set_punctuation_alphabet([" ", "!"]).unwrap();
		assert_eq!(config.punctuation_alphabet(), &[' ', '!']);
	}

	#[test]
	fn alphabet_rejects_multi_char_symbols_atomically() {
		let mut config = Configuration::default();
		let err = config.set_punctuation_alphabet(["!!", "?"]).unwrap_err();
		assert!(matches!(err, Error::InvalidValue { .. }));
		assert_eq!(config.punctuation_alphabet(), DEFAULT_PUNCTUATION);

		config.set_punctuation_alphabet(["!", "?"]).unwrap();
		assert_eq!(config.punctuation_alphabet(), &['!', '?']);

		config.set_punctuation_alphabet(Vec::<String>::new()).unwrap();
		assert!(config.punctuation_alphabet().is_empty());
	}

	#[test]
	fn add_and_remove_symbols() {
		let mut config = Configuration::default();
		config.set_punctuation_alphabet(["!", "?", "!"]).unwrap();

		config.add_punctuation_symbol("?").unwrap();
		assert_eq!(config.punctuation_alphabet(), &['!', '?', '!']);
		config.add_punctuation_symbol("#").unwrap();
		assert_eq!(config.punctuation_alphabet(), &['!', '?', '!', '#']);
		assert!(config.add_punctuation_symbol("##").is_err());
		assert!(config.add_punctuation_symbol("").is_err());

		config.remove_punctuation_symbol("!").unwrap();
		assert_eq!(config.punctuation_alphabet(), &['?', '!', '#']);
		config.remove_punctuation_symbol("%").unwrap();
		assert_eq!(config.punctuation_alphabet(), &['?', '!', '#']);

		assert!(matches!(config.remove_punctuation_symbol("?!"), Err(Error::InvalidValue { .. })));
		assert!(config.remove_punctuation_symbol("").is_err());
		assert_eq!(config.punctuation_alphabet(), &['?', '!', '#']);
	}

	#[test]
	fn language_must_have_a_word_list() {
		let (_dir, words) = words();
		let mut config = Configuration::default();

		config.set_language("nl", &words).unwrap();
		assert_eq!(config.language(), "nl");

		let err = config.set_language("de", &words).unwrap_err();
		assert!(matches!(err, Error::MissingWordList { .. }));
		for bad in ["", "../en", "a/b"] {
			assert!(matches!(config.set_language(bad, &words), Err(Error::InvalidValue { .. })));
		}
		assert_eq!(config.language(), "nl");
	}

	#[test]
	fn textual_values_round_trip_through_display() {
		let (_dir, words) = words();
		let mut config = Configuration::default();

		config.set(Property::PunctuationAlphabet, "! ? #", &words).unwrap();
		config.set(Property::CapitalizeWords, "false", &words).unwrap();
		assert!(config.set(Property::CapitalizeWords, "yes", &words).is_err());

		assert_eq!(config.get(Property::PunctuationAlphabet).to_string(), "! ? #");
		assert_eq!(config.get(Property::CapitalizeWords), Value::Flag(false));
		assert_eq!(config.get(Property::Language).to_string(), "en");
	}

	#[test]
	fn property_names() {
		assert_eq!("num_digits".parse::<Property>().unwrap(), Property::NumDigits);
		let err = "colour".parse::<Property>().unwrap_err();
		assert!(matches!(err, Error::UnknownProperty(ref name) if name == "colour"));
		for property in Property::ALL {
			assert_eq!(property.to_string().parse::<Property>().unwrap(), property);
		}
	}
}
