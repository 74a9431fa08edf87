use std::fs;

use pwdgen_core::engine::ALPHANUMERIC;
use pwdgen_core::syllable::is_syllable;
use pwdgen_core::{Configuration, Error, PasswordEngine, RandomSource, RngSource, SeededSource, Value, WordSource};
use tempfile::TempDir;

/// Always returns the lower bound of the requested range.
struct Minimum;

impl RandomSource for Minimum {
	fn uniform_int(&mut self, low: usize, _high: usize) -> usize {
		low
	}
}

fn word_lists() -> TempDir {
	let dir = tempfile::tempdir().unwrap();
	fs::write(dir.path().join("en.txt"), "cat\ndog\neagle\n").unwrap();
	fs::write(dir.path().join("nl.txt"), "kat\r\nhond\r\narend\r\n").unwrap();
	dir
}

fn seeded(dir: &TempDir, seed: u64) -> PasswordEngine<SeededSource> {
	PasswordEngine::with_source(WordSource::new(dir.path()), RngSource::seeded(seed))
}

fn count(password: &str, alphabet: &[char]) -> usize {
	password.chars().filter(|c| alphabet.contains(c)).count()
}

#[test]
fn random_passwords_have_exact_length_and_quotas() {
	let dir = word_lists();
	for seed in 0..50 {
		let mut engine = seeded(&dir, seed);
		engine.config_mut().set_punctuation_alphabet(["!", "?"]).unwrap();
		engine.config_mut().set_num_digits(3);
		engine.config_mut().set_num_punctuation_symbols(2);

		let password = engine.generate_random(Some(10)).unwrap();
		assert_eq!(password.chars().count(), 15, "{password}");
		assert_eq!(count(&password, &['!', '?']), 2, "{password}");
		// Body characters may be digits too, so at least the injected ones.
		assert!(password.chars().filter(char::is_ascii_digit).count() >= 3, "{password}");
		assert!(password.chars().all(|c| ALPHANUMERIC.contains(&c) || c == '!' || c == '?'));
	}
}

#[test]
fn random_password_without_body_is_just_the_blocks() {
	let dir = word_lists();
	let mut engine = seeded(&dir, 1);
	let password = engine.generate_random(Some(0)).unwrap();
	assert_eq!(password.chars().count(), 3);
	assert!(password[..2].chars().all(|c| c.is_ascii_digit()));
	assert!(engine.config().punctuation_alphabet().contains(&password.chars().nth(2).unwrap()));
}

#[test]
fn word_passwords_reach_the_minimum_length() {
	let dir = word_lists();
	for seed in 0..50 {
		let mut engine = seeded(&dir, seed);
		engine.config_mut().set_punctuation_alphabet(["!", "?"]).unwrap();
		let password = engine.generate_word_password().unwrap();

		assert!(password.chars().count() >= 12, "{password}");
		assert_eq!(count(&password, &['0', '1', '2', '3', '4', '5', '6', '7', '8', '9']), 2, "{password}");
		assert_eq!(count(&password, &['!', '?']), 1, "{password}");

		let letters: String = password.chars().filter(|c| c.is_ascii_alphabetic()).collect();
		let rest = split_capitalized(&letters);
		assert!(rest.iter().all(|w| ["Cat", "Dog", "Eagle"].contains(&w.as_str())), "{password}");
	}
}

#[test]
fn language_switch_uses_the_other_word_list() {
	let dir = word_lists();
	let mut engine = seeded(&dir, 4);
	engine.set_language("nl").unwrap();
	let password = engine.generate_word_password().unwrap();
	let letters: String = password.chars().filter(|c| c.is_ascii_alphabetic()).collect();
	assert!(split_capitalized(&letters).iter().all(|w| ["Kat", "Hond", "Arend"].contains(&w.as_str())));
}

#[test]
fn nonsense_passwords_are_syllables_around_one_block() {
	let dir = word_lists();
	for seed in 0..50 {
		let mut engine = seeded(&dir, seed);
		engine.config_mut().set_punctuation_alphabet(["!", "?"]).unwrap();
		let password = engine.generate_nonsense_password().unwrap();

		let block_start = password.find(|c: char| c.is_ascii_digit()).unwrap();
		let (head, rest) = password.split_at(block_start);
		let (block, tail) = rest.split_at(3);
		assert!(block[..2].chars().all(|c| c.is_ascii_digit()), "{password}");
		assert!(block.ends_with(['!', '?']), "{password}");

		let syllables = split_capitalized(&format!("{head}{tail}"));
		assert!(!syllables.is_empty());
		assert!(syllables.iter().all(|s| is_syllable(s)), "{password}");
		assert!(tail.chars().next().is_some_and(|c| c.is_ascii_uppercase()), "{password}");
	}
}

#[test]
fn deterministic_word_password() {
	let dir = word_lists();
	let mut config = Configuration::default();
	config.set_punctuation_alphabet(["!", "?"]).unwrap();
	let mut engine = PasswordEngine::with_source(WordSource::new(dir.path()), Minimum).with_config(config);

	let password = engine.generate_word_password().unwrap();
	// Threshold 12 - 2 - 1 = 9: "CatCatCat", blocks before the third word.
	assert_eq!(password, "CatCat00!Cat");
	assert_eq!(password.len(), "CatCatCat".len() + 3);
}

#[test]
fn configuration_round_trip_through_the_engine() {
	let dir = word_lists();
	let mut engine = seeded(&dir, 0);

	assert!(matches!(engine.configure("min_length", "-1"), Err(Error::InvalidValue { .. })));
	assert!(matches!(engine.configure("min_length", "abc"), Err(Error::InvalidValue { .. })));
	engine.configure("min_length", "20").unwrap();
	assert_eq!(engine.get("min_length").unwrap(), Value::Count(20));

	assert!(matches!(engine.configure("punctuation_alphabet", "!! ?"), Err(Error::InvalidValue { .. })));
	engine.configure("punctuation_alphabet", "! ?").unwrap();
	assert_eq!(engine.get("punctuation_alphabet").unwrap(), Value::Symbols(vec!['!', '?']));

	assert!(matches!(engine.configure("language", "fr"), Err(Error::MissingWordList { .. })));
	engine.configure("language", "nl").unwrap();
	assert_eq!(engine.get("language").unwrap(), Value::Text("nl".to_owned()));

	let password = engine.generate_word_password().unwrap();
	assert!(password.chars().count() >= 20);
}

#[test]
fn empty_alphabet_fails_every_strategy() {
	let dir = word_lists();
	let mut engine = seeded(&dir, 0);
	engine.config_mut().set_punctuation_alphabet(Vec::<&str>::new()).unwrap();

	assert!(matches!(engine.generate_random(None), Err(Error::EmptyAlphabet)));
	assert!(matches!(engine.generate_word_password(), Err(Error::EmptyAlphabet)));
	assert!(matches!(engine.generate_nonsense_password(), Err(Error::EmptyAlphabet)));

	engine.config_mut().set_num_punctuation_symbols(0);
	assert_eq!(engine.generate_random(Some(4)).unwrap().chars().count(), 6);
}

#[test]
fn word_list_removed_after_configuration() {
	let dir = word_lists();
	let mut engine = seeded(&dir, 0);
	engine.set_language("nl").unwrap();
	fs::remove_file(dir.path().join("nl.txt")).unwrap();
	assert!(matches!(engine.generate_word_password(), Err(Error::MissingWordList { .. })));
}

#[test]
fn empty_word_list() {
	let dir = word_lists();
	fs::write(dir.path().join("xx.txt"), "\n").unwrap();
	let mut engine = seeded(&dir, 0);
	engine.set_language("xx").unwrap();
	assert!(matches!(engine.generate_word_password(), Err(Error::EmptyWordList(_))));
}

/// Splits `text` before every upper-case letter.
fn split_capitalized(text: &str) -> Vec<String> {
	let mut words: Vec<String> = Vec::new();
	for c in text.chars() {
		match words.last_mut() {
			Some(word) if !c.is_ascii_uppercase() => word.push(c),
			_ => words.push(String::from(c)),
		}
	}
	words
}
