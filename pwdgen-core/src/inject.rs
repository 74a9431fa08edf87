use crate::config::Configuration;
use crate::random::RandomSource;
use crate::{Error, Result};

/// Digits the digit block is drawn from.
pub const DIGITS: &[char] = &['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'];

/// Builds `count` random digits.
pub fn digit_block<R: RandomSource>(count: usize, rng: &mut R) -> String {
	(0..count).map(|_| *rng.pick(DIGITS)).collect()
}

/// Builds `count` symbols drawn with replacement from `alphabet`.
///
/// # Errors
/// Returns [`Error::EmptyAlphabet`] if `count > 0` and `alphabet` is empty.
pub fn punctuation_block<R: RandomSource>(count: usize, alphabet: &[char], rng: &mut R) -> Result<String> {
	if count > 0 && alphabet.is_empty() {
		return Err(Error::EmptyAlphabet);
	}
	Ok((0..count).map(|_| *rng.pick(alphabet)).collect())
}

/// Splices a digit block followed by a punctuation block into `body` at byte
/// offset `split`.
///
/// Block sizes come from `config`.
///
/// # Errors
/// - [`Error::InvalidPosition`] if `split` is past the end of `body` or not
///   on a character boundary.
/// - [`Error::EmptyAlphabet`], see [`punctuation_block`].
pub fn inject<R: RandomSource>(body: &str, split: usize, config: &Configuration, rng: &mut R) -> Result<String> {
	if !body.is_char_boundary(split) {
		return Err(Error::InvalidPosition { position: split, length: body.len() });
	}

	let digits = digit_block(config.num_digits(), rng);
	let punctuation = punctuation_block(config.num_punctuation_symbols(), config.punctuation_alphabet(), rng)?;

	let (head, tail) = body.split_at(split);
	let mut password = String::with_capacity(body.len() + digits.len() + punctuation.len());
	password.push_str(head);
	password.push_str(&digits);
	password.push_str(&punctuation);
	password.push_str(tail);
	Ok(password)
}
