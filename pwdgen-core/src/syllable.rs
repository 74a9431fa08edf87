use crate::random::RandomSource;

/// Vowels used in nonsense syllables.
pub const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u'];

/// Consonants used in nonsense syllables.
pub const CONSONANTS: &[char] = &[
	'b', 'c', 'd', 'f', 'g', 'h', 'j', 'k', 'l', 'm', 'n', 'p', 'q', 'r',
	's', 't', 'v', 'w', 'x', 'z', 'y',
];

/// Builds a nonsense syllable with one or two vowels, chosen at random.
pub fn build_syllable<R: RandomSource>(rng: &mut R) -> String {
	let num_vowels = rng.uniform_int(1, 2);
	build_syllable_with(num_vowels, rng)
}

/// Builds a consonant, `num_vowels` vowels, then a second consonant.
///
/// Every letter is drawn independently and with replacement.
pub fn build_syllable_with<R: RandomSource>(num_vowels: usize, rng: &mut R) -> String {
	let mut syllable = String::with_capacity(num_vowels.saturating_add(2));
	syllable.push(*rng.pick(CONSONANTS));
	for _ in 0..num_vowels {
		syllable.push(*rng.pick(VOWELS));
	}
	syllable.push(*rng.pick(CONSONANTS));
	syllable
}

/// Returns `true` if `syllable` is a consonant, one or two vowels and a
/// consonant, ignoring case.
pub fn is_syllable(syllable: &str) -> bool {
	let letters: Vec<char> = syllable.chars().map(|c| c.to_ascii_lowercase()).collect();
	match letters.as_slice() {
		[first, middle @ .., last] => {
			(1..=2).contains(&middle.len())
				&& CONSONANTS.contains(first)
				&& CONSONANTS.contains(last)
				&& middle.iter().all(|c| VOWELS.contains(c))
		}
		_ => false,
	}
}
