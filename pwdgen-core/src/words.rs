use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::debug;

use crate::random::RandomSource;
use crate::{Error, Result};

/// Extension of word-list files.
pub const WORD_LIST_EXTENSION: &str = "txt";

type WordListCache = HashMap<PathBuf, Arc<[String]>>;

/// Provides random words from per-language word lists.
///
/// A word list for language `xx` lives at `<root>/xx.txt` and holds one word
/// per line. Each file is read once; its trimmed, non-blank lines are kept in
/// memory for the lifetime of the source.
///
/// # Sharing
/// Cloning a `WordSource` shares its cache, so one instance can be handed to
/// many concurrent requests without reading the same file twice. Two sources
/// created with [`WordSource::new`] never share anything, even for the same
/// root.
#[derive(Debug, Clone)]
pub struct WordSource {
	root: PathBuf,
	cache: Arc<Mutex<WordListCache>>,
}

impl WordSource {
	/// Creates a source reading word lists from `root`.
	///
	/// The directory is not inspected until a word is requested.
	pub fn new<P: AsRef<Path>>(root: P) -> Self {
		Self {
			root: root.as_ref().to_path_buf(),
			cache: Arc::new(Mutex::new(HashMap::new())),
		}
	}

	/// Directory holding the word lists.
	pub fn root(&self) -> &Path {
		&self.root
	}

	/// Path of the word list for `language`. The file may not exist.
	pub fn path_for(&self, language: &str) -> PathBuf {
		self.root.join(format!("{language}.{WORD_LIST_EXTENSION}"))
	}

	/// Returns `true` if a word-list file exists for `language`.
	pub fn has_language(&self, language: &str) -> bool {
		self.path_for(language).is_file()
	}

	/// Lists the language codes that have a word list, sorted.
	///
	/// # Errors
	/// Returns [`Error::ResourceUnreadable`] if the root cannot be listed.
	pub fn languages(&self) -> Result<Vec<String>> {
		let unreadable = |source| Error::ResourceUnreadable { path: self.root.clone(), source };

		let mut languages = Vec::new();
		for entry in fs::read_dir(&self.root).map_err(unreadable)? {
			let path = entry.map_err(unreadable)?.path();
			if path.is_file() && path.extension() == Some(std::ffi::OsStr::new(WORD_LIST_EXTENSION)) {
				if let Some(stem) = path.file_stem() {
					languages.push(stem.to_string_lossy().to_string());
				}
			}
		}
		languages.sort();
		Ok(languages)
	}

	/// Returns a uniformly chosen word of the `language` word list.
	///
	/// # Errors
	/// - [`Error::MissingWordList`] if there is no file for the language.
	/// - Any error of [`WordSource::random_line_from`].
	pub fn word_for<R: RandomSource>(&self, language: &str, rng: &mut R) -> Result<String> {
		let path = self.path_for(language);
		if !path.is_file() {
			return Err(Error::MissingWordList { language: language.to_owned(), path });
		}
		self.random_line_from(&path, rng)
	}

	/// Returns a uniformly chosen line of the file at `path`, trimmed.
	///
	/// # Errors
	/// - [`Error::ResourceUnreadable`] if the file cannot be read.
	/// - [`Error::EmptyWordList`] if the file holds no words.
	pub fn random_line_from<P, R>(&self, path: P, rng: &mut R) -> Result<String>
	where
		P: AsRef<Path>,
		R: RandomSource,
	{
		let path = path.as_ref();
		let words = self.load(path)?;
		if words.is_empty() {
			return Err(Error::EmptyWordList(path.to_path_buf()));
		}
		let index = rng.uniform_int(0, words.len() - 1);
		Ok(words[index].clone())
	}

	/// Number of words in the file at `path`.
	///
	/// The file is scanned on the first call only; later calls answer from
	/// the cache even if the file has since changed.
	///
	/// # Errors
	/// Returns [`Error::ResourceUnreadable`] if the file cannot be read.
	pub fn line_count<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
		Ok(self.load(path.as_ref())?.len())
	}

	/// Returns the cached word list for `path`, reading it on a miss.
	fn load(&self, path: &Path) -> Result<Arc<[String]>> {
		if let Some(words) = self.lock().get(path) {
			return Ok(Arc::clone(words));
		}

		// Read outside the lock; a concurrent miss on the same file only costs
		// a second read, and the first inserted list wins.
		let contents = fs::read_to_string(path)
			.map_err(|source| Error::ResourceUnreadable { path: path.to_path_buf(), source })?;
		let words: Arc<[String]> = parse_records(&contents).into();
		debug!(path = %path.display(), count = words.len(), "word list loaded");

		let mut cache = self.lock();
		let entry = cache.entry(path.to_path_buf()).or_insert(words);
		Ok(Arc::clone(entry))
	}

	fn lock(&self) -> std::sync::MutexGuard<'_, WordListCache> {
		// Entries are inserted whole, so a poisoned map is still consistent.
		self.cache.lock().unwrap_or_else(PoisonError::into_inner)
	}
}

/// Splits file contents into words: one per line, trimmed, blank lines skipped.
fn parse_records(contents: &str) -> Vec<String> {
	contents
		.lines()
		.map(str::trim)
		.filter(|line| !line.is_empty())
		.map(str::to_owned)
		.collect()
}
