// Positive / negative vocabularies.
//
// Each list is a one-column CSV (`word` header) in the word-list directory.
// On first run the file doesn't exist, so the built-in default is written
// out and used; later runs read whatever the operator has edited. A file
// that exists but can't be read, or holds no words, falls back to a small
// built-in set, so a broken word list degrades scoring instead of stopping
// the pipeline. Writes go to a sibling temp file that is renamed into place.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use serde::Deserialize;
use tracing::{error, info};

pub const POSITIVE_FILE: &str = "positive_words.csv";
pub const NEGATIVE_FILE: &str = "negative_words.csv";

/// Seed vocabulary written on first run (English and Indonesian).
pub const DEFAULT_POSITIVE: &[&str] = &[
    "good", "great", "excellent", "awesome", "wonderful", "amazing", "fantastic",
    "terrific", "outstanding", "superb", "perfect", "fabulous", "exceptional",
    "marvelous", "brilliant", "spectacular", "impressive", "lovely", "delightful",
    "pleasant", "enjoyable", "magnificent", "splendid", "remarkable", "phenomenal",
    "baik", "bagus", "hebat", "luar biasa", "mantap", "keren", "istimewa",
    "menyenangkan", "memuaskan", "sempurna", "indah", "menakjubkan", "wow",
    "love", "happy", "joy", "glad", "positive", "suka", "senang", "gembira",
];

pub const DEFAULT_NEGATIVE: &[&str] = &[
    "bad", "terrible", "awful", "horrible", "poor", "disappointing", "unpleasant",
    "negative", "dreadful", "lousy", "subpar", "inferior", "mediocre", "inadequate",
    "unsatisfactory", "appalling", "abysmal", "atrocious", "horrendous", "pathetic",
    "buruk", "jelek", "mengecewakan", "menyebalkan", "tidak bagus", "payah", "parah",
    "hate", "dislike", "annoying", "frustrating", "irritating", "benci", "kesal",
    "marah", "sedih", "kecewa", "murung", "geram", "jengkel", "sebal", "worst",
];

/// Used when a list file exists but can't be read.
pub const FALLBACK_POSITIVE: &[&str] = &[
    "good", "great", "excellent", "amazing", "wonderful", "baik", "bagus", "hebat",
];

pub const FALLBACK_NEGATIVE: &[&str] = &[
    "bad", "terrible", "awful", "horrible", "buruk", "jelek", "mengecewakan",
];

/// Immutable vocabularies, loaded once and shared with the scorer.
#[derive(Debug, Clone, Default)]
pub struct WordLists {
    positive: HashSet<String>,
    negative: HashSet<String>,
}

#[derive(Deserialize)]
struct WordRow {
    word: String,
}

impl WordLists {
    pub fn new<I, J, S, T>(positive: I, negative: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        Self {
            positive: normalize_all(positive),
            negative: normalize_all(negative),
        }
    }

    /// The built-in seed vocabulary.
    pub fn builtin() -> Self {
        Self::new(DEFAULT_POSITIVE, DEFAULT_NEGATIVE)
    }

    /// Load both lists from `dir`, creating missing files from the defaults.
    /// Never fails; problems are logged and fall back to built-in sets.
    pub fn load_or_create(dir: &Path) -> Self {
        Self {
            positive: load_list(&dir.join(POSITIVE_FILE), DEFAULT_POSITIVE, FALLBACK_POSITIVE),
            negative: load_list(&dir.join(NEGATIVE_FILE), DEFAULT_NEGATIVE, FALLBACK_NEGATIVE),
        }
    }

    pub fn is_positive(&self, word: &str) -> bool {
        self.positive.contains(word)
    }

    pub fn is_negative(&self, word: &str) -> bool {
        self.negative.contains(word)
    }

    pub fn positive_len(&self) -> usize {
        self.positive.len()
    }

    pub fn negative_len(&self) -> usize {
        self.negative.len()
    }
}

fn normalize_all<I, S>(words: I) -> HashSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    words
        .into_iter()
        .map(|w| w.as_ref().trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

fn load_list(path: &Path, defaults: &[&str], fallback: &[&str]) -> HashSet<String> {
    if !path.exists() {
        let words = normalize_all(defaults);
        match write_list(path, &words) {
            Ok(()) => info!(path = %path.display(), count = words.len(), "Created word list"),
            Err(e) => error!(path = %path.display(), error = %e, "Failed to persist word list"),
        }
        return words;
    }

    match read_list(path) {
        Ok(words) => {
            info!(path = %path.display(), count = words.len(), "Loaded word list");
            words
        }
        Err(e) => {
            error!(
                path = %path.display(),
                error = %e,
                "Failed to load word list, using built-in fallback"
            );
            normalize_all(fallback)
        }
    }
}

fn read_list(path: &Path) -> Result<HashSet<String>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    let mut words = Vec::new();
    for row in reader.deserialize::<WordRow>() {
        let row = row.with_context(|| format!("Malformed row in {}", path.display()))?;
        words.push(row.word);
    }
    let words = normalize_all(words);
    ensure!(!words.is_empty(), "{} has no words", path.display());
    Ok(words)
}

/// Write a list as CSV, sorted so the file diffs cleanly.
pub fn write_list(path: &Path, words: &HashSet<String>) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    let mut sorted: Vec<&String> = words.iter().collect();
    sorted.sort();

    let tmp = path.with_extension("csv.tmp");
    let mut writer = csv::Writer::from_path(&tmp)
        .with_context(|| format!("Failed to create {}", tmp.display()))?;
    writer.write_record(["word"])?;
    for word in sorted {
        writer.write_record([word.as_str()])?;
    }
    writer.flush()?;
    drop(writer);

    std::fs::rename(&tmp, path)
        .with_context(|| format!("Failed to move {} into place", tmp.display()))?;
    Ok(())
}

/// Paths of both list files in `dir`.
pub fn list_paths(dir: &Path) -> [PathBuf; 2] {
    [dir.join(POSITIVE_FILE), dir.join(NEGATIVE_FILE)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_load_creates_files_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let lists = WordLists::load_or_create(dir.path());

        assert!(dir.path().join(POSITIVE_FILE).exists());
        assert!(dir.path().join(NEGATIVE_FILE).exists());
        assert!(lists.is_positive("good"));
        assert!(lists.is_negative("terrible"));
        assert_eq!(lists.positive_len(), DEFAULT_POSITIVE.len());

        // Second load reads the persisted files and sees the same words
        let reloaded = WordLists::load_or_create(dir.path());
        assert_eq!(reloaded.positive_len(), lists.positive_len());
        assert_eq!(reloaded.negative_len(), lists.negative_len());
    }

    #[test]
    fn test_edited_file_is_respected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(POSITIVE_FILE), "word\nSplendiferous\n  neat \n").unwrap();

        let lists = WordLists::load_or_create(dir.path());
        assert!(lists.is_positive("splendiferous"));
        assert!(lists.is_positive("neat"));
        assert!(!lists.is_positive("good"));
    }

    #[test]
    fn test_unreadable_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        // Wrong header: rows can't deserialize into WordRow
        std::fs::write(dir.path().join(NEGATIVE_FILE), "term\nbad\n").unwrap();

        let lists = WordLists::load_or_create(dir.path());
        assert_eq!(lists.negative_len(), FALLBACK_NEGATIVE.len());
        assert!(lists.is_negative("jelek"));
    }

    #[test]
    fn test_empty_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(POSITIVE_FILE), "").unwrap();
        std::fs::write(dir.path().join(NEGATIVE_FILE), "word\n").unwrap();

        let lists = WordLists::load_or_create(dir.path());
        assert_eq!(lists.positive_len(), FALLBACK_POSITIVE.len());
        assert!(lists.is_positive("good"));
        assert_eq!(lists.negative_len(), FALLBACK_NEGATIVE.len());
        assert!(lists.is_negative("bad"));
    }

    #[test]
    fn test_write_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(POSITIVE_FILE);
        write_list(&path, &normalize_all(["good", "great"])).unwrap();

        assert!(!dir.path().join("positive_words.csv.tmp").exists());
        let lists = WordLists::load_or_create(dir.path());
        assert_eq!(lists.positive_len(), 2);
    }

    #[test]
    fn test_new_normalizes_entries() {
        let lists = WordLists::new(["  Great ", ""], ["BAD"]);
        assert!(lists.is_positive("great"));
        assert!(lists.is_negative("bad"));
        assert_eq!(lists.positive_len(), 1);
    }
}
