// Profanity detection: a fixed blocklist checked token by token.
//
// The blocklist is built once at construction (default list plus the
// domain additions) and never changes afterwards. Text is split into words
// on whitespace and punctuation, so "shit,seriously" is two words. `@` and
// `$` stay inside a word because they stand in for letters ("@ss"); each
// word is lower-cased and its substitutions undone before the lookup.

use std::collections::HashSet;

/// General-purpose offensive words.
pub const DEFAULT_BLOCKLIST: &[&str] = &[
    "arse", "arsehole", "ass", "asshole", "bastard", "bitch", "bitches", "bollocks",
    "bullshit", "crap", "cunt", "damn", "dick", "dickhead", "douche", "fag", "faggot",
    "fuck", "fucked", "fucker", "fucking", "motherfucker", "nigger", "piss", "pissed",
    "prick", "pussy", "retard", "shit", "shitty", "slut", "twat", "wanker", "whore",
];

/// Domain additions: insults common in the reviews this classifier sees,
/// English and Indonesian. Ordinary negative adjectives ("terrible",
/// "awful") are left to the lexicon so they don't trip the override.
pub const DOMAIN_BLOCKLIST: &[&str] = &[
    "idiot", "stupid", "moron", "dumbass", "bodoh", "tolol", "goblok", "bego", "bangsat",
    "bajingan", "brengsek", "berengsek", "kampret", "anjing", "asu", "keparat",
];

/// Flags offensive text and masks offensive tokens.
#[derive(Debug, Clone)]
pub struct ProfanityDetector {
    blocklist: HashSet<String>,
}

impl Default for ProfanityDetector {
    fn default() -> Self {
        Self::new(std::iter::empty::<&str>())
    }
}

impl ProfanityDetector {
    /// Build a detector from the default and domain lists plus `extra` words.
    pub fn new<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let blocklist = DEFAULT_BLOCKLIST
            .iter()
            .chain(DOMAIN_BLOCKLIST.iter())
            .map(|w| w.to_string())
            .chain(extra.into_iter().map(|w| canonical(w.as_ref())))
            .filter(|w| !w.is_empty())
            .collect();
        Self { blocklist }
    }

    /// True if any word of `text` is on the blocklist.
    pub fn contains_profanity(&self, text: &str) -> bool {
        text.split(is_separator).any(|piece| self.is_flagged(piece))
    }

    /// Mask every flagged word in `token` with one asterisk per character.
    /// Separators and clean words come back unchanged.
    pub fn censor(&self, token: &str) -> String {
        let mut out = String::with_capacity(token.len());
        let mut start = 0;
        for (i, c) in token.char_indices() {
            if is_separator(c) {
                self.push_masked(&mut out, &token[start..i]);
                out.push(c);
                start = i + c.len_utf8();
            }
        }
        self.push_masked(&mut out, &token[start..]);
        out
    }

    fn push_masked(&self, out: &mut String, piece: &str) {
        if self.is_flagged(piece) {
            out.extend(std::iter::repeat('*').take(piece.chars().count()));
        } else {
            out.push_str(piece);
        }
    }

    fn is_flagged(&self, token: &str) -> bool {
        let key = canonical(token);
        !key.is_empty() && self.blocklist.contains(&key)
    }

    pub fn len(&self) -> usize {
        self.blocklist.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocklist.is_empty()
    }
}

/// Word boundaries: anything but letters, digits and the look-alike symbols.
fn is_separator(c: char) -> bool {
    !(c.is_alphanumeric() || matches!(c, '@' | '$'))
}

/// Lower-case, undo look-alike substitutions, keep letters and digits only.
fn canonical(token: &str) -> String {
    token
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            '@' | '4' => 'a',
            '$' | '5' => 's',
            '0' => 'o',
            '1' => 'i',
            '3' => 'e',
            '7' => 't',
            other => other,
        })
        .filter(|c| c.is_alphanumeric())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_plain_profanity() {
        let detector = ProfanityDetector::default();
        assert!(detector.contains_profanity("this is shit"));
        assert!(detector.contains_profanity("What a STUPID idea"));
        assert!(!detector.contains_profanity("this is a terrible product"));
        assert!(!detector.contains_profanity(""));
    }

    #[test]
    fn test_detects_decorated_and_substituted_tokens() {
        let detector = ProfanityDetector::default();
        assert!(detector.contains_profanity("oh sh1t!"));
        assert!(detector.contains_profanity("you @ss"));
        assert!(detector.contains_profanity("\"bodoh\","));
    }

    #[test]
    fn test_punctuation_separates_words() {
        let detector = ProfanityDetector::default();
        assert!(detector.contains_profanity("this is shit,seriously"));
        assert!(detector.contains_profanity("you idiot/moron"));
        assert!(detector.contains_profanity("fuck!!!this"));
        assert!(detector.contains_profanity("great...shit"));
        assert!(!detector.contains_profanity("great...service,thanks"));
    }

    #[test]
    fn test_does_not_match_inside_words() {
        let detector = ProfanityDetector::default();
        assert!(!detector.contains_profanity("a classic assessment"));
        assert!(!detector.contains_profanity("scrap the plan"));
    }

    #[test]
    fn test_censor_masks_only_flagged_tokens() {
        let detector = ProfanityDetector::default();
        assert_eq!(detector.censor("damn"), "****");
        assert_eq!(detector.censor("tolol"), "*****");
        assert_eq!(detector.censor("good"), "good");
        assert_eq!(detector.censor(""), "");
    }

    #[test]
    fn test_censor_masks_joined_words_separately() {
        let detector = ProfanityDetector::default();
        assert_eq!(detector.censor("shit,seriously"), "****,seriously");
        assert_eq!(detector.censor("idiot/moron!"), "*****/*****!");
        assert_eq!(detector.censor("@ss"), "***");
    }

    #[test]
    fn test_extra_words_extend_blocklist() {
        let base = ProfanityDetector::default();
        let extended = ProfanityDetector::new(["Zonk", "  "]);
        assert!(!base.contains_profanity("total zonk"));
        assert!(extended.contains_profanity("total zonk"));
        assert_eq!(extended.len(), base.len() + 1);
        assert!(!extended.is_empty());
    }
}
