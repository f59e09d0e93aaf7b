use regex::Regex;
use std::sync::OnceLock;

/// Single-token negation markers looked up after word tokenization.
/// Contractions keep their apostrophe so "can't" survives tokenization.
const NEGATIONS: &[&str] = &[
    "not", "no", "never", "none", "nothing", "nowhere", "neither", "nobody",
    "can't", "cannot", "doesn't", "don't", "isn't", "aren't", "wasn't",
    "weren't", "haven't", "hasn't", "hadn't", "hardly", "scarcely", "barely",
    "didn't", "won't", "wouldn't", "shouldn't", "ain't", "n't", "nor",
    "seldom", "rarely", "little", "few", "rare",
];

fn word_pattern() -> &'static Regex {
    static WORDS: OnceLock<Regex> = OnceLock::new();
    WORDS.get_or_init(|| Regex::new(r"\b[\w']+\b").unwrap())
}

pub fn is_negation(word: &str) -> bool {
    let lowered = word.to_lowercase();
    NEGATIONS.contains(&lowered.as_str()) || lowered.ends_with("n't")
}

/// All negation tokens occurring in the text, in order of appearance.
pub fn find_negations(text: &str) -> Vec<String> {
    word_pattern()
        .find_iter(&text.to_lowercase())
        .map(|m| m.as_str().to_string())
        .filter(|word| is_negation(word))
        .collect()
}

pub fn has_negation(text: &str) -> bool {
    !find_negations(text).is_empty()
}

/// Strips characters that do not survive lossy UTF-8 decoding, so every log
/// record and report line stays encodable.
pub fn remove_non_utf8(input: &str) -> String {
    input.chars().filter(|c| *c != char::REPLACEMENT_CHARACTER).collect()
}

pub fn truncate_string(input: &str, max_length: usize) -> String {
    if input.chars().count() <= max_length {
        input.to_string()
    } else {
        let prefix: String = input.chars().take(max_length.saturating_sub(3)).collect();
        format!("{}...", prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_plain_negations() {
        assert!(has_negation("We do not collect your email."));
        assert!(has_negation("No data is ever shared."));
        assert!(has_negation("We never sell personal information."));
    }

    #[test]
    fn detects_contractions() {
        assert!(has_negation("We don't store your address."));
        assert!(has_negation("This data can't leave the device."));
    }

    #[test]
    fn affirmative_text_has_no_negation() {
        assert!(!has_negation("We collect your email address."));
        assert!(!has_negation("Your data is shared with advertisers."));
    }

    #[test]
    fn finds_all_negation_tokens() {
        let found = find_negations("We do not, and will never, collect this.");
        assert_eq!(found, vec!["not".to_string(), "never".to_string()]);
    }

    #[test]
    fn truncation_preserves_short_strings() {
        assert_eq!(truncate_string("short", 10), "short");
        assert_eq!(truncate_string("a longer string", 9), "a long...");
    }
}
