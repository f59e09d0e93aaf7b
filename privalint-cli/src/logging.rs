use privalint_core::remove_non_utf8;
use regex::{Regex, RegexBuilder};
use std::io::{self, Write};
use std::sync::Arc;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Environment toggle for the sanitizing formatter.
pub const BLIND_MODE_ENV: &str = "PRIVALINT_BLIND";
/// Comma-separated substrings to redact when blind mode is active.
pub const BLIND_TERMS_ENV: &str = "PRIVALINT_BLIND_TERMS";
const REDACTION: &str = "[REDACTED]";

/// Substring replacement rules applied to every log record, longest rule
/// first, matched case-insensitively.
#[derive(Clone, Default)]
pub struct SanitizeRules {
    rules: Arc<Vec<(Regex, String)>>,
}

impl SanitizeRules {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        let mut pairs = pairs;
        pairs.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        let rules = pairs
            .into_iter()
            .filter_map(|(sensitive, replacement)| {
                RegexBuilder::new(&regex::escape(&sensitive))
                    .case_insensitive(true)
                    .build()
                    .ok()
                    .map(|regex| (regex, replacement))
            })
            .collect();
        Self { rules: Arc::new(rules) }
    }

    /// Rules from the environment: active only when blind mode is on.
    pub fn from_env() -> Self {
        let blind = std::env::var(BLIND_MODE_ENV)
            .map(|value| value.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        if !blind {
            return Self::default();
        }
        let pairs = std::env::var(BLIND_TERMS_ENV)
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(|term| (term.to_string(), REDACTION.to_string()))
            .collect();
        Self::new(pairs)
    }

    pub fn apply(&self, text: &str) -> String {
        let mut sanitized = remove_non_utf8(text);
        for (pattern, replacement) in self.rules.iter() {
            sanitized = pattern
                .replace_all(&sanitized, replacement.as_str())
                .into_owned();
        }
        sanitized
    }
}

/// A stderr writer that pushes every record through the sanitize rules.
#[derive(Clone)]
pub struct SanitizingWriter {
    rules: SanitizeRules,
}

impl SanitizingWriter {
    pub fn new(rules: SanitizeRules) -> Self {
        Self { rules }
    }
}

impl<'a> MakeWriter<'a> for SanitizingWriter {
    type Writer = SanitizingHandle;

    fn make_writer(&'a self) -> Self::Writer {
        SanitizingHandle {
            rules: self.rules.clone(),
        }
    }
}

pub struct SanitizingHandle {
    rules: SanitizeRules,
}

impl Write for SanitizingHandle {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text = String::from_utf8_lossy(buf);
        let sanitized = self.rules.apply(&text);
        io::stderr().write_all(sanitized.as_bytes())?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

/// Installs the fmt subscriber with RUST_LOG filtering and the sanitizing
/// writer.
pub fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(SanitizingWriter::new(SanitizeRules::from_env()))
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rules_replace_case_insensitively() {
        let rules = SanitizeRules::new(vec![(
            "Acme University".to_string(),
            "[INSTITUTION]".to_string(),
        )]);
        assert_eq!(
            rules.apply("report from ACME UNIVERSITY staff"),
            "report from [INSTITUTION] staff"
        );
    }

    #[test]
    fn longest_rule_wins_over_prefix() {
        let rules = SanitizeRules::new(vec![
            ("acme".to_string(), "[A]".to_string()),
            ("acme labs".to_string(), "[AL]".to_string()),
        ]);
        assert_eq!(rules.apply("acme labs note"), "[AL] note");
    }

    #[test]
    fn empty_rules_only_strip_invalid_chars(){
        let rules = SanitizeRules::default();
        assert_eq!(rules.apply("plain text"), "plain text");
    }
}
