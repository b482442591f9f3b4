mod extractor;

pub use extractor::CompanyExtractor;

use regex::Regex;
use serde::Deserialize;

/// Capitalized word sequence following an anchor phrase, e.g. "Initech Corp"
const PROPER_NOUN_PHRASE: &str = r"(\b[A-Z][a-zA-Z]+(?:\s[A-Z][a-zA-Z]+)*)";

/// A snippet matcher: group 1 of `regex` is the company name
pub struct SnippetPattern {
    pub name: String,
    pub regex: Regex,
}

impl SnippetPattern {
    pub fn new(name: &str, regex: &str) -> anyhow::Result<Self> {
        Ok(Self {
            name: name.to_string(),
            regex: Regex::new(regex)?,
        })
    }

    pub fn find(&self, snippet: &str) -> Option<String> {
        self.regex
            .captures(snippet)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }
}

/// User supplied pattern, as read from configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PatternDefinition {
    pub name: String,
    pub regex: String,
}

fn anchored(anchor: &str) -> String {
    format!(r"{}\s{}", anchor, PROPER_NOUN_PHRASE)
}

/// Built-in snippet patterns. Order matters: the first pattern that matches wins.
fn create_snippet_patterns() -> Vec<SnippetPattern> {
    [
        ("applying_at", anchored("at")),
        ("message_from", anchored("from")),
        ("application_received_from", anchored(r"application\sreceived\sfrom")),
        ("interview_with", anchored(r"interview\swith")),
    ]
    .into_iter()
    .map(|(name, regex)| SnippetPattern {
        name: name.to_string(),
        regex: Regex::new(&regex).unwrap(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_order() {
        let names: Vec<String> = create_snippet_patterns()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(
            names,
            vec![
                "applying_at",
                "message_from",
                "application_received_from",
                "interview_with"
            ]
        );
    }

    #[test]
    fn test_phrase_stops_at_lowercase_word() {
        let pattern = SnippetPattern::new("interview_with", &anchored(r"interview\swith")).unwrap();
        assert_eq!(
            pattern.find("Your interview with Acme Labs is scheduled for Monday"),
            Some("Acme Labs".to_string())
        );
    }

    #[test]
    fn test_invalid_user_pattern() {
        assert!(SnippetPattern::new("broken", r"with\s([A-Z").is_err());
    }
}
