use crate::company::{create_snippet_patterns, PatternDefinition, SnippetPattern};
use regex::Regex;

/// Guesses the company behind an application email.
///
/// The sender's domain is tried first; the snippet patterns are only consulted when the
/// sender yields nothing.
pub struct CompanyExtractor {
    sender_address: Regex,
    patterns: Vec<SnippetPattern>,
}

impl CompanyExtractor {
    pub fn new() -> Self {
        Self {
            sender_address: Regex::new(r"[\w.-]+@([\w.-]+)").unwrap(),
            patterns: create_snippet_patterns(),
        }
    }

    /// Built-in patterns followed by user supplied ones
    pub fn with_extra_patterns(definitions: &[PatternDefinition]) -> anyhow::Result<Self> {
        let mut extractor = Self::new();

        for definition in definitions {
            let pattern = SnippetPattern::new(&definition.name, &definition.regex)
                .map_err(|e| anyhow::anyhow!("Invalid pattern '{}': {}", definition.name, e))?;
            extractor.patterns.push(pattern);
        }

        Ok(extractor)
    }

    pub fn pattern_names(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|p| p.name.as_str())
    }

    pub fn extract(&self, from_address: Option<&str>, snippet: &str) -> Option<String> {
        from_address
            .and_then(|from| self.from_sender(from))
            .or_else(|| self.from_snippet(snippet))
    }

    fn from_sender(&self, from_address: &str) -> Option<String> {
        let domain = self.sender_address.captures(from_address)?.get(1)?.as_str();
        let label = domain.split('.').next()?;
        capitalize_first(label)
    }

    fn from_snippet(&self, snippet: &str) -> Option<String> {
        self.patterns.iter().find_map(|pattern| {
            let company = pattern.find(snippet)?;
            tracing::debug!("Snippet pattern {} matched '{}'", pattern.name, company);
            Some(company)
        })
    }
}

impl Default for CompanyExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn capitalize_first(label: &str) -> Option<String> {
    let mut chars = label.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().chain(chars).collect())
}
