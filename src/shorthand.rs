//! Inline shorthand markup
//!
//! After template expansion every content line goes through a fixed, ordered
//! list of independent pattern replacements. Rules do not see each other's
//! output as special and never call back into the template engine.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

/// One pattern → replacement rule
#[derive(Debug, Clone)]
pub struct ShorthandRule {
    pattern: Regex,
    replacement: String,
}

impl ShorthandRule {
    pub fn new(pattern: &str, replacement: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            replacement: replacement.to_string(),
        })
    }

    pub fn apply<'t>(&self, line: &'t str) -> Cow<'t, str> {
        self.pattern.replace_all(line, self.replacement.as_str())
    }
}

static DEFAULT_RULES: Lazy<Vec<ShorthandRule>> = Lazy::new(|| {
    let mut rules = vec![
        (r"```(.+?)```", "<pre>${1}</pre>"),
        (r"\*\*(.+?)\*\*", "<b>${1}</b>"),
        (r"\*(.+?)\*", "<i>${1}</i>"),
    ];
    let headings = [
        (r"^###### (.*)$", "<h6>${1}</h6>"),
        (r"^##### (.*)$", "<h5>${1}</h5>"),
        (r"^#### (.*)$", "<h4>${1}</h4>"),
        (r"^### (.*)$", "<h3>${1}</h3>"),
        (r"^## (.*)$", "<h2>${1}</h2>"),
        (r"^# (.*)$", "<h1>${1}</h1>"),
    ];
    rules.extend(headings);
    rules.push((r"/hline", "<div class=\" hrcls\"><hr></ div>"));
    rules.push((r"/nl", "<br><br>"));

    rules
        .into_iter()
        .map(|(pattern, replacement)| {
            ShorthandRule::new(pattern, replacement).expect("Invalid shorthand regex")
        })
        .collect()
});

/// Applies shorthand rules to a line, in order, each exactly once
#[derive(Debug, Clone)]
pub struct ShorthandParser {
    rules: Vec<ShorthandRule>,
}

impl ShorthandParser {
    /// Parser with the default rules
    pub fn new() -> Self {
        Self {
            rules: DEFAULT_RULES.clone(),
        }
    }

    /// Parser without any rules
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule after the existing ones
    pub fn with_rule(mut self, rule: ShorthandRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[ShorthandRule] {
        &self.rules
    }

    pub fn parse(&self, line: &str) -> String {
        let mut current = line.to_string();
        for rule in &self.rules {
            if let Cow::Owned(replaced) = rule.apply(&current) {
                current = replaced;
            }
        }
        current
    }
}

impl Default for ShorthandParser {
    fn default() -> Self {
        Self::new()
    }
}
