//! Compiled rewrite rules
//!
//! A rule is an anchored pattern plus a replacement template. When the pattern
//! matches, the result is built from the template alone, so text outside the
//! captured groups is discarded.

use crate::error::{CoreError, Result};
use regex::Regex;

/// Compile a pattern, attaching it to the error on failure
pub(crate) fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| CoreError::InvalidRule {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}

/// Escape literal text for use inside a replacement template
fn escape_template(text: &str) -> String {
    text.replace('$', "$$")
}

/// Single pattern-to-template rewrite
#[derive(Debug, Clone)]
pub struct Rewrite {
    pattern: Regex,
    template: String,
}

impl Rewrite {
    /// Compile a rewrite from a pattern and a `${n}` template
    pub fn new(pattern: &str, template: impl Into<String>) -> Result<Self> {
        Ok(Self {
            pattern: compile(pattern)?,
            template: template.into(),
        })
    }

    /// `^(.* )MISSPELLING(.*)$`, replacing the misspelling literally
    pub fn correction(misspelling: &str, correction: &str) -> Result<Self> {
        Self::new(
            &format!("^(.* ){}(.*)$", regex::escape(misspelling)),
            format!("${{1}}{}${{2}}", escape_template(correction)),
        )
    }

    /// Expand a street-type abbreviation that ends the address, optionally
    /// followed by a quadrant
    pub fn street_type(abbreviation: &str, full: &str) -> Result<Self> {
        Self::new(
            &format!("^(.* ){}( ?[SN]?[WE]?)$", regex::escape(abbreviation)),
            format!("${{1}}{}${{2}}", escape_template(full)),
        )
    }

    /// Expand a street-type abbreviation that ends the first street of a corner
    pub fn corner_street_type(abbreviation: &str, full: &str) -> Result<Self> {
        Self::new(
            &format!(
                "^(.* ){}( ?[SN]?[WE]? [&/] .+)$",
                regex::escape(abbreviation)
            ),
            format!("${{1}}{}${{2}}", escape_template(full)),
        )
    }

    /// Keep both capture groups, dropping whatever lay between them
    pub fn deletion(pattern: &str) -> Result<Self> {
        Self::new(pattern, "${1}${2}")
    }

    /// Insert an ordinal suffix after a bare street number
    pub fn ordinal(digits: &str, suffix: &str) -> Result<Self> {
        Self::new(
            &format!("^(.* BLOCK OF {digits})( ST.*)$"),
            format!("${{1}}{suffix}${{2}}"),
        )
    }

    /// Apply the rule, returning the rewritten string when the pattern matches
    pub fn apply(&self, text: &str) -> Option<String> {
        let caps = self.pattern.captures(text)?;
        let mut out = String::with_capacity(text.len() + self.template.len());
        caps.expand(&self.template, &mut out);
        Some(out)
    }

    /// Source pattern
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

/// Apply every rule in order, each to the output of the previous one
pub(crate) fn apply_each(rules: &[Rewrite], text: String) -> String {
    rules
        .iter()
        .fold(text, |current, rule| rule.apply(&current).unwrap_or(current))
}

/// Apply the first rule that matches, if any
pub(crate) fn apply_first(rules: &[Rewrite], text: String) -> String {
    rules
        .iter()
        .find_map(|rule| rule.apply(&text))
        .unwrap_or(text)
}
