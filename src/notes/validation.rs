//! Title validation.
//!
//! A title must pass every rule of a [`TitleValidator`] before a note is
//! created. Rules see the title with leading and trailing whitespace removed
//! and run in order; the first failure is returned.
//!
//! Default rules:
//! - **length**: between 1 and `max` characters (default [`DEFAULT_MAX_TITLE_LENGTH`])
//! - **characters**: none of `\ / : * ? " < > | .` (spaces are fine)

use thiserror::Error;

pub const DEFAULT_MAX_TITLE_LENGTH: usize = 50;
pub const MIN_TITLE_LENGTH: usize = 1;
pub const RESERVED_CHARS: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|', '.'];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("title must be {min} to {max} characters long, got {actual}")]
    LengthOutOfRange { min: usize, max: usize, actual: usize },

    #[error("title contains illegal characters: {}", quote_chars(.offenders))]
    IllegalCharacters { offenders: Vec<char> },
}

fn quote_chars(chars: &[char]) -> String {
    chars
        .iter()
        .map(|c| format!("'{}'", c))
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Rule = Box<dyn Fn(&str) -> Result<(), ValidationError> + Send + Sync>;

/// An ordered list of title rules.
pub struct TitleValidator {
    rules: Vec<Rule>,
}

impl Default for TitleValidator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TITLE_LENGTH)
    }
}

impl TitleValidator {
    /// The standard rule set with the given maximum title length.
    pub fn new(max_length: usize) -> Self {
        Self::empty()
            .with_rule(move |title| check_length(title, max_length))
            .with_rule(check_characters)
    }

    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Appends a rule; it runs after the ones already present.
    pub fn with_rule<F>(mut self, rule: F) -> Self
    where
        F: Fn(&str) -> Result<(), ValidationError> + Send + Sync + 'static,
    {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn validate(&self, title: &str) -> Result<(), ValidationError> {
        let trimmed = title.trim();
        self.rules.iter().try_for_each(|rule| rule(trimmed))
    }
}

pub fn check_length(title: &str, max: usize) -> Result<(), ValidationError> {
    let actual = title.chars().count();
    if (MIN_TITLE_LENGTH..=max).contains(&actual) {
        Ok(())
    } else {
        Err(ValidationError::LengthOutOfRange {
            min: MIN_TITLE_LENGTH,
            max,
            actual,
        })
    }
}

pub fn check_characters(title: &str) -> Result<(), ValidationError> {
    let mut offenders: Vec<char> = Vec::new();
    for ch in title.chars() {
        if RESERVED_CHARS.contains(&ch) && !offenders.contains(&ch) {
            offenders.push(ch);
        }
    }

    if offenders.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::IllegalCharacters { offenders })
    }
}
