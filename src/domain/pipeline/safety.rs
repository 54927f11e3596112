//! Unsafe-claim screening for free-text report fields.
//!
//! Model-written prose must never promise guaranteed outcomes. The screener
//! holds a lowercased phrase blacklist and scans the detailed summary, the
//! verdict headline, and every key risk, case-insensitively, in that order.
//! The first hit wins and names both the phrase and the field it appeared in.

use once_cell::sync::Lazy;

use crate::domain::report::{LabReport, SafetyError};

/// Phrases that make a financial claim no honest analysis can back.
static DEFAULT_UNSAFE_PHRASES: Lazy<Vec<String>> = Lazy::new(|| {
    [
        "guaranteed",
        "risk-free",
        "risk free",
        "everyone can",
        "you will definitely",
        "free money",
        "no downside",
        "bypass the system",
        "loophole that always works",
        "always works",
        "never fails",
        "100% success",
        "cant lose",
        "can't lose",
        "zero risk",
    ]
    .into_iter()
    .map(str::to_owned)
    .collect()
});

/// Scans report prose for blacklisted phrases.
#[derive(Debug, Clone)]
pub struct SafetyScreener {
    phrases: Vec<String>,
}

impl Default for SafetyScreener {
    fn default() -> Self {
        Self::new()
    }
}

impl SafetyScreener {
    /// Screener with the built-in blacklist.
    pub fn new() -> Self {
        Self {
            phrases: DEFAULT_UNSAFE_PHRASES.clone(),
        }
    }

    /// Screener with extra phrases on top of the built-in blacklist.
    ///
    /// Extra phrases are lowercased on the way in so matching stays
    /// case-insensitive.
    pub fn with_additional_phrases<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut phrases = DEFAULT_UNSAFE_PHRASES.clone();
        phrases.extend(extra.into_iter().map(|p| p.as_ref().to_lowercase()));
        Self { phrases }
    }

    /// Checks the free-text fields, returning the first phrase hit.
    pub fn screen(&self, report: &LabReport) -> Result<(), SafetyError> {
        self.screen_field(&report.hack_normalized.detailed_summary, "detailed summary")?;
        self.screen_field(&report.verdict.headline, "verdict headline")?;
        for risk in &report.key_points.key_risks {
            self.screen_field(risk, "key risks")?;
        }
        Ok(())
    }

    fn screen_field(&self, text: &str, field: &'static str) -> Result<(), SafetyError> {
        let lowered = text.to_lowercase();
        for phrase in &self.phrases {
            if lowered.contains(phrase.as_str()) {
                return Err(SafetyError::UnsafePhrase {
                    phrase: phrase.clone(),
                    field,
                });
            }
        }
        Ok(())
    }
}
