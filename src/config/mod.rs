//! Threshold configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Per-smell numeric cutoffs. Loaded whole at engine construction and
/// read-only thereafter; unspecified smells keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Thresholds {
    /// Minimum unexplained assertions before a method is flagged
    pub assertion_roulette: u32,
    /// Minimum numeric literals inside assertions before flagging
    pub magic_number: u32,
    /// Minimum string literals inside assertions before flagging
    pub magic_string: u32,
    /// Flagged when the toString-coupled assertion count exceeds this
    pub sensitive_equality: u32,
    /// Flagged when the conditional-construct count exceeds this
    pub conditional_test_logic: u32,
    /// Flagged when the throw/catch count exceeds this
    pub exception_handling: u32,
    /// Flagged when the print-call count exceeds this
    pub print_statement: u32,
    /// Flagged when the Thread.sleep count exceeds this
    pub sleepy_test: u32,
    /// Flagged when the external-resource count exceeds this
    pub mystery_guest: u32,
    /// Flagged when the unchecked-file count exceeds this
    pub resource_optimism: u32,
    /// Flagged when the duplicate-assertion count exceeds this
    pub duplicate_assert: u32,
    /// Flagged when a test method spans more source lines than this
    pub verbose_test: u32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            assertion_roulette: 1,
            magic_number: 1,
            magic_string: 1,
            sensitive_equality: 0,
            conditional_test_logic: 0,
            exception_handling: 0,
            print_statement: 0,
            sleepy_test: 0,
            mystery_guest: 0,
            resource_optimism: 0,
            duplicate_assert: 0,
            verbose_test: 123,
        }
    }
}

impl Thresholds {
    /// Load thresholds from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read thresholds: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON in thresholds: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_for_missing_keys() {
        let t: Thresholds = serde_json::from_str(r#"{"assertionRoulette": 3}"#).unwrap();
        assert_eq!(t.assertion_roulette, 3);
        assert_eq!(t.magic_number, 1);
        assert_eq!(t.verbose_test, 123);
    }

    #[test]
    fn load_rejects_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("thresholds.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(Thresholds::load(&path).is_err());
    }
}
