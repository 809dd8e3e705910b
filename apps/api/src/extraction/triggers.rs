//! Conditional trigger phrases.
//!
//! The default set is compiled once per process and shared read-only by every
//! extractor. A clause matching any trigger is a conditional effect.

use std::sync::OnceLock;

use regex::{Regex, RegexBuilder};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TriggerError {
    #[error("Invalid trigger pattern '{name}': {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },
}

/// Default trigger phrases, in evaluation order: (name, pattern).
pub const DEFAULT_TRIGGER_PATTERNS: &[(&str, &str)] = &[
    ("after_receiving", r"after receiving(?: (?:an? )?(?:attack|damage))?"),
    ("same_turn", r"within the same turn"),
    (
        "performing_super_attack",
        r"when performing (?:a|an ultra) super attack",
    ),
    ("attacking", r"when attacking"),
    ("receiving", r"when receiving"),
    (
        "after_super_attack",
        r"after performing (?:a|an ultra) super attack",
    ),
];

#[derive(Debug)]
struct Trigger {
    name: String,
    regex: Regex,
}

/// An ordered, immutable list of case-insensitive trigger patterns.
#[derive(Debug)]
pub struct TriggerSet {
    triggers: Vec<Trigger>,
}

impl TriggerSet {
    /// Compiles a trigger set from `(name, pattern)` pairs.
    pub fn compile(patterns: &[(&str, &str)]) -> Result<Self, TriggerError> {
        let triggers = patterns
            .iter()
            .map(|&(name, pattern)| {
                RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .map(|regex| Trigger {
                        name: name.to_string(),
                        regex,
                    })
                    .map_err(|source| TriggerError::InvalidPattern {
                        name: name.to_string(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { triggers })
    }

    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }

    pub fn is_match(&self, clause: &str) -> bool {
        self.triggers.iter().any(|t| t.regex.is_match(clause))
    }

    /// Names of every trigger that matches `clause`, in list order.
    pub fn matching(&self, clause: &str) -> Vec<&str> {
        self.triggers
            .iter()
            .filter(|t| t.regex.is_match(clause))
            .map(|t| t.name.as_str())
            .collect()
    }
}

/// The process-wide default trigger set.
pub fn default_triggers() -> &'static TriggerSet {
    static TRIGGERS: OnceLock<TriggerSet> = OnceLock::new();
    TRIGGERS.get_or_init(|| {
        TriggerSet::compile(DEFAULT_TRIGGER_PATTERNS).expect("default trigger patterns are valid")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_set_compiles_every_pattern() {
        let set = TriggerSet::compile(DEFAULT_TRIGGER_PATTERNS).unwrap();
        assert_eq!(set.len(), DEFAULT_TRIGGER_PATTERNS.len());
        assert_eq!(default_triggers().len(), DEFAULT_TRIGGER_PATTERNS.len());
    }

    #[test]
    fn test_default_set_keeps_pattern_order() {
        let names: Vec<&str> = DEFAULT_TRIGGER_PATTERNS.iter().map(|&(name, _)| name).collect();
        let clause = "after receiving damage within the same turn when performing a super attack \
                      when attacking when receiving after performing a super attack";
        assert_eq!(default_triggers().matching(clause), names);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let set = default_triggers();
        assert!(set.is_match("ATK +20% WHEN PERFORMING A SUPER ATTACK"));
        assert!(set.is_match("def +10% after Receiving damage"));
    }

    #[test]
    fn test_ultra_super_attack_is_a_trigger() {
        assert!(default_triggers().is_match("ATK +50% when performing an Ultra Super Attack"));
    }

    #[test]
    fn test_plain_clause_matches_nothing() {
        let set = default_triggers();
        assert!(!set.is_match("ATK & DEF +120%"));
        assert!(set.matching("Ki +3").is_empty());
    }

    #[test]
    fn test_matching_reports_overlaps_in_order() {
        let names = default_triggers()
            .matching("ATK +10% when attacking, when receiving attacks within the same turn");
        assert_eq!(names, vec!["same_turn", "attacking", "receiving"]);
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let err = TriggerSet::compile(&[("broken", r"when (attacking")]).unwrap_err();
        assert!(matches!(err, TriggerError::InvalidPattern { ref name, .. } if name == "broken"));
    }

    #[test]
    fn test_empty_set_never_matches() {
        let set = TriggerSet::compile(&[]).unwrap();
        assert!(set.is_empty());
        assert!(!set.is_match("when attacking"));
    }
}
