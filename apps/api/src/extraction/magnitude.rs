//! Percentage magnitude extraction.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeKind {
    #[serde(rename = "ATK")]
    Atk,
    #[serde(rename = "DEF")]
    Def,
}

impl AttributeKind {
    pub const ALL: [AttributeKind; 2] = [AttributeKind::Atk, AttributeKind::Def];

    pub fn name(self) -> &'static str {
        match self {
            AttributeKind::Atk => "ATK",
            AttributeKind::Def => "DEF",
        }
    }

    /// Case-insensitive substring check on the attribute name.
    pub fn is_mentioned_in(self, clause: &str) -> bool {
        clause.to_uppercase().contains(self.name())
    }
}

fn percent_token() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| Regex::new(r"\+?(\d+)%").expect("valid regex"))
}

/// Value of the first `+?<digits>%` token in the clause.
///
/// Later tokens are ignored, so "ATK +10% to +20%" reads as 10. A digit run
/// too large for `u32` counts as no token.
pub fn first_percentage(clause: &str) -> Option<u32> {
    percent_token()
        .captures(clause)
        .and_then(|caps| caps.get(1))
        .and_then(|digits| digits.as_str().parse().ok())
}

/// Magnitude contributed by `attribute` in `clause`.
///
/// `None` when the attribute is not mentioned; `Some(0)` when it is mentioned
/// without a percentage.
pub fn extract_magnitude(clause: &str, attribute: AttributeKind) -> Option<u32> {
    if !attribute.is_mentioned_in(clause) {
        return None;
    }
    Some(first_percentage(clause).unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plus_prefixed_percentage() {
        assert_eq!(extract_magnitude("ATK +50%", AttributeKind::Atk), Some(50));
    }

    #[test]
    fn test_unprefixed_percentage() {
        assert_eq!(extract_magnitude("DEF 30%", AttributeKind::Def), Some(30));
    }

    #[test]
    fn test_mention_is_case_insensitive() {
        assert_eq!(extract_magnitude("raises atk by 25%", AttributeKind::Atk), Some(25));
    }

    #[test]
    fn test_not_mentioned_yields_none() {
        assert_eq!(extract_magnitude("Ki +3, 50% chance", AttributeKind::Atk), None);
    }

    #[test]
    fn test_mentioned_without_number_is_zero() {
        assert_eq!(extract_magnitude("Boosts ATK and DEF", AttributeKind::Def), Some(0));
    }

    #[test]
    fn test_only_first_token_counts() {
        assert_eq!(extract_magnitude("ATK +10% to +20%", AttributeKind::Atk), Some(10));
    }

    #[test]
    fn test_both_attributes_read_the_same_token() {
        let clause = "ATK & DEF +77%";
        assert_eq!(extract_magnitude(clause, AttributeKind::Atk), Some(77));
        assert_eq!(extract_magnitude(clause, AttributeKind::Def), Some(77));
    }

    #[test]
    fn test_number_without_percent_is_not_a_token() {
        assert_eq!(first_percentage("Ki +2"), None);
        assert_eq!(first_percentage("ATK + 20 %"), None);
    }

    #[test]
    fn test_overflowing_digits_degrade_to_zero() {
        assert_eq!(
            extract_magnitude("ATK +99999999999999999999%", AttributeKind::Atk),
            Some(0)
        );
    }

    #[test]
    fn test_attribute_serializes_as_upper_name() {
        assert_eq!(serde_json::to_string(&AttributeKind::Def).unwrap(), r#""DEF""#);
    }
}
