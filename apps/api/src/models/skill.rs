use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::extraction::RawDescription;

/// One character record as produced by the tabular loader.
///
/// Both columns stay loosely typed: a missing or non-string value is a valid
/// row that simply carries no skill text or no usable date.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillRow {
    #[serde(rename = "Release Date", alias = "release_date", default)]
    pub release_date: Value,
    #[serde(rename = "Passive Skill", alias = "passive_skill", default)]
    pub passive_skill: Value,
}

impl SkillRow {
    pub fn new(release_date: &str, passive_skill: &str) -> Self {
        Self {
            release_date: Value::String(release_date.to_string()),
            passive_skill: Value::String(passive_skill.to_string()),
        }
    }

    pub fn description(&self) -> RawDescription<'_> {
        RawDescription::from_json(&self.passive_skill)
    }

    pub fn release_date_text(&self) -> Option<&str> {
        self.release_date.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_column_names() {
        let row: SkillRow = serde_json::from_str(
            r#"{"Release Date": "Jan 01, 2024", "Passive Skill": "ATK +50%"}"#,
        )
        .unwrap();
        assert_eq!(row.release_date_text(), Some("Jan 01, 2024"));
        assert_eq!(row.description(), RawDescription::Present("ATK +50%"));
    }

    #[test]
    fn test_deserializes_snake_case_aliases() {
        let row: SkillRow =
            serde_json::from_str(r#"{"release_date": "Feb 02, 2023", "passive_skill": null}"#)
                .unwrap();
        assert_eq!(row.release_date_text(), Some("Feb 02, 2023"));
        assert_eq!(row.description(), RawDescription::Absent);
    }

    #[test]
    fn test_missing_columns_default_to_null() {
        let row: SkillRow = serde_json::from_str("{}").unwrap();
        assert_eq!(row.release_date_text(), None);
        assert_eq!(row.description(), RawDescription::Absent);
    }

    #[test]
    fn test_numeric_skill_is_absent() {
        let row: SkillRow =
            serde_json::from_str(r#"{"Release Date": "Jan 01, 2024", "Passive Skill": 12}"#)
                .unwrap();
        assert_eq!(row.description(), RawDescription::Absent);
    }
}
