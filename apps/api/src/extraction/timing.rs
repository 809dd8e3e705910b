use serde::{Deserialize, Serialize};

use crate::extraction::triggers::TriggerSet;

/// Whether a clause describes a base effect or one gated by an in-game trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimingClass {
    Immediate,
    Conditional,
}

/// Classifies a single clause. Any trigger match makes the whole clause conditional.
pub fn classify_timing(clause: &str, triggers: &TriggerSet) -> TimingClass {
    if triggers.is_match(clause) {
        TimingClass::Conditional
    } else {
        TimingClass::Immediate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::triggers::{default_triggers, DEFAULT_TRIGGER_PATTERNS};
    use proptest::prelude::*;

    #[test]
    fn test_base_effect_is_immediate() {
        assert_eq!(
            classify_timing("ATK +50%", default_triggers()),
            TimingClass::Immediate
        );
    }

    #[test]
    fn test_super_attack_clause_is_conditional() {
        assert_eq!(
            classify_timing("ATK +20% when performing a super attack", default_triggers()),
            TimingClass::Conditional
        );
    }

    #[test]
    fn test_after_receiving_damage_is_conditional() {
        assert_eq!(
            classify_timing("DEF +40% after receiving an attack", default_triggers()),
            TimingClass::Conditional
        );
    }

    #[test]
    fn test_same_turn_is_conditional() {
        assert_eq!(
            classify_timing("ATK +15% within the same turn", default_triggers()),
            TimingClass::Conditional
        );
    }

    #[test]
    fn test_empty_clause_is_immediate() {
        assert_eq!(classify_timing("", default_triggers()), TimingClass::Immediate);
    }

    #[test]
    fn test_custom_empty_set_is_always_immediate() {
        let set = TriggerSet::compile(&[]).unwrap();
        assert_eq!(
            classify_timing("ATK +20% when attacking", &set),
            TimingClass::Immediate
        );
    }

    proptest! {
        // Appending a second trigger phrase never flips a conditional clause back.
        #[test]
        fn test_adding_trigger_keeps_conditional(
            first in 0..DEFAULT_TRIGGER_PATTERNS.len(),
            second in 0..DEFAULT_TRIGGER_PATTERNS.len(),
            prefix in "[A-Za-z +%0-9]{0,20}",
        ) {
            let phrases = [
                "after receiving damage",
                "within the same turn",
                "when performing a super attack",
                "when attacking",
                "when receiving",
                "after performing a super attack",
            ];
            let base = format!("{prefix} {}", phrases[first]);
            let extended = format!("{base} {}", phrases[second]);
            let triggers = default_triggers();
            prop_assert_eq!(classify_timing(&base, triggers), TimingClass::Conditional);
            prop_assert_eq!(classify_timing(&extended, triggers), TimingClass::Conditional);
        }
    }
}
