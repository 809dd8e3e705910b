//! Buff aggregation: folds per-clause results into a four-cell `BuffRecord`.
//!
//! Each clause is classified once (immediate or conditional) and then read for
//! an ATK magnitude and a DEF magnitude independently. Raw magnitudes are
//! summed as integers into the cell picked by (attribute, timing), and each
//! cell total is scaled once at the end, so the result never depends on
//! clause order.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::extraction::clauses::{split_clauses, RawDescription};
use crate::extraction::magnitude::{extract_magnitude, AttributeKind};
use crate::extraction::scale::UnitScale;
use crate::extraction::timing::{classify_timing, TimingClass};
use crate::extraction::triggers::{default_triggers, TriggerSet};

// ────────────────────────────────────────────────────────────────────────────
// Record types
// ────────────────────────────────────────────────────────────────────────────

/// One of the four {attribute × timing} cells of a `BuffRecord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuffCell {
    AtkImmediate,
    AtkConditional,
    DefImmediate,
    DefConditional,
}

impl BuffCell {
    pub const ALL: [BuffCell; 4] = [
        BuffCell::AtkImmediate,
        BuffCell::AtkConditional,
        BuffCell::DefImmediate,
        BuffCell::DefConditional,
    ];

    pub fn new(attribute: AttributeKind, timing: TimingClass) -> Self {
        match (attribute, timing) {
            (AttributeKind::Atk, TimingClass::Immediate) => BuffCell::AtkImmediate,
            (AttributeKind::Atk, TimingClass::Conditional) => BuffCell::AtkConditional,
            (AttributeKind::Def, TimingClass::Immediate) => BuffCell::DefImmediate,
            (AttributeKind::Def, TimingClass::Conditional) => BuffCell::DefConditional,
        }
    }

    pub fn attribute(self) -> AttributeKind {
        match self {
            BuffCell::AtkImmediate | BuffCell::AtkConditional => AttributeKind::Atk,
            BuffCell::DefImmediate | BuffCell::DefConditional => AttributeKind::Def,
        }
    }

    fn index(self) -> usize {
        match self {
            BuffCell::AtkImmediate => 0,
            BuffCell::AtkConditional => 1,
            BuffCell::DefImmediate => 2,
            BuffCell::DefConditional => 3,
        }
    }

    pub fn timing(self) -> TimingClass {
        match self {
            BuffCell::AtkImmediate | BuffCell::DefImmediate => TimingClass::Immediate,
            BuffCell::AtkConditional | BuffCell::DefConditional => TimingClass::Conditional,
        }
    }

    /// Human-readable legend label, e.g. "ATK Buff (conditional)".
    pub fn label(self) -> String {
        let timing = match self.timing() {
            TimingClass::Immediate => "immediate",
            TimingClass::Conditional => "conditional",
        };
        format!("{} Buff ({timing})", self.attribute().name())
    }
}

/// Structured buff summary of one description.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BuffRecord {
    pub atk_immediate: f64,
    pub atk_conditional: f64,
    pub def_immediate: f64,
    pub def_conditional: f64,
}

impl BuffRecord {
    pub fn get(&self, cell: BuffCell) -> f64 {
        match cell {
            BuffCell::AtkImmediate => self.atk_immediate,
            BuffCell::AtkConditional => self.atk_conditional,
            BuffCell::DefImmediate => self.def_immediate,
            BuffCell::DefConditional => self.def_conditional,
        }
    }

    pub fn get_mut(&mut self, cell: BuffCell) -> &mut f64 {
        match cell {
            BuffCell::AtkImmediate => &mut self.atk_immediate,
            BuffCell::AtkConditional => &mut self.atk_conditional,
            BuffCell::DefImmediate => &mut self.def_immediate,
            BuffCell::DefConditional => &mut self.def_conditional,
        }
    }

    pub fn is_zero(&self) -> bool {
        BuffCell::ALL.iter().all(|&c| self.get(c) == 0.0)
    }
}

/// Per-clause diagnostic returned alongside a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClauseBreakdown {
    pub text: String,
    pub timing: TimingClass,
    /// Names of the trigger phrases that matched, in list order.
    pub triggers: Vec<String>,
    /// `None` when the clause does not mention ATK.
    pub atk: Option<f64>,
    /// `None` when the clause does not mention DEF.
    pub def: Option<f64>,
}

// ────────────────────────────────────────────────────────────────────────────
// Extractor
// ────────────────────────────────────────────────────────────────────────────

/// A single extraction pipeline: one borrowed trigger set, one unit scale.
#[derive(Debug, Clone, Copy)]
pub struct BuffExtractor<'t> {
    triggers: &'t TriggerSet,
    scale: UnitScale,
}

impl<'t> BuffExtractor<'t> {
    pub fn new(triggers: &'t TriggerSet, scale: UnitScale) -> Self {
        Self { triggers, scale }
    }

    /// Extractor over the built-in trigger phrases.
    pub fn with_default_triggers(scale: UnitScale) -> BuffExtractor<'static> {
        BuffExtractor::new(default_triggers(), scale)
    }

    pub fn scale(&self) -> UnitScale {
        self.scale
    }

    pub fn extract(&self, raw: RawDescription<'_>) -> BuffRecord {
        let mut totals = [0u64; 4];
        for clause in split_clauses(raw) {
            let timing = classify_timing(clause, self.triggers);
            for attribute in AttributeKind::ALL {
                if let Some(magnitude) = extract_magnitude(clause, attribute) {
                    let total = &mut totals[BuffCell::new(attribute, timing).index()];
                    *total = total.saturating_add(u64::from(magnitude));
                }
            }
        }

        let mut record = BuffRecord::default();
        for cell in BuffCell::ALL {
            *record.get_mut(cell) = self.scale.apply(totals[cell.index()]);
        }
        record
    }

    pub fn explain(&self, raw: RawDescription<'_>) -> Vec<ClauseBreakdown> {
        split_clauses(raw)
            .into_iter()
            .map(|clause| {
                let timing = classify_timing(clause, self.triggers);
                let triggers: Vec<String> = self
                    .triggers
                    .matching(clause)
                    .into_iter()
                    .map(String::from)
                    .collect();
                if !triggers.is_empty() {
                    debug!(clause, ?triggers, "clause classified as conditional");
                }
                ClauseBreakdown {
                    text: clause.to_string(),
                    timing,
                    triggers,
                    atk: extract_magnitude(clause, AttributeKind::Atk).map(|m| self.scale.apply(u64::from(m))),
                    def: extract_magnitude(clause, AttributeKind::Def).map(|m| self.scale.apply(u64::from(m))),
                }
            })
            .collect()
    }

    pub fn extract_batch(&self, raws: &[RawDescription<'_>]) -> Vec<BuffRecord> {
        raws.iter().map(|&raw| self.extract(raw)).collect()
    }
}
