// Buff trend reporting
// Implements: release-date normalization, per-date grouping, peaks, chart payloads.

pub mod builder;
pub mod chart;
pub mod dates;
pub mod handlers;
