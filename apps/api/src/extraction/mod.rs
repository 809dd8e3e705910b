// Passive-skill extraction engine
// Implements: clause splitting, trigger matching, timing classification,
// magnitude extraction, unit scaling and buff aggregation.

pub mod aggregator;
pub mod clauses;
pub mod handlers;
pub mod magnitude;
pub mod scale;
pub mod timing;
pub mod triggers;

pub use aggregator::{BuffCell, BuffExtractor, BuffRecord};
pub use clauses::RawDescription;
pub use scale::UnitScale;
