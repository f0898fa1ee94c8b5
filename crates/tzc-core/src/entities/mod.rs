//! Entity structs for the conversion batch.
//!
//! `TemporalColumn` maps to one `information_schema.columns` row. `TableGroup`
//! and `ConversionOutcome` only live for the duration of a run.

mod column;
mod outcome;
mod table_group;

pub use column::TemporalColumn;
pub use outcome::{ConversionOutcome, OutcomeStatus};
pub use table_group::TableGroup;
