//! Output module for scrape results
//!
//! This module holds:
//! - `CharacterRecord`, the unit a run emits
//! - `ScrapeReport`, records plus the non-fatal failures met on the way
//! - statistics printed by the CLI after a run

mod record;
mod report;
pub mod stats;

pub use record::{CharacterRecord, FieldData, FieldValue};
pub use report::{FailureStage, ListingCount, ScrapeFailure, ScrapeReport};
pub use stats::{compute_statistics, print_statistics, ScrapeStatistics};
