//! State module for tracking listing traversal
//!
//! - `ListingState`: where a paginated listing walk currently is

mod listing_state;

pub use listing_state::ListingState;
