//! Region growth and boundary filtering

pub mod selector;
pub use selector::select_region;

pub mod filter;
pub use filter::{FilteredRegion, SiteEdgeMap, filter_to_bounds};
