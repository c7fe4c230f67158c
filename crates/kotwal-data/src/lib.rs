#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/kotwal-analytics/kotwal/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod loader;
pub mod record;
pub mod schema;

pub use error::{DataError, Result};
pub use loader::load_station_table;
pub use record::{StationRecord, station_records};
pub use schema::{EnrichmentFlags, REQUIRED_COLUMNS, enrichment_flags, validate_required};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
