pub mod app;
mod backfill_config;
mod backfill_error;
mod backfill_row;
pub mod duration_ops;
pub mod index_ops;
mod midnight_rollover_policy;
pub mod report_ops;
mod trip_index;
mod trip_record;
mod trip_request;

pub use backfill_config::BackfillConfig;
pub use backfill_error::BackfillError;
pub use backfill_row::{BackfillReport, BackfillRow};
pub use midnight_rollover_policy::MidnightRolloverPolicy;
pub use trip_index::TripIndex;
pub use trip_record::TripRecord;
pub use trip_request::TripRequest;
