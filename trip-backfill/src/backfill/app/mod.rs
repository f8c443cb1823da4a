mod backfill_app;
mod operation;

pub use backfill_app::BackfillApp;
pub use operation::BackfillOperation;
