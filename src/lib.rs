//! CEMA 576 belt cleaning severity classification.
//!
//! [`scoring`] holds the pure engine and its validating boundary, [`units`]
//! the conversions into inches and feet per minute. The remaining modules
//! back the `cema-score` command line tool.

pub mod browser;
pub mod config;
pub mod output;
pub mod report;
pub mod scoring;
pub mod store;
pub mod telemetry;
pub mod units;
