//! Merge per-cohort driver-gene results into three report tables:
//! `drivers.tsv`, `unfiltered_drivers.tsv` and `unique_drivers.tsv`.

pub mod collect;
pub mod config;
pub mod emit;
pub mod enrich;
pub mod load;
pub mod pipeline;
pub mod schema;
pub mod table;

pub use config::{Config, Inputs};
pub use pipeline::{run, RunSummary};
