//! Estimates the energy saved by shutting industrial air compressors down on a
//! schedule: raw current-draw series are reduced to a weekly power profile per
//! compressor, and a shutdown schedule is priced out against those profiles.
//!
//! The crate is the computation only. A front end supplies the raw exports, the
//! configuration, and the schedule, and consumes the profile and report structures.

pub mod compressor;
pub mod error;
pub mod grid;
pub mod ingest;
pub mod profile;
pub mod quantity;
pub mod sample;
pub mod savings;
pub mod schedule;
pub mod simulation;
pub mod tables;
pub mod weekday;
