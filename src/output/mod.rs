// src/output/mod.rs
//! Output handling with clear separation of planning and execution.
//!
//! Callers build an `OutputPlan` describing where the deck JSON goes; only
//! `deliver` touches the filesystem or stdout.

mod types;
mod writer;

pub use types::{DeliveryTarget, OutputPlan, OutputReport};
pub use writer::deliver;
