//! Batch simulation and reporting.

pub mod report;
pub mod runner;

pub use report::{GameRecord, ReportError, SimulationReport, StrategySummary};
pub use runner::{Simulation, DEFAULT_SEED};
