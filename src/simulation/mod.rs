//! Cohort synthesis and the sequential simulation loop.

pub mod generator;
pub mod runner;

pub use generator::ApplicantGenerator;
pub use runner::{SimulationOutcome, SimulationRunner};
