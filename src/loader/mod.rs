//! File loading for scenarios and rubrics.
//!
//! Scenario and rubric files are JSON or YAML; everything is validated
//! here so the engine only ever sees well-formed records.

mod rubric_loader;
mod scenario_loader;

pub use rubric_loader::load_rubric;
pub use scenario_loader::load_scenario;
