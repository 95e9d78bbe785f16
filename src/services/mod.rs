pub mod asymptotic;
pub mod case_analyzer;
pub mod classifier;
pub mod math_engine;
pub mod orchestrator;
pub mod render;
pub mod tree_builder;

pub use orchestrator::Orchestrator;
