//! Editorial-plan pipeline: ideas, rows, export and the run that ties them together.

pub mod assembler;
pub mod export;
pub mod ideas;
pub mod pipeline;

pub use assembler::PlanAssembler;
pub use ideas::{IdeaGenerator, IdeaOutcome, IdeaSource, IDEA_COUNT};
pub use pipeline::{EditorialPlan, EditorialPlanner, Stage};
