// Engine module organization
// hill_climb: per-candidate local search and the parallel best-of-N fan-out
// model: the stepping model that commits or rolls back the winner

pub mod hill_climb;
pub mod model;

pub use hill_climb::{best_hill_climb_state, climb_candidate, hill_climb, SearchContext, State};
pub use model::{default_acceptance, reject_transparent_coverage, Acceptance, AcceptancePrecondition, Model, ShapeResult};
