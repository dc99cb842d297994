// Fitness module organization
// difference scoring, color solving and the energy used to rank candidates

pub mod color;
pub mod difference;
pub mod energy;
pub mod metrics;

pub use color::compute_optimal_color;
pub use difference::{difference_full, difference_partial};
pub use energy::{default_energy_function, EnergyFunction};
pub use metrics::MetricsSnapshot;
