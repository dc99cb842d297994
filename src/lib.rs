//! Approximates a raster image with simple geometric shapes.
//!
//! Each [`Model::step`] hill-climbs a batch of random candidate shapes in
//! parallel against the target, draws the best one with its least-squares
//! color and keeps it only if the image moved closer to the target.
//!
//! ```no_run
//! use geometrize::{Bitmap, Model, Rgba, StepSettings};
//!
//! let target = Bitmap::new(64, 64, Rgba::new(30, 60, 90, 255));
//! let mut model = Model::new(target);
//! let settings = StepSettings::default();
//! for _ in 0..100 {
//!     for result in model.step_with(&settings).unwrap() {
//!         println!("{:?} {:?} -> {:.5}", result.shape, result.color, result.score);
//!     }
//! }
//! ```

pub mod bitmap;
pub mod engine;
pub mod error;
pub mod fitness;
pub mod geom;
pub mod rng;
pub mod scanline;
pub mod settings;
pub mod shape;

pub use bitmap::{Bitmap, Rgba};
pub use engine::{
    best_hill_climb_state, default_acceptance, hill_climb, reject_transparent_coverage, Acceptance,
    AcceptancePrecondition, Model, SearchContext, ShapeResult, State,
};
pub use error::{GeometrizeError, Result};
pub use fitness::{
    compute_optimal_color, default_energy_function, difference_full, difference_partial, EnergyFunction,
    MetricsSnapshot,
};
pub use geom::Bounds;
pub use rng::{derive_seed, SplitMix64};
pub use scanline::{scanlines_contain_transparent_pixels, trim_scanlines, Scanline};
pub use settings::StepSettings;
pub use shape::{random_shape_creator, Shape, ShapeType};
