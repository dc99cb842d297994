use serde::{Deserialize, Serialize};

use crate::bitmap::{Bitmap, Rgba};
use crate::error::Result;
use crate::fitness::{compute_optimal_color, default_energy_function, difference_full, difference_partial, EnergyFunction};
use crate::geom::Bounds;
use crate::rng::SplitMix64;
use crate::scanline::{scanlines_contain_transparent_pixels, Scanline};
use crate::settings::StepSettings;
use crate::shape::{random_shape_creator, Shape};

use super::hill_climb::{best_hill_climb_state, SearchContext};

/// a shape committed to the model, with the score after drawing it
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapeResult {
    pub score: f64,
    pub color: Rgba,
    pub shape: Shape,
}

/// everything an acceptance precondition may inspect about a drawn candidate
#[derive(Clone, Copy, Debug)]
pub struct Acceptance<'a> {
    pub prior_score: f64,
    pub new_score: f64,
    pub shape: &'a Shape,
    pub lines: &'a [Scanline],
    pub color: Rgba,
    pub before: &'a Bitmap,
    pub after: &'a Bitmap,
    pub target: &'a Bitmap,
}

/// decides whether a step's winning shape is committed
pub trait AcceptancePrecondition {
    fn accept(&self, candidate: &Acceptance<'_>) -> bool;
}

impl<F> AcceptancePrecondition for F
where
    F: Fn(&Acceptance<'_>) -> bool,
{
    #[inline]
    fn accept(&self, candidate: &Acceptance<'_>) -> bool {
        self(candidate)
    }
}

/// accept only strict improvements
pub fn default_acceptance(candidate: &Acceptance<'_>) -> bool {
    candidate.new_score < candidate.prior_score
}

/// strict improvement, and no covered target pixel with alpha below `min_alpha`
pub fn reject_transparent_coverage(min_alpha: u8) -> impl Fn(&Acceptance<'_>) -> bool {
    move |candidate: &Acceptance<'_>| {
        default_acceptance(candidate)
            && !scanlines_contain_transparent_pixels(candidate.lines, candidate.target, min_alpha)
    }
}

/// the stepping model: owns the target, the image built so far and its score.
///
/// `target` and `current` keep identical dimensions for the model's lifetime.
#[derive(Debug)]
pub struct Model {
    target: Bitmap,
    current: Bitmap,
    last_score: f64,
    bounds: Bounds,
    base_seed: u64,
    seed_offset: u64,
    pool: Option<rayon::ThreadPool>,
}

impl Model {
    /// start from a flat canvas in the target's average color.
    ///
    /// # Panics
    /// if the target has zero width or height.
    pub fn new(target: Bitmap) -> Self {
        let initial = Bitmap::new(target.width(), target.height(), target.average_color());
        Self::with_initial(target, initial)
    }

    /// start from an existing image.
    ///
    /// # Panics
    /// if either bitmap is zero-sized or their dimensions differ.
    pub fn with_initial(target: Bitmap, initial: Bitmap) -> Self {
        assert!(
            target.width() > 0 && target.height() > 0,
            "target bitmap must be at least 1x1, got {}x{}",
            target.width(),
            target.height()
        );
        assert_eq!(
            (target.width(), target.height()),
            (initial.width(), initial.height()),
            "target and initial bitmaps must share dimensions"
        );

        let bounds = Bounds {
            min_x: 0,
            min_y: 0,
            max_x: target.width() as i32 - 1,
            max_y: target.height() as i32 - 1,
        };
        let last_score = difference_full(&target, &initial);
        Self {
            target,
            current: initial,
            last_score,
            bounds,
            base_seed: 0,
            seed_offset: 0,
            pool: None,
        }
    }

    /// refill the canvas with one color and rescore from scratch
    pub fn reset(&mut self, background: Rgba) {
        self.current.fill(background);
        self.last_score = difference_full(&self.target, &self.current);
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.target.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.target.height()
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn target(&self) -> &Bitmap {
        &self.target
    }

    pub fn current(&self) -> &Bitmap {
        &self.current
    }

    /// running full-image difference of `current` against `target`
    pub fn score(&self) -> f64 {
        self.last_score
    }

    /// set the user-controlled base seed. the per-step offset keeps counting.
    pub fn set_seed(&mut self, seed: u64) {
        self.base_seed = seed;
    }

    pub fn seed(&self) -> u64 {
        self.base_seed
    }

    /// run one optimization step.
    ///
    /// `shape_count` candidates are created, set up and hill-climbed for up to
    /// `max_shape_mutations` non-improving mutations each, in parallel. the best is
    /// drawn with its optimal color and kept if `acceptance` agrees; otherwise the
    /// canvas is restored and the result is empty.
    pub fn step<C, E, A>(
        &mut self,
        shape_creator: &C,
        alpha: u8,
        shape_count: usize,
        max_shape_mutations: u32,
        energy: &E,
        acceptance: &A,
    ) -> Vec<ShapeResult>
    where
        C: Fn(&mut SplitMix64) -> Shape + Sync + ?Sized,
        E: EnergyFunction + ?Sized,
        A: AcceptancePrecondition + ?Sized,
    {
        profiling::scope!("Model::step");
        let step_seed = self.base_seed.wrapping_add(self.seed_offset);
        self.seed_offset += 1;

        let best = {
            let ctx = SearchContext {
                target: &self.target,
                current: &self.current,
                bounds: self.bounds,
                score: self.last_score,
            };
            best_hill_climb_state(shape_creator, alpha, shape_count, max_shape_mutations, &ctx, energy, step_seed)
        };
        let Some(best) = best else {
            return Vec::new();
        };

        let shape = best.shape;
        let lines = shape.rasterize(&self.bounds);
        let color = compute_optimal_color(&self.target, &self.current, &lines, alpha);
        let before = self.current.clone();
        self.current.draw(&lines, color);
        let new_score = difference_partial(&self.target, &before, &self.current, self.last_score, &lines);

        let verdict = Acceptance {
            prior_score: self.last_score,
            new_score,
            shape: &shape,
            lines: &lines,
            color,
            before: &before,
            after: &self.current,
            target: &self.target,
        };
        if !acceptance.accept(&verdict) {
            tracing::debug!(step_seed, prior = self.last_score, rejected = new_score, "step rejected");
            self.current = before;
            return Vec::new();
        }

        tracing::debug!(step_seed, prior = self.last_score, score = new_score, shape = ?shape.shape_type(), "step accepted");
        self.last_score = new_score;
        vec![ShapeResult { score: new_score, color, shape }]
    }

    /// one step driven by settings: random shape types from the list, the default
    /// energy and acceptance, and an optional dedicated thread pool.
    ///
    /// `settings.seed` becomes the model's base seed on every call and replaces any
    /// value set earlier with [`Model::set_seed`]. the per-step offset is not reset,
    /// so repeated calls with the same settings keep producing fresh candidates.
    pub fn step_with(&mut self, settings: &StepSettings) -> Result<Vec<ShapeResult>> {
        settings.validate()?;
        self.set_seed(settings.seed);
        let creator = random_shape_creator(settings.shape_types.clone());
        let alpha = settings.alpha;
        let shape_count = settings.shape_count;
        let max_mutations = settings.max_shape_mutations;

        let Some(threads) = settings.max_threads else {
            return Ok(self.step(&creator, alpha, shape_count, max_mutations, &default_energy_function, &default_acceptance));
        };

        let reuse = matches!(&self.pool, Some(pool) if pool.current_num_threads() == threads);
        if !reuse {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .thread_name(|i| format!("geometrize-{i}"))
                .build();
            match pool {
                Ok(pool) => self.pool = Some(pool),
                Err(err) => {
                    tracing::warn!(%err, threads, "failed to build step thread pool, using the global pool");
                    self.pool = None;
                }
            }
        }

        let Some(pool) = self.pool.take() else {
            return Ok(self.step(&creator, alpha, shape_count, max_mutations, &default_energy_function, &default_acceptance));
        };
        let results = pool.install(|| {
            self.step(&creator, alpha, shape_count, max_mutations, &default_energy_function, &default_acceptance)
        });
        self.pool = Some(pool);
        Ok(results)
    }

    /// draw a shape unconditionally (e.g. a background) and update the score incrementally.
    pub fn draw(&mut self, shape: Shape, color: Rgba) -> ShapeResult {
        profiling::scope!("Model::draw");
        let lines = shape.rasterize(&self.bounds);
        let before = self.current.clone();
        self.current.draw(&lines, color);
        self.last_score = difference_partial(&self.target, &before, &self.current, self.last_score, &lines);
        ShapeResult { score: self.last_score, color, shape }
    }
}
