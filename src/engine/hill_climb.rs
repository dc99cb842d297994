use rayon::prelude::*;
use std::cmp::Ordering;

use crate::bitmap::Bitmap;
use crate::error::{GeometrizeError, Result};
use crate::fitness::EnergyFunction;
use crate::geom::Bounds;
use crate::rng::{derive_seed, SplitMix64};
use crate::shape::Shape;

/// a candidate shape under evaluation and the energy it scored
#[derive(Clone, Debug, PartialEq)]
pub struct State {
    pub score: f64,
    pub alpha: u8,
    pub shape: Shape,
}

impl State {
    pub fn new(score: f64, alpha: u8, shape: Shape) -> Self {
        Self { score, alpha, shape }
    }
}

/// read-only view of the images a search runs against.
/// shared by every candidate of a step; each candidate brings its own scratch buffer.
#[derive(Clone, Copy, Debug)]
pub struct SearchContext<'a> {
    pub target: &'a Bitmap,
    pub current: &'a Bitmap,
    pub bounds: Bounds,
    /// full-image score of `current` against `target`
    pub score: f64,
}

impl<'a> SearchContext<'a> {
    pub fn new(target: &'a Bitmap, current: &'a Bitmap, score: f64) -> Result<Self> {
        if (target.width(), target.height()) != (current.width(), current.height()) {
            return Err(GeometrizeError::InvalidSettings(format!(
                "target is {}x{} but current is {}x{}",
                target.width(),
                target.height(),
                current.width(),
                current.height()
            )));
        }
        let bounds = Bounds::of_canvas(target.width(), target.height())?;
        Ok(Self { target, current, bounds, score })
    }

    /// score `shape` with `energy`, using `buffer` as scratch
    pub fn evaluate<E>(&self, shape: &Shape, alpha: u8, buffer: &mut Bitmap, energy: &E) -> f64
    where
        E: EnergyFunction + ?Sized,
    {
        let lines = shape.rasterize(&self.bounds);
        energy.energy(&lines, alpha, self.target, self.current, buffer, self.score)
    }
}

/// greedy local search: mutate the best shape so far, keep strict improvements,
/// stop after `max_age` consecutive attempts without one.
pub fn hill_climb<E>(
    state: &State,
    max_age: u32,
    ctx: &SearchContext<'_>,
    buffer: &mut Bitmap,
    energy: &E,
    rng: &mut SplitMix64,
) -> State
where
    E: EnergyFunction + ?Sized,
{
    profiling::scope!("hill_climb");
    let mut best = state.clone();
    let mut age = 0;

    while age < max_age {
        let mut candidate = best.shape.clone();
        candidate.mutate(&ctx.bounds, rng);
        let score = ctx.evaluate(&candidate, best.alpha, buffer, energy);

        if score < best.score {
            best.score = score;
            best.shape = candidate;
            age = 0;
        } else {
            age += 1;
        }
    }

    best
}

/// create, set up and hill-climb one candidate from its own seed.
pub fn climb_candidate<C, E>(
    shape_creator: &C,
    alpha: u8,
    max_age: u32,
    ctx: &SearchContext<'_>,
    energy: &E,
    seed: u64,
) -> State
where
    C: Fn(&mut SplitMix64) -> Shape + ?Sized,
    E: EnergyFunction + ?Sized,
{
    profiling::scope!("climb_candidate");
    let mut rng = SplitMix64::new(seed);
    let mut shape = shape_creator(&mut rng);
    shape.setup(&ctx.bounds, &mut rng);

    let mut buffer = ctx.current.clone();
    let score = ctx.evaluate(&shape, alpha, &mut buffer, energy);
    let initial = State::new(score, alpha, shape);

    hill_climb(&initial, max_age, ctx, &mut buffer, energy, &mut rng)
}

/// lower score wins; ties go to the lower candidate index so the result does
/// not depend on how rayon splits the work.
fn better(a: (usize, State), b: (usize, State)) -> (usize, State) {
    match a.1.score.total_cmp(&b.1.score) {
        Ordering::Less => a,
        Ordering::Greater => b,
        Ordering::Equal => {
            if a.0 <= b.0 { a } else { b }
        }
    }
}

/// run `shape_count` independent hill-climbs in parallel and keep the best.
/// candidate i is seeded with `derive_seed(step_seed, i)`. None when shape_count is 0.
pub fn best_hill_climb_state<C, E>(
    shape_creator: &C,
    alpha: u8,
    shape_count: usize,
    max_age: u32,
    ctx: &SearchContext<'_>,
    energy: &E,
    step_seed: u64,
) -> Option<State>
where
    C: Fn(&mut SplitMix64) -> Shape + Sync + ?Sized,
    E: EnergyFunction + ?Sized,
{
    profiling::scope!("best_hill_climb_state");
    let winner = (0..shape_count)
        .into_par_iter()
        .map(|i| {
            let seed = derive_seed(step_seed, i as u64);
            (i, climb_candidate(shape_creator, alpha, max_age, ctx, energy, seed))
        })
        .reduce_with(better);

    if let Some((index, state)) = &winner {
        tracing::trace!(candidate = index, score = state.score, shape = ?state.shape.shape_type(), "hill climb winner");
    }
    winner.map(|(_, state)| state)
}
