//! Queue module - random figure generation with a one-figure preview
//!
//! The queue owns the injected random source. Seed it (e.g. `SmallRng::seed_from_u64`)
//! for reproducible figure sequences; the same source also picks spawn columns
//! so a seeded engine is reproducible end to end.

use rand::Rng;

use crate::figure::Figure;

/// Next-figure queue over a pluggable random source.
#[derive(Debug, Clone)]
pub struct FigureQueue<R> {
    next: Figure,
    rng: R,
}

impl<R: Rng> FigureQueue<R> {
    /// Create a queue and generate its first preview figure.
    pub fn new(mut rng: R) -> Self {
        let next = Figure::random(&mut rng);
        Self { next, rng }
    }

    /// The figure the next [`FigureQueue::draw`] will return.
    pub fn peek(&self) -> &Figure {
        &self.next
    }

    /// Take the queued figure and queue a fresh random one.
    pub fn draw(&mut self) -> Figure {
        let fresh = Figure::random(&mut self.rng);
        std::mem::replace(&mut self.next, fresh)
    }

    /// Random source, for choices that belong with figure generation.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }
}
