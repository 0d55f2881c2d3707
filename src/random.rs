use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// Source of randomness for everything the game rolls.
///
/// Only `unit` is required. The provided helpers derive every draw from it,
/// which is what a scripted source relies on; generator-backed sources
/// override them with `rand`'s own sampling.
pub trait RandomSource {
    /// Uniform draw in `[0, 1)`.
    fn unit(&mut self) -> f64;

    /// `true` with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.unit() < p
    }

    /// Uniform draw in `[lo, hi)`.
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.unit() * (hi - lo)
    }

    /// Uniform integer in `lo..=hi`.
    fn range_inclusive(&mut self, lo: u32, hi: u32) -> u32 {
        if hi <= lo {
            return lo;
        }
        let span = (hi - lo + 1) as f64;
        (lo + (self.unit() * span).floor() as u32).min(hi)
    }

    /// Uniform index into a slice of length `len` (which must be non-zero).
    fn pick_index(&mut self, len: usize) -> usize {
        ((self.unit() * len as f64).floor() as usize).min(len.saturating_sub(1))
    }
}

/// Adapter over any `rand` generator
#[derive(Debug, Clone)]
pub struct RngSource<R: Rng> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<ThreadRng> {
    pub fn thread() -> Self {
        Self::new(rand::thread_rng())
    }
}

impl RngSource<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn chance(&mut self, p: f64) -> bool {
        self.rng.gen_bool(p.clamp(0.0, 1.0))
    }

    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        if hi <= lo {
            return lo;
        }
        self.rng.gen_range(lo..hi)
    }

    fn range_inclusive(&mut self, lo: u32, hi: u32) -> u32 {
        if hi <= lo {
            return lo;
        }
        self.rng.gen_range(lo..=hi)
    }

    fn pick_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.rng.gen_range(0..len)
    }
}

/// Deterministic source for tests and demos.
///
/// `unit` cycles through a fixed list of values; `chance` consumes a queue
/// of scripted coin flips first and falls back to `unit` once it runs dry.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    units: Vec<f64>,
    cursor: usize,
    coins: VecDeque<bool>,
}

impl ScriptedSource {
    pub fn new(units: Vec<f64>) -> Self {
        let units = if units.is_empty() {
            vec![0.0]
        } else {
            units
                .into_iter()
                .map(|u| u.clamp(0.0, 1.0 - f64::EPSILON))
                .collect()
        };
        Self {
            units,
            cursor: 0,
            coins: VecDeque::new(),
        }
    }

    /// Every draw returns `u`
    pub fn constant(u: f64) -> Self {
        Self::new(vec![u])
    }

    pub fn with_coins<I: IntoIterator<Item = bool>>(mut self, coins: I) -> Self {
        self.coins.extend(coins);
        self
    }
}

impl RandomSource for ScriptedSource {
    fn unit(&mut self) -> f64 {
        let u = self.units[self.cursor % self.units.len()];
        self.cursor += 1;
        u
    }

    fn chance(&mut self, p: f64) -> bool {
        match self.coins.pop_front() {
            Some(coin) => coin,
            None => self.unit() < p,
        }
    }
}
