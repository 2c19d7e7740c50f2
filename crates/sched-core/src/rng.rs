//! Named, independently seeded random streams.
//!
//! # Determinism strategy
//!
//! A run holds one [`StreamRng`] per [`Stream`].  All of them are seeded from
//! a single seed generator, itself seeded from the user-supplied seed (or
//! from OS entropy when none is given):
//!
//! ```text
//! seeder = SmallRng(seed)
//! for stream in Stream::ALL:      // fixed order, always all seven
//!     stream_seed = seeder.next_u64()
//! ```
//!
//! Because every stream is always created, in the same order, whether or not
//! its end use is requested, adding or removing an end-use family never
//! changes the draws consumed by any other family.
//!
//! [`OccupantRng`] is the per-occupant counterpart used by the `parallel`
//! Markov path: `seed XOR (occupant * MIXING_CONSTANT)`, so occupants never
//! share RNG state.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use crate::OccupantId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── UniformSource ─────────────────────────────────────────────────────────────

/// Anything that can produce a uniform draw in `[0, 1)`.
///
/// The weighted sampler only needs this, so it works with both the named
/// run streams and per-occupant RNGs.
pub trait UniformSource {
    fn uniform(&mut self) -> f64;
}

// ── Stream ────────────────────────────────────────────────────────────────────

/// The named random streams of one generation run.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Stream {
    /// Occupant simulation and the post-processing offset.
    Main,
    /// Sink, shower, and bath draws.
    Hygiene,
    Dishwasher,
    ClothesWasher,
    ClothesDryer,
    /// EV occupant choice.
    Ev,
    Cooking,
}

impl Stream {
    /// Seeding order.  Never reorder: it fixes every stream's seed.
    pub const ALL: [Stream; 7] = [
        Stream::Main,
        Stream::Hygiene,
        Stream::Dishwasher,
        Stream::ClothesWasher,
        Stream::ClothesDryer,
        Stream::Ev,
        Stream::Cooking,
    ];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Stream::Main          => "main",
            Stream::Hygiene       => "hygiene",
            Stream::Dishwasher    => "dishwasher",
            Stream::ClothesWasher => "clothes_washer",
            Stream::ClothesDryer  => "clothes_dryer",
            Stream::Ev            => "ev",
            Stream::Cooking       => "cooking",
        }
    }
}

impl std::fmt::Display for Stream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── StreamRng ─────────────────────────────────────────────────────────────────

/// One deterministic random stream.
pub struct StreamRng(SmallRng);

impl StreamRng {
    pub fn from_seed(seed: u64) -> Self {
        StreamRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Normal draw with mean `mean` and standard deviation `std_dev`,
    /// floored at `floor`.  A non-positive `std_dev` yields `mean`.
    pub fn gaussian(&mut self, mean: f64, std_dev: f64, floor: f64) -> f64 {
        gaussian(&mut self.0, mean, std_dev, floor)
    }
}

impl UniformSource for StreamRng {
    #[inline]
    fn uniform(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }
}

fn gaussian(rng: &mut SmallRng, mean: f64, std_dev: f64, floor: f64) -> f64 {
    let value = match Normal::new(mean, std_dev) {
        Ok(normal) if std_dev > 0.0 => normal.sample(rng),
        _ => mean,
    };
    value.max(floor)
}

// ── RngStreams ────────────────────────────────────────────────────────────────

/// All named streams of one run, seeded from a single seed generator.
pub struct RngStreams {
    seed:    u64,
    streams: [StreamRng; 7],
}

impl RngStreams {
    /// Seed every stream from `seed`, or from OS entropy when `None`.
    pub fn new(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(rand::random);
        let mut seeder = SmallRng::seed_from_u64(seed);
        let streams = std::array::from_fn(|_| StreamRng::from_seed(seeder.r#gen()));
        Self { seed, streams }
    }

    /// The root seed actually used (useful to reproduce an unseeded run).
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[inline]
    pub fn get_mut(&mut self, stream: Stream) -> &mut StreamRng {
        &mut self.streams[stream.index()]
    }
}

// ── OccupantRng ───────────────────────────────────────────────────────────────

/// Per-occupant deterministic RNG for the parallel simulation path.
///
/// Statistically equivalent to drawing from the `main` stream, but not
/// bit-identical to the sequential path.
pub struct OccupantRng(SmallRng);

impl OccupantRng {
    /// Seed deterministically from the run's root seed and an occupant ID.
    pub fn new(root_seed: u64, occupant: OccupantId) -> Self {
        let seed = root_seed ^ (occupant.0 as u64 + 1).wrapping_mul(MIXING_CONSTANT);
        OccupantRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }
}

impl UniformSource for OccupantRng {
    #[inline]
    fn uniform(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }
}
