use std::time::Duration;

use criterion::BenchmarkGroup;
use criterion::measurement::Measurement;
use rand::SeedableRng;
use rand::rngs::StdRng;

const RNG_SEED: u64 = 0x5EED_2026;
const SEED_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RuntimeTier {
    Small,
    Medium,
    Large,
}

impl RuntimeTier {
    /// Picks a tier from the number of elements a workload touches.
    pub fn for_len(len: usize) -> Self {
        match len {
            0..=4_095 => Self::Small,
            4_096..=65_535 => Self::Medium,
            _ => Self::Large,
        }
    }

    fn sample_size(self) -> usize {
        match self {
            Self::Small | Self::Medium => 15,
            Self::Large => 10,
        }
    }

    fn warm_up(self) -> Duration {
        match self {
            Self::Small => Duration::from_millis(100),
            Self::Medium => Duration::from_millis(500),
            Self::Large => Duration::from_millis(800),
        }
    }

    fn measurement(self) -> Duration {
        match self {
            Self::Small => Duration::from_millis(200),
            Self::Medium => Duration::from_millis(1000),
            Self::Large => Duration::from_millis(1500),
        }
    }
}

pub fn apply_runtime_config<M: Measurement>(group: &mut BenchmarkGroup<'_, M>, tier: RuntimeTier) {
    group.sample_size(tier.sample_size());
    group.warm_up_time(tier.warm_up());
    group.measurement_time(tier.measurement());
}

pub fn default_rng() -> StdRng {
    StdRng::seed_from_u64(RNG_SEED)
}

/// Deterministic RNG for one benchmark case, decorrelated from its siblings.
pub fn case_rng(salt: u64) -> StdRng {
    StdRng::seed_from_u64(mix_seed(RNG_SEED ^ salt.wrapping_mul(SEED_MIX)))
}

fn mix_seed(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
