use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{thread_rng, SeedableRng};

use crate::engine::RandomSource;

/// Системный RNG для обычной игры.
#[derive(Clone, Debug, Default)]
pub struct SystemRng;

impl RandomSource for SystemRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut thread_rng());
    }
}

/// Детерминированный RNG для тестов и реплея.
/// Одинаковый seed даёт одинаковые раздачи.
#[derive(Clone, Debug)]
pub struct DeterministicRng {
    seed: u64,
    inner: StdRng,
}

impl DeterministicRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            inner: StdRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for DeterministicRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }
}

/// RNG, выбираемый при запуске: с seed – детерминированный, без – системный.
#[derive(Clone, Debug)]
pub enum AnyRng {
    System(SystemRng),
    Deterministic(DeterministicRng),
}

impl AnyRng {
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => AnyRng::Deterministic(DeterministicRng::from_seed(seed)),
            None => AnyRng::System(SystemRng),
        }
    }
}

impl RandomSource for AnyRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        match self {
            AnyRng::System(rng) => rng.shuffle(slice),
            AnyRng::Deterministic(rng) => rng.shuffle(slice),
        }
    }
}
