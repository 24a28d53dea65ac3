use rand::{Rng, SeedableRng, rngs::StdRng};

use super::SleepPolicy;
use crate::core::Millis;

pub struct UniformSleep<R: Rng = StdRng> {
    min: Millis,
    max: Millis,
    rng: R,
}

impl<R: Rng> UniformSleep<R> {
    pub fn new(min: Millis, max: Millis, rng: R) -> Self {
        assert!(min <= max, "Sleep range {min}..={max} is empty");
        Self { min, max, rng }
    }
}

impl UniformSleep<StdRng> {
    pub fn seeded(min: Millis, max: Millis, seed: u64) -> Self {
        Self::new(min, max, StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy(min: Millis, max: Millis) -> Self {
        Self::new(min, max, StdRng::from_os_rng())
    }
}

impl<R: Rng> SleepPolicy for UniformSleep<R> {
    fn sleep_duration(&mut self) -> Millis {
        self.rng.random_range(self.min..=self.max)
    }

    fn min_duration(&self) -> Millis {
        self.min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_within_bounds() {
        let mut policy = UniformSleep::seeded(5, 9, 7);
        for _ in 0..200 {
            let d = policy.sleep_duration();
            assert!((5..=9).contains(&d));
        }
    }

    #[test]
    fn test_degenerate_range() {
        let mut policy = UniformSleep::seeded(5, 5, 0);
        assert_eq!(policy.sleep_duration(), 5);
        assert_eq!(policy.min_duration(), 5);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = UniformSleep::seeded(1, 1000, 42);
        let mut b = UniformSleep::seeded(1, 1000, 42);
        let xs: Vec<_> = (0..16).map(|_| a.sleep_duration()).collect();
        let ys: Vec<_> = (0..16).map(|_| b.sleep_duration()).collect();
        assert_eq!(xs, ys);
    }
}
