pub mod uniform;

use crate::core::Millis;
pub use uniform::UniformSleep;

/// Chooses how long a LOW task sleeps after yielding the processor.
pub trait SleepPolicy {
    fn sleep_duration(&mut self) -> Millis;

    // Lower bound; also the length of an idle tick
    fn min_duration(&self) -> Millis;
}

impl<P: SleepPolicy + ?Sized> SleepPolicy for Box<P> {
    fn sleep_duration(&mut self) -> Millis {
        (**self).sleep_duration()
    }

    fn min_duration(&self) -> Millis {
        (**self).min_duration()
    }
}
