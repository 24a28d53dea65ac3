use super::state::Millis;
use crate::error::{Error, Result};
use std::{thread, time::Duration};

/// Real-time pacing hook. Accounting always uses simulated milliseconds; a
/// `Delay` only decides whether the calling thread also waits them out.
pub trait Delay {
    fn wait(&mut self, duration: Millis);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoDelay;

impl Delay for NoDelay {
    fn wait(&mut self, _duration: Millis) {}
}

/// Blocks the thread for `duration * scale` ms.
#[derive(Debug, Clone, Copy)]
pub struct ThreadSleep {
    scale: f64,
}

impl ThreadSleep {
    pub fn new(scale: f64) -> Result<Self> {
        if !scale.is_finite() || scale < 0.0 {
            return Err(Error::config(format!(
                "time scale must be finite and >= 0, got {scale}"
            )));
        }
        Ok(Self { scale })
    }
}

impl Default for ThreadSleep {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

impl Delay for ThreadSleep {
    fn wait(&mut self, duration: Millis) {
        let secs = duration as f64 * self.scale / 1000.0;
        if secs > 0.0 {
            // Finite scales can still overflow a Duration
            thread::sleep(Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX));
        }
    }
}

impl<D: Delay + ?Sized> Delay for Box<D> {
    fn wait(&mut self, duration: Millis) {
        (**self).wait(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_thread_sleep_scaled() {
        let mut delay = ThreadSleep::new(0.5).unwrap();
        let start = Instant::now();
        delay.wait(20);
        assert!(start.elapsed() >= Duration::from_millis(10));
    }

    #[test]
    fn test_rejects_unusable_scales() {
        assert!(ThreadSleep::new(f64::INFINITY).is_err());
        assert!(ThreadSleep::new(f64::NAN).is_err());
        assert!(ThreadSleep::new(-1.0).is_err());
        assert!(ThreadSleep::new(0.0).is_ok());
    }

    #[test]
    fn test_zero_scale_does_not_block() {
        let mut delay = ThreadSleep::new(0.0).unwrap();
        let start = Instant::now();
        delay.wait(10_000);
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
