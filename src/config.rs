use crate::core::{ChargePolicy, Millis, PowerModel};
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    pub time_slice_high: Millis,
    pub time_slice_low: Millis,
    pub sleep_duration_min: Millis,
    pub sleep_duration_max: Millis,
    pub power: PowerModel,
    pub charge_policy: ChargePolicy,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            time_slice_high: 50,
            time_slice_low: 50,
            sleep_duration_min: 10,
            sleep_duration_max: 50,
            power: PowerModel::default(),
            charge_policy: ChargePolicy::default(),
        }
    }
}

impl SimConfig {
    pub fn builder() -> SimConfigBuilder {
        SimConfigBuilder::new()
    }

    pub fn validate(&self) -> Result<()> {
        if self.time_slice_high == 0 {
            return Err(Error::config("time_slice_high must be > 0"));
        }
        if self.time_slice_low == 0 {
            return Err(Error::config("time_slice_low must be > 0"));
        }
        if self.sleep_duration_min == 0 {
            return Err(Error::config("sleep_duration_min must be > 0"));
        }
        if self.sleep_duration_max <= self.sleep_duration_min {
            return Err(Error::config(
                "sleep_duration_max must be greater than sleep_duration_min",
            ));
        }

        let PowerModel {
            running,
            sleeping,
            idle,
        } = self.power;
        if !running.is_finite() || running <= 0.0 {
            return Err(Error::config("running_power must be > 0"));
        }
        if !(sleeping > 0.0 && sleeping < running) {
            return Err(Error::config("sleeping_power must be in (0, running_power)"));
        }
        if !(idle > 0.0 && idle < running) {
            return Err(Error::config("idle_power must be in (0, running_power)"));
        }

        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct SimConfigBuilder {
    config: SimConfig,
}

impl SimConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: SimConfig::default(),
        }
    }

    pub fn time_slice_high(mut self, ms: Millis) -> Self {
        self.config.time_slice_high = ms;
        self
    }

    pub fn time_slice_low(mut self, ms: Millis) -> Self {
        self.config.time_slice_low = ms;
        self
    }

    pub fn sleep_range(mut self, min: Millis, max: Millis) -> Self {
        self.config.sleep_duration_min = min;
        self.config.sleep_duration_max = max;
        self
    }

    pub fn running_power(mut self, power: f64) -> Self {
        self.config.power.running = power;
        self
    }

    pub fn sleeping_power(mut self, power: f64) -> Self {
        self.config.power.sleeping = power;
        self
    }

    pub fn idle_power(mut self, power: f64) -> Self {
        self.config.power.idle = power;
        self
    }

    pub fn charge_policy(mut self, policy: ChargePolicy) -> Self {
        self.config.charge_policy = policy;
        self
    }

    pub fn build(self) -> Result<SimConfig> {
        self.config.validate()?;
        Ok(self.config)
    }

    // Skips validation; for scenarios that need a degenerate sleep range
    pub fn build_unchecked(self) -> SimConfig {
        self.config
    }
}
