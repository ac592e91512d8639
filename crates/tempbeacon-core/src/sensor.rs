//! Temperature inputs for the emitter.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Produces raw temperatures in tenths of a degree.
///
/// Values are not range-checked here; the codec clamps on encode.
pub trait TemperatureSource {
    fn read_tenths(&mut self) -> i32;
}

/// Always reports the same temperature.
#[derive(Debug, Clone, Copy)]
pub struct FixedSensor(pub i32);

impl TemperatureSource for FixedSensor {
    fn read_tenths(&mut self) -> i32 {
        self.0
    }
}

/// Random walk of at most half a degree per reading.
pub struct SimulatedSensor {
    current: i32,
    rng: StdRng,
}

impl SimulatedSensor {
    pub const MAX_STEP_TENTHS: i32 = 5;

    pub fn new(start_tenths: i32) -> Self {
        Self {
            current: start_tenths,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic walk for reproducible runs.
    pub fn seeded(start_tenths: i32, seed: u64) -> Self {
        Self {
            current: start_tenths,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl TemperatureSource for SimulatedSensor {
    fn read_tenths(&mut self) -> i32 {
        let value = self.current;
        let step = self
            .rng
            .random_range(-Self::MAX_STEP_TENTHS..=Self::MAX_STEP_TENTHS);
        self.current = self.current.saturating_add(step);
        value
    }
}
