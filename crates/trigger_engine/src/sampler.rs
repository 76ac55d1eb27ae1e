//! SensorSampler - per-poll read of both monitored inputs

use std::sync::Arc;

use contracts::{MonitorError, PinId, SensorInputPort, SensorReading};

/// Reads the instantaneous state of the two monitored inputs.
///
/// A pure, non-blocking read; no debouncing happens here.
pub struct SensorSampler {
    port: Arc<dyn SensorInputPort>,
    pin_a: PinId,
    pin_b: PinId,
}

impl SensorSampler {
    /// Create a sampler over the given input port and pin pair.
    pub fn new(port: Arc<dyn SensorInputPort>, pin_a: PinId, pin_b: PinId) -> Self {
        Self { port, pin_a, pin_b }
    }

    /// Sample both inputs at one instant.
    ///
    /// # Errors
    /// Propagates the first hardware-level read failure; the caller treats it
    /// as "condition not met" for this poll.
    pub fn sample(&self) -> Result<SensorReading, MonitorError> {
        let input_a = self.port.read(self.pin_a)?;
        let input_b = self.port.read(self.pin_b)?;
        Ok(SensorReading::new(input_a, input_b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::PinLevel;
    use std::sync::Mutex;

    struct ScriptedPort {
        levels: Mutex<Vec<(PinId, Result<PinLevel, ()>)>>,
    }

    impl ScriptedPort {
        fn new(levels: Vec<(PinId, Result<PinLevel, ()>)>) -> Self {
            Self {
                levels: Mutex::new(levels),
            }
        }
    }

    impl SensorInputPort for ScriptedPort {
        fn read(&self, pin: PinId) -> Result<PinLevel, MonitorError> {
            let mut levels = self.levels.lock().unwrap();
            let idx = levels
                .iter()
                .position(|(p, _)| *p == pin)
                .expect("unscripted pin");
            let (_, result) = levels.remove(idx);
            result.map_err(|_| MonitorError::sensor_read(pin, "scripted failure"))
        }
    }

    #[test]
    fn test_sample_reads_both_pins() {
        let pin_a = PinId::new(18);
        let pin_b = PinId::new(23);
        let port = ScriptedPort::new(vec![
            (pin_a, Ok(PinLevel::Low)),
            (pin_b, Ok(PinLevel::High)),
        ]);

        let sampler = SensorSampler::new(Arc::new(port), pin_a, pin_b);
        let reading = sampler.sample().unwrap();
        assert_eq!(reading.input_a, PinLevel::Low);
        assert_eq!(reading.input_b, PinLevel::High);
        assert!(!reading.both_low());
    }

    #[test]
    fn test_sample_propagates_read_failure() {
        let pin_a = PinId::new(18);
        let pin_b = PinId::new(23);
        let port = ScriptedPort::new(vec![(pin_a, Err(())), (pin_b, Ok(PinLevel::Low))]);

        let sampler = SensorSampler::new(Arc::new(port), pin_a, pin_b);
        let err = sampler.sample().unwrap_err();
        assert!(err.is_transient_read());
    }
}
