// src/battery.rs
//! Fuel gauge polling and the battery bar geometry on the clock face.

use embassy_time::{Duration, Instant};
use log::warn;

use crate::hal::BatterySource;

/// Height of the fill area inside the battery outline.
pub const BATTERY_FILL_MAX_PX: u32 = 26;

/// Fill height for a percentage: at least one pixel so an empty cell still
/// shows a sliver.
pub fn fill_height(level: u8) -> u32 {
    let px = level.min(100) as u32 * BATTERY_FILL_MAX_PX / 100;
    px.max(1)
}

#[derive(Debug, Clone)]
pub struct BatteryMonitor {
    level: u8,
    last_poll: Option<Instant>,
    interval: Duration,
}

impl BatteryMonitor {
    pub fn new(interval: Duration) -> Self {
        Self {
            level: 0,
            last_poll: None,
            interval,
        }
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    /// Whether a poll is due. The first check is always due.
    pub fn is_due(&self, now: Instant) -> bool {
        match self.last_poll {
            Some(last) => now.saturating_duration_since(last) >= self.interval,
            None => true,
        }
    }

    /// Read the gauge. Bus failures report 0% rather than propagating.
    pub async fn poll<B: BatterySource>(&mut self, source: &mut B, now: Instant) -> u8 {
        self.last_poll = Some(now);
        self.level = match source.read_percent().await {
            Ok(raw) => raw.min(100),
            Err(e) => {
                warn!("Battery read failed: {}", e);
                0
            }
        };
        self.level
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::HardwareError;
    use embassy_futures::block_on;

    struct Gauge(Result<u8, HardwareError>);

    impl BatterySource for Gauge {
        async fn read_percent(&mut self) -> Result<u8, HardwareError> {
            self.0
        }
    }

    #[test]
    fn test_fill_height() {
        assert_eq!(fill_height(0), 1, "empty still draws one pixel");
        assert_eq!(fill_height(50), 13);
        assert_eq!(fill_height(100), 26);
        assert_eq!(fill_height(255), 26, "over-range is clamped");
    }

    #[test]
    fn test_poll_clamps_and_fails_soft() {
        let t0 = Instant::from_secs(100);
        let mut monitor = BatteryMonitor::new(Duration::from_secs(30));

        let level = block_on(monitor.poll(&mut Gauge(Ok(130)), t0));
        assert_eq!(level, 100, "register value clamped to 100");

        let level = block_on(monitor.poll(&mut Gauge(Err(HardwareError::Bus)), t0));
        assert_eq!(level, 0, "bus error reads as empty");
    }

    #[test]
    fn test_poll_cadence() {
        let t0 = Instant::from_secs(100);
        let mut monitor = BatteryMonitor::new(Duration::from_secs(30));
        assert!(monitor.is_due(t0), "first poll is always due");

        block_on(monitor.poll(&mut Gauge(Ok(80)), t0));
        assert!(!monitor.is_due(t0 + Duration::from_secs(29)));
        assert!(monitor.is_due(t0 + Duration::from_secs(30)));
    }
}
