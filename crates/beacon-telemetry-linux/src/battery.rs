//! Battery readings from the kernel power-supply class

use beacon_telemetry::{TelemetryError, TelemetryResult};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default sysfs power-supply directory
const POWER_SUPPLY_DIR: &str = "/sys/class/power_supply";

/// Reads battery capacity from a power-supply sysfs tree
#[derive(Debug, Clone)]
pub struct BatteryReader {
    root: PathBuf,
}

impl BatteryReader {
    /// Reader over the real sysfs tree
    pub fn system() -> Self {
        Self::with_root(POWER_SUPPLY_DIR)
    }

    /// Reader over an arbitrary directory laid out like sysfs (for testing)
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Current capacity of the first battery supply, 0-100.
    ///
    /// Supplies whose `type` is not `Battery` (AC adapters, USB ports) are
    /// skipped. Hosts without any battery report `Unavailable`.
    pub fn capacity_percent(&self) -> TelemetryResult<u8> {
        let entries = std::fs::read_dir(&self.root).map_err(|e| {
            TelemetryError::Unavailable(format!(
                "Cannot read {}: {e}",
                self.root.display()
            ))
        })?;

        for entry in entries.flatten() {
            let supply = entry.path();
            if !is_battery(&supply) {
                continue;
            }

            let capacity_path = supply.join("capacity");
            let raw = match std::fs::read_to_string(&capacity_path) {
                Ok(raw) => raw,
                Err(_) => continue,
            };

            match raw.trim().parse::<u8>() {
                Ok(pct) => {
                    debug!(supply = %supply.display(), pct, "Battery capacity read");
                    return Ok(pct.min(100));
                }
                Err(e) => {
                    return Err(TelemetryError::Unavailable(format!(
                        "Unparseable capacity in {}: {e}",
                        capacity_path.display()
                    )));
                }
            }
        }

        Err(TelemetryError::Unavailable("No battery supply found".into()))
    }
}

fn is_battery(supply: &Path) -> bool {
    std::fs::read_to_string(supply.join("type"))
        .map(|t| t.trim() == "Battery")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_supply(root: &Path, name: &str, kind: &str, capacity: Option<&str>) {
        let dir = root.join(name);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("type"), format!("{kind}\n")).unwrap();
        if let Some(capacity) = capacity {
            std::fs::write(dir.join("capacity"), format!("{capacity}\n")).unwrap();
        }
    }

    #[test]
    fn reads_first_battery_capacity() {
        let dir = tempfile::tempdir().unwrap();
        write_supply(dir.path(), "AC0", "Mains", None);
        write_supply(dir.path(), "BAT0", "Battery", Some("87"));

        let reader = BatteryReader::with_root(dir.path());
        assert_eq!(reader.capacity_percent().unwrap(), 87);
    }

    #[test]
    fn clamps_capacity_above_100() {
        let dir = tempfile::tempdir().unwrap();
        write_supply(dir.path(), "BAT0", "Battery", Some("103"));

        let reader = BatteryReader::with_root(dir.path());
        assert_eq!(reader.capacity_percent().unwrap(), 100);
    }

    #[test]
    fn skips_non_battery_supplies() {
        let dir = tempfile::tempdir().unwrap();
        write_supply(dir.path(), "AC0", "Mains", Some("100"));

        let reader = BatteryReader::with_root(dir.path());
        assert!(matches!(
            reader.capacity_percent(),
            Err(TelemetryError::Unavailable(_))
        ));
    }

    #[test]
    fn missing_root_reports_unavailable() {
        let reader = BatteryReader::with_root("/nonexistent/power_supply");
        assert!(matches!(
            reader.capacity_percent(),
            Err(TelemetryError::Unavailable(_))
        ));
    }
}
