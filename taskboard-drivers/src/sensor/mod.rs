//! Sensors read through a shared PbHub
//!
//! Each sensor keeps the latest measurement in a cache. `start_read`
//! performs the bus transfer and refreshes the cache; `read` only returns
//! it. A failed transfer leaves [`SensorMeasurement::Unknown`] in the
//! cache so steps watching the sensor cannot complete on stale data.

mod analog;
mod digital;
mod position;

pub use analog::AnalogSensor;
pub use digital::DigitalSensor;
pub use position::PositionSensor;

use embedded_hal::i2c::I2c;
use taskboard_core::SensorMeasurement;

use crate::pbhub::{PbHub, PbHubError, SharedPbHub};

/// Run one hub transfer on behalf of sensor `name`
///
/// Returns `Unknown` when the hub is busy or the transfer fails.
fn acquire<I2C, T>(
    hub: &SharedPbHub<I2C>,
    name: &str,
    transfer: impl FnOnce(&mut PbHub<I2C>) -> Result<T, PbHubError>,
    convert: impl FnOnce(T) -> SensorMeasurement,
) -> SensorMeasurement
where
    I2C: I2c,
{
    let Ok(mut hub) = hub.try_borrow_mut() else {
        warn!("Hub busy, dropping read of {}", name);
        return SensorMeasurement::Unknown;
    };

    match transfer(&mut *hub) {
        Ok(raw) => convert(raw),
        Err(_) => {
            warn!("Read of {} failed", name);
            SensorMeasurement::Unknown
        }
    }
}
