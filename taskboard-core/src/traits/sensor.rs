//! Sensor reader trait

use crate::measurement::SensorMeasurement;

/// A board sensor as seen by the task core
///
/// Sensors are owned by the board-wide registry and shared by reference
/// between steps, so every method takes `&self`. Drivers keep their
/// acquisition state behind interior mutability.
pub trait SensorReader {
    /// Stable identifier used in clue text
    fn name(&self) -> &str;

    /// Issue a new acquisition
    ///
    /// Fire-and-forget: must not block. The result becomes visible through
    /// [`read`](Self::read) once the acquisition completes.
    fn start_read(&self);

    /// Most recent available measurement
    ///
    /// May be stale if no new acquisition completed since the last call.
    /// Returns [`SensorMeasurement::Unknown`] until a valid reading exists.
    fn read(&self) -> SensorMeasurement;
}

impl<S: SensorReader + ?Sized> SensorReader for &S {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn start_read(&self) {
        (**self).start_read()
    }

    fn read(&self) -> SensorMeasurement {
        (**self).read()
    }
}
