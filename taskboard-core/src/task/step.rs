//! Task steps
//!
//! A step is one sensor-backed success condition. It compares the latest
//! measurement of its sensor against an expected value and carries the clue
//! trigger that decides when its hint is shown.

use rand::{Rng, RngCore};

use super::clue::{ClueAction, ClueTrigger};
use super::TaskError;
use crate::measurement::SensorMeasurement;
use crate::time::Instant;
use crate::traits::{ClueScreen, SensorReader};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How a step compares its sensor against the expected value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StepKind {
    /// Sensor value must match the target
    Equal,
    /// Sensor value must match a target drawn once at construction
    EqualToRandom,
    /// Sensor value must reach the target
    GreaterOrEqual,
    /// No comparison defined; never succeeds
    #[default]
    Unknown,
}

/// Range a random target is drawn from
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RandomTarget {
    /// Either switch position
    Boolean,
    /// Value in `min..=max`, whole numbers only when `integer` is set
    Numeric { min: f32, max: f32, integer: bool },
    /// One of `positions` enum positions, starting at zero
    Enum { positions: u8 },
}

impl RandomTarget {
    /// Draw a target value
    pub fn sample<R: RngCore>(&self, rng: &mut R) -> Result<SensorMeasurement, TaskError> {
        match *self {
            RandomTarget::Boolean => Ok(SensorMeasurement::Boolean(rng.gen::<bool>())),
            RandomTarget::Numeric { min, max, .. } if !numeric_range_valid(min, max) => {
                Err(TaskError::InvalidTarget)
            }
            RandomTarget::Numeric {
                min,
                max,
                integer: true,
            } => {
                let (low, high) = (min.ceil(), max.floor());
                // -(i32::MIN as f32) is 2^31, the first value past i32::MAX
                if low > high || low < i32::MIN as f32 || high >= -(i32::MIN as f32) {
                    return Err(TaskError::InvalidTarget);
                }
                let value = rng.gen_range(low as i32..=high as i32);
                Ok(SensorMeasurement::Numeric(value as f32))
            }
            RandomTarget::Numeric { min, max, .. } => {
                Ok(SensorMeasurement::Numeric(rng.gen_range(min..=max)))
            }
            RandomTarget::Enum { positions: 0 } => Err(TaskError::InvalidTarget),
            RandomTarget::Enum { positions } => {
                Ok(SensorMeasurement::Enum(rng.gen_range(0..positions)))
            }
        }
    }
}

/// Finite, ordered bounds whose span the float sampler can scale
///
/// The sampler divides the span by a factor just below one, so spans near
/// `f32::MAX` overflow inside it.
fn numeric_range_valid(min: f32, max: f32) -> bool {
    min.is_finite() && max.is_finite() && min <= max && max - min <= f32::MAX / 2.0
}

/// A single required condition within a task
#[derive(Clone, Copy)]
pub struct TaskStep<'a> {
    sensor: &'a dyn SensorReader,
    kind: StepKind,
    expected: SensorMeasurement,
    /// Allowed deviation for numeric equality
    tolerance: f32,
    clue: ClueTrigger<'a>,
}

impl<'a> TaskStep<'a> {
    /// Create a step and start the first acquisition on its sensor
    pub fn new(sensor: &'a dyn SensorReader, kind: StepKind, expected: SensorMeasurement) -> Self {
        sensor.start_read();

        Self {
            sensor,
            kind,
            expected,
            tolerance: 0.0,
            clue: ClueTrigger::new(),
        }
    }

    /// Sensor must read exactly `target`
    pub fn equal(sensor: &'a dyn SensorReader, target: SensorMeasurement) -> Self {
        Self::new(sensor, StepKind::Equal, target)
    }

    /// Sensor must read at least `threshold`
    pub fn greater_or_equal(sensor: &'a dyn SensorReader, threshold: SensorMeasurement) -> Self {
        Self::new(sensor, StepKind::GreaterOrEqual, threshold)
    }

    /// Sensor must match a target drawn from `target` now
    ///
    /// The drawn value stays fixed for the lifetime of the step, restarts
    /// included.
    pub fn equal_to_random<R: RngCore>(
        sensor: &'a dyn SensorReader,
        target: RandomTarget,
        rng: &mut R,
    ) -> Result<Self, TaskError> {
        let expected = target.sample(rng)?;
        Ok(Self::new(sensor, StepKind::EqualToRandom, expected))
    }

    /// Accept numeric readings within `tolerance` of the target
    pub fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = if tolerance > 0.0 { tolerance } else { 0.0 };
        self
    }

    /// Gate this step's clue on `gate` (builder form)
    pub fn with_clue_timeout(mut self, gate: &'a dyn SensorReader, timeout_ms: u64) -> Self {
        self.set_clue_timeout(gate, timeout_ms);
        self
    }

    /// Gate this step's clue on `gate`
    ///
    /// The clue is visible while `gate` reads true and for `timeout_ms`
    /// after it was last seen true.
    pub fn set_clue_timeout(&mut self, gate: &'a dyn SensorReader, timeout_ms: u64) {
        self.clue.set_timeout(gate, timeout_ms);
    }

    /// Whether the latest measurement satisfies the step
    ///
    /// Never starts an acquisition: two calls without an intervening read
    /// return the same answer.
    pub fn success(&self) -> bool {
        compare(self.kind, &self.sensor.read(), &self.expected, self.tolerance)
    }

    /// Target value
    pub fn expected_value(&self) -> SensorMeasurement {
        self.expected
    }

    /// Monitored sensor
    pub fn sensor(&self) -> &'a dyn SensorReader {
        self.sensor
    }

    /// Comparison kind
    pub fn kind(&self) -> StepKind {
        self.kind
    }

    /// Allowed deviation for numeric equality
    pub fn tolerance(&self) -> f32 {
        self.tolerance
    }

    /// Clue trigger state
    pub fn clue(&self) -> &ClueTrigger<'a> {
        &self.clue
    }

    /// Evaluate the clue trigger and render accordingly
    ///
    /// Not a pure query: advances the clue timer.
    pub fn show_clue<S: ClueScreen + ?Sized>(&mut self, now: Instant, screen: &mut S) -> ClueAction {
        let action = self.clue.evaluate(now);

        match action {
            ClueAction::Show => {
                screen.show_measurement_clue(&self.sensor.read(), &self.expected);
            }
            ClueAction::Clear => screen.clear_all_task_clue(),
            ClueAction::Skipped => {}
        }

        action
    }

    pub(crate) fn reset_clue(&mut self) {
        self.clue.reset();
    }
}

fn compare(
    kind: StepKind,
    current: &SensorMeasurement,
    expected: &SensorMeasurement,
    tolerance: f32,
) -> bool {
    use SensorMeasurement::{Boolean, Enum, Numeric};

    match kind {
        StepKind::Equal | StepKind::EqualToRandom => match (*current, *expected) {
            (Boolean(a), Boolean(b)) => a == b,
            (Enum(a), Enum(b)) => a == b,
            (Numeric(a), Numeric(b)) => {
                let diff = a - b;
                diff <= tolerance && -diff <= tolerance
            }
            _ => false,
        },
        StepKind::GreaterOrEqual => match (*current, *expected) {
            (Boolean(a), Boolean(b)) => a >= b,
            (Enum(a), Enum(b)) => a >= b,
            (Numeric(a), Numeric(b)) => a >= b,
            _ => false,
        },
        StepKind::Unknown => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockSensor, RecordingScreen, ScreenCall};
    use crate::task::clue::ClueState;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_construction_starts_read() {
        let button = MockSensor::boolean("button", false);
        let _step = TaskStep::equal(&button, SensorMeasurement::Boolean(true));
        assert_eq!(button.reads_started(), 1);
    }

    #[test]
    fn test_success_does_not_start_reads() {
        let button = MockSensor::boolean("button", true);
        let step = TaskStep::equal(&button, SensorMeasurement::Boolean(true));

        assert!(step.success());
        assert!(step.success());
        assert_eq!(button.reads_started(), 1);
    }

    #[test]
    fn test_equal_boolean() {
        let button = MockSensor::boolean("button", false);
        let step = TaskStep::equal(&button, SensorMeasurement::Boolean(true));

        assert!(!step.success());
        button.set_bool(true);
        assert!(step.success());
    }

    #[test]
    fn test_equal_numeric_with_tolerance() {
        let fader = MockSensor::numeric("fader", 48.0);
        let exact = TaskStep::equal(&fader, SensorMeasurement::Numeric(50.0));
        let loose = TaskStep::equal(&fader, SensorMeasurement::Numeric(50.0)).with_tolerance(2.5);

        assert!(!exact.success());
        assert!(loose.success());

        fader.set(SensorMeasurement::Numeric(52.5));
        assert!(loose.success());

        fader.set(SensorMeasurement::Numeric(52.6));
        assert!(!loose.success());
    }

    #[test]
    fn test_negative_tolerance_clamped() {
        let fader = MockSensor::numeric("fader", 50.0);
        let step = TaskStep::equal(&fader, SensorMeasurement::Numeric(50.0)).with_tolerance(-1.0);

        assert_eq!(step.tolerance(), 0.0);
        assert!(step.success());
    }

    #[test]
    fn test_greater_or_equal() {
        let pot = MockSensor::numeric("pot", 10.0);
        let step = TaskStep::greater_or_equal(&pot, SensorMeasurement::Numeric(3000.0));

        assert!(!step.success());
        pot.set(SensorMeasurement::Numeric(3000.0));
        assert!(step.success());
        pot.set(SensorMeasurement::Numeric(4095.0));
        assert!(step.success());
    }

    #[test]
    fn test_greater_or_equal_enum_and_boolean() {
        let selector = MockSensor::new("selector", SensorMeasurement::Enum(1));
        let step = TaskStep::greater_or_equal(&selector, SensorMeasurement::Enum(2));
        assert!(!step.success());
        selector.set(SensorMeasurement::Enum(3));
        assert!(step.success());

        let switch = MockSensor::boolean("switch", false);
        let step = TaskStep::greater_or_equal(&switch, SensorMeasurement::Boolean(false));
        assert!(step.success());
    }

    #[test]
    fn test_mismatched_or_unknown_measurement_fails() {
        let sensor = MockSensor::new("probe", SensorMeasurement::Unknown);
        let step = TaskStep::equal(&sensor, SensorMeasurement::Boolean(false));
        assert!(!step.success());

        sensor.set(SensorMeasurement::Numeric(0.0));
        assert!(!step.success());

        sensor.set(SensorMeasurement::Boolean(false));
        assert!(step.success());
    }

    #[test]
    fn test_unknown_kind_never_succeeds() {
        let button = MockSensor::boolean("button", true);
        let step = TaskStep::new(&button, StepKind::Unknown, SensorMeasurement::Boolean(true));
        assert!(!step.success());
    }

    #[test]
    fn test_random_target_stable() {
        let selector = MockSensor::new("selector", SensorMeasurement::Enum(0));
        let mut rng = SmallRng::seed_from_u64(7);
        let step =
            TaskStep::equal_to_random(&selector, RandomTarget::Enum { positions: 4 }, &mut rng)
                .unwrap();

        let target = step.expected_value();
        let position = target.as_enum().unwrap();
        assert!(position < 4);
        assert_eq!(step.kind(), StepKind::EqualToRandom);

        for _ in 0..10 {
            assert_eq!(step.expected_value(), target);
        }

        selector.set(target);
        assert!(step.success());
    }

    #[test]
    fn test_random_numeric_integer_target() {
        let fader = MockSensor::numeric("fader", 0.0);
        let mut rng = SmallRng::seed_from_u64(3);

        for _ in 0..32 {
            let step = TaskStep::equal_to_random(
                &fader,
                RandomTarget::Numeric {
                    min: 10.0,
                    max: 20.0,
                    integer: true,
                },
                &mut rng,
            )
            .unwrap();

            let value = step.expected_value().as_numeric().unwrap();
            assert!((10.0..=20.0).contains(&value));
            assert_eq!(value, value as i32 as f32);
        }
    }

    #[test]
    fn test_invalid_random_target() {
        let mut rng = SmallRng::seed_from_u64(1);

        assert_eq!(
            RandomTarget::Enum { positions: 0 }.sample(&mut rng),
            Err(TaskError::InvalidTarget)
        );
        assert_eq!(
            RandomTarget::Numeric {
                min: 5.0,
                max: 1.0,
                integer: false
            }
            .sample(&mut rng),
            Err(TaskError::InvalidTarget)
        );
        assert_eq!(
            RandomTarget::Numeric {
                min: f32::NAN,
                max: 1.0,
                integer: false
            }
            .sample(&mut rng),
            Err(TaskError::InvalidTarget)
        );
    }

    #[test]
    fn test_random_numeric_span_too_wide() {
        let mut rng = SmallRng::seed_from_u64(1);

        assert_eq!(
            RandomTarget::Numeric {
                min: -f32::MAX,
                max: f32::MAX,
                integer: false
            }
            .sample(&mut rng),
            Err(TaskError::InvalidTarget)
        );
        assert_eq!(
            RandomTarget::Numeric {
                min: f32::MIN,
                max: 0.0,
                integer: true
            }
            .sample(&mut rng),
            Err(TaskError::InvalidTarget)
        );
    }

    #[test]
    fn test_random_integer_target_rounds_inward() {
        let mut rng = SmallRng::seed_from_u64(9);

        // No whole number between the bounds
        assert_eq!(
            RandomTarget::Numeric {
                min: 0.5,
                max: 0.7,
                integer: true
            }
            .sample(&mut rng),
            Err(TaskError::InvalidTarget)
        );

        for _ in 0..32 {
            let value = RandomTarget::Numeric {
                min: 0.5,
                max: 2.7,
                integer: true,
            }
            .sample(&mut rng)
            .unwrap()
            .as_numeric()
            .unwrap();
            assert!(value == 1.0 || value == 2.0);
        }

        assert_eq!(
            RandomTarget::Numeric {
                min: -1.5,
                max: -0.5,
                integer: true
            }
            .sample(&mut rng),
            Ok(SensorMeasurement::Numeric(-1.0))
        );
    }

    #[test]
    fn test_random_integer_target_outside_i32() {
        let mut rng = SmallRng::seed_from_u64(2);

        assert_eq!(
            RandomTarget::Numeric {
                min: 0.0,
                max: 3.0e9,
                integer: true
            }
            .sample(&mut rng),
            Err(TaskError::InvalidTarget)
        );
        assert_eq!(
            RandomTarget::Numeric {
                min: -3.0e9,
                max: 0.0,
                integer: true
            }
            .sample(&mut rng),
            Err(TaskError::InvalidTarget)
        );
    }

    #[test]
    fn test_show_clue_without_gate_renders() {
        let pot = MockSensor::numeric("pot", 120.0);
        let mut step = TaskStep::greater_or_equal(&pot, SensorMeasurement::Numeric(3000.0));
        let mut screen = RecordingScreen::default();

        let action = step.show_clue(Instant::from_millis(5), &mut screen);

        assert_eq!(action, ClueAction::Show);
        assert_eq!(
            screen.last(),
            Some(&ScreenCall::Measurement(
                SensorMeasurement::Numeric(120.0),
                SensorMeasurement::Numeric(3000.0)
            ))
        );
    }

    #[test]
    fn test_show_clue_suppressed_clears_screen() {
        let button = MockSensor::boolean("button", false);
        let gate = MockSensor::boolean("gate", false);
        let mut step = TaskStep::equal(&button, SensorMeasurement::Boolean(true))
            .with_clue_timeout(&gate, 50);
        let mut screen = RecordingScreen::default();

        assert_eq!(step.show_clue(Instant::from_millis(0), &mut screen), ClueAction::Show);
        assert_eq!(step.show_clue(Instant::from_millis(50), &mut screen), ClueAction::Clear);
        assert_eq!(screen.last(), Some(&ScreenCall::Clear));
        assert_eq!(step.clue().state(), ClueState::Suppressed);
    }

    #[test]
    fn test_numeric_gate_has_no_visual_side_effects() {
        let button = MockSensor::boolean("button", false);
        let gate = MockSensor::numeric("distance", 17.0);
        let mut step = TaskStep::equal(&button, SensorMeasurement::Boolean(true))
            .with_clue_timeout(&gate, 50);
        let mut screen = RecordingScreen::default();

        for ms in [0, 100, 200] {
            assert_eq!(
                step.show_clue(Instant::from_millis(ms), &mut screen),
                ClueAction::Skipped
            );
        }
        assert!(screen.calls.is_empty());
    }
}
