//! Build task graphs from configuration

use heapless::Vec;
use rand::RngCore;

use super::types::{ConfigError, StepConfig, TargetConfig, TaskConfig};
use crate::registry::SensorRegistry;
use crate::task::{AnyTask, StepKind, TaskStep, MAX_STEPS};
use crate::time::Clock;

/// Build a single step, resolving sensor names against `registry`
pub fn build_step<'a, R: RngCore>(
    config: &StepConfig,
    registry: &SensorRegistry<'a>,
    rng: &mut R,
) -> Result<TaskStep<'a>, ConfigError> {
    let Some(sensor) = registry.find(&config.sensor) else {
        warn!("Unknown step sensor {}", config.sensor.as_str());
        return Err(ConfigError::UnknownSensor);
    };

    let step = match (config.kind, config.target) {
        (StepKind::EqualToRandom, TargetConfig::Random(range)) => {
            TaskStep::equal_to_random(sensor, range, rng)?
        }
        (StepKind::EqualToRandom, TargetConfig::Fixed(_)) | (_, TargetConfig::Random(_)) => {
            return Err(ConfigError::KindMismatch);
        }
        (kind, TargetConfig::Fixed(target)) => TaskStep::new(sensor, kind, target),
    };
    let mut step = step.with_tolerance(config.tolerance);

    if let Some(trigger) = &config.clue_trigger {
        let Some(gate) = registry.find(trigger) else {
            warn!("Unknown clue trigger {}", trigger.as_str());
            return Err(ConfigError::UnknownSensor);
        };
        step.set_clue_timeout(gate, u64::from(config.clue_timeout_ms));
    }

    Ok(step)
}

/// Build a task, resolving every sensor name against `registry`
///
/// Random targets are drawn from `rng` now and stay fixed for the lifetime
/// of the returned task.
pub fn build_task<'a, R: RngCore>(
    config: &TaskConfig,
    registry: &SensorRegistry<'a>,
    clock: &'a dyn Clock,
    rng: &mut R,
) -> Result<AnyTask<'a>, ConfigError> {
    let mut steps: Vec<TaskStep<'a>, MAX_STEPS> = Vec::new();
    for step in &config.steps {
        let built = build_step(step, registry, rng)?;
        steps.push(built).map_err(|_| ConfigError::TooManySteps)?;
    }

    let task = AnyTask::new(config.composition, &config.name, steps, clock)?;
    info!(
        "Built task {} with {} steps",
        config.name.as_str(),
        config.steps.len()
    );
    Ok(task)
}
