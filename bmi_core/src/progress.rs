//! Progress evaluation between consecutive measurements.
//!
//! Rules, first match wins:
//! 1. No previous measurement → nothing to compare
//! 2. Current BMI in the ideal range → target reached
//! 3. Otherwise judge the weight change against the previous recommendation
//!    (Diet wants it down, Bulking wants it up)

use crate::{classify, Category, Measurement};
use std::fmt;

/// Verdict of comparing a measurement against the one before it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProgressMessage {
    NoPriorData,
    TargetReached,
    DietSuccess,
    BulkingSuccess,
    NoProgress,
    NotAsExpected,
    NotApplicable,
}

impl ProgressMessage {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressMessage::NoPriorData => "no prior data available for comparison",
            ProgressMessage::TargetReached => "target reached",
            ProgressMessage::DietSuccess => "diet progress: success",
            ProgressMessage::BulkingSuccess => "bulking progress: success",
            ProgressMessage::NoProgress => "no progress, follow the guidance",
            ProgressMessage::NotAsExpected => "progress not as expected",
            ProgressMessage::NotApplicable => "progress data not applicable for analysis",
        }
    }
}

impl fmt::Display for ProgressMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress evaluator with a configurable weight tolerance
///
/// With the default tolerance of `0.0` two weights count as unchanged only
/// when they are exactly equal.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ProgressEvaluator {
    pub weight_tolerance_kg: f64,
}

impl ProgressEvaluator {
    pub fn with_tolerance(weight_tolerance_kg: f64) -> Self {
        Self {
            weight_tolerance_kg: weight_tolerance_kg.abs(),
        }
    }

    /// Compare `current` against `previous`
    pub fn evaluate(&self, current: &Measurement, previous: Option<&Measurement>) -> ProgressMessage {
        let Some(previous) = previous else {
            return ProgressMessage::NoPriorData;
        };

        if classify::is_ideal(current.bmi()) {
            return ProgressMessage::TargetReached;
        }

        let change = self.weight_change(current.weight(), previous.weight());

        let message = match (previous.recommendation(), change) {
            (Category::Diet, WeightChange::Down) => ProgressMessage::DietSuccess,
            (Category::Bulking, WeightChange::Up) => ProgressMessage::BulkingSuccess,
            (Category::Diet | Category::Bulking, WeightChange::Unchanged) => {
                ProgressMessage::NoProgress
            }
            (Category::Diet | Category::Bulking, _) => ProgressMessage::NotAsExpected,
            _ => ProgressMessage::NotApplicable,
        };

        tracing::debug!(
            "Progress {:.2} kg -> {:.2} kg (previous {}): {}",
            previous.weight(),
            current.weight(),
            previous.recommendation(),
            message
        );

        message
    }

    /// Evaluate the last measurement of a chronological sequence against
    /// the one before it. Returns `None` for an empty sequence.
    pub fn evaluate_latest(&self, measurements: &[Measurement]) -> Option<ProgressMessage> {
        let (current, rest) = measurements.split_last()?;
        Some(self.evaluate(current, rest.last()))
    }

    fn weight_change(&self, current: f64, previous: f64) -> WeightChange {
        if current == previous || (current - previous).abs() <= self.weight_tolerance_kg {
            WeightChange::Unchanged
        } else if current < previous {
            WeightChange::Down
        } else if current > previous {
            WeightChange::Up
        } else {
            // NaN on either side
            WeightChange::Incomparable
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum WeightChange {
    Down,
    Unchanged,
    Up,
    Incomparable,
}

/// Evaluate with exact weight equality
pub fn evaluate(current: &Measurement, previous: Option<&Measurement>) -> ProgressMessage {
    ProgressEvaluator::default().evaluate(current, previous)
}

/// Evaluate the latest measurement of a sequence with exact weight equality
pub fn evaluate_latest(measurements: &[Measurement]) -> Option<ProgressMessage> {
    ProgressEvaluator::default().evaluate_latest(measurements)
}
