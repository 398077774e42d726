//! Core domain types for the BMI tracker.
//!
//! This module defines:
//! - The recommendation `Category` attached to every measurement
//! - The `Measurement` record itself

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Category
// ============================================================================

/// Recommendation label for a measurement
///
/// Serialized as the bare label (`"Bulking"`, `"Ideal"`, `"Diet"`). Labels
/// that are not one of the three known categories are kept verbatim in
/// `Other` so they survive a save/load cycle.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Bulking,
    Ideal,
    Diet,
    Other(String),
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Category::Bulking => "Bulking",
            Category::Ideal => "Ideal",
            Category::Diet => "Diet",
            Category::Other(label) => label,
        }
    }
}

impl From<String> for Category {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Bulking" => Category::Bulking,
            "Ideal" => Category::Ideal,
            "Diet" => Category::Diet,
            _ => Category::Other(label),
        }
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for Category {
    type Err = std::convert::Infallible;

    /// Case-insensitive for the known labels, verbatim otherwise
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let category = match s.trim().to_lowercase().as_str() {
            "bulking" => Category::Bulking,
            "ideal" => Category::Ideal,
            "diet" => Category::Diet,
            _ => Category::Other(s.trim().to_string()),
        };
        Ok(category)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Measurement
// ============================================================================

/// One recorded BMI observation
///
/// Everything except `recommendation` is fixed at construction. In
/// particular `bmi` is never recomputed from `height`/`weight`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    date: NaiveDate,
    time: NaiveTime,
    #[serde(with = "float_repr")]
    height: f64,
    #[serde(with = "float_repr")]
    weight: f64,
    #[serde(with = "float_repr")]
    bmi: f64,
    recommendation: Category,
}

impl Measurement {
    /// Record a measurement taken now (local time)
    pub fn new(height: f64, weight: f64) -> Self {
        Self::recorded_at(height, weight, Local::now().naive_local())
    }

    /// Record a measurement with an explicit timestamp
    ///
    /// The time of day is truncated to whole seconds.
    pub fn recorded_at(height: f64, weight: f64, at: NaiveDateTime) -> Self {
        let bmi = crate::classify::compute_bmi(height, weight);
        let time = at.time().with_nanosecond(0).unwrap_or(at.time());
        Self {
            date: at.date(),
            time,
            height,
            weight,
            bmi,
            recommendation: crate::classify::classify(bmi),
        }
    }

    /// Build a measurement from fully specified parts
    ///
    /// `bmi` and `recommendation` are taken as given.
    pub fn from_parts(
        date: NaiveDate,
        time: NaiveTime,
        height: f64,
        weight: f64,
        bmi: f64,
        recommendation: Category,
    ) -> Self {
        Self {
            date,
            time,
            height,
            weight,
            bmi,
            recommendation,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn time(&self) -> NaiveTime {
        self.time
    }

    /// Height in centimeters
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Weight in kilograms
    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn bmi(&self) -> f64 {
        self.bmi
    }

    pub fn recommendation(&self) -> &Category {
        &self.recommendation
    }

    /// Revise the recommendation; `bmi` is left untouched
    pub fn set_recommendation(&mut self, recommendation: Category) {
        self.recommendation = recommendation;
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} | {} cm | {} kg | BMI {:.2} | {}",
            self.date.format("%Y-%m-%d"),
            self.time.format("%H:%M:%S"),
            self.height,
            self.weight,
            self.bmi,
            self.recommendation
        )
    }
}

/// JSON representation of `f64` fields that keeps non-finite values
///
/// Finite values are plain numbers. `NaN`, `inf` and `-inf` are written as
/// strings. `null` reads back as `NaN`.
mod float_repr {
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else if value.is_nan() {
            serializer.serialize_str("NaN")
        } else if value.is_sign_positive() {
            serializer.serialize_str("inf")
        } else {
            serializer.serialize_str("-inf")
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        deserializer.deserialize_any(FloatVisitor)
    }

    struct FloatVisitor;

    impl<'de> Visitor<'de> for FloatVisitor {
        type Value = f64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a number, \"NaN\", \"inf\", \"-inf\" or null")
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
            match v {
                "NaN" => Ok(f64::NAN),
                "inf" => Ok(f64::INFINITY),
                "-inf" => Ok(f64::NEG_INFINITY),
                other => Err(E::invalid_value(de::Unexpected::Str(other), &self)),
            }
        }

        fn visit_unit<E: de::Error>(self) -> Result<f64, E> {
            Ok(f64::NAN)
        }

        fn visit_none<E: de::Error>(self) -> Result<f64, E> {
            Ok(f64::NAN)
        }
    }
}
