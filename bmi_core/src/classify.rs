//! BMI computation and classification rules.
//!
//! Categories:
//! - below 18.5 → Bulking
//! - 18.5 to 25 inclusive → Ideal
//! - above 25 → Diet

use crate::{Category, Error, Result};

/// Lower bound of the ideal range (inclusive)
pub const IDEAL_MIN: f64 = 18.5;

/// Upper bound of the ideal range (inclusive)
pub const IDEAL_MAX: f64 = 25.0;

/// Plausible BMI range accepted by `validate_input`
pub const PLAUSIBLE_BMI: std::ops::RangeInclusive<f64> = 10.0..=100.0;

/// Compute BMI from height in centimeters and weight in kilograms
pub fn compute_bmi(height_cm: f64, weight_kg: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / height_m.powi(2)
}

/// Whether a BMI value falls in the ideal range
pub fn is_ideal(bmi: f64) -> bool {
    (IDEAL_MIN..=IDEAL_MAX).contains(&bmi)
}

/// Map a BMI value to its recommendation category
pub fn classify(bmi: f64) -> Category {
    if bmi < IDEAL_MIN {
        Category::Bulking
    } else if bmi > IDEAL_MAX {
        Category::Diet
    } else {
        Category::Ideal
    }
}

/// Reject input a caller should never turn into a measurement
///
/// Height and weight must be finite and positive, and the resulting BMI
/// must be physiologically plausible. The store itself does not call this.
pub fn validate_input(height_cm: f64, weight_kg: f64) -> Result<()> {
    if !height_cm.is_finite() || !weight_kg.is_finite() || height_cm <= 0.0 || weight_kg <= 0.0 {
        return Err(Error::InvalidArgument(
            "height and weight must be greater than 0".into(),
        ));
    }

    let bmi = compute_bmi(height_cm, weight_kg);
    if !PLAUSIBLE_BMI.contains(&bmi) {
        return Err(Error::InvalidArgument(format!(
            "BMI {:.2} is not plausible, check height and weight",
            bmi
        )));
    }

    Ok(())
}
