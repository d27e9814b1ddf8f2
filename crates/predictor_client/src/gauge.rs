//! Pure mapping from a prediction payload to gauge display values.
//!
//! Everything here is deterministic and side-effect free; the GUI only
//! paints what these functions compute.

use serde_json::Value;

use crate::protocol::PredictionResult;

/// The dial spans a semicircle: probability 0.0 points the needle at -90
/// degrees (left horizontal), 0.5 straight up, 1.0 at +90 (right
/// horizontal).
pub const DIAL_SPAN_DEGREES: f64 = 180.0;

/// Static note rendered under the percentage readout.
pub const THRESHOLD_NOTE: &str = "(≥ 50% → delayed)";

/// Rendered in place of a missing model version.
pub const MODEL_VERSION_FALLBACK: &str = "unknown";

/// Coerces a probability-like JSON value to a number and clamps it to
/// [0, 1]. Numeric strings are parsed; anything non-numeric, missing, or
/// non-finite maps to 0. The clamp is a correctness property, not a
/// cosmetic default: out-of-range server values must not move the needle
/// off the dial.
pub fn clamp_probability(raw: Option<&Value>) -> f64 {
    let p = match raw {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if p.is_finite() {
        p.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Linear needle mapping over the semicircle. No easing, no rounding.
pub fn needle_angle_degrees(probability: f64) -> f64 {
    -90.0 + probability * DIAL_SPAN_DEGREES
}

/// Percentage formatted to one decimal place.
pub fn percent_text(probability: f64) -> String {
    format!("{:.1}%", probability * 100.0)
}

/// Authoritative server classification, consumed as-is rather than
/// recomputed from the probability: the two may disagree and the UI must
/// not reconcile them. Only a JSON *number* equal to 1 counts as delayed;
/// strings, booleans, and anything else read as on time.
pub fn delay_label(raw: Option<&Value>) -> &'static str {
    let delayed = match raw {
        Some(Value::Number(n)) => n.as_i64() == Some(1) || n.as_f64() == Some(1.0),
        _ => false,
    };
    if delayed {
        "Delayed"
    } else {
        "On time"
    }
}

/// Model version passed through unmodified, with a literal fallback.
pub fn model_version_text(version: Option<&str>) -> &str {
    match version {
        Some(v) => v,
        None => MODEL_VERSION_FALLBACK,
    }
}

/// Everything the result panel needs, derived once per render.
#[derive(Debug, Clone, PartialEq)]
pub struct GaugeReading {
    pub probability: f64,
    pub angle_degrees: f64,
    pub percent: String,
    pub label: &'static str,
    pub model_version: String,
}

impl GaugeReading {
    pub fn from_result(result: &PredictionResult) -> Self {
        let probability = clamp_probability(result.delayed_probability.as_ref());
        Self {
            probability,
            angle_degrees: needle_angle_degrees(probability),
            percent: percent_text(probability),
            label: delay_label(result.delayed_label.as_ref()),
            model_version: model_version_text(result.model_version.as_deref()).to_string(),
        }
    }
}
