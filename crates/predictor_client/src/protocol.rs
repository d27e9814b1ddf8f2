//! Wire protocol for the prediction endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON body POSTed to `/api/predict/`. Built once per submission from a
/// snapshot of the form; the live form is never referenced after submit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PredictRequest {
    pub flight_number: String,
    pub flight_date: String,
}

/// Prediction payload, taken verbatim from the server and replaced wholesale
/// on the next submission.
///
/// The server is expected to send `delayed_probability` in [0,1] and
/// `delayed_label` in {0,1}, but neither is guaranteed on the wire, so both
/// are decoded as raw JSON values and coerced at render time (see
/// [`crate::gauge`]).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PredictionResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delayed_probability: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delayed_label: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_version: Option<String>,
}
