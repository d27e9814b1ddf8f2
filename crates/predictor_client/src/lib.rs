//! Client library for the flight delay prediction service.
//!
//! Holds the request lifecycle (`controller`), the probability-to-dial
//! mapping (`gauge`), the wire protocol, and a reqwest-backed client behind
//! the [`DelayPredictor`] seam. Front-ends own presentation only; every
//! state transition and numeric contract lives here.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

pub mod config;
pub mod controller;
pub mod error;
pub mod gauge;
pub mod protocol;

pub use controller::{FormInput, PredictController, RequestState};
pub use error::PredictError;
pub use gauge::GaugeReading;
pub use protocol::{PredictRequest, PredictionResult};

/// Seam between the request lifecycle and the transport, so front-ends and
/// tests can substitute the network.
#[async_trait]
pub trait DelayPredictor: Send + Sync {
    async fn predict(&self, request: &PredictRequest) -> Result<PredictionResult, PredictError>;
}

/// reqwest-backed predictor talking to `{base_url}/api/predict/`.
pub struct HttpPredictionClient {
    http: Client,
    base_url: String,
}

impl HttpPredictionClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send_predict(
        &self,
        request: &PredictRequest,
    ) -> Result<PredictionResult, PredictError> {
        let response = self
            .http
            .post(format!("{}/api/predict/", self.base_url))
            .json(request)
            .send()
            .await
            .map_err(|err| PredictError::Transport(err.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| PredictError::Transport(err.to_string()))?;

        match serde_json::from_str::<Value>(&body) {
            Ok(value) => {
                // A server-provided error message wins over the status code,
                // whatever the status was.
                if let Some(message) = value.get("error").and_then(Value::as_str) {
                    return Err(PredictError::Api(message.to_string()));
                }
                if !status.is_success() {
                    return Err(PredictError::Status(status.as_u16()));
                }
                serde_json::from_value(value).map_err(|err| PredictError::Malformed(err.to_string()))
            }
            Err(err) if status.is_success() => Err(PredictError::Malformed(err.to_string())),
            Err(_) => Err(PredictError::Status(status.as_u16())),
        }
    }
}

#[async_trait]
impl DelayPredictor for HttpPredictionClient {
    async fn predict(&self, request: &PredictRequest) -> Result<PredictionResult, PredictError> {
        tracing::debug!(
            flight_number = %request.flight_number,
            flight_date = %request.flight_date,
            "sending prediction request"
        );
        self.send_predict(request).await
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
