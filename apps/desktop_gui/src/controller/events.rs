//! Events flowing from the backend worker to the UI thread.

use predictor_client::{PredictError, PredictionResult};

pub enum UiEvent {
    /// Resolution of the submission with the given sequence number. The
    /// request controller discards resolutions whose number no longer
    /// matches the in-flight submission.
    PredictionResolved {
        submission: u64,
        outcome: Result<PredictionResult, PredictError>,
    },
    Info(String),
    /// The worker could not start or lost its configuration. Any in-flight
    /// submission must be failed so the form leaves Loading.
    WorkerFailed(String),
}
