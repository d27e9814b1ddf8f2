//! Backend commands queued from UI to the backend worker.

use predictor_client::PredictRequest;

pub enum BackendCommand {
    Predict {
        submission: u64,
        request: PredictRequest,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Predict { .. } => "predict",
        }
    }
}
