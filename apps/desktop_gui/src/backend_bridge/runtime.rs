//! Runtime bridge between the UI command queue and the prediction service.
//!
//! The worker thread owns a tokio runtime; the egui thread never awaits.
//! Events are pushed back with `try_send` so a stalled UI cannot block the
//! worker either.

use std::thread;

use crossbeam_channel::{Receiver, Sender};
use predictor_client::{
    config::{load_settings, prepare_base_url},
    DelayPredictor, HttpPredictionClient,
};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    api_url_override: Option<String>,
) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                let _ = ui_tx.try_send(UiEvent::WorkerFailed(format!(
                    "prediction worker startup failure: failed to build runtime: {err}"
                )));
                return;
            }
        };

        runtime.block_on(async move {
            let raw_base_url =
                api_url_override.unwrap_or_else(|| load_settings().api_base_url);
            let base_url = match prepare_base_url(&raw_base_url) {
                Ok(url) => url,
                Err(err) => {
                    tracing::error!("invalid prediction service url: {err:#}");
                    let _ = ui_tx.try_send(UiEvent::WorkerFailed(format!(
                        "prediction worker startup failure: {err:#}"
                    )));
                    return;
                }
            };

            let client = HttpPredictionClient::new(base_url);
            tracing::info!(base_url = client.base_url(), "prediction worker ready");
            let _ = ui_tx.try_send(UiEvent::Info("Prediction service ready".to_string()));

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::Predict {
                        submission,
                        request,
                    } => {
                        tracing::info!(
                            submission,
                            flight_number = %request.flight_number,
                            flight_date = %request.flight_date,
                            "backend: predict"
                        );
                        let outcome = client.predict(&request).await;
                        if let Err(err) = &outcome {
                            tracing::error!(submission, "backend: predict failed: {err}");
                        }
                        let _ = ui_tx.try_send(UiEvent::PredictionResolved {
                            submission,
                            outcome,
                        });
                    }
                }
            }
        });
    });
}
