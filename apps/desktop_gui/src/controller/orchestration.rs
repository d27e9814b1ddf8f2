//! Command dispatch from UI actions to the backend queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

/// Queues a command without blocking the UI thread. Returns the
/// user-visible failure message when the queue cannot accept it, so the
/// caller can fail the in-flight submission instead of leaving it in
/// Loading forever.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
) -> Result<(), String> {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            Ok(())
        }
        Err(TrySendError::Full(_)) => Err("prediction queue is full; please retry".to_string()),
        Err(TrySendError::Disconnected(_)) => Err(
            "prediction worker disconnected (possible startup/runtime failure); restart the app"
                .to_string(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use crossbeam_channel::bounded;
    use predictor_client::PredictRequest;

    use super::*;

    fn predict_command(submission: u64) -> BackendCommand {
        BackendCommand::Predict {
            submission,
            request: PredictRequest {
                flight_number: "UA245".to_string(),
                flight_date: "2026-08-06".to_string(),
            },
        }
    }

    #[test]
    fn full_queue_reports_retryable_failure() {
        let (tx, _rx) = bounded::<BackendCommand>(1);
        assert!(dispatch_backend_command(&tx, predict_command(1)).is_ok());

        let err = dispatch_backend_command(&tx, predict_command(2)).expect_err("full");
        assert!(err.contains("full"));
    }

    #[test]
    fn disconnected_queue_reports_worker_failure() {
        let (tx, rx) = bounded::<BackendCommand>(1);
        drop(rx);

        let err = dispatch_backend_command(&tx, predict_command(1)).expect_err("disconnected");
        assert!(err.contains("disconnected"));
    }
}
