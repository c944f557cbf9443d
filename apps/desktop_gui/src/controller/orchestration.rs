//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

/// Queues `cmd` for the backend worker. On failure the returned message is
/// meant for the status line and the command is dropped.
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
        Err(TrySendError::Full(_)) => {
            tracing::warn!(command = cmd_name, "ui command queue full");
            Err("UI command queue is full; please retry".to_string())
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::error!(command = cmd_name, "backend command processor disconnected");
            Err(
                "Backend command processor disconnected (possible startup/runtime failure); restart the app"
                    .to_string(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use client_core::views::ViewInstance;
    use crossbeam_channel::bounded;

    #[test]
    fn queues_command_when_backend_is_listening() {
        let (tx, rx) = bounded(1);
        let view = ViewInstance::next();
        dispatch_backend_command(&tx, BackendCommand::LoadProducts { view }).expect("queued");
        assert!(matches!(
            rx.try_recv(),
            Ok(BackendCommand::LoadProducts { view: queued }) if queued == view
        ));
    }

    #[test]
    fn reports_full_queue() {
        let (tx, _rx) = bounded(1);
        let view = ViewInstance::next();
        dispatch_backend_command(&tx, BackendCommand::LoadProducts { view }).expect("queued");
        let err = dispatch_backend_command(&tx, BackendCommand::LoadProducts { view })
            .expect_err("queue full");
        assert!(err.contains("full"));
    }

    #[test]
    fn reports_disconnected_backend() {
        let (tx, rx) = bounded(1);
        drop(rx);
        let err = dispatch_backend_command(
            &tx,
            BackendCommand::LoadProducts {
                view: ViewInstance::next(),
            },
        )
        .expect_err("disconnected");
        assert!(err.contains("disconnected"));
    }
}
