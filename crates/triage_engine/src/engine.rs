use std::sync::{mpsc, Arc};
use std::thread;

use triage_logging::triage_debug;

use crate::{EngineError, EngineEvent, HistoryFilter, Payload, RequestId, TriageApi};

enum EngineCommand {
    Classify {
        request_id: RequestId,
        payload: Payload,
    },
    ListHistory {
        request_id: RequestId,
        filter: HistoryFilter,
    },
    HistoryStats {
        request_id: RequestId,
    },
}

/// Runs service calls on a background tokio runtime.
///
/// Commands are fire-and-forget; every command yields exactly one
/// [`EngineEvent`] carrying the same request id. Dropping the handle stops
/// the worker.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn spawn(
        api: Arc<dyn TriageApi>,
    ) -> Result<(Self, mpsc::Receiver<EngineEvent>), EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::Builder::new()
            .name("triage-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let api = api.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        handle_command(api.as_ref(), command, event_tx).await;
                    });
                }
                triage_debug!("engine command channel closed; stopping worker");
            })?;

        Ok((Self { cmd_tx }, event_rx))
    }

    pub fn classify(&self, request_id: RequestId, payload: Payload) {
        let _ = self.cmd_tx.send(EngineCommand::Classify {
            request_id,
            payload,
        });
    }

    pub fn list_history(&self, request_id: RequestId, filter: HistoryFilter) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::ListHistory { request_id, filter });
    }

    pub fn history_stats(&self, request_id: RequestId) {
        let _ = self.cmd_tx.send(EngineCommand::HistoryStats { request_id });
    }
}

async fn handle_command(
    api: &dyn TriageApi,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::Classify {
            request_id,
            payload,
        } => EngineEvent::Classified {
            request_id,
            result: api.classify(payload).await,
        },
        EngineCommand::ListHistory { request_id, filter } => EngineEvent::HistoryListed {
            request_id,
            result: api.list_history(filter).await,
        },
        EngineCommand::HistoryStats { request_id } => EngineEvent::StatsLoaded {
            request_id,
            result: api.history_stats().await,
        },
    };
    let _ = event_tx.send(event);
}
