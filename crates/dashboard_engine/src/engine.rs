use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use client_logging::client_debug;
use dashboard_core::{MutationKind, RecordId};

use crate::client::{AnalysisApi, ApiSettings, HttpAnalysisApi};
use crate::{ApiError, EngineEvent};

enum EngineCommand {
    FetchSnapshot { seq: u64 },
    SubmitUrl { url: String },
    RerunRecords { ids: Vec<RecordId> },
    DeleteRecords { ids: Vec<RecordId> },
    FetchDetail { id: RecordId },
}

/// Handle to the IO thread. Commands go in over a channel; each one runs as
/// its own task on the thread's tokio runtime, so a slow fetch never delays
/// a mutation. Completions come back via `try_recv` in whatever order the
/// backend answers.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let api: Arc<dyn AnalysisApi> = Arc::new(HttpAnalysisApi::new(settings)?);
        Ok(Self::with_api(api))
    }

    /// Builds a handle over any data-source implementation; the seam tests
    /// use to substitute a scripted API.
    pub fn with_api(api: Arc<dyn AnalysisApi>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let api = api.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let event = run_command(api.as_ref(), command).await;
                    let _ = event_tx.send(event);
                });
            }
        });

        Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        }
    }

    pub fn fetch_snapshot(&self, seq: u64) {
        let _ = self.cmd_tx.send(EngineCommand::FetchSnapshot { seq });
    }

    pub fn submit_url(&self, url: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::SubmitUrl { url: url.into() });
    }

    pub fn rerun_records(&self, ids: Vec<RecordId>) {
        let _ = self.cmd_tx.send(EngineCommand::RerunRecords { ids });
    }

    pub fn delete_records(&self, ids: Vec<RecordId>) {
        let _ = self.cmd_tx.send(EngineCommand::DeleteRecords { ids });
    }

    pub fn fetch_detail(&self, id: RecordId) {
        let _ = self.cmd_tx.send(EngineCommand::FetchDetail { id });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }
}

async fn run_command(api: &dyn AnalysisApi, command: EngineCommand) -> EngineEvent {
    match command {
        EngineCommand::FetchSnapshot { seq } => {
            client_debug!("fetching snapshot seq={seq}");
            EngineEvent::SnapshotFetched {
                seq,
                result: api.list_records().await,
            }
        }
        EngineCommand::SubmitUrl { url } => EngineEvent::MutationFinished {
            kind: MutationKind::Add,
            result: api.submit_url(&url).await,
        },
        EngineCommand::RerunRecords { ids } => EngineEvent::MutationFinished {
            kind: MutationKind::Rerun,
            result: api.rerun_records(&ids).await,
        },
        EngineCommand::DeleteRecords { ids } => EngineEvent::MutationFinished {
            kind: MutationKind::Delete,
            result: api.delete_records(&ids).await,
        },
        EngineCommand::FetchDetail { id } => EngineEvent::DetailFetched {
            id,
            result: api.fetch_record(id).await,
        },
    }
}
