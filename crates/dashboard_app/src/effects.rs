use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use client_logging::{client_info, client_warn};
use dashboard_core::{Effect, Msg};
use dashboard_engine::{ApiError, ApiSettings, EngineEvent, EngineHandle};

use crate::app::AppEvent;
use crate::notify::Notifier;

/// Executes core effects: IO effects go to the engine, notices to the
/// notification collaborator. Engine completions are pumped back into the
/// app's event channel as messages.
pub struct EffectRunner {
    engine: EngineHandle,
    notifier: Box<dyn Notifier>,
}

impl EffectRunner {
    pub fn new(
        settings: ApiSettings,
        notifier: Box<dyn Notifier>,
        event_tx: mpsc::Sender<AppEvent>,
    ) -> Result<Self, ApiError> {
        let engine = EngineHandle::new(settings)?;
        Ok(Self::with_engine(engine, notifier, event_tx))
    }

    fn with_engine(
        engine: EngineHandle,
        notifier: Box<dyn Notifier>,
        event_tx: mpsc::Sender<AppEvent>,
    ) -> Self {
        let runner = Self { engine, notifier };
        runner.spawn_event_pump(event_tx);
        runner
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchSnapshot { seq } => {
                    client_info!("FetchSnapshot seq={seq}");
                    self.engine.fetch_snapshot(seq);
                }
                Effect::SubmitUrl { url } => {
                    client_info!("SubmitUrl url={url}");
                    self.engine.submit_url(url);
                }
                Effect::RerunRecords { ids } => {
                    client_info!("RerunRecords count={}", ids.len());
                    self.engine.rerun_records(ids);
                }
                Effect::DeleteRecords { ids } => {
                    client_info!("DeleteRecords count={}", ids.len());
                    self.engine.delete_records(ids);
                }
                Effect::FetchDetail { id } => {
                    self.engine.fetch_detail(id);
                }
                Effect::Notify(notice) => self.notifier.notify(&notice),
            }
        }
    }

    fn spawn_event_pump(&self, event_tx: mpsc::Sender<AppEvent>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            if let Some(event) = engine.try_recv() {
                let msg = translate_event(event);
                if event_tx.send(AppEvent::Dispatch(msg)).is_err() {
                    break;
                }
            } else {
                thread::sleep(Duration::from_millis(20));
            }
        });
    }
}

/// Engine errors reach the pure core as display strings; the typed error
/// is logged here before it is flattened.
fn translate_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::SnapshotFetched { seq, result } => Msg::SnapshotFetched {
            seq,
            result: result.map_err(|err| {
                client_warn!("snapshot fetch seq={seq} failed: {err}");
                err.to_string()
            }),
        },
        EngineEvent::MutationFinished { kind, result } => Msg::MutationFinished {
            kind,
            result: result.map_err(|err| {
                client_warn!("{kind:?} mutation failed: {err}");
                err.to_string()
            }),
        },
        EngineEvent::DetailFetched { id, result } => Msg::DetailFetched {
            id,
            result: result.map_err(|err| {
                client_warn!("detail fetch id={id} failed: {err}");
                err.to_string()
            }),
        },
    }
}
