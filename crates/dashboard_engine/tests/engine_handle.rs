use std::sync::Arc;
use std::time::{Duration, Instant};

use dashboard_core::{AnalysisRecord, MutationKind, RecordId, RecordStatus};
use dashboard_engine::{AnalysisApi, ApiError, EngineEvent, EngineHandle};

struct ScriptedApi;

fn record(id: u64) -> AnalysisRecord {
    AnalysisRecord {
        id,
        url: format!("https://{id}.example.com"),
        status: RecordStatus::Queued,
        html_version: String::new(),
        page_title: String::new(),
        h1_count: 0,
        h2_count: 0,
        h3_count: 0,
        h4_count: 0,
        h5_count: 0,
        h6_count: 0,
        internal_links: 0,
        external_links: 0,
        inaccessible_links: 0,
        inaccessible_link_details: String::new(),
        has_login_form: false,
        error_message: String::new(),
        created_at: "2025-07-01T10:00:00Z".to_string(),
        updated_at: "2025-07-01T10:00:00Z".to_string(),
    }
}

#[async_trait::async_trait]
impl AnalysisApi for ScriptedApi {
    async fn list_records(&self) -> Result<Vec<AnalysisRecord>, ApiError> {
        Ok(vec![record(1)])
    }

    async fn submit_url(&self, _url: &str) -> Result<(), ApiError> {
        Ok(())
    }

    async fn fetch_record(&self, id: RecordId) -> Result<AnalysisRecord, ApiError> {
        Ok(record(id))
    }

    async fn rerun_records(&self, _ids: &[RecordId]) -> Result<(), ApiError> {
        Ok(())
    }

    async fn delete_records(&self, _ids: &[RecordId]) -> Result<(), ApiError> {
        Err(ApiError::Network("connection reset".to_string()))
    }
}

fn drain_events(handle: &EngineHandle, expected: usize) -> Vec<EngineEvent> {
    let deadline = Instant::now() + Duration::from_secs(5);
    let mut events = Vec::new();
    while events.len() < expected && Instant::now() < deadline {
        match handle.try_recv() {
            Some(event) => events.push(event),
            None => std::thread::sleep(Duration::from_millis(10)),
        }
    }
    events
}

#[test]
fn commands_complete_as_events() {
    let handle = EngineHandle::with_api(Arc::new(ScriptedApi));
    handle.fetch_snapshot(1);
    handle.submit_url("https://new.example.com");
    handle.delete_records(vec![7]);

    let events = drain_events(&handle, 3);
    assert_eq!(events.len(), 3);

    // Completion order is not guaranteed; check by shape.
    assert!(events.iter().any(|event| matches!(
        event,
        EngineEvent::SnapshotFetched { seq: 1, result: Ok(records) } if records.len() == 1
    )));
    assert!(events.iter().any(|event| matches!(
        event,
        EngineEvent::MutationFinished { kind: MutationKind::Add, result: Ok(()) }
    )));
    assert!(events.iter().any(|event| matches!(
        event,
        EngineEvent::MutationFinished { kind: MutationKind::Delete, result: Err(_) }
    )));
}

#[test]
fn detail_fetch_round_trips_the_identifier() {
    let handle = EngineHandle::with_api(Arc::new(ScriptedApi));
    handle.fetch_detail(42);

    let events = drain_events(&handle, 1);
    match events.as_slice() {
        [EngineEvent::DetailFetched { id: 42, result: Ok(record) }] => {
            assert_eq!(record.id, 42);
        }
        other => panic!("expected one detail event, got {other:?}"),
    }
}
