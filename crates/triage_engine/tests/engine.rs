use std::sync::{Arc, Mutex};
use std::time::Duration;

use triage_engine::{
    ApiError, ClassifyResponse, EngineEvent, EngineHandle, HistoryCounts, HistoryEntry,
    HistoryFilter, Payload, TriageApi,
};

#[derive(Default)]
struct FakeApi {
    filters: Mutex<Vec<HistoryFilter>>,
}

#[async_trait::async_trait]
impl TriageApi for FakeApi {
    async fn classify(&self, payload: Payload) -> Result<ClassifyResponse, ApiError> {
        Ok(ClassifyResponse {
            status: "success".to_string(),
            category: Some("Produtivo".to_string()),
            confidence: Some(0.5),
            email_type: None,
            suggested_response: Some(format!("{} bytes received", payload.len())),
            error: None,
            saved_id: None,
            input_type: None,
        })
    }

    async fn list_history(&self, filter: HistoryFilter) -> Result<Vec<HistoryEntry>, ApiError> {
        self.filters.lock().unwrap().push(filter);
        Ok(Vec::new())
    }

    async fn history_stats(&self) -> Result<HistoryCounts, ApiError> {
        Ok(HistoryCounts {
            total: 1,
            produtivos: 1,
            improdutivos: 0,
        })
    }
}

#[test]
fn every_command_yields_one_event_with_its_request_id() {
    let api = Arc::new(FakeApi::default());
    let (engine, events) = EngineHandle::spawn(api.clone()).expect("engine");

    engine.classify(
        1,
        Payload::Text {
            email_text: "Hello".to_string(),
        },
    );
    engine.list_history(2, HistoryFilter::Category("Produtivo".to_string()));
    engine.history_stats(3);

    let mut seen = Vec::new();
    for _ in 0..3 {
        let event = events
            .recv_timeout(Duration::from_secs(5))
            .expect("engine event");
        seen.push(event);
    }

    let mut ids: Vec<u64> = seen
        .iter()
        .map(|event| match event {
            EngineEvent::Classified { request_id, result } => {
                let response = result.as_ref().expect("classified");
                assert_eq!(
                    response.suggested_response.as_deref(),
                    Some("5 bytes received")
                );
                *request_id
            }
            EngineEvent::HistoryListed { request_id, result } => {
                assert!(result.as_ref().expect("listed").is_empty());
                *request_id
            }
            EngineEvent::StatsLoaded { request_id, result } => {
                assert_eq!(result.as_ref().expect("stats").total, 1);
                *request_id
            }
        })
        .collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(
        *api.filters.lock().unwrap(),
        vec![HistoryFilter::Category("Produtivo".to_string())]
    );
}
