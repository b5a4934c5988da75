use std::sync::{mpsc, Arc};
use std::thread;

use triage_core::{
    Category, CategoryFilter, ClassificationResult, Effect, HistoryRecord, HistoryStats, Msg,
    ResultStatus, Submission, SubmissionFailure,
};
use triage_engine::{
    Attachment, ClassifyResponse, ClientSettings, EngineEvent, EngineHandle, HistoryCounts,
    HistoryEntry, HistoryFilter, Payload, ReqwestClient,
};
use triage_logging::{triage_info, triage_warn};

/// Turns core effects into engine commands, and engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    /// `deliver` receives every message produced by the engine; returning
    /// `false` stops delivery.
    pub fn new<F>(settings: ClientSettings, deliver: F) -> anyhow::Result<Self>
    where
        F: Fn(Msg) -> bool + Send + 'static,
    {
        let client = ReqwestClient::new(settings)?;
        let (engine, events) = EngineHandle::spawn(Arc::new(client))?;
        spawn_event_loop(events, deliver);
        Ok(Self { engine })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Submit {
                    request_id,
                    submission,
                } => {
                    triage_info!(
                        "Submit request_id={} kind={} size={}",
                        request_id,
                        submission.kind().label(),
                        submission.size()
                    );
                    self.engine.classify(request_id, to_payload(submission));
                }
                Effect::FetchHistory { request_id, filter } => {
                    triage_info!(
                        "FetchHistory request_id={} filter={}",
                        request_id,
                        filter.label()
                    );
                    self.engine.list_history(request_id, to_history_filter(filter));
                }
                Effect::FetchHistoryStats { request_id } => {
                    triage_info!("FetchHistoryStats request_id={}", request_id);
                    self.engine.history_stats(request_id);
                }
            }
        }
    }
}

fn spawn_event_loop<F>(events: mpsc::Receiver<EngineEvent>, deliver: F)
where
    F: Fn(Msg) -> bool + Send + 'static,
{
    thread::spawn(move || {
        while let Ok(event) = events.recv() {
            if !deliver(map_event(event)) {
                break;
            }
        }
    });
}

pub(crate) fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::Classified { request_id, result } => Msg::SubmissionCompleted {
            request_id,
            outcome: result.map(to_classification).map_err(|err| {
                triage_warn!("Submission {} failed: {}", request_id, err);
                SubmissionFailure { detail: err.detail }
            }),
        },
        EngineEvent::HistoryListed { request_id, result } => Msg::HistoryLoaded {
            request_id,
            result: result
                .map(|entries| entries.into_iter().filter_map(to_record).collect())
                .map_err(|err| {
                    triage_warn!("History request {} failed: {}", request_id, err);
                    err.to_string()
                }),
        },
        EngineEvent::StatsLoaded { request_id, result } => Msg::HistoryStatsLoaded {
            request_id,
            stats: match result {
                Ok(counts) => Some(to_stats(counts)),
                Err(err) => {
                    triage_warn!("History stats request {} failed: {}", request_id, err);
                    None
                }
            },
        },
    }
}

fn to_payload(submission: Submission) -> Payload {
    match submission {
        Submission::Text { body } => Payload::Text { email_text: body },
        Submission::Pdf { file } => Payload::Pdf(Attachment {
            file_name: file.name,
            media_type: file.media_type,
            bytes: file.bytes,
        }),
        Submission::Txt { file } => Payload::Txt(Attachment {
            file_name: file.name,
            media_type: file.media_type,
            bytes: file.bytes,
        }),
    }
}

fn to_history_filter(filter: CategoryFilter) -> HistoryFilter {
    match filter.category() {
        Some(category) => HistoryFilter::Category(category.label().to_string()),
        None => HistoryFilter::All,
    }
}

fn parse_category(raw: &str) -> Option<Category> {
    match raw.parse() {
        Ok(category) => Some(category),
        Err(err) => {
            triage_warn!("Ignoring {}", err);
            None
        }
    }
}

fn to_classification(response: ClassifyResponse) -> ClassificationResult {
    let status = if response.is_success() {
        ResultStatus::Success
    } else {
        ResultStatus::Error
    };
    ClassificationResult {
        status,
        category: response.category.as_deref().and_then(parse_category),
        confidence: response.confidence,
        email_type: response.email_type.or(response.input_type),
        suggested_response: response.suggested_response,
        error: response.error,
        saved_id: response.saved_id,
    }
}

fn to_record(entry: HistoryEntry) -> Option<HistoryRecord> {
    let category = parse_category(&entry.category)?;
    Some(HistoryRecord {
        id: entry.id,
        category,
        ai_confidence: entry.ai_confidence.unwrap_or_default(),
        text_preview: entry.text_preview.unwrap_or_default(),
        response_preview: entry.response_preview.unwrap_or_default(),
        email_type: entry.email_type,
        analyzed_at: entry.analyzed_at,
    })
}

fn to_stats(counts: HistoryCounts) -> HistoryStats {
    HistoryStats {
        total: counts.total,
        produtivos: counts.produtivos,
        improdutivos: counts.improdutivos,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use triage_core::FileBlob;
    use triage_engine::{ApiError, ClassifyResponse, FailureKind};

    use super::*;

    fn entry(id: u64, category: &str) -> HistoryEntry {
        HistoryEntry {
            id,
            category: category.to_string(),
            ai_confidence: None,
            text_preview: Some("preview".to_string()),
            response_preview: None,
            email_type: Some("txt".to_string()),
            analyzed_at: None,
        }
    }

    fn api_error() -> ApiError {
        ApiError {
            kind: FailureKind::HttpStatus(413),
            message: "413 Payload Too Large".to_string(),
            detail: Some("file too large".to_string()),
        }
    }

    #[test]
    fn submissions_map_to_matching_payloads() {
        let file = FileBlob::new("a.pdf", "application/pdf", vec![1, 2, 3]);
        assert_eq!(
            to_payload(Submission::Pdf { file }),
            Payload::Pdf(Attachment {
                file_name: "a.pdf".to_string(),
                media_type: "application/pdf".to_string(),
                bytes: vec![1, 2, 3],
            })
        );
        assert_eq!(
            to_payload(Submission::Text {
                body: "Hi".to_string()
            }),
            Payload::Text {
                email_text: "Hi".to_string()
            }
        );
    }

    #[test]
    fn filters_map_to_category_labels() {
        assert_eq!(to_history_filter(CategoryFilter::All), HistoryFilter::All);
        assert_eq!(
            to_history_filter(CategoryFilter::Produtivo),
            HistoryFilter::Category("Produtivo".to_string())
        );
    }

    #[test]
    fn classified_event_becomes_success_result() {
        let msg = map_event(EngineEvent::Classified {
            request_id: 4,
            result: Ok(ClassifyResponse {
                status: "success".to_string(),
                category: Some("Produtivo".to_string()),
                confidence: Some(0.87),
                email_type: None,
                suggested_response: Some("Thanks...".to_string()),
                error: None,
                saved_id: Some(9),
                input_type: Some("text".to_string()),
            }),
        });
        let Msg::SubmissionCompleted {
            request_id,
            outcome: Ok(result),
        } = msg
        else {
            panic!("unexpected message");
        };
        assert_eq!(request_id, 4);
        assert!(result.is_success());
        assert_eq!(result.category, Some(Category::Produtivo));
        assert_eq!(result.saved_id, Some(9));
        assert_eq!(result.email_type.as_deref(), Some("text"));
    }

    #[test]
    fn api_failure_keeps_only_the_detail() {
        let msg = map_event(EngineEvent::Classified {
            request_id: 5,
            result: Err(api_error()),
        });
        assert_eq!(
            msg,
            Msg::SubmissionCompleted {
                request_id: 5,
                outcome: Err(SubmissionFailure::with_detail("file too large")),
            }
        );
    }

    #[test]
    fn unknown_categories_are_dropped_from_history() {
        let msg = map_event(EngineEvent::HistoryListed {
            request_id: 2,
            result: Ok(vec![entry(1, "Produtivo"), entry(2, "unknown"), entry(3, "Improdutivo")]),
        });
        let Msg::HistoryLoaded {
            result: Ok(records),
            ..
        } = msg
        else {
            panic!("unexpected message");
        };
        let ids: Vec<u64> = records.iter().map(|record| record.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(records[0].ai_confidence, 0.0);
        assert_eq!(records[0].response_preview, "");
    }

    #[test]
    fn failed_stats_hide_the_counts() {
        let msg = map_event(EngineEvent::StatsLoaded {
            request_id: 3,
            result: Err(api_error()),
        });
        assert_eq!(
            msg,
            Msg::HistoryStatsLoaded {
                request_id: 3,
                stats: None
            }
        );
    }
}
