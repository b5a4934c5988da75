use crate::input::{InputHandler, InputRules};
use crate::{
    AppState, Category, CategoryFilter, FileBlob, HistoryBrowser, HistoryRecord, HistoryStats,
    InputKind, Screen,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub screen: ScreenView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenView {
    Selecting { input: Option<InputView> },
    Loading { kind: InputKind },
    Result(ResultView),
    Error { message: String },
    History(HistoryView),
}

/// The active input handler as the user sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputView {
    pub kind: InputKind,
    /// Present for the text handler only.
    pub text: Option<String>,
    pub file: Option<FileView>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileView {
    pub name: String,
    pub size_label: String,
    pub kind_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub category: Option<Category>,
    pub confidence_label: Option<String>,
    pub email_type: Option<String>,
    pub suggested_response: Option<String>,
    pub saved_id: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryView {
    pub filter: CategoryFilter,
    pub loading: bool,
    pub error: Option<String>,
    pub stats: Option<HistoryStats>,
    pub rows: Vec<HistoryRowView>,
    pub current_page: usize,
    pub page_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRowView {
    pub id: u64,
    pub category: Category,
    pub confidence_label: String,
    pub text_preview: String,
    pub response_preview: String,
    pub email_type: Option<String>,
    pub analyzed_at: Option<String>,
}

impl AppState {
    pub fn view(&self) -> AppViewModel {
        let screen = match self.screen() {
            Screen::Selecting => ScreenView::Selecting {
                input: self.active_kind().map(|kind| self.input_view(kind)),
            },
            Screen::Loading { kind, .. } => ScreenView::Loading { kind: *kind },
            Screen::ResultShown(result) => ScreenView::Result(ResultView {
                category: result.category,
                confidence_label: result.confidence.map(format_confidence),
                email_type: result.email_type.clone(),
                suggested_response: result.suggested_response.clone(),
                saved_id: result.saved_id,
            }),
            Screen::ErrorShown { message } => ScreenView::Error {
                message: message.clone(),
            },
            Screen::HistoryShown => ScreenView::History(history_view(self.history())),
        };
        AppViewModel { screen }
    }

    fn input_view(&self, kind: InputKind) -> InputView {
        match kind {
            InputKind::Text => InputView {
                kind,
                text: Some(self.text_handler().draft().clone()),
                file: None,
                error: self.text_handler().error().map(ToOwned::to_owned),
            },
            InputKind::Pdf => file_input_view(self.pdf_handler(), "PDF"),
            InputKind::Txt => file_input_view(self.txt_handler(), "Text file"),
        }
    }
}

fn file_input_view<R>(handler: &InputHandler<R>, kind_label: &'static str) -> InputView
where
    R: InputRules<Draft = Option<FileBlob>>,
{
    InputView {
        kind: handler.kind(),
        text: None,
        file: handler.draft().as_ref().map(|file| FileView {
            name: file.name.clone(),
            size_label: format_file_size(file.size()),
            kind_label,
        }),
        error: handler.error().map(ToOwned::to_owned),
    }
}

fn history_view(browser: &HistoryBrowser) -> HistoryView {
    HistoryView {
        filter: browser.filter(),
        loading: browser.is_loading(),
        error: browser.error().map(ToOwned::to_owned),
        stats: browser.stats(),
        rows: browser.visible_slice().iter().map(history_row).collect(),
        current_page: browser.current_page(),
        page_count: browser.page_count(),
    }
}

fn history_row(record: &HistoryRecord) -> HistoryRowView {
    HistoryRowView {
        id: record.id,
        category: record.category,
        confidence_label: format_confidence(record.ai_confidence),
        text_preview: record.text_preview.clone(),
        response_preview: record.response_preview.clone(),
        email_type: record.email_type.clone(),
        analyzed_at: record.analyzed_at.clone(),
    }
}

/// Confidence in `[0, 1]` as a percentage with one decimal, e.g. `87.0%`.
pub fn format_confidence(confidence: f64) -> String {
    format!("{:.1}%", confidence * 100.0)
}

/// Byte count in base-1024 units with at most two decimals, e.g. `1.5 KB`.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[unit])
}
