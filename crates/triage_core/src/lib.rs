//! Mail triage core: pure submission/history state machine and view-model helpers.
mod effect;
mod history;
pub mod input;
mod model;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use history::{HistoryBrowser, HISTORY_LOAD_FAILED, PAGE_SIZE};
pub use input::{InputHandler, PdfRules, TextRules, TxtRules, ValidationError};
pub use model::{
    Category, CategoryFilter, ClassificationResult, FileBlob, HistoryRecord, HistoryStats,
    InputKind, RequestId, ResultStatus, Submission, SubmissionFailure, UnknownCategory,
};
pub use msg::Msg;
pub use state::{AppState, Screen};
pub use update::update;
pub use view_model::{
    format_confidence, format_file_size, AppViewModel, FileView, HistoryRowView, HistoryView,
    InputView, ResultView, ScreenView,
};
