use crate::{
    CategoryFilter, ClassificationResult, FileBlob, HistoryRecord, HistoryStats, InputKind,
    RequestId, SubmissionFailure,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User picked which kind of input to submit.
    InputKindSelected(InputKind),
    /// User edited the email text buffer.
    TextEdited(String),
    /// User chose a file for the active file handler.
    FileChosen(FileBlob),
    /// User cleared the active handler's text or file.
    InputCleared,
    /// User closed the active handler's inline error.
    InlineErrorDismissed,
    /// User confirmed the submission.
    SubmitClicked,
    /// Classification endpoint answered (or failed).
    SubmissionCompleted {
        request_id: RequestId,
        outcome: Result<ClassificationResult, SubmissionFailure>,
    },
    /// User opened the history browser.
    HistoryRequested,
    /// User changed the history category filter.
    FilterChanged(CategoryFilter),
    /// User moved to another history page.
    PageSelected(usize),
    /// History list fetch answered; the error is a diagnostic reason only.
    HistoryLoaded {
        request_id: RequestId,
        result: Result<Vec<HistoryRecord>, String>,
    },
    /// History stats fetch answered; `None` when it failed.
    HistoryStatsLoaded {
        request_id: RequestId,
        stats: Option<HistoryStats>,
    },
    /// "New processing" from a result/error, or "back" from history.
    BackToSelection,
    /// Fallback for placeholder wiring.
    NoOp,
}
