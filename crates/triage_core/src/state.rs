use triage_logging::{triage_debug, triage_info};

use crate::input::{InputHandler, PdfRules, TextRules, TxtRules};
use crate::{
    CategoryFilter, ClassificationResult, Effect, FileBlob, HistoryBrowser, HistoryRecord,
    HistoryStats, InputKind, RequestId, SubmissionFailure,
};

/// Top-level view state. Exactly one screen is active at a time.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Screen {
    #[default]
    Selecting,
    Loading {
        request_id: RequestId,
        kind: InputKind,
    },
    ResultShown(ClassificationResult),
    ErrorShown {
        message: String,
    },
    HistoryShown,
}

impl Screen {
    /// Screens left through [`AppState::return_to_selecting`].
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Screen::ResultShown(_) | Screen::ErrorShown { .. } | Screen::HistoryShown
        )
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    screen: Screen,
    active_kind: Option<InputKind>,
    text: InputHandler<TextRules>,
    pdf: InputHandler<PdfRules>,
    txt: InputHandler<TxtRules>,
    history: HistoryBrowser,
    last_request_id: RequestId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn active_kind(&self) -> Option<InputKind> {
        self.active_kind
    }

    pub fn text_handler(&self) -> &InputHandler<TextRules> {
        &self.text
    }

    pub fn pdf_handler(&self) -> &InputHandler<PdfRules> {
        &self.pdf
    }

    pub fn txt_handler(&self) -> &InputHandler<TxtRules> {
        &self.txt
    }

    pub fn history(&self) -> &HistoryBrowser {
        &self.history
    }

    /// Returns whether anything visible changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn next_request_id(&mut self) -> RequestId {
        self.last_request_id += 1;
        self.last_request_id
    }

    pub(crate) fn select_input_kind(&mut self, kind: InputKind) -> bool {
        if self.screen != Screen::Selecting || self.active_kind == Some(kind) {
            return false;
        }
        self.active_kind = Some(kind);
        self.mark_dirty();
        true
    }

    pub(crate) fn edit_text(&mut self, text: String) -> bool {
        if self.screen != Screen::Selecting || self.active_kind != Some(InputKind::Text) {
            return false;
        }
        // The text handler has no selection check.
        let _ = self.text.set_draft(text);
        self.mark_dirty();
        true
    }

    /// Hand a file to the active file handler. A rejected file lands in the
    /// handler's inline error; `false` means nothing changed.
    pub(crate) fn choose_file(&mut self, file: FileBlob) -> bool {
        if self.screen != Screen::Selecting {
            return false;
        }
        let outcome = match self.active_kind {
            Some(InputKind::Pdf) => self.pdf.set_draft(Some(file)),
            Some(InputKind::Txt) => self.txt.set_draft(Some(file)),
            Some(InputKind::Text) | None => {
                triage_debug!("file chosen without an active file handler; ignored");
                return false;
            }
        };
        if let Err(err) = outcome {
            triage_debug!("file rejected: {}", err);
        }
        self.mark_dirty();
        true
    }

    pub(crate) fn clear_input(&mut self) {
        if self.screen != Screen::Selecting {
            return;
        }
        match self.active_kind {
            Some(InputKind::Text) => self.text.clear(),
            Some(InputKind::Pdf) => self.pdf.clear(),
            Some(InputKind::Txt) => self.txt.clear(),
            None => return,
        }
        self.mark_dirty();
    }

    pub(crate) fn dismiss_inline_error(&mut self) {
        match self.active_kind {
            Some(InputKind::Text) => self.text.dismiss_error(),
            Some(InputKind::Pdf) => self.pdf.dismiss_error(),
            Some(InputKind::Txt) => self.txt.dismiss_error(),
            None => return,
        }
        self.mark_dirty();
    }

    /// Validate the active draft and, if it passes, move to `Loading`.
    ///
    /// Only valid in `Selecting`; while a submission is in flight this does
    /// nothing and asks for no network work.
    pub(crate) fn begin_submission(&mut self) -> Option<Effect> {
        match &self.screen {
            Screen::Selecting => {}
            Screen::Loading { request_id, .. } => {
                triage_debug!("submit ignored: request {} still in flight", request_id);
                return None;
            }
            other => {
                triage_debug!("submit ignored on screen {:?}", other);
                return None;
            }
        }
        let kind = self.active_kind?;
        let prepared = match kind {
            InputKind::Text => self.text.prepare(),
            InputKind::Pdf => self.pdf.prepare(),
            InputKind::Txt => self.txt.prepare(),
        };
        let submission = match prepared {
            Ok(submission) => submission,
            Err(err) => {
                triage_debug!("{} submission rejected locally: {}", kind.label(), err);
                self.mark_dirty();
                return None;
            }
        };

        let request_id = self.next_request_id();
        self.screen = Screen::Loading { request_id, kind };
        self.mark_dirty();
        Some(Effect::Submit {
            request_id,
            submission,
        })
    }

    pub(crate) fn resolve_submission(
        &mut self,
        request_id: RequestId,
        outcome: Result<ClassificationResult, SubmissionFailure>,
    ) -> bool {
        let kind = match self.screen {
            Screen::Loading {
                request_id: pending,
                kind,
            } if pending == request_id => kind,
            _ => {
                triage_debug!("discarding response to request {}", request_id);
                return false;
            }
        };
        let result = match kind {
            InputKind::Text => self.text.resolve(outcome),
            InputKind::Pdf => self.pdf.resolve(outcome),
            InputKind::Txt => self.txt.resolve(outcome),
        };
        self.screen = if result.is_success() {
            triage_info!("request {} classified as {:?}", request_id, result.category);
            Screen::ResultShown(result)
        } else {
            let message = result.error.unwrap_or_default();
            triage_info!("request {} failed: {}", request_id, message);
            Screen::ErrorShown { message }
        };
        self.mark_dirty();
        true
    }

    /// Open a fresh history browser and ask for its first page of data.
    pub(crate) fn open_history(&mut self) -> Vec<Effect> {
        if self.screen != Screen::Selecting {
            return Vec::new();
        }
        self.screen = Screen::HistoryShown;
        self.history = HistoryBrowser::new();
        self.mark_dirty();

        let mut effects = vec![self.load_history()];
        let stats_id = self.next_request_id();
        self.history.begin_stats(stats_id);
        effects.push(Effect::FetchHistoryStats {
            request_id: stats_id,
        });
        effects
    }

    pub(crate) fn change_filter(&mut self, filter: CategoryFilter) -> Option<Effect> {
        if self.screen != Screen::HistoryShown || !self.history.set_filter(filter) {
            return None;
        }
        self.mark_dirty();
        Some(self.load_history())
    }

    fn load_history(&mut self) -> Effect {
        let request_id = self.next_request_id();
        self.history.begin_load(request_id);
        Effect::FetchHistory {
            request_id,
            filter: self.history.filter(),
        }
    }

    pub(crate) fn select_page(&mut self, page: usize) {
        if self.screen == Screen::HistoryShown && self.history.set_page(page) {
            self.mark_dirty();
        }
    }

    pub(crate) fn apply_history(
        &mut self,
        request_id: RequestId,
        result: Result<Vec<HistoryRecord>, String>,
    ) {
        if let Err(reason) = &result {
            triage_debug!("history request {} failed: {}", request_id, reason);
        }
        if self.history.apply_records(request_id, result) {
            self.mark_dirty();
        } else {
            triage_debug!("discarding superseded history response {}", request_id);
        }
    }

    pub(crate) fn apply_history_stats(
        &mut self,
        request_id: RequestId,
        stats: Option<HistoryStats>,
    ) {
        if self.history.apply_stats(request_id, stats) {
            self.mark_dirty();
        }
    }

    /// Leave a terminal screen: drop the result, the selection and every
    /// handler's draft.
    pub(crate) fn return_to_selecting(&mut self) -> bool {
        if !self.screen.is_terminal() {
            return false;
        }
        self.screen = Screen::Selecting;
        self.active_kind = None;
        self.text.clear();
        self.pdf.clear();
        self.txt.clear();
        self.history = HistoryBrowser::new();
        self.mark_dirty();
        true
    }
}
