use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputKindSelected(kind) => {
            state.select_input_kind(kind);
            Vec::new()
        }
        Msg::TextEdited(text) => {
            state.edit_text(text);
            Vec::new()
        }
        Msg::FileChosen(file) => {
            state.choose_file(file);
            Vec::new()
        }
        Msg::InputCleared => {
            state.clear_input();
            Vec::new()
        }
        Msg::InlineErrorDismissed => {
            state.dismiss_inline_error();
            Vec::new()
        }
        Msg::SubmitClicked => state.begin_submission().into_iter().collect(),
        Msg::SubmissionCompleted {
            request_id,
            outcome,
        } => {
            state.resolve_submission(request_id, outcome);
            Vec::new()
        }
        Msg::HistoryRequested => state.open_history(),
        Msg::FilterChanged(filter) => state.change_filter(filter).into_iter().collect(),
        Msg::PageSelected(page) => {
            state.select_page(page);
            Vec::new()
        }
        Msg::HistoryLoaded { request_id, result } => {
            state.apply_history(request_id, result);
            Vec::new()
        }
        Msg::HistoryStatsLoaded { request_id, stats } => {
            state.apply_history_stats(request_id, stats);
            Vec::new()
        }
        Msg::BackToSelection => {
            state.return_to_selecting();
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
