use chrono::{DateTime, Local, NaiveDateTime};
use triage_core::{
    AppViewModel, HistoryRowView, HistoryView, InputKind, InputView, ResultView, ScreenView,
};

use super::constants::{APP_TITLE, TIMESTAMP_FORMAT};

/// Render the view model as terminal lines.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();
    match &view.screen {
        ScreenView::Selecting { input: None } => {
            lines.push(heading(APP_TITLE));
            lines.push("Choose an input: `text`, `pdf` or `txt`.".to_string());
            lines.push("`history` lists processed emails.".to_string());
        }
        ScreenView::Selecting { input: Some(input) } => render_input(input, &mut lines),
        ScreenView::Loading { kind } => {
            lines.push(format!("Processing {}...", kind.label()));
        }
        ScreenView::Result(result) => render_result(result, &mut lines),
        ScreenView::Error { message } => {
            lines.push(heading("Error"));
            lines.push(message.clone());
            lines.push("Type `new` to start over.".to_string());
        }
        ScreenView::History(history) => render_history(history, &mut lines),
    }
    lines
}

fn heading(title: &str) -> String {
    format!("== {title} ==")
}

fn render_input(input: &InputView, lines: &mut Vec<String>) {
    match input.kind {
        InputKind::Text => {
            lines.push(heading("Email text"));
            match input.text.as_deref() {
                Some(text) if !text.is_empty() => {
                    lines.extend(text.lines().map(|line| format!("  {line}")));
                }
                _ => lines.push("  (empty) use `write <text>`".to_string()),
            }
        }
        InputKind::Pdf | InputKind::Txt => {
            let title = if input.kind == InputKind::Pdf {
                "PDF file"
            } else {
                "Text file"
            };
            lines.push(heading(title));
            match &input.file {
                Some(file) => lines.push(format!(
                    "  {} ({}) · {}",
                    file.name, file.size_label, file.kind_label
                )),
                None => lines.push("  No file selected; use `file <path>`".to_string()),
            }
        }
    }
    if let Some(error) = &input.error {
        lines.push(format!("! {error}"));
    }
}

fn render_result(result: &ResultView, lines: &mut Vec<String>) {
    lines.push(heading("Result"));
    if let Some(category) = result.category {
        lines.push(format!("Category: {category}"));
    }
    if let Some(confidence) = &result.confidence_label {
        lines.push(format!("Confidence: {confidence}"));
    }
    if let Some(email_type) = &result.email_type {
        lines.push(format!("Email type: {email_type}"));
    }
    if let Some(response) = &result.suggested_response {
        lines.push("Suggested response:".to_string());
        lines.extend(response.lines().map(|line| format!("  {line}")));
    }
    if let Some(id) = result.saved_id {
        lines.push(format!("Saved to history as #{id}"));
    }
    lines.push("Type `new` to process another email.".to_string());
}

fn render_history(history: &HistoryView, lines: &mut Vec<String>) {
    lines.push(heading(&format!(
        "Email history (filter: {})",
        history.filter.label()
    )));
    if let Some(stats) = history.stats {
        lines.push(format!(
            "Total {} | Produtivo {} | Improdutivo {}",
            stats.total, stats.produtivos, stats.improdutivos
        ));
    }
    if history.loading {
        lines.push("Loading...".to_string());
        return;
    }
    if let Some(error) = &history.error {
        lines.push(format!("! {error}"));
    } else if history.rows.is_empty() {
        lines.push("No emails found.".to_string());
    }
    for row in &history.rows {
        render_row(row, lines);
    }
    if history.page_count > 1 {
        lines.push(format!(
            "Page {}/{}",
            history.current_page, history.page_count
        ));
    }
    lines.push("Type `back` to return.".to_string());
}

fn render_row(row: &HistoryRowView, lines: &mut Vec<String>) {
    let mut header = format!("#{} [{}] {}", row.id, row.category, row.confidence_label);
    if let Some(email_type) = &row.email_type {
        header.push_str(&format!(" · {email_type}"));
    }
    if let Some(analyzed_at) = &row.analyzed_at {
        header.push_str(&format!(" · {}", format_timestamp(analyzed_at)));
    }
    lines.push(header);
    lines.push(format!("  Email: {}", row.text_preview));
    lines.push(format!("  Reply: {}", row.response_preview));
}

/// Service timestamps come with or without an offset; unknown shapes pass through.
fn format_timestamp(raw: &str) -> String {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return timestamp
            .with_timezone(&Local)
            .format(TIMESTAMP_FORMAT)
            .to_string();
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return naive.format(TIMESTAMP_FORMAT).to_string();
    }
    raw.to_string()
}
