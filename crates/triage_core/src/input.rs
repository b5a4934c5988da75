//! Input handlers: one generic handler, parameterized by per-kind rules.
//!
//! Every kind follows the same path: validate locally, package a
//! [`Submission`], and map the service's answer into a [`ClassificationResult`].
//! Only the rules differ.
use std::fmt;
use std::marker::PhantomData;

use thiserror::Error;

use crate::{ClassificationResult, FileBlob, InputKind, Submission, SubmissionFailure};

pub const PDF_MEDIA_TYPE: &str = "application/pdf";
pub const TXT_MEDIA_TYPE: &str = "text/plain";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("empty input")]
    EmptyInput,
    #[error("no file selected")]
    NoFileSelected,
    #[error("wrong type: {name} is not a {expected} file")]
    WrongType { name: String, expected: &'static str },
}

/// Per-kind behaviour of an input handler.
pub trait InputRules {
    /// What the user is editing: a text buffer or an optional chosen file.
    type Draft: Clone + Default + fmt::Debug + PartialEq;

    const KIND: InputKind;
    /// Message used when a failure carries no detail of its own.
    const FAILURE_FALLBACK: &'static str;
    /// Whether a successful submission empties the draft.
    const CLEAR_ON_SUCCESS: bool;

    /// Check applied as soon as the user supplies a draft.
    fn check_selection(_draft: &Self::Draft) -> Result<(), ValidationError> {
        Ok(())
    }

    /// Validate the draft and turn it into a submission.
    fn package(draft: &Self::Draft) -> Result<Submission, ValidationError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRules;

impl InputRules for TextRules {
    type Draft = String;

    const KIND: InputKind = InputKind::Text;
    const FAILURE_FALLBACK: &'static str = "error processing email";
    const CLEAR_ON_SUCCESS: bool = true;

    fn package(draft: &String) -> Result<Submission, ValidationError> {
        if draft.trim().is_empty() {
            return Err(ValidationError::EmptyInput);
        }
        Ok(Submission::Text {
            body: draft.clone(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PdfRules;

impl InputRules for PdfRules {
    type Draft = Option<FileBlob>;

    const KIND: InputKind = InputKind::Pdf;
    const FAILURE_FALLBACK: &'static str = "error processing PDF";
    const CLEAR_ON_SUCCESS: bool = false;

    fn check_selection(draft: &Option<FileBlob>) -> Result<(), ValidationError> {
        match draft {
            Some(file) if file.media_type != PDF_MEDIA_TYPE => Err(ValidationError::WrongType {
                name: file.name.clone(),
                expected: "PDF",
            }),
            _ => Ok(()),
        }
    }

    fn package(draft: &Option<FileBlob>) -> Result<Submission, ValidationError> {
        Self::check_selection(draft)?;
        let file = draft.clone().ok_or(ValidationError::NoFileSelected)?;
        Ok(Submission::Pdf { file })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxtRules;

impl TxtRules {
    /// Media type or extension is enough; platforms disagree on what they
    /// declare for plain text files.
    pub fn accepts(file: &FileBlob) -> bool {
        file.media_type == TXT_MEDIA_TYPE || file.name.to_lowercase().ends_with(".txt")
    }
}

impl InputRules for TxtRules {
    type Draft = Option<FileBlob>;

    const KIND: InputKind = InputKind::Txt;
    const FAILURE_FALLBACK: &'static str = "error processing TXT file";
    const CLEAR_ON_SUCCESS: bool = false;

    fn check_selection(draft: &Option<FileBlob>) -> Result<(), ValidationError> {
        match draft {
            Some(file) if !Self::accepts(file) => Err(ValidationError::WrongType {
                name: file.name.clone(),
                expected: "TXT",
            }),
            _ => Ok(()),
        }
    }

    fn package(draft: &Option<FileBlob>) -> Result<Submission, ValidationError> {
        Self::check_selection(draft)?;
        let file = draft.clone().ok_or(ValidationError::NoFileSelected)?;
        Ok(Submission::Txt { file })
    }
}

/// Local state of one input handler: the draft and its inline error.
#[derive(Debug, Clone, PartialEq)]
pub struct InputHandler<R: InputRules> {
    draft: R::Draft,
    error: Option<String>,
    _rules: PhantomData<R>,
}

impl<R: InputRules> Default for InputHandler<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: InputRules> InputHandler<R> {
    pub fn new() -> Self {
        Self {
            draft: R::Draft::default(),
            error: None,
            _rules: PhantomData,
        }
    }

    pub fn kind(&self) -> InputKind {
        R::KIND
    }

    pub fn draft(&self) -> &R::Draft {
        &self.draft
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Replace the draft. A draft that fails the selection check is not kept
    /// and also drops whatever was chosen before.
    pub fn set_draft(&mut self, draft: R::Draft) -> Result<(), ValidationError> {
        match R::check_selection(&draft) {
            Ok(()) => {
                self.draft = draft;
                self.error = None;
                Ok(())
            }
            Err(err) => {
                self.draft = R::Draft::default();
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Validate the current draft and package it. On failure the draft is
    /// kept, except that a type mismatch clears the chosen file.
    pub fn prepare(&mut self) -> Result<Submission, ValidationError> {
        match R::package(&self.draft) {
            Ok(submission) => {
                self.error = None;
                Ok(submission)
            }
            Err(err) => {
                if matches!(err, ValidationError::WrongType { .. }) {
                    self.draft = R::Draft::default();
                }
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Map the answer to a submitted draft into the result shown upstream.
    pub fn resolve(
        &mut self,
        outcome: Result<ClassificationResult, SubmissionFailure>,
    ) -> ClassificationResult {
        match outcome {
            Ok(result) if result.is_success() => {
                self.error = None;
                if R::CLEAR_ON_SUCCESS {
                    self.draft = R::Draft::default();
                }
                result
            }
            Ok(result) => {
                let message = non_empty(result.error.clone())
                    .unwrap_or_else(|| R::FAILURE_FALLBACK.to_string());
                self.error = Some(message.clone());
                ClassificationResult {
                    error: Some(message),
                    ..result
                }
            }
            Err(failure) => {
                let message =
                    non_empty(failure.detail).unwrap_or_else(|| R::FAILURE_FALLBACK.to_string());
                self.error = Some(message.clone());
                ClassificationResult::failure(message)
            }
        }
    }

    pub fn clear(&mut self) {
        self.draft = R::Draft::default();
        self.error = None;
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }
}

fn non_empty(message: Option<String>) -> Option<String> {
    message.filter(|text| !text.trim().is_empty())
}
