use std::fmt;
use std::str::FromStr;

/// Identifier attached to every network request the core asks for.
///
/// Responses carry the id back so stale ones can be told apart.
pub type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Produtivo,
    Improdutivo,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Produtivo, Category::Improdutivo];

    pub fn label(self) -> &'static str {
        match self {
            Category::Produtivo => "Produtivo",
            Category::Improdutivo => "Improdutivo",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

/// Which slice of the history the browser asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Produtivo,
    Improdutivo,
}

impl CategoryFilter {
    /// The category a filtered fetch is issued for; `None` means every record.
    pub fn category(self) -> Option<Category> {
        match self {
            CategoryFilter::All => None,
            CategoryFilter::Produtivo => Some(Category::Produtivo),
            CategoryFilter::Improdutivo => Some(Category::Improdutivo),
        }
    }

    pub fn label(self) -> &'static str {
        match self.category() {
            Some(category) => category.label(),
            None => "All",
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        match category {
            Category::Produtivo => CategoryFilter::Produtivo,
            Category::Improdutivo => CategoryFilter::Improdutivo,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    Text,
    Pdf,
    Txt,
}

impl InputKind {
    pub fn label(self) -> &'static str {
        match self {
            InputKind::Text => "text",
            InputKind::Pdf => "PDF",
            InputKind::Txt => "text file",
        }
    }
}

/// A file the user picked, with the media type declared for it by the platform.
#[derive(Clone, PartialEq, Eq)]
pub struct FileBlob {
    pub name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl FileBlob {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

// File contents stay out of logs and assertion output.
impl fmt::Debug for FileBlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileBlob")
            .field("name", &self.name)
            .field("media_type", &self.media_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// One request to classify an email, consumed by exactly one submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Text { body: String },
    Pdf { file: FileBlob },
    Txt { file: FileBlob },
}

impl Submission {
    pub fn kind(&self) -> InputKind {
        match self {
            Submission::Text { .. } => InputKind::Text,
            Submission::Pdf { .. } => InputKind::Pdf,
            Submission::Txt { .. } => InputKind::Txt,
        }
    }

    /// Payload size in bytes, for logging.
    pub fn size(&self) -> usize {
        match self {
            Submission::Text { body } => body.len(),
            Submission::Pdf { file } | Submission::Txt { file } => file.bytes.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultStatus {
    Success,
    Error,
}

/// The service's verdict for one submission.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    pub status: ResultStatus,
    pub category: Option<Category>,
    /// In `[0, 1]`.
    pub confidence: Option<f64>,
    pub email_type: Option<String>,
    pub suggested_response: Option<String>,
    pub error: Option<String>,
    /// History id the service stored the verdict under.
    pub saved_id: Option<u64>,
}

impl ClassificationResult {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: ResultStatus::Error,
            category: None,
            confidence: None,
            email_type: None,
            suggested_response: None,
            error: Some(message.into()),
            saved_id: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ResultStatus::Success
    }
}

/// A submission that never produced a parsed verdict: transport failure or
/// a non-success response. `detail` is the human-readable message the
/// service put in its error body, if any.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmissionFailure {
    pub detail: Option<String>,
}

impl SubmissionFailure {
    pub fn with_detail(detail: impl Into<String>) -> Self {
        Self {
            detail: Some(detail.into()),
        }
    }
}

/// Stored summary of a previously classified email.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRecord {
    pub id: u64,
    pub category: Category,
    /// In `[0, 1]`.
    pub ai_confidence: f64,
    pub text_preview: String,
    pub response_preview: String,
    pub email_type: Option<String>,
    pub analyzed_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HistoryStats {
    pub total: u64,
    pub produtivos: u64,
    pub improdutivos: u64,
}
