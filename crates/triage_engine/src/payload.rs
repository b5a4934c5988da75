use std::fmt;

use reqwest::multipart::{Form, Part};

use crate::{ApiError, Endpoint, FailureKind};

const TEXT_FIELD: &str = "email_text";
const FILE_FIELD: &str = "file";
const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("file_name", &self.file_name)
            .field("media_type", &self.media_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// What gets posted to a classification endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Text { email_text: String },
    Pdf(Attachment),
    Txt(Attachment),
}

impl Payload {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Payload::Text { .. } => Endpoint::ProcessText,
            Payload::Pdf(_) => Endpoint::ProcessPdf,
            Payload::Txt(_) => Endpoint::ProcessTxt,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Payload::Text { email_text } => email_text.len(),
            Payload::Pdf(attachment) | Payload::Txt(attachment) => attachment.bytes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Single-part multipart body: the `email_text` field, or one named file.
    pub fn into_form(self) -> Result<Form, ApiError> {
        match self {
            Payload::Text { email_text } => Ok(Form::new().text(TEXT_FIELD, email_text)),
            Payload::Pdf(attachment) | Payload::Txt(attachment) => {
                Ok(Form::new().part(FILE_FIELD, file_part(attachment)?))
            }
        }
    }
}

fn file_part(attachment: Attachment) -> Result<Part, ApiError> {
    let media_type = if attachment.media_type.trim().is_empty() {
        FALLBACK_MEDIA_TYPE.to_string()
    } else {
        attachment.media_type
    };
    Part::bytes(attachment.bytes)
        .file_name(attachment.file_name)
        .mime_str(&media_type)
        .map_err(|err| ApiError::new(FailureKind::InvalidPayload, err.to_string()))
}
