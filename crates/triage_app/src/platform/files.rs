use std::fs;
use std::io;
use std::path::Path;

use triage_core::FileBlob;

/// The media type a file picker would declare for `path`, judged by extension.
pub fn declared_media_type(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match extension.as_str() {
        "pdf" => "application/pdf",
        "txt" | "text" => "text/plain",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "htm" | "html" => "text/html",
        "json" => "application/json",
        "eml" => "message/rfc822",
        _ => "application/octet-stream",
    }
}

/// Read a file into a blob named after its last path component.
pub fn load_file(path: &Path) -> io::Result<FileBlob> {
    let bytes = fs::read(path)?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(FileBlob::new(name, declared_media_type(path), bytes))
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn media_type_follows_extension_case_insensitively() {
        assert_eq!(declared_media_type(Path::new("a/report.PDF")), "application/pdf");
        assert_eq!(declared_media_type(Path::new("mail.txt")), "text/plain");
        assert_eq!(
            declared_media_type(Path::new("letter.docx")),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        );
        assert_eq!(
            declared_media_type(Path::new("README")),
            "application/octet-stream"
        );
    }

    #[test]
    fn loaded_file_carries_name_and_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path: PathBuf = dir.path().join("mail.txt");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(b"Hello team").unwrap();

        let blob = load_file(&path).unwrap();
        assert_eq!(blob.name, "mail.txt");
        assert_eq!(blob.media_type, "text/plain");
        assert_eq!(blob.bytes, b"Hello team");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_file(&dir.path().join("nope.pdf")).is_err());
    }
}
