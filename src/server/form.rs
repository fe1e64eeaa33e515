use crate::{
    Error, Result,
    summarizer::{DEFAULT_LANGUAGE, DEFAULT_SUMMARY_WORDS, SummaryStyle},
};
use axum::{body::Bytes, extract::Multipart};
use tracing::debug;

pub const LANGUAGES: [&str; 5] = ["English", "Spanish", "French", "German", "Italian"];
pub const ALLOWED_EXTENSIONS: [&str; 2] = ["txt", "md"];

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMethod {
    #[default]
    Paste,
    Upload,
}

impl InputMethod {
    fn parse(value: &str) -> Self {
        match value.trim() {
            "upload" => Self::Upload,
            _ => Self::Paste,
        }
    }
}

/// Where the text to summarize came from.
#[derive(Debug, Clone)]
pub enum InputSource {
    Pasted(String),
    Uploaded { filename: String, bytes: Bytes },
}

/// Browsers submit textarea newlines as CRLF while files usually carry LF.
fn normalize_newlines(text: String) -> String {
    if text.contains('\r') {
        text.replace("\r\n", "\n").replace('\r', "\n")
    } else {
        text
    }
}

impl InputSource {
    pub fn into_text(self) -> Result<String> {
        match self {
            Self::Pasted(text) => Ok(normalize_newlines(text)),
            Self::Uploaded { filename, bytes } => {
                let extension = filename
                    .rsplit_once('.')
                    .map(|(_, ext)| ext.to_ascii_lowercase())
                    .unwrap_or_default();
                if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
                    return Err(Error::invalid_input(format!(
                        "Unsupported file type for '{}'. Upload a .txt or .md file",
                        filename
                    )));
                }

                let content = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes[..]);
                String::from_utf8(content.to_vec())
                    .map(normalize_newlines)
                    .map_err(|e| Error::invalid_input(format!("Error reading file: {}", e)))
            }
        }
    }
}

/// Everything the form submitted, kept so the page can be re-rendered with
/// the user's choices.
#[derive(Debug, Clone)]
pub struct FormState {
    pub input_method: InputMethod,
    pub text: String,
    pub upload: Option<(String, Bytes)>,
    pub style: SummaryStyle,
    pub max_words: u32,
    pub language: String,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            input_method: InputMethod::Paste,
            text: String::new(),
            upload: None,
            style: SummaryStyle::default(),
            max_words: DEFAULT_SUMMARY_WORDS,
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl FormState {
    pub fn source(&self) -> Option<InputSource> {
        match self.input_method {
            InputMethod::Paste => Some(InputSource::Pasted(self.text.clone())),
            InputMethod::Upload => self
                .upload
                .as_ref()
                .map(|(filename, bytes)| InputSource::Uploaded {
                    filename: filename.clone(),
                    bytes: bytes.clone(),
                }),
        }
    }

    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| Error::invalid_input(format!("Malformed form submission: {}", e)))?
        {
            let name = field.name().unwrap_or_default().to_string();
            debug!("Reading form field: {}", name);

            match name.as_str() {
                "file" => {
                    let filename = field.file_name().unwrap_or_default().to_string();
                    let bytes = field.bytes().await.map_err(|e| {
                        Error::invalid_input(format!("Error reading file: {}", e))
                    })?;
                    // Browsers send an empty part when no file was picked
                    if !filename.is_empty() || !bytes.is_empty() {
                        form.upload = Some((filename, bytes));
                    }
                }
                other => {
                    let value = field.text().await.map_err(|e| {
                        Error::invalid_input(format!("Malformed form field '{}': {}", other, e))
                    })?;
                    form.apply(other, value)?;
                }
            }
        }

        Ok(form)
    }

    fn apply(&mut self, name: &str, value: String) -> Result<()> {
        match name {
            "input_method" => self.input_method = InputMethod::parse(&value),
            "text" => self.text = value,
            "style" => self.style = value.parse()?,
            "max_words" => {
                self.max_words = value.trim().parse().map_err(|_| {
                    Error::invalid_input(format!("Summary length must be a number, got '{}'", value))
                })?;
            }
            "language" => self.language = value,
            _ => debug!("Ignoring unknown form field: {}", name),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_upload_and_paste_give_same_text() {
        let content = "Line one of the notes.\n\nLine two, with ünïcödé.\n";
        let pasted = InputSource::Pasted(content.to_string()).into_text().unwrap();
        let uploaded = InputSource::Uploaded {
            filename: "notes.md".to_string(),
            bytes: Bytes::from(content.as_bytes().to_vec()),
        }
        .into_text()
        .unwrap();

        assert_eq!(pasted, uploaded);
    }

    #[test]
    fn test_browser_paste_matches_lf_upload() {
        let file = "# Notes\n\nFirst paragraph.\nSecond line.\n";
        let pasted = InputSource::Pasted(file.replace('\n', "\r\n"))
            .into_text()
            .unwrap();
        let uploaded = InputSource::Uploaded {
            filename: "notes.md".to_string(),
            bytes: Bytes::from_static(file.as_bytes()),
        }
        .into_text()
        .unwrap();

        assert_eq!(pasted, file);
        assert_eq!(pasted, uploaded);
        assert_eq!(pasted.chars().count(), uploaded.chars().count());
    }

    #[test]
    fn test_crlf_and_lone_cr_uploads_become_lf() {
        let text = InputSource::Uploaded {
            filename: "old-mac.txt".to_string(),
            bytes: Bytes::from_static(b"one\r\ntwo\rthree"),
        }
        .into_text()
        .unwrap();
        assert_eq!(text, "one\ntwo\nthree");
    }

    #[test]
    fn test_upload_strips_bom() {
        let mut raw = UTF8_BOM.to_vec();
        raw.extend_from_slice(b"hello");
        let text = InputSource::Uploaded {
            filename: "a.TXT".to_string(),
            bytes: Bytes::from(raw),
        }
        .into_text()
        .unwrap();
        assert_eq!(text, "hello");
    }

    #[test]
    fn test_upload_rejects_other_extensions() {
        let err = InputSource::Uploaded {
            filename: "report.pdf".to_string(),
            bytes: Bytes::from_static(b"%PDF"),
        }
        .into_text()
        .unwrap_err();
        assert!(err.to_string().contains("Unsupported file type"));
    }

    #[test]
    fn test_upload_rejects_invalid_utf8() {
        let err = InputSource::Uploaded {
            filename: "bad.txt".to_string(),
            bytes: Bytes::from_static(&[0xff, 0xfe, 0x00]),
        }
        .into_text()
        .unwrap_err();
        assert!(err.to_string().contains("Error reading file"));
    }

    #[test]
    fn test_apply_fields() {
        let mut form = FormState::default();
        form.apply("style", "Bullet Points".to_string()).unwrap();
        form.apply("max_words", "275".to_string()).unwrap();
        form.apply("language", "German".to_string()).unwrap();
        form.apply("input_method", "upload".to_string()).unwrap();

        assert_eq!(form.style, SummaryStyle::BulletPoints);
        assert_eq!(form.max_words, 275);
        assert_eq!(form.language, "German");
        assert_eq!(form.input_method, InputMethod::Upload);
        assert!(form.source().is_none());
    }

    #[test]
    fn test_apply_rejects_bad_length() {
        let mut form = FormState::default();
        assert!(form.apply("max_words", "lots".to_string()).is_err());
    }
}
