use thiserror::Error;

/// Main error type for the pagelift extraction pipeline
#[derive(Error, Debug)]
pub enum PageliftError {
    #[error("Document could not be parsed: {message}")]
    DocumentParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Page {page} out of range (document has {total} pages)")]
    PageIndex { page: usize, total: usize },

    #[error("Text layer extraction failed on page {page}: {message}")]
    TextLayer { page: usize, message: String },

    #[error("Page {page} could not be rasterized: {message}")]
    RenderFailed { page: usize, message: String },

    #[error("OCR failed on page {page}: {message}")]
    Ocr {
        page: usize,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("An extraction is already in flight on this extractor")]
    Busy,

    #[error("File I/O error: {path}")]
    FileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("General error: {0}")]
    General(#[from] anyhow::Error),
}

impl PageliftError {
    /// Create a document parse error without an underlying source
    pub fn document_parse(message: impl Into<String>) -> Self {
        Self::DocumentParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create a document parse error with source
    pub fn document_parse_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::DocumentParse {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an OCR error for a page
    pub fn ocr(page: usize, message: impl Into<String>) -> Self {
        Self::Ocr {
            page,
            message: message.into(),
            source: None,
        }
    }

    /// Create a file I/O error
    pub fn file_io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::FileIo {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            PageliftError::DocumentParse { .. } => {
                "📄 This file doesn't look like a readable PDF. It might be encrypted or corrupted."
                    .to_string()
            }
            PageliftError::Ocr { page, .. } => {
                format!(
                    "🔍 OCR gave up on page {}. The scan may be too degraded to read.",
                    page
                )
            }
            PageliftError::RenderFailed { page, .. } => {
                format!("🖼️  Page {} could not be rendered for OCR.", page)
            }
            PageliftError::Busy => {
                "⏳ An extraction is already running. Wait for it to finish first.".to_string()
            }
            PageliftError::FileIo { .. } => {
                "📁 File access error. Check the path and permissions.".to_string()
            }
            _ => "Something went wrong during extraction. Check the logs for details.".to_string(),
        }
    }
}

/// Result type alias for convenience
pub type PageliftResult<T> = Result<T, PageliftError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_index_error_names_both_numbers() {
        let err = PageliftError::PageIndex { page: 7, total: 3 };
        let msg = err.to_string();
        assert!(msg.contains('7') && msg.contains('3'));
    }

    #[test]
    fn ocr_error_carries_page() {
        let err = PageliftError::ocr(2, "engine unavailable");
        assert!(matches!(err, PageliftError::Ocr { page: 2, .. }));
        assert!(err.user_message().contains("page 2"));
    }
}
