use crate::config::ExtractOptions;
use crate::error::{PageliftError, PageliftResult};
use crate::loader::PageHandle;
use crate::ocr::OcrEngine;
use serde::Serialize;
use tracing::debug;

/// Which path produced a page's text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextSource {
    Embedded,
    Ocr,
}

/// Resolved text for one page
#[derive(Debug, Clone)]
pub struct PageText {
    pub number: usize,
    pub text: String,
    pub source: TextSource,
}

impl PageText {
    /// Render this page's tagged section of the final output
    pub fn section(&self) -> String {
        match self.source {
            TextSource::Embedded => format!("\nPage {}:\n{}", self.number, self.text),
            TextSource::Ocr => format!("\nPage {} (OCR):\n{}", self.number, self.text),
        }
    }
}

/// Decide whether a page's embedded text layer is usable and produce its text
/// either way.
///
/// A page whose trimmed text layer is longer than `text_threshold` characters
/// is text-bearing and never touches OCR. Anything at or below the threshold
/// (whitespace, a stray page number, no text layer at all) is treated as a
/// scan: rasterize at `raster_scale` times native size and hand the image to
/// the OCR engine. The raster buffer is dropped as soon as recognition ends.
pub fn resolve_page(
    page: &dyn PageHandle,
    number: usize,
    ocr: &dyn OcrEngine,
    options: &ExtractOptions,
) -> PageliftResult<PageText> {
    let embedded = page.embedded_text()?;

    if embedded.trim().chars().count() > options.text_threshold {
        debug!(page = number, "using embedded text layer");
        return Ok(PageText {
            number,
            text: embedded,
            source: TextSource::Embedded,
        });
    }

    debug!(
        page = number,
        scale = options.raster_scale,
        language = %options.ocr_language,
        "text layer empty or near-empty, running OCR"
    );

    let raster = page.rasterize(options.raster_scale)?;
    let text = ocr
        .recognize(&raster, &options.ocr_language)
        .map_err(|e| PageliftError::Ocr {
            page: number,
            message: e.to_string(),
            source: Some(e.into()),
        })?;

    Ok(PageText {
        number,
        text,
        source: TextSource::Ocr,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Result};
    use image::DynamicImage;
    use std::cell::Cell;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct FakePage {
        text: &'static str,
        rasterized_at: Cell<Option<f32>>,
    }

    impl FakePage {
        fn new(text: &'static str) -> Self {
            Self {
                text,
                rasterized_at: Cell::new(None),
            }
        }
    }

    impl PageHandle for FakePage {
        fn embedded_text(&self) -> PageliftResult<String> {
            Ok(self.text.to_string())
        }

        fn rasterize(&self, scale: f32) -> PageliftResult<DynamicImage> {
            self.rasterized_at.set(Some(scale));
            Ok(DynamicImage::new_rgba8(2, 2))
        }
    }

    struct FakeOcr {
        reply: &'static str,
        invoked: AtomicBool,
    }

    impl FakeOcr {
        fn new(reply: &'static str) -> Self {
            Self {
                reply,
                invoked: AtomicBool::new(false),
            }
        }
    }

    impl OcrEngine for FakeOcr {
        fn recognize(&self, _image: &DynamicImage, _language: &str) -> Result<String> {
            self.invoked.store(true, Ordering::SeqCst);
            Ok(self.reply.to_string())
        }
    }

    struct FailingOcr;

    impl OcrEngine for FailingOcr {
        fn recognize(&self, _image: &DynamicImage, _language: &str) -> Result<String> {
            Err(anyhow!("engine crashed"))
        }
    }

    #[test]
    fn text_bearing_page_skips_ocr() {
        let page = FakePage::new("Hello World");
        let ocr = FakeOcr::new("should not appear");

        let resolved = resolve_page(&page, 1, &ocr, &ExtractOptions::default()).unwrap();

        assert_eq!(resolved.source, TextSource::Embedded);
        assert_eq!(resolved.text, "Hello World");
        assert!(!ocr.invoked.load(Ordering::SeqCst));
        assert!(page.rasterized_at.get().is_none());
    }

    #[test]
    fn near_empty_page_goes_to_ocr_at_configured_scale() {
        let page = FakePage::new("   \n 7 ");
        let ocr = FakeOcr::new("Scanned Content");

        let resolved = resolve_page(&page, 3, &ocr, &ExtractOptions::default()).unwrap();

        assert_eq!(resolved.source, TextSource::Ocr);
        assert_eq!(resolved.text, "Scanned Content");
        assert!(ocr.invoked.load(Ordering::SeqCst));
        assert_eq!(page.rasterized_at.get(), Some(1.5));
    }

    #[test]
    fn threshold_is_strictly_greater_than() {
        // exactly 5 trimmed chars: not enough, OCR runs
        let at_threshold = FakePage::new(" 12345 ");
        let ocr = FakeOcr::new("ocr");
        let resolved = resolve_page(&at_threshold, 1, &ocr, &ExtractOptions::default()).unwrap();
        assert_eq!(resolved.source, TextSource::Ocr);

        // six trimmed chars: text-bearing
        let over_threshold = FakePage::new(" 123456 ");
        let ocr = FakeOcr::new("ocr");
        let resolved = resolve_page(&over_threshold, 1, &ocr, &ExtractOptions::default()).unwrap();
        assert_eq!(resolved.source, TextSource::Embedded);
    }

    #[test]
    fn threshold_counts_chars_not_bytes() {
        // six characters, far more than six bytes
        let page = FakePage::new("наклад");
        let ocr = FakeOcr::new("ocr");
        let resolved = resolve_page(&page, 1, &ocr, &ExtractOptions::default()).unwrap();
        assert_eq!(resolved.source, TextSource::Embedded);
    }

    #[test]
    fn ocr_failure_carries_page_number() {
        let page = FakePage::new("");
        let err = resolve_page(&page, 2, &FailingOcr, &ExtractOptions::default()).unwrap_err();
        assert!(matches!(err, PageliftError::Ocr { page: 2, .. }));
    }

    #[test]
    fn sections_are_tagged_by_source() {
        let embedded = PageText {
            number: 1,
            text: "Hello World".to_string(),
            source: TextSource::Embedded,
        };
        assert_eq!(embedded.section(), "\nPage 1:\nHello World");

        let ocr = PageText {
            number: 2,
            text: "Scanned Content".to_string(),
            source: TextSource::Ocr,
        };
        assert_eq!(ocr.section(), "\nPage 2 (OCR):\nScanned Content");
    }
}
