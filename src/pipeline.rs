use crate::config::ExtractOptions;
use crate::error::{PageliftError, PageliftResult};
use crate::events::{EventSink, ExtractionEvent};
use crate::loader::DocumentLoader;
use crate::logging::PerformanceTimer;
use crate::ocr::{OcrEngine, TesseractOcr};
use crate::pdfium_loader::PdfiumLoader;
use crate::resolver::resolve_page;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tracing::info;

/// Drives the page-by-page extraction loop over a document loader and an OCR
/// engine.
///
/// One extraction at a time per instance: the OCR engine and the raster path
/// are a shared resource, and output order must equal page order, so pages are
/// processed strictly sequentially and overlapping `extract` calls are
/// rejected with [`PageliftError::Busy`].
pub struct PdfExtractor<L, O> {
    loader: L,
    ocr: O,
    options: ExtractOptions,
    processing: AtomicBool,
    text: Mutex<String>,
}

impl PdfExtractor<PdfiumLoader, TesseractOcr> {
    /// Production extractor: pdfium document loader + tesseract OCR
    pub fn with_defaults(options: ExtractOptions) -> PageliftResult<Self> {
        options.validate()?;
        Ok(Self::new(PdfiumLoader::new()?, TesseractOcr::new(), options))
    }
}

impl<L: DocumentLoader, O: OcrEngine> PdfExtractor<L, O> {
    pub fn new(loader: L, ocr: O, options: ExtractOptions) -> Self {
        Self {
            loader,
            ocr,
            options,
            processing: AtomicBool::new(false),
            text: Mutex::new(String::new()),
        }
    }

    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// True strictly between extraction start and end, success or failure.
    /// UI feedback only, no correctness contract.
    pub fn is_processing(&self) -> bool {
        self.processing.load(Ordering::SeqCst)
    }

    /// Text of the last successful extraction, empty before the first one
    pub fn text(&self) -> String {
        self.text
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Read a PDF from disk and extract it
    pub async fn extract_file(&self, path: &Path, sink: &dyn EventSink) -> PageliftResult<String> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| PageliftError::file_io(path.to_string_lossy().to_string(), e))?;

        self.run(&bytes, Some(path), sink).await
    }

    /// Extract a PDF already held in memory
    pub async fn extract_bytes(&self, bytes: &[u8], sink: &dyn EventSink) -> PageliftResult<String> {
        self.run(bytes, None, sink).await
    }

    async fn run(
        &self,
        bytes: &[u8],
        source: Option<&Path>,
        sink: &dyn EventSink,
    ) -> PageliftResult<String> {
        self.processing
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| PageliftError::Busy)?;
        let _processing = ProcessingGuard(&self.processing);
        let _timer = PerformanceTimer::start("pdf extraction");

        // The handle is dropped on every exit from this scope, releasing the
        // backing pdfium document exactly once.
        let document = self.loader.open(bytes)?;
        let total_pages = document.page_count();
        info!(total_pages, "📄 Extracting document");

        let mut full_text = String::new();
        for number in 1..=total_pages {
            let page = document.page(number)?;
            let resolved = resolve_page(page.as_ref(), number, &self.ocr, &self.options)?;
            full_text.push_str(&resolved.section());

            sink.emit(ExtractionEvent::Progress {
                current_page: number,
                total_pages,
            });
        }
        drop(document);

        *self
            .text
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = full_text.clone();

        sink.emit(ExtractionEvent::Data {
            text: full_text.clone(),
            source: source.map(Path::to_path_buf),
        });

        info!(total_pages, chars = full_text.len(), "✅ Extraction complete");
        Ok(full_text)
    }
}

/// Clears the processing flag on every exit path
struct ProcessingGuard<'a>(&'a AtomicBool);

impl Drop for ProcessingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
