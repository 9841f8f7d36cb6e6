use crate::error::{PageliftError, PageliftResult};
use crate::loader::{DocumentHandle, DocumentLoader, PageHandle};
use image::DynamicImage;
use pdfium_render::prelude::*;

/// Production document loader backed by pdfium-render.
///
/// Binds to a pdfium library next to the executable first, then the system
/// library, mirroring how the native extractor has always located it.
pub struct PdfiumLoader {
    pdfium: Pdfium,
}

impl PdfiumLoader {
    pub fn new() -> PageliftResult<Self> {
        let pdfium = Pdfium::new(
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
                .or_else(|_| Pdfium::bind_to_system_library())
                .map_err(|e| {
                    PageliftError::configuration(format!("failed to initialize PDFium: {}", e))
                })?,
        );

        Ok(Self { pdfium })
    }
}

impl DocumentLoader for PdfiumLoader {
    fn open<'a>(&'a self, bytes: &'a [u8]) -> PageliftResult<Box<dyn DocumentHandle + 'a>> {
        let document = self
            .pdfium
            .load_pdf_from_byte_slice(bytes, None)
            .map_err(|e| {
                PageliftError::document_parse_with_source("failed to open PDF", e)
            })?;

        Ok(Box::new(PdfiumDocument { document }))
    }
}

struct PdfiumDocument<'a> {
    document: PdfDocument<'a>,
}

impl DocumentHandle for PdfiumDocument<'_> {
    fn page_count(&self) -> usize {
        self.document.pages().len() as usize
    }

    fn page(&self, number: usize) -> PageliftResult<Box<dyn PageHandle + '_>> {
        let total = self.page_count();
        if number == 0 || number > total {
            return Err(PageliftError::PageIndex {
                page: number,
                total,
            });
        }

        // 1-based API, 0-based pdfium index
        let page = self
            .document
            .pages()
            .get((number - 1) as u16)
            .map_err(|_| PageliftError::PageIndex {
                page: number,
                total,
            })?;

        Ok(Box::new(PdfiumPage { page, number }))
    }
}

struct PdfiumPage<'a> {
    page: PdfPage<'a>,
    number: usize,
}

impl PageHandle for PdfiumPage<'_> {
    fn embedded_text(&self) -> PageliftResult<String> {
        let text = self
            .page
            .text()
            .map_err(|e| PageliftError::TextLayer {
                page: self.number,
                message: e.to_string(),
            })?
            .all();

        Ok(text)
    }

    fn rasterize(&self, scale: f32) -> PageliftResult<DynamicImage> {
        let target_width = (self.page.width().value * scale).round() as i32;
        let target_height = (self.page.height().value * scale).round() as i32;

        let render_config = PdfRenderConfig::new()
            .set_target_width(target_width)
            .set_target_height(target_height)
            .rotate_if_landscape(PdfPageRenderRotation::None, false);

        let bitmap = self
            .page
            .render_with_config(&render_config)
            .map_err(|e| PageliftError::RenderFailed {
                page: self.number,
                message: e.to_string(),
            })?;

        Ok(bitmap.as_image())
    }
}
