//! Backend-neutral document access.
//!
//! The pipeline talks to the PDF library through these traits so the page loop
//! can be exercised against fakes and the pdfium backend stays swappable.

use crate::error::PageliftResult;
use image::DynamicImage;

/// One page of an open document. Handles are requested per page and discarded;
/// nothing retains them across the page loop.
pub trait PageHandle {
    /// The page's embedded text layer as a single string, fragments joined in
    /// reading order. Empty for pages with no text layer.
    fn embedded_text(&self) -> PageliftResult<String>;

    /// Render the page to a raster image at `scale` times its native dimensions
    fn rasterize(&self, scale: f32) -> PageliftResult<DynamicImage>;
}

/// An open document. The backing resource (pdfium document, borrowed source
/// bytes) is released when the handle drops — once, on every exit path.
pub trait DocumentHandle {
    fn page_count(&self) -> usize;

    /// Fetch a page by 1-based number in `[1, page_count]`.
    /// Out-of-range numbers fail with `PageIndex`.
    fn page(&self, number: usize) -> PageliftResult<Box<dyn PageHandle + '_>>;
}

/// Opens raw PDF bytes into a document handle.
///
/// Deliberately not required to be thread-safe: the pipeline drives one
/// document at a time on one task, and the pdfium backend is single-threaded.
pub trait DocumentLoader {
    fn open<'a>(&'a self, bytes: &'a [u8]) -> PageliftResult<Box<dyn DocumentHandle + 'a>>;
}
