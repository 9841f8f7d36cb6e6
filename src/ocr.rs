//! OCR engine abstraction and the tesseract-backed default.

use anyhow::{anyhow, Result};
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;

/// Recognizes text in a rasterized page image.
///
/// Engines are treated as a shared, non-reentrant resource: the pipeline runs
/// one recognition at a time and never calls an engine concurrently.
pub trait OcrEngine: Send + Sync {
    fn recognize(&self, image: &DynamicImage, language: &str) -> Result<String>;
}

/// Tesseract-backed OCR. A fresh tesseract instance is set up per call since
/// the builder API consumes itself through the recognize chain.
pub struct TesseractOcr {
    /// Explicit tessdata directory, None for the system default
    datapath: Option<String>,
}

impl TesseractOcr {
    pub fn new() -> Self {
        Self { datapath: None }
    }

    pub fn with_datapath(datapath: impl Into<String>) -> Self {
        Self {
            datapath: Some(datapath.into()),
        }
    }
}

impl Default for TesseractOcr {
    fn default() -> Self {
        Self::new()
    }
}

impl OcrEngine for TesseractOcr {
    fn recognize(&self, image: &DynamicImage, language: &str) -> Result<String> {
        let mut png = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|e| anyhow!("PNG encode for OCR: {}", e))?;

        let text = tesseract::Tesseract::new(self.datapath.as_deref(), Some(language))
            .map_err(|e| anyhow!("Tesseract init: {}", e))?
            .set_image_from_mem(&png)
            .map_err(|e| anyhow!("Tesseract image: {}", e))?
            .recognize()
            .map_err(|e| anyhow!("Tesseract recognize: {}", e))?
            .get_text()
            .map_err(|e| anyhow!("OCR text: {}", e))?;

        Ok(text)
    }
}
