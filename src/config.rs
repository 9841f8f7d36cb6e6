use crate::error::{PageliftError, PageliftResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default minimum trimmed character count for a page to count as text-bearing.
/// A page at or below this is assumed to be a scan (or noise) and goes to OCR.
pub const DEFAULT_TEXT_THRESHOLD: usize = 5;

/// Default multiplier applied to a page's native dimensions when rasterizing for OCR
pub const DEFAULT_RASTER_SCALE: f32 = 1.5;

/// Default language code handed to the OCR engine
pub const DEFAULT_OCR_LANGUAGE: &str = "eng";

/// Tuning knobs for the extraction pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Minimum trimmed-length (in chars, strictly greater-than) to skip OCR.
    /// Short real text can still trip OCR; a stray character or two can skip
    /// it. Cheap heuristic, tunable when it misroutes.
    pub text_threshold: usize,

    /// Multiplier for page rendering before OCR
    pub raster_scale: f32,

    /// Language code passed to the OCR engine
    pub ocr_language: String,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            text_threshold: DEFAULT_TEXT_THRESHOLD,
            raster_scale: DEFAULT_RASTER_SCALE,
            ocr_language: DEFAULT_OCR_LANGUAGE.to_string(),
        }
    }
}

impl ExtractOptions {
    /// Load options from a TOML file, falling back to defaults if it doesn't exist
    pub fn load_from_file(path: &Path) -> PageliftResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| PageliftError::file_io(path.to_string_lossy().to_string(), e))?;

        let options: Self = toml::from_str(&content).map_err(|e| {
            PageliftError::configuration(format!("invalid config {}: {}", path.display(), e))
        })?;

        options.validate()?;
        Ok(options)
    }

    /// Save options to a TOML file
    pub fn save_to_file(&self, path: &Path) -> PageliftResult<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| PageliftError::configuration(format!("serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| PageliftError::file_io(path.to_string_lossy().to_string(), e))
    }

    pub fn validate(&self) -> PageliftResult<()> {
        if self.raster_scale <= 0.0 || !self.raster_scale.is_finite() {
            return Err(PageliftError::configuration(format!(
                "raster_scale must be a positive number, got {}",
                self.raster_scale
            )));
        }
        if self.ocr_language.is_empty() {
            return Err(PageliftError::configuration(
                "ocr_language must not be empty",
            ));
        }
        Ok(())
    }
}
