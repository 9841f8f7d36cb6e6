// Public module exports for the binary crate and tests
pub mod config;
pub mod error;
pub mod events;
pub mod loader;
pub mod logging;
pub mod ocr;
pub mod pdfium_loader;
pub mod pipeline;
pub mod resolver;

pub use config::ExtractOptions;
pub use error::{PageliftError, PageliftResult};
pub use events::{ChannelSink, EventSink, ExtractionEvent, FnSink, NullSink};
pub use pipeline::PdfExtractor;
pub use resolver::{PageText, TextSource};
