//! File-format adapters for docrag.
//!
//! Uploaded files are turned into raw text here before they ever reach the
//! engine; everything downstream operates on extracted text only.

pub mod pdf;
pub mod registry;
pub mod text;

pub use pdf::PdfExtractor;
pub use registry::ExtractorRegistry;
pub use text::TextExtractor;
