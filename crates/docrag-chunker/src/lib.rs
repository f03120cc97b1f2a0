//! Fragment segmentation for docrag.

pub mod word;

pub use word::WordChunker;
