//! Shared helpers: encoding-tolerant file reads and path normalization.

pub mod encoding;
pub mod paths;

pub use encoding::{is_binary_file, read_file_safe, DEFAULT_SAMPLE_SIZE};
pub use paths::{normalize_path, relative_display};
