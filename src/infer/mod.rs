//! Language and technology inference via static lookup tables.
//!
//! Everything here is pure and table-driven so the fallback path stays
//! deterministic and independent of any network service.

pub mod keywords;
pub mod languages;

pub use keywords::{
    detect_databases, detect_frameworks, detect_languages_in_text, detect_readme_technologies,
    detect_tools, Keyword,
};
pub use languages::{infer_languages, language_for_path};
