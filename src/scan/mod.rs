//! Project file enumeration with gitignore support and injectable exclusion rules.

pub mod census;
pub mod rules;
pub mod scanner;

pub use census::{census_project, FileCensus};
pub use rules::{ScanRule, ScanRules};
pub use scanner::{ProjectScanner, ScanStats, ScannedFile};
