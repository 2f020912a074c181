//! Core data model shared by every pipeline stage.

pub mod commit;
pub mod config;
pub mod project;
pub mod resume;

pub use commit::{format_duration_label, CommitRecord, DateRange, RepositorySnapshot};
pub use config::{Config, LlmConfig, OutputFormat, Style};
pub use project::{Manifest, ProjectMetadata, ReadmeInfo};
pub use resume::{
    ExperienceEntry, PersonalInfo, ProjectEntry, ResumeDocument, SkillEndorsement, Skills,
};
