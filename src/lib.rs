//! repo-resume: turn a local git repository into a structured resume document
//!
//! The pipeline extracts a bounded commit window, infers technologies, reads the
//! project manifest and README, optionally asks a text-generation service for
//! prose, and merges everything into one canonical [`domain::ResumeDocument`]
//! that the renderers turn into HTML, Markdown, or JSON.

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod fetch;
pub mod history;
pub mod infer;
pub mod llm;
pub mod pipeline;
pub mod project;
pub mod render;
pub mod scan;
pub mod store;
pub mod synth;
pub mod utils;
