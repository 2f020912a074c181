//! Content synthesis: signals, optional generated text, and optional imported
//! profile data combined into one [`ResumeDocument`].
//!
//! The mode (assisted or fallback) is chosen once per run by whether a
//! [`TextGenerator`] is present. In assisted mode each of the four sections is
//! requested independently, and any call error or shape failure demotes only
//! that section to its deterministic fallback.

use tracing::{debug, info, warn};

use crate::domain::{ExperienceEntry, PersonalInfo, ProjectEntry, ResumeDocument, Skills};
use crate::fetch::{ImportedProfile, ProfileSource};
use crate::llm::TextGenerator;
use crate::store::EndorsementTable;

pub mod context;
pub mod extract;
pub mod fallback;
pub mod merge;
pub mod prompts;

pub use context::SynthesisContext;
pub use merge::{merge_skills, parse_user_skills, SkillSignals};

/// Where a section's content came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionSource {
    Assisted,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSources {
    pub summary: SectionSource,
    pub skills: SectionSource,
    pub experience: SectionSource,
    pub projects: SectionSource,
}

impl SectionSources {
    pub fn all(source: SectionSource) -> Self {
        Self { summary: source, skills: source, experience: source, projects: source }
    }

    pub fn assisted_count(&self) -> usize {
        [self.summary, self.skills, self.experience, self.projects]
            .iter()
            .filter(|s| **s == SectionSource::Assisted)
            .count()
    }
}

/// Everything the synthesizer needs beyond its collaborators.
#[derive(Debug, Clone, Default)]
pub struct SynthesisRequest {
    pub context: SynthesisContext,
    /// Personal info after explicit input, config, and git identity defaults.
    pub personal: PersonalInfo,
    pub user_skills: Vec<String>,
    /// Profile handle to import, if any.
    pub import_handle: Option<String>,
    pub endorsements: EndorsementTable,
}

#[derive(Debug, Clone)]
pub struct SynthesisOutcome {
    pub document: ResumeDocument,
    pub sources: SectionSources,
    /// Normalized handle of a successful profile import.
    pub imported_handle: Option<String>,
}

/// The single synthesizer. Both collaborators are optional.
#[derive(Default, Clone, Copy)]
pub struct ContentSynthesizer<'a> {
    generator: Option<&'a dyn TextGenerator>,
    profiles: Option<&'a dyn ProfileSource>,
}

impl<'a> ContentSynthesizer<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_generator(mut self, generator: &'a dyn TextGenerator) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn with_profile_source(mut self, profiles: &'a dyn ProfileSource) -> Self {
        self.profiles = Some(profiles);
        self
    }

    pub fn is_assisted(&self) -> bool {
        self.generator.is_some()
    }

    pub async fn synthesize(&self, request: SynthesisRequest) -> SynthesisOutcome {
        let ctx = &request.context;
        let (summary, skills, experience, projects) = match self.generator {
            Some(generator) => {
                info!("Synthesizing with {}", generator.name());
                self.assisted_sections(generator, ctx).await
            }
            None => {
                info!("No text generator configured; using fallback synthesis");
                (
                    (fallback::summary(ctx), SectionSource::Fallback),
                    (fallback::skills(ctx), SectionSource::Fallback),
                    (vec![fallback::experience(ctx)], SectionSource::Fallback),
                    (vec![fallback::project(ctx)], SectionSource::Fallback),
                )
            }
        };

        let sources = SectionSources {
            summary: summary.1,
            skills: skills.1,
            experience: experience.1,
            projects: projects.1,
        };

        let signals = SkillSignals {
            languages: ctx.languages.clone(),
            frameworks: ctx.frameworks.clone(),
            databases: ctx.databases.clone(),
            tools: ctx.tools.clone(),
            readme_technologies: ctx.readme_technologies.clone(),
            readme_features: ctx.readme_features.clone(),
            user_skills: request.user_skills.clone(),
        };

        let mut document = ResumeDocument {
            personal: request.personal.clone(),
            summary: summary.0,
            skills: merge_skills(skills.0, &signals),
            experience: experience.0,
            projects: projects.0,
            endorsements: Vec::new(),
        };

        let imported_handle = match self.import_profile(request.import_handle.as_deref()).await {
            Some((handle, profile)) => {
                merge::apply_profile_import(&mut document, &profile);
                Some(handle)
            }
            None => None,
        };

        merge::attach_endorsements(&mut document, &request.endorsements);
        document.normalize();

        debug!("Synthesis complete: {} of 4 sections assisted", sources.assisted_count());
        SynthesisOutcome { document, sources, imported_handle }
    }

    async fn assisted_sections(
        &self,
        generator: &dyn TextGenerator,
        ctx: &SynthesisContext,
    ) -> (
        (String, SectionSource),
        (Skills, SectionSource),
        (Vec<ExperienceEntry>, SectionSource),
        (Vec<ProjectEntry>, SectionSource),
    ) {
        let text = ctx.render();
        let summary_prompt = prompts::summary_prompt(&text);
        let skills_prompt = prompts::skills_prompt(&text);
        let experience_prompt = prompts::experience_prompt(&text);
        let projects_prompt = prompts::projects_prompt(&text);

        let (summary, skills, experience, projects) = tokio::join!(
            generator.generate(&summary_prompt),
            generator.generate(&skills_prompt),
            generator.generate(&experience_prompt),
            generator.generate(&projects_prompt),
        );

        (
            section("summary", summary, extract::parse_summary, || fallback::summary(ctx)),
            section("skills", skills, extract::parse_skills, || fallback::skills(ctx)),
            section("experience", experience, extract::parse_experience, || {
                vec![fallback::experience(ctx)]
            }),
            section("projects", projects, extract::parse_projects, || {
                vec![fallback::project(ctx)]
            }),
        )
    }

    async fn import_profile(&self, handle: Option<&str>) -> Option<(String, ImportedProfile)> {
        let handle = handle.map(str::trim).filter(|h| !h.is_empty())?;
        let Some(profiles) = self.profiles else {
            debug!("Profile handle {} given but no profile source configured", handle);
            return None;
        };
        let normalized = match crate::fetch::profile::normalize_handle(handle) {
            Ok(normalized) => normalized,
            Err(e) => {
                warn!("Skipping profile import: {}", e);
                return None;
            }
        };
        match profiles.fetch_profile(&normalized).await {
            Ok(profile) => {
                info!(
                    "Imported profile {} ({} repositories)",
                    normalized,
                    profile.repositories.len()
                );
                Some((normalized, profile))
            }
            Err(e) => {
                warn!("Profile import for {} failed: {}", normalized, e);
                None
            }
        }
    }
}

/// Parse one assisted response, or fall back for that section alone.
fn section<T>(
    name: &str,
    response: Result<String, crate::llm::LlmError>,
    parse: impl FnOnce(&str) -> Option<T>,
    fallback: impl FnOnce() -> T,
) -> (T, SectionSource) {
    match response {
        Ok(text) => match parse(&text) {
            Some(value) => (value, SectionSource::Assisted),
            None => {
                warn!("Unusable {} response; using fallback", name);
                (fallback(), SectionSource::Fallback)
            }
        },
        Err(e) => {
            warn!("Generating {} failed: {}; using fallback", name, e);
            (fallback(), SectionSource::Fallback)
        }
    }
}
