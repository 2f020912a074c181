//! The canonical resume document handed to every renderer.

use serde::{Deserialize, Serialize};

use crate::synth::merge::dedup_case_insensitive;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub name: String,
    pub title: String,
    pub email: String,
    /// External profile link (e.g. a GitHub profile).
    pub link: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skills {
    pub technical: Vec<String>,
    pub frameworks: Vec<String>,
    pub tools: Vec<String>,
    pub databases: Vec<String>,
}

impl Skills {
    pub fn is_empty(&self) -> bool {
        self.technical.is_empty()
            && self.frameworks.is_empty()
            && self.tools.is_empty()
            && self.databases.is_empty()
    }

    /// Every skill across all categories, in category order.
    pub fn all(&self) -> impl Iterator<Item = &String> {
        self.technical
            .iter()
            .chain(self.frameworks.iter())
            .chain(self.tools.iter())
            .chain(self.databases.iter())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub project_name: String,
    pub description: String,
    pub achievements: Vec<String>,
    pub technologies: Vec<String>,
    pub duration: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub highlights: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Display-only annotation: who endorsed a skill that appears in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillEndorsement {
    pub skill: String,
    pub endorsers: Vec<String>,
}

impl SkillEndorsement {
    pub fn count(&self) -> usize {
        self.endorsers.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeDocument {
    pub personal: PersonalInfo,
    pub summary: String,
    pub skills: Skills,
    pub experience: Vec<ExperienceEntry>,
    pub projects: Vec<ProjectEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub endorsements: Vec<SkillEndorsement>,
}

impl ResumeDocument {
    /// Enforce the list invariant: every string list is deduplicated
    /// case-insensitively, keeping first-seen casing and order.
    pub fn normalize(&mut self) {
        for list in [
            &mut self.skills.technical,
            &mut self.skills.frameworks,
            &mut self.skills.tools,
            &mut self.skills.databases,
        ] {
            *list = dedup_case_insensitive(list.iter());
        }
        for entry in &mut self.experience {
            entry.achievements = dedup_case_insensitive(entry.achievements.iter());
            entry.technologies = dedup_case_insensitive(entry.technologies.iter());
        }
        for project in &mut self.projects {
            project.technologies = dedup_case_insensitive(project.technologies.iter());
            project.highlights = dedup_case_insensitive(project.highlights.iter());
        }
    }

    pub fn endorsement_for(&self, skill: &str) -> Option<&SkillEndorsement> {
        self.endorsements.iter().find(|e| e.skill == skill)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_dedups_every_list() {
        let mut doc = ResumeDocument {
            skills: Skills {
                technical: vec!["Rust".into(), "rust".into(), "Go".into()],
                ..Default::default()
            },
            experience: vec![ExperienceEntry {
                achievements: vec!["Shipped".into(), "SHIPPED".into()],
                technologies: vec!["React".into(), "react".into()],
                ..Default::default()
            }],
            projects: vec![ProjectEntry {
                highlights: vec!["Fast".into(), "fast ".into(), "Simple".into()],
                ..Default::default()
            }],
            ..Default::default()
        };
        doc.normalize();
        assert_eq!(doc.skills.technical, vec!["Rust", "Go"]);
        assert_eq!(doc.experience[0].achievements, vec!["Shipped"]);
        assert_eq!(doc.experience[0].technologies, vec!["React"]);
        assert_eq!(doc.projects[0].highlights, vec!["Fast", "Simple"]);
    }
}
