//! Precedence and deduplication rules for combining signals into one document.

use std::collections::HashSet;

use crate::domain::{PersonalInfo, ProjectEntry, ResumeDocument, SkillEndorsement, Skills};
use crate::fetch::profile::ImportedProfile;
use crate::store::EndorsementTable;

/// Insertion-ordered string set keyed case-insensitively.
///
/// Values are trimmed and empty values are ignored. The first casing seen wins.
#[derive(Debug, Clone, Default)]
pub struct OrderedSet {
    items: Vec<String>,
    seen: HashSet<String>,
}

impl OrderedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value; returns `true` if it was not already present.
    pub fn insert(&mut self, value: impl AsRef<str>) -> bool {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return false;
        }
        if self.seen.insert(trimmed.to_lowercase()) {
            self.items.push(trimmed.to_string());
            true
        } else {
            false
        }
    }

    pub fn extend<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for value in values {
            self.insert(value);
        }
    }

    pub fn contains(&self, value: &str) -> bool {
        self.seen.contains(&value.trim().to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.items
    }
}

pub fn dedup_case_insensitive<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut set = OrderedSet::new();
    set.extend(values);
    set.into_vec()
}

/// Order-preserving, case-insensitive union of several lists.
pub fn union_lists(lists: &[&[String]]) -> Vec<String> {
    let mut set = OrderedSet::new();
    for list in lists {
        set.extend(list.iter());
    }
    set.into_vec()
}

/// Split free-form user skill text on commas.
pub fn parse_user_skills(text: &str) -> Vec<String> {
    dedup_case_insensitive(text.split(','))
}

/// Deterministic signals unioned into the skill lists regardless of mode.
#[derive(Debug, Clone, Default)]
pub struct SkillSignals {
    pub languages: Vec<String>,
    pub frameworks: Vec<String>,
    pub databases: Vec<String>,
    pub tools: Vec<String>,
    pub readme_technologies: Vec<String>,
    pub readme_features: Vec<String>,
    pub user_skills: Vec<String>,
}

/// Union synthesized skills with every deterministic signal.
///
/// Technical skills take the synthesized list first, then languages,
/// frameworks, datastores, README technologies, README features, and finally
/// user-entered skills. The categorized lists additionally absorb their own
/// inferred signals.
pub fn merge_skills(synthesized: Skills, signals: &SkillSignals) -> Skills {
    let technical = union_lists(&[
        &synthesized.technical,
        &signals.languages,
        &signals.frameworks,
        &signals.databases,
        &signals.readme_technologies,
        &signals.readme_features,
        &signals.user_skills,
    ]);
    Skills {
        technical,
        frameworks: union_lists(&[&synthesized.frameworks, &signals.frameworks]),
        tools: union_lists(&[&synthesized.tools, &signals.tools]),
        databases: union_lists(&[&synthesized.databases, &signals.databases]),
    }
}

fn fill_if_empty(field: &mut String, value: Option<&str>) {
    if !field.trim().is_empty() {
        return;
    }
    if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
        *field = value.to_string();
    }
}

/// Personal-info precedence: an imported profile only fills fields that are
/// still empty after explicit input and defaults.
pub fn fill_personal_info(personal: &mut PersonalInfo, profile: &ImportedProfile) {
    fill_if_empty(&mut personal.name, profile.name.as_deref());
    fill_if_empty(&mut personal.email, profile.email.as_deref());
    fill_if_empty(&mut personal.link, profile.link.as_deref());
}

/// Merge an imported profile into the document: personal-info fill, language
/// union into technical skills, repositories appended as extra projects.
pub fn apply_profile_import(doc: &mut ResumeDocument, profile: &ImportedProfile) {
    fill_personal_info(&mut doc.personal, profile);

    doc.skills.technical = union_lists(&[&doc.skills.technical, &profile.languages]);

    for repo in &profile.repositories {
        doc.projects.push(ProjectEntry {
            name: repo.name.clone(),
            description: repo.description.clone(),
            technologies: repo.language.iter().cloned().collect(),
            highlights: Vec::new(),
            link: Some(repo.link.clone()).filter(|l| !l.is_empty()),
        });
    }
}

/// Annotate skills present in the document with their endorsers.
///
/// Lookup is exact (case-sensitive) against the table keys; the skill lists
/// themselves are left untouched.
pub fn attach_endorsements(doc: &mut ResumeDocument, table: &EndorsementTable) {
    let mut annotated = Vec::new();
    let mut seen = HashSet::new();
    for skill in doc.skills.all() {
        if !seen.insert(skill.clone()) {
            continue;
        }
        let endorsers = table.endorsers(skill);
        if !endorsers.is_empty() {
            annotated.push(SkillEndorsement { skill: skill.clone(), endorsers });
        }
    }
    doc.endorsements = annotated;
}
