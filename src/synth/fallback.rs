//! Deterministic, network-free section generators.

use crate::domain::{ExperienceEntry, ProjectEntry, Skills};
use crate::infer::{detect_databases, detect_frameworks, detect_languages_in_text, detect_tools};
use crate::synth::context::SynthesisContext;
use crate::synth::merge::union_lists;

/// Highlights used when the README lists no features.
pub const PLACEHOLDER_HIGHLIGHTS: [&str; 3] = [
    "Designed and implemented core functionality",
    "Maintained clean, well-structured codebase",
    "Applied version control best practices",
];

const MAX_HIGHLIGHTS: usize = 5;

fn join_human(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [one] => one.clone(),
        [first, second] => format!("{first} and {second}"),
        [init @ .., last] => format!("{}, and {}", init.join(", "), last),
    }
}

fn plural(count: usize, one: &str, many: &str) -> String {
    format!("{count} {}", if count == 1 { one } else { many })
}

pub fn summary(ctx: &SynthesisContext) -> String {
    let stack: Vec<String> = ctx.technologies().into_iter().take(3).collect();
    let mut summary = if stack.is_empty() {
        format!("Software developer who built and maintains {}.", ctx.project_name)
    } else {
        format!(
            "Software developer experienced with {}, who built and maintains {}.",
            join_human(&stack),
            ctx.project_name
        )
    };
    if ctx.commit_count > 0 {
        summary.push_str(&format!(
            " Contributed {} during {}.",
            plural(ctx.commit_count, "commit", "commits"),
            ctx.duration
        ));
    }
    summary
}

/// Keyword-table skills over the rendered context.
///
/// This is also what an assisted run ends up with when the skills response
/// holds no usable JSON, so both paths agree on the same context string.
pub fn skills(ctx: &SynthesisContext) -> Skills {
    let text = ctx.render();
    let deps = &ctx.dependencies;
    Skills {
        technical: union_lists(&[&ctx.languages, &detect_languages_in_text(&text)]),
        frameworks: union_lists(&[&ctx.frameworks, &detect_frameworks(&text, deps)]),
        tools: union_lists(&[&ctx.tools, &detect_tools(&text, deps)]),
        databases: union_lists(&[&ctx.databases, &detect_databases(&text, deps)]),
    }
}

/// One entry built from aggregate commit statistics. The first achievement
/// always states the commit count and the distinct-language count.
pub fn experience(ctx: &SynthesisContext) -> ExperienceEntry {
    let mut achievements = vec![format!(
        "Delivered {} spanning {}",
        plural(ctx.commit_count, "commit", "commits"),
        plural(ctx.languages.len(), "language", "languages")
    )];

    let libraries = union_lists(&[&ctx.frameworks, &ctx.databases]);
    if !libraries.is_empty() {
        achievements.push(format!("Built features using {}", join_human(&libraries)));
    }
    if ctx.author_count > 1 {
        achievements.push(format!(
            "Collaborated with {} on a shared codebase",
            plural(ctx.author_count - 1, "other contributor", "other contributors")
        ));
    }
    if !ctx.tools.is_empty() {
        achievements.push(format!("Set up tooling with {}", join_human(&ctx.tools)));
    }

    ExperienceEntry {
        project_name: ctx.project_name.clone(),
        description: ctx
            .description
            .clone()
            .unwrap_or_else(|| format!("Development and maintenance of {}", ctx.project_name)),
        achievements,
        technologies: ctx.technologies(),
        duration: ctx.duration.clone(),
    }
}

/// One entry from the README/manifest description and features.
pub fn project(ctx: &SynthesisContext) -> ProjectEntry {
    let highlights = if ctx.readme_features.is_empty() {
        PLACEHOLDER_HIGHLIGHTS.iter().map(|h| h.to_string()).collect()
    } else {
        ctx.readme_features.iter().take(MAX_HIGHLIGHTS).cloned().collect()
    };

    let description = ctx.description.clone().unwrap_or_else(|| match ctx.languages.first() {
        Some(language) => format!("A {language} project"),
        None => "A software project".to_string(),
    });

    ProjectEntry {
        name: ctx.project_name.clone(),
        description,
        technologies: ctx.technologies(),
        highlights,
        link: ctx.repository.clone(),
    }
}
