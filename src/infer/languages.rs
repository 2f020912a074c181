//! File extension to language lookup.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::path::Path;

use crate::synth::merge::OrderedSet;

static EXTENSION_LANGUAGES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        // General-purpose languages
        ("rs", "Rust"),
        ("py", "Python"),
        ("pyi", "Python"),
        ("js", "JavaScript"),
        ("mjs", "JavaScript"),
        ("cjs", "JavaScript"),
        ("jsx", "JavaScript"),
        ("ts", "TypeScript"),
        ("tsx", "TypeScript"),
        ("go", "Go"),
        ("java", "Java"),
        ("kt", "Kotlin"),
        ("kts", "Kotlin"),
        ("swift", "Swift"),
        ("rb", "Ruby"),
        ("php", "PHP"),
        ("c", "C"),
        ("h", "C"),
        ("cpp", "C++"),
        ("cc", "C++"),
        ("cxx", "C++"),
        ("hpp", "C++"),
        ("cs", "C#"),
        ("scala", "Scala"),
        ("dart", "Dart"),
        ("lua", "Lua"),
        ("ex", "Elixir"),
        ("exs", "Elixir"),
        ("erl", "Erlang"),
        ("hs", "Haskell"),
        ("clj", "Clojure"),
        ("zig", "Zig"),
        ("r", "R"),
        ("vue", "Vue"),
        ("svelte", "Svelte"),
        // Markup and style
        ("html", "HTML"),
        ("htm", "HTML"),
        ("css", "CSS"),
        ("scss", "SCSS"),
        ("sass", "Sass"),
        ("less", "Less"),
        ("md", "Markdown"),
        ("mdx", "MDX"),
        // Data and config
        ("json", "JSON"),
        ("yaml", "YAML"),
        ("yml", "YAML"),
        ("toml", "TOML"),
        ("xml", "XML"),
        ("sql", "SQL"),
        ("graphql", "GraphQL"),
        ("gql", "GraphQL"),
        ("proto", "Protocol Buffers"),
        ("tf", "Terraform"),
        // Shell and containers
        ("sh", "Shell"),
        ("bash", "Shell"),
        ("zsh", "Shell"),
        ("ps1", "PowerShell"),
        ("dockerfile", "Docker"),
    ])
});

static FILENAME_LANGUAGES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("dockerfile", "Docker"),
        ("containerfile", "Docker"),
        ("makefile", "Make"),
        ("gemfile", "Ruby"),
        ("rakefile", "Ruby"),
    ])
});

/// Map one repository-relative path to a language name. Unknown extensions yield `None`.
pub fn language_for_path(path: &str) -> Option<&'static str> {
    let path = Path::new(path);
    let file_name = path.file_name().and_then(|n| n.to_str())?.to_ascii_lowercase();

    if let Some(lang) = FILENAME_LANGUAGES.get(file_name.as_str()).copied() {
        return Some(lang);
    }

    let ext = path.extension().and_then(|e| e.to_str())?.to_ascii_lowercase();
    EXTENSION_LANGUAGES.get(ext.as_str()).copied()
}

/// Distinct languages for a set of paths, in order of first appearance.
pub fn infer_languages<I, S>(paths: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut languages = OrderedSet::new();
    for path in paths {
        if let Some(lang) = language_for_path(path.as_ref()) {
            languages.insert(lang);
        }
    }
    languages.into_vec()
}
