//! Keyword tables mapping dependency names and free text to canonical technology names.
//!
//! Matching is case-insensitive substring containment. Short or ambiguous
//! needles are word-bounded and only match when surrounded by
//! non-alphanumeric characters, so `java` does not fire inside `javascript`.
//! Needles that are ordinary English words (`next`) only match a dependency
//! of exactly that name.

use once_cell::sync::Lazy;

use crate::synth::merge::OrderedSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Substring,
    Word,
    /// Never matched in free text; a dependency name must equal the needle.
    Dependency,
}

/// One needle in a keyword table, mapped to exactly one display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keyword {
    pub needle: &'static str,
    pub name: &'static str,
    pub kind: MatchKind,
}

const fn kw(needle: &'static str, name: &'static str) -> Keyword {
    Keyword { needle, name, kind: MatchKind::Substring }
}

const fn word(needle: &'static str, name: &'static str) -> Keyword {
    Keyword { needle, name, kind: MatchKind::Word }
}

const fn dep(needle: &'static str, name: &'static str) -> Keyword {
    Keyword { needle, name, kind: MatchKind::Dependency }
}

pub const FRAMEWORKS: &[Keyword] = &[
    kw("react", "React"),
    kw("react-native", "React Native"),
    kw("next.js", "Next.js"),
    kw("nextjs", "Next.js"),
    dep("next", "Next.js"),
    kw("vue", "Vue.js"),
    kw("nuxt", "Nuxt"),
    kw("angular", "Angular"),
    kw("svelte", "Svelte"),
    word("express", "Express"),
    kw("fastify", "Fastify"),
    kw("nestjs", "NestJS"),
    kw("django", "Django"),
    kw("flask", "Flask"),
    kw("fastapi", "FastAPI"),
    word("rails", "Ruby on Rails"),
    kw("spring-boot", "Spring Boot"),
    kw("laravel", "Laravel"),
    kw("tailwind", "Tailwind CSS"),
    kw("bootstrap", "Bootstrap"),
    kw("jquery", "jQuery"),
    kw("electron", "Electron"),
    kw("redux", "Redux"),
    kw("flutter", "Flutter"),
    kw("tokio", "Tokio"),
    kw("actix", "Actix"),
    word("axum", "Axum"),
    kw("gin-gonic", "Gin"),
];

pub const DATABASES: &[Keyword] = &[
    kw("postgres", "PostgreSQL"),
    word("pg", "PostgreSQL"),
    kw("mysql", "MySQL"),
    kw("mariadb", "MariaDB"),
    kw("sqlite", "SQLite"),
    kw("mongodb", "MongoDB"),
    kw("mongoose", "MongoDB"),
    kw("redis", "Redis"),
    kw("dynamodb", "DynamoDB"),
    kw("cassandra", "Cassandra"),
    kw("elasticsearch", "Elasticsearch"),
    kw("firestore", "Firestore"),
    kw("supabase", "Supabase"),
    kw("neo4j", "Neo4j"),
    kw("couchdb", "CouchDB"),
];

pub const TOOLS: &[Keyword] = &[
    kw("docker", "Docker"),
    kw("kubernetes", "Kubernetes"),
    word("k8s", "Kubernetes"),
    kw("webpack", "Webpack"),
    word("vite", "Vite"),
    kw("babel", "Babel"),
    kw("eslint", "ESLint"),
    kw("prettier", "Prettier"),
    word("jest", "Jest"),
    kw("mocha", "Mocha"),
    kw("cypress", "Cypress"),
    kw("playwright", "Playwright"),
    kw("github actions", "GitHub Actions"),
    kw("terraform", "Terraform"),
    kw("ansible", "Ansible"),
    word("aws", "AWS"),
    kw("aws-sdk", "AWS"),
    kw("azure", "Azure"),
    kw("nginx", "Nginx"),
    kw("graphql", "GraphQL"),
    kw("prisma", "Prisma"),
    kw("storybook", "Storybook"),
    kw("gradle", "Gradle"),
    kw("maven", "Maven"),
    kw("webassembly", "WebAssembly"),
    word("wasm", "WebAssembly"),
];

pub const LANGUAGES: &[Keyword] = &[
    word("rust", "Rust"),
    kw("python", "Python"),
    kw("typescript", "TypeScript"),
    kw("javascript", "JavaScript"),
    kw("golang", "Go"),
    word("java", "Java"),
    kw("kotlin", "Kotlin"),
    word("swift", "Swift"),
    word("ruby", "Ruby"),
    word("php", "PHP"),
    kw("c++", "C++"),
    kw("c#", "C#"),
    word("scala", "Scala"),
    kw("elixir", "Elixir"),
    kw("haskell", "Haskell"),
    word("dart", "Dart"),
    word("html", "HTML"),
    word("css", "CSS"),
    word("sql", "SQL"),
    word("bash", "Shell"),
    word("lua", "Lua"),
];

/// Marketing-style names that only show up in README prose.
const README_EXTRAS: &[Keyword] = &[
    kw("openai", "OpenAI"),
    kw("chatgpt", "ChatGPT"),
    kw("machine learning", "Machine Learning"),
    kw("tensorflow", "TensorFlow"),
    kw("pytorch", "PyTorch"),
    kw("vercel", "Vercel"),
    kw("netlify", "Netlify"),
    kw("heroku", "Heroku"),
    kw("firebase", "Firebase"),
    kw("stripe", "Stripe"),
    kw("rest api", "REST APIs"),
    kw("microservice", "Microservices"),
    kw("serverless", "Serverless"),
    kw("websocket", "WebSockets"),
    kw("oauth", "OAuth"),
    word("jwt", "JWT"),
    kw("ci/cd", "CI/CD"),
    kw("node.js", "Node.js"),
    kw("nodejs", "Node.js"),
];

/// README technology table: every Inferencer table plus the marketing extras.
static README_TECHNOLOGIES: Lazy<Vec<Keyword>> = Lazy::new(|| {
    LANGUAGES
        .iter()
        .chain(FRAMEWORKS)
        .chain(DATABASES)
        .chain(TOOLS)
        .chain(README_EXTRAS)
        .copied()
        .collect()
});

fn is_boundary(c: Option<char>) -> bool {
    c.map_or(true, |c| !c.is_alphanumeric())
}

fn contains_word(haystack: &str, needle: &str) -> bool {
    haystack.match_indices(needle).any(|(idx, m)| {
        let before = haystack[..idx].chars().next_back();
        let after = haystack[idx + m.len()..].chars().next();
        is_boundary(before) && is_boundary(after)
    })
}

/// Whether free text (already lower-cased) mentions the keyword.
pub fn text_mentions(text: &str, keyword: &Keyword) -> bool {
    match keyword.kind {
        MatchKind::Substring => text.contains(keyword.needle),
        MatchKind::Word => contains_word(text, keyword.needle),
        MatchKind::Dependency => false,
    }
}

/// Whether a dependency name (already lower-cased) refers to the keyword.
pub fn dependency_matches(dependency: &str, keyword: &Keyword) -> bool {
    match keyword.kind {
        MatchKind::Dependency => dependency == keyword.needle,
        _ => text_mentions(dependency, keyword),
    }
}

/// Match a table against a free-text blob and a set of dependency names.
/// Output follows table order; each display name appears once.
pub fn match_keywords<S: AsRef<str>>(table: &[Keyword], text: &str, deps: &[S]) -> Vec<String> {
    let text = text.to_lowercase();
    let deps: Vec<String> = deps.iter().map(|d| d.as_ref().to_lowercase()).collect();

    let mut found = OrderedSet::new();
    for keyword in table {
        let hit = text_mentions(&text, keyword)
            || deps.iter().any(|dependency| dependency_matches(dependency, keyword));
        if hit {
            found.insert(keyword.name);
        }
    }
    found.into_vec()
}

pub fn detect_frameworks<S: AsRef<str>>(text: &str, deps: &[S]) -> Vec<String> {
    match_keywords(FRAMEWORKS, text, deps)
}

pub fn detect_databases<S: AsRef<str>>(text: &str, deps: &[S]) -> Vec<String> {
    match_keywords(DATABASES, text, deps)
}

pub fn detect_tools<S: AsRef<str>>(text: &str, deps: &[S]) -> Vec<String> {
    match_keywords(TOOLS, text, deps)
}

pub fn detect_languages_in_text(text: &str) -> Vec<String> {
    match_keywords::<&str>(LANGUAGES, text, &[])
}

/// Technologies mentioned anywhere in a README.
pub fn detect_readme_technologies(text: &str) -> Vec<String> {
    match_keywords::<&str>(&README_TECHNOLOGIES, text, &[])
}
