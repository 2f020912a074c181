//! GitHub REST profile import.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

use super::profile::{
    normalize_handle, ImportError, ImportedProfile, ProfileSource, RepoSummary, NO_DESCRIPTION,
};
use crate::project::parse_readme;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_MAX_REPOS: usize = 6;
const USER_AGENT: &str = concat!("repo-resume/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct ApiUser {
    login: String,
    name: Option<String>,
    email: Option<String>,
    bio: Option<String>,
    html_url: String,
}

#[derive(Debug, Deserialize)]
struct ApiRepo {
    name: String,
    description: Option<String>,
    html_url: String,
    language: Option<String>,
    #[serde(default)]
    fork: bool,
    #[serde(default)]
    archived: bool,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    message: String,
}

/// Profile source backed by the public GitHub API.
#[derive(Clone)]
pub struct GitHubClient {
    client: Client,
    api_url: String,
    token: Option<String>,
    max_repos: usize,
}

impl GitHubClient {
    pub fn new(token: Option<String>) -> Result<Self, ImportError> {
        let client =
            Client::builder().timeout(Duration::from_secs(30)).user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            api_url: DEFAULT_API_URL.to_string(),
            token,
            max_repos: DEFAULT_MAX_REPOS,
        })
    }

    /// Token from `GITHUB_TOKEN`, if set.
    pub fn from_env() -> Result<Self, ImportError> {
        Self::new(std::env::var("GITHUB_TOKEN").ok().filter(|t| !t.trim().is_empty()))
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_max_repos(mut self, max: usize) -> Self {
        self.max_repos = max;
        self
    }

    fn get(&self, path: &str) -> RequestBuilder {
        let request = self.client.get(format!("{}{}", self.api_url, path));
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        handle: &str,
    ) -> Result<T, ImportError> {
        let response =
            self.get(path).header("Accept", "application/vnd.github+json").send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ImportError::NotFound(handle.to_string()));
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message =
                serde_json::from_str::<ApiMessage>(&text).map(|m| m.message).unwrap_or(text);
            return Err(ImportError::Api { status: status.as_u16(), message });
        }
        Ok(response.json().await?)
    }

    /// Raw README text, or `None` when absent or unreadable.
    async fn readme(&self, owner: &str, repo: &str) -> Option<String> {
        let response = self
            .get(&format!("/repos/{owner}/{repo}/readme"))
            .header("Accept", "application/vnd.github.raw")
            .send()
            .await
            .ok()?;
        if !response.status().is_success() {
            debug!("No README for {}/{} ({})", owner, repo, response.status());
            return None;
        }
        response.text().await.ok()
    }

    async fn describe(&self, owner: &str, repo: &ApiRepo) -> String {
        let description = repo.description.as_deref().map(str::trim).filter(|d| !d.is_empty());
        if let Some(description) = description {
            return description.to_string();
        }
        self.readme(owner, &repo.name)
            .await
            .and_then(|text| description_from_readme(&text))
            .unwrap_or_else(|| NO_DESCRIPTION.to_string())
    }
}

/// Description to use for a repository whose metadata has none.
pub fn description_from_readme(readme: &str) -> Option<String> {
    parse_readme(readme).description.map(|d| d.trim().to_string()).filter(|d| !d.is_empty())
}

/// Distinct languages ordered by how many repositories use them; ties keep
/// first-seen order.
fn rank_languages(repos: &[RepoSummary]) -> Vec<String> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for language in repos.iter().filter_map(|r| r.language.as_deref()) {
        let count = counts.entry(language).or_insert(0);
        if *count == 0 {
            order.push(language);
        }
        *count += 1;
    }
    // Stable sort keeps first-seen order among equal counts.
    order.sort_by(|a, b| counts[b].cmp(&counts[a]));
    order.into_iter().map(str::to_string).collect()
}

#[async_trait]
impl ProfileSource for GitHubClient {
    async fn fetch_profile(&self, handle: &str) -> Result<ImportedProfile, ImportError> {
        let handle = normalize_handle(handle)?;
        let user: ApiUser = self.get_json(&format!("/users/{handle}"), &handle).await?;
        let repos_path = format!("/users/{handle}/repos?sort=updated&per_page=100&type=owner");
        let repos: Vec<ApiRepo> = self.get_json(&repos_path, &handle).await?;

        let mut repositories = Vec::new();
        for repo in repos.iter().filter(|r| !r.fork && !r.archived).take(self.max_repos) {
            repositories.push(RepoSummary {
                description: self.describe(&user.login, repo).await,
                name: repo.name.clone(),
                link: repo.html_url.clone(),
                language: repo.language.clone().filter(|l| !l.trim().is_empty()),
            });
        }
        if repositories.is_empty() {
            warn!("GitHub user {} has no public source repositories", user.login);
        }

        let nonempty = |value: Option<String>| {
            value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
        };
        Ok(ImportedProfile {
            name: nonempty(user.name),
            email: nonempty(user.email),
            bio: nonempty(user.bio),
            link: Some(user.html_url),
            languages: rank_languages(&repositories),
            repositories,
        })
    }
}
