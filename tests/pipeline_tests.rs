//! End-to-end pipeline tests against in-process git repositories.

use git2::{Repository, Signature, Time};
use repo_resume::domain::{Config, OutputFormat, ResumeDocument};
use repo_resume::error::PipelineError;
use repo_resume::pipeline::{NoPrompt, Pipeline, RunStage};
use repo_resume::store::EndorsementTable;
use repo_resume::synth::{ContentSynthesizer, SectionSource, SectionSources};
use similar_asserts::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn commit(repo: &Repository, files: &[(&str, &str)], author: &str, message: &str, time: i64) {
    let root = repo.workdir().expect("workdir").to_path_buf();
    let mut index = repo.index().expect("index");
    for (name, content) in files {
        let path = root.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("mkdir");
        }
        fs::write(&path, content).expect("write");
        index.add_path(Path::new(name)).expect("add");
    }
    index.write().expect("write index");
    let tree = repo.find_tree(index.write_tree().expect("tree")).expect("find tree");
    let email = format!("{}@example.com", author.to_lowercase());
    let sig = Signature::new(author, &email, &Time::new(time, 0)).expect("sig");
    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();
    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents).expect("commit");
}

fn project() -> TempDir {
    let temp = TempDir::new().expect("tmp");
    let repo = Repository::init(temp.path()).expect("init");
    commit(
        &repo,
        &[("README.md", "# MyApp\n\nA tool for X.\n\n## Features\n- Fast\n- Simple\n")],
        "Ada",
        "Initial commit",
        1_704_067_200,
    );
    commit(
        &repo,
        &[("package.json", r#"{"name": "myapp", "dependencies": {"react": "^18.0.0", "pg": "^8.0.0"}}"#)],
        "Ada",
        "Add manifest",
        1_705_000_000,
    );
    commit(&repo, &[("src/app.tsx", "export default 1;\n")], "Grace", "Add app", 1_706_745_600);
    commit(&repo, &[("server/main.go", "package main\n")], "Ada", "Add server", 1_709_251_200);
    temp
}

fn json_config() -> Config {
    Config { format: OutputFormat::Json, name: Some("Ada".to_string()), ..Default::default() }
}

#[tokio::test]
async fn fallback_run_produces_one_experience_entry() {
    let temp = project();
    let mut pipeline = Pipeline::new(ContentSynthesizer::new(), &NoPrompt);
    let report = pipeline.run(temp.path(), &json_config()).await.expect("run");
    assert_eq!(pipeline.stage(), RunStage::Rendered);
    assert_eq!(report.sources, SectionSources::all(SectionSource::Fallback));

    let doc = &report.document;
    assert_eq!(doc.experience.len(), 1);
    assert_eq!(doc.experience[0].achievements[0], "Delivered 4 commits spanning 3 languages");
    assert_eq!(doc.experience[0].duration, "Jan 2024 - Mar 2024");
    assert_eq!(doc.projects[0].name, "myapp");
    assert_eq!(doc.projects[0].highlights, vec!["Fast", "Simple"]);
    assert!(doc.skills.frameworks.contains(&"React".to_string()));
    assert!(doc.skills.databases.contains(&"PostgreSQL".to_string()));

    let written =
        fs::read_to_string(temp.path().join("resume").join("resume.json")).expect("output");
    let parsed: ResumeDocument = serde_json::from_str(&written).expect("json");
    assert_eq!(&parsed, doc);
}

#[tokio::test]
async fn endorsements_are_attached_for_display() {
    let temp = project();
    let mut table = EndorsementTable::default();
    table.endorse("React", "Grace");
    table.endorse("React", "Linus");
    table.endorse("Cobol", "Grace");
    table.save(temp.path()).expect("save");

    let mut pipeline = Pipeline::new(ContentSynthesizer::new(), &NoPrompt);
    let report = pipeline.run(temp.path(), &json_config()).await.expect("run");
    let react = report.document.endorsement_for("React").expect("react endorsed");
    assert_eq!(react.endorsers, vec!["Grace", "Linus"]);
    assert!(report.document.endorsement_for("Cobol").is_none());
}

#[tokio::test]
async fn malformed_endorsements_do_not_abort() {
    let temp = project();
    let state_dir = temp.path().join(".repo-resume");
    fs::create_dir_all(&state_dir).expect("mkdir");
    fs::write(state_dir.join("endorsements.json"), "not json").expect("write");

    let mut pipeline = Pipeline::new(ContentSynthesizer::new(), &NoPrompt);
    let report = pipeline.run(temp.path(), &json_config()).await.expect("run");
    assert!(report.document.endorsements.is_empty());
}

#[tokio::test]
async fn max_commits_bounds_the_window() {
    let temp = project();
    let config = Config { max_commits: 2, ..json_config() };
    let mut pipeline = Pipeline::new(ContentSynthesizer::new(), &NoPrompt);
    let report = pipeline.run(temp.path(), &config).await.expect("run");
    assert_eq!(report.snapshot.total_commits, 2);
    // The older of the two has nothing to diff against, so only Go is seen.
    assert_eq!(report.snapshot.languages, vec!["Go"]);
}

#[tokio::test]
async fn missing_repository_aborts_before_any_write() {
    let temp = TempDir::new().expect("tmp");
    let mut pipeline = Pipeline::new(ContentSynthesizer::new(), &NoPrompt);
    let err = pipeline.run(temp.path(), &json_config()).await.expect_err("no repo");
    assert!(err.is_environment_missing());
    assert!(matches!(err, PipelineError::NoRepository(_)));
    assert_eq!(pipeline.stage(), RunStage::Aborted);
    assert_eq!(fs::read_dir(temp.path()).expect("read dir").count(), 0);
}
