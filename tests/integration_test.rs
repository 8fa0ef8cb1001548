use anyhow::Result;
use commit_grammar::cli::{AnalyzeCommand, ConjugateCommand, SettingsArgs};
use commit_grammar::git::GitRepository;
use commit_grammar::record::Record;
use git2::{Repository, Signature};
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test setup that lays out a reference data tree in a temporary directory
struct TestCorpus {
    temp_dir: TempDir,
}

impl TestCorpus {
    fn new() -> Result<Self> {
        let temp_dir = tempfile::tempdir()?;
        let data_dir = temp_dir.path().join("data");
        fs::create_dir_all(data_dir.join("raw"))?;
        fs::create_dir_all(data_dir.join("processed"))?;

        fs::write(data_dir.join("raw/stopwords.txt"), "stopwords\nthe\non\n")?;
        fs::write(
            data_dir.join("processed/irregular_verbs.json"),
            r#"{"go": "went"}"#,
        )?;
        fs::write(
            data_dir.join("processed/infinitives.txt"),
            "add\nfix\nupdate\nstop\ngo\n",
        )?;

        Ok(Self { temp_dir })
    }

    fn data_dir(&self) -> PathBuf {
        self.temp_dir.path().join("data")
    }

    fn outputs_dir(&self) -> PathBuf {
        self.temp_dir.path().join("outputs")
    }

    fn settings_args(&self) -> SettingsArgs {
        SettingsArgs {
            // Points at a file that does not exist so no user settings leak in
            config: Some(self.temp_dir.path().join("settings.yaml")),
            data_dir: Some(self.data_dir()),
        }
    }

    fn write_commits(&self, lines: &[&str]) -> Result<PathBuf> {
        let path = self.data_dir().join("processed/commits.txt");
        fs::write(&path, lines.join("\n") + "\n")?;
        Ok(path)
    }

    fn read_output(&self, name: &str) -> Result<Value> {
        let content = fs::read_to_string(self.outputs_dir().join(format!("{name}.json")))?;
        Ok(serde_json::from_str(&content)?)
    }
}

fn read_list(dir: &Path, form: &str) -> Result<Vec<String>> {
    Ok(fs::read_to_string(dir.join(format!("{form}.txt")))?
        .lines()
        .map(str::to_string)
        .collect())
}

#[test]
fn conjugate_writes_form_lists() -> Result<()> {
    let corpus = TestCorpus::new()?;

    ConjugateCommand {
        settings: corpus.settings_args(),
    }
    .execute()?;

    let processed = corpus.data_dir().join("processed");
    assert_eq!(
        read_list(&processed, "imperative")?,
        vec!["add", "fix", "go", "stop", "update"]
    );
    assert_eq!(
        read_list(&processed, "gerund")?,
        vec!["adding", "fixing", "going", "stopping", "updating"]
    );
    assert_eq!(
        read_list(&processed, "third_person")?,
        vec!["adds", "fixes", "goes", "stops", "updates"]
    );
    assert_eq!(
        read_list(&processed, "past_tense")?,
        vec!["added", "fixed", "went", "stopped", "updated"]
    );
    Ok(())
}

#[test]
fn analyze_runs_every_analysis() -> Result<()> {
    let corpus = TestCorpus::new()?;
    ConjugateCommand {
        settings: corpus.settings_args(),
    }
    .execute()?;

    corpus.write_commits(&[
        "ann::a/x::1::Fix crash on startup",
        "ann::a/x::3::feat: Added logging",
        "ann::a/x::1::Update docs.",
        "bob::b/y::2::[skip-ci] Stopping the world",
        "bob::b/y::1::WIP",
        "malformed line",
        "carol::c/z::1::Going home",
    ])?;

    let stats = AnalyzeCommand {
        settings: corpus.settings_args(),
        input: None,
        outputs: Some(corpus.outputs_dir()),
        quota: Some(2),
    }
    .run()?;

    assert_eq!(stats.accepted, 5);
    assert_eq!(stats.total_seen, 7);

    let verb_form = corpus.read_output("verb_form")?;
    assert_eq!(
        verb_form["total_counts"],
        json!({
            "imperative": 1,
            "gerund": 2,
            "third_person": 0,
            "past_tense": 1,
            "non_verb": 1,
        })
    );
    assert_eq!(
        verb_form["frequencies"]["gerund"],
        json!([
            {"word": "going", "count": 1},
            {"word": "stopping", "count": 1},
        ])
    );

    let binary = corpus.read_output("binary")?;
    assert_eq!(binary["total"], 5);
    assert_eq!(binary["capital_letter"], 3);
    assert_eq!(binary["full_stop"], 0);
    assert_eq!(binary["capslock"], 1);
    assert_eq!(binary["non_ascii_chars"], 0);

    assert_eq!(
        corpus.read_output("message_line_count")?,
        json!({"1": 3, "2": 1, "3": 1})
    );

    let words = corpus.read_output("word_frequency")?;
    let words = words.as_array().expect("word frequency is a list");
    assert!(words.iter().all(|entry| entry["word"] != "the"));
    assert!(words.iter().any(|entry| entry["word"] == "startup"));

    let first_words = corpus.read_output("first_word_frequency")?;
    assert_eq!(first_words.as_array().map(Vec::len), Some(5));

    assert!(corpus.outputs_dir().join("message_length.json").exists());
    Ok(())
}

#[test]
fn analyze_fails_without_word_lists() -> Result<()> {
    let corpus = TestCorpus::new()?;
    corpus.write_commits(&["ann::a/x::1::Fix crash"])?;

    let result = AnalyzeCommand {
        settings: corpus.settings_args(),
        input: None,
        outputs: Some(corpus.outputs_dir()),
        quota: None,
    }
    .run();

    assert!(result.is_err());
    assert!(!corpus.outputs_dir().exists());
    Ok(())
}

/// Test setup that creates a temporary git repository with test commits
struct TestRepo {
    _temp_dir: TempDir,
    repo_path: PathBuf,
    repo: Repository,
    commits: Vec<git2::Oid>,
}

impl TestRepo {
    fn new() -> Result<Self> {
        let temp_dir = tempfile::tempdir()?;
        let repo_path = temp_dir.path().join("sample-project");
        fs::create_dir_all(&repo_path)?;

        let repo = Repository::init(&repo_path)?;

        Ok(TestRepo {
            _temp_dir: temp_dir,
            repo_path,
            repo,
            commits: Vec::new(),
        })
    }

    fn add_commit(&mut self, author: &str, message: &str, content: &str) -> Result<git2::Oid> {
        let file_path = self.repo_path.join("test.txt");
        fs::write(&file_path, content)?;

        let mut index = self.repo.index()?;
        index.add_path(Path::new("test.txt"))?;
        index.write()?;

        let signature = Signature::now(author, "dev@example.com")?;
        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;

        let parent_commit = match self.commits.last() {
            Some(last_commit_id) => Some(self.repo.find_commit(*last_commit_id)?),
            None => None,
        };
        let parents: Vec<&git2::Commit> = parent_commit.iter().collect();

        let commit_id = self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &parents,
        )?;

        self.commits.push(commit_id);
        Ok(commit_id)
    }
}

#[test]
fn collect_records_from_repository() -> Result<()> {
    let mut test_repo = TestRepo::new()?;
    test_repo.add_commit("Ann", "Initial commit", "one")?;
    test_repo.add_commit("Bob", "Add parser\n\nHandles the record format.", "two")?;
    test_repo.add_commit("Ann", &"x".repeat(301), "three")?;
    // Messages written by `git commit -m` end in a newline
    test_repo.add_commit("Bob", "Fix typo\n", "four")?;
    test_repo.add_commit("Ann", "Update docs\n\nMention the data dir.\n", "five")?;
    test_repo.add_commit("Eve::Ops", "Bump version\n", "six")?;

    let repo = GitRepository::open_at(&test_repo.repo_path)?;
    assert_eq!(repo.name(), "sample-project");

    let records = repo.collect_records(300)?;
    let lines: Vec<String> = records.iter().map(Record::to_line).collect();
    assert_eq!(
        lines,
        vec![
            "Ann::sample-project::1::Initial commit",
            "Bob::sample-project::3::Add parser",
            "Bob::sample-project::1::Fix typo",
            "Ann::sample-project::3::Update docs",
        ]
    );
    Ok(())
}
