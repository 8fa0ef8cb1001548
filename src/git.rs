//! Record collection from local git repositories.

use std::path::Path;

use anyhow::{Context, Result};
use git2::{Repository, Sort};
use tracing::{debug, info};

use crate::record::Record;

/// Git repository wrapper producing commit records.
pub struct GitRepository {
    repo: Repository,
    name: String,
}

impl GitRepository {
    /// Opens the repository at `path`.
    ///
    /// The repository identifier is the name of its working directory.
    pub fn open_at<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::open(&path).with_context(|| {
            format!("Failed to open git repository: {}", path.as_ref().display())
        })?;

        let root = repo.workdir().unwrap_or_else(|| repo.path());
        let name = root
            .components()
            .next_back()
            .map(|c| c.as_os_str().to_string_lossy().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        Ok(Self { repo, name })
    }

    /// Repository identifier written into each record.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Records for every non-merge commit reachable from HEAD, oldest first.
    ///
    /// Commits whose first line exceeds `max_len` characters are dropped.
    pub fn collect_records(&self, max_len: usize) -> Result<Vec<Record>> {
        let mut walker = self.repo.revwalk().context("Failed to create revwalk")?;
        walker.push_head().context("Failed to push HEAD")?;
        walker
            .set_sorting(Sort::TOPOLOGICAL | Sort::REVERSE)
            .context("Failed to set revwalk sorting")?;

        let mut records = Vec::new();
        let mut dropped = 0_usize;
        for oid in walker {
            let oid = oid.context("Failed to get commit OID from walker")?;
            let commit = self
                .repo
                .find_commit(oid)
                .context("Failed to find commit")?;

            // Skip merge commits
            if commit.parent_count() > 1 {
                continue;
            }

            let author = commit.author();
            let author = author.name().unwrap_or("Unknown");
            let message = String::from_utf8_lossy(commit.message_bytes());
            match Record::from_commit(author, &self.name, &message, max_len) {
                Some(record) => records.push(record),
                None => {
                    dropped += 1;
                    debug!(
                        commit = %oid,
                        author,
                        "Dropping commit with overlong first line or '::' in author"
                    );
                }
            }
        }

        info!(
            repository = %self.name,
            records = records.len(),
            dropped,
            "Collected commit records"
        );
        Ok(records)
    }
}
