use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Output;

use async_trait::async_trait;
use chrono::DateTime;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::domain::comparison::{
    CommitDescriptor, CommitPair, ComparisonContext, ComparisonMode, ComparisonRange,
};
use crate::domain::record::RawChange;
use crate::error::{AppError, AppResult};
use crate::services::line_counter::count_content_lines;
use crate::services::{ChangeSource, LineCounter};

const SHORT_ID_LEN: usize = 6;
const FIELD_SEPARATOR: char = '\u{1f}';

/// Talks to the `git` executable, always from the repository top level.
#[derive(Debug, Clone)]
pub struct GitCli {
    workspace_root: PathBuf,
    base_branch: String,
}

impl GitCli {
    /// Locates the repository containing `hint`.
    pub async fn discover(hint: &Path, base_branch: String) -> AppResult<Self> {
        let output = run_git(hint, &["rev-parse", "--show-toplevel"]).await?;
        if !output.status.success() {
            return Err(AppError::NotARepository);
        }
        let workspace_root = PathBuf::from(String::from_utf8_lossy(&output.stdout).trim());
        debug!(root = %workspace_root.display(), "discovered repository");

        Ok(Self {
            workspace_root,
            base_branch,
        })
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    /// Runs git and returns stdout, failing on a non-zero exit.
    async fn git(&self, args: &[&str]) -> AppResult<String> {
        let output = run_git(&self.workspace_root, args).await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::VersionControl(format!(
                "git {} failed: {}",
                args.join(" "),
                stderr.trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Runs git and returns raw stdout, or `None` on a non-zero exit.
    async fn try_git(&self, args: &[&str]) -> AppResult<Option<Vec<u8>>> {
        let output = run_git(&self.workspace_root, args).await?;
        Ok(output.status.success().then_some(output.stdout))
    }

    async fn resolves(&self, revision: &str) -> AppResult<bool> {
        let spec = format!("{revision}^{{commit}}");
        Ok(self
            .try_git(&["rev-parse", "--verify", "--quiet", spec.as_str()])
            .await?
            .is_some())
    }

    async fn ensure_head(&self) -> AppResult<()> {
        if self.resolves("HEAD").await? {
            Ok(())
        } else {
            Err(AppError::reference(
                "HEAD",
                "Repository has no commits yet.",
            ))
        }
    }

    fn base_candidates(&self) -> Vec<String> {
        let mut candidates = vec![
            self.base_branch.clone(),
            format!("origin/{}", self.base_branch),
            "master".to_string(),
            "origin/master".to_string(),
        ];
        candidates.dedup();
        candidates
    }

    /// Merge base of HEAD with the first base branch candidate that has one.
    async fn merge_base(&self) -> AppResult<String> {
        let candidates = self.base_candidates();
        for candidate in &candidates {
            if let Some(stdout) = self.try_git(&["merge-base", "HEAD", candidate.as_str()]).await? {
                let base = String::from_utf8_lossy(&stdout).trim().to_string();
                debug!(%candidate, %base, "found merge base");
                return Ok(base);
            }
        }
        Err(AppError::reference(
            self.base_branch.clone(),
            format!(
                "No merge base with any of: {}. Create the base branch, set GIT_CHANGES_BASE, or use --uncommitted.",
                candidates.join(", ")
            ),
        ))
    }

    async fn previous_commit(&self) -> AppResult<&'static str> {
        if self.resolves("HEAD~1").await? {
            Ok("HEAD~1")
        } else {
            Err(AppError::reference(
                "HEAD~1",
                "Repository needs at least 2 commits for --since-last.",
            ))
        }
    }

    async fn commit_descriptor(&self, revision: &str) -> AppResult<CommitDescriptor> {
        let format = "--format=%H%x1f%cI%x1f%s";
        let stdout = self.git(&["show", "-s", format, revision]).await?;
        parse_commit_line(stdout.trim_end_matches('\n')).ok_or_else(|| {
            AppError::VersionControl(format!("unexpected commit metadata for {revision}"))
        })
    }

    /// Line counts of files as committed at `revision`.
    pub fn lines_at(&self, revision: &str) -> RevisionLines {
        RevisionLines {
            git: self.clone(),
            revision: revision.to_string(),
        }
    }
}

async fn run_git(dir: &Path, args: &[&str]) -> AppResult<Output> {
    debug!(?args, "running git");
    Command::new("git")
        .arg("-c")
        .arg("core.quotepath=off")
        .args(args)
        .current_dir(dir)
        .output()
        .await
        .map_err(|err| match err.kind() {
            ErrorKind::NotFound => AppError::ToolUnavailable,
            _ => AppError::Io(err),
        })
}

#[async_trait]
impl ChangeSource for GitCli {
    async fn range(&self, mode: ComparisonMode) -> AppResult<ComparisonRange> {
        self.ensure_head().await?;

        let base = match mode {
            ComparisonMode::Uncommitted => "HEAD".to_string(),
            ComparisonMode::SinceLast => self.previous_commit().await?.to_string(),
            ComparisonMode::BranchDivergence => self.merge_base().await?,
        };
        Ok(ComparisonRange::new(mode, base))
    }

    async fn changes(&self, range: &ComparisonRange) -> AppResult<Vec<RawChange>> {
        let mut args = vec!["diff", "--numstat", "-z", range.base.as_str()];
        if range.is_committed() {
            args.push("HEAD");
        }

        let stdout = self.git(&args).await?;
        Ok(parse_numstat(&stdout))
    }

    async fn comparison(&self, range: &ComparisonRange) -> AppResult<ComparisonContext> {
        if !range.is_committed() {
            return Ok(ComparisonContext::without_commits(range.mode));
        }

        let commits = CommitPair {
            base: self.commit_descriptor(&range.base).await?,
            head: self.commit_descriptor("HEAD").await?,
        };
        Ok(ComparisonContext {
            mode: range.mode,
            commits: Some(commits),
        })
    }
}

/// Reads line counts from the blobs of a committed tree.
#[derive(Debug, Clone)]
pub struct RevisionLines {
    git: GitCli,
    revision: String,
}

#[async_trait]
impl LineCounter for RevisionLines {
    async fn count_lines(&self, path: &str) -> AppResult<Option<usize>> {
        let object = format!("{}:{}", self.revision, path);
        let content = self.git.try_git(&["cat-file", "blob", object.as_str()]).await?;
        Ok(content.map(|bytes| count_content_lines(&bytes)))
    }
}

/// Parses `git diff --numstat -z` output, dropping entries without changed lines.
///
/// Entries are `<ins>\t<del>\t<path>\0`. Renames leave the path empty and
/// follow it with `<old>\0<new>\0`; the new path is kept.
pub fn parse_numstat(output: &str) -> Vec<RawChange> {
    let mut fields = output.split('\0');
    let mut changes = Vec::new();

    while let Some(entry) = fields.next() {
        if entry.is_empty() {
            continue;
        }
        let mut stats = entry.splitn(3, '\t');
        let (Some(insertions), Some(deletions), Some(path)) =
            (stats.next(), stats.next(), stats.next())
        else {
            warn!(%entry, "unexpected numstat entry");
            continue;
        };

        let path = if path.is_empty() {
            match (fields.next(), fields.next()) {
                (Some(_), Some(renamed)) if !renamed.is_empty() => renamed,
                _ => {
                    warn!(%entry, "truncated numstat rename");
                    break;
                }
            }
        } else {
            path
        };

        let change = RawChange::new(path, parse_count(insertions), parse_count(deletions));
        if change.insertions + change.deletions == 0 {
            debug!(path = %change.path, "skipping entry without line changes");
            continue;
        }
        changes.push(change);
    }

    changes
}

// Binary files report `-`.
fn parse_count(field: &str) -> usize {
    field.trim().parse().unwrap_or_else(|_| {
        if field.trim() != "-" {
            warn!(%field, "unexpected numstat count");
        }
        0
    })
}

fn parse_commit_line(line: &str) -> Option<CommitDescriptor> {
    let mut fields = line.splitn(3, FIELD_SEPARATOR);
    let hash = fields.next()?;
    let timestamp = DateTime::parse_from_rfc3339(fields.next()?).ok()?;
    let subject = fields.next().unwrap_or_default();

    Some(CommitDescriptor {
        timestamp,
        short_id: hash.chars().take(SHORT_ID_LEN).collect(),
        subject: subject.trim().to_string(),
    })
}
