use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tracing::warn;

use crate::error::AppResult;
use crate::services::LineCounter;
use crate::services::line_counter::count_content_lines;

/// Reads line counts from files in the working tree.
#[derive(Debug, Clone)]
pub struct WorkingTreeLines {
    root: PathBuf,
}

impl WorkingTreeLines {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

#[async_trait]
impl LineCounter for WorkingTreeLines {
    async fn count_lines(&self, path: &str) -> AppResult<Option<usize>> {
        let full_path = self.root.join(path);
        match tokio::fs::metadata(&full_path).await {
            Ok(metadata) if metadata.is_file() => {}
            Ok(_) => return Ok(None),
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                warn!(path, %err, "cannot inspect file, reporting it as absent");
                return Ok(None);
            }
        }

        match tokio::fs::read(&full_path).await {
            Ok(content) => Ok(Some(count_content_lines(&content))),
            Err(err) => {
                warn!(path, %err, "cannot read file, reporting it as absent");
                Ok(None)
            }
        }
    }
}
