use async_trait::async_trait;

use crate::error::AppResult;

#[async_trait]
pub trait LineCounter: Send + Sync {
    /// Current line count of `path`, or `None` when the file does not exist.
    async fn count_lines(&self, path: &str) -> AppResult<Option<usize>>;
}

/// Newlines in `content`, plus one for a non-empty unterminated last line.
pub fn count_content_lines(content: &[u8]) -> usize {
    let newlines = content.iter().filter(|&&byte| byte == b'\n').count();
    match content.last() {
        Some(b'\n') | None => newlines,
        Some(_) => newlines + 1,
    }
}
