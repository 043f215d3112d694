use std::env;
use std::path::{Path, PathBuf};

use crate::error::AppResult;

pub const BASE_BRANCH_ENV: &str = "GIT_CHANGES_BASE";
pub const NO_COLOR_ENV: &str = "NO_COLOR";
const DEFAULT_BASE_BRANCH: &str = "main";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub workspace_hint: PathBuf,
    pub base_branch: String,
    /// `NO_COLOR` is set to a non-empty value.
    pub no_color_env: bool,
}

impl AppConfig {
    pub fn load(workspace_hint: &Path) -> AppResult<Self> {
        Ok(Self::from_lookup(workspace_hint, |key| env::var(key).ok()))
    }

    fn from_lookup(workspace_hint: &Path, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_branch = lookup(BASE_BRANCH_ENV)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_BRANCH.to_string());
        let no_color_env = lookup(NO_COLOR_ENV).is_some_and(|value| !value.is_empty());

        Self {
            workspace_hint: workspace_hint.to_path_buf(),
            base_branch,
            no_color_env,
        }
    }

    /// Color only on a terminal, and only when nothing asks for it to be off.
    pub fn use_color(&self, no_color_flag: bool, stdout_is_terminal: bool) -> bool {
        stdout_is_terminal && !no_color_flag && !self.no_color_env
    }
}
