mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod logging;
mod render;
mod services;
mod workflow;

use std::io::{self, Write};
use std::sync::Arc;

use clap::Parser;
use is_terminal::IsTerminal;
use tracing::debug;

use crate::cmd::changes::{self, ChangesCommandArgs};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::domain::comparison::ComparisonMode;
use crate::domain::sort::SortKey;
use crate::error::AppResult;
use crate::infra::git::GitCli;
use crate::infra::workspace::WorkingTreeLines;
use crate::render::RenderMode;
use crate::services::LineCounter;

/// Display changed files with line counts in a tree view.
///
/// By default compares the current branch against main since the point where
/// they diverged.
#[derive(Parser)]
#[command(name = "git-changes-view", author, version)]
struct Cli {
    /// Compare HEAD against the previous commit.
    #[arg(long, conflicts_with = "uncommitted")]
    since_last: bool,
    /// Show uncommitted changes (staged and unstaged) against HEAD.
    #[arg(long)]
    uncommitted: bool,
    /// Flat list instead of the tree view.
    #[arg(long)]
    flat: bool,
    /// Output as JSON (takes precedence over --flat).
    #[arg(long)]
    json: bool,
    /// Sort order.
    #[arg(long, value_enum, default_value_t = SortKey::Name)]
    sort: SortKey,
    /// Disable colored output.
    #[arg(long)]
    no_color: bool,
}

#[tokio::main]
async fn main() {
    logging::setup_logger();

    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        if let Some(hint) = error.hint() {
            eprintln!("Tip: {hint}");
        }
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let cwd = std::env::current_dir()?;
    let config = AppConfig::load(&cwd)?;

    let color = config.use_color(cli.no_color, io::stdout().is_terminal());
    colored::control::set_override(color);

    let args = ChangesCommandArgs {
        mode: ComparisonMode::from_flags(cli.since_last, cli.uncommitted),
        sort: cli.sort,
        render: RenderMode::resolve(cli.flat, cli.json),
        color,
    };
    debug!(?args, "resolved invocation");

    let git = GitCli::discover(&config.workspace_hint, config.base_branch.clone()).await?;
    let line_counter: Arc<dyn LineCounter> = match args.mode {
        ComparisonMode::Uncommitted => {
            Arc::new(WorkingTreeLines::new(git.workspace_root().to_path_buf()))
        }
        ComparisonMode::SinceLast | ComparisonMode::BranchDivergence => {
            Arc::new(git.lines_at("HEAD"))
        }
    };

    let context = AppContext::new(config, Arc::new(git), line_counter);
    let output = changes::run(&context, args).await?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
