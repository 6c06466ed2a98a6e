//! nodegen CLI - Project scaffolding for Express.js services

use anyhow::Result;
use clap::Parser;
use nodegen_core::tui::CreateArgs;
use nodegen_core::{FeatureFlags, ProductConfig, DEFAULT_REGISTRY_URL};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// nodegen product configuration
#[derive(Clone)]
pub struct NodegenConfig;

impl ProductConfig for NodegenConfig {
    fn name(&self) -> &'static str {
        "nodegen"
    }

    fn display_name(&self) -> &'static str {
        "Node.js"
    }

    fn default_registry_url(&self) -> &'static str {
        DEFAULT_REGISTRY_URL
    }

    fn registry_url_env(&self) -> &'static str {
        "NODEGEN_REGISTRY_URL"
    }

    fn next_steps(&self, dir: &Path, _flags: &FeatureFlags) -> Vec<String> {
        let mut steps = Vec::new();
        let current = std::env::current_dir().ok();

        // Step 1: cd to directory if not current
        if current.as_deref() != Some(dir) {
            let shown = current
                .as_deref()
                .and_then(|c| dir.strip_prefix(c).ok())
                .unwrap_or(dir);
            steps.push(format!("cd {}", shown.display()));
        }

        // Step 2: Install dependencies
        steps.push("npm install".to_string());

        // Step 3: Start the dev server
        steps.push("npm run dev".to_string());

        steps
    }
}

#[derive(Parser, Debug)]
#[command(name = "nodegen")]
#[command(about = "CLI for scaffolding Express.js projects")]
#[command(version)]
pub struct Args {
    /// Project name (prompted for when omitted)
    #[arg(short, long)]
    pub name: Option<String>,

    /// YAML file with pre-answered options
    #[arg(short, long)]
    pub preset: Option<PathBuf>,

    /// Accept all defaults without prompting (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl From<Args> for CreateArgs {
    fn from(args: Args) -> Self {
        CreateArgs {
            name: args.name,
            preset: args.preset,
            yes: args.yes,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    let config = NodegenConfig;

    let result = nodegen_core::run(&config, args.into()).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    ExitCode::from(exit_status(&result))
}

/// Failures are already reported by the prompts, so only the status is kept
fn exit_status(result: &Result<()>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(_) => 1,
    }
}
