//! Charm-style CLI prompts using cliclack

use crate::compose::{DependencyPlan, FileMapping};
use crate::emitter::{self, EmitReport};
use crate::flags::{FeatureFlags, ProjectName, DEFAULT_PROJECT_NAME};
use crate::pipeline;
use crate::product::ProductConfig;
use crate::registry::RegistryClient;
use crate::runtime::check;
use crate::vcs::GitInitializer;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Project name; skips the name prompt when set
    pub name: Option<String>,

    /// YAML file with pre-answered feature flags
    pub preset: Option<PathBuf>,

    /// Accept every default without prompting (non-interactive mode)
    pub yes: bool,
}

/// Run the CLI with interactive prompts
pub async fn run<C: ProductConfig>(config: &C, args: CreateArgs) -> Result<()> {
    cliclack::intro(format!(
        "Welcome to the {} project generator",
        config.display_name()
    ))?;

    let result = create(config, &args).await;
    if let Err(e) = &result {
        cliclack::outro_cancel(format!("{:#}", e))?;
    }
    result
}

async fn create<C: ProductConfig>(config: &C, args: &CreateArgs) -> Result<()> {
    // Step 1: Collect flags (preset, --yes defaults, or prompts)
    let flags = collect_flags(args)?;

    // Step 2: Fail fast if the target is taken
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let project_dir = current_dir.join(&flags.project_name);
    emitter::ensure_available(&project_dir)?;

    // Step 3: Advisory toolchain check
    report_toolchain()?;

    // Step 4: Resolve dependency versions and compose files
    let registry = RegistryClient::from_config(config)?;
    let mapping = resolve_and_compose(&registry, &flags).await?;

    // Step 5: Write the project
    let report = write_project(&project_dir, &mapping).await?;

    // Step 6: Initialize git (warnings only)
    if flags.use_github {
        init_git(&report.root).await?;
    }

    // Step 7: Show next steps
    print_next_steps(config, &project_dir, &flags)?;

    Ok(())
}

fn collect_flags(args: &CreateArgs) -> Result<FeatureFlags> {
    let override_name = args
        .name
        .as_deref()
        .map(ProjectName::parse)
        .transpose()?;

    if let Some(path) = &args.preset {
        let mut flags = FeatureFlags::load_preset(path)?;
        if let Some(name) = override_name {
            flags.project_name = name;
        }
        cliclack::log::info(format!("Using preset {}", path.display()))?;
        return Ok(flags);
    }

    if args.yes {
        let name = match override_name {
            Some(name) => name,
            None => ProjectName::parse(DEFAULT_PROJECT_NAME)?,
        };
        cliclack::log::info("Using default options (--yes mode)")?;
        return Ok(FeatureFlags::with_defaults(name));
    }

    let project_name = match override_name {
        Some(name) => {
            cliclack::log::info(format!("Project name: {}", name))?;
            name
        }
        None => prompt_name()?,
    };

    Ok(FeatureFlags {
        project_name,
        use_cors: confirm("Do you want to enable CORS?")?,
        use_env_file: confirm("Do you want to use an environment file?")?,
        use_morgan_winston: confirm("Do you want to use morgan and winston for logging?")?,
        use_res_err_async_handler: confirm(
            "Do you want to use a basic Response handler, Error handler and Async handler?",
        )?,
        use_github: confirm("Do you want to initialize Github?")?,
        use_prettier: confirm("Do you want to enable Prettier?")?,
        connect_mongodb: confirm("Do you want to connect mongoDB database?")?,
    })
}

fn prompt_name() -> Result<ProjectName> {
    let input: String = cliclack::input("Enter your project name")
        .placeholder(DEFAULT_PROJECT_NAME)
        .default_input(DEFAULT_PROJECT_NAME)
        .validate(|input: &String| match ProjectName::parse(input.as_str()) {
            Ok(_) => Ok(()),
            Err(e) => Err(e.to_string()),
        })
        .interact()?;

    Ok(ProjectName::parse(input)?)
}

fn confirm(prompt: &str) -> Result<bool> {
    Ok(cliclack::confirm(prompt).initial_value(true).interact()?)
}

fn report_toolchain() -> Result<()> {
    let runtimes = check::check_toolchain();
    let summary = check::describe(&runtimes);

    if runtimes.iter().all(|r| r.available) {
        cliclack::log::success(format!("Detected tools: {}", summary))?;
    } else {
        cliclack::log::warning(format!(
            "Detected tools: {}. The project will be generated, but you need Node.js and npm to run it (https://nodejs.org)",
            summary
        ))?;
    }
    Ok(())
}

async fn resolve_and_compose(registry: &RegistryClient, flags: &FeatureFlags) -> Result<FileMapping> {
    let plan = DependencyPlan::for_flags(flags);

    let spinner = cliclack::spinner();
    spinner.start(format!("Resolving {} package versions...", plan.len()));

    match pipeline::prepare(registry, flags).await {
        Ok(mapping) => {
            spinner.stop(format!(
                "Resolved {} packages from {}",
                plan.len(),
                registry.base_url()
            ));
            Ok(mapping)
        }
        Err(e) => {
            spinner.stop("Failed to resolve package versions");
            Err(e.into())
        }
    }
}

async fn write_project(project_dir: &Path, mapping: &FileMapping) -> Result<EmitReport> {
    let spinner = cliclack::spinner();
    spinner.start("Setting up your project...");

    match emitter::emit(project_dir, mapping).await {
        Ok(report) => {
            spinner.stop(format!(
                "Created {} files in {}",
                report.files.len(),
                project_dir.display()
            ));
            Ok(report)
        }
        Err(e) => {
            spinner.stop("Project setup failed");
            Err(e).context("Files written before the failure were left in place")
        }
    }
}

async fn init_git(project_dir: &Path) -> Result<()> {
    let git = check::check_git();
    if !git.available {
        cliclack::log::warning("git is not installed; skipping repository initialization")?;
        return Ok(());
    }

    let spinner = cliclack::spinner();
    spinner.start("Initializing git repository...");

    match GitInitializer::default().initialize(project_dir).await {
        Ok(()) => spinner.stop("Git repository initialized"),
        Err(e) => {
            spinner.stop("Git initialization failed");
            cliclack::log::warning(format!("{}", e))?;
        }
    }

    Ok(())
}

fn print_next_steps<C: ProductConfig>(
    config: &C,
    project_dir: &Path,
    flags: &FeatureFlags,
) -> Result<()> {
    let steps = config.next_steps(project_dir, flags);

    cliclack::log::success(format!(
        "Project {} has been created successfully!",
        flags.project_name
    ))?;

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro("Hot coding!")?;

    Ok(())
}
