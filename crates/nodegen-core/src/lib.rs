//! nodegen core - project scaffolding for Express.js services
//!
//! Given a set of feature flags, this library composes a coherent set of
//! source files for a new Node.js project, resolves the latest version of
//! every package the project depends on, and writes the result to disk.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - flag validation, the pure composition
//!   engine, registry lookups, filesystem emission, git initialization
//! - **Layer 2: Workflow Orchestration** - `ProductConfig` trait and the
//!   `pipeline` module for custom UIs
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use nodegen_core::{compose, DependencyPlan, FeatureFlags, ProjectName, RegistryClient};
//!
//! let flags = FeatureFlags::with_defaults(ProjectName::parse("demo")?);
//! let registry = RegistryClient::from_config(&MyConfig)?;
//! let deps = registry.resolve_plan(&DependencyPlan::for_flags(&flags)).await?;
//! let mapping = compose(&flags, &deps);
//! nodegen_core::emitter::emit(Path::new("demo"), &mapping).await?;
//! ```

pub mod compose;
pub mod emitter;
pub mod error;
pub mod flags;
pub mod pipeline;
pub mod product;
pub mod registry;
pub mod runtime;
pub mod vcs;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use compose::{
    compose, DependencyPlan, DependencyVersion, FileKind, FileMapping, ResolvedDependencies,
};
pub use emitter::{emit, EmitReport};
pub use error::{GenerateError, VcsError};
pub use flags::{FeatureFlags, ProjectName};
pub use product::ProductConfig;
pub use registry::RegistryClient;
pub use vcs::GitInitializer;

#[cfg(feature = "tui")]
pub use tui::run;

/// Default npm registry
pub const DEFAULT_REGISTRY_URL: &str = "https://registry.npmjs.org";
