//! Product configuration trait for CLI binaries
//!
//! The binary implements this trait to define its identity, where package
//! versions are looked up, and what the user is told to do once the project
//! exists.

use crate::flags::FeatureFlags;
use std::path::Path;

/// Configuration trait for the CLI product
///
/// Defines:
/// - Product identity (name, display name)
/// - Registry URL and its override variable
/// - Post-setup instructions
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for CLI command, env vars)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Default base URL of the package registry
    fn default_registry_url(&self) -> &'static str;

    /// Environment variable name for overriding the registry URL
    fn registry_url_env(&self) -> &'static str;

    /// Generate the "next steps" instructions after project creation
    fn next_steps(&self, dir: &Path, flags: &FeatureFlags) -> Vec<String>;

    /// User agent string for HTTP requests
    fn user_agent(&self) -> &'static str {
        self.name()
    }
}
