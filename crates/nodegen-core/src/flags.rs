//! Feature flags captured from the user for one generation run

use crate::error::GenerateError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Name used when the user accepts the default
pub const DEFAULT_PROJECT_NAME: &str = "my-node-app";

/// npm rejects package names longer than this
const MAX_NAME_LEN: usize = 214;

const RESERVED_CHARS: &[char] = &['/', '\\', '<', '>', ':', '"', '|', '?', '*'];

/// A project name that is safe to use as a directory and package name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProjectName(String);

impl ProjectName {
    pub fn parse(name: impl Into<String>) -> Result<Self, GenerateError> {
        let name = name.into();
        match Self::check(&name) {
            Ok(()) => Ok(Self(name)),
            Err(reason) => Err(GenerateError::InvalidName { name, reason }),
        }
    }

    fn check(name: &str) -> Result<(), &'static str> {
        if name.trim().is_empty() {
            return Err("name must not be empty");
        }
        if name.trim() != name {
            return Err("name must not start or end with whitespace");
        }
        if name == "." || name == ".." {
            return Err("name must not be a relative path");
        }
        if name.starts_with('.') || name.starts_with('_') {
            return Err("name must not start with '.' or '_'");
        }
        if name.chars().any(|c| RESERVED_CHARS.contains(&c)) {
            return Err("name must not contain path separators or any of <>:\"|?*");
        }
        if name.chars().any(char::is_control) {
            return Err("name must not contain control characters");
        }
        if name.len() > MAX_NAME_LEN {
            return Err("name must be at most 214 characters");
        }
        Ok(())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ProjectName {
    type Error = GenerateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<ProjectName> for String {
    fn from(name: ProjectName) -> Self {
        name.0
    }
}

impl AsRef<Path> for ProjectName {
    fn as_ref(&self) -> &Path {
        Path::new(&self.0)
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn enabled() -> bool {
    true
}

fn default_name() -> ProjectName {
    ProjectName(DEFAULT_PROJECT_NAME.to_string())
}

/// Resolved user configuration. Built once, read-only for the rest of the run.
///
/// Every flag defaults to `true`, which is also the default answer offered by
/// the interactive prompts, so a partial preset behaves like pressing enter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureFlags {
    #[serde(rename = "name", default = "default_name")]
    pub project_name: ProjectName,

    /// CORS config, allowed origins and the credentials middleware
    #[serde(default = "enabled")]
    pub use_cors: bool,

    /// `.env` file loaded through dotenv
    #[serde(default = "enabled")]
    pub use_env_file: bool,

    /// morgan request logging piped into a winston logger
    #[serde(default = "enabled")]
    pub use_morgan_winston: bool,

    /// asyncHandler, ApiResponse and ApiError utilities
    #[serde(default = "enabled")]
    pub use_res_err_async_handler: bool,

    /// git ignore/attributes files and repository initialization
    #[serde(default = "enabled")]
    pub use_github: bool,

    /// Prettier config and ignore files
    #[serde(default = "enabled")]
    pub use_prettier: bool,

    /// mongoose connector and DB_NAME constant
    #[serde(default = "enabled")]
    pub connect_mongodb: bool,
}

impl FeatureFlags {
    /// All features enabled, as offered by the prompts
    pub fn with_defaults(project_name: ProjectName) -> Self {
        Self {
            project_name,
            use_cors: true,
            use_env_file: true,
            use_morgan_winston: true,
            use_res_err_async_handler: true,
            use_github: true,
            use_prettier: true,
            connect_mongodb: true,
        }
    }

    /// Parse flags from a YAML preset document
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context("Failed to parse preset")
    }

    /// Load flags from a YAML preset file
    pub fn load_preset(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read preset {}", path.display()))?;
        Self::from_yaml(&content).with_context(|| format!("Invalid preset {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_ordinary_names() {
        for name in ["demo", "my-node-app", "api_v2", "Service.Backend", "a"] {
            assert!(ProjectName::parse(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn test_rejects_unsafe_names() {
        let long = "x".repeat(215);
        for name in [
            "",
            "   ",
            ".",
            "..",
            "../escape",
            "nested/dir",
            "back\\slash",
            "what?",
            "star*",
            ".hidden",
            "_private",
            " padded",
            "tab\there",
            long.as_str(),
        ] {
            let err = ProjectName::parse(name).unwrap_err();
            assert!(
                matches!(err, GenerateError::InvalidName { .. }),
                "{name:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_preset_defaults_every_flag_to_true() {
        let flags = FeatureFlags::from_yaml("name: demo\n").unwrap();
        assert_eq!(
            flags,
            FeatureFlags::with_defaults(ProjectName::parse("demo").unwrap())
        );
    }

    #[test]
    fn test_preset_overrides_individual_flags() {
        let flags = FeatureFlags::from_yaml(
            "name: api\nuse_cors: false\nconnect_mongodb: false\nuse_github: false\n",
        )
        .unwrap();
        assert_eq!(flags.project_name.as_str(), "api");
        assert!(!flags.use_cors);
        assert!(!flags.connect_mongodb);
        assert!(!flags.use_github);
        assert!(flags.use_env_file);
        assert!(flags.use_prettier);
    }

    #[test]
    fn test_preset_without_name_uses_default() {
        let flags = FeatureFlags::from_yaml("use_prettier: false\n").unwrap();
        assert_eq!(flags.project_name.as_str(), DEFAULT_PROJECT_NAME);
        assert!(!flags.use_prettier);
    }

    #[test]
    fn test_preset_rejects_unsafe_name() {
        assert!(FeatureFlags::from_yaml("name: ../etc\n").is_err());
    }
}
