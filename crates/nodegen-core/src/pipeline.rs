//! Generation run without any UI
//!
//! Orders the steps so that nothing reaches the disk until the target is known
//! to be free and every dependency version has been resolved.

use crate::compose::{compose, DependencyPlan, FileMapping};
use crate::emitter::{self, EmitReport};
use crate::error::GenerateError;
use crate::flags::FeatureFlags;
use crate::registry::RegistryClient;
use std::path::Path;

/// Resolve dependencies and compose the project, without writing anything
pub async fn prepare(
    registry: &RegistryClient,
    flags: &FeatureFlags,
) -> Result<FileMapping, GenerateError> {
    let plan = DependencyPlan::for_flags(flags);
    let dependencies = registry.resolve_plan(&plan).await?;
    Ok(compose(flags, &dependencies))
}

/// Generate a project under `root`
pub async fn generate_project(
    registry: &RegistryClient,
    flags: &FeatureFlags,
    root: &Path,
) -> Result<EmitReport, GenerateError> {
    emitter::ensure_available(root)?;
    let mapping = prepare(registry, flags).await?;
    emitter::emit(root, &mapping).await
}
