//! npm registry lookups
//!
//! Resolves each planned package to its latest published version. Lookups
//! run concurrently but results always come back in plan order so the
//! generated manifest is reproducible.

use crate::compose::{DependencyPlan, DependencyVersion, ResolvedDependencies};
use crate::error::GenerateError;
use crate::product::ProductConfig;
use anyhow::{Context, Result};
use semver::Version;
use serde::Deserialize;
use std::time::Duration;
use tokio::task::JoinHandle;
use url::Url;

/// Per-request timeout for registry lookups
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Subset of the `/<package>/latest` document we rely on
#[derive(Debug, Deserialize)]
struct LatestRelease {
    version: String,
}

/// Client for the package registry
#[derive(Debug, Clone)]
pub struct RegistryClient {
    base_url: Url,
    client: reqwest::Client,
}

impl RegistryClient {
    /// Create a client for a registry base URL with a custom user agent
    pub fn new(base_url: Url, user_agent: &str) -> Self {
        Self {
            base_url,
            client: reqwest::Client::builder()
                .user_agent(user_agent)
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    /// Create a client from a product config, honoring its URL override variable
    pub fn from_config<C: ProductConfig>(config: &C) -> Result<Self> {
        let url_str = std::env::var(config.registry_url_env())
            .unwrap_or_else(|_| config.default_registry_url().to_string());
        let url =
            Url::parse(&url_str).with_context(|| format!("Invalid registry URL: {}", url_str))?;
        Ok(Self::new(url, config.user_agent()))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL of the latest-release document; scoped names stay one segment
    fn latest_url(&self, package: &str) -> Result<Url, GenerateError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                GenerateError::resolution(package, format!("invalid registry URL {}", self.base_url))
            })?
            .pop_if_empty()
            .push(package)
            .push("latest");
        Ok(url)
    }

    /// Fetch the latest published version of one package
    pub async fn latest_version(&self, package: &str) -> Result<DependencyVersion, GenerateError> {
        let url = self.latest_url(package)?;
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| GenerateError::resolution(package, e))?;

        if !response.status().is_success() {
            return Err(GenerateError::resolution(
                package,
                format!("HTTP {} from {}", response.status(), url),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| GenerateError::resolution(package, e))?;
        parse_release(package, &body)
    }

    /// Resolve every package in the plan.
    ///
    /// All lookups are issued before any is awaited; results are collected in
    /// declaration order. The first failure aborts the whole resolution and
    /// cancels the lookups still in flight.
    pub async fn resolve_plan(
        &self,
        plan: &DependencyPlan,
    ) -> Result<ResolvedDependencies, GenerateError> {
        let runtime = self.spawn_lookups(&plan.runtime);
        let dev = self.spawn_lookups(&plan.dev);

        let runtime = match join_in_order(runtime).await {
            Ok(resolved) => resolved,
            Err(e) => {
                abort_all(dev);
                return Err(e);
            }
        };

        Ok(ResolvedDependencies {
            runtime,
            dev: join_in_order(dev).await?,
        })
    }

    fn spawn_lookups(&self, packages: &[&'static str]) -> Vec<Lookup> {
        packages
            .iter()
            .map(|&package| {
                let client = self.clone();
                let handle = tokio::spawn(async move { client.latest_version(package).await });
                (package, handle)
            })
            .collect()
    }
}

type Lookup = (&'static str, JoinHandle<Result<DependencyVersion, GenerateError>>);

async fn join_in_order(lookups: Vec<Lookup>) -> Result<Vec<DependencyVersion>, GenerateError> {
    let mut resolved = Vec::with_capacity(lookups.len());
    let mut pending = lookups.into_iter();
    while let Some((package, handle)) = pending.next() {
        let result = handle
            .await
            .map_err(|e| GenerateError::resolution(package, format!("lookup task failed: {e}")))
            .and_then(|lookup| lookup);
        match result {
            Ok(dependency) => resolved.push(dependency),
            Err(e) => {
                abort_all(pending);
                return Err(e);
            }
        }
    }
    Ok(resolved)
}

/// Dropping a `JoinHandle` detaches its task, so lookups are aborted explicitly
fn abort_all(lookups: impl IntoIterator<Item = Lookup>) {
    for (_, handle) in lookups {
        handle.abort();
    }
}

/// Parse a latest-release document into a dependency version
fn parse_release(package: &str, body: &str) -> Result<DependencyVersion, GenerateError> {
    let release: LatestRelease = serde_json::from_str(body)
        .map_err(|e| GenerateError::resolution(package, format!("malformed response: {e}")))?;
    let version = Version::parse(release.version.trim()).map_err(|e| {
        GenerateError::resolution(package, format!("invalid version '{}': {e}", release.version))
    })?;
    Ok(DependencyVersion::new(package, version))
}
