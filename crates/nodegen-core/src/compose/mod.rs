//! Composition engine
//!
//! Turns a set of feature flags and resolved dependency versions into the
//! complete set of files for a new project:
//! - `catalog`: the static list of template units and their emit conditions
//! - `builder`: ordered import and middleware builders
//! - `entry` / `app`: the two files whose content depends on several flags
//! - `manifest`: `package.json` and the dependency plan feeding it
//!
//! Composition is pure. Every flag combination produces a coherent project and
//! the same inputs always produce byte-identical output.

pub mod builder;
pub mod catalog;
pub mod entry;
pub mod manifest;

mod app;

use crate::flags::FeatureFlags;
use std::collections::BTreeMap;

pub use builder::{Middleware, MiddlewareStack, SourceBuilder};
pub use catalog::{FileKind, TemplateUnit};
pub use entry::StartShape;
pub use manifest::{DependencyPlan, DependencyVersion, ResolvedDependencies};

/// Inputs available to every render function
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub flags: &'a FeatureFlags,
    pub dependencies: &'a ResolvedDependencies,
}

/// Relative output path to final file content, ordered by path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileMapping {
    files: BTreeMap<String, String>,
}

impl FileMapping {
    pub fn get(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.files.iter().map(|(p, c)| (p.as_str(), c.as_str()))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FromIterator<(String, String)> for FileMapping {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            files: iter.into_iter().collect(),
        }
    }
}

/// Build the file mapping for one generation run
pub fn compose(flags: &FeatureFlags, dependencies: &ResolvedDependencies) -> FileMapping {
    let ctx = RenderContext {
        flags,
        dependencies,
    };

    catalog::units()
        .iter()
        .filter(|unit| unit.is_emitted(flags))
        .map(|unit| (unit.path.to_string(), unit.render(&ctx)))
        .collect()
}
