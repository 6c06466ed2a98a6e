//! `package.json` composition and the dependency plan behind it

use super::RenderContext;
use crate::flags::FeatureFlags;
use semver::Version;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// A package pinned to the version the registry reported as latest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyVersion {
    pub name: String,
    pub version: Version,
}

impl DependencyVersion {
    pub fn new(name: impl Into<String>, version: Version) -> Self {
        Self {
            name: name.into(),
            version,
        }
    }

    /// Caret range accepting compatible updates of the resolved version
    pub fn caret_range(&self) -> String {
        format!("^{}", self.version)
    }
}

/// Package names to resolve for a set of flags, in declaration order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyPlan {
    pub runtime: Vec<&'static str>,
    pub dev: Vec<&'static str>,
}

impl DependencyPlan {
    pub fn for_flags(flags: &FeatureFlags) -> Self {
        let mut runtime = vec!["express"];
        if flags.use_cors {
            runtime.push("cors");
        }
        if flags.use_env_file {
            runtime.push("dotenv");
        }
        if flags.connect_mongodb {
            runtime.extend(["mongoose", "mongoose-aggregate-paginate-v2"]);
        }
        if flags.use_morgan_winston {
            runtime.extend(["winston", "morgan"]);
        }

        let mut dev = vec!["nodemon"];
        if flags.use_prettier {
            dev.push("prettier");
        }

        Self { runtime, dev }
    }

    pub fn len(&self) -> usize {
        self.runtime.len() + self.dev.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Resolved runtime and development dependencies, in plan order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedDependencies {
    pub runtime: Vec<DependencyVersion>,
    pub dev: Vec<DependencyVersion>,
}

/// Serializes as a JSON object while keeping the slice order
struct DependencyMap<'a>(&'a [DependencyVersion]);

impl Serialize for DependencyMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for dependency in self.0 {
            map.serialize_entry(&dependency.name, &dependency.caret_range())?;
        }
        map.end()
    }
}

#[derive(Serialize)]
struct Scripts<'a> {
    dev: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PackageJson<'a> {
    name: &'a str,
    version: &'a str,
    description: &'a str,
    #[serde(rename = "type")]
    module_type: &'a str,
    main: &'a str,
    scripts: Scripts<'a>,
    keywords: [&'a str; 0],
    author: &'a str,
    license: &'a str,
    dev_dependencies: DependencyMap<'a>,
    dependencies: DependencyMap<'a>,
}

const DEV_SCRIPT_WITH_ENV: &str =
    "nodemon -r dotenv/config --experimental-json-modules src/index.js";
const DEV_SCRIPT: &str = "nodemon --experimental-json-modules src/index.js";

pub(crate) fn render(ctx: &RenderContext<'_>) -> String {
    let name = ctx.flags.project_name.as_str();
    let package = PackageJson {
        name,
        version: "1.0.0",
        description: name,
        module_type: "module",
        main: "index.js",
        scripts: Scripts {
            dev: if ctx.flags.use_env_file {
                DEV_SCRIPT_WITH_ENV
            } else {
                DEV_SCRIPT
            },
        },
        keywords: [],
        author: "",
        license: "ISC",
        dev_dependencies: DependencyMap(&ctx.dependencies.dev),
        dependencies: DependencyMap(&ctx.dependencies.runtime),
    };

    // Every key is a string, so serialization has no failure path.
    let mut out = serde_json::to_string_pretty(&package).expect("package.json is serializable");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::ProjectName;

    fn flags(name: &str) -> FeatureFlags {
        FeatureFlags::with_defaults(ProjectName::parse(name).unwrap())
    }

    fn dep(name: &str, version: &str) -> DependencyVersion {
        DependencyVersion::new(name, Version::parse(version).unwrap())
    }

    #[test]
    fn test_plan_with_everything_enabled() {
        let plan = DependencyPlan::for_flags(&flags("demo"));
        assert_eq!(
            plan.runtime,
            vec![
                "express",
                "cors",
                "dotenv",
                "mongoose",
                "mongoose-aggregate-paginate-v2",
                "winston",
                "morgan",
            ]
        );
        assert_eq!(plan.dev, vec!["nodemon", "prettier"]);
        assert_eq!(plan.len(), 9);
    }

    #[test]
    fn test_plan_with_everything_disabled() {
        let mut f = flags("demo");
        f.use_cors = false;
        f.use_env_file = false;
        f.connect_mongodb = false;
        f.use_morgan_winston = false;
        f.use_prettier = false;
        let plan = DependencyPlan::for_flags(&f);
        assert_eq!(plan.runtime, vec!["express"]);
        assert_eq!(plan.dev, vec!["nodemon"]);
    }

    #[test]
    fn test_caret_range() {
        assert_eq!(dep("express", "4.21.2").caret_range(), "^4.21.2");
        assert_eq!(dep("next", "15.0.0-rc.1").caret_range(), "^15.0.0-rc.1");
    }

    #[test]
    fn test_manifest_layout() {
        let mut f = flags("demo");
        f.use_env_file = false;
        let deps = ResolvedDependencies {
            runtime: vec![dep("express", "4.21.2"), dep("cors", "2.8.5")],
            dev: vec![dep("nodemon", "3.1.9")],
        };
        let rendered = render(&RenderContext {
            flags: &f,
            dependencies: &deps,
        });

        let expected = r#"{
  "name": "demo",
  "version": "1.0.0",
  "description": "demo",
  "type": "module",
  "main": "index.js",
  "scripts": {
    "dev": "nodemon --experimental-json-modules src/index.js"
  },
  "keywords": [],
  "author": "",
  "license": "ISC",
  "devDependencies": {
    "nodemon": "^3.1.9"
  },
  "dependencies": {
    "express": "^4.21.2",
    "cors": "^2.8.5"
  }
}
"#;
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_dev_script_preloads_dotenv_with_env_file() {
        let f = flags("demo");
        let rendered = render(&RenderContext {
            flags: &f,
            dependencies: &ResolvedDependencies::default(),
        });
        let json: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(json["scripts"]["dev"], DEV_SCRIPT_WITH_ENV);
        assert_eq!(json["dependencies"], serde_json::json!({}));
    }

    #[test]
    fn test_dependency_order_follows_input_not_alphabet() {
        let f = flags("demo");
        let deps = ResolvedDependencies {
            runtime: vec![dep("winston", "3.0.0"), dep("cors", "2.8.5")],
            dev: vec![],
        };
        let rendered = render(&RenderContext {
            flags: &f,
            dependencies: &deps,
        });
        let winston = rendered.find("\"winston\"").unwrap();
        let cors = rendered.find("\"cors\"").unwrap();
        assert!(winston < cors);
    }
}
