//! Detection of the external tools a generated project relies on

use std::process::Command;

/// Tool detection result
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

/// Run `<program> --version` and report what was found
pub fn probe(program: &str, name: &'static str) -> RuntimeInfo {
    let output = Command::new(program).arg("--version").output();

    match output {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout).trim().to_string();
            RuntimeInfo {
                name,
                version: Some(version),
                available: true,
            }
        }
        _ => RuntimeInfo {
            name,
            version: None,
            available: false,
        },
    }
}

/// Check if Node.js is available
pub fn check_node() -> RuntimeInfo {
    probe("node", "Node.js")
}

/// Check if npm is available
pub fn check_npm() -> RuntimeInfo {
    probe("npm", "npm")
}

/// Check if git is available
pub fn check_git() -> RuntimeInfo {
    probe("git", "git")
}

/// Tools needed to install and run the generated project.
///
/// Missing tools are reported but never stop generation.
pub fn check_toolchain() -> Vec<RuntimeInfo> {
    vec![check_node(), check_npm()]
}

/// Human-readable summary, e.g. `Node.js (v20.11.0), npm (not installed)`
pub fn describe(runtimes: &[RuntimeInfo]) -> String {
    runtimes
        .iter()
        .map(|r| {
            if r.available {
                format!("{} ({})", r.name, r.version.as_deref().unwrap_or("unknown"))
            } else {
                format!("{} (not installed)", r.name)
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_is_unavailable() {
        let info = probe("nodegen-no-such-program", "Nothing");
        assert!(!info.available);
        assert!(info.version.is_none());
        assert_eq!(info.name, "Nothing");
    }

    #[test]
    fn test_describe_formats_each_runtime() {
        let runtimes = [
            RuntimeInfo {
                name: "Node.js",
                version: Some("v20.11.0".to_string()),
                available: true,
            },
            RuntimeInfo {
                name: "npm",
                version: None,
                available: false,
            },
        ];
        assert_eq!(
            describe(&runtimes),
            "Node.js (v20.11.0), npm (not installed)"
        );
    }
}
