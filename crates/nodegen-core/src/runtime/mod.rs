//! Runtime detection
//!
//! Advisory checks for Node.js, npm and git. Nothing here blocks generation.

pub mod check;

pub use check::{check_git, check_node, check_npm, check_toolchain, RuntimeInfo};
