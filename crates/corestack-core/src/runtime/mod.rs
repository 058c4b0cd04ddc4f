//! Runtime and package manager detection

pub mod check;

pub use check::{check_runtimes, check_tool, detect_package_manager, ToolInfo};
