//! Version information for the service, populated at build time.
//!
//! Display format is `{channel}:{info}`:
//! - Prod: `stable:{package version}`
//! - Local/Test: `main:{short commit}`

/// Runtime environment, resolved from configuration at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEnv {
    /// Local development
    Local,
    /// Production
    Prod,
    /// Test environment
    Test,
}

/// Get the build date in RFC3339 format.
pub fn build_date() -> &'static str {
    env!("BUILD_DATE")
}

/// Get the git commit hash (short).
pub fn build_commit() -> &'static str {
    env!("BUILD_COMMIT")
}

/// Get the package version.
pub fn build_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Format the version string for a runtime-determined environment.
pub fn format_version_for_runtime_env(env: RuntimeEnv) -> String {
    match env {
        RuntimeEnv::Prod => format!("stable:{}", build_version()),
        RuntimeEnv::Local | RuntimeEnv::Test => format!("main:{}", build_commit()),
    }
}
