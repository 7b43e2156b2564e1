//! Terminal detection and capability utilities

use is_terminal::IsTerminal;
use std::env;
use std::io::{stderr, stdout};

/// Check if stdout is connected to an interactive terminal
pub fn is_interactive() -> bool {
    if !stdout().is_terminal() {
        return false;
    }

    // CI runners sometimes allocate a TTY but nobody is watching
    if is_ci_environment() {
        return false;
    }

    env::var("DEBIAN_FRONTEND").unwrap_or_default() != "noninteractive"
}

/// Check if stderr is connected to a terminal
pub fn stderr_is_terminal() -> bool {
    stderr().is_terminal()
}

/// Check if the terminal supports ANSI escape codes for colors
pub fn supports_ansi() -> bool {
    if env::var_os("NO_COLOR").is_some() {
        return false;
    }

    let term = env::var("TERM").unwrap_or_default();
    if term == "dumb" {
        return false;
    }

    #[cfg(windows)]
    {
        // Windows 10+ consoles handle ANSI
        true
    }

    #[cfg(not(windows))]
    {
        !term.is_empty()
    }
}

/// Detect if running in a CI environment
fn is_ci_environment() -> bool {
    let ci_vars = [
        "CI",
        "CONTINUOUS_INTEGRATION",
        "JENKINS_URL",
        "GITHUB_ACTIONS",
        "GITLAB_CI",
        "TRAVIS",
        "CIRCLECI",
        "BUILDKITE",
        "DRONE",
        "TEAMCITY_VERSION",
        "TF_BUILD", // Azure DevOps
    ];

    ci_vars.iter().any(|var| env::var(var).is_ok())
}

/// Whether stdout output should be colored
pub fn should_color_stdout(color_enabled: bool) -> bool {
    color_enabled && is_interactive() && supports_ansi()
}

/// Whether stderr messages should be colored
pub fn should_color_stderr(color_enabled: bool) -> bool {
    color_enabled && stderr_is_terminal() && supports_ansi()
}
