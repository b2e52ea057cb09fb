//! Shared configuration defaults.
//!
//! Default values and environment variable names used across the crates,
//! kept in one place so the library and the command-line tool agree.

/// Environment variable names
pub mod env_vars {
    /// Device fixture file read by the command-line tool.
    pub const DEVICES_FILE: &str = "SOLID_DEVICES_FILE";
    /// Emit logs as JSON instead of the compact human format.
    pub const LOG_JSON: &str = "SOLID_LOG_JSON";
    /// Bracket nesting limit for predicates read by the command-line tool.
    /// Library parsing is unlimited unless the caller opts in.
    pub const PREDICATE_MAX_DEPTH: &str = "SOLID_PREDICATE_MAX_DEPTH";
}

/// Logging defaults
pub mod defaults {
    pub const LOG_FILTER: &str =
        "solid_core=info,solid_predicate=info,solid_devices=info,solid_hardware=info";
    pub const VERBOSE_LOG_FILTER: &str =
        "solid_core=debug,solid_predicate=debug,solid_devices=debug,solid_hardware=debug";
}

/// Predicate parser settings
pub mod predicate {
    use super::env_vars;

    /// Nesting limit from the environment, if one is set.
    pub fn max_depth() -> Option<usize> {
        std::env::var(env_vars::PREDICATE_MAX_DEPTH)
            .ok()
            .and_then(|s| parse_depth(&s))
    }

    pub(super) fn parse_depth(value: &str) -> Option<usize> {
        value.trim().parse().ok().filter(|depth| *depth > 0)
    }
}

/// Whether JSON logging is requested.
pub fn log_json() -> bool {
    std::env::var(env_vars::LOG_JSON)
        .ok()
        .map(|v| parse_flag(&v))
        .unwrap_or(false)
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
