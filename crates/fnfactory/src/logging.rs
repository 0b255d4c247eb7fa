//! Tracing subscriber setup for binaries.

use std::error::Error;

use tracing_subscriber::EnvFilter;

/// Environment variable that overrides every other filter source.
pub const LOG_ENV: &str = "FNFACTORY_LOG";

/// Directive used by `-v`.
pub const VERBOSE_DIRECTIVE: &str = "fnfactory=trace,debug";

/// Picks the filter directive: a non-empty `from_env` first, then
/// [`VERBOSE_DIRECTIVE`] when verbose, then `default_directive`.
pub fn filter_directive<'a>(
    from_env: Option<&'a str>,
    default_directive: &'a str,
    verbose: bool,
) -> &'a str {
    match from_env {
        Some(directive) if !directive.trim().is_empty() => directive,
        _ if verbose => VERBOSE_DIRECTIVE,
        _ => default_directive,
    }
}

/// Builds the filter from `FNFACTORY_LOG`, `verbose` and `default_directive`,
/// in that order of precedence.
pub fn env_filter(default_directive: &str, verbose: bool) -> EnvFilter {
    let from_env = std::env::var(LOG_ENV).ok();
    EnvFilter::new(filter_directive(
        from_env.as_deref(),
        default_directive,
        verbose,
    ))
}

/// Installs a stderr `fmt` subscriber.
///
/// Fails if a global subscriber is already set.
pub fn init_tracing(
    default_directive: &str,
    verbose: bool,
) -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_directive, verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
}
