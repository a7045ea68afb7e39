// ============================================================================
// vidtag-cli/src/logging.rs
// ============================================================================
//
// LOGGING SETUP: env_logger backend for the `log` facade
//
// Log lines go to stderr so they never mix with the plan table or JSON on
// stdout. The default level is `warn` (`debug` with --verbose); RUST_LOG
// overrides both:
// - RUST_LOG=info: one line per discovery, plan and rename step
// - RUST_LOG=debug: per-file probe and skip details

use console::style;
use env_logger::Env;
use log::Level;
use std::io::Write;

/// Default filter for a run, before any RUST_LOG override.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "warn" }
}

/// Initializes env_logger. Safe to call more than once; later calls are ignored.
pub fn init(verbose: bool) {
    let result = env_logger::Builder::from_env(Env::default().default_filter_or(default_filter(verbose)))
        .format(|buf, record| {
            let level = match record.level() {
                Level::Error => style("ERROR").red().bold(),
                Level::Warn => style("WARN ").yellow(),
                Level::Info => style("INFO ").green(),
                Level::Debug => style("DEBUG").blue(),
                Level::Trace => style("TRACE").magenta(),
            };
            writeln!(buf, "{} {}", level, record.args())
        })
        .try_init();

    if result.is_ok() {
        log::debug!("Logger initialized (verbose: {})", verbose);
    }
}
