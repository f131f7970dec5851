//! Tracing subscriber setup for the `kubeforge` binary.
//!
//! The engine crates only emit events; this is the one place that installs a
//! subscriber. Output goes to stderr so `--output-format json` keeps stdout
//! machine readable.
//!
//! `-q` maps to ERROR, no flag to WARN, then `-v`/`-vv`/`-vvv` step through
//! INFO, DEBUG and TRACE. `RUST_LOG` replaces the computed filter entirely.

use std::io::IsTerminal as _;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::GlobalArgs;

/// Crates whose events are shown without `RUST_LOG`.
const LOG_TARGETS: [&str; 3] = ["kubeforge", "kubeforge_core", "kubeforge_adapters"];

/// What the subscriber needs to know, resolved from the global flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LogSettings {
    level: LevelFilter,
    ansi: bool,
}

impl LogSettings {
    fn from_args(args: &GlobalArgs, stderr_is_terminal: bool) -> Self {
        let level = if args.quiet {
            LevelFilter::ERROR
        } else {
            match args.verbose {
                0 => LevelFilter::WARN,
                1 => LevelFilter::INFO,
                2 => LevelFilter::DEBUG,
                _ => LevelFilter::TRACE,
            }
        };
        Self {
            level,
            ansi: !args.no_color && stderr_is_terminal,
        }
    }

    fn directives(&self) -> String {
        LOG_TARGETS
            .iter()
            .map(|target| format!("{target}={}", self.level))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Install the global subscriber. Call once, before the first event.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let settings = LogSettings::from_args(args, std::io::stderr().is_terminal());

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.directives()));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .without_time()
        .with_ansi(settings.ansi)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))
}
