//! Human and machine output on stdout.
//!
//! Diagnostics go through `tracing` to stderr; this module only prints
//! results. In JSON mode a command prints exactly one document.

use std::io::{self, IsTerminal};

use clap::ValueEnum;
use console::Term;
use owo_colors::{AnsiColors, OwoColorize};
use serde::Serialize;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Leading symbol and color of a result line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// A file was written or a marker inserted.
    Done,
    /// Nothing to do, e.g. an existing file was kept.
    Unchanged,
    /// Worth the user's attention but not a failure.
    Notice,
}

impl Status {
    fn symbol(self) -> &'static str {
        match self {
            Self::Done => "\u{2713}",
            Self::Unchanged => "\u{2022}",
            Self::Notice => "!",
        }
    }

    fn color(self) -> AnsiColors {
        match self {
            Self::Done => AnsiColors::Green,
            Self::Unchanged => AnsiColors::Blue,
            Self::Notice => AnsiColors::Yellow,
        }
    }
}

pub struct OutputManager {
    format: OutputFormat,
    quiet: bool,
    color: bool,
    term: Term,
}

impl OutputManager {
    /// `--output-format` wins over `output.format` from the config; `auto`
    /// picks human output on a terminal and plain output otherwise.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let requested = match args.output_format {
            OutputFormat::Auto => {
                OutputFormat::from_str(&config.output.format, true).unwrap_or_default()
            }
            explicit => explicit,
        };
        let format = match requested {
            OutputFormat::Auto if io::stdout().is_terminal() => OutputFormat::Human,
            OutputFormat::Auto => OutputFormat::Plain,
            resolved => resolved,
        };
        let color = !(args.no_color || config.output.no_color || format == OutputFormat::Plain);

        Self {
            format,
            quiet: args.quiet,
            color,
            term: Term::stdout(),
        }
    }

    /// One result line, e.g. `✓ written batch/v1/cronjob_types.go`.
    /// Suppressed by `--quiet`.
    pub fn status(&self, status: Status, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.color {
            format!(
                "{} {msg}",
                status.symbol().color(status.color()).bold()
            )
        } else {
            format!("{} {msg}", status.symbol())
        };
        self.term.write_line(&line)
    }

    /// Closing summary line.
    pub fn summary(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        if self.color {
            self.term.write_line(&text.cyan().bold().to_string())
        } else {
            self.term.write_line(text)
        }
    }

    /// Pretty JSON on stdout. Not affected by `--quiet`.
    pub fn json<T: Serialize>(&self, value: &T) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&text)
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    pub fn supports_color(&self) -> bool {
        self.color
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn args(quiet: bool, no_color: bool, output_format: OutputFormat) -> GlobalArgs {
        GlobalArgs {
            verbose: 0,
            quiet,
            no_color,
            config: None,
            project_dir: PathBuf::from("."),
            output_format,
        }
    }

    fn manager(quiet: bool, no_color: bool, format: OutputFormat) -> OutputManager {
        OutputManager::new(&args(quiet, no_color, format), &AppConfig::default())
    }

    #[test]
    fn quiet_status_lines_are_dropped() {
        let out = manager(true, true, OutputFormat::Human);
        assert!(out.status(Status::Done, "written main.go").is_ok());
        assert!(out.summary("Scaffolded batch/v1, Kind=CronJob").is_ok());
    }

    #[test]
    fn no_color_flag_is_honoured() {
        assert!(manager(false, false, OutputFormat::Human).supports_color());
        assert!(!manager(false, true, OutputFormat::Human).supports_color());
    }

    #[test]
    fn plain_format_has_no_color() {
        let out = manager(false, false, OutputFormat::Plain);
        assert!(!out.is_json());
        assert!(!out.supports_color());
    }

    #[test]
    fn config_no_color_applies() {
        let mut config = AppConfig::default();
        config.output.no_color = true;
        let out = OutputManager::new(&args(false, false, OutputFormat::Human), &config);
        assert!(!out.supports_color());
    }

    #[test]
    fn config_format_applies_when_flag_is_auto() {
        let mut config = AppConfig::default();
        config.output.format = "json".into();
        let out = OutputManager::new(&args(false, true, OutputFormat::Auto), &config);
        assert!(out.is_json());
    }

    #[test]
    fn explicit_flag_beats_config_format() {
        let mut config = AppConfig::default();
        config.output.format = "json".into();
        let out = OutputManager::new(&args(false, true, OutputFormat::Plain), &config);
        assert!(!out.is_json());
    }

    #[test]
    fn json_is_printed_even_when_quiet() {
        let out = manager(true, true, OutputFormat::Json);
        assert!(out.is_json());
        assert!(out.json(&serde_json::json!({ "applied": ["scheme"] })).is_ok());
    }
}
