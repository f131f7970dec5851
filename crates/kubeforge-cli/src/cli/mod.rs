//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "kubeforge",
    bin_name = "kubeforge",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Scaffold Kubernetes APIs and webhooks",
    long_about = "kubeforge generates API types, controllers and admission webhooks \
                  for an operator project and wires them into its entry point.",
    after_help = "EXAMPLES:\n\
        \x20 kubeforge create api --group batch --version v1 --kind CronJob\n\
        \x20 kubeforge create webhook --group batch --version v1 --kind CronJob --defaulting\n\
        \x20 kubeforge completions bash > /usr/share/bash-completion/completions/kubeforge",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scaffold a Kubernetes API or webhook.
    #[command(about = "Scaffold a Kubernetes API or webhook", subcommand)]
    Create(CreateCommands),

    /// Write a default configuration file.
    #[command(
        name = "init-config",
        about = "Write a default configuration file",
        after_help = "EXAMPLES:\n\
            \x20 kubeforge init-config\n\
            \x20 kubeforge init-config --force"
    )]
    InitConfig(InitConfigArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 kubeforge completions bash > ~/.local/share/bash-completion/completions/kubeforge\n\
            \x20 kubeforge completions zsh  > ~/.zfunc/_kubeforge\n\
            \x20 kubeforge completions fish > ~/.config/fish/completions/kubeforge.fish"
    )]
    Completions(CompletionsArgs),
}

/// Subcommands for `kubeforge create`.
#[derive(Debug, Subcommand)]
pub enum CreateCommands {
    /// Scaffold API types and a controller.
    #[command(
        about = "Scaffold a Kubernetes API",
        after_help = "EXAMPLES:\n\
            \x20 kubeforge create api --group batch --version v1 --kind CronJob\n\
            \x20 kubeforge create api --group ship --version v1beta1 --kind Frigate --controller false"
    )]
    Api(ApiArgs),

    /// Scaffold an admission webhook for an existing API.
    #[command(
        about = "Scaffold a webhook for an API resource",
        after_help = "EXAMPLES:\n\
            \x20 kubeforge create webhook --group batch --version v1 --kind CronJob --defaulting\n\
            \x20 kubeforge create webhook --group batch --version v1 --kind CronJob \\\n\
            \x20     --defaulting --programmatic-validation"
    )]
    Webhook(WebhookArgs),
}

// ── resource identity ─────────────────────────────────────────────────────────

/// Group/version/kind shared by every `create` subcommand.
#[derive(Debug, Clone, Args)]
pub struct ResourceArgs {
    /// API group, e.g. `batch`.
    #[arg(long = "group", value_name = "GROUP", help = "Resource group")]
    pub group: String,

    /// API version, e.g. `v1` or `v1beta1`.
    #[arg(long = "version", value_name = "VERSION", help = "Resource version")]
    pub version: String,

    /// Kind in CamelCase, e.g. `CronJob`.
    #[arg(long = "kind", value_name = "KIND", help = "Resource kind")]
    pub kind: String,

    /// Override the derived plural form.
    #[arg(
        long = "plural",
        value_name = "PLURAL",
        help = "Resource plural (default: derived from kind)"
    )]
    pub plural: Option<String>,
}

// ── create api ────────────────────────────────────────────────────────────────

/// Arguments for `kubeforge create api`.
#[derive(Debug, Args)]
pub struct ApiArgs {
    #[command(flatten)]
    pub resource: ResourceArgs,

    /// Generate the API types.
    #[arg(
        long = "resource",
        num_args = 0..=1,
        default_value_t = true,
        default_missing_value = "true",
        action = clap::ArgAction::Set,
        help = "Generate the resource without prompting"
    )]
    pub make_resource: bool,

    /// Generate the controller.
    #[arg(
        long = "controller",
        num_args = 0..=1,
        default_value_t = true,
        default_missing_value = "true",
        action = clap::ArgAction::Set,
        help = "Generate the controller without prompting"
    )]
    pub make_controller: bool,

    /// Overwrite existing files.
    #[arg(long = "force", help = "Attempt to create resource even if it already exists")]
    pub force: bool,
}

// ── create webhook ────────────────────────────────────────────────────────────

/// Arguments for `kubeforge create webhook`.
#[derive(Debug, Args)]
pub struct WebhookArgs {
    #[command(flatten)]
    pub resource: ResourceArgs,

    /// Scaffold a defaulting (mutating) webhook.
    #[arg(long = "defaulting", help = "If set, scaffold the defaulting webhook")]
    pub defaulting: bool,

    /// Scaffold a validating webhook.
    #[arg(
        long = "programmatic-validation",
        help = "If set, scaffold the validating webhook"
    )]
    pub validation: bool,

    /// Overwrite existing files.
    #[arg(long = "force", help = "Attempt to create resource even if it already exists")]
    pub force: bool,
}

// ── init-config ───────────────────────────────────────────────────────────────

/// Arguments for `kubeforge init-config`.
#[derive(Debug, Args)]
pub struct InitConfigArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `kubeforge completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_create_api_defaults_to_resource_and_controller() {
        let cli = Cli::parse_from([
            "kubeforge", "create", "api", "--group", "batch", "--version", "v1", "--kind",
            "CronJob",
        ]);
        let Commands::Create(CreateCommands::Api(args)) = cli.command else {
            panic!("expected create api");
        };
        assert_eq!(args.resource.kind, "CronJob");
        assert!(args.make_resource);
        assert!(args.make_controller);
        assert!(!args.force);
    }

    #[test]
    fn controller_can_be_turned_off() {
        let cli = Cli::parse_from([
            "kubeforge", "create", "api", "--group", "batch", "--version", "v1", "--kind",
            "CronJob", "--controller", "false",
        ]);
        let Commands::Create(CreateCommands::Api(args)) = cli.command else {
            panic!("expected create api");
        };
        assert!(args.make_resource);
        assert!(!args.make_controller);
    }

    #[test]
    fn parse_create_webhook_flags() {
        let cli = Cli::parse_from([
            "kubeforge",
            "create",
            "webhook",
            "--group",
            "batch",
            "--version",
            "v1",
            "--kind",
            "CronJob",
            "--programmatic-validation",
            "--plural",
            "cronjobz",
        ]);
        let Commands::Create(CreateCommands::Webhook(args)) = cli.command else {
            panic!("expected create webhook");
        };
        assert!(!args.defaulting);
        assert!(args.validation);
        assert_eq!(args.resource.plural.as_deref(), Some("cronjobz"));
    }

    #[test]
    fn kind_is_required() {
        let result = Cli::try_parse_from([
            "kubeforge", "create", "api", "--group", "batch", "--version", "v1",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["kubeforge", "--quiet", "--verbose", "init-config"]);
        assert!(result.is_err());
    }

    #[test]
    fn project_dir_defaults_to_cwd() {
        let cli = Cli::parse_from(["kubeforge", "init-config"]);
        assert_eq!(cli.global.project_dir, std::path::PathBuf::from("."));
    }
}
