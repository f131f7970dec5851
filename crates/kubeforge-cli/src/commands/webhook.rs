//! `kubeforge create webhook`: admission webhook for an existing API.

use kubeforge_core::domain::{Capability, WiringFlags};

use crate::{
    cli::{GlobalArgs, WebhookArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

use super::create::{self, CreateRequest, Producers};

pub fn execute(
    args: WebhookArgs,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let capabilities = requested_capabilities(&args)?;

    let request = CreateRequest {
        resource: args.resource,
        producers: Producers::Webhook,
        capabilities,
        wiring: WiringFlags::webhook(),
        force: args.force,
    };
    create::run(request, global, config, output)
}

fn requested_capabilities(args: &WebhookArgs) -> CliResult<Vec<Capability>> {
    let mut capabilities = Vec::new();
    if args.defaulting {
        capabilities.push(Capability::Defaulting);
    }
    if args.validation {
        capabilities.push(Capability::Validation);
    }
    if capabilities.is_empty() {
        return Err(CliError::NoWebhookType);
    }
    Ok(capabilities)
}
