//! `kubeforge create api`: API types and controller.

use kubeforge_core::domain::WiringFlags;

use crate::{
    cli::{ApiArgs, GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

use super::create::{self, CreateRequest, Producers};

pub fn execute(
    args: ApiArgs,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let (resource, controller) = (args.make_resource, args.make_controller);
    if !resource && !controller {
        return Err(CliError::InvalidInput {
            message: "--resource=false and --controller=false leave nothing to scaffold".into(),
            source: None,
        });
    }

    let request = CreateRequest {
        resource: args.resource,
        producers: Producers::Api {
            resource,
            controller,
        },
        capabilities: Vec::new(),
        wiring: WiringFlags {
            resource,
            controller,
            webhook: false,
        },
        force: args.force,
    };
    create::run(request, global, config, output)
}
