use anyhow::{Context, Result};

use crate::{
    automation,
    cli::{Cli, Command},
    domain, gateway, infra,
    usecases::{self, bootstrap},
};

pub fn run(cli: Cli) -> Result<()> {
    match cli.command_or_default() {
        Command::Run => {
            let (context, _log_guard) = bootstrap::bootstrap(cli.config.as_deref())?;

            tracing::debug!(
                automation = automation::module_name(),
                domain = domain::module_name(),
                gateway = gateway::module_name(),
                usecases = usecases::module_name(),
                infra = infra::module_name(),
                "module boundaries loaded"
            );

            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .context("failed to start async runtime")?;

            runtime.block_on(gateway::serve(context))?;
        }
    }

    Ok(())
}
