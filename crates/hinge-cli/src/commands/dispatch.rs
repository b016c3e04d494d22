use hinge_config::HingeConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::{commands, snapshot};

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, flags: &GlobalFlags, config: &HingeConfig) -> anyhow::Result<()> {
    let workspace = snapshot::load(flags.snapshot.as_deref())?;
    match command {
        Commands::Symbols(args) => commands::symbols::handle(&args, &workspace, config, flags).await,
        Commands::IncludePosition(args) => commands::include::handle_position(&args, &workspace, flags).await,
        Commands::Include(args) => commands::include::handle(&args, &workspace, config, flags).await,
        Commands::HeaderGuard(args) => commands::header_guard::handle(&args, &workspace, config, flags).await,
        Commands::Definition(args) => commands::definition::handle(&args, &workspace, config, flags).await,
        Commands::Declaration(args) => commands::declaration::handle(&args, &workspace, flags).await,
        Commands::Accessor(args) => commands::accessor::handle(&args, &workspace, config, flags).await,
        Commands::Mask(_) => unreachable!("mask is pre-dispatched in main"),
    }
}
