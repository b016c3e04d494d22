use hinge_config::HingeConfig;
use hinge_core::Workspace;
use hinge_refactor::Refactorer;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{AccessorArgs, AccessorChoice};
use crate::output::output;

/// Handle `hinge accessor`.
pub async fn handle(
    args: &AccessorArgs,
    workspace: &dyn Workspace,
    config: &HingeConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let refactorer = Refactorer::new(workspace, config);
    let (uri, position) = (&args.target.uri, args.target.position);
    let edit = match args.kind {
        AccessorChoice::Getter => refactorer.generate_getter(uri, position).await?,
        AccessorChoice::Setter => refactorer.generate_setter(uri, position).await?,
        AccessorChoice::Both => refactorer.generate_getter_and_setter(uri, position).await?,
    };
    output(&edit, flags.format)
}
