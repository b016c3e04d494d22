use hinge_config::HingeConfig;
use hinge_core::Workspace;
use hinge_refactor::Refactorer;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::DefinitionArgs;
use crate::output::output;

/// Handle `hinge definition`: add an empty definition for a declaration,
/// or with `--move` relocate an existing definition.
pub async fn handle(
    args: &DefinitionArgs,
    workspace: &dyn Workspace,
    config: &HingeConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let uri = &args.target.uri;
    let into = args.into.as_deref().unwrap_or(uri);
    let refactorer = Refactorer::new(workspace, config);

    let edit = if args.move_definition {
        refactorer.move_definition(uri, args.target.position, into).await?
    } else {
        refactorer.add_definition(uri, args.target.position, into).await?
    };
    tracing::debug!(uri = %uri, target = %into, files = edit.file_count(), "definition edit ready");
    output(&edit, flags.format)
}
