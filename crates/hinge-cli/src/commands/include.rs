use hinge_config::HingeConfig;
use hinge_core::Workspace;
use hinge_refactor::{Refactorer, find_position_for_new_include};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{IncludeArgs, UriArgs};
use crate::output::output;

/// Handle `hinge include-position`.
pub async fn handle_position(args: &UriArgs, workspace: &dyn Workspace, flags: &GlobalFlags) -> anyhow::Result<()> {
    let document = super::open(workspace, &args.uri).await?;
    let tree = super::tree(workspace, &document).await;
    output(&find_position_for_new_include(&document, &tree), flags.format)
}

/// Handle `hinge include`.
pub async fn handle(
    args: &IncludeArgs,
    workspace: &dyn Workspace,
    config: &HingeConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let edit = Refactorer::new(workspace, config)
        .add_include(&args.uri, &args.path, args.system)
        .await?;
    output(&edit, flags.format)
}
