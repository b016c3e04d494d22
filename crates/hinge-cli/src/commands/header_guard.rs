use hinge_config::HingeConfig;
use hinge_core::Workspace;
use hinge_refactor::{Refactorer, has_header_guard, header_guard_define_name};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::HeaderGuardArgs;
use crate::output::output;

#[derive(Debug, Serialize)]
struct GuardStatus {
    uri: String,
    guarded: bool,
    define: String,
}

/// Handle `hinge header-guard`.
pub async fn handle(
    args: &HeaderGuardArgs,
    workspace: &dyn Workspace,
    config: &HingeConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    if args.check {
        let document = super::open(workspace, &args.uri).await?;
        let tree = super::tree(workspace, &document).await;
        let format = &config.header_guard.define_format;
        return output(
            &GuardStatus {
                uri: args.uri.clone(),
                guarded: has_header_guard(&document, &tree, format),
                define: header_guard_define_name(&args.uri, format),
            },
            flags.format,
        );
    }

    let edit = Refactorer::new(workspace, config).add_header_guard(&args.uri).await?;
    output(&edit, flags.format)
}
