use hinge_core::{Location, Workspace};
use hinge_parser::SourceSymbol;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::TargetArgs;
use crate::output::output;

#[derive(Debug, Serialize)]
struct DeclarationResponse {
    symbol: String,
    definition: Location,
    /// Where the oracle says the function is already declared, if anywhere.
    existing: Option<Location>,
    declaration: String,
}

/// Handle `hinge declaration`: print the declaration that would introduce
/// the function defined at the given position.
pub async fn handle(args: &TargetArgs, workspace: &dyn Workspace, flags: &GlobalFlags) -> anyhow::Result<()> {
    let document = super::open(workspace, &args.uri).await?;
    let tree = super::tree(workspace, &document).await;
    let Some(symbol) = super::symbol_at(&tree, args.position) else {
        anyhow::bail!("no symbol at {}:{}", args.uri, args.position);
    };
    let definition = SourceSymbol::new(symbol, &document);
    let declaration = definition.try_new_function_declaration()?;

    let location = definition.location();
    let existing = workspace
        .find_declaration(&location)
        .await
        .filter(|found| *found != location);
    output(
        &DeclarationResponse {
            symbol: definition.name.clone(),
            definition: location,
            existing,
            declaration,
        },
        flags.format,
    )
}
