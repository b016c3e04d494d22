//! Refactoring actions.
//!
//! Each action reads the workspace, decides where text goes, and returns a
//! [`WorkspaceEdit`] batch. Nothing is applied until the caller hands the
//! batch to an [`EditSink`].

use hinge_config::{BraceStyle, DefinitionLocation, HingeConfig};
use hinge_core::{CoreError, EditSink, Location, Position, Range, SourceDocument, Workspace, WorkspaceEdit};
use hinge_parser::{ResolveOptions, SourceSymbol, SymbolTree, mask};
use regex::Regex;
use std::sync::{Arc, LazyLock};

use crate::accessor::Accessor;
use crate::error::RefactorError;
use crate::format::format_text_to_insert;
use crate::header_guard::{has_header_guard, header_guard_edit};
use crate::position::ProposedPosition;
use crate::proposal::{
    Access, SearchOptions, find_position_for_function_definition, find_position_for_new_include,
    find_position_for_new_member_function,
};

static INCLUDE_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^\s*#\s*include\s*[<"]([^>"]*)[>"]"#).expect("valid regex"));

const HEADER_EXTENSIONS: [&str; 6] = ["h", "hh", "hpp", "hxx", "h++", "inl"];
const SOURCE_EXTENSIONS: [&str; 4] = ["cpp", "cc", "cxx", "c++"];

/// Runs refactoring actions against a workspace.
pub struct Refactorer<'w> {
    workspace: &'w dyn Workspace,
    config: &'w HingeConfig,
}

impl<'w> Refactorer<'w> {
    #[must_use]
    pub const fn new(workspace: &'w dyn Workspace, config: &'w HingeConfig) -> Self {
        Self { workspace, config }
    }

    /// Hand `edit` to `sink` as one batch.
    pub async fn apply(sink: &dyn EditSink, edit: WorkspaceEdit) -> Result<(), RefactorError> {
        sink.apply(edit).await.map_err(Into::into)
    }

    /// Add an empty definition for the function declared at `position`,
    /// placed in `target_uri` next to the definitions of its neighbours.
    pub async fn add_definition(
        &self,
        uri: &str,
        position: Position,
        target_uri: &str,
    ) -> Result<WorkspaceEdit, RefactorError> {
        let document = self.open(uri).await?;
        let tree = self.tree(&document).await;
        let declaration = symbol_at(&tree, &document, position)?;
        if !declaration.is_function_declaration() {
            return Err(RefactorError::NotADeclaration {
                symbol: declaration.name.clone(),
            });
        }
        if let Some(existing) = self.counterpart(&declaration, Counterpart::Definition).await {
            return Err(RefactorError::DefinitionExists {
                symbol: declaration.name.clone(),
                uri: existing.uri,
                line: existing.range.start.line + 1,
            });
        }

        let target = self.open_target(&document, target_uri).await?;
        let proposed = self.definition_position(&declaration, &target).await;
        let signature = declaration
            .try_format_declaration_for_new_definition(&target, proposed.position, self.workspace)
            .await?;
        let eol = target.eol();
        let body = format!("{{{eol}}}");
        let text = format!(
            "{}{}",
            inline_in_header(&declaration, target.uri(), &signature),
            join_body(&signature, &body, self.config.formatting.brace_style, eol)
        );

        tracing::debug!(symbol = %declaration.name, uri = %target.uri(), line = proposed.position.line, "adding definition");
        let mut edit = WorkspaceEdit::new();
        edit.insert(
            target.uri(),
            proposed.position,
            format_text_to_insert(&text, &proposed, &target, &self.config.formatting),
        );
        Ok(edit)
    }

    /// Move the function definition at `position` into `target_uri`.
    ///
    /// When `target_uri` holds the function's declaration, the body is
    /// attached to that declaration. Otherwise the definition is placed
    /// next to its neighbours' definitions, and a definition that was its
    /// own declaration leaves a declaration behind.
    pub async fn move_definition(
        &self,
        uri: &str,
        position: Position,
        target_uri: &str,
    ) -> Result<WorkspaceEdit, RefactorError> {
        let document = self.open(uri).await?;
        let tree = self.tree(&document).await;
        let definition = symbol_at(&tree, &document, position)?;
        if !definition.is_function_definition() {
            return Err(RefactorError::NotADefinition {
                symbol: definition.name.clone(),
            });
        }
        let target = self.open_target(&document, target_uri).await?;

        let mut edit = WorkspaceEdit::new();
        let Some(location) = self.counterpart(&definition, Counterpart::Declaration).await else {
            if target.uri() == uri && definition.parent().is_none() {
                return Err(RefactorError::DefinitionExists {
                    symbol: definition.name.clone(),
                    uri: uri.to_string(),
                    line: definition.range.start.line + 1,
                });
            }
            self.move_out(&definition, None, &target, &mut edit).await?;
            edit.replace(
                uri,
                Range::new(definition.true_start(), definition.statement_end()),
                definition.new_function_declaration(),
            );
            return Ok(edit);
        };

        let declaration_document = self.open(&location.uri).await?;
        let declaration_tree = self.tree(&declaration_document).await;
        let declaration = declaration_tree
            .symbol_at_selection(location.range.start)
            .or_else(|| declaration_tree.symbol_at(location.range.start))
            .map(|symbol| SourceSymbol::new(symbol, &declaration_document))
            .ok_or_else(|| RefactorError::NoSymbol {
                uri: location.uri.clone(),
                line: location.range.start.line,
                character: location.range.start.character,
            })?;
        if declaration.name != definition.name {
            return Err(RefactorError::CrossReferenceMismatch {
                expected: definition.name.clone(),
                found: declaration.name.clone(),
            });
        }

        if declaration.uri() == target.uri() {
            tracing::debug!(symbol = %definition.name, uri = %target.uri(), "attaching body to declaration");
            edit.replace(
                target.uri(),
                Range::new(declaration.true_start(), declaration.statement_end()),
                declaration.combine_definition(&definition),
            );
        } else {
            self.move_out(&definition, Some(&declaration), &target, &mut edit).await?;
        }
        edit.delete(uri, removal_range(&definition));
        Ok(edit)
    }

    /// Insert `definition`'s body into `target` under a signature derived
    /// from `declaration` (or from the definition itself).
    async fn move_out<'s>(
        &self,
        definition: &SourceSymbol<'s>,
        declaration: Option<&SourceSymbol<'s>>,
        target: &SourceDocument,
        edit: &mut WorkspaceEdit,
    ) -> Result<(), RefactorError> {
        let source = declaration.unwrap_or(definition);
        let proposed = self.definition_position(source, target).await;
        let signature = source
            .try_format_declaration_for_new_definition(target, proposed.position, self.workspace)
            .await?;

        let document = definition.document();
        let body_start = document.offset_at(definition.body_start(declaration));
        let body_end = document.offset_at(definition.range.end).max(body_start);
        let body = hinge_parser::text::reindent_continuation_lines(
            &document.text()[body_start..body_end],
            definition.indentation(),
            "",
        );
        let text = format!(
            "{}{}",
            inline_in_header(source, target.uri(), &signature),
            join_body(&signature, &body, self.config.formatting.brace_style, target.eol())
        );

        tracing::debug!(symbol = %definition.name, uri = %target.uri(), line = proposed.position.line, "moving definition");
        edit.insert(
            target.uri(),
            proposed.position,
            format_text_to_insert(&text, &proposed, target, &self.config.formatting),
        );
        Ok(())
    }

    pub async fn generate_getter(&self, uri: &str, position: Position) -> Result<WorkspaceEdit, RefactorError> {
        self.generate_accessors(uri, position, true, false).await
    }

    pub async fn generate_setter(&self, uri: &str, position: Position) -> Result<WorkspaceEdit, RefactorError> {
        self.generate_accessors(uri, position, false, true).await
    }

    pub async fn generate_getter_and_setter(
        &self,
        uri: &str,
        position: Position,
    ) -> Result<WorkspaceEdit, RefactorError> {
        self.generate_accessors(uri, position, true, true).await
    }

    async fn generate_accessors(
        &self,
        uri: &str,
        position: Position,
        getter: bool,
        setter: bool,
    ) -> Result<WorkspaceEdit, RefactorError> {
        let document = self.open(uri).await?;
        let tree = self.tree(&document).await;
        let member = symbol_at(&tree, &document, position)?;
        let not_a_member = || RefactorError::NotAMemberVariable {
            symbol: member.name.clone(),
        };
        if !member.is_member_variable() {
            return Err(not_a_member());
        }
        let class = member.parent().ok_or_else(not_a_member)?;

        let mut accessors = Vec::new();
        if getter {
            accessors.push(Accessor::getter(&member, self.config.accessors.getter_style));
        }
        if setter {
            accessors.push(Accessor::setter(&member, self.workspace, &self.resolve_options()).await?);
        }

        let placement = find_position_for_new_member_function(&class, Access::Public).ok_or_else(not_a_member)?;
        let source_file = match self.config.accessors.definition_location {
            DefinitionLocation::SourceFile => {
                let found = self.source_file_for(uri).await;
                if found.is_none() {
                    tracing::warn!(uri, "no source file next to header, defining accessors below the class");
                }
                found
            }
            DefinitionLocation::Inline | DefinitionLocation::BelowClass => None,
        };
        let inline = self.config.accessors.definition_location == DefinitionLocation::Inline;

        let eol = document.eol();
        let mut in_class: Vec<String> = accessors
            .iter()
            .map(|accessor| {
                if inline {
                    accessor.inline_definition()
                } else {
                    accessor.declaration()
                }
            })
            .collect();
        if placement.needs_access_specifier {
            in_class.insert(0, format!("{}:", Access::Public));
        }

        let mut edit = WorkspaceEdit::new();
        edit.insert(
            uri,
            placement.position.position,
            format_text_to_insert(&in_class.join(eol), &placement.position, &document, &self.config.formatting),
        );
        if inline {
            return Ok(edit);
        }

        let (target, proposed) = match &source_file {
            Some(source) => {
                let proposed = self.definition_position(&member, source).await;
                (Arc::clone(source), proposed)
            }
            None => {
                let end = class.statement_end();
                (
                    Arc::clone(&document),
                    ProposedPosition::after(Range::new(class.true_start(), end), end),
                )
            }
        };
        let separator = if self.config.formatting.blank_lines_between_definitions {
            format!("{eol}{eol}")
        } else {
            eol.to_string()
        };
        let mut definitions = Vec::with_capacity(accessors.len());
        for accessor in &accessors {
            let text = accessor
                .format_definition(
                    &member,
                    &target,
                    proposed.position,
                    self.workspace,
                    self.config.formatting.brace_style,
                    &self.config.formatting.indent_unit(),
                )
                .await;
            let inline_keyword = if source_file.is_none() && !text.starts_with("template") {
                "inline "
            } else {
                ""
            };
            definitions.push(format!("{inline_keyword}{text}"));
        }
        tracing::debug!(symbol = %member.name, uri = %target.uri(), line = proposed.position.line, "defining accessors");
        edit.insert(
            target.uri(),
            proposed.position,
            format_text_to_insert(&definitions.join(&separator), &proposed, &target, &self.config.formatting),
        );
        Ok(edit)
    }

    /// Add `#include <include>` (or `"include"`) next to the includes of the
    /// same kind.
    pub async fn add_include(&self, uri: &str, include: &str, system: bool) -> Result<WorkspaceEdit, RefactorError> {
        let document = self.open(uri).await?;
        let masked = mask::mask_comments(document.text());
        let already = masked
            .lines()
            .filter_map(|line| INCLUDE_PATH.captures(line))
            .any(|caps| caps[1].trim() == include);
        if already {
            return Err(RefactorError::AlreadyIncluded {
                uri: uri.to_string(),
                include: include.to_string(),
            });
        }

        let tree = self.tree(&document).await;
        let positions = find_position_for_new_include(&document, &tree);
        let (proposed, directive) = if system {
            (positions.system, format!("#include <{include}>"))
        } else {
            (positions.project, format!("#include \"{include}\""))
        };
        let mut edit = WorkspaceEdit::new();
        edit.insert(
            uri,
            proposed.position,
            format_text_to_insert(&directive, &proposed, &document, &self.config.formatting),
        );
        Ok(edit)
    }

    pub async fn add_header_guard(&self, uri: &str) -> Result<WorkspaceEdit, RefactorError> {
        let document = self.open(uri).await?;
        let tree = self.tree(&document).await;
        if has_header_guard(&document, &tree, &self.config.header_guard.define_format) {
            return Err(RefactorError::AlreadyGuarded { uri: uri.to_string() });
        }
        Ok(header_guard_edit(
            &document,
            &self.config.header_guard,
            &self.config.formatting,
        ))
    }

    async fn open(&self, uri: &str) -> Result<Arc<SourceDocument>, RefactorError> {
        self.workspace
            .open_document(uri)
            .await
            .ok_or_else(|| CoreError::DocumentNotFound { uri: uri.to_string() }.into())
    }

    async fn open_target(
        &self,
        document: &Arc<SourceDocument>,
        target_uri: &str,
    ) -> Result<Arc<SourceDocument>, RefactorError> {
        if document.uri() == target_uri {
            Ok(Arc::clone(document))
        } else {
            self.open(target_uri).await
        }
    }

    async fn tree(&self, document: &SourceDocument) -> SymbolTree {
        SymbolTree::build(&self.workspace.document_symbols(document).await)
    }

    fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            cross_file: self.config.general.cross_file_type_resolution,
            max_depth: self.config.general.max_alias_depth,
        }
    }

    async fn definition_position(&self, declaration: &SourceSymbol<'_>, target: &SourceDocument) -> ProposedPosition {
        find_position_for_function_definition(declaration, target, self.workspace, &SearchOptions::from(self.config))
            .await
    }

    /// The declaration or definition the oracle links `symbol` to, unless
    /// that is `symbol` itself.
    async fn counterpart(&self, symbol: &SourceSymbol<'_>, which: Counterpart) -> Option<Location> {
        let location = symbol.location();
        let found = match which {
            Counterpart::Definition => self.workspace.find_definition(&location).await,
            Counterpart::Declaration => self.workspace.find_declaration(&location).await,
        }?;
        let is_self = found.uri == symbol.uri() && symbol.range.contains(found.range.start);
        (!is_self).then_some(found)
    }

    /// The `.cpp` (or similar) file next to the header at `uri`.
    async fn source_file_for(&self, uri: &str) -> Option<Arc<SourceDocument>> {
        if !has_extension(uri, &HEADER_EXTENSIONS) {
            return None;
        }
        let (stem, _) = uri.rsplit_once('.')?;
        for extension in SOURCE_EXTENSIONS {
            if let Some(document) = self.workspace.open_document(&format!("{stem}.{extension}")).await {
                return Some(document);
            }
        }
        None
    }
}

#[derive(Debug, Clone, Copy)]
enum Counterpart {
    Declaration,
    Definition,
}

fn symbol_at<'t>(
    tree: &'t SymbolTree,
    document: &'t SourceDocument,
    position: Position,
) -> Result<SourceSymbol<'t>, RefactorError> {
    tree.symbol_at_selection(position)
        .or_else(|| tree.symbol_at(position))
        .map(|symbol| SourceSymbol::new(symbol, document))
        .ok_or_else(|| RefactorError::NoSymbol {
            uri: document.uri().to_string(),
            line: position.line,
            character: position.character,
        })
}

/// `inline ` when a plain function is about to be defined in a header.
fn inline_in_header(declaration: &SourceSymbol<'_>, target_uri: &str, signature: &str) -> &'static str {
    let needs_inline = has_extension(target_uri, &HEADER_EXTENSIONS)
        && !signature.starts_with("template")
        && !declaration.is_inline()
        && !declaration.is_constexpr();
    if needs_inline { "inline " } else { "" }
}

fn has_extension(uri: &str, extensions: &[&str]) -> bool {
    uri.rsplit_once('.')
        .is_some_and(|(_, extension)| extensions.iter().any(|known| extension.eq_ignore_ascii_case(known)))
}

/// `signature` followed by `body` (which starts at its `{`, or at the `:`
/// of a constructor's initializer list).
fn join_body(signature: &str, body: &str, brace_style: BraceStyle, eol: &str) -> String {
    if body.starts_with(':') || brace_style == BraceStyle::SameLine {
        format!("{signature} {body}")
    } else {
        format!("{signature}{eol}{body}")
    }
}

/// What to delete when `definition` moves away: its leading comment, the
/// definition, the rest of its last line and one blank line below it.
fn removal_range(definition: &SourceSymbol<'_>) -> Range {
    let document = definition.document();
    let comment = definition.leading_comment_start();
    let first_line = document.line_at(comment.line);
    let starts_line = comment.character <= first_line.first_non_whitespace;
    let start = if starts_line {
        Position::new(comment.line, 0)
    } else {
        comment
    };

    let end = definition.statement_end();
    let last_line = document.line_at(end.line);
    let rest = document.text_in(Range::new(end, last_line.range.end));
    if !starts_line || !rest.trim().is_empty() || end.line + 1 >= document.line_count() {
        return Range::new(start, end);
    }
    let mut end_line = end.line + 1;
    if end_line + 1 < document.line_count() && document.line_at(end_line).is_empty_or_whitespace() {
        end_line += 1;
    }
    Range::new(start, Position::new(end_line, 0))
}
