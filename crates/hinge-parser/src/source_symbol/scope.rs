//! Scope qualification of a symbol relative to an insertion point.

use hinge_core::{Position, SourceDocument, Workspace};

use super::SourceSymbol;
use crate::mask;
use crate::names::{is_anonymous, strip_template_args};
use crate::tree::SymbolTree;

/// The text that must precede a symbol's name to refer to it from some
/// other scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    /// e.g. `outer::Widget<T>::`; empty when no qualification is needed.
    pub qualifier: String,
    /// `template <...>` clauses of enclosing class templates, one per line.
    pub template_preamble: Vec<String>,
}

impl Scope {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.qualifier.is_empty() && self.template_preamble.is_empty()
    }
}

/// One parameter of a `template <...>` clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateParameter {
    /// The declaration without its default, e.g. `typename T`.
    pub declaration: String,
    /// The name used as an argument, e.g. `T` or `Ts...`.
    pub argument: String,
}

impl SourceSymbol<'_> {
    /// Names of the namespaces and classes enclosing this symbol, outermost
    /// first. Anonymous namespaces are skipped.
    #[must_use]
    pub fn scope_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .ancestors()
            .into_iter()
            .filter(|ancestor| ancestor.is_namespace() || ancestor.is_class_or_struct())
            .filter(|ancestor| !is_anonymous(&ancestor.name))
            .map(|ancestor| ancestor.name.clone())
            .collect();
        names.reverse();
        names
    }

    /// The qualifier needed to name this symbol from inside the scopes
    /// `enclosing` (outermost first).
    #[must_use]
    pub fn scope_relative_to(&self, enclosing: &[String]) -> Scope {
        let mut chain: Vec<_> = self
            .ancestors()
            .into_iter()
            .filter(|ancestor| ancestor.is_namespace() || ancestor.is_class_or_struct())
            .filter(|ancestor| !is_anonymous(&ancestor.name))
            .collect();
        chain.reverse();

        let shared = chain
            .iter()
            .zip(enclosing)
            .take_while(|(ancestor, name)| strip_template_args(&ancestor.name) == strip_template_args(name))
            .count();

        let mut scope = Scope::default();
        for ancestor in &chain[shared..] {
            let name = strip_template_args(&ancestor.name);
            let parameters = if ancestor.is_class_or_struct() {
                SourceSymbol::new(*ancestor, self.document).template_parameters()
            } else {
                None
            };
            match parameters {
                Some(parameters) => {
                    let arguments: Vec<_> = parameters.iter().map(|p| p.argument.as_str()).collect();
                    let declarations: Vec<_> = parameters.iter().map(|p| p.declaration.as_str()).collect();
                    scope.qualifier.push_str(&format!("{name}<{}>::", arguments.join(", ")));
                    scope
                        .template_preamble
                        .push(format!("template <{}>", declarations.join(", ")));
                }
                None => {
                    scope.qualifier.push_str(&name);
                    scope.qualifier.push_str("::");
                }
            }
        }
        scope
    }

    /// [`Self::scope_relative_to`] the scopes enclosing `position` in
    /// `target`.
    pub async fn scope_for(&self, target: &SourceDocument, position: Position, workspace: &dyn Workspace) -> Scope {
        let raw = workspace.document_symbols(target).await;
        let tree = SymbolTree::build(&raw);
        let enclosing: Vec<String> = tree
            .enclosing_scopes(position)
            .into_iter()
            .filter(|scope| !is_anonymous(&scope.name))
            .map(|scope| scope.name.clone())
            .collect();
        tracing::trace!(uri = %target.uri(), ?enclosing, "target scopes");
        self.scope_relative_to(&enclosing)
    }

    /// Parameters of the `template <...>` clause in front of this symbol,
    /// or `None` if it is not a template.
    #[must_use]
    pub fn template_parameters(&self) -> Option<Vec<TemplateParameter>> {
        let (open, close) = self.template_clause()?;
        let text = self.document.text();
        let inner = &text[open + 1..close];
        let masked = mask::mask_for_parameter_scan(inner);

        let mut parameters = Vec::new();
        let mut segment_start = 0;
        for end in masked
            .match_indices(',')
            .map(|(index, _)| index)
            .chain(std::iter::once(inner.len()))
        {
            let segment = &inner[segment_start..end];
            let masked_segment = &masked[segment_start..end];
            segment_start = end + 1;

            let declaration = masked_segment
                .find('=')
                .map_or(segment, |equals| &segment[..equals])
                .trim();
            if declaration.is_empty() {
                continue;
            }
            let mut argument = declaration
                .rsplit(|c: char| !(c.is_alphanumeric() || c == '_'))
                .find(|token| !token.is_empty())
                .unwrap_or_default()
                .to_string();
            if declaration.contains("...") {
                argument.push_str("...");
            }
            parameters.push(TemplateParameter {
                declaration: declaration.to_string(),
                argument,
            });
        }
        Some(parameters)
    }

    /// Byte offsets of the `<` and `>` of the template clause that starts
    /// this symbol.
    fn template_clause(&self) -> Option<(usize, usize)> {
        let start = self.offset(self.true_start());
        let end = self.offset(self.selection_range.start).max(start);
        let text = &self.document.text()[start..end];
        let masked = mask::mask_comments_and_quotes(text);
        let keyword = masked.trim_start();
        if !keyword.starts_with("template") {
            return None;
        }
        let angles = mask::mask_angle_brackets(&masked);
        let open = angles.find('<')?;
        let close = open + angles[open..].find('>')?;
        Some((start + open, start + close))
    }
}
