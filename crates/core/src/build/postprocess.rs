use crate::config::EngineConfig;
use crate::error::LifecycleError;
use crate::guard::NodeArena;
use scopemux_api::{Diagnostic, DiagnosticCode, NodeId, NodeKind, SourceRange};
use scopemux_plugin::utils::{clean_comment, strip_string_quotes};

struct CommentBlock {
    parent: Option<NodeId>,
    range: SourceRange,
    lines: Vec<String>,
}

/// Attaches comment blocks to the construct that follows them.
///
/// Adjacent comments under the same parent form one block. A block
/// documents the first sibling construct starting at or after its end, at
/// most `window` lines below it, unless that construct already carries a
/// docstring. Returns the number of constructs documented.
pub fn associate_docstrings(
    arena: &mut NodeArena,
    window: usize,
) -> Result<usize, LifecycleError> {
    let mut comments = Vec::new();
    let mut constructs = Vec::new();
    for (id, node) in arena.iter() {
        let parent = arena.parent(id)?;
        if node.kind.is_comment_like() {
            let raw = node.raw_content.as_deref().unwrap_or_default();
            let text = if node.kind == NodeKind::Docstring && !raw.starts_with(['#', '/']) {
                strip_string_quotes(raw.trim())
            } else {
                clean_comment(raw)
            };
            comments.push((parent, node.source_range, text));
        } else if node.kind != NodeKind::Root {
            constructs.push((parent, node.source_range.start, id));
        }
    }
    comments.sort_by_key(|(_, range, _)| range.start);
    constructs.sort_by_key(|(_, start, _)| *start);

    let mut blocks: Vec<CommentBlock> = Vec::new();
    for (parent, range, text) in comments {
        match blocks.last_mut() {
            Some(block) if block.parent == parent && range.start.line <= block.range.end.line + 1 => {
                block.range.end = range.end;
                block.lines.push(text);
            }
            _ => blocks.push(CommentBlock {
                parent,
                range,
                lines: vec![text],
            }),
        }
    }

    let mut documented = 0;
    for block in blocks {
        let text = block
            .lines
            .iter()
            .map(|l| l.as_str())
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>()
            .join("\n");
        if text.is_empty() {
            continue;
        }
        let target = constructs.iter().find(|(parent, start, _)| {
            *parent == block.parent
                && *start >= block.range.end
                && start.line - block.range.end.line <= window
        });
        let Some((_, _, id)) = target else {
            continue;
        };
        let node = arena.get_mut(*id)?;
        if node.docstring.is_none() {
            node.docstring = Some(text);
            documented += 1;
        }
    }
    Ok(documented)
}

/// Destroys every comment and docstring node. Returns the number removed.
pub fn strip_comment_nodes(arena: &mut NodeArena) -> Result<usize, LifecycleError> {
    let doomed: Vec<NodeId> = arena
        .iter()
        .filter(|(_, node)| node.kind.is_comment_like())
        .map(|(id, _)| id)
        .collect();
    let mut removed = 0;
    for id in doomed {
        // An enclosing comment node may already have taken this one with it.
        if arena.is_live(id) {
            removed += arena.destroy(id)?;
        }
    }
    Ok(removed)
}

fn root_rank(kind: NodeKind) -> u8 {
    match kind {
        NodeKind::Docstring | NodeKind::Comment => 0,
        NodeKind::Include | NodeKind::Import => 1,
        NodeKind::Function => 2,
        _ => 3,
    }
}

/// Stable reorder of root children: docstrings, includes/imports,
/// functions, then the rest.
pub fn reorder_root_children(arena: &mut NodeArena, root: NodeId) -> Result<(), LifecycleError> {
    arena.sort_children_by_key(root, |node| root_rank(node.kind))
}

/// Runs the configured root post-processing and reports an empty result
/// for non-blank input.
pub fn finish_tree(
    arena: &mut NodeArena,
    root: NodeId,
    config: &EngineConfig,
    source: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<(), LifecycleError> {
    let documented = associate_docstrings(arena, config.docstring_window)?;
    if config.strip_comment_nodes {
        let removed = strip_comment_nodes(arena)?;
        tracing::debug!(documented, removed, "comment nodes folded into docstrings");
    }
    if config.reorder_root_children {
        reorder_root_children(arena, root)?;
    }
    if arena.children(root)?.is_empty() && !source.trim().is_empty() {
        diagnostics.push(Diagnostic::new(
            DiagnosticCode::NoConstructs,
            "no constructs were extracted from non-empty input",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scopemux_api::AstNode;

    fn add(arena: &mut NodeArena, parent: NodeId, kind: NodeKind, name: &str, lines: (usize, usize), raw: &str) -> NodeId {
        let range = SourceRange::from_coords(lines.0, 0, lines.1, 1);
        let node = AstNode::new(kind, name, range).unwrap().with_raw_content(raw);
        let id = arena.alloc(node);
        arena.add_child(parent, id).unwrap();
        id
    }

    fn root(arena: &mut NodeArena) -> NodeId {
        arena.alloc(AstNode::new(NodeKind::Root, "ROOT", SourceRange::from_coords(0, 0, 40, 0)).unwrap())
    }

    #[test]
    fn adjacent_comments_document_next_construct() {
        let mut arena = NodeArena::new();
        let r = root(&mut arena);
        add(&mut arena, r, NodeKind::Comment, "c1", (0, 0), "// Adds two numbers.");
        add(&mut arena, r, NodeKind::Comment, "c2", (1, 1), "// Returns the sum.");
        let f = add(&mut arena, r, NodeKind::Function, "add", (2, 4), "int add(int a, int b) {}");

        assert_eq!(associate_docstrings(&mut arena, 5).unwrap(), 1);
        assert_eq!(
            arena.get(f).unwrap().docstring.as_deref(),
            Some("Adds two numbers.\nReturns the sum.")
        );
    }

    #[test]
    fn distant_comments_and_existing_docstrings_are_left_alone() {
        let mut arena = NodeArena::new();
        let r = root(&mut arena);
        add(&mut arena, r, NodeKind::Comment, "c", (0, 0), "/* far away */");
        let f = add(&mut arena, r, NodeKind::Function, "f", (10, 12), "void f() {}");
        add(&mut arena, r, NodeKind::Comment, "c", (13, 13), "# other");
        let g = add(&mut arena, r, NodeKind::Function, "g", (14, 15), "def g(): pass");
        arena.get_mut(g).unwrap().docstring = Some("Own docs.".into());

        assert_eq!(associate_docstrings(&mut arena, 5).unwrap(), 0);
        assert!(arena.get(f).unwrap().docstring.is_none());
        assert_eq!(arena.get(g).unwrap().docstring.as_deref(), Some("Own docs."));
    }

    #[test]
    fn stripping_and_reordering() {
        let mut arena = NodeArena::new();
        let r = root(&mut arena);
        let s = add(&mut arena, r, NodeKind::Struct, "Point", (0, 2), "struct Point {};");
        let f = add(&mut arena, r, NodeKind::Function, "main", (3, 5), "int main() {}");
        add(&mut arena, r, NodeKind::Comment, "c", (6, 6), "// trailing");
        let inc = add(&mut arena, r, NodeKind::Include, "stdio.h", (7, 7), "#include <stdio.h>");

        assert_eq!(strip_comment_nodes(&mut arena).unwrap(), 1);
        reorder_root_children(&mut arena, r).unwrap();
        assert_eq!(arena.children(r).unwrap(), &[inc, f, s]);
    }

    #[test]
    fn empty_root_on_non_blank_input_is_reported() {
        let mut arena = NodeArena::new();
        let r = root(&mut arena);
        let mut diagnostics = Vec::new();
        finish_tree(&mut arena, r, &EngineConfig::default(), "   \n", &mut diagnostics).unwrap();
        assert!(diagnostics.is_empty());
        finish_tree(&mut arena, r, &EngineConfig::default(), "x = ", &mut diagnostics).unwrap();
        assert_eq!(diagnostics[0].code, DiagnosticCode::NoConstructs);
    }
}
