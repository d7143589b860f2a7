//! Reference resolution: links AST nodes to the definitions of the same
//! tree that their concrete syntax names.

use crate::error::LifecycleError;
use crate::guard::NodeArena;
use scopemux_api::{NodeId, NodeKind, SourceRange};
use scopemux_plugin::{BoundNode, ConcreteNode, LanguageAdapter, ReferenceKind, ReferenceSite};
use std::collections::{HashMap, HashSet};

/// Receivers that name the enclosing type rather than a scope.
const SELF_RECEIVERS: [&str; 3] = ["self", "this", "cls"];

/// Kinds that can be referenced and can hold references.
pub fn is_definition(kind: NodeKind) -> bool {
    kind.is_callable()
        || is_type_like(kind)
        || matches!(
            kind,
            NodeKind::Namespace | NodeKind::Module | NodeKind::Variable | NodeKind::Macro
        )
}

fn is_type_like(kind: NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::Class
            | NodeKind::Struct
            | NodeKind::Union
            | NodeKind::Interface
            | NodeKind::Enum
            | NodeKind::Typedef
    )
}

fn accepts(reference: ReferenceKind, kind: NodeKind) -> bool {
    match reference {
        ReferenceKind::Call => kind.is_callable() || is_type_like(kind) || kind == NodeKind::Macro,
        ReferenceKind::Inheritance => is_type_like(kind),
    }
}

/// Dotted path of a referenced name: `geo::Shape` and `p->area` become
/// `geo.Shape` and `p.area`; template arguments are dropped.
pub fn reference_path(target: &str) -> Vec<&str> {
    let head = target.split('<').next().unwrap_or_default();
    head.split(['.', ':', '-', '>'])
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Definitions of one tree, by qualified name and by short name.
#[derive(Debug, Default)]
pub struct SymbolTable {
    by_qualified: HashMap<String, NodeId>,
    by_name: HashMap<String, Vec<NodeId>>,
    kinds: HashMap<NodeId, NodeKind>,
}

impl SymbolTable {
    /// Registers every live definition of `arena`. The first node wins a
    /// qualified name shared by several (overloads, redeclarations).
    pub fn collect(arena: &NodeArena) -> Self {
        let mut table = Self::default();
        for (id, node) in arena.iter() {
            if !is_definition(node.kind) {
                continue;
            }
            table
                .by_qualified
                .entry(node.qualified_name.clone())
                .or_insert(id);
            table.by_name.entry(node.name.clone()).or_default().push(id);
            table.kinds.insert(id, node.kind);
        }
        table
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    pub fn lookup(&self, qualified_name: &str) -> Option<NodeId> {
        self.by_qualified.get(qualified_name).copied()
    }

    fn lookup_as(&self, qualified_name: &str, reference: ReferenceKind) -> Option<NodeId> {
        self.lookup(qualified_name)
            .filter(|id| self.kinds.get(id).is_some_and(|k| accepts(reference, *k)))
    }

    /// The only acceptable definition named `name`, if exactly one exists.
    fn unique(&self, name: &str, reference: ReferenceKind) -> Option<NodeId> {
        let mut candidates = self
            .by_name
            .get(name)?
            .iter()
            .filter(|id| self.kinds.get(*id).is_some_and(|k| accepts(reference, *k)));
        let first = candidates.next()?;
        candidates.next().is_none().then_some(*first)
    }

    /// Resolves `site` as seen from `from`.
    ///
    /// Tries `<scope>.<path>` for `from` and each of its ancestors
    /// (innermost first), then the path as a qualified name, then a unique
    /// definition carrying the last segment. A `self`/`this` receiver
    /// restricts the scope walk to enclosing types.
    pub fn resolve(
        &self,
        arena: &NodeArena,
        from: NodeId,
        site: &ReferenceSite,
    ) -> Result<Option<NodeId>, LifecycleError> {
        let mut path = reference_path(&site.target);
        let self_receiver = path.len() > 1 && SELF_RECEIVERS.iter().any(|r| *r == path[0]);
        if self_receiver {
            path.remove(0);
        }
        let Some(last) = path.last().copied() else {
            return Ok(None);
        };
        let dotted = path.join(".");

        let mut scopes = vec![from];
        scopes.extend(arena.ancestors(from)?);
        for scope in scopes {
            let node = arena.get(scope)?;
            if self_receiver && !is_type_like(node.kind) {
                continue;
            }
            let candidate = format!("{}.{}", node.qualified_name, dotted);
            if let Some(found) = self.lookup_as(&candidate, site.kind) {
                return Ok(Some(found));
            }
        }
        if let Some(found) = self.lookup_as(&dotted, site.kind) {
            return Ok(Some(found));
        }
        Ok(self.unique(last, site.kind))
    }
}

/// Counts of one resolution run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ResolutionStats {
    pub sites: usize,
    pub resolved: usize,
}

/// Reference sites of the whole concrete tree, in document order.
pub fn collect_sites<N: ConcreteNode>(
    tree_root: N,
    source: &str,
    adapter: &dyn LanguageAdapter,
) -> Vec<ReferenceSite> {
    let mut sites = Vec::new();
    let mut stack = vec![tree_root];
    while let Some(node) = stack.pop() {
        if node.is_named() && !node.is_error() {
            sites.extend(adapter.reference_sites(&BoundNode::new(node, source)));
        }
        stack.extend(node.children().into_iter().rev());
    }
    sites
}

/// Innermost definition under `root` whose range holds `range`; `root`
/// when none does.
fn owner_of(owners: &[(SourceRange, NodeId)], root: NodeId, range: &SourceRange) -> NodeId {
    owners
        .iter()
        .filter(|(r, _)| r.encloses(range))
        .max_by_key(|(r, _)| (r.start, std::cmp::Reverse(r.end)))
        .map(|(_, id)| *id)
        .unwrap_or(root)
}

/// Adds a non-owning reference from the innermost definition around each
/// site to the definition the site names. Unresolved sites (library
/// names, dynamic receivers) are dropped. Each pair is linked once.
pub fn resolve_references<N: ConcreteNode>(
    arena: &mut NodeArena,
    root: NodeId,
    tree_root: N,
    source: &str,
    adapter: &dyn LanguageAdapter,
) -> Result<ResolutionStats, LifecycleError> {
    let sites = collect_sites(tree_root, source, adapter);
    let mut stats = ResolutionStats {
        sites: sites.len(),
        resolved: 0,
    };
    if sites.is_empty() {
        return Ok(stats);
    }

    let table = SymbolTable::collect(arena);
    let owners: Vec<(SourceRange, NodeId)> = arena
        .iter()
        .filter(|(_, node)| is_definition(node.kind))
        .map(|(id, node)| (node.source_range, id))
        .collect();

    let mut linked = HashSet::new();
    for site in &sites {
        let from = owner_of(&owners, root, &site.range);
        let Some(to) = table.resolve(arena, from, site)? else {
            tracing::trace!(name = %site.target, "reference left unresolved");
            continue;
        };
        if linked.insert((from, to)) {
            arena.add_reference(from, to)?;
        }
        stats.resolved += 1;
    }
    tracing::debug!(
        sites = stats.sites,
        resolved = stats.resolved,
        symbols = table.len(),
        "references resolved"
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scopemux_api::{AstNode, SourcePoint};

    fn range(start: usize, end: usize) -> SourceRange {
        SourceRange {
            start: SourcePoint::new(start, 0),
            end: SourcePoint::new(end, 0),
        }
    }

    fn define(arena: &mut NodeArena, parent: NodeId, kind: NodeKind, name: &str, qn: &str) -> NodeId {
        let node = AstNode::new(kind, name, range(0, 1))
            .unwrap()
            .with_qualified_name(qn);
        let id = arena.alloc(node);
        arena.add_child(parent, id).unwrap();
        id
    }

    #[test]
    fn paths_normalize_scope_operators() {
        assert_eq!(reference_path("geo::Shape"), vec!["geo", "Shape"]);
        assert_eq!(reference_path("p->area"), vec!["p", "area"]);
        assert_eq!(reference_path("self.area"), vec!["self", "area"]);
        assert_eq!(reference_path("make<int>"), vec!["make"]);
    }

    #[test]
    fn scope_chain_wins_over_short_name() {
        let mut arena = NodeArena::new();
        let root = arena.alloc(
            AstNode::new(NodeKind::Root, "ROOT", range(0, 9))
                .unwrap()
                .with_qualified_name("m.py"),
        );
        let shape = define(&mut arena, root, NodeKind::Class, "Shape", "m.py.Shape");
        let area = define(&mut arena, shape, NodeKind::Method, "area", "m.py.Shape.area");
        let report = define(&mut arena, shape, NodeKind::Method, "report", "m.py.Shape.report");
        let other = define(&mut arena, root, NodeKind::Class, "Other", "m.py.Other");
        define(&mut arena, other, NodeKind::Method, "area", "m.py.Other.area");

        let table = SymbolTable::collect(&arena);
        let call = |target: &str| ReferenceSite::new(ReferenceKind::Call, target, range(0, 1));

        assert_eq!(table.resolve(&arena, report, &call("self.area")).unwrap(), Some(area));
        assert_eq!(table.resolve(&arena, report, &call("Shape")).unwrap(), Some(shape));
        // Two `area` methods and no scope match: ambiguous.
        assert_eq!(table.resolve(&arena, root, &call("obj.area")).unwrap(), None);
        assert_eq!(table.resolve(&arena, report, &call("print")).unwrap(), None);

        let base = ReferenceSite::new(ReferenceKind::Inheritance, "area", range(0, 1));
        assert_eq!(table.resolve(&arena, other, &base).unwrap(), None);
    }
}
