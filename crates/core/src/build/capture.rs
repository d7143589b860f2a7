use scopemux_api::NodeKind;
use scopemux_plugin::utils::{clean_comment, collapse_whitespace, strip_string_quotes};
use scopemux_plugin::{CaptureRole, ConcreteNode, ExtractedConstruct, ExtractionPass, QueryMatch};

/// A match whose capture set cannot describe a construct.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedMatch {
    #[error("pattern {0} has no primary capture")]
    NoPrimary(usize),
    #[error("pattern {0} has an empty primary capture")]
    EmptyPrimary(usize),
}

/// Result of reading one match's captures.
#[derive(Debug)]
pub struct Interpreted<N> {
    pub primary: N,
    /// Text of the enclosing-role capture, if the match had one.
    pub enclosing_name: Option<String>,
    pub construct: ExtractedConstruct,
}

/// Reads the captures of `m` into an [`ExtractedConstruct`].
///
/// The first primary capture selects the construct. A repeated `name`
/// capture overwrites the earlier one: the last name wins.
pub fn interpret<N: ConcreteNode>(
    pass: ExtractionPass,
    m: &QueryMatch<'_, N>,
    source: &str,
) -> Result<Interpreted<N>, MalformedMatch> {
    let mut primary: Option<(N, NodeKind)> = None;
    let mut name = None;
    let mut params = None;
    let mut return_type = None;
    let mut docstring = None;
    let mut path = None;
    let mut enclosing = None;
    let mut enclosing_name = None;
    let mut has_body = false;

    for capture in &m.captures {
        let text = || capture.node.text(source).trim().to_string();
        match CaptureRole::parse(capture.role) {
            CaptureRole::Primary(kind) => {
                if primary.is_none() {
                    primary = Some((capture.node, kind));
                }
            }
            CaptureRole::Name => name = Some(text()),
            CaptureRole::Params => params = Some(collapse_whitespace(&text())),
            CaptureRole::ReturnType => return_type = Some(collapse_whitespace(&text())),
            CaptureRole::Docstring => docstring = Some(clean_docstring(&text())),
            CaptureRole::Path => path = Some(text()),
            CaptureRole::Body => has_body = true,
            CaptureRole::Enclosing(kind) => {
                enclosing = Some(kind);
                enclosing_name = Some(text());
            }
            CaptureRole::Auxiliary => {}
        }
    }

    let Some((node, kind)) = primary else {
        return Err(MalformedMatch::NoPrimary(m.pattern_index));
    };
    if node.byte_range().is_empty() && !node.is_named() {
        return Err(MalformedMatch::EmptyPrimary(m.pattern_index));
    }

    let mut construct = ExtractedConstruct::new(pass, kind, node.point_range());
    construct.raw_content = Some(node.text(source).to_string());
    construct.name = name.filter(|n| !n.is_empty());
    construct.params = params;
    construct.return_type = return_type.filter(|r| !r.is_empty());
    construct.docstring = docstring.filter(|d| !d.is_empty());
    construct.enclosing = enclosing;

    if let Some(path) = path {
        let target = path.trim_matches(|c| matches!(c, '"' | '\'' | '<' | '>' | '`'));
        if path.starts_with('<') {
            construct.properties.insert("system".into(), "true".into());
        }
        if construct.name.is_none() && !target.is_empty() {
            construct.name = Some(target.to_string());
        }
        construct.properties.insert("path".into(), target.to_string());
    }
    if kind.is_callable() && !has_body {
        construct
            .properties
            .insert("declaration_only".into(), "true".into());
    }
    if let Some(en) = &enclosing_name {
        construct.properties.insert("enclosing".into(), en.clone());
    }

    // Unnamed control flow takes the grammar kind (`if_statement`).
    if construct.name.is_none() && matches!(pass, ExtractionPass::ControlFlow) {
        construct.name = Some(node.kind().to_string());
    }

    Ok(Interpreted {
        primary: node,
        enclosing_name,
        construct,
    })
}

fn clean_docstring(raw: &str) -> String {
    if raw.starts_with('/') || raw.starts_with('#') {
        clean_comment(raw)
    } else {
        strip_string_quotes(raw)
    }
}

/// `unnamed_<kind>`, e.g. `unnamed_struct`.
pub fn placeholder_name(kind: NodeKind) -> String {
    format!("unnamed_{}", kind.placeholder_stem())
}

/// Default signature when no adapter renders one:
/// `<return_type> <name><params>`, parameters defaulting to `()`.
pub fn compose_signature(name: &str, params: Option<&str>, return_type: Option<&str>) -> String {
    let params = params.filter(|p| !p.is_empty()).unwrap_or("()");
    match return_type {
        Some(ret) => format!("{ret} {name}{params}"),
        None => format!("{name}{params}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_follow_kind() {
        assert_eq!(placeholder_name(NodeKind::Struct), "unnamed_struct");
        assert_eq!(placeholder_name(NodeKind::Include), "unnamed_include");
    }

    #[test]
    fn signatures_default_to_empty_parameter_list() {
        assert_eq!(compose_signature("main", None, Some("int")), "int main()");
        assert_eq!(compose_signature("run", Some("(self, n)"), None), "run(self, n)");
        assert_eq!(compose_signature("f", Some(""), None), "f()");
    }
}
