/// Strips comment markers (`//`, `/* */`, `/** */`, `#`) and the per-line
/// ` * ` decoration of block comments, then trims.
pub fn clean_comment(raw: &str) -> String {
    let body = raw.trim();
    let body = match body.find("*/") {
        Some(end) if body.starts_with("/*") => &body[..end],
        _ => body,
    };
    let lines: Vec<&str> = body
        .lines()
        .map(|line| {
            let line = line.trim_start();
            let line = line.trim_start_matches('/');
            let line = line.trim_start_matches('*');
            let line = line.trim_start_matches('#');
            line.trim()
        })
        .collect();

    // Drop blank lines left over from `/**` and ` */` lines.
    let first = lines.iter().position(|l| !l.is_empty());
    let last = lines.iter().rposition(|l| !l.is_empty());
    match (first, last) {
        (Some(first), Some(last)) => lines[first..=last].join("\n"),
        _ => String::new(),
    }
}

/// Removes the quotes of a string literal used as a docstring
/// (`"""..."""`, `'''...'''`, `"..."`, `'...'`, with optional prefix letters).
pub fn strip_string_quotes(raw: &str) -> String {
    let trimmed = raw.trim();
    let prefix = trimmed
        .find(['"', '\'', '`'])
        .filter(|&i| trimmed[..i].chars().all(|c| "rRuUbBfF".contains(c)))
        .unwrap_or(0);
    let s = &trimmed[prefix..];
    for quote in ["\"\"\"", "'''", "\"", "'", "`"] {
        if s.len() >= 2 * quote.len() && s.starts_with(quote) && s.ends_with(quote) {
            return s[quote.len()..s.len() - quote.len()].trim().to_string();
        }
    }
    s.trim().to_string()
}

/// Collapses runs of whitespace (including newlines) into single spaces.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// File name with directories stripped; `unknown_file` when absent.
pub fn base_filename(filename: Option<&str>) -> &str {
    match filename {
        Some(name) if !name.is_empty() => name.rsplit(['/', '\\']).next().unwrap_or(name),
        _ => "unknown_file",
    }
}
