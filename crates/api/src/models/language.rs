use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Source languages understood by the normalization engine.
///
/// The set is open: plugins may register languages beyond the built-in constants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct Language(#[schemars(with = "String")] Cow<'static, str>);

impl Language {
    pub const UNKNOWN: Language = Language(Cow::Borrowed("unknown"));
    pub const C: Language = Language(Cow::Borrowed("c"));
    pub const CPP: Language = Language(Cow::Borrowed("cpp"));
    pub const PYTHON: Language = Language(Cow::Borrowed("python"));
    pub const JAVASCRIPT: Language = Language(Cow::Borrowed("javascript"));
    pub const TYPESCRIPT: Language = Language(Cow::Borrowed("typescript"));
    /// TypeScript with JSX, parsed by its own grammar.
    pub const TSX: Language = Language(Cow::Borrowed("tsx"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    /// Map a file extension to a built-in Language.
    /// Returns `None` for extensions no built-in language claims.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_lowercase().as_str() {
            "c" | "h" => Some(Self::C),
            "cpp" | "cc" | "cxx" | "hpp" | "hh" | "hxx" => Some(Self::CPP),
            "py" | "pyi" => Some(Self::PYTHON),
            "js" | "mjs" | "cjs" | "jsx" => Some(Self::JAVASCRIPT),
            "ts" | "mts" | "cts" => Some(Self::TYPESCRIPT),
            "tsx" => Some(Self::TSX),
            _ => None,
        }
    }

    /// Resolve a language from a (virtual) file name.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let (_, ext) = filename.rsplit_once('.')?;
        Self::from_extension(ext)
    }

    pub fn is_unknown(&self) -> bool {
        *self == Self::UNKNOWN
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::UNKNOWN
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Language {
    fn from(s: &str) -> Self {
        Self::new(s.to_string())
    }
}

impl From<String> for Language {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for Language {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_files_map_to_c() {
        assert_eq!(Language::from_extension("h"), Some(Language::C));
        assert_eq!(Language::from_extension(".HPP"), Some(Language::CPP));
        assert_eq!(Language::from_filename("src/app.test.ts"), Some(Language::TYPESCRIPT));
        assert_eq!(Language::from_filename("ui/App.tsx"), Some(Language::TSX));
        assert_eq!(Language::from_filename("Makefile"), None);
    }

    #[test]
    fn registered_names_compare_equal_to_constants() {
        assert_eq!(Language::from("python"), Language::PYTHON);
        assert!(Language::default().is_unknown());
    }
}
