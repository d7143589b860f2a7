use indexmap::IndexMap;
use scopemux_api::Language;
use scopemux_plugin::ExtractionPass;
use std::collections::HashMap;

/// Compiled queries of one language, keyed by pass.
#[derive(Debug)]
pub struct LanguageQueries<Q> {
    passes: IndexMap<ExtractionPass, Q>,
}

impl<Q> Default for LanguageQueries<Q> {
    fn default() -> Self {
        Self {
            passes: IndexMap::new(),
        }
    }
}

impl<Q> LanguageQueries<Q> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, pass: ExtractionPass, query: Q) -> Option<Q> {
        self.passes.insert(pass, query)
    }

    pub fn get(&self, pass: ExtractionPass) -> Option<&Q> {
        self.passes.get(&pass)
    }

    pub fn passes(&self) -> impl Iterator<Item = ExtractionPass> + '_ {
        self.passes.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.passes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }
}

/// One compiled query per (language, pass). Missing entries are normal.
#[derive(Debug)]
pub struct QueryCatalog<Q> {
    languages: HashMap<Language, LanguageQueries<Q>>,
}

impl<Q> Default for QueryCatalog<Q> {
    fn default() -> Self {
        Self {
            languages: HashMap::new(),
        }
    }
}

impl<Q> QueryCatalog<Q> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the full query set of `language`, replacing any earlier set.
    pub fn install(&mut self, language: Language, queries: LanguageQueries<Q>) {
        self.languages.insert(language, queries);
    }

    pub fn for_language(&self, language: &Language) -> Option<&LanguageQueries<Q>> {
        self.languages.get(language)
    }

    pub fn get(&self, language: &Language, pass: ExtractionPass) -> Option<&Q> {
        self.for_language(language)?.get(pass)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_queries_are_none() {
        let mut queries = LanguageQueries::new();
        queries.insert(ExtractionPass::Functions, "(function_definition) @function");
        let mut catalog = QueryCatalog::new();
        catalog.install(Language::C, queries);

        assert!(catalog.get(&Language::C, ExtractionPass::Functions).is_some());
        assert!(catalog.get(&Language::C, ExtractionPass::Classes).is_none());
        assert!(catalog.get(&Language::PYTHON, ExtractionPass::Functions).is_none());
    }
}
