use lru::LruCache;
use privalint_core::{PrivalintError, PrivalintResult};
use regex::{Regex, RegexBuilder};
use serde::Deserialize;
use std::collections::{HashMap, HashSet, VecDeque};
use std::collections::BTreeSet;
use std::num::NonZeroUsize;
use std::path::Path;
use std::sync::Mutex;
use tracing::warn;

/// Default bound for the per-registry recognition caches.
pub const DEFAULT_CACHE_BOUND: usize = 300;

/// One term of a family: a canonical name plus the compiled patterns and
/// whole-word synonyms that recognize it in free text.
struct TermDef {
    name: String,
    patterns: Vec<(String, Regex)>,
    synonyms: Vec<(String, Regex)>,
}

/// A definition document as it appears in the ontology YAML files.
#[derive(Debug, Deserialize)]
struct TermDocument {
    name: String,
    #[serde(default)]
    patterns: Vec<String>,
    #[serde(default)]
    synonym: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RelationEdge {
    source: String,
    target: String,
}

/// A per-family subsumption registry: the term vocabulary, the descendant
/// closure of the is-a relation, and the recognition entry points.
///
/// Loading is permissive: malformed documents, uncompilable patterns and
/// edges naming undefined terms are logged and skipped. After `finish()`
/// the registry is immutable apart from its internal caches.
pub struct Registry {
    family: &'static str,
    terms: Vec<TermDef>,
    known: HashSet<String>,
    aliases: HashMap<String, String>,
    edges: Vec<(String, String)>,
    descendants: HashMap<String, HashSet<String>>,
    first_cache: Mutex<LruCache<String, Option<String>>>,
    lower_cache: Mutex<LruCache<String, BTreeSet<String>>>,
}

impl Registry {
    pub fn new(family: &'static str) -> Self {
        Self::with_cache_bound(family, DEFAULT_CACHE_BOUND)
    }

    pub fn with_cache_bound(family: &'static str, bound: usize) -> Self {
        let bound = NonZeroUsize::new(bound.max(1)).unwrap();
        Self {
            family,
            terms: Vec::new(),
            known: HashSet::new(),
            aliases: HashMap::new(),
            edges: Vec::new(),
            descendants: HashMap::new(),
            first_cache: Mutex::new(LruCache::new(bound)),
            lower_cache: Mutex::new(LruCache::new(bound)),
        }
    }

    pub fn family(&self) -> &'static str {
        self.family
    }

    pub fn contains(&self, name: &str) -> bool {
        self.known.contains(name)
    }

    pub fn term_names(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(|t| t.name.as_str())
    }

    /// Registers a term, merging into an existing definition of the same
    /// name. Patterns that fail to compile are logged and dropped.
    pub fn add_term(&mut self, name: &str, patterns: &[&str], synonyms: &[&str]) {
        let name = name.trim().to_lowercase();
        if name.is_empty() {
            warn!(family = self.family, "skipping term definition without a name");
            return;
        }

        let compiled_patterns = patterns.iter().filter_map(|p| {
            let source = p.to_lowercase();
            match RegexBuilder::new(&source).case_insensitive(true).build() {
                Ok(regex) => Some((source, regex)),
                Err(err) => {
                    warn!(
                        family = self.family,
                        term = %name,
                        pattern = %source,
                        "dropping uncompilable pattern: {err}"
                    );
                    None
                }
            }
        });
        let compiled_synonyms = synonyms.iter().filter_map(|s| {
            let source = s.to_lowercase();
            let word = format!(r"\b{}\b", regex::escape(&source));
            match RegexBuilder::new(&word).case_insensitive(true).build() {
                Ok(regex) => Some((source, regex)),
                Err(err) => {
                    warn!(
                        family = self.family,
                        term = %name,
                        synonym = %source,
                        "dropping uncompilable synonym: {err}"
                    );
                    None
                }
            }
        });

        if let Some(existing) = self.terms.iter_mut().find(|t| t.name == name) {
            existing.patterns.extend(compiled_patterns);
            existing.synonyms.extend(compiled_synonyms);
        } else {
            self.terms.push(TermDef {
                name: name.clone(),
                patterns: compiled_patterns.collect(),
                synonyms: compiled_synonyms.collect(),
            });
        }
        self.known.insert(name);
    }

    /// Maps an exact input string to a term ahead of any pattern matching.
    pub fn add_alias(&mut self, input: &str, term: &str) {
        let term = term.to_lowercase();
        if !self.known.contains(&term) {
            warn!(family = self.family, alias = input, term = %term, "alias targets undefined term");
            return;
        }
        self.aliases.insert(input.to_lowercase(), term);
    }

    /// Records an is-a edge: `source` is more specific than `target`.
    /// Edges naming undefined terms are logged and skipped.
    pub fn add_edge(&mut self, source: &str, target: &str) {
        let source = source.trim().to_lowercase();
        let target = target.trim().to_lowercase();
        if !self.known.contains(&source) || !self.known.contains(&target) {
            warn!(
                family = self.family,
                source = %source,
                target = %target,
                "skipping relation edge with undefined term"
            );
            return;
        }
        self.edges.push((source, target));
    }

    /// Sorts the vocabulary for deterministic recognition and computes the
    /// descendant closure. Safe to call again after further additions.
    pub fn finish(&mut self) {
        self.terms.sort_by(|a, b| a.name.cmp(&b.name));
        for term in &mut self.terms {
            term.patterns.sort_by(|a, b| a.0.cmp(&b.0));
            term.synonyms.sort_by(|a, b| a.0.cmp(&b.0));
        }

        let mut children: HashMap<&str, Vec<&str>> = HashMap::new();
        for (source, target) in &self.edges {
            children.entry(target.as_str()).or_default().push(source.as_str());
        }

        self.descendants.clear();
        for term in &self.terms {
            let mut reach: HashSet<String> = HashSet::new();
            let mut queue: VecDeque<&str> =
                children.get(term.name.as_str()).into_iter().flatten().copied().collect();
            while let Some(below) = queue.pop_front() {
                if reach.insert(below.to_string()) {
                    if let Some(next) = children.get(below) {
                        queue.extend(next.iter().copied());
                    }
                }
            }
            if !reach.is_empty() {
                self.descendants.insert(term.name.clone(), reach);
            }
        }

        self.first_cache.lock().unwrap().clear();
        self.lower_cache.lock().unwrap().clear();
    }

    /// Loads definition documents from a YAML file (a list of documents or a
    /// single one) or from a directory of such files.
    pub fn load_definitions(&mut self, path: &Path) -> PrivalintResult<()> {
        if path.is_dir() {
            let mut entries: Vec<_> = std::fs::read_dir(path)
                .map_err(|e| load_error(path, &e.to_string()))?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|p| {
                    matches!(
                        p.extension().and_then(|e| e.to_str()),
                        Some("yml") | Some("yaml")
                    )
                })
                .collect();
            entries.sort();
            for file in entries {
                self.load_definition_file(&file)?;
            }
            Ok(())
        } else {
            self.load_definition_file(path)
        }
    }

    fn load_definition_file(&mut self, path: &Path) -> PrivalintResult<()> {
        let content =
            std::fs::read_to_string(path).map_err(|e| load_error(path, &e.to_string()))?;
        let value: serde_yaml::Value =
            serde_yaml::from_str(&content).map_err(|e| load_error(path, &e.to_string()))?;

        let documents: Vec<serde_yaml::Value> = match value {
            serde_yaml::Value::Sequence(items) => items,
            other => vec![other],
        };
        for document in documents {
            match serde_yaml::from_value::<TermDocument>(document) {
                Ok(doc) => {
                    let patterns: Vec<&str> = doc.patterns.iter().map(String::as_str).collect();
                    let synonyms: Vec<&str> = doc.synonym.iter().map(String::as_str).collect();
                    self.add_term(&doc.name, &patterns, &synonyms);
                }
                Err(err) => {
                    warn!(
                        family = self.family,
                        path = %path.display(),
                        "skipping malformed term document: {err}"
                    );
                }
            }
        }
        Ok(())
    }

    /// Loads is-a edges from a relation YAML file.
    pub fn load_relations(&mut self, path: &Path) -> PrivalintResult<()> {
        let content =
            std::fs::read_to_string(path).map_err(|e| load_error(path, &e.to_string()))?;
        let value: serde_yaml::Value =
            serde_yaml::from_str(&content).map_err(|e| load_error(path, &e.to_string()))?;
        let edges = match value {
            serde_yaml::Value::Sequence(items) => items,
            serde_yaml::Value::Null => {
                warn!(family = self.family, path = %path.display(), "empty relation file");
                Vec::new()
            }
            other => vec![other],
        };
        for edge in edges {
            match serde_yaml::from_value::<RelationEdge>(edge) {
                Ok(edge) => self.add_edge(&edge.source, &edge.target),
                Err(err) => {
                    warn!(
                        family = self.family,
                        path = %path.display(),
                        "skipping malformed relation edge: {err}"
                    );
                }
            }
        }
        Ok(())
    }

    /// Whether `a` is a strict descendant of `b` (more specific).
    pub fn is_lower(&self, a: &str, b: &str) -> bool {
        a != b && self.descendants.get(b).is_some_and(|set| set.contains(a))
    }

    /// Whether `a` is a strict ancestor of `b` (more general).
    pub fn is_higher(&self, a: &str, b: &str) -> bool {
        self.is_lower(b, a)
    }

    /// Same term, or related through the lattice in either direction.
    pub fn is_related(&self, a: &str, b: &str) -> bool {
        a == b || self.is_lower(a, b) || self.is_higher(a, b)
    }

    /// The first recognized term, scanning terms by name and patterns
    /// lexically within a term; patterns take precedence over synonyms.
    pub fn recognize_first(&self, input: &str) -> Option<String> {
        if let Some(hit) = self.first_cache.lock().unwrap().get(input) {
            return hit.clone();
        }
        let result = self.recognize_first_uncached(input);
        self.first_cache
            .lock()
            .unwrap()
            .put(input.to_string(), result.clone());
        result
    }

    fn recognize_first_uncached(&self, input: &str) -> Option<String> {
        let text = input.to_lowercase();
        if let Some(term) = self.aliases.get(text.trim()) {
            return Some(term.clone());
        }
        for term in &self.terms {
            if term.patterns.iter().any(|(_, regex)| regex.is_match(&text)) {
                return Some(term.name.clone());
            }
        }
        for term in &self.terms {
            if term.synonyms.iter().any(|(_, regex)| regex.is_match(&text)) {
                return Some(term.name.clone());
            }
        }
        None
    }

    /// All terms whose patterns or synonyms match somewhere in the input.
    pub fn recognize_all(&self, input: &str) -> BTreeSet<String> {
        let text = input.to_lowercase();
        if let Some(term) = self.aliases.get(text.trim()) {
            return BTreeSet::from([term.clone()]);
        }
        let mut matched = BTreeSet::new();
        for term in &self.terms {
            if term.patterns.iter().any(|(_, regex)| regex.is_match(&text))
                || term.synonyms.iter().any(|(_, regex)| regex.is_match(&text))
            {
                matched.insert(term.name.clone());
            }
        }
        matched
    }

    /// Specificity reduction: a term that is an ancestor of another member
    /// of the set is dropped.
    pub fn reduce_specificity(&self, terms: &BTreeSet<String>) -> BTreeSet<String> {
        terms
            .iter()
            .filter(|b| !terms.iter().any(|a| self.is_lower(a, b)))
            .cloned()
            .collect()
    }

    /// `recognize_all` followed by specificity reduction: a match that is an
    /// ancestor of another match is dropped.
    pub fn recognize_lower(&self, input: &str) -> BTreeSet<String> {
        if let Some(hit) = self.lower_cache.lock().unwrap().get(input) {
            return hit.clone();
        }
        let candidates = self.recognize_all(input);
        let reduced = self.reduce_specificity(&candidates);
        self.lower_cache
            .lock()
            .unwrap()
            .put(input.to_string(), reduced.clone());
        reduced
    }
}

fn load_error(path: &Path, reason: &str) -> PrivalintError {
    PrivalintError::OntologyLoad {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}
