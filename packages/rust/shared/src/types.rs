//! Core domain types for WikiCorpus runs.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// MediaWiki namespace number of ordinary content pages.
pub const MAIN_NAMESPACE: i64 = 0;

// ---------------------------------------------------------------------------
// Taxonomy
// ---------------------------------------------------------------------------

/// User-supplied mapping of category label → subcategory identifiers.
///
/// Key order follows the input file, which fixes the crawl order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Taxonomy(pub IndexMap<String, Vec<String>>);

impl Taxonomy {
    /// Number of top-level categories.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Categories with their subcategory identifiers, in input order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.0.iter()
    }
}

impl<K: Into<String>, V: IntoIterator<Item = S>, S: Into<String>> FromIterator<(K, V)>
    for Taxonomy
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into_iter().map(Into::into).collect()))
                .collect(),
        )
    }
}

// ---------------------------------------------------------------------------
// Content source shapes
// ---------------------------------------------------------------------------

/// One node of an article's section tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionNode {
    /// Heading text.
    pub title: String,
    /// Body text between this heading and the next one.
    pub text: String,
    /// Nested subsections, in document order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SectionNode>,
}

impl SectionNode {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            children: Vec::new(),
        }
    }

    /// Builder-style helper for attaching subsections.
    pub fn with_children(mut self, children: Vec<SectionNode>) -> Self {
        self.children = children;
        self
    }
}

/// An entry of a category listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryMember {
    /// Page title.
    pub title: String,
    /// MediaWiki namespace number (0 = article, 14 = category, ...).
    pub ns: i64,
}

impl CategoryMember {
    pub fn new(title: impl Into<String>, ns: i64) -> Self {
        Self {
            title: title.into(),
            ns,
        }
    }
}

/// A resolved article: lead text plus its section tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikiPage {
    pub title: String,
    /// `false` when the source could not resolve the title.
    pub exists: bool,
    /// Lead text before the first heading.
    pub summary: String,
    /// Top-level sections.
    pub sections: Vec<SectionNode>,
}

impl WikiPage {
    /// A page that resolved to nothing.
    pub fn missing(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            exists: false,
            summary: String::new(),
            sections: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// The per-article output unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    /// Taxonomy label the article was collected under.
    pub category: String,
    /// Filtered and trimmed article text.
    pub text: String,
    /// Character count of `text`.
    pub length: usize,
}

impl ArticleRecord {
    /// Build a record, deriving `length` from `text`.
    pub fn new(category: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            category: category.into(),
            length: text.chars().count(),
            text,
        }
    }
}

/// Title-keyed collection of article records produced by one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Corpus {
    articles: IndexMap<String, ArticleRecord>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, replacing any earlier record with the same title.
    ///
    /// A replaced title keeps its original position. Returns the replaced record.
    pub fn insert(
        &mut self,
        title: impl Into<String>,
        record: ArticleRecord,
    ) -> Option<ArticleRecord> {
        self.articles.insert(title.into(), record)
    }

    pub fn get(&self, title: &str) -> Option<&ArticleRecord> {
        self.articles.get(title)
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// `(title, record)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ArticleRecord)> {
        self.articles.iter()
    }

    /// Records only, in insertion order.
    pub fn records(&self) -> impl Iterator<Item = &ArticleRecord> {
        self.articles.values()
    }
}
