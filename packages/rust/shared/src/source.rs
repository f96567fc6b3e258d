//! The content-retrieval capability the corpus builder depends on.

use std::future::Future;

use crate::error::Result;
use crate::types::{CategoryMember, WikiPage};

/// Narrow interface over an encyclopedia backend.
///
/// Implemented by the MediaWiki HTTP client and by in-memory fakes in tests.
/// Calls are awaited one at a time; implementations need not be thread-safe.
pub trait ContentSource {
    /// Members of a category page, in the order the backend lists them.
    fn category_members(
        &self,
        category: &str,
    ) -> impl Future<Output = Result<Vec<CategoryMember>>>;

    /// Resolve an article. Unknown titles yield [`WikiPage::missing`], not an error.
    fn fetch_page(&self, title: &str) -> impl Future<Output = Result<WikiPage>>;
}
