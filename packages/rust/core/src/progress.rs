//! Progress callbacks for corpus builds.

use crate::builder::BuildResult;

/// Progress callback for reporting build status.
pub trait ProgressReporter: Send + Sync {
    /// Called before the first subcategory of a category is resolved.
    fn category_started(&self, name: &str, index: usize, total: usize);
    /// Called each time an article is accepted into the corpus.
    fn article_accepted(&self, title: &str, accepted: usize, quota: usize);
    /// Called once a category is finished (exhausted or quota reached).
    fn category_done(&self, name: &str, processed: usize, total: usize);
    /// Called when the build completes.
    fn done(&self, result: &BuildResult);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn category_started(&self, _name: &str, _index: usize, _total: usize) {}
    fn article_accepted(&self, _title: &str, _accepted: usize, _quota: usize) {}
    fn category_done(&self, _name: &str, _processed: usize, _total: usize) {}
    fn done(&self, _result: &BuildResult) {}
}
