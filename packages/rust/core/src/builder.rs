//! Corpus builder: taxonomy → category members → trimmed article records.

use std::time::{Duration, Instant};

use tracing::{debug, info, instrument};

use wikicorpus_shared::{
    ArticleRecord, CategoryMember, ContentSource, Corpus, CorpusOptions, MAIN_NAMESPACE, Result,
    Taxonomy, WikiPage,
};

use crate::progress::ProgressReporter;
use crate::section_filter;

/// Outcome of [`build_corpus`].
#[derive(Debug, Clone)]
pub struct BuildResult {
    /// Title-keyed records.
    pub corpus: Corpus,
    /// Categories fully processed.
    pub categories_processed: usize,
    /// Accepted articles summed over all categories (overwrites included).
    pub articles_accepted: usize,
    /// Members dropped by the namespace or list-page predicates.
    pub members_skipped: usize,
    /// Fetched pages that were missing or trimmed to nothing.
    pub pages_rejected: usize,
    /// Total duration of the build.
    pub elapsed: Duration,
}

// ---------------------------------------------------------------------------
// Member predicates
// ---------------------------------------------------------------------------

/// Ordinary content page (main namespace)?
pub fn is_article(member: &CategoryMember) -> bool {
    member.ns == MAIN_NAMESPACE
}

/// Does the title carry one of the "list of ..." markers?
pub fn is_list_page(title: &str, markers: &[String]) -> bool {
    markers.iter().any(|marker| title.contains(marker.as_str()))
}

// ---------------------------------------------------------------------------
// Per-article extraction
// ---------------------------------------------------------------------------

/// Keep the characters at positions `[start, end)` of `text`, clamped to its bounds.
pub fn char_window(text: &str, start: usize, end: usize) -> String {
    text.chars()
        .skip(start)
        .take(end.saturating_sub(start))
        .collect()
}

/// Turn a resolved page into a record, or `None` if it is missing or trims to nothing.
///
/// The summary is joined to the filtered section text without a separator,
/// then cut to the `[min_article_length, max_article_length)` character window.
/// Those bounds are slice offsets, not length thresholds.
pub fn extract_article(
    options: &CorpusOptions,
    page: &WikiPage,
    category: &str,
) -> Option<ArticleRecord> {
    if !page.exists {
        return None;
    }

    let body = section_filter::extract(&options.excluded_sections, &page.sections);
    let raw = page.summary.clone() + &body;
    let trimmed = char_window(&raw, options.min_article_length, options.max_article_length);

    if trimmed.is_empty() {
        return None;
    }

    Some(ArticleRecord::new(category, trimmed))
}

// ---------------------------------------------------------------------------
// Corpus build
// ---------------------------------------------------------------------------

/// Walk `taxonomy` and collect up to `options.max_articles` articles per category.
///
/// Everything runs sequentially. Errors from `source` abort the build.
#[instrument(skip_all, fields(categories = taxonomy.len(), quota = options.max_articles))]
pub async fn build_corpus<S: ContentSource>(
    source: &S,
    taxonomy: &Taxonomy,
    options: &CorpusOptions,
    progress: &dyn ProgressReporter,
) -> Result<BuildResult> {
    let start = Instant::now();
    let total = taxonomy.len();
    let quota = options.max_articles;

    let mut corpus = Corpus::new();
    let mut articles_accepted = 0;
    let mut members_skipped = 0;
    let mut pages_rejected = 0;

    info!(
        min_article_length = options.min_article_length,
        max_article_length = options.max_article_length,
        "starting corpus build"
    );

    for (idx, (category, subcategories)) in taxonomy.iter().enumerate() {
        progress.category_started(category, idx, total);
        let mut accepted = 0;

        'subcategories: for subcategory in subcategories {
            if accepted >= quota {
                break;
            }

            let members = source.category_members(subcategory).await?;
            debug!(%subcategory, members = members.len(), "resolved subcategory");

            for member in members {
                if accepted >= quota {
                    break 'subcategories;
                }

                if !is_article(&member) || is_list_page(&member.title, &options.list_markers) {
                    debug!(title = %member.title, ns = member.ns, "skipping member");
                    members_skipped += 1;
                    continue;
                }

                let page = source.fetch_page(&member.title).await?;
                match extract_article(options, &page, category) {
                    Some(record) => {
                        corpus.insert(member.title.clone(), record);
                        accepted += 1;
                        progress.article_accepted(&member.title, accepted, quota);
                    }
                    None => {
                        debug!(title = %member.title, exists = page.exists, "page rejected");
                        pages_rejected += 1;
                    }
                }
            }
        }

        articles_accepted += accepted;
        info!(%category, accepted, "{} of {} categories loaded.", idx + 1, total);
        progress.category_done(category, idx + 1, total);
    }

    let result = BuildResult {
        corpus,
        categories_processed: total,
        articles_accepted,
        members_skipped,
        pages_rejected,
        elapsed: start.elapsed(),
    };

    info!(
        articles = result.corpus.len(),
        accepted = result.articles_accepted,
        skipped = result.members_skipped,
        rejected = result.pages_rejected,
        duration_ms = result.elapsed.as_millis(),
        "corpus build completed"
    );

    progress.done(&result);
    Ok(result)
}
