//! Corpus serialization: one JSON object or a flat CSV table.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;
use wikicorpus_shared::{Corpus, Result, WikiCorpusError};

/// Supported output artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// `articles.json`: title → `{category, text, length}`.
    Json,
    /// `articles.csv`: one `category,text,length` row per record, titles dropped.
    Csv,
}

impl OutputFormat {
    /// Recognize a format selector. Unknown selectors yield `None`.
    pub fn parse(selector: &str) -> Option<Self> {
        match selector {
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }

    /// File name the artifact is written to.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Json => "articles.json",
            Self::Csv => "articles.csv",
        }
    }
}

/// Write `corpus` into `out_dir` in the given format, returning the file path.
pub fn write_corpus(corpus: &Corpus, format: OutputFormat, out_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(out_dir).map_err(|e| WikiCorpusError::io(out_dir, e))?;
    let path = out_dir.join(format.file_name());
    let file = File::create(&path).map_err(|e| WikiCorpusError::io(&path, e))?;

    match format {
        OutputFormat::Json => write_json(corpus, BufWriter::new(file))?,
        OutputFormat::Csv => write_csv(corpus, file)?,
    }

    info!(path = %path.display(), articles = corpus.len(), "saved the articles");
    Ok(path)
}

/// Resolve `selector` and write the corpus. An unknown selector is logged and
/// nothing is written (`Ok(None)`).
pub fn save_corpus(corpus: &Corpus, selector: &str, out_dir: &Path) -> Result<Option<PathBuf>> {
    match OutputFormat::parse(selector) {
        Some(format) => write_corpus(corpus, format, out_dir).map(Some),
        None => {
            info!(
                format = %selector,
                "output format '{selector}' is unknown, can't save results"
            );
            Ok(None)
        }
    }
}

fn write_json<W: Write>(corpus: &Corpus, mut writer: W) -> Result<()> {
    serde_json::to_writer(&mut writer, corpus)
        .map_err(|e| WikiCorpusError::Output(format!("JSON serialization failed: {e}")))?;
    writer
        .flush()
        .map_err(|e| WikiCorpusError::Output(e.to_string()))
}

fn write_csv<W: Write>(corpus: &Corpus, writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for record in corpus.records() {
        csv.serialize(record)
            .map_err(|e| WikiCorpusError::Output(format!("CSV serialization failed: {e}")))?;
    }
    csv.flush()
        .map_err(|e| WikiCorpusError::Output(e.to_string()))
}
