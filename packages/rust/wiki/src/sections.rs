//! Plain-text extract parser.
//!
//! The TextExtracts API with `explaintext=1&exsectionformat=wiki` returns an
//! article as one string where headings look like `\n\n== Title ==\n`
//! (one extra `=` per nesting level). This module splits that string into the
//! lead summary and a nested [`SectionNode`] tree.

use std::sync::LazyLock;

use regex::Regex;
use wikicorpus_shared::SectionNode;

/// Matches a wiki-format heading line, capturing the opening `=` run and the title.
static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\n *(==+) (.*?) (==+) *\n").expect("heading regex"));

/// Split an extract into `(summary, top-level sections)`.
pub fn parse_extract(extract: &str) -> (String, Vec<SectionNode>) {
    let mut summary: Option<String> = None;
    let mut roots: Vec<SectionNode> = Vec::new();
    // Open sections from outermost to innermost, with their heading level.
    let mut open: Vec<(usize, SectionNode)> = Vec::new();
    let mut prev_end = 0;

    for caps in HEADING_RE.captures_iter(extract) {
        let (Some(whole), Some(marks), Some(title)) = (caps.get(0), caps.get(1), caps.get(2))
        else {
            continue;
        };
        let body = &extract[prev_end..whole.start()];

        match open.last_mut() {
            Some((_, current)) => current.text = body.trim().to_string(),
            None if summary.is_none() => summary = Some(body.trim().to_string()),
            None => {}
        }

        let level = marks.as_str().len() - 1;
        while open.last().is_some_and(|(open_level, _)| *open_level >= level) {
            close_innermost(&mut open, &mut roots);
        }
        open.push((level, SectionNode::new(title.as_str().trim(), "")));
        prev_end = whole.end();
    }

    if prev_end == 0 {
        return (extract.trim().to_string(), Vec::new());
    }

    if let Some((_, last)) = open.last_mut() {
        last.text = extract[prev_end..].to_string();
    }
    while !open.is_empty() {
        close_innermost(&mut open, &mut roots);
    }

    (summary.unwrap_or_default(), roots)
}

/// Pop the innermost open section and attach it to its parent (or the roots).
fn close_innermost(open: &mut Vec<(usize, SectionNode)>, roots: &mut Vec<SectionNode>) {
    if let Some((_, node)) = open.pop() {
        match open.last_mut() {
            Some((_, parent)) => parent.children.push(node),
            None => roots.push(node),
        }
    }
}
