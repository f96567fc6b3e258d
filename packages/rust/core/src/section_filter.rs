//! Recursive section filtering.

use std::collections::HashSet;

use wikicorpus_shared::SectionNode;

/// Concatenate the text of every section not named in `exclusions`.
///
/// Pre-order: a section's own text comes before its subsections. An excluded
/// title drops the section together with its whole subtree; its siblings are
/// still considered. Titles are compared exactly (case-sensitive).
pub fn extract(exclusions: &HashSet<String>, sections: &[SectionNode]) -> String {
    sections
        .iter()
        .filter(|section| !exclusions.contains(&section.title))
        .map(|section| section.text.clone() + &extract(exclusions, &section.children))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exclusions(titles: &[&str]) -> HashSet<String> {
        titles.iter().map(|t| t.to_string()).collect()
    }

    fn sample_tree() -> Vec<SectionNode> {
        let rom = SectionNode::new("Rom", "R.");
        let antike = SectionNode::new("Antike", "A.").with_children(vec![rom]);
        let nested = SectionNode::new("Literatur", "hidden-nested.");
        let geschichte =
            SectionNode::new("Geschichte", "G.").with_children(vec![antike, nested]);
        let literatur = SectionNode::new("Literatur", "hidden.")
            .with_children(vec![SectionNode::new("Primär", "hidden-child.")]);
        let gegenwart = SectionNode::new("Gegenwart", "J.");

        vec![geschichte, literatur, gegenwart]
    }

    #[test]
    fn empty_exclusions_is_preorder_concatenation() {
        let text = extract(&HashSet::new(), &sample_tree());
        assert_eq!(text, "G.A.R.hidden-nested.hidden.hidden-child.J.");
    }

    #[test]
    fn excluded_section_drops_whole_subtree() {
        let text = extract(&exclusions(&["Literatur"]), &sample_tree());
        assert_eq!(text, "G.A.R.J.");
        assert!(!text.contains("hidden"));
    }

    #[test]
    fn exclusion_applies_at_any_depth() {
        let text = extract(&exclusions(&["Antike"]), &sample_tree());
        assert_eq!(text, "G.hidden-nested.hidden.hidden-child.J.");
    }

    #[test]
    fn siblings_of_excluded_section_survive() {
        let text = extract(&exclusions(&["Geschichte"]), &sample_tree());
        assert_eq!(text, "hidden.hidden-child.J.");
    }

    #[test]
    fn matching_is_exact_and_case_sensitive() {
        let tree = vec![
            SectionNode::new("literatur", "lower."),
            SectionNode::new("Literatur und Quellen", "longer."),
            SectionNode::new("Literatur", "exact."),
        ];
        let text = extract(&exclusions(&["Literatur"]), &tree);
        assert_eq!(text, "lower.longer.");
    }

    #[test]
    fn empty_tree_yields_empty_text() {
        assert_eq!(extract(&exclusions(&["Weblinks"]), &[]), "");
    }

    #[test]
    fn deep_tree_is_fully_traversed() {
        let mut node = SectionNode::new("Ebene 0", "0");
        for level in 1..50 {
            node = SectionNode::new(format!("Ebene {level}"), level.to_string())
                .with_children(vec![node]);
        }
        let text = extract(&HashSet::new(), &[node]);
        assert!(text.starts_with("4948"));
        assert!(text.ends_with("210"));
    }
}
