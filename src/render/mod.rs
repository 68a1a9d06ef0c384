//! Render tree for the results region, and the writers that print it.

pub mod export;
pub mod html;
pub mod text;

use crate::core::parser::{ParsedAdCopy, Section, SnippetBlock};
use serde::Serialize;

pub const INITIAL_PLACEHOLDER: &str = "Your generated ad assets will appear here.";
pub const NO_VARIATION_DATA: &str = "No headlines or descriptions found for this variation.";
pub const NO_SECTION_CONTENT: &str = "No content provided for this section.";
pub const RAW_OUTPUT_LABEL: &str = "Raw Output";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum Node {
    /// A titled container for one parsed section.
    Section { title: String, children: Vec<Node> },
    Heading(String),
    Paragraph(String),
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    Preformatted { label: Option<String>, text: String },
    BulletList(Vec<String>),
    Placeholder(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    pub nodes: Vec<Node>,
}

impl Document {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// What the results region shows before (and after a failed) run.
    pub fn initial() -> Self {
        Self::placeholder(INITIAL_PLACEHOLDER)
    }

    pub fn placeholder(message: impl Into<String>) -> Self {
        Self::new(vec![Node::Placeholder(message.into())])
    }

    pub fn section_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| matches!(node, Node::Section { .. }))
            .count()
    }
}

fn preformatted(text: impl Into<String>) -> Node {
    Node::Preformatted {
        label: None,
        text: text.into(),
    }
}

/// Two columns; the shorter one is padded with empty cells.
pub fn headline_table(headlines: &[String], descriptions: &[String]) -> Node {
    let rows = (0..headlines.len().max(descriptions.len()))
        .map(|i| {
            vec![
                headlines.get(i).cloned().unwrap_or_default(),
                descriptions.get(i).cloned().unwrap_or_default(),
            ]
        })
        .collect();

    Node::Table {
        headers: vec!["Headlines".to_string(), "Descriptions".to_string()],
        rows,
    }
}

fn verbatim_or_placeholder(raw: &str) -> Node {
    if raw.is_empty() {
        Node::Placeholder(NO_SECTION_CONTENT.to_string())
    } else {
        preformatted(raw)
    }
}

fn section_node(section: &Section) -> Node {
    match section {
        Section::Variation { title, variation } => {
            let body = if variation.headlines.is_empty() && variation.descriptions.is_empty() {
                Node::Placeholder(NO_VARIATION_DATA.to_string())
            } else {
                headline_table(&variation.headlines, &variation.descriptions)
            };
            Node::Section {
                title: title.clone(),
                children: vec![body],
            }
        }
        Section::Sitelinks { title, raw, .. } | Section::Callouts { title, raw, .. } => {
            Node::Section {
                title: title.clone(),
                children: vec![verbatim_or_placeholder(raw)],
            }
        }
        Section::StructuredSnippets { title, raw, blocks } => {
            let children = if blocks.is_empty() {
                vec![verbatim_or_placeholder(raw)]
            } else {
                blocks
                    .iter()
                    .flat_map(|block| match block {
                        SnippetBlock::Group(group) => vec![
                            Node::Heading(group.header.clone()),
                            Node::BulletList(group.values.clone()),
                        ],
                        SnippetBlock::Raw(text) => vec![preformatted(text.clone())],
                    })
                    .collect()
            };
            Node::Section {
                title: title.clone(),
                children,
            }
        }
    }
}

/// Builds the results region from a parsed response.
///
/// Fallbacks, in order: unmarked text becomes one preformatted block; a
/// result with no nodes at all shows the full raw text under a label.
pub fn from_parsed(parsed: &ParsedAdCopy, raw_text: &str) -> Document {
    let nodes = match parsed {
        ParsedAdCopy::Unstructured(text) if !text.trim().is_empty() => {
            vec![preformatted(text.clone())]
        }
        ParsedAdCopy::Unstructured(_) => Vec::new(),
        ParsedAdCopy::Structured { intro, sections } => intro
            .iter()
            .map(|text| Node::Paragraph(text.clone()))
            .chain(sections.iter().map(section_node))
            .collect(),
    };

    if nodes.is_empty() {
        return Document::new(vec![Node::Preformatted {
            label: Some(RAW_OUTPUT_LABEL.to_string()),
            text: raw_text.to_string(),
        }]);
    }

    Document::new(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parser::parse_ad_copy;

    const FULL_RESPONSE: &str = "AD COPY VARIATION 1 (Service Focus: Repair)\nHeadlines:\n- Fast Repair\nDescriptions:\n- We fix it.\n\nAD COPY VARIATION 2 (Service Focus: Install)\nHeadlines:\n- Pro Install\nDescriptions:\n- Done right.\n\nSITELINKS:\n- Sitelink Text: Contact Us\n  Description Line 1: Call now\n  Description Line 2: Open daily\n\nSTRUCTURED SNIPPETS:\nHeader: Services\n- Repair\n- Install\nHeader: Areas\n- North\n- South\n\nCALLOUTS:\n- Free Quotes\n- Licensed\n";

    fn render(text: &str) -> Document {
        from_parsed(&parse_ad_copy(text), text)
    }

    #[test]
    fn test_full_response_yields_five_sections_in_order() {
        let document = render(FULL_RESPONSE);
        assert_eq!(document.section_count(), 5);

        let titles: Vec<&str> = document
            .nodes
            .iter()
            .filter_map(|node| match node {
                Node::Section { title, .. } => Some(title.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(
            titles,
            [
                "AD COPY VARIATION 1 (Service Focus: Repair)",
                "AD COPY VARIATION 2 (Service Focus: Install)",
                "SITELINKS",
                "STRUCTURED SNIPPETS",
                "CALLOUTS"
            ]
        );

        let Node::Section { children, .. } = &document.nodes[3] else {
            panic!("expected snippets section");
        };
        assert_eq!(
            children,
            &vec![
                Node::Heading("Services".to_string()),
                Node::BulletList(vec!["Repair".to_string(), "Install".to_string()]),
                Node::Heading("Areas".to_string()),
                Node::BulletList(vec!["North".to_string(), "South".to_string()]),
            ]
        );
    }

    #[test]
    fn test_missing_descriptions_render_as_empty_cells() {
        let document = render("AD COPY VARIATION 1\nHeadlines:\n- A\n- B\nDescriptions:\n- X");
        let Node::Section { children, .. } = &document.nodes[0] else {
            panic!("expected section");
        };
        assert_eq!(
            children[0],
            Node::Table {
                headers: vec!["Headlines".to_string(), "Descriptions".to_string()],
                rows: vec![
                    vec!["A".to_string(), "X".to_string()],
                    vec!["B".to_string(), String::new()],
                ],
            }
        );
    }

    #[test]
    fn test_empty_variation_shows_placeholder() {
        let document = render("AD COPY VARIATION 1 (General Focus)\nNothing here.");
        let Node::Section { children, .. } = &document.nodes[0] else {
            panic!("expected section");
        };
        assert_eq!(children[0], Node::Placeholder(NO_VARIATION_DATA.to_string()));
    }

    #[test]
    fn test_sitelinks_and_callouts_are_verbatim() {
        let document = render("SITELINKS:\n- Sitelink Text: Contact\n  Description Line 1: a\nCALLOUTS:\n");
        assert_eq!(
            document.nodes[0],
            Node::Section {
                title: "SITELINKS".to_string(),
                children: vec![Node::Preformatted {
                    label: None,
                    text: "- Sitelink Text: Contact\n  Description Line 1: a".to_string(),
                }],
            }
        );
        assert_eq!(
            document.nodes[1],
            Node::Section {
                title: "CALLOUTS".to_string(),
                children: vec![Node::Placeholder(NO_SECTION_CONTENT.to_string())],
            }
        );
    }

    #[test]
    fn test_snippets_without_header_are_verbatim() {
        let document = render("STRUCTURED SNIPPETS:\nInsufficient detail in brief for specific Structured Snippets.");
        let Node::Section { children, .. } = &document.nodes[0] else {
            panic!("expected section");
        };
        assert!(matches!(&children[0], Node::Preformatted { label: None, text }
            if text == "Insufficient detail in brief for specific Structured Snippets."));
    }

    #[test]
    fn test_intro_prose_becomes_paragraph() {
        let document = render("Here you go!\n\nCALLOUTS:\n- Free Quotes");
        assert_eq!(document.nodes[0], Node::Paragraph("Here you go!".to_string()));
        assert_eq!(document.section_count(), 1);
    }

    #[test]
    fn test_unmarked_text_falls_back_to_single_block() {
        let text = "Sorry, I cannot help with that website.";
        assert_eq!(
            render(text).nodes,
            vec![Node::Preformatted {
                label: None,
                text: text.to_string(),
            }]
        );
    }

    #[test]
    fn test_nothing_rendered_shows_labeled_raw_text() {
        let document = from_parsed(&ParsedAdCopy::Unstructured("  \n".to_string()), "  \n");
        assert_eq!(
            document.nodes,
            vec![Node::Preformatted {
                label: Some(RAW_OUTPUT_LABEL.to_string()),
                text: "  \n".to_string(),
            }]
        );
    }
}
