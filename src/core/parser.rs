//! Recovers ad assets from the free text of the ad-copy response.
//!
//! The text is tokenized on section markers first; each section is then
//! parsed on its own. Nothing here fails: when the expected shape is not
//! there, the raw text is kept so the renderer can show it as-is.

use crate::domain::model::{AdAssetBundle, AdCopyVariation, Sitelink, SnippetGroup, GENERAL_FOCUS};
use regex::Regex;
use std::sync::LazyLock;

static MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)AD COPY VARIATION[ \t]+\d+(?:[ \t]*\([^\n]*\))?[ \t]*:?|SITELINKS:|STRUCTURED SNIPPETS:|CALLOUTS:",
    )
    .expect("marker pattern is valid")
});

static HEADLINES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)Headlines:(.*?)(?:Descriptions:|\z)").expect("headlines pattern is valid")
});

static DESCRIPTIONS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)Descriptions:(.*)\z").expect("descriptions pattern is valid")
});

static SERVICE_FOCUS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\(\s*Service Focus:\s*(.*)\)").expect("service focus pattern is valid")
});

static SNIPPET_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bHeader:").expect("header pattern is valid"));

static SITELINK_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(sitelink text|description line 1|description line 2)\s*:\s*(.*)$")
        .expect("sitelink pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Variation,
    Sitelinks,
    StructuredSnippets,
    Callouts,
}

impl MarkerKind {
    fn classify(marker: &str) -> Self {
        let upper = marker.to_ascii_uppercase();
        if upper.starts_with("AD COPY VARIATION") {
            MarkerKind::Variation
        } else if upper.starts_with("SITELINKS") {
            MarkerKind::Sitelinks
        } else if upper.starts_with("STRUCTURED SNIPPETS") {
            MarkerKind::StructuredSnippets
        } else {
            MarkerKind::Callouts
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnippetBlock {
    Group(SnippetGroup),
    /// A block that did not have a header followed by dash-prefixed values.
    Raw(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section {
    Variation {
        title: String,
        variation: AdCopyVariation,
    },
    Sitelinks {
        title: String,
        raw: String,
        entries: Vec<Sitelink>,
    },
    StructuredSnippets {
        title: String,
        raw: String,
        /// Empty when the section had no `Header:` at all.
        blocks: Vec<SnippetBlock>,
    },
    Callouts {
        title: String,
        raw: String,
        values: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedAdCopy {
    Structured {
        /// Prose before the first marker.
        intro: Option<String>,
        sections: Vec<Section>,
    },
    /// No marker anywhere in the text.
    Unstructured(String),
}

/// Trims whitespace plus the markdown emphasis models like to wrap labels in.
fn trim_decoration(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || c == '*' || c == '#')
}

/// Items of a dash-prefixed list. The dash is optional; decoration-only and
/// empty lines are dropped.
fn list_items(block: &str) -> Vec<String> {
    block
        .lines()
        .map(|line| {
            let line = line.trim();
            line.strip_prefix('-').unwrap_or(line).trim()
        })
        .filter(|line| !trim_decoration(line).is_empty())
        .map(str::to_string)
        .collect()
}

/// Values of a list where only dash-prefixed lines count.
fn dash_values<'a>(lines: impl Iterator<Item = &'a str>) -> Vec<String> {
    lines
        .filter_map(|line| line.trim().strip_prefix('-'))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn service_focus(title: &str) -> String {
    SERVICE_FOCUS
        .captures(title)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|focus| !focus.is_empty())
        .unwrap_or_else(|| GENERAL_FOCUS.to_string())
}

/// Headlines and descriptions of one variation chunk.
pub fn parse_variation(title: &str, chunk: &str) -> AdCopyVariation {
    let headlines = HEADLINES
        .captures(chunk)
        .and_then(|caps| caps.get(1))
        .map(|m| list_items(m.as_str()))
        .unwrap_or_default();
    let descriptions = DESCRIPTIONS
        .captures(chunk)
        .and_then(|caps| caps.get(1))
        .map(|m| list_items(m.as_str()))
        .unwrap_or_default();

    AdCopyVariation {
        service_focus: service_focus(title),
        headlines,
        descriptions,
    }
}

/// Splits a structured-snippets chunk on `Header:`.
pub fn parse_snippets(chunk: &str) -> Vec<SnippetBlock> {
    let mut pieces = SNIPPET_HEADER.split(chunk);
    let mut blocks = Vec::new();

    if let Some(preamble) = pieces.next() {
        let preamble = trim_decoration(preamble);
        if !preamble.is_empty() && SNIPPET_HEADER.is_match(chunk) {
            blocks.push(SnippetBlock::Raw(preamble.to_string()));
        }
    }

    for piece in pieces {
        let block = piece.trim();
        if block.is_empty() {
            continue;
        }

        let mut lines = block.lines();
        let header = lines
            .next()
            .map(|line| trim_decoration(line).trim_end_matches(':').trim())
            .unwrap_or_default()
            .to_string();
        let values = dash_values(lines);

        if !header.is_empty() && !values.is_empty() {
            blocks.push(SnippetBlock::Group(SnippetGroup { header, values }));
        } else {
            blocks.push(SnippetBlock::Raw(block.to_string()));
        }
    }

    blocks
}

/// Best-effort sitelink entries; anything that does not fit is ignored.
pub fn parse_sitelinks(chunk: &str) -> Vec<Sitelink> {
    let mut entries: Vec<Sitelink> = Vec::new();

    for line in chunk.lines() {
        let line = line.trim();
        let line = trim_decoration(line.strip_prefix('-').unwrap_or(line));
        let Some(caps) = SITELINK_FIELD.captures(line) else {
            continue;
        };
        let value = trim_decoration(&caps[2]).to_string();

        match caps[1].to_ascii_lowercase().as_str() {
            "sitelink text" => entries.push(Sitelink {
                text: value,
                ..Sitelink::default()
            }),
            field => {
                if let Some(entry) = entries.last_mut() {
                    if field.ends_with('1') {
                        entry.description_line1 = value;
                    } else {
                        entry.description_line2 = value;
                    }
                }
            }
        }
    }

    entries
}

fn section(marker: &str, chunk: &str) -> Section {
    let title = trim_decoration(marker).trim_end_matches(':').trim().to_string();
    let raw = trim_decoration(chunk).to_string();

    match MarkerKind::classify(&title) {
        MarkerKind::Variation => Section::Variation {
            variation: parse_variation(&title, chunk),
            title,
        },
        MarkerKind::Sitelinks => Section::Sitelinks {
            entries: parse_sitelinks(chunk),
            title,
            raw,
        },
        MarkerKind::StructuredSnippets => Section::StructuredSnippets {
            blocks: parse_snippets(chunk),
            title,
            raw,
        },
        MarkerKind::Callouts => Section::Callouts {
            values: dash_values(chunk.lines()),
            title,
            raw,
        },
    }
}

pub fn parse_ad_copy(text: &str) -> ParsedAdCopy {
    let markers: Vec<_> = MARKER.find_iter(text).collect();
    if markers.is_empty() {
        return ParsedAdCopy::Unstructured(text.to_string());
    }

    let intro = trim_decoration(&text[..markers[0].start()]);
    let intro = (!intro.is_empty()).then(|| intro.to_string());

    let sections = markers
        .iter()
        .enumerate()
        .map(|(i, marker)| {
            let end = markers.get(i + 1).map_or(text.len(), |next| next.start());
            section(marker.as_str(), &text[marker.end()..end])
        })
        .collect();

    ParsedAdCopy::Structured { intro, sections }
}

impl ParsedAdCopy {
    pub fn bundle(&self) -> AdAssetBundle {
        let mut bundle = AdAssetBundle::default();
        let ParsedAdCopy::Structured { sections, .. } = self else {
            return bundle;
        };

        for section in sections {
            match section {
                Section::Variation { variation, .. } => bundle.variations.push(variation.clone()),
                Section::Sitelinks { entries, .. } => bundle.sitelinks.extend(entries.iter().cloned()),
                Section::StructuredSnippets { blocks, .. } => {
                    bundle
                        .structured_snippets
                        .extend(blocks.iter().filter_map(|block| match block {
                            SnippetBlock::Group(group) => Some(group.clone()),
                            SnippetBlock::Raw(_) => None,
                        }))
                }
                Section::Callouts { values, .. } => bundle.callouts.extend(values.iter().cloned()),
            }
        }

        bundle
    }
}
