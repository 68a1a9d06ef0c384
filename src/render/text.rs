use super::{Document, Node};
use std::fmt::Write;

const MAX_COLUMN_WIDTH: usize = 48;

fn width(text: &str) -> usize {
    text.chars().count()
}

fn pad(text: &str, target: usize) -> String {
    let mut padded = text.to_string();
    padded.extend(std::iter::repeat(' ').take(target.saturating_sub(width(text))));
    padded
}

fn write_table(out: &mut String, headers: &[String], rows: &[Vec<String>], indent: &str) {
    let columns = headers.len();
    let widths: Vec<usize> = (0..columns)
        .map(|c| {
            rows.iter()
                .filter_map(|row| row.get(c))
                .chain(headers.get(c))
                .map(|cell| width(cell))
                .max()
                .unwrap_or(0)
                .min(MAX_COLUMN_WIDTH)
        })
        .collect();

    let line = |cells: &[String]| -> String {
        (0..columns)
            .map(|c| pad(cells.get(c).map(String::as_str).unwrap_or(""), widths[c]))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let _ = writeln!(out, "{}{}", indent, line(headers));
    let rule = widths
        .iter()
        .map(|w| "-".repeat(*w))
        .collect::<Vec<_>>()
        .join("-+-");
    let _ = writeln!(out, "{}{}", indent, rule);
    for row in rows {
        let _ = writeln!(out, "{}{}", indent, line(row));
    }
}

fn write_node(out: &mut String, node: &Node, indent: &str) {
    match node {
        Node::Section { title, children } => {
            let _ = writeln!(out, "{}", title);
            let _ = writeln!(out, "{}", "=".repeat(width(title)));
            let inner = format!("{}  ", indent);
            for child in children {
                write_node(out, child, &inner);
            }
            out.push('\n');
        }
        Node::Heading(text) => {
            let _ = writeln!(out, "{}{}:", indent, text);
        }
        Node::Paragraph(text) => {
            let _ = writeln!(out, "{}{}\n", indent, text);
        }
        Node::Table { headers, rows } => write_table(out, headers, rows, indent),
        Node::Preformatted { label, text } => {
            if let Some(label) = label {
                let _ = writeln!(out, "{}[{}]", indent, label);
            }
            for line in text.lines() {
                let _ = writeln!(out, "{}{}", indent, line);
            }
        }
        Node::BulletList(items) => {
            for item in items {
                let _ = writeln!(out, "{}* {}", indent, item);
            }
        }
        Node::Placeholder(text) => {
            let _ = writeln!(out, "{}({})", indent, text);
        }
    }
}

/// Plain-text rendering for the terminal.
pub fn render(document: &Document) -> String {
    let mut out = String::new();
    for node in &document.nodes {
        write_node(&mut out, node, "");
    }
    out
}
