use super::{Document, Node};
use crate::config::preferences::Theme;
use crate::utils::error::Result;
use askama::Template;

/// Everything around the results region in the HTML page.
#[derive(Debug, Clone)]
pub struct PageContext<'a> {
    pub theme: Theme,
    pub url: Option<&'a str>,
    pub brief: Option<&'a str>,
    pub error: Option<&'a str>,
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Copy)]
struct Palette {
    background: &'static str,
    surface: &'static str,
    text: &'static str,
    muted: &'static str,
    border: &'static str,
}

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                background: "#F8F9FA",
                surface: "#FFFFFF",
                text: "#212529",
                muted: "#6C757D",
                border: "#DEE2E6",
            },
            Theme::Dark => Self {
                background: "#121212",
                surface: "#1E1E1E",
                text: "#E9ECEF",
                muted: "#ADB5BD",
                border: "#343A40",
            },
        }
    }
}

#[derive(Template)]
#[template(path = "node.html")]
struct NodeTemplate<'a> {
    node: &'a Node,
    /// Rendered children when `node` is a section.
    inner: String,
}

#[derive(Template)]
#[template(path = "page.html")]
struct PageTemplate<'a> {
    theme: &'static str,
    palette: Palette,
    url: Option<&'a str>,
    error: Option<&'a str>,
    brief: Option<&'a str>,
    results: String,
    generated_at: String,
}

fn render_node(node: &Node) -> askama::Result<String> {
    let inner = match node {
        Node::Section { children, .. } => children
            .iter()
            .map(render_node)
            .collect::<askama::Result<String>>()?,
        _ => String::new(),
    };
    NodeTemplate { node, inner }.render()
}

/// Results region only.
pub fn render_fragment(document: &Document) -> Result<String> {
    Ok(document
        .nodes
        .iter()
        .map(render_node)
        .collect::<askama::Result<String>>()?)
}

/// A standalone page: error region, optional brief, then the results region.
pub fn render_page(document: &Document, context: &PageContext<'_>) -> Result<String> {
    let page = PageTemplate {
        theme: context.theme.as_str(),
        palette: Palette::for_theme(context.theme),
        url: context.url,
        error: context.error,
        brief: context.brief,
        results: render_fragment(document)?,
        generated_at: context.generated_at.format("%Y-%m-%d %H:%M UTC").to_string(),
    };
    Ok(page.render()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::headline_table;

    #[test]
    fn test_fragment_escapes_model_text() {
        let document = Document::new(vec![Node::Section {
            title: "AD COPY VARIATION 1 (Service Focus: <script>)".to_string(),
            children: vec![headline_table(&["Tom & Jerry".to_string()], &[])],
        }]);

        let html = render_fragment(&document).unwrap();
        assert!(html.contains("<h2>AD COPY VARIATION 1 (Service Focus: &lt;script&gt;)</h2>"));
        assert!(html.contains("<th>Headlines</th><th>Descriptions</th>"));
        assert!(html.contains("<td>Tom &amp; Jerry</td><td></td>"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_fragment_renders_snippet_groups_and_labels() {
        let document = Document::new(vec![
            Node::Section {
                title: "STRUCTURED SNIPPETS".to_string(),
                children: vec![
                    Node::Heading("Services".to_string()),
                    Node::BulletList(vec!["Repair".to_string(), "Install".to_string()]),
                ],
            },
            Node::Preformatted {
                label: Some("Raw Output".to_string()),
                text: "a < b".to_string(),
            },
        ]);

        let html = render_fragment(&document).unwrap();
        assert!(html.contains("<h2>STRUCTURED SNIPPETS</h2>"));
        assert!(html.contains("<h3>Services</h3>"));
        assert!(html.contains("<li>Repair</li>"));
        assert!(html.contains("<li>Install</li>"));
        assert!(html.contains("<h3>Raw Output</h3>"));
        assert!(html.contains("<pre>a &lt; b</pre>"));
        assert_eq!(html.matches("</section>").count(), 1);
    }

    #[test]
    fn test_page_uses_theme_and_shows_error() {
        let context = PageContext {
            theme: Theme::Dark,
            url: Some("https://example.com"),
            brief: None,
            error: Some("The model returned an empty response for ad copies."),
            generated_at: chrono::Utc::now(),
        };
        let html = render_page(&Document::initial(), &context).unwrap();

        assert!(html.contains("data-theme=\"dark\""));
        assert!(html.contains("background: #121212"));
        assert!(html.contains("role=\"alert\">The model returned an empty response for ad copies.</div>"));
        assert!(html.contains("<p class=\"placeholder\">Your generated ad assets will appear here.</p>"));
        assert!(!html.contains("<details>"));
    }

    #[test]
    fn test_page_escapes_brief() {
        let context = PageContext {
            theme: Theme::Light,
            url: None,
            brief: Some("Business Name: <b>Acme</b>"),
            error: None,
            generated_at: chrono::Utc::now(),
        };
        let html = render_page(&Document::initial(), &context).unwrap();

        assert!(html.contains("<summary>Marketing Brief</summary>"));
        assert!(html.contains("&lt;b&gt;Acme"));
        assert!(!html.contains("role=\"alert\""));
        assert!(!html.contains("Website:"));
    }
}
