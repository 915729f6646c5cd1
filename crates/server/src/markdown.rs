//! # Analysis Rendering
//!
//! The model answers in markdown. The page shows it as HTML produced here.

use pulldown_cmark::{html, Event, Options, Parser};

/// Converts analysis markdown to HTML.
///
/// Raw HTML inside the model output is emitted as escaped text and never
/// reaches the page as markup.
pub fn render_analysis(markdown: &str) -> String {
    let parser = Parser::new_ext(
        markdown,
        Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES,
    )
    .map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });
    let mut rendered = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut rendered, parser);
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbered_sections_with_bold_titles() {
        let html = render_analysis(
            "1. **Case Summary**: Deposit withheld.\n2. **Applicable Laws**: Section 73.",
        );
        assert!(html.contains("<ol>"));
        assert!(html.contains("<strong>Case Summary</strong>"));
        assert!(!html.contains("**"));
    }

    #[test]
    fn headings_and_bullets() {
        let html = render_analysis("## Legal Recommendations\n\n- Send a legal notice\n- File in consumer court");
        assert!(html.contains("<h2>Legal Recommendations</h2>"));
        assert!(html.contains("<li>Send a legal notice</li>"));
    }

    #[test]
    fn raw_html_is_escaped() {
        let html = render_analysis("Advice <script>alert(1)</script>\n\n<div onclick=\"x()\">hi</div>");
        assert!(!html.contains("<script>"));
        assert!(!html.contains("<div"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
