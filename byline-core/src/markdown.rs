//! Markdown to HTML conversion for post bodies.

use pulldown_cmark::{html, Event, Options, Parser, TagEnd};

/// Markdown processor with the extensions posts rely on
pub struct MarkdownProcessor {
    options: Options,
}

impl MarkdownProcessor {
    pub fn new() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        options.insert(Options::ENABLE_HEADING_ATTRIBUTES);

        Self { options }
    }

    /// Convert markdown to HTML
    pub fn convert(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.options);
        let mut html_output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut html_output, parser);
        html_output
    }

    /// Plain text of the first paragraph, used when a post has no summary
    pub fn first_paragraph(&self, markdown: &str) -> Option<String> {
        let mut in_paragraph = false;
        let mut text = String::new();

        for event in Parser::new_ext(markdown, self.options) {
            match event {
                Event::Start(pulldown_cmark::Tag::Paragraph) => in_paragraph = true,
                Event::End(TagEnd::Paragraph) if in_paragraph => break,
                Event::Text(t) | Event::Code(t) if in_paragraph => text.push_str(&t),
                Event::SoftBreak | Event::HardBreak if in_paragraph => text.push(' '),
                _ => {}
            }
        }

        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }
}

impl Default for MarkdownProcessor {
    fn default() -> Self {
        Self::new()
    }
}
