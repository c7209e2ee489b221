//! Markdown rendering for rich text fields.
//!
//! Editors author rich text as GitHub-flavored markdown; it is rendered to
//! HTML at request time (pages are cached, so this is not per-request work
//! in practice). Raw HTML passthrough is enabled because block content is
//! editor-authored, not visitor-submitted.

use comrak::{Options, markdown_to_html};

/// Render a markdown string to HTML.
#[must_use]
pub fn render_markdown(markdown: &str) -> String {
    let mut options = Options::default();

    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.superscript = true;
    options.extension.header_ids = Some(String::new());
    options.extension.footnotes = true;

    options.render.r#unsafe = true; // Allow raw HTML in markdown

    markdown_to_html(markdown, &options)
}
