//! HTML rendering for rich text documents and Markdown source.

use crate::models::RichTextNode;
use pulldown_cmark::{Options, Parser, html};

/// Render Markdown to HTML.
pub fn markdown_to_html(source: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(source, options);
    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Render a rich text document to an HTML string.
pub fn rich_text_to_html(document: &RichTextNode) -> String {
    let mut out = String::new();
    render_node(document, &mut out);
    out
}

fn render_children(node: &RichTextNode, out: &mut String) {
    for child in &node.content {
        render_node(child, out);
    }
}

fn wrap(tag: &str, node: &RichTextNode, out: &mut String) {
    out.push('<');
    out.push_str(tag);
    out.push('>');
    render_children(node, out);
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn render_node(node: &RichTextNode, out: &mut String) {
    match node.node_type.as_str() {
        "document" => render_children(node, out),
        "text" => render_text(node, out),
        "paragraph" => wrap("p", node, out),
        "heading-1" => wrap("h1", node, out),
        "heading-2" => wrap("h2", node, out),
        "heading-3" => wrap("h3", node, out),
        "heading-4" => wrap("h4", node, out),
        "heading-5" => wrap("h5", node, out),
        "heading-6" => wrap("h6", node, out),
        "unordered-list" => wrap("ul", node, out),
        "ordered-list" => wrap("ol", node, out),
        "list-item" => wrap("li", node, out),
        "blockquote" => wrap("blockquote", node, out),
        "table" => wrap("table", node, out),
        "table-row" => wrap("tr", node, out),
        "table-cell" => wrap("td", node, out),
        "table-header-cell" => wrap("th", node, out),
        "hr" => out.push_str("<hr/>"),
        "hyperlink" => {
            out.push_str("<a href=\"");
            escape_into(node.uri().unwrap_or_default(), out);
            out.push_str("\">");
            render_children(node, out);
            out.push_str("</a>");
        }
        kind @ ("entry-hyperlink" | "asset-hyperlink" | "embedded-entry-inline"
        | "resource-hyperlink") => {
            out.push_str("<span>type: ");
            out.push_str(kind);
            out.push_str(" id: ");
            escape_into(node.target_id().unwrap_or_default(), out);
            out.push_str("</span>");
        }
        // Embedded blocks and unknown nodes have no standalone HTML form.
        _ => {}
    }
}

fn render_text(node: &RichTextNode, out: &mut String) {
    let mut text = String::new();
    escape_into(node.value.as_deref().unwrap_or_default(), &mut text);

    for mark in &node.marks {
        let tag = match mark.mark_type.as_str() {
            "bold" => "b",
            "italic" => "i",
            "underline" => "u",
            "code" => "code",
            "superscript" => "sup",
            "subscript" => "sub",
            "strikethrough" => "s",
            _ => continue,
        };
        text = format!("<{tag}>{text}</{tag}>");
    }

    out.push_str(&text);
}

fn escape_into(raw: &str, out: &mut String) {
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
}
