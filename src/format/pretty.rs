//! Indented re-serialization of HTML for the `--dump` output.

use scraper::{ElementRef, Html, Node};

/// Elements that never carry children or a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose text content is written unescaped.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Parses `html` and writes it back one node per line, indented one space
/// per nesting level. Whitespace-only text nodes are dropped.
pub fn prettify(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut out = String::new();

    for child in document.tree.root().children() {
        match ElementRef::wrap(child) {
            Some(element) => write_element(element, 0, &mut out),
            None => write_leaf(child.value(), 0, false, &mut out),
        }
    }

    out
}

fn write_element(element: ElementRef, depth: usize, out: &mut String) {
    let name = element.value().name();
    let indent = " ".repeat(depth);

    out.push_str(&indent);
    out.push('<');
    out.push_str(name);
    for (attr, value) in element.value().attrs() {
        out.push_str(&format!(" {}=\"{}\"", attr, escape_attr(value)));
    }
    out.push_str(">\n");

    if VOID_ELEMENTS.contains(&name) {
        return;
    }

    let raw = RAW_TEXT_ELEMENTS.contains(&name);
    for child in element.children() {
        match ElementRef::wrap(child) {
            Some(child_element) => write_element(child_element, depth + 1, out),
            None => write_leaf(child.value(), depth + 1, raw, out),
        }
    }

    out.push_str(&format!("{}</{}>\n", indent, name));
}

fn write_leaf(node: &Node, depth: usize, raw: bool, out: &mut String) {
    let indent = " ".repeat(depth);

    match node {
        Node::Doctype(doctype) => out.push_str(&format!("<!DOCTYPE {}>\n", doctype.name())),
        Node::Comment(comment) => out.push_str(&format!("{}<!--{}-->\n", indent, &**comment)),
        Node::Text(text) => {
            let text = text.trim();
            if text.is_empty() {
                return;
            }
            let text = if raw { text.to_string() } else { escape_text(text) };
            out.push_str(&format!("{}{}\n", indent, text));
        }
        _ => {}
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn escape_attr(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}
