//! Minimal markup tree produced by component `render` calls.
//!
//! Text and attribute values are stored raw and escaped only when serialized.

use std::fmt::Write as _;

const VOID_ELEMENTS: &[&str] = &["img", "input", "br", "hr", "meta", "link"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element {
        tag: String,
        attrs: Vec<(String, String)>,
        children: Vec<Node>,
    },
    Text(String),
    Fragment(Vec<Node>),
}

impl Node {
    pub fn element(tag: &str) -> Self {
        Node::Element { tag: tag.to_string(), attrs: Vec::new(), children: Vec::new() }
    }

    pub fn text(s: impl Into<String>) -> Self { Node::Text(s.into()) }


    /// Set an attribute. A no-op on text and fragment nodes.
    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        if let Node::Element { attrs, .. } = &mut self {
            attrs.push((name.to_string(), value.into()));
        }
        self
    }

    /// Boolean attribute (`<details open>`).
    pub fn flag(self, name: &str) -> Self { self.attr(name, "") }

    pub fn child(mut self, node: Node) -> Self {
        match &mut self {
            Node::Element { children, .. } | Node::Fragment(children) => children.push(node),
            Node::Text(_) => {}
        }
        self
    }

    pub fn children(mut self, nodes: impl IntoIterator<Item = Node>) -> Self {
        match &mut self {
            Node::Element { children, .. } | Node::Fragment(children) => children.extend(nodes),
            Node::Text(_) => {}
        }
        self
    }

    pub fn child_text(self, s: impl Into<String>) -> Self { self.child(Node::text(s)) }

    pub fn tag(&self) -> Option<&str> {
        match self {
            Node::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        match self {
            Node::Element { attrs, .. } => attrs.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str()),
            _ => None,
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .map(|c| c.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    /// Depth-first list of elements carrying `class`, including `self`.
    pub fn find_by_class(&self, class: &str) -> Vec<&Node> {
        let mut out = Vec::new();
        self.walk(&mut |n| {
            if n.has_class(class) {
                out.push(n);
            }
        });
        out
    }

    pub fn find_by_tag(&self, tag: &str) -> Vec<&Node> {
        let mut out = Vec::new();
        self.walk(&mut |n| {
            if n.tag() == Some(tag) {
                out.push(n);
            }
        });
        out
    }

    pub fn count_by_class(&self, class: &str) -> usize { self.find_by_class(class).len() }

    /// Concatenated text of all descendants, unescaped.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.walk(&mut |n| {
            if let Node::Text(t) = n {
                out.push_str(t);
            }
        });
        out
    }

    fn walk<'a>(&'a self, f: &mut dyn FnMut(&'a Node)) {
        f(self);
        match self {
            Node::Element { children, .. } | Node::Fragment(children) => {
                for c in children {
                    c.walk(f);
                }
            }
            Node::Text(_) => {}
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(t) => out.push_str(&html_escape(t)),
            Node::Fragment(children) => children.iter().for_each(|c| c.write_html(out)),
            Node::Element { tag, attrs, children } => {
                out.push('<');
                out.push_str(tag);
                for (k, v) in attrs {
                    if v.is_empty() {
                        let _ = write!(out, " {k}");
                    } else {
                        let _ = write!(out, " {}=\"{}\"", k, html_escape(v));
                    }
                }
                out.push('>');
                if VOID_ELEMENTS.contains(&tag.as_str()) {
                    return;
                }
                children.iter().for_each(|c| c.write_html(out));
                let _ = write!(out, "</{tag}>");
            }
        }
    }
}

/// Escape HTML special characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
