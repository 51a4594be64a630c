//! Display fragments.
//!
//! Cards are built as a small typed element tree (`Node`) that the terminal
//! UI walks to draw and that `to_html` serializes for the static export.
//!
pub mod card;

use std::fmt::Write as _;

pub use card::render_card;

/// Element kinds used by the card fragments.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Tag {
    Article,
    Heading3,
    Anchor,
    Div,
    Strong,
}

/// Attribute names that an element may carry.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AttrKind {
    Class,
    Role,
    TabIndex,
    Href,
}

impl Tag {
    pub fn name(self) -> &'static str {
        match self {
            Tag::Article => "article",
            Tag::Heading3 => "h3",
            Tag::Anchor => "a",
            Tag::Div => "div",
            Tag::Strong => "strong",
        }
    }

    /// Allow-list of attributes per element kind.
    pub fn accepts(self, attr: AttrKind) -> bool {
        match attr {
            AttrKind::Class => true,
            AttrKind::Role | AttrKind::TabIndex => matches!(self, Tag::Article | Tag::Div),
            AttrKind::Href => self == Tag::Anchor,
        }
    }

    /// Inline elements flow into the current line; block elements start a new one.
    pub fn is_inline(self) -> bool {
        matches!(self, Tag::Anchor | Tag::Strong)
    }
}

/// Named attribute configuration for `build_element`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attrs {
    pub class: Option<String>,
    pub role: Option<String>,
    pub tabindex: Option<i32>,
    pub href: Option<String>,
}

impl Attrs {
    pub fn class(name: &str) -> Self {
        Self {
            class: Some(name.to_string()),
            ..Self::default()
        }
    }

    fn retain_accepted(self, tag: Tag) -> Self {
        fn keep<T>(tag: Tag, kind: AttrKind, value: Option<T>) -> Option<T> {
            if value.is_some() && !tag.accepts(kind) {
                tracing::debug!(tag = tag.name(), attr = ?kind, "attribute not accepted, dropped");
                return None;
            }
            value
        }
        Self {
            class: keep(tag, AttrKind::Class, self.class),
            role: keep(tag, AttrKind::Role, self.role),
            tabindex: keep(tag, AttrKind::TabIndex, self.tabindex),
            href: keep(tag, AttrKind::Href, self.href),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Element {
        tag: Tag,
        attrs: Attrs,
        children: Vec<Node>,
    },
    Text(String),
}

/// Build an element node. Attributes the tag does not accept are dropped.
pub fn build_element(tag: Tag, attrs: Attrs, children: impl IntoIterator<Item = Node>) -> Node {
    Node::Element {
        tag,
        attrs: attrs.retain_accepted(tag),
        children: children.into_iter().collect(),
    }
}

pub fn text(s: impl Into<String>) -> Node {
    Node::Text(s.into())
}

impl Node {
    pub fn tag(&self) -> Option<Tag> {
        match self {
            Node::Element { tag, .. } => Some(*tag),
            Node::Text(_) => None,
        }
    }

    pub fn attrs(&self) -> Option<&Attrs> {
        match self {
            Node::Element { attrs, .. } => Some(attrs),
            Node::Text(_) => None,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element { children, .. } => children,
            Node::Text(_) => &[],
        }
    }

    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(s) => out.push_str(s),
            Node::Element { children, .. } => children.iter().for_each(|c| c.collect_text(out)),
        }
    }

    /// Serialize as HTML markup, escaping text and attribute values.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(s) => out.push_str(&escape_html(s)),
            Node::Element {
                tag,
                attrs,
                children,
            } => {
                out.push('<');
                out.push_str(tag.name());
                let pairs = [
                    ("class", attrs.class.clone()),
                    ("role", attrs.role.clone()),
                    ("tabindex", attrs.tabindex.map(|t| t.to_string())),
                    ("href", attrs.href.clone()),
                ];
                for (key, value) in pairs {
                    if let Some(v) = value {
                        let _ = write!(out, " {key}=\"{}\"", escape_html(&v));
                    }
                }
                out.push('>');
                children.iter().for_each(|c| c.write_html(out));
                let _ = write!(out, "</{}>", tag.name());
            }
        }
    }
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn href_is_only_kept_on_anchors() {
        let attrs = Attrs {
            href: Some("mailto:x@y".to_string()),
            ..Attrs::default()
        };
        let div = build_element(Tag::Div, attrs.clone(), Vec::new());
        let a = build_element(Tag::Anchor, attrs, Vec::new());
        assert_eq!(div.attrs().and_then(|a| a.href.clone()), None);
        assert_eq!(a.attrs().and_then(|a| a.href.clone()).as_deref(), Some("mailto:x@y"));
    }

    #[test]
    fn html_escapes_text_and_attributes() {
        let node = build_element(
            Tag::Anchor,
            Attrs {
                href: Some("mailto:a\"b".to_string()),
                ..Attrs::default()
            },
            [text("<Tom & Jerry>")],
        );
        assert_eq!(
            node.to_html(),
            "<a href=\"mailto:a&quot;b\">&lt;Tom &amp; Jerry&gt;</a>"
        );
    }

    #[test]
    fn text_content_walks_descendants_in_order() {
        let node = build_element(
            Tag::Div,
            Attrs::default(),
            [build_element(Tag::Strong, Attrs::default(), [text("Ciudad: ")]), text("Lima")],
        );
        assert_eq!(node.text_content(), "Ciudad: Lima");
    }
}
