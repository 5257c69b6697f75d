use serde::Serialize;

/// Generated document tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
    Root {
        children: Vec<Node>,
    },
    Heading {
        depth: u8,
        children: Vec<Node>,
    },
    Paragraph {
        children: Vec<Node>,
    },
    /// Inline container without markup of its own
    Span {
        children: Vec<Node>,
    },
    Text {
        value: String,
    },
    Strong {
        children: Vec<Node>,
    },
    Link {
        url: String,
        title: Option<String>,
        children: Vec<Node>,
    },
    Html {
        value: String,
    },
}

pub fn root(children: Vec<Node>) -> Node {
    Node::Root { children }
}

pub fn heading(depth: u8, children: Vec<Node>) -> Node {
    Node::Heading { depth, children }
}

pub fn paragraph(children: Vec<Node>) -> Node {
    Node::Paragraph { children }
}

pub fn span(children: Vec<Node>) -> Node {
    Node::Span { children }
}

pub fn text(value: impl Into<String>) -> Node {
    Node::Text {
        value: value.into(),
    }
}

pub fn strong(children: Vec<Node>) -> Node {
    Node::Strong { children }
}

pub fn link(url: impl Into<String>, title: Option<&str>, children: Vec<Node>) -> Node {
    Node::Link {
        url: url.into(),
        title: title.filter(|t| !t.is_empty()).map(str::to_string),
        children,
    }
}

pub fn html(value: impl Into<String>) -> Node {
    Node::Html {
        value: value.into(),
    }
}

impl Node {
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Root { children }
            | Node::Heading { children, .. }
            | Node::Paragraph { children }
            | Node::Span { children }
            | Node::Strong { children }
            | Node::Link { children, .. } => children,
            Node::Text { .. } | Node::Html { .. } => &[],
        }
    }

    /// Concatenated text of the node and its descendants, markup excluded
    pub fn text_content(&self) -> String {
        match self {
            Node::Text { value } => value.clone(),
            Node::Html { .. } => String::new(),
            _ => self.children().iter().map(Node::text_content).collect(),
        }
    }

    /// The node and all descendants in pre-order
    pub fn descendants(&self) -> Vec<&Node> {
        let mut out = vec![self];
        for child in self.children() {
            out.extend(child.descendants());
        }
        out
    }
}
