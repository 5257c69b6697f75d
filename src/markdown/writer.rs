use crate::markdown::ast::Node;

/// Serialize a generated tree to markdown
pub fn to_markdown(node: &Node) -> String {
    let mut out = String::new();
    match node {
        Node::Root { children } => {
            let blocks: Vec<String> = children.iter().map(block).collect();
            out.push_str(&blocks.join("\n\n"));
            out.push('\n');
        }
        other => out.push_str(&block(other)),
    }
    out
}

fn block(node: &Node) -> String {
    match node {
        Node::Heading { depth, children } => {
            format!("{} {}", "#".repeat(*depth as usize), inline_all(children))
        }
        _ => inline(node),
    }
}

fn inline_all(nodes: &[Node]) -> String {
    nodes.iter().map(inline).collect()
}

fn inline(node: &Node) -> String {
    match node {
        Node::Text { value } | Node::Html { value } => value.clone(),
        Node::Strong { children } => format!("**{}**", inline_all(children)),
        Node::Link {
            url,
            title,
            children,
        } => match title {
            Some(title) => format!(
                "[{}]({} \"{}\")",
                inline_all(children),
                url,
                title.replace('"', "\\\"")
            ),
            None => format!("[{}]({})", inline_all(children), url),
        },
        Node::Root { children }
        | Node::Heading { children, .. }
        | Node::Paragraph { children }
        | Node::Span { children } => inline_all(children),
    }
}
