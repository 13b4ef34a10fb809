use super::node::{Element, Node};

/// 把视图树渲染成 HTML 片段，所有文本和属性值都会转义
pub fn render_html(node: &Node) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Text(t) => escape_into(t, out),
        Node::Fragment(nodes) => nodes.iter().for_each(|n| write_node(n, out)),
        Node::Element(e) => write_element(e, out),
    }
}

// 类名放在其它属性之前输出
fn write_element(e: &Element, out: &mut String) {
    let name = e.tag.name();
    out.push('<');
    out.push_str(name);
    if let Some(class) = &e.class {
        out.push_str(" class=\"");
        escape_into(class, out);
        out.push('"');
    }
    for (k, v) in &e.attrs {
        out.push(' ');
        out.push_str(k);
        out.push_str("=\"");
        escape_into(v, out);
        out.push('"');
    }
    out.push('>');
    e.children.iter().for_each(|n| write_node(n, out));
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

/// 转义 & < > " '
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_into(text, &mut out);
    out
}

fn escape_into(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}
