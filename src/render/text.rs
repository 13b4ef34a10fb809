use super::node::{Element, Node, Tag};

/// 终端纯文本渲染：表格画成网格，标题加下划线，段落各占一行
pub fn render_text(node: &Node) -> String {
    block_lines(node).join("\n")
}

fn block_lines(node: &Node) -> Vec<String> {
    match node {
        Node::Text(t) => t.lines().map(str::to_string).collect(),
        Node::Fragment(nodes) => nodes.iter().flat_map(block_lines).collect(),
        Node::Element(e) => element_lines(e),
    }
}

fn element_lines(e: &Element) -> Vec<String> {
    match e.tag {
        Tag::Table => grid(&table_rows(e)),
        Tag::H2 => underline(&inline(e), '='),
        Tag::H3 => underline(&inline(e), '-'),
        Tag::Div => {
            let mut lines = Vec::new();
            for child in &e.children {
                let child_lines = block_lines(child);
                if child_lines.is_empty() {
                    continue;
                }
                // 区块之间空一行
                if !lines.is_empty() && is_block(child) {
                    lines.push(String::new());
                }
                lines.extend(child_lines);
            }
            lines
        }
        _ => vec![inline(e)],
    }
}

fn is_block(node: &Node) -> bool {
    matches!(node, Node::Element(e) if matches!(e.tag, Tag::Div | Tag::Table | Tag::H2 | Tag::H3))
}

fn inline(e: &Element) -> String {
    Node::Element(e.clone()).inline_text().trim().to_string()
}

fn underline(text: &str, ch: char) -> Vec<String> {
    vec![text.to_string(), ch.to_string().repeat(text.chars().count())]
}

// 第一行视为表头
fn table_rows(table: &Element) -> Vec<Vec<String>> {
    Node::Element(table.clone())
        .find_all(Tag::Tr)
        .into_iter()
        .map(|tr| {
            tr.children
                .iter()
                .map(|cell| cell.inline_text().trim().to_string())
                .collect()
        })
        .collect()
}

fn grid(rows: &[Vec<String>]) -> Vec<String> {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    if columns == 0 {
        return Vec::new();
    }
    let mut widths = vec![0usize; columns];
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let rule = |left: char, fill: char, mid: char, right: char| {
        let parts: Vec<String> = widths.iter().map(|w| fill.to_string().repeat(w + 2)).collect();
        format!("{}{}{}", left, parts.join(&mid.to_string()), right)
    };
    let line = |row: &Vec<String>| {
        let cells: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(i, w)| {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                let pad = w - cell.chars().count();
                format!(" {}{} ", cell, " ".repeat(pad))
            })
            .collect();
        format!("│{}│", cells.join("│"))
    };

    let mut out = vec![rule('╒', '═', '╤', '╕')];
    for (i, row) in rows.iter().enumerate() {
        out.push(line(row));
        if i + 1 < rows.len() {
            if i == 0 {
                out.push(rule('╞', '═', '╪', '╡'));
            } else {
                out.push(rule('├', '─', '┼', '┤'));
            }
        }
    }
    out.push(rule('╘', '═', '╧', '╛'));
    out
}
