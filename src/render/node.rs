/// 视图树的元素标签，只覆盖格式化器实际用到的几种
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Div,
    H2,
    H3,
    P,
    Span,
    A,
    Table,
    Thead,
    Tbody,
    Tr,
    Th,
    Td,
}

impl Tag {
    pub fn name(&self) -> &'static str {
        match self {
            Tag::Div => "div",
            Tag::H2 => "h2",
            Tag::H3 => "h3",
            Tag::P => "p",
            Tag::Span => "span",
            Tag::A => "a",
            Tag::Table => "table",
            Tag::Thead => "thead",
            Tag::Tbody => "tbody",
            Tag::Tr => "tr",
            Tag::Th => "th",
            Tag::Td => "td",
        }
    }
}

/// 视图树中的元素节点：标签、可选类名、其它属性和子节点
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: Tag,
    pub class: Option<String>,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            class: None,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn class(mut self, class: &str) -> Self {
        self.class = Some(class.to_string());
        self
    }

    // 属性按添加顺序输出
    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attrs.push((name.to_string(), value.into()));
        self
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children<I, N>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }
}

/// 格式化器的输出：与具体展示目标无关的结构化视图
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
    Fragment(Vec<Node>),
}

impl From<Element> for Node {
    fn from(e: Element) -> Self {
        Node::Element(e)
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::Text(s)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::Text(s.to_string())
    }
}

impl Node {
    /// 拼接所有后代节点的文本
    pub fn inline_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(t) => out.push_str(t),
            Node::Fragment(nodes) => nodes.iter().for_each(|n| n.collect_text(out)),
            Node::Element(e) => e.children.iter().for_each(|n| n.collect_text(out)),
        }
    }

    /// 深度优先查找所有指定标签的元素
    pub fn find_all(&self, tag: Tag) -> Vec<&Element> {
        let mut found = Vec::new();
        self.walk(&mut |e| {
            if e.tag == tag {
                found.push(e);
            }
        });
        found
    }

    fn walk<'a, F: FnMut(&'a Element)>(&'a self, f: &mut F) {
        match self {
            Node::Text(_) => {}
            Node::Fragment(nodes) => nodes.iter().for_each(|n| n.walk(f)),
            Node::Element(e) => {
                f(e);
                e.children.iter().for_each(|n| n.walk(f));
            }
        }
    }
}

// 表格的便捷构造
pub struct TableBuilder {
    header: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

/// 表格单元格，可带 css 类名（"date"、"number"、"symbol"）
pub struct Cell {
    pub text: String,
    pub class: Option<&'static str>,
}

impl Cell {
    pub fn plain(text: impl Into<String>) -> Self {
        Self { text: text.into(), class: None }
    }

    pub fn date(text: impl Into<String>) -> Self {
        Self { text: text.into(), class: Some("date") }
    }

    pub fn number(text: impl Into<String>) -> Self {
        Self { text: text.into(), class: Some("number") }
    }

    pub fn symbol(text: impl Into<String>) -> Self {
        Self { text: text.into(), class: Some("symbol") }
    }
}

impl TableBuilder {
    pub fn new(header: &[&str]) -> Self {
        Self {
            header: header.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn row(mut self, cells: Vec<Cell>) -> Self {
        self.rows.push(cells);
        self
    }

    pub fn rows<I: IntoIterator<Item = Vec<Cell>>>(mut self, rows: I) -> Self {
        self.rows.extend(rows);
        self
    }

    pub fn build(self) -> Node {
        let head = Element::new(Tag::Thead).child(
            Element::new(Tag::Tr).children(self.header.into_iter().map(|h| Element::new(Tag::Th).text(h))),
        );
        let body = Element::new(Tag::Tbody).children(self.rows.into_iter().map(|cells| {
            Element::new(Tag::Tr).children(cells.into_iter().map(|c| {
                let td = Element::new(Tag::Td);
                let td = match c.class {
                    Some(class) => td.class(class),
                    None => td,
                };
                td.text(c.text)
            }))
        }));
        Element::new(Tag::Table)
            .class("output-table")
            .child(head)
            .child(body)
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_builder_shapes_rows() {
        let table = TableBuilder::new(&["Symbol", "Name"])
            .row(vec![Cell::symbol("AAPL"), Cell::plain("Apple Inc.")])
            .row(vec![Cell::symbol("MSFT"), Cell::plain("Microsoft")])
            .build();
        assert_eq!(table.find_all(Tag::Th).len(), 2);
        assert_eq!(table.find_all(Tag::Tr).len(), 3);
        let tds = table.find_all(Tag::Td);
        assert_eq!(tds[0].class.as_deref(), Some("symbol"));
        assert_eq!(Node::from(tds[2].clone()).inline_text(), "MSFT");
    }

    #[test]
    fn inline_text_concatenates() {
        let p: Node = Element::new(Tag::P)
            .child(Element::new(Tag::Span).class("label").text("Symbol:"))
            .text(" ")
            .child(Element::new(Tag::Span).text("AAPL"))
            .into();
        assert_eq!(p.inline_text(), "Symbol: AAPL");
    }
}
