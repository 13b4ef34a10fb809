use serde_json::Value;

use super::{sequence, View};
use crate::errors::Result;
use crate::models::records::SearchHit;
use crate::render::{Cell, TableBuilder};

pub const NO_RESULTS: &str = "No search results available";

/// 搜索结果保持服务端顺序，不做排序，也不做 N/A 替换
pub fn format_search(data: &Value) -> Result<View> {
    let hits: Vec<SearchHit> = match sequence(data)? {
        Some(hits) => hits,
        None => return Ok(View::Notice(NO_RESULTS.to_string())),
    };

    // 缺失字段留空
    let rows = hits.into_iter().map(|hit| {
        vec![
            Cell::symbol(hit.symbol.clone().unwrap_or_default()),
            Cell::plain(hit.name.clone().unwrap_or_default()),
            Cell::plain(hit.display_exchange().unwrap_or_default()),
        ]
    });

    Ok(View::Tree(
        TableBuilder::new(&["Symbol", "Name", "Exchange"]).rows(rows).build(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{render_html, Tag};
    use serde_json::json;

    #[test]
    fn preserves_server_order() {
        let data = json!([
            {"symbol": "TSLA", "name": "Tesla, Inc.", "exchangeShortName": "NASDAQ"},
            {"symbol": "AAPL", "name": "Apple Inc.", "exchange": "NASDAQ"},
            {"symbol": "BRK-B", "name": "Berkshire Hathaway", "exchange": "NYSE"}
        ]);
        let node = match format_search(&data).unwrap() {
            View::Tree(node) => node,
            other => panic!("unexpected view {:?}", other),
        };
        let symbols: Vec<String> = node
            .find_all(Tag::Td)
            .iter()
            .filter(|td| td.class.as_deref() == Some("symbol"))
            .map(|td| td.children.iter().map(|c| c.inline_text()).collect())
            .collect();
        assert_eq!(symbols, vec!["TSLA", "AAPL", "BRK-B"]);
        assert!(render_html(&node).contains("<td>Tesla, Inc.</td><td>NASDAQ</td>"));
    }

    #[test]
    fn missing_fields_are_blank() {
        let data = json!([{"symbol": "XYZ"}]);
        let html = format_search(&data).unwrap().to_html();
        assert!(html.contains("<td class=\"symbol\">XYZ</td><td></td><td></td>"));
        assert!(!html.contains("N/A"));
    }

    #[test]
    fn empty_is_notice() {
        assert_eq!(format_search(&json!([])).unwrap(), View::Notice(NO_RESULTS.into()));
    }
}
