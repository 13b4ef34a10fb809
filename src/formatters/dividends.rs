use log::debug;
use serde_json::Value;

use super::dates::{format_date, sort_chronologically};
use super::numbers::format_number;
use super::{sequence, View, NOT_AVAILABLE};
use crate::errors::Result;
use crate::models::category::Granularity;
use crate::models::records::DividendRecord;
use crate::render::{Cell, TableBuilder};

pub const NO_DIVIDENDS: &str = "No dividends data available";

const HEADER: [&str; 8] = [
    "Date",
    "Dividend",
    "Stock Price",
    "Trailing Yield",
    "Current Yield",
    "Record Date",
    "Payment Date",
    "Declaration Date",
];

// 收益率有值时加 % 后缀，缺失时只显示 N/A
fn percent(value: Option<f64>) -> String {
    match value {
        Some(_) => format!("{}%", format_number(value)),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// 分红表格：按除息日从旧到新排列
pub fn format_dividends(data: &Value) -> Result<View> {
    let records: Vec<DividendRecord> = match sequence(data)? {
        Some(records) => records,
        None => return Ok(View::Notice(NO_DIVIDENDS.to_string())),
    };
    debug!("Formatting {} dividend records", records.len());

    // 排序只作用于副本
    let rows = sort_chronologically(&records).into_iter().map(|r| {
        vec![
            Cell::date(format_date(r.date.as_deref(), Granularity::Daily)),
            Cell::number(format_number(r.dividend)),
            Cell::number(format_number(r.stock_price)),
            Cell::number(percent(r.trail_yield)),
            Cell::number(percent(r.cur_yield)),
            Cell::date(format_date(r.record_date.as_deref(), Granularity::Daily)),
            Cell::date(format_date(r.payment_date.as_deref(), Granularity::Daily)),
            Cell::date(format_date(r.declaration_date.as_deref(), Granularity::Daily)),
        ]
    });

    Ok(View::Tree(TableBuilder::new(&HEADER).rows(rows).build()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Node, Tag};
    use serde_json::json;

    fn rows(view: View) -> Vec<Vec<String>> {
        let node = match view {
            View::Tree(node) => node,
            other => panic!("unexpected view {:?}", other),
        };
        node.find_all(Tag::Tr)
            .iter()
            .skip(1)
            .map(|tr| tr.children.iter().map(Node::inline_text).collect())
            .collect()
    }

    #[test]
    fn sorted_with_percent_yields() {
        let data = json!([
            {"date": "2024-05-10", "dividend": 0.25, "stockPrice": 183.05, "trailYield": 0.52, "curYield": 0.55,
             "recordDate": "2024-05-13", "paymentDate": "2024-05-16", "declarationDate": "2024-05-02"},
            {"date": "2024-02-09", "dividend": 0.24, "stockPrice": 188.85}
        ]);
        let rows = rows(format_dividends(&data).unwrap());
        assert_eq!(rows[0][0], "Feb 9, 2024");
        assert_eq!(rows[0][1], "0.24");
        assert_eq!(rows[0][3], "N/A");
        assert_eq!(rows[0][7], "N/A");
        assert_eq!(
            rows[1],
            vec!["May 10, 2024", "0.25", "183.05", "0.52%", "0.55%", "May 13, 2024", "May 16, 2024", "May 2, 2024"]
        );
    }

    #[test]
    fn header_is_fixed() {
        let view = format_dividends(&json!([{}])).unwrap();
        let node = match view {
            View::Tree(node) => node,
            other => panic!("unexpected view {:?}", other),
        };
        let header: Vec<String> = node.find_all(Tag::Th).iter().map(|th| Node::Element((*th).clone()).inline_text()).collect();
        assert_eq!(header, HEADER.to_vec());
    }

    #[test]
    fn empty_is_notice() {
        assert_eq!(format_dividends(&json!([])).unwrap(), View::Notice(NO_DIVIDENDS.into()));
    }
}
