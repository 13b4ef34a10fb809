use log::debug;
use serde_json::Value;

use super::dates::{format_date, sort_chronologically};
use super::numbers::format_number;
use super::{sequence, View};
use crate::errors::Result;
use crate::models::category::Granularity;
use crate::models::records::EarningsRecord;
use crate::render::{Cell, TableBuilder};
use crate::util::or_na;

pub const NO_EARNINGS: &str = "No earnings data available";

const HEADER: [&str; 9] = [
    "Date",
    "Symbol",
    "EPS",
    "EPS Estimated",
    "Time",
    "Revenue",
    "Revenue Estimated",
    "Updated From",
    "Fiscal Date Ending",
];

/// 财报日期表格：按日期从旧到新排列，所有日期列只显示日期
pub fn format_earnings(data: &Value) -> Result<View> {
    let records: Vec<EarningsRecord> = match sequence(data)? {
        Some(records) => records,
        None => return Ok(View::Notice(NO_EARNINGS.to_string())),
    };
    debug!("Formatting {} earnings records", records.len());

    let rows = sort_chronologically(&records).into_iter().map(|r| {
        vec![
            Cell::date(format_date(r.date.as_deref(), Granularity::Daily)),
            Cell::symbol(or_na(&r.symbol)),
            // EPS 原样显示，不做千分位格式化
            Cell::number(or_na(&r.eps)),
            Cell::number(or_na(&r.eps_estimated)),
            Cell::plain(or_na(&r.time)),
            Cell::number(format_number(r.revenue)),
            Cell::number(format_number(r.revenue_estimated)),
            Cell::date(format_date(r.updated_from_date.as_deref(), Granularity::Daily)),
            Cell::date(format_date(r.fiscal_date_ending.as_deref(), Granularity::Daily)),
        ]
    });

    Ok(View::Tree(TableBuilder::new(&HEADER).rows(rows).build()))
}
