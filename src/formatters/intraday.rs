use log::debug;
use serde_json::Value;

use super::dates::{format_date_with, sort_chronologically};
use super::numbers::{format_number, format_volume};
use super::{sequence, FormatOptions, View};
use crate::errors::Result;
use crate::models::records::IntradayBar;
use crate::render::{Cell, TableBuilder};

pub const NO_INTRADAY: &str = "No intraday data available";

const HEADER: [&str; 6] = ["Date", "Open", "High", "Low", "Close", "Volume"];

/// OHLCV 表格；日线周期只显示日期，其余显示美东时间
pub fn format_intraday(data: &Value, options: FormatOptions) -> Result<View> {
    let bars: Vec<IntradayBar> = match sequence(data)? {
        Some(bars) => bars,
        None => return Ok(View::Notice(NO_INTRADAY.to_string())),
    };
    debug!("Formatting {} bars at {:?} granularity", bars.len(), options.granularity);

    let rows = sort_chronologically(&bars).into_iter().map(|bar| {
        vec![
            Cell::date(format_date_with(bar.date.as_deref(), options.granularity, options.clock)),
            Cell::number(format_number(bar.open)),
            Cell::number(format_number(bar.high)),
            Cell::number(format_number(bar.low)),
            Cell::number(format_number(bar.close)),
            // 成交量不保留小数
            Cell::number(format_volume(bar.volume)),
        ]
    });

    Ok(View::Tree(TableBuilder::new(&HEADER).rows(rows).build()))
}
