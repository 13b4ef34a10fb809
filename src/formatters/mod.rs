//! 响应格式化与分发
//!
//! `build_view` 根据查询类别选择格式化器，把后端返回的 JSON 转换为结构化视图；
//! `format` / `format_text` 再把视图渲染成 HTML 或终端文本。格式化过程中的任何
//! 错误都会被拦截，退化为原始 JSON 的缩进输出，绝不向调用方传播。

pub mod dates;
pub mod dividends;
pub mod earnings;
pub mod intraday;
pub mod numbers;
pub mod profile;
pub mod search;

use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::Result;
use crate::models::category::{Granularity, QueryCategory};
use crate::render::{self, html::escape_html, Node};

pub use dates::{format_date, format_date_with, EasternClock};
pub use numbers::{format_number, format_volume};

/// 所有缺失字段统一显示的占位文本
pub const NOT_AVAILABLE: &str = "N/A";

/// 格式化选项：时间粒度由调用方根据当前选择的周期决定
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatOptions {
    pub granularity: Granularity,
    pub clock: EasternClock,
}

impl FormatOptions {
    pub fn new(granularity: Granularity) -> Self {
        Self {
            granularity,
            clock: EasternClock::default(),
        }
    }

    pub fn with_clock(mut self, clock: EasternClock) -> Self {
        self.clock = clock;
        self
    }
}

/// 一次分发的结果
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    /// 没有数据（缺失或 null），输出区清空
    Empty,
    /// 纯文本提示，例如 "No dividends data available"
    Notice(String),
    /// 结构化视图：资料卡片或表格
    Tree(Node),
    /// 类别未知或格式化失败时的缩进 JSON
    Raw(String),
}

impl View {
    /// 渲染为 HTML 片段，原始 JSON 转义后放在 `<pre>` 中
    pub fn to_html(&self) -> String {
        match self {
            View::Empty => String::new(),
            View::Notice(text) => escape_html(text),
            View::Tree(node) => render::render_html(node),
            View::Raw(json) => format!("<pre class=\"raw-json\">{}</pre>", escape_html(json)),
        }
    }

    pub fn to_text(&self) -> String {
        match self {
            View::Empty => String::new(),
            View::Notice(text) | View::Raw(text) => text.clone(),
            View::Tree(node) => render::render_text(node),
        }
    }

    // 是否走了 JSON 兜底
    pub fn is_fallback(&self) -> bool {
        matches!(self, View::Raw(_))
    }
}

/// 按类别标签分发到对应格式化器
///
/// 标签必须与界面上的选项完全一致（区分大小写），否则直接输出 JSON。
/// 格式化器返回的错误记录警告后同样退化为 JSON，不会向上传播。
pub fn build_view(data: Option<&Value>, category_label: &str, options: FormatOptions) -> View {
    let data = match data {
        Some(data) if !data.is_null() => data,
        _ => return View::Empty,
    };

    let category = match QueryCategory::from_label(category_label) {
        Some(category) => category,
        None => {
            debug!("No formatter for function type {:?}, dumping JSON", category_label);
            return View::Raw(json_dump(data));
        }
    };

    match format_category(data, category, options) {
        Ok(view) => view,
        Err(e) => {
            warn!("Error formatting {} data: {}", category, e);
            View::Raw(json_dump(data))
        }
    }
}

fn format_category(data: &Value, category: QueryCategory, options: FormatOptions) -> Result<View> {
    match category {
        QueryCategory::CompanyProfile => profile::format_profile(data),
        QueryCategory::EarningsDates => earnings::format_earnings(data),
        QueryCategory::IntradayData => intraday::format_intraday(data, options),
        QueryCategory::Dividends => dividends::format_dividends(data),
        QueryCategory::SearchData => search::format_search(data),
    }
}

/// 纯函数入口：数据 + 类别 + 时间粒度 -> HTML 片段
pub fn format(data: Option<&Value>, category_label: &str, granularity: Granularity) -> String {
    build_view(data, category_label, FormatOptions::new(granularity)).to_html()
}

/// 同一视图的终端文本输出
pub fn format_text(data: Option<&Value>, category_label: &str, granularity: Granularity) -> String {
    build_view(data, category_label, FormatOptions::new(granularity)).to_text()
}

/// 两空格缩进的 JSON 输出
pub fn json_dump(data: &Value) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|_| data.to_string())
}

/// 把非空 JSON 数组解析为记录列表；空数组或非数组返回 None，由调用方给出提示语
pub(crate) fn sequence<T: DeserializeOwned>(data: &Value) -> Result<Option<Vec<T>>> {
    match data.as_array() {
        Some(items) if !items.is_empty() => {
            let records: Vec<T> = serde_json::from_value(data.clone())?;
            Ok(Some(records))
        }
        _ => Ok(None),
    }
}
