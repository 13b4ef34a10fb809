use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::StockDeskError;

/// 查询类别，决定使用哪个格式化器以及是否附带 period 参数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueryCategory {
    #[serde(rename = "Company Profile")]
    CompanyProfile,
    #[serde(rename = "Earnings Dates")]
    EarningsDates,
    #[serde(rename = "Intraday Data")]
    IntradayData,
    #[serde(rename = "Dividends")]
    Dividends,
    #[serde(rename = "Search Data")]
    SearchData,
}

impl QueryCategory {
    pub const ALL: [QueryCategory; 5] = [
        QueryCategory::CompanyProfile,
        QueryCategory::EarningsDates,
        QueryCategory::IntradayData,
        QueryCategory::Dividends,
        QueryCategory::SearchData,
    ];

    /// 后端约定的标签，需要精确匹配
    pub fn label(&self) -> &'static str {
        match self {
            QueryCategory::CompanyProfile => "Company Profile",
            QueryCategory::EarningsDates => "Earnings Dates",
            QueryCategory::IntradayData => "Intraday Data",
            QueryCategory::Dividends => "Dividends",
            QueryCategory::SearchData => "Search Data",
        }
    }

    /// 按标签精确匹配，区分大小写
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.label() == label)
    }

    /// 只有分时数据需要附带周期参数
    pub fn uses_period(&self) -> bool {
        matches!(self, QueryCategory::IntradayData)
    }
}

impl fmt::Display for QueryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for QueryCategory {
    type Err = StockDeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s)
            .ok_or_else(|| StockDeskError::ValidationError(format!("Unknown function type: {}", s)))
    }
}

/// 分时数据的K线周期，后端默认 30min
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "1min")]
    OneMinute,
    #[serde(rename = "5min")]
    FiveMinutes,
    #[serde(rename = "15min")]
    FifteenMinutes,
    #[serde(rename = "30min")]
    #[default]
    ThirtyMinutes,
    #[serde(rename = "1hour")]
    OneHour,
    #[serde(rename = "4hour")]
    FourHours,
    #[serde(rename = "1day")]
    OneDay,
}

impl Period {
    pub const ALL: [Period; 7] = [
        Period::OneMinute,
        Period::FiveMinutes,
        Period::FifteenMinutes,
        Period::ThirtyMinutes,
        Period::OneHour,
        Period::FourHours,
        Period::OneDay,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::OneMinute => "1min",
            Period::FiveMinutes => "5min",
            Period::FifteenMinutes => "15min",
            Period::ThirtyMinutes => "30min",
            Period::OneHour => "1hour",
            Period::FourHours => "4hour",
            Period::OneDay => "1day",
        }
    }

    pub fn is_daily(&self) -> bool {
        matches!(self, Period::OneDay)
    }

    pub fn granularity(&self) -> Granularity {
        if self.is_daily() {
            Granularity::Daily
        } else {
            Granularity::Intraday
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = StockDeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| StockDeskError::ValidationError(format!("Unknown period: {}", s)))
    }
}

/// 日期渲染的时间粒度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Granularity {
    #[default]
    Daily,
    Intraday,
}
