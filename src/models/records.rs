use serde::{Deserialize, Serialize};

use crate::util::lenient;

/// 公司资料，所有字段都可能缺失
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyProfile {
    #[serde(deserialize_with = "lenient::text")]
    pub symbol: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub company_name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub exchange: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub exchange_short_name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub industry: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub sector: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub country: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub currency: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub mkt_cap: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub beta: Option<f64>,
    /// 52 周区间，形如 "low-high"
    #[serde(deserialize_with = "lenient::text")]
    pub range: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub price: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub volume: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub vol_avg: Option<f64>,
    #[serde(deserialize_with = "lenient::text")]
    pub ceo: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub employees: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub full_time_employees: Option<f64>,
    #[serde(deserialize_with = "lenient::text")]
    pub ipo_date: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub website: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub address: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub city: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub state: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub description: Option<String>,
}

impl CompanyProfile {
    /// 公司名称，`name` 缺失时取 `companyName`
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().or(self.company_name.as_deref())
    }

    // 没有当日成交量时用平均成交量
    pub fn display_volume(&self) -> Option<f64> {
        self.volume.or(self.vol_avg)
    }

    // 员工数，兼容 fullTimeEmployees
    pub fn headcount(&self) -> Option<f64> {
        self.employees.or(self.full_time_employees)
    }

    /// 按字面的 `-` 切分区间字符串：第一段为最低价，第二段为最高价
    pub fn week52_bounds(&self) -> (Option<f64>, Option<f64>) {
        match &self.range {
            Some(range) => {
                let mut parts = range.split('-');
                let low = parts.next().and_then(crate::util::text_to_f64);
                let high = parts.next().and_then(crate::util::text_to_f64);
                (low, high)
            }
            None => (None, None),
        }
    }
}

/// 财报日期记录
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EarningsRecord {
    #[serde(deserialize_with = "lenient::text")]
    pub date: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub symbol: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub eps: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub eps_estimated: Option<String>,
    /// bmo（盘前）/ amc（盘后）
    #[serde(deserialize_with = "lenient::text")]
    pub time: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub revenue: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub revenue_estimated: Option<f64>,
    #[serde(deserialize_with = "lenient::text")]
    pub updated_from_date: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub fiscal_date_ending: Option<String>,
}

/// 分时/日线 OHLCV
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntradayBar {
    #[serde(deserialize_with = "lenient::text")]
    pub date: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub open: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub high: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub low: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub close: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub volume: Option<f64>,
}

/// 分红记录，date 为除息日
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DividendRecord {
    #[serde(deserialize_with = "lenient::text")]
    pub date: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub label: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub adj_dividend: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub dividend: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub stock_price: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub trail_yield: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub cur_yield: Option<f64>,
    #[serde(deserialize_with = "lenient::text")]
    pub record_date: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub payment_date: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub declaration_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchHit {
    #[serde(deserialize_with = "lenient::text")]
    pub symbol: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub exchange: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub exchange_short_name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub currency: Option<String>,
}

impl SearchHit {
    pub fn display_exchange(&self) -> Option<&str> {
        self.exchange.as_deref().or(self.exchange_short_name.as_deref())
    }
}

/// 带 `date` 字段、可按时间排序的记录
pub trait Dated {
    fn date(&self) -> Option<&str>;
}

impl Dated for EarningsRecord {
    fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }
}

impl Dated for IntradayBar {
    fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }
}

impl Dated for DividendRecord {
    fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }
}
