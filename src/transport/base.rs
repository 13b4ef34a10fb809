use async_trait::async_trait;

use crate::errors::{Result, StockDeskError};
use crate::models::category::{Period, QueryCategory};
use crate::models::envelope::ResponseEnvelope;

// 代码为空时显示在错误区
pub const EMPTY_SYMBOL_MESSAGE: &str = "Please enter a stock symbol";

/// 发往 `/get_data` 的表单字段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryForm {
    pub function_type: String,
    pub symbol: String,
    pub period: Option<Period>,
}

impl QueryForm {
    /// 代码去除首尾空白并转为大写；只有分时数据附带周期。
    /// 代码为空时直接拒绝，不会发出请求。
    pub fn new(function_type: &str, symbol_input: &str, period: Period) -> Result<Self> {
        let symbol = symbol_input.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(StockDeskError::ValidationError(EMPTY_SYMBOL_MESSAGE.to_string()));
        }
        let period = QueryCategory::from_label(function_type)
            .filter(QueryCategory::uses_period)
            .map(|_| period);
        Ok(Self {
            function_type: function_type.to_string(),
            symbol,
            period,
        })
    }

    /// 按顺序返回表单字段：function_type、symbol，分时数据再加 period
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("function_type", self.function_type.clone()),
            ("symbol", self.symbol.clone()),
        ];
        if let Some(period) = self.period {
            fields.push(("period", period.as_str().to_string()));
        }
        fields
    }
}

/// 发送一次查询并返回解析后的响应包装
#[async_trait]
pub trait QueryTransport {
    async fn submit(&self, form: &QueryForm) -> Result<ResponseEnvelope>;
}
