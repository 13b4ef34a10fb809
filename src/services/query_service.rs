use log::{error, info, warn};

use super::display::{DisplaySink, Output, TriggerState};
use crate::config::Config;
use crate::errors::StockDeskError;
use crate::formatters::{build_view, EasternClock, FormatOptions, View};
use crate::models::category::{Period, QueryCategory};
use crate::transport::{QueryForm, QueryTransport};

pub const CONNECTION_ERROR: &str = "Error connecting to the server";
pub const GENERIC_ERROR: &str = "Error fetching data";

/// 一次提交的结果
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    /// 输入校验失败，请求未发出
    Rejected(String),
    Rendered(View),
    /// 后端返回 `success: false`
    ServerError(String),
    /// 连接失败或响应无法解析
    TransportFailed(String),
}

impl QueryOutcome {
    /// 输出区是否被这次提交改写；校验失败时只更新错误区，输出保持原样
    pub fn refreshes_output(&self) -> bool {
        !matches!(self, QueryOutcome::Rejected(_))
    }
}

/// 查询控制器：把格式化器绑定到显示区域和请求发送
///
/// `submit` 需要 `&mut self`，因此同一时刻最多只有一个请求在途。
pub struct QueryService<T: QueryTransport, S: DisplaySink> {
    transport: T,
    sink: S,
    category_label: String,
    period: Period,
    clock: EasternClock,
}

impl<T: QueryTransport, S: DisplaySink> QueryService<T, S> {
    pub fn new(config: &Config, transport: T, mut sink: S) -> Self {
        let category_label = QueryCategory::CompanyProfile.label().to_string();
        sink.set_trigger(TriggerState::ready());
        sink.set_period_visible(false);
        Self {
            transport,
            sink,
            category_label,
            period: config.default_period,
            clock: config.eastern_clock,
        }
    }

    /// 切换查询类别，只有分时数据显示周期选择
    pub fn select_category(&mut self, label: &str) {
        self.category_label = label.to_string();
        let visible = QueryCategory::from_label(label).map_or(false, |c| c.uses_period());
        self.sink.set_period_visible(visible);
    }

    pub fn select_period(&mut self, period: Period) {
        self.period = period;
    }

    pub fn category_label(&self) -> &str {
        &self.category_label
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// 提交一次查询
    ///
    /// 空代码只提示错误，不发请求；否则进入加载状态，按结果更新三个显示区域，
    /// 任何路径结束后按钮都恢复为可用的 "Run"。
    pub async fn submit(&mut self, symbol_input: &str) -> QueryOutcome {
        let form = match QueryForm::new(&self.category_label, symbol_input, self.period) {
            Ok(form) => form,
            Err(e) => {
                let message = match e {
                    StockDeskError::ValidationError(message) => message,
                    other => other.to_string(),
                };
                warn!("Rejected query: {}", message);
                self.sink.show_error(&message);
                return QueryOutcome::Rejected(message);
            }
        };

        // 加载状态：禁用按钮，清空错误和描述
        self.sink.set_trigger(TriggerState::loading());
        self.sink.show_error("");
        self.sink.show_output(Output::Loading);
        self.sink.show_description("");

        info!("Processing request for {} with symbol {}", form.function_type, form.symbol);
        let outcome = match self.transport.submit(&form).await {
            Ok(envelope) if envelope.success => {
                let options = FormatOptions::new(self.period.granularity()).with_clock(self.clock);
                let view = build_view(envelope.payload(), &self.category_label, options);
                self.sink.show_error("");
                self.sink.show_output(Output::View(view.clone()));
                if let Some(description) = envelope.description_text() {
                    self.sink.show_description(description);
                }
                QueryOutcome::Rendered(view)
            }
            Ok(envelope) => {
                let message = envelope.error_text().unwrap_or(GENERIC_ERROR).to_string();
                error!("Server reported failure: {}", message);
                self.sink.show_error(&message);
                self.sink.show_output(Output::Cleared);
                QueryOutcome::ServerError(message)
            }
            Err(e) => {
                error!("Error: {}", e);
                self.sink.show_error(CONNECTION_ERROR);
                self.sink.show_output(Output::Cleared);
                QueryOutcome::TransportFailed(e.to_string())
            }
        };

        self.sink.set_trigger(TriggerState::ready());
        outcome
    }
}
