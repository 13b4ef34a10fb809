use std::env;
use std::time::Duration;

use log::warn;

use crate::errors::{Result, StockDeskError};
use crate::formatters::EasternClock;
use crate::models::category::Period;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_ENDPOINT_PATH: &str = "/get_data";

/// 客户端配置：后端地址、超时、默认周期、美东时间换算方式
pub struct Config {
    pub base_url: String,
    pub endpoint_path: String,
    pub timeout: Option<Duration>, // None 表示使用传输层默认值
    // 未指定 --period 时使用
    pub default_period: Period,
    pub eastern_clock: EasternClock,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            endpoint_path: DEFAULT_ENDPOINT_PATH.to_string(),
            timeout: None,
            default_period: Period::default(),
            eastern_clock: EasternClock::default(),
            user_agent: format!("stockdesk/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// 从环境变量读取，无法解析的值记录警告后忽略
    pub fn from_env() -> Self {
        let mut config = Self::new();
        if let Ok(url) = env::var("STOCKDESK_BASE_URL") {
            config = config.with_base_url(&url);
        }
        if let Ok(secs) = env::var("STOCKDESK_TIMEOUT_SECS") {
            match secs.trim().parse::<u64>() {
                Ok(secs) => config = config.with_timeout(Some(Duration::from_secs(secs))),
                Err(e) => warn!("Ignoring STOCKDESK_TIMEOUT_SECS={:?}: {}", secs, e),
            }
        }
        if let Ok(clock) = env::var("STOCKDESK_EASTERN_CLOCK") {
            match clock.parse::<EasternClock>() {
                Ok(clock) => config = config.with_eastern_clock(clock),
                Err(e) => warn!("Ignoring STOCKDESK_EASTERN_CLOCK: {}", e),
            }
        }
        if let Ok(period) = env::var("STOCKDESK_DEFAULT_PERIOD") {
            match period.parse::<Period>() {
                Ok(period) => config = config.with_default_period(period),
                Err(e) => warn!("Ignoring STOCKDESK_DEFAULT_PERIOD: {}", e),
            }
        }
        // 空字符串保留默认 UA
        if let Ok(user_agent) = env::var("STOCKDESK_USER_AGENT") {
            if !user_agent.trim().is_empty() {
                config = config.with_user_agent(user_agent.trim());
            }
        }
        config
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_endpoint_path(mut self, path: &str) -> Self {
        self.endpoint_path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_default_period(mut self, period: Period) -> Self {
        self.default_period = period;
        self
    }

    pub fn with_eastern_clock(mut self, clock: EasternClock) -> Self {
        self.eastern_clock = clock;
        self
    }

    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }

    /// 查询接口的完整地址
    pub fn endpoint_url(&self) -> String {
        format!("{}{}", self.base_url, self.endpoint_path)
    }

    /// 校验配置：地址必须是 http(s)，超时不能为 0
    pub fn validate(&self) -> Result<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(StockDeskError::ConfigError(format!(
                "base url must start with http:// or https://, got {:?}",
                self.base_url
            )));
        }
        if self.timeout == Some(Duration::ZERO) {
            return Err(StockDeskError::ConfigError("timeout must be greater than zero".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_backend() {
        let config = Config::new();
        assert_eq!(config.endpoint_url(), "http://127.0.0.1:5000/get_data");
        assert_eq!(config.timeout, None);
        assert_eq!(config.default_period, Period::ThirtyMinutes);
        assert_eq!(config.eastern_clock, EasternClock::FixedOffset);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder_normalises_paths() {
        let config = Config::new()
            .with_base_url("https://quotes.example.com/")
            .with_endpoint_path("api/get_data");
        assert_eq!(config.endpoint_url(), "https://quotes.example.com/api/get_data");
    }

    #[test]
    fn env_overrides_period_and_user_agent() {
        env::set_var("STOCKDESK_DEFAULT_PERIOD", "1hour");
        env::set_var("STOCKDESK_USER_AGENT", "desk-test/1.0");
        let config = Config::from_env();
        env::remove_var("STOCKDESK_DEFAULT_PERIOD");
        env::remove_var("STOCKDESK_USER_AGENT");
        assert_eq!(config.default_period, Period::OneHour);
        assert_eq!(config.user_agent, "desk-test/1.0");
    }

    #[test]
    fn builder_sets_period_and_user_agent() {
        let config = Config::new()
            .with_default_period(Period::OneDay)
            .with_user_agent("custom/2");
        assert_eq!(config.default_period, Period::OneDay);
        assert!(config.default_period.is_daily());
        assert_eq!(config.user_agent, "custom/2");
    }

    #[test]
    fn validate_rejects_bad_values() {
        assert!(Config::new().with_base_url("ftp://x").validate().is_err());
        assert!(Config::new()
            .with_timeout(Some(Duration::ZERO))
            .validate()
            .is_err());
    }
}
