use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;

use super::base::{QueryForm, QueryTransport};
use crate::config::Config;
use crate::errors::{Result, StockDeskError};
use crate::models::envelope::ResponseEnvelope;

/// 基于 reqwest 的查询传输
pub struct HttpTransport {
    client: Client,
    url: String,
}

impl HttpTransport {
    /// 根据配置创建客户端，配置非法时直接返回错误
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        // 未配置时沿用传输层默认，不额外设置超时
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(StockDeskError::RequestError)?;

        Ok(Self {
            client,
            url: config.endpoint_url(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl QueryTransport for HttpTransport {
    async fn submit(&self, form: &QueryForm) -> Result<ResponseEnvelope> {
        info!("POST {} function_type={} symbol={}", self.url, form.function_type, form.symbol);

        // 表单编码提交，字段与界面上的表单一致
        let response = self
            .client
            .post(&self.url)
            .form(&form.fields())
            .send()
            .await
            .map_err(StockDeskError::RequestError)?;

        let status = response.status();
        let text = response.text().await?;
        debug!("Received {} bytes with HTTP status {}", text.len(), status);

        // 后端出错时也会返回 JSON 包装，因此不按状态码提前返回
        let envelope: ResponseEnvelope = serde_json::from_str(&text).map_err(|e| {
            StockDeskError::TransportError(format!("HTTP {} returned a non-JSON body: {}", status, e))
        })?;
        Ok(envelope)
    }
}
