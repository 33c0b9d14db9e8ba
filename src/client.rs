//! 控制中心 API 客户端

use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde_json::Value;
use tracing::{debug, info};
use url::Url;

use crate::config::ControlCenterConfig;
use crate::error::AppError;

const SENSORS_PATH: &str = "/api/get-sensors";

/// 错误信息中保留的响应体长度（字节）
const MAX_ERROR_BODY_BYTES: usize = 512;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// 控制中心 API 客户端
pub struct ControlCenterApi {
    client: Client,
    endpoint: Url,
    token: Secret<String>,
}

impl ControlCenterApi {
    /// 不按状态过滤时使用的 status 取值
    pub const ALL_SENSORS: &'static str = "all";

    /// 创建新的客户端
    pub fn new(config: &ControlCenterConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            endpoint: config.credentials.endpoint.clone(),
            token: config.credentials.token.clone(),
        })
    }

    /// 传感器列表地址
    ///
    /// 接口路径是绝对路径，会替换掉 endpoint 上已有的路径部分。
    pub fn sensors_url(&self, status: &str) -> Result<Url, AppError> {
        let mut url = self
            .endpoint
            .join(SENSORS_PATH)
            .map_err(|e| AppError::InvalidEndpoint {
                url: self.endpoint.to_string(),
                reason: e.to_string(),
            })?;
        url.query_pairs_mut().append_pair("status", status);
        Ok(url)
    }

    /// 获取传感器列表
    pub async fn get_sensors(&self, status: &str) -> Result<Value, AppError> {
        let url = self.sensors_url(status)?;
        info!(status = %status, host = ?url.host_str(), "Fetching sensors from control center");

        let response = self
            .client
            .get(url)
            .header("Authorization", format!("Bearer {}", self.token.expose_secret()))
            .send()
            .await?;

        let http_status = response.status();
        let body = response.text().await?;

        if !http_status.is_success() {
            return Err(AppError::Status {
                status: http_status.as_u16(),
                body: truncate_body(body),
            });
        }

        let sensors: Value = serde_json::from_str(&body)?;
        match &sensors {
            Value::Array(items) => debug!(count = items.len(), "Sensors received"),
            _ => debug!("Sensors received"),
        }

        Ok(sensors)
    }
}

/// 截断过长的响应体，保证落在字符边界上
fn truncate_body(mut body: String) -> String {
    if body.len() <= MAX_ERROR_BODY_BYTES {
        return body;
    }

    let mut end = MAX_ERROR_BODY_BYTES;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    let omitted = body.len() - end;
    body.truncate(end);
    body.push_str(&format!("... ({} more bytes)", omitted));
    body
}
