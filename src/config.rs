//! 配置系统
//! 从环境变量加载所有配置，使用 Secret 包装敏感信息

use config::{Config, Environment, Map};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

use crate::error::AppError;

/// 控制中心地址环境变量
pub const ENDPOINT_VAR: &str = "CONTROL_CENTER_ENDPOINT";
/// 控制中心令牌环境变量
pub const TOKEN_VAR: &str = "CONTROL_CENTER_TOKEN";

const CONTROL_CENTER_PREFIX: &str = "CONTROL_CENTER";
const LOG_PREFIX: &str = "LOG";

/// 控制中心访问凭据
#[derive(Debug, Clone)]
pub struct ControlCenterCredentials {
    /// 控制中心地址（仅 http/https）
    pub endpoint: Url,
    /// Bearer 令牌（使用 Secret 包装，防止日志泄露）
    pub token: Secret<String>,
}

impl ControlCenterCredentials {
    /// 校验并构造凭据，规则与 [`ControlCenterConfig::from_env`] 一致
    pub fn new(endpoint: &str, token: impl Into<String>) -> Result<Self, AppError> {
        Self::validate(Some(endpoint.to_string()), Some(Secret::new(token.into())))
    }

    /// 先检查地址再检查令牌，空值视为缺失
    fn validate(endpoint: Option<String>, token: Option<Secret<String>>) -> Result<Self, AppError> {
        let endpoint = endpoint
            .filter(|endpoint| !endpoint.is_empty())
            .ok_or(AppError::MissingEnv(ENDPOINT_VAR))?;
        let token = token
            .filter(|token| !token.expose_secret().is_empty())
            .ok_or(AppError::MissingEnv(TOKEN_VAR))?;

        Ok(Self {
            endpoint: parse_endpoint(&endpoint)?,
            token,
        })
    }
}

fn parse_endpoint(raw: &str) -> Result<Url, AppError> {
    let url = Url::parse(raw).map_err(|e| AppError::InvalidEndpoint {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(AppError::InvalidEndpoint {
            url: raw.to_string(),
            reason: format!("unsupported scheme {:?}, expected http or https", other),
        }),
    }
}

/// 环境变量原始值，校验前
#[derive(Debug, Deserialize)]
struct ControlCenterSettings {
    #[serde(default)]
    endpoint: Option<String>,
    #[serde(default)]
    token: Option<Secret<String>>,
    timeout_secs: u64,
}

/// 控制中心客户端配置
#[derive(Debug, Clone)]
pub struct ControlCenterConfig {
    pub credentials: ControlCenterCredentials,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl ControlCenterConfig {
    /// 默认请求超时（秒）
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
    /// 允许的最大请求超时（秒）
    pub const MAX_TIMEOUT_SECS: u64 = 300;

    /// 直接由凭据构造，使用默认超时
    pub fn new(credentials: ControlCenterCredentials) -> Self {
        Self {
            credentials,
            timeout_secs: Self::DEFAULT_TIMEOUT_SECS,
        }
    }

    /// 从环境变量加载配置（前缀为 CONTROL_CENTER_）
    pub fn from_env() -> Result<Self, AppError> {
        Self::load(Environment::with_prefix(CONTROL_CENTER_PREFIX))
    }

    /// 从给定的变量表加载配置，变量名与环境变量一致
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::load(Environment::with_prefix(CONTROL_CENTER_PREFIX).source(Some(to_map(vars))))
    }

    fn load(source: Environment) -> Result<Self, AppError> {
        // 令牌和地址必须按原样保留，不做类型推断
        let settings: ControlCenterSettings = Config::builder()
            .set_default("timeout_secs", Self::DEFAULT_TIMEOUT_SECS)?
            .add_source(source.prefix_separator("_"))
            .build()?
            .try_deserialize()?;

        let config = Self {
            credentials: ControlCenterCredentials::validate(settings.endpoint, settings.token)?,
            timeout_secs: settings.timeout_secs,
        };

        config.validate()?;

        Ok(config)
    }

    /// 验证配置合法性
    fn validate(&self) -> Result<(), AppError> {
        if !(1..=Self::MAX_TIMEOUT_SECS).contains(&self.timeout_secs) {
            return Err(AppError::Config(format!(
                "timeout_secs must be between 1 and {}",
                Self::MAX_TIMEOUT_SECS
            )));
        }

        Ok(())
    }

    /// 请求超时
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别: trace, debug, info, warn, error
    pub level: String,
    /// 日志格式: json, pretty, compact
    pub format: String,
}

impl LoggingConfig {
    /// 从环境变量加载配置（LOG_LEVEL, LOG_FORMAT）
    pub fn from_env() -> Result<Self, AppError> {
        Self::load(Environment::with_prefix(LOG_PREFIX))
    }

    /// 从给定的变量表加载配置
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::load(Environment::with_prefix(LOG_PREFIX).source(Some(to_map(vars))))
    }

    fn load(source: Environment) -> Result<Self, AppError> {
        let config: LoggingConfig = Config::builder()
            .set_default("level", "info")?
            .set_default("format", "compact")?
            .add_source(source.prefix_separator("_"))
            .build()?
            .try_deserialize()?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), AppError> {
        // 验证日志级别
        match self.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(AppError::Config(format!(
                    "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                    self.level
                )))
            }
        }

        // 验证日志格式
        match self.format.to_lowercase().as_str() {
            "json" | "pretty" | "compact" => {}
            _ => {
                return Err(AppError::Config(format!(
                    "Invalid log format: {}. Must be one of: json, pretty, compact",
                    self.format
                )))
            }
        }

        Ok(())
    }
}

fn to_map<I, K, V>(vars: I) -> Map<String, String>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
}
