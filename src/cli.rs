//! 命令行入口
//! 参数定义与一次完整的拉取流程

use clap::Parser;
use std::io::Write;
use std::path::PathBuf;

use crate::client::ControlCenterApi;
use crate::config::ControlCenterConfig;
use crate::error::AppError;

/// Fetch sensors from the control center and print them as JSON.
#[derive(Debug, Parser)]
#[command(name = "build-initial-hubspot-data", version)]
pub struct Cli {
    /// Sensor status to request.
    #[arg(
        short,
        long,
        default_value = "active",
        value_parser = clap::builder::NonEmptyStringValueParser::new()
    )]
    pub status: String,

    /// Load environment variables from FILE instead of ./.env.
    #[arg(long, value_name = "FILE")]
    pub env_file: Option<PathBuf>,

    /// Print single-line JSON.
    #[arg(long)]
    pub compact: bool,
}

impl Cli {
    /// 加载 .env 文件
    ///
    /// 已存在的环境变量不会被覆盖。显式指定的文件必须存在，默认的 .env 可以缺失，
    /// 但存在时格式错误同样报错。
    pub fn load_env_files(&self) -> Result<(), AppError> {
        match &self.env_file {
            Some(path) => dotenv::from_path(path)?,
            None => allow_missing(dotenv::dotenv())?,
        }
        Ok(())
    }
}

/// 文件不存在时忽略，其余错误照常返回
fn allow_missing<T>(result: dotenv::Result<T>) -> Result<(), AppError> {
    match result {
        Ok(_) => Ok(()),
        Err(dotenv::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// 拉取传感器并写出 JSON
pub async fn run<W: Write>(cli: &Cli, config: &ControlCenterConfig, out: &mut W) -> Result<(), AppError> {
    let api = ControlCenterApi::new(config)?;
    let sensors = api.get_sensors(&cli.status).await?;

    let rendered = if cli.compact {
        serde_json::to_string(&sensors)?
    } else {
        serde_json::to_string_pretty(&sensors)?
    };
    writeln!(out, "{}", rendered)?;
    out.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_arguments() {
        let cli = Cli::try_parse_from(["build-initial-hubspot-data"]).unwrap();
        assert_eq!(cli.status, "active");
        assert!(cli.env_file.is_none());
        assert!(!cli.compact);
    }

    #[test]
    fn test_explicit_arguments() {
        let cli = Cli::try_parse_from([
            "build-initial-hubspot-data",
            "-s",
            "all",
            "--env-file",
            "config/.env.staging",
            "--compact",
        ])
        .unwrap();
        assert_eq!(cli.status, "all");
        assert_eq!(cli.env_file, Some(PathBuf::from("config/.env.staging")));
        assert!(cli.compact);
    }

    #[test]
    fn test_empty_status_rejected() {
        assert!(Cli::try_parse_from(["build-initial-hubspot-data", "--status", ""]).is_err());
    }

    #[test]
    fn test_missing_env_file_is_config_error() {
        let cli = Cli::try_parse_from([
            "build-initial-hubspot-data",
            "--env-file",
            "/nonexistent/path/.env",
        ])
        .unwrap();
        let err = cli.load_env_files().unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_missing_default_env_file_ignored() {
        assert!(allow_missing(dotenv::from_path("/nonexistent/path/.env")).is_ok());
    }

    #[test]
    fn test_malformed_env_file_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "this line has no assignment").unwrap();

        let err = allow_missing(dotenv::from_path(file.path())).unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("failed to load env file"));
    }
}
