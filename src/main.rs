//! build-initial-hubspot-data 主入口

use build_initial_hubspot_data::{
    cli::{self, Cli},
    config::{ControlCenterConfig, LoggingConfig},
    telemetry,
};
use clap::Parser;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Cli::parse();

    // 加载 .env 文件（开发环境），生产环境直接设置环境变量
    if let Err(e) = args.load_env_files() {
        eprintln!("{}", e);
        return ExitCode::from(e.exit_code());
    }

    // 1. 初始化日志
    let logging = match LoggingConfig::from_env() {
        Ok(logging) => logging,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(e.exit_code());
        }
    };
    telemetry::init_telemetry(&logging);

    // 2. 加载控制中心配置
    let config = match ControlCenterConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Configuration error");
            return ExitCode::from(e.exit_code());
        }
    };

    // 3. 拉取并输出
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match cli::run(&args, &config, &mut out).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, code = e.exit_code(), "Failed to fetch sensors");
            ExitCode::from(e.exit_code())
        }
    }
}
