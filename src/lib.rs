//! 从控制中心拉取传感器数据的命令行工具
//! 提供配置、客户端与错误类型

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod telemetry;
