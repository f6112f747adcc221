//! # 启动配置
//!
//! 仪表盘没有配置文件，也不读取环境变量；所有可调项都来自命令行参数，
//! 默认值即固定的运行约定（数据文件位于运行目录下的 `data/processed_tweets.csv`）。

use std::path::PathBuf;

use clap::Parser;

/// 默认数据文件路径（相对于运行目录）
pub const DEFAULT_DATA_PATH: &str = "data/processed_tweets.csv";

/// 默认监听端口
pub const DEFAULT_PORT: u16 = 8501;

/// 仪表盘启动配置
#[derive(Debug, Clone, Parser)]
#[command(
    name = "diwali-sale-pulse",
    version,
    about = "Diwali Sale Pulse: Twitter sentiment dashboard"
)]
pub struct DashboardSettings {
    /// 预处理后的推文 CSV 文件
    #[arg(long, default_value = DEFAULT_DATA_PATH)]
    pub data: PathBuf,

    /// 监听地址
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// 监听端口
    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// 日志级别（off / error / warn / info / debug / trace）
    #[arg(long, default_value = "info")]
    pub log_level: log::LevelFilter,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            data: PathBuf::from(DEFAULT_DATA_PATH),
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            log_level: log::LevelFilter::Info,
        }
    }
}
