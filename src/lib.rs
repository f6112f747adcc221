//! # Diwali Sale Pulse - 仪表盘核心初始化模块
//!
//! 本模块负责应用的完整初始化流程：
//! - 解析命令行参数（数据文件路径、监听地址、日志级别）
//! - 初始化日志
//! - 创建单线程 tokio 运行时并启动 HTTP 服务
//!
//! ## 模块结构
//! - `commands/` - HTTP 请求处理函数（页面与 JSON 接口）
//! - `models/` - 数据模型
//! - `services/` - 核心业务逻辑（加载、缓存、筛选、指标、可视化）
//! - `utils/` - 通用工具函数
//! - `server` - hyper 连接循环
//! - `errors` - 数据加载错误类型

pub mod commands;
pub mod errors;
pub mod models;
pub mod server;
pub mod services;
pub mod utils;

use std::sync::Arc;

use clap::Parser;

use models::settings::DashboardSettings;
use server::AppState;

/// 应用启动函数
///
/// 1. 解析命令行参数
/// 2. 按 `--log-level` 初始化 env_logger（不读取环境变量）
/// 3. 将数据路径解析为基于运行目录的绝对路径
/// 4. 在单线程运行时上运行 HTTP 服务，直到进程退出
///
/// 服务无法启动（运行时创建失败或端口被占用）时记录错误并以状态码 1 退出。
pub fn run() {
    let mut settings = DashboardSettings::parse();

    env_logger::Builder::new()
        .filter_level(settings.log_level)
        .format_timestamp_secs()
        .init();

    settings.data = utils::path::resolve_data_path(&settings.data);

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            log::error!("创建运行时失败: {}", e);
            std::process::exit(1);
        }
    };

    let state = Arc::new(AppState::new(settings));
    if let Err(e) = runtime.block_on(server::serve(state)) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
