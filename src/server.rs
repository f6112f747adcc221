//! # HTTP 服务
//!
//! 基于 hyper 1.x 的本地 HTTP/1.1 服务，向浏览器提供仪表盘页面。
//!
//! ## 执行模型
//! 运行在单线程 `current_thread` 运行时上：每个连接是一个协作式任务，
//! 每个请求同步地把流水线从头执行到尾，中途不会挂起（除首次加载数据外）。
//! 进程内唯一的共享资源是 `AppCache` 中的数据集。

use std::convert::Infallible;
use std::sync::Arc;

use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::Request;
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;

use crate::commands;
use crate::models::settings::DashboardSettings;
use crate::services::cache::AppCache;

/// 应用全局状态
///
/// 所有请求处理函数通过 `&AppState` 访问配置和数据集缓存。
pub struct AppState {
    pub settings: DashboardSettings,
    pub cache: AppCache,
}

impl AppState {
    pub fn new(settings: DashboardSettings) -> Self {
        Self {
            settings,
            cache: AppCache::new(),
        }
    }
}

/// 绑定监听地址并持续接受连接
///
/// # 错误
/// 仅在监听地址无法绑定时返回；单个连接的错误只记录日志。
pub async fn serve(state: Arc<AppState>) -> Result<(), String> {
    let addr = (state.settings.host.as_str(), state.settings.port);
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| format!("绑定监听地址 {}:{} 失败: {}", addr.0, addr.1, e))?;

    let local_addr = listener
        .local_addr()
        .map_err(|e| format!("获取监听地址失败: {}", e))?;
    log::info!("仪表盘已启动: http://{}", local_addr);
    log::info!("数据文件: {}", state.settings.data.display());

    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(conn) => conn,
            Err(e) => {
                log::warn!("接受连接失败: {}", e);
                continue;
            }
        };

        let io = TokioIo::new(stream);
        let state = Arc::clone(&state);

        tokio::spawn(async move {
            let service = service_fn(move |req: Request<Incoming>| {
                let state = Arc::clone(&state);
                async move { Ok::<_, Infallible>(commands::dispatch(req, &state).await) }
            });

            if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                log::warn!("连接 {} 处理失败: {}", peer, e);
            }
        });
    }
}
