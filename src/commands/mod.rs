//! # HTTP 请求处理模块
//!
//! 浏览器与服务端之间的接口层，每个子模块对应一个功能域：
//! - `dashboard` - 仪表盘 HTML 页面
//! - `api` - 同一流水线的 JSON 接口
//!
//! `dispatch` 负责路由，本模块同时提供构造响应的辅助函数。

pub mod api;
pub mod dashboard;

use bytes::Bytes;
use http::header::{self, HeaderValue};
use http::{Method, Request, Response, StatusCode};
use http_body_util::Full;
use serde::Serialize;
use serde_json::json;

use crate::server::AppState;

/// 路由分发
///
/// 只读服务：除 `GET` 以外的方法一律返回 405。
/// 请求体不会被读取，因此对任意 body 类型通用。
///
/// # 路由
/// - `/` - 仪表盘页面
/// - `/api/dashboard` - 仪表盘 JSON
/// - `/api/tweets` - 推文列表 JSON
/// - `/health` - 存活检查
pub async fn dispatch<B>(req: Request<B>, state: &AppState) -> Response<Full<Bytes>> {
    let (parts, _) = req.into_parts();
    log::debug!("{} {}", parts.method, parts.uri);

    if parts.method != Method::GET {
        return text(StatusCode::METHOD_NOT_ALLOWED, "method not allowed");
    }

    let query = parts.uri.query();
    match parts.uri.path() {
        "/" => dashboard::render_page(state, query).await,
        "/api/dashboard" => api::dashboard(state, query).await,
        "/api/tweets" => api::tweets(state, query).await,
        "/health" => json(StatusCode::OK, &json!({ "status": "ok" })),
        _ => text(StatusCode::NOT_FOUND, "not found"),
    }
}

fn respond(status: StatusCode, content_type: &'static str, body: Bytes) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(body));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    response
}

pub(crate) fn html(status: StatusCode, body: String) -> Response<Full<Bytes>> {
    respond(status, "text/html; charset=utf-8", Bytes::from(body))
}

pub(crate) fn text(status: StatusCode, body: &'static str) -> Response<Full<Bytes>> {
    respond(status, "text/plain; charset=utf-8", Bytes::from_static(body.as_bytes()))
}

pub(crate) fn json<T: Serialize + ?Sized>(status: StatusCode, value: &T) -> Response<Full<Bytes>> {
    match serde_json::to_vec(value) {
        Ok(body) => respond(status, "application/json", Bytes::from(body)),
        Err(e) => {
            log::error!("序列化响应失败: {}", e);
            text(StatusCode::INTERNAL_SERVER_ERROR, "failed to serialize response")
        }
    }
}
