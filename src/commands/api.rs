//! # JSON 接口
//!
//! 与页面执行同一条流水线，以 JSON 形式返回结果，便于脚本化使用：
//! - `GET /api/dashboard` - 指标、情感分布和词云数据
//! - `GET /api/tweets` - 筛选（并排序）后的推文列表
//!
//! 数据加载失败时返回 503，响应体为 `{"status": "halted", "messages": [...]}`。

use bytes::Bytes;
use http::{Response, StatusCode};
use http_body_util::Full;
use serde::Serialize;
use serde_json::json;

use crate::errors::DashboardError;
use crate::models::dashboard::{Evaluation, TableSort};
use crate::models::tweet::{Sentiment, TweetRecord};
use crate::server::AppState;
use crate::services::{filter, pipeline, table};
use crate::utils::query::parse_dashboard_query;

/// `/api/dashboard` 响应
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DashboardResponse<'a> {
    /// 完整数据集的推文数
    total_tweets: usize,
    /// 侧边栏选项（数据集中出现过的标签）
    options: Vec<Sentiment>,
    #[serde(flatten)]
    evaluation: Evaluation<'a>,
}

/// `/api/tweets` 响应
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TweetsResponse<'a> {
    selected: Vec<Sentiment>,
    sort: TableSort,
    count: usize,
    tweets: Vec<&'a TweetRecord>,
}

/// 返回一次流水线执行的 JSON 结果
pub async fn dashboard(state: &AppState, query: Option<&str>) -> Response<Full<Bytes>> {
    let request = parse_dashboard_query(query);

    let dataset = match state.cache.dataset(&state.settings.data).await {
        Ok(dataset) => dataset,
        Err(e) => return halted(&e),
    };

    let selected = pipeline::resolve_selection(&dataset, request.selection.as_deref());
    let response = DashboardResponse {
        total_tweets: dataset.len(),
        options: dataset.sentiment_options(),
        evaluation: pipeline::evaluate(&dataset, &selected, request.sort),
    };

    super::json(StatusCode::OK, &response)
}

/// 返回筛选后的推文列表
///
/// 空筛选不视为错误，返回空列表。
pub async fn tweets(state: &AppState, query: Option<&str>) -> Response<Full<Bytes>> {
    let request = parse_dashboard_query(query);

    let dataset = match state.cache.dataset(&state.settings.data).await {
        Ok(dataset) => dataset,
        Err(e) => return halted(&e),
    };

    let selected = pipeline::resolve_selection(&dataset, request.selection.as_deref());
    let mut rows = filter::filter_by_sentiment(&dataset.records, &selected);
    table::sort_rows(&mut rows, request.sort);

    let response = TweetsResponse {
        selected,
        sort: request.sort,
        count: rows.len(),
        tweets: rows,
    };

    super::json(StatusCode::OK, &response)
}

fn halted(err: &DashboardError) -> Response<Full<Bytes>> {
    super::json(
        StatusCode::SERVICE_UNAVAILABLE,
        &json!({
            "status": "halted",
            "messages": err.user_messages(),
        }),
    )
}
