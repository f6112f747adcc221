//! # 仪表盘页面
//!
//! `GET /`：执行一次流水线并渲染 HTML 页面。
//!
//! 页面结构（从上到下）：错误面板 → 标题与简介 → 空筛选警告 → 指标卡片
//! → 饼图与词云 → 数据表 → 项目洞察。侧边栏承载筛选控件。
//! 图表由浏览器端的 Plotly.js 和 wordcloud2.js 渲染，这里只负责准备数据。

use askama::Template;
use bytes::Bytes;
use http::{Response, StatusCode};
use http_body_util::Full;
use serde::Serialize;

use crate::models::dashboard::{
    DashboardView, Evaluation, Metrics, SortColumn, SortOrder, TableSort, WordCloud,
};
use crate::models::tweet::{Dataset, Sentiment, TweetRecord};
use crate::server::AppState;
use crate::services::pipeline;
use crate::utils::query::parse_dashboard_query;

/// 浏览器标签页标题
const PAGE_TITLE: &str = "Diwali Sale Pulse";

/// 页面主标题
const HEADING: &str = "📊 Diwali Sale Pulse: Twitter Sentiment Analysis";

/// 词云画布尺寸
const CLOUD_WIDTH: u32 = 400;
const CLOUD_HEIGHT: u32 = 200;

/// 仪表盘页面模板（`templates/dashboard.html`）
#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardPage {
    page_title: &'static str,
    heading: &'static str,
    /// 加载失败时的错误文本；非空时页面只显示错误
    errors: Vec<String>,
    /// 数据是否已成功加载
    loaded: bool,
    /// 完整数据集的推文数
    total_tweets: usize,
    options: Vec<FilterOption>,
    sort_options: Vec<SelectOption>,
    order_options: Vec<SelectOption>,
    /// 空筛选警告（为空字符串表示没有警告）
    warning: String,
    /// 指标、图表和数据表是否渲染
    ready: bool,
    tiles: Vec<MetricTile>,
    chart_json: String,
    words_json: String,
    has_words: bool,
    cloud_width: u32,
    cloud_height: u32,
    rows: Vec<TableRow>,
}

/// 侧边栏多选控件的一个选项
struct FilterOption {
    label: &'static str,
    checked: bool,
}

/// 下拉框的一个选项
struct SelectOption {
    value: &'static str,
    label: &'static str,
    selected: bool,
}

/// 指标卡片
struct MetricTile {
    label: &'static str,
    value: String,
}

/// 数据表的一行（已格式化）
struct TableRow {
    created_at: String,
    text: String,
    sentiment: &'static str,
    score: String,
}

impl DashboardPage {
    /// 空页面骨架
    fn blank() -> Self {
        Self {
            page_title: PAGE_TITLE,
            heading: HEADING,
            errors: Vec::new(),
            loaded: false,
            total_tweets: 0,
            options: Vec::new(),
            sort_options: Vec::new(),
            order_options: Vec::new(),
            warning: String::new(),
            ready: false,
            tiles: Vec::new(),
            chart_json: "[]".to_string(),
            words_json: "[]".to_string(),
            has_words: false,
            cloud_width: CLOUD_WIDTH,
            cloud_height: CLOUD_HEIGHT,
            rows: Vec::new(),
        }
    }

    /// 数据加载失败：只显示错误面板
    fn halted(errors: Vec<String>) -> Self {
        Self {
            errors,
            ..Self::blank()
        }
    }

    /// 数据已加载：根据流水线结果填充页面
    fn loaded(
        dataset: &Dataset,
        selected: &[Sentiment],
        sort: TableSort,
        evaluation: &Evaluation<'_>,
    ) -> Self {
        let mut page = Self {
            loaded: true,
            total_tweets: dataset.len(),
            options: dataset
                .sentiment_options()
                .into_iter()
                .map(|sentiment| FilterOption {
                    label: sentiment.as_str(),
                    checked: selected.contains(&sentiment),
                })
                .collect(),
            sort_options: sort_options(sort.column),
            order_options: order_options(sort.order),
            ..Self::blank()
        };

        match evaluation {
            Evaluation::EmptySelection { warning } => {
                page.warning = warning.to_string();
            }
            Evaluation::Ready(view) => page.fill_view(view),
        }

        page
    }

    fn fill_view(&mut self, view: &DashboardView<'_>) {
        self.ready = true;
        self.tiles = metric_tiles(&view.metrics);
        self.chart_json = script_json(&view.distribution);
        if let WordCloud::Words { words } = &view.word_cloud {
            self.has_words = true;
            self.words_json = script_json(words);
        }
        self.rows = view.rows.iter().map(|record| table_row(record)).collect();
    }
}

fn sort_options(current: Option<SortColumn>) -> Vec<SelectOption> {
    [
        (None, "", "File order"),
        (Some(SortColumn::CreatedAt), "created_at", "CreatedAt"),
        (Some(SortColumn::Score), "score", "SentimentScore"),
    ]
    .into_iter()
    .map(|(column, value, label)| SelectOption {
        value,
        label,
        selected: column == current,
    })
    .collect()
}

fn order_options(current: SortOrder) -> Vec<SelectOption> {
    [
        (SortOrder::Asc, "asc", "Ascending"),
        (SortOrder::Desc, "desc", "Descending"),
    ]
    .into_iter()
    .map(|(order, value, label)| SelectOption {
        value,
        label,
        selected: order == current,
    })
    .collect()
}

fn metric_tiles(metrics: &Metrics) -> Vec<MetricTile> {
    vec![
        MetricTile {
            label: "Total Tweets",
            value: metrics.total.to_string(),
        },
        MetricTile {
            label: "Avg. Sentiment",
            value: format_score(metrics.avg_score),
        },
        MetricTile {
            label: "Positive Tweets",
            value: metrics.positive.to_string(),
        },
        MetricTile {
            label: "Negative Tweets",
            value: metrics.negative.to_string(),
        },
    ]
}

fn table_row(record: &TweetRecord) -> TableRow {
    TableRow {
        created_at: record.created_at.format("%Y-%m-%d %H:%M:%S%:z").to_string(),
        text: record.text.clone(),
        sentiment: record.sentiment.as_str(),
        score: format_score(record.sentiment_score),
    }
}

/// 分数显示：整数值也保留一位小数（`1` → `1.0`）
fn format_score(value: f64) -> String {
    let text = value.to_string();
    if text.contains('.') || text.contains('e') || text.contains("inf") || text.contains("NaN") {
        text
    } else {
        format!("{}.0", text)
    }
}

/// 序列化为可以直接嵌入 `<script>` 的 JSON
///
/// 转义 `<`，避免文本中的 `</script>` 提前结束脚本块。
fn script_json<T: Serialize + ?Sized>(value: &T) -> String {
    match serde_json::to_string(value) {
        Ok(json) => json.replace('<', "\\u003c"),
        Err(e) => {
            log::error!("序列化图表数据失败: {}", e);
            "[]".to_string()
        }
    }
}

/// 渲染仪表盘页面
///
/// # 参数
/// - `state` - 应用全局状态（配置与数据集缓存）
/// - `query` - URL 查询字符串（筛选控件状态）
///
/// # 返回值
/// 始终返回 HTML 页面；加载失败时页面只包含错误面板。
/// 仅当模板渲染本身失败时返回 500。
pub async fn render_page(state: &AppState, query: Option<&str>) -> Response<Full<Bytes>> {
    let request = parse_dashboard_query(query);

    let page = match state.cache.dataset(&state.settings.data).await {
        Err(e) => DashboardPage::halted(e.user_messages()),
        Ok(dataset) => {
            let selected = pipeline::resolve_selection(&dataset, request.selection.as_deref());
            let evaluation = pipeline::evaluate(&dataset, &selected, request.sort);
            DashboardPage::loaded(&dataset, &selected, request.sort, &evaluation)
        }
    };

    match page.render() {
        Ok(html) => super::html(StatusCode::OK, html),
        Err(e) => {
            log::error!("渲染仪表盘页面失败: {}", e);
            super::text(StatusCode::INTERNAL_SERVER_ERROR, "failed to render dashboard")
        }
    }
}
