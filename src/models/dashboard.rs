//! # 仪表盘显示层数据模型
//!
//! 定义一次流水线执行（筛选 → 指标 → 可视化）产出的数据结构，
//! 供 HTML 页面和 JSON 接口共同使用。
//!
//! ## 数据流
//! ```text
//! CSV → loader::load_tweets → Dataset（缓存）
//!     → filter::filter_by_sentiment → Vec<&TweetRecord>
//!     → metrics::compute / visualization::* / table::sort_rows
//!     → Evaluation::Ready(DashboardView)
//! ```
//!
//! 所有结构体只借用 `Dataset` 中的记录，不复制推文数据。

use serde::Serialize;

use crate::models::tweet::{Sentiment, TweetRecord};

/// 四个指标卡片的数值
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    /// 筛选后的推文总数
    pub total: usize,
    /// 平均情感分数，保留两位小数
    pub avg_score: f64,
    /// Positive 推文数
    pub positive: usize,
    /// Negative 推文数
    pub negative: usize,
}

/// 饼图中的一个扇区
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentSlice {
    pub sentiment: Sentiment,
    pub count: usize,
    /// 占筛选结果的比例（0.0 ~ 1.0）
    pub share: f64,
    /// 固定配色（十六进制颜色）
    pub color: &'static str,
}

/// 词云中的一个词
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordWeight {
    pub word: String,
    /// 出现次数
    pub count: usize,
    /// 相对最高频词的权重（最高频词为 1.0）
    pub weight: f64,
}

/// 词云阶段的结果
///
/// 文本为空（或只有空白）时为 `Empty`，此时不会调用词频生成器，
/// 页面显示占位提示。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WordCloud {
    Empty,
    Words { words: Vec<WordWeight> },
}

impl WordCloud {
    pub fn is_empty(&self) -> bool {
        matches!(self, WordCloud::Empty)
    }
}

/// 数据表排序列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    CreatedAt,
    Score,
}

/// 排序方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// 数据表排序方式：`column` 为 `None` 时保持文件顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TableSort {
    pub column: Option<SortColumn>,
    pub order: SortOrder,
}

/// 筛选条件通过后的完整仪表盘数据
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView<'a> {
    /// 生效的情感筛选
    pub selected: Vec<Sentiment>,
    pub metrics: Metrics,
    /// 饼图数据（按数量降序）
    pub distribution: Vec<SentimentSlice>,
    pub word_cloud: WordCloud,
    pub sort: TableSort,
    /// 数据表的行（已排序）；JSON 中不输出，推文列表走 `/api/tweets`
    #[serde(skip)]
    pub rows: Vec<&'a TweetRecord>,
}

/// 一次流水线执行的结果
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Evaluation<'a> {
    /// 未选择任何情感类别：非致命警告，只终止本次执行
    EmptySelection { warning: &'static str },
    /// 正常渲染
    Ready(DashboardView<'a>),
}

impl Evaluation<'_> {
    /// 空筛选时展示的警告文本
    pub const EMPTY_SELECTION_WARNING: &'static str =
        "No data selected. Please choose at least one sentiment from the sidebar.";

    pub fn empty_selection() -> Self {
        Evaluation::EmptySelection {
            warning: Self::EMPTY_SELECTION_WARNING,
        }
    }
}
