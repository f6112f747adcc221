//! # 仪表盘流水线
//!
//! 每次用户交互（一次页面请求）都会从头到尾同步执行一遍：
//! 筛选 → 空筛选检查 → 指标 → 可视化 → 数据表。
//! 只有数据加载步骤被缓存，其余阶段每次都重新计算。

use crate::models::dashboard::{DashboardView, Evaluation, TableSort};
use crate::models::tweet::{Dataset, Sentiment};
use crate::services::{filter, metrics, table, visualization};

/// 执行一次流水线
///
/// # 参数
/// - `dataset` - 缓存中的完整数据集
/// - `selected` - 生效的情感筛选
/// - `sort` - 数据表排序方式
///
/// # 返回值
/// - `Evaluation::EmptySelection` - 筛选结果为空，指标和可视化阶段不会执行
/// - `Evaluation::Ready` - 完整的仪表盘数据
pub fn evaluate<'a>(dataset: &'a Dataset, selected: &[Sentiment], sort: TableSort) -> Evaluation<'a> {
    let mut subset = filter::filter_by_sentiment(&dataset.records, selected);
    if subset.is_empty() {
        return Evaluation::empty_selection();
    }

    let metrics = metrics::compute(&subset).unwrap_or_default();
    let distribution = visualization::category_summary(&subset);
    let word_cloud = visualization::word_cloud(&visualization::text_blob(&subset));
    table::sort_rows(&mut subset, sort);

    Evaluation::Ready(DashboardView {
        selected: selected.to_vec(),
        metrics,
        distribution,
        word_cloud,
        sort,
        rows: subset,
    })
}

/// 根据请求中的筛选和数据集中实际存在的标签，确定生效的筛选
///
/// - 请求未携带筛选（首次访问）：默认选中数据集中出现过的全部标签
/// - 请求携带了筛选：只保留数据集中存在的标签，顺序与选项一致
pub fn resolve_selection(dataset: &Dataset, requested: Option<&[Sentiment]>) -> Vec<Sentiment> {
    let options = dataset.sentiment_options();
    match requested {
        None => options,
        Some(requested) => options
            .into_iter()
            .filter(|option| requested.contains(option))
            .collect(),
    }
}
