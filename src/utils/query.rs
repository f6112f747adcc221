//! # 查询字符串解析
//!
//! 页面上侧边栏控件的状态通过 URL 查询字符串传递，每次提交表单就是一次交互：
//! - `sentiment=<标签>`：每个选中的标签一项（也接受逗号分隔的多个标签）
//! - `filtered=1`：表单提交标记，用于区分“全部取消勾选”和“首次访问”
//! - `sort=created_at|score`、`order=asc|desc`：数据表排序

use url::form_urlencoded;

use crate::models::dashboard::{SortColumn, SortOrder, TableSort};
use crate::models::tweet::Sentiment;

/// 解析后的页面请求状态
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardQuery {
    /// 请求的情感筛选：`None` 表示未携带（使用默认值：全选）
    pub selection: Option<Vec<Sentiment>>,
    pub sort: TableSort,
}

/// 解析查询字符串
///
/// 无法识别的标签和参数直接忽略。
pub fn parse_dashboard_query(query: Option<&str>) -> DashboardQuery {
    let mut parsed = DashboardQuery::default();
    let Some(query) = query else {
        return parsed;
    };

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        match &*key {
            "sentiment" => {
                let selection = parsed.selection.get_or_insert_with(Vec::new);
                for label in value.split(',') {
                    if let Ok(sentiment) = label.parse::<Sentiment>() {
                        if !selection.contains(&sentiment) {
                            selection.push(sentiment);
                        }
                    }
                }
            }
            "filtered" => {
                parsed.selection.get_or_insert_with(Vec::new);
            }
            "sort" => {
                parsed.sort.column = match &*value {
                    "created_at" => Some(SortColumn::CreatedAt),
                    "score" => Some(SortColumn::Score),
                    _ => None,
                };
            }
            "order" => {
                parsed.sort.order = match &*value {
                    "desc" => SortOrder::Desc,
                    _ => SortOrder::Asc,
                };
            }
            _ => {}
        }
    }

    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_visit_uses_default() {
        assert_eq!(parse_dashboard_query(None).selection, None);
        assert_eq!(parse_dashboard_query(Some("")).selection, None);
        assert_eq!(parse_dashboard_query(Some("sort=score")).selection, None);
    }

    #[test]
    fn test_selected_labels() {
        let query = parse_dashboard_query(Some(
            "filtered=1&sentiment=Negative&sentiment=Positive&sentiment=Negative",
        ));
        assert_eq!(
            query.selection,
            Some(vec![Sentiment::Negative, Sentiment::Positive])
        );
    }

    #[test]
    fn test_comma_separated_labels() {
        let query = parse_dashboard_query(Some("sentiment=Positive%2CNeutral"));
        assert_eq!(
            query.selection,
            Some(vec![Sentiment::Positive, Sentiment::Neutral])
        );
    }

    #[test]
    fn test_everything_unchecked_is_empty_selection() {
        let query = parse_dashboard_query(Some("filtered=1"));
        assert_eq!(query.selection, Some(vec![]));

        // 只有无法识别的标签同样视为空筛选
        let query = parse_dashboard_query(Some("sentiment=Mixed"));
        assert_eq!(query.selection, Some(vec![]));
    }

    #[test]
    fn test_sort_parameters() {
        let query = parse_dashboard_query(Some("sort=created_at&order=desc"));
        assert_eq!(
            query.sort,
            TableSort {
                column: Some(SortColumn::CreatedAt),
                order: SortOrder::Desc,
            }
        );
        assert_eq!(parse_dashboard_query(Some("sort=bogus")).sort.column, None);
    }
}
