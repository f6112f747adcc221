//! # 数据表排序
//!
//! 数据表默认保持文件顺序；用户可以按发布时间或情感分数排序。
//! 排序是稳定的，相同键值的行保持原有相对顺序。

use std::cmp::Ordering;

use crate::models::dashboard::{SortColumn, SortOrder, TableSort};
use crate::models::tweet::TweetRecord;

/// 按指定方式对数据表的行排序（原地）
pub fn sort_rows(rows: &mut [&TweetRecord], sort: TableSort) {
    let Some(column) = sort.column else {
        return;
    };

    rows.sort_by(|a, b| {
        let ordering = compare(a, b, column);
        match sort.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

fn compare(a: &TweetRecord, b: &TweetRecord, column: SortColumn) -> Ordering {
    match column {
        SortColumn::CreatedAt => a.created_at.cmp(&b.created_at),
        SortColumn::Score => a.sentiment_score.total_cmp(&b.sentiment_score),
    }
}
