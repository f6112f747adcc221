//! # 情感筛选
//!
//! 纯函数：按用户选择的情感标签集合筛出推文子集，保持原有顺序。

use crate::models::tweet::{Sentiment, TweetRecord};

/// 筛出标签属于 `selected` 的记录
///
/// `selected` 为空时返回空列表，调用方应把它当作“没有可展示的数据”处理，
/// 而不是错误。结果只借用输入记录，不复制数据。
///
/// 对已经筛选过的子集用同一组标签再次筛选，结果不变。
pub fn filter_by_sentiment<'a, I>(records: I, selected: &[Sentiment]) -> Vec<&'a TweetRecord>
where
    I: IntoIterator<Item = &'a TweetRecord>,
{
    if selected.is_empty() {
        return Vec::new();
    }

    records
        .into_iter()
        .filter(|record| selected.contains(&record.sentiment))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn records() -> Vec<TweetRecord> {
        [
            (Sentiment::Positive, 0.8),
            (Sentiment::Neutral, 0.0),
            (Sentiment::Negative, -0.5),
            (Sentiment::Positive, 0.4),
            (Sentiment::Negative, -0.1),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, (sentiment, score))| TweetRecord {
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            text: format!("tweet {i}"),
            cleaned_text: format!("tweet {i}"),
            sentiment,
            sentiment_score: score,
        })
        .collect()
    }

    #[test]
    fn test_filter_keeps_order() {
        let all = records();
        let subset = filter_by_sentiment(&all, &[Sentiment::Negative, Sentiment::Positive]);
        let texts: Vec<&str> = subset.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["tweet 0", "tweet 2", "tweet 3", "tweet 4"]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let all = records();
        let selected = [Sentiment::Neutral, Sentiment::Negative];
        let once = filter_by_sentiment(&all, &selected);
        let twice = filter_by_sentiment(once.iter().copied(), &selected);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_full_label_set_returns_everything() {
        let all = records();
        let subset = filter_by_sentiment(&all, &Sentiment::ALL);
        assert_eq!(subset.len(), all.len());
        assert!(subset.iter().zip(&all).all(|(a, b)| std::ptr::eq(*a, b)));
    }

    #[test]
    fn test_empty_selection_returns_nothing() {
        let all = records();
        assert!(filter_by_sentiment(&all, &[]).is_empty());
    }
}
