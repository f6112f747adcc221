//! # 指标计算
//!
//! 对筛选后的子集计算四个指标卡片的数值：总数、平均分、正面数、负面数。
//! 一次遍历完成，O(n)。

use crate::models::dashboard::Metrics;
use crate::models::tweet::{Sentiment, TweetRecord};

/// 计算指标
///
/// # 返回值
/// - `Some(metrics)` - 子集非空
/// - `None` - 子集为空（平均分无定义）
pub fn compute(subset: &[&TweetRecord]) -> Option<Metrics> {
    if subset.is_empty() {
        return None;
    }

    let mut sum = 0.0;
    let mut positive = 0;
    let mut negative = 0;
    for record in subset {
        sum += record.sentiment_score;
        match record.sentiment {
            Sentiment::Positive => positive += 1,
            Sentiment::Negative => negative += 1,
            Sentiment::Neutral => {}
        }
    }

    Some(Metrics {
        total: subset.len(),
        avg_score: round2(sum / subset.len() as f64),
        positive,
        negative,
    })
}

/// 保留两位小数
///
/// 按浮点数的精确十进制值舍入，恰好位于中点时取偶数，
/// 因此 `2.675`（实际存储为 2.67499...）得到 `2.67`，`0.125` 得到 `0.12`。
pub fn round2(value: f64) -> f64 {
    let rounded = format!("{:.2}", value).parse::<f64>().unwrap_or(value);
    // 避免页面上出现 "-0"
    if rounded == 0.0 { 0.0 } else { rounded }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn record(sentiment: Sentiment, score: f64) -> TweetRecord {
        TweetRecord {
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            text: String::new(),
            cleaned_text: String::new(),
            sentiment,
            sentiment_score: score,
        }
    }

    /// 10 条：7 正面、2 负面、1 中性，分数总和 6.5
    fn scenario() -> Vec<TweetRecord> {
        let mut records: Vec<TweetRecord> = [1.0, 1.0, 0.95, 0.95, 1.0, 1.0, 1.0]
            .into_iter()
            .map(|s| record(Sentiment::Positive, s))
            .collect();
        records.push(record(Sentiment::Negative, -0.3));
        records.push(record(Sentiment::Negative, -0.1));
        records.push(record(Sentiment::Neutral, 0.0));
        records
    }

    #[test]
    fn test_scenario_positive_and_negative() {
        let records = scenario();
        let total: f64 = records.iter().map(|r| r.sentiment_score).sum();
        assert!((total - 6.5).abs() < 1e-9);

        let subset: Vec<&TweetRecord> = records
            .iter()
            .filter(|r| r.sentiment != Sentiment::Neutral)
            .collect();
        let metrics = compute(&subset).unwrap();

        assert_eq!(metrics.total, 9);
        assert_eq!(metrics.positive, 7);
        assert_eq!(metrics.negative, 2);
        // 6.5 / 9 = 0.7222...
        assert_eq!(metrics.avg_score, 0.72);
    }

    #[test]
    fn test_counts_and_mean_bounds() {
        let records = scenario();
        let subset: Vec<&TweetRecord> = records.iter().collect();
        let metrics = compute(&subset).unwrap();

        assert!(metrics.positive + metrics.negative <= metrics.total);
        let min = records.iter().map(|r| r.sentiment_score).fold(f64::INFINITY, f64::min);
        let max = records.iter().map(|r| r.sentiment_score).fold(f64::NEG_INFINITY, f64::max);
        assert!(metrics.avg_score >= min && metrics.avg_score <= max);
        assert_eq!(metrics.avg_score, 0.65);
    }

    #[test]
    fn test_single_neutral_record() {
        let records = vec![record(Sentiment::Neutral, -0.004)];
        let subset: Vec<&TweetRecord> = records.iter().collect();
        let metrics = compute(&subset).unwrap();
        assert_eq!(metrics.total, 1);
        assert_eq!(metrics.positive + metrics.negative, 0);
        assert_eq!(metrics.avg_score, 0.0);
        assert!(metrics.avg_score.is_sign_positive());
    }

    #[test]
    fn test_empty_subset_has_no_metrics() {
        assert_eq!(compute(&[]), None);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(0.456), 0.46);
        assert_eq!(round2(-0.456), -0.46);
        assert_eq!(round2(1.0), 1.0);
    }

    #[test]
    fn test_round2_uses_exact_decimal_value() {
        // 中点取偶
        assert_eq!(round2(0.125), 0.12);
        assert_eq!(round2(0.625), 0.62);
        // 二进制表示略小于中点
        assert_eq!(round2(2.675), 2.67);
        assert_eq!(round2(1.115), 1.11);
        assert!(round2(-0.001).is_sign_positive());
    }
}
