//! # 推文数据模型
//!
//! 定义了推文记录（TweetRecord）、情感标签（Sentiment）和整份数据集（Dataset）。
//!
//! 数据由上游离线流程生成（`data/processed_tweets.csv`），本程序只读取，
//! 加载后不可变：所有“修改”都是派生出新的筛选视图，从不原地编辑，也从不写回文件。

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// 情感标签
///
/// 对应 CSV 中 `Sentiment` 列，只允许三个取值。
/// 解析时遇到其他取值视为数据错误，因此内存中的记录永远满足该约束。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// 全部标签（固定顺序，用于计数并列时的排序）
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];

    /// CSV 和页面上使用的标签文本
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        }
    }

    /// 饼图中的固定配色
    pub fn color(&self) -> &'static str {
        match self {
            Sentiment::Positive => "#34A853",
            Sentiment::Negative => "#EA4335",
            Sentiment::Neutral => "#FBBC05",
        }
    }

    /// 在 `ALL` 中的位置
    pub fn rank(&self) -> usize {
        match self {
            Sentiment::Positive => 0,
            Sentiment::Negative => 1,
            Sentiment::Neutral => 2,
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = String;

    /// 严格匹配（仅去除首尾空白），大小写敏感，与上游 CSV 约定一致
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Positive" => Ok(Sentiment::Positive),
            "Negative" => Ok(Sentiment::Negative),
            "Neutral" => Ok(Sentiment::Neutral),
            other => Err(format!("未知的情感标签: {}", other)),
        }
    }
}

/// 单条推文记录
///
/// 对应 CSV 中的一行数据：
/// ```text
/// CreatedAt,Text,CleanedText,Sentiment,SentimentScore
/// 2025-10-20 10:15:00+00:00,"Great deals!!",great deals,Positive,0.6588
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TweetRecord {
    /// 发布时间（统一换算为 UTC）
    pub created_at: DateTime<Utc>,

    /// 原始推文文本
    pub text: String,

    /// 上游清洗后的文本（去除标点、停用词等），用于词云
    pub cleaned_text: String,

    /// 情感标签
    pub sentiment: Sentiment,

    /// 情感分数：有限实数
    pub sentiment_score: f64,
}

/// 整份数据集
///
/// 按文件顺序保存所有推文记录。由缓存以 `Arc<Dataset>` 形式在请求间共享。
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// 数据来源文件路径
    pub source: PathBuf,

    /// 按文件顺序排列的推文记录
    pub records: Vec<TweetRecord>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 数据集中实际出现过的情感标签，按首次出现的顺序排列
    ///
    /// 作为侧边栏多选控件的选项和默认值。
    pub fn sentiment_options(&self) -> Vec<Sentiment> {
        let mut options = Vec::with_capacity(Sentiment::ALL.len());
        for record in &self.records {
            if !options.contains(&record.sentiment) {
                options.push(record.sentiment);
                if options.len() == Sentiment::ALL.len() {
                    break;
                }
            }
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(sentiment: Sentiment) -> TweetRecord {
        TweetRecord {
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            text: String::new(),
            cleaned_text: String::new(),
            sentiment,
            sentiment_score: 0.0,
        }
    }

    #[test]
    fn test_sentiment_from_str() {
        assert_eq!(" Neutral ".parse::<Sentiment>(), Ok(Sentiment::Neutral));
        assert!("positive".parse::<Sentiment>().is_err());
        assert!("Mixed".parse::<Sentiment>().is_err());
    }

    #[test]
    fn test_sentiment_options_first_appearance_order() {
        let dataset = Dataset {
            source: PathBuf::from("data/processed_tweets.csv"),
            records: vec![
                record(Sentiment::Neutral),
                record(Sentiment::Positive),
                record(Sentiment::Neutral),
                record(Sentiment::Positive),
            ],
        };
        assert_eq!(
            dataset.sentiment_options(),
            vec![Sentiment::Neutral, Sentiment::Positive]
        );
    }
}
