//! # 可视化数据派生
//!
//! 从筛选后的子集派生两种图表数据，都是纯函数：
//! - **情感分布**：每个标签的数量和固定配色，供饼图使用
//! - **词云**：拼接所有清洗后文本，统计词频，供浏览器端词云库渲染
//!
//! ## 词频规则
//! 参考常见词云库的默认分词行为，但只统计单词，不统计相邻词组成的二元词组：
//! - 分词模式 `\w[\w']*`
//! - 去掉词尾的 `'s`，统一小写
//! - 去除英文停用词和纯数字
//! - 复数合并：`deals` 与 `deal` 同时出现时计入 `deal`（`ss` 结尾的词除外）
//! - 最多保留 200 个词，权重按最高频词归一化

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use crate::models::dashboard::{SentimentSlice, WordCloud, WordWeight};
use crate::models::tweet::{Sentiment, TweetRecord};

/// 词云最多展示的词数
pub const MAX_WORDS: usize = 200;

/// 分词正则
static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w[\w']*").unwrap());

/// 英文停用词
static STOPWORDS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOPWORD_LIST.iter().copied().collect());

const STOPWORD_LIST: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and",
    "any", "are", "aren't", "as", "at", "be", "because", "been", "before", "being", "below",
    "between", "both", "but", "by", "can", "can't", "cannot", "com", "could", "couldn't",
    "did", "didn't", "do", "does", "doesn't", "doing", "don't", "down", "during", "each",
    "else", "ever", "few", "for", "from", "further", "get", "had", "hadn't", "has",
    "hasn't", "have", "haven't", "having", "he", "he'd", "he'll", "he's", "hence", "her",
    "here", "here's", "hers", "herself", "him", "himself", "his", "how", "how's",
    "however", "http", "https", "i", "i'd", "i'll", "i'm", "i've", "if", "in", "into",
    "is", "isn't", "it", "it's", "its", "itself", "just", "k", "let's", "like", "me",
    "more", "most", "mustn't", "my", "myself", "no", "nor", "not", "of", "off", "on",
    "once", "only", "or", "other", "otherwise", "ought", "our", "ours", "ourselves", "out",
    "over", "own", "r", "same", "shall", "shan't", "she", "she'd", "she'll", "she's",
    "should", "shouldn't", "since", "so", "some", "such", "than", "that", "that's", "the",
    "their", "theirs", "them", "themselves", "then", "there", "there's", "therefore",
    "these", "they", "they'd", "they'll", "they're", "they've", "this", "those", "through",
    "to", "too", "under", "until", "up", "very", "was", "wasn't", "we", "we'd", "we'll",
    "we're", "we've", "were", "weren't", "what", "what's", "when", "when's", "where",
    "where's", "which", "while", "who", "who's", "whom", "why", "why's", "with", "won't",
    "would", "wouldn't", "www", "you", "you'd", "you'll", "you're", "you've", "your",
    "yours", "yourself", "yourselves",
];

/// 统计每个情感标签的数量
///
/// 按数量降序排列（数量相同时按 Positive、Negative、Neutral 的顺序），
/// 数量为 0 的标签不出现在结果中。
pub fn category_summary(subset: &[&TweetRecord]) -> Vec<SentimentSlice> {
    let mut counts = [0usize; 3];
    for record in subset {
        counts[record.sentiment.rank()] += 1;
    }

    let total = subset.len();
    let mut slices: Vec<SentimentSlice> = Sentiment::ALL
        .iter()
        .filter(|sentiment| counts[sentiment.rank()] > 0)
        .map(|sentiment| {
            let count = counts[sentiment.rank()];
            SentimentSlice {
                sentiment: *sentiment,
                count,
                share: count as f64 / total as f64,
                color: sentiment.color(),
            }
        })
        .collect();

    // 稳定排序，保留 ALL 中的并列顺序
    slices.sort_by(|a, b| b.count.cmp(&a.count));
    slices
}

/// 用单个空格拼接子集中所有清洗后的文本
pub fn text_blob(subset: &[&TweetRecord]) -> String {
    subset
        .iter()
        .map(|record| record.cleaned_text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// 生成词云数据
///
/// 文本为空或只有空白时直接返回 `WordCloud::Empty`，不调用词频统计；
/// 所有词都被过滤掉（例如全是停用词）时同样返回 `Empty`。
pub fn word_cloud(blob: &str) -> WordCloud {
    if blob.trim().is_empty() {
        return WordCloud::Empty;
    }

    let words = word_frequencies(blob, MAX_WORDS);
    if words.is_empty() {
        WordCloud::Empty
    } else {
        WordCloud::Words { words }
    }
}

/// 统计词频
///
/// # 参数
/// - `blob` - 待统计的文本
/// - `max_words` - 最多返回的词数
///
/// # 返回值
/// 按出现次数降序（相同次数按字母序）排列的词列表
pub fn word_frequencies(blob: &str, max_words: usize) -> Vec<WordWeight> {
    let mut counts: HashMap<String, usize> = HashMap::new();

    for token in TOKEN_RE.find_iter(blob).map(|m| m.as_str()) {
        let token = token
            .strip_suffix("'s")
            .or_else(|| token.strip_suffix("'S"))
            .unwrap_or(token);
        let word = token.to_lowercase();

        if word.is_empty()
            || word.chars().all(char::is_numeric)
            || STOPWORDS.contains(word.as_str())
        {
            continue;
        }

        *counts.entry(word).or_insert(0) += 1;
    }

    merge_plurals(&mut counts);

    let mut words: Vec<(String, usize)> = counts.into_iter().collect();
    words.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    words.truncate(max_words);

    let Some(max_count) = words.first().map(|(_, count)| *count) else {
        return Vec::new();
    };

    words
        .into_iter()
        .map(|(word, count)| WordWeight {
            weight: count as f64 / max_count as f64,
            word,
            count,
        })
        .collect()
}

/// 将复数形式的计数合并到单数形式上
fn merge_plurals(counts: &mut HashMap<String, usize>) {
    let plurals: Vec<String> = counts
        .keys()
        .filter(|word| word.ends_with('s') && !word.ends_with("ss") && word.len() > 1)
        .filter(|word| counts.contains_key(&word[..word.len() - 1]))
        .cloned()
        .collect();

    for plural in plurals {
        if let Some(count) = counts.remove(&plural) {
            if let Some(singular) = counts.get_mut(&plural[..plural.len() - 1]) {
                *singular += count;
            }
        }
    }
}
