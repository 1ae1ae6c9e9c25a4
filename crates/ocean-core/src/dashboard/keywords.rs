//! Naive keyword extraction for the word cloud.
//!
//! Fields are split on punctuation into tokens, and every 2 to 4 character
//! window of a field is also counted as a lower-weighted phrase candidate.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::news::NewsRecord;

/// Weight of a whole token.
pub const TOKEN_WEIGHT: f64 = 1.0;

/// Weight of a sliding-window phrase candidate. Tunable.
pub const PHRASE_WEIGHT: f64 = 0.5;

/// Keywords kept after ranking.
pub const MAX_KEYWORDS: usize = 40;

/// Smallest value reported for a kept keyword.
pub const MIN_KEYWORD_VALUE: i64 = 5;

const MIN_PHRASE_CHARS: usize = 2;
const MAX_PHRASE_CHARS: usize = 4;

const SEPARATORS: &[char] = &[
    ',', '，', '、', '。', ';', '；', ':', '：', '!', '！', '?', '？', '（', '）', '(', ')', '【',
    '】', '[', ']', '"', '\'', '“', '”', '‘', '’', '《', '》',
];

const STOPWORDS: &[&str] = &[
    "的", "了", "在", "是", "有", "和", "与", "及", "或", "对", "将", "等", "中", "为", "于", "以",
    "就", "但", "很", "都", "而", "以及", "并且", "或者", "如果", "因为", "所以", "然后", "其他",
    "各种", "不同", "相关", "进行", "开展", "实施", "通过", "采取", "加强", "提高", "改善", "保护",
    "修复", "治理", "管理", "建设", "发展", "促进", "推动", "支持", "完善", "优化", "提升", "确保",
    "维护", "保障", "实现", "达到", "完成", "落实", "执行", "建立", "形成", "提供", "增加", "减少",
    "防止", "避免", "控制", "监测", "评估", "分析", "研究", "调查", "检查", "监督", "规划", "设计",
    "施工", "运营", "更新", "改造", "升级", "扩展", "扩大", "缩小", "调整", "改变", "转换", "转移",
    "集中", "分散", "统一", "协调", "合作", "协同", "共享", "交流", "沟通", "协商", "讨论", "决定",
    "批准", "授权", "委托", "负责", "承担", "参与", "加入", "退出", "开始", "结束", "继续", "停止",
    "暂停", "恢复", "重启",
];

/// Returned when no keyword could be extracted.
const DEFAULT_KEYWORDS: &[(&str, i64)] = &[
    ("海洋保护", 100),
    ("生态修复", 85),
    ("污染治理", 78),
    ("可持续发展", 72),
    ("环境保护", 65),
    ("生态平衡", 58),
    ("海洋生态", 55),
    ("绿色发展", 50),
    ("生物多样性", 45),
    ("清洁能源", 42),
    ("碳排放", 40),
    ("气候变化", 38),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Keyword {
    pub name: String,
    pub value: i64,
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || SEPARATORS.contains(&c)
}

/// Accumulates weights while remembering first-seen order, so ties rank
/// stably.
#[derive(Default)]
struct Tally {
    order: Vec<String>,
    weights: HashMap<String, f64>,
}

impl Tally {
    fn add(&mut self, word: &str, weight: f64) {
        match self.weights.get_mut(word) {
            Some(w) => *w += weight,
            None => {
                self.order.push(word.to_string());
                self.weights.insert(word.to_string(), weight);
            }
        }
    }

    fn ranked(self, limit: usize) -> Vec<(String, f64)> {
        let Tally { order, weights } = self;
        let mut ranked: Vec<(String, f64)> = order
            .into_iter()
            .map(|w| {
                let weight = weights.get(&w).copied().unwrap_or_default();
                (w, weight)
            })
            .collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        ranked.truncate(limit);
        ranked
    }
}

fn tally_text(text: &str, stopwords: &HashSet<&str>, tally: &mut Tally) {
    for token in text.split(is_separator) {
        let token = token.trim();
        if token.chars().count() > 1
            && !stopwords.contains(token)
            && !token.chars().all(|c| c.is_ascii_digit())
        {
            tally.add(token, TOKEN_WEIGHT);
        }
    }

    let chars: Vec<char> = text.chars().collect();
    if chars.len() < MAX_PHRASE_CHARS {
        return;
    }
    for start in 0..=chars.len() - MIN_PHRASE_CHARS {
        for len in MIN_PHRASE_CHARS..=MAX_PHRASE_CHARS {
            if start + len > chars.len() {
                break;
            }
            let window = &chars[start..start + len];
            if window.iter().any(|&c| is_separator(c)) {
                continue;
            }
            let phrase: String = window.iter().collect();
            if !stopwords.contains(phrase.as_str()) {
                tally.add(&phrase, PHRASE_WEIGHT);
            }
        }
    }
}

/// Rank keywords across topic, measures, pollution source and organizations.
pub fn extract_keywords(records: &[NewsRecord]) -> Vec<Keyword> {
    let stopwords: HashSet<&str> = STOPWORDS.iter().copied().collect();
    let mut tally = Tally::default();

    for record in records {
        for field in [
            &record.topic,
            &record.measures,
            &record.pollution_source,
            &record.organizations,
        ] {
            if !field.is_empty() {
                tally_text(field, &stopwords, &mut tally);
            }
        }
    }

    let keywords: Vec<Keyword> = tally
        .ranked(MAX_KEYWORDS)
        .into_iter()
        .map(|(name, weight)| Keyword {
            name,
            value: (weight.round() as i64).max(MIN_KEYWORD_VALUE),
        })
        .collect();

    if keywords.is_empty() {
        tracing::debug!("No keywords extracted, using defaults");
        return DEFAULT_KEYWORDS
            .iter()
            .map(|(name, value)| Keyword {
                name: name.to_string(),
                value: *value,
            })
            .collect();
    }
    keywords
}
