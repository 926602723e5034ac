use serde::{Deserialize, Serialize};

/// News topic labels. Serialized as the Chinese label shown in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "财经")]
    Finance,
    #[serde(rename = "体育")]
    Sports,
    #[serde(rename = "科技")]
    Technology,
    #[serde(rename = "娱乐")]
    Entertainment,
    #[serde(rename = "政治")]
    Politics,
    #[serde(rename = "教育")]
    Education,
    #[serde(rename = "其他")]
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Finance,
        Category::Sports,
        Category::Technology,
        Category::Entertainment,
        Category::Politics,
        Category::Education,
        Category::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Finance => "财经",
            Category::Sports => "体育",
            Category::Technology => "科技",
            Category::Entertainment => "娱乐",
            Category::Politics => "政治",
            Category::Education => "教育",
            Category::Other => "其他",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A set of substrings that pins the result to one category.
#[derive(Debug, Clone, Copy)]
pub struct KeywordGroup {
    pub category: Category,
    pub keywords: &'static [&'static str],
}

impl KeywordGroup {
    pub fn matches(&self, text: &str) -> bool {
        self.keywords.iter().any(|keyword| text.contains(keyword))
    }
}

/// Checked in order; the first matching group wins.
pub const KEYWORD_GROUPS: [KeywordGroup; 3] = [
    KeywordGroup {
        category: Category::Sports,
        keywords: &["赛", "赢", "球", "冠"],
    },
    KeywordGroup {
        category: Category::Finance,
        keywords: &["股", "金", "市", "资"],
    },
    KeywordGroup {
        category: Category::Technology,
        keywords: &["芯", "网", "AI", "码"],
    },
];

pub fn match_keywords(text: &str) -> Option<Category> {
    KEYWORD_GROUPS
        .iter()
        .find(|group| group.matches(text))
        .map(|group| group.category)
}

pub const SAMPLE_TEXT: &str = "北京时间昨晚，2024赛季中国足球超级联赛第30轮全面开打。\
上海海港主场以3比1击败对手，提前一轮锁定联赛冠军。\
赛后主教练表示，球队整个赛季保持了稳定的竞技状态，\
这座冠军奖杯属于每一位球员和支持球队的球迷。";
