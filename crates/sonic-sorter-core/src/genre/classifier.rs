//! Genre Classifier
//!
//! ジャンルタグを Cold / Warm / Undefined のいずれかに分類する。
//! Cold を先に判定し、両方にマッチする場合は常に Cold を返す。

use std::fmt;

use crate::config::GenresConfig;
use crate::tags::{TagLookup, NO_METADATA};

use super::builtin::{COLD_GENRES, WARM_GENRES};
use super::matcher::GenreMatcher;

/// 分類結果（振り分け先バケット）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    Cold,
    Warm,
    Undefined,
}

impl Bucket {
    pub const ALL: [Bucket; 3] = [Bucket::Cold, Bucket::Warm, Bucket::Undefined];

    /// ログ表示用ラベル
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cold => "COLD",
            Self::Warm => "WARM",
            Self::Undefined => "UNDEFINED",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Cold => "❄️",
            Self::Warm => "🔥",
            Self::Undefined => "❓",
        }
    }

    /// `[icon LABEL]`
    pub fn status(&self) -> String {
        format!("[{} {}]", self.icon(), self.label())
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// ジャンル分類器
///
/// 2つのコンパイル済みマッチャーを所有する。構築後は不変。
#[derive(Debug, Clone)]
pub struct GenreClassifier {
    cold: GenreMatcher,
    warm: GenreMatcher,
}

impl GenreClassifier {
    /// 語彙から分類器を構築
    pub fn new<C, W, S>(cold: C, warm: W) -> Self
    where
        C: IntoIterator<Item = S>,
        W: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_matchers(GenreMatcher::compile(cold), GenreMatcher::compile(warm))
    }

    pub fn from_matchers(cold: GenreMatcher, warm: GenreMatcher) -> Self {
        Self { cold, warm }
    }

    /// 設定の `[genres]` から構築（未指定のリストはビルトイン）
    pub fn from_config(config: &GenresConfig) -> Self {
        Self::new(config.cold_list(), config.warm_list())
    }

    /// ビルトイン語彙のみで構築
    pub fn builtin() -> Self {
        Self::new(COLD_GENRES.iter().copied(), WARM_GENRES.iter().copied())
    }

    pub fn cold(&self) -> &GenreMatcher {
        &self.cold
    }

    pub fn warm(&self) -> &GenreMatcher {
        &self.warm
    }

    /// タグを分類
    ///
    /// ```
    /// use sonic_sorter_core::genre::{Bucket, GenreClassifier};
    ///
    /// let classifier = GenreClassifier::new(["industrial"], ["pop"]);
    /// assert_eq!(classifier.classify("Industrial Pop"), Bucket::Cold);
    /// assert_eq!(classifier.classify("indie pop"), Bucket::Warm);
    /// assert_eq!(classifier.classify("synthpop"), Bucket::Undefined);
    /// ```
    pub fn classify(&self, genre_tag: &str) -> Bucket {
        if genre_tag.is_empty() || genre_tag == NO_METADATA {
            return Bucket::Undefined;
        }
        if self.cold.test(genre_tag) {
            Bucket::Cold
        } else if self.warm.test(genre_tag) {
            Bucket::Warm
        } else {
            Bucket::Undefined
        }
    }

    /// タグ抽出結果を分類（取得できなかった場合は Undefined）
    pub fn classify_lookup(&self, lookup: &TagLookup) -> Bucket {
        match lookup {
            TagLookup::Found(genre) => self.classify(genre),
            TagLookup::Missing | TagLookup::Unavailable(_) => Bucket::Undefined,
        }
    }
}

impl Default for GenreClassifier {
    fn default() -> Self {
        Self::builtin()
    }
}
