//! Genre Pattern Compiler
//!
//! ジャンル語彙を、区切り文字の揺れに寛容な単語列マッチャーにコンパイルする。

use regex::{Regex, RegexBuilder};

use super::normalize::normalize;

/// 単語間の区切り（空白・ハイフン・アンパサンドの1文字以上）
const SEPARATOR_PATTERN: &str = r"[\s\-&]+";

/// コンパイル済みジャンルマッチャー
///
/// 語彙中のいずれかのフレーズが、前後を単語文字に接しない単語列として
/// 入力に含まれるかを判定する。大文字小文字は区別しない。
/// 構築後は不変で、スレッド間で共有できる。
#[derive(Debug, Clone)]
pub struct GenreMatcher {
    /// 通常は1つ。サイズ上限超過時のみフレーズ単位に分割される
    regexes: Vec<Regex>,
    /// 正規化後に残った有効フレーズ数
    phrase_count: usize,
}

impl GenreMatcher {
    /// フレーズ列からマッチャーを構築
    ///
    /// 失敗しない。有効フレーズが無い場合は何にもマッチしないマッチャーを返す。
    ///
    /// ```
    /// use sonic_sorter_core::genre::GenreMatcher;
    ///
    /// let matcher = GenreMatcher::compile(["hip hop", "pop"]);
    /// assert!(matcher.test("Hip-Hop"));
    /// assert!(matcher.test("indie pop"));
    /// assert!(!matcher.test("synthpop"));
    /// ```
    pub fn compile<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parts: Vec<String> = phrases
            .into_iter()
            .filter_map(|p| phrase_pattern(p.as_ref()))
            .collect();

        if parts.is_empty() {
            return Self::never();
        }

        let phrase_count = parts.len();
        let combined = bounded(&parts.join("|"));

        let regexes = match build(&combined) {
            Ok(regex) => vec![regex],
            Err(e) => {
                tracing::warn!(
                    phrases = phrase_count,
                    error = %e,
                    "combined genre pattern rejected, compiling phrases separately"
                );
                parts
                    .iter()
                    .filter_map(|part| match build(&bounded(part)) {
                        Ok(regex) => Some(regex),
                        Err(e) => {
                            tracing::warn!(pattern = %part, error = %e, "skipping genre phrase");
                            None
                        }
                    })
                    .collect()
            }
        };

        Self {
            regexes,
            phrase_count,
        }
    }

    /// 何にもマッチしないマッチャー
    pub fn never() -> Self {
        Self {
            regexes: Vec::new(),
            phrase_count: 0,
        }
    }

    /// 入力がいずれかのフレーズを単語列として含むか
    pub fn test(&self, input: &str) -> bool {
        self.regexes.iter().any(|r| r.is_match(input))
    }

    /// 有効フレーズ数
    pub fn len(&self) -> usize {
        self.phrase_count
    }

    pub fn is_empty(&self) -> bool {
        self.phrase_count == 0
    }
}

impl Default for GenreMatcher {
    fn default() -> Self {
        Self::never()
    }
}

/// 1フレーズ分のパターン。正規化後に空なら None
fn phrase_pattern(phrase: &str) -> Option<String> {
    let clean = normalize(phrase);
    if clean.is_empty() {
        return None;
    }

    let words: Vec<String> = clean.split_whitespace().map(regex::escape).collect();
    Some(words.join(SEPARATOR_PATTERN))
}

/// 前後に単語文字が隣接しないことを要求する
///
/// `is_match` だけを使うので、境界の1文字を消費しても結果は後読み/先読みと同じ。
fn bounded(alternation: &str) -> String {
    format!(r"(?:^|\W)(?:{})(?:\W|$)", alternation)
}

fn build(pattern: &str) -> std::result::Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}
