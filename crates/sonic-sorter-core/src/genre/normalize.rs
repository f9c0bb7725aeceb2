//! Separator Normalizer
//!
//! ジャンル文字列の区切り文字（空白・ハイフン・アンパサンド）を正規化する。

/// 区切り文字として扱う文字かどうか
fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == '-' || c == '&'
}

/// 区切り文字の連続を単一スペースに畳み込み、前後をトリムする
///
/// ```
/// use sonic_sorter_core::genre::normalize;
///
/// assert_eq!(normalize("Hip-Hop"), "Hip Hop");
/// assert_eq!(normalize("  R&B "), "R B");
/// assert_eq!(normalize(""), "");
/// ```
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for c in text.chars() {
        if is_separator(c) {
            pending_space = true;
            continue;
        }
        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        out.push(c);
    }

    out
}
