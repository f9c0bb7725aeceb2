//! # Genre Module
//!
//! 音楽ファイルのジャンルタグを Warm / Cold の2つのバケットに分類する機能を提供する。
//!
//! ## 設計目的
//!
//! ジャンルタグは表記揺れが大きい（"Hip-Hop" / "hip hop" / "Hip & Hop"）。
//! また "pop" は "indie pop" にはマッチすべきだが "synthpop" にはマッチすべきでない。
//!
//! - **区切り文字の揺れ**: 空白・ハイフン・アンパサンドを同一視する
//! - **単語列マッチ**: 前後に単語文字が隣接する部分一致は採用しない
//! - **優先順位**: Cold を先に判定し、両方にマッチする場合は Cold
//!
//! ## モジュール構成
//!
//! - `normalize`: 区切り文字の正規化
//! - `matcher`: 語彙からマッチャーへのコンパイル
//! - `classifier`: 分類器
//! - `builtin`: ビルトイン語彙
//!
//! ## 使用例
//!
//! ```rust
//! use sonic_sorter_core::genre::{Bucket, GenreClassifier};
//!
//! // ビルトイン語彙で分類器を構築
//! let classifier = GenreClassifier::builtin();
//! assert_eq!(classifier.classify("Techno"), Bucket::Cold);
//! assert_eq!(classifier.classify("Hip-Hop"), Bucket::Warm);
//! assert_eq!(classifier.classify(""), Bucket::Undefined);
//!
//! // 独自の語彙
//! let classifier = GenreClassifier::new(["industrial"], ["pop"]);
//! assert_eq!(classifier.classify("industrial pop"), Bucket::Cold);
//! assert_eq!(classifier.classify("synthpop"), Bucket::Undefined);
//! ```

mod builtin;
mod classifier;
mod matcher;
mod normalize;

// Re-exports
pub use builtin::{builtin_cold, builtin_warm, COLD_GENRES, WARM_GENRES};
pub use classifier::{Bucket, GenreClassifier};
pub use matcher::GenreMatcher;
pub use normalize::normalize;
