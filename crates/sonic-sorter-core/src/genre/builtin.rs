//! Builtin Genre Vocabulary
//!
//! コード内で定義されるビルトインのジャンル語彙。
//! 設定ファイルに `[genres]` が無い場合に使用される。

/// Warm: アナログ、ハーモニック、オーガニック、人間的なグルーヴ
#[rustfmt::skip]
pub const WARM_GENRES: &[&str] = &[
    "pop", "vocal", "alternative", "hip hop", "country", "soundtrack", "indie", "jazz",
    "ambient", "psybient", "psychill", "downtempo", "trip hop", "slushwave",
    "vaporwave", "game soundtrack", "dream pop", "shoegaze", "indie pop", "lo-fi", "yacht rock",
    "soft rock", "rock", "classic rock", "jazz fusion", "city pop", "new age",
    "ethno-ambient", "folktronica", "chamber pop", "bossa nova", "psych rock",
    "baroque pop", "dub", "acid jazz", "soul", "funk", "new wave", "chillwave",
    "shibuya-kei", "soft synth", "exotica", "lounge", "balearic", "neo-psychedelia",
    "chamber folk", "nu jazz", "jazztronica", "future funk", "mallsoft", "hypnagogic pop",
    "slowcore", "sadcore", "ambient folk", "hip hop", "acoustic", "singer-songwriter", "world",
    "reggae", "roots", "motown", "disco", "post-disco", "boogie", "smooth jazz",
    "meditation", "spiritual", "ethereal wave", "dream trance", "lofi hip hop",
    "blues", "r&b", "neo-soul", "americana", "bluegrass", "folk", "orchestral", "film score",
    "salsa", "latin", "afrobeat", "ska", "rocksteady", "grunge", "punk", "garage rock",
    "britpop", "indie rock", "indie folk", "traditional pop", "vocal jazz", "swing", "bebop",
];

/// Cold: デジタル、精密、アグレッシブ、機械的、シンセティック
#[rustfmt::skip]
pub const COLD_GENRES: &[&str] = &[
    "vocaloid", "avant garde", "trance", "techno",
    "electronic", "electronica", "darksynth", "cyberpunk", "industrial", "ebm", "aggrotech", "glitch",
    "idm", "drum and bass", "neurofunk", "breakcore", "hardstyle",
    "minimal techno", "dark ambient", "drone", "phonk", "witch house",
    "power noise", "digital hardcore", "dubstep", "future garage", "trap",
    "experimental electronic", "grime", "electro-industrial", "hardcore",
    "dark electro", "ebm-industrial", "breakbeat", "jungle", "footwork",
    "ghettotech", "minimalism", "noise", "harsh noise", "power electronics",
    "death industrial", "dark psy", "hi-tech", "forest psy", "glitch hop",
    "complextro", "fidget house", "metal", "heavy metal", "death metal",
    "black metal", "industrial metal", "math rock", "mathcore", "post-punk",
    "cold wave", "minimal wave", "dark wave", "dungeon synth", "sovietwave",
    "house", "deep house", "tech house", "progressive house", "acid house",
    "psytrance", "progressive trance", "uplifting trance", "goa trance",
    "electro", "synthpop", "electropop", "hyperpop", "pc music", "k-pop", "j-pop",
    "future bass", "gabber", "speedcore", "terrorcore", "uk garage", "bass music",
];

/// ビルトイン語彙を所有文字列のリストとして取得
pub fn builtin_warm() -> Vec<String> {
    WARM_GENRES.iter().map(|s| s.to_string()).collect()
}

pub fn builtin_cold() -> Vec<String> {
    COLD_GENRES.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genre::normalize;

    #[test]
    fn test_builtin_lists_exist() {
        assert!(!WARM_GENRES.is_empty());
        assert!(!COLD_GENRES.is_empty());
        assert!(WARM_GENRES.contains(&"jazz"));
        assert!(COLD_GENRES.contains(&"techno"));
    }

    #[test]
    fn test_builtin_entries_are_not_blank() {
        for genre in WARM_GENRES.iter().chain(COLD_GENRES) {
            assert!(!normalize(genre).is_empty(), "blank entry: {:?}", genre);
        }
    }

    #[test]
    fn test_owned_copies_match() {
        assert_eq!(builtin_warm().len(), WARM_GENRES.len());
        assert_eq!(builtin_cold()[0], COLD_GENRES[0]);
    }
}
