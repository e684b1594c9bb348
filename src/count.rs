//! 範囲カウンタ
//!
//! 文字数・改行除外文字数・単語数を計算する。対象テキストは
//! 区切りトークン `---` の最初の出現で打ち切られる（結合済みの
//! 旧文書をライブカウントから除外するため）。
//!
//! 全範囲モード（`add_to_count = 0`）はバッファ全体読み出しの
//! 暗黙の末尾改行1つを `-1` で相殺する。選択範囲モード
//! （`add_to_count = 1`）は選択に末尾改行が無いため補正を打ち消す。

/// 区切りトークン。これ以降の内容はカウント対象外
pub const SEPARATOR: &str = "---";

/// カウント結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountReport {
    /// 文字数（補正込み）
    pub characters: i64,
    /// 改行を除いた文字数
    pub characters_without_breaks: i64,
    /// 空白区切りの単語数
    pub words: usize,
}

impl CountReport {
    /// ステータス行向けの表示
    pub fn display(&self) -> String {
        format!(
            "{} characters ({})  {} words",
            self.characters_without_breaks, self.characters, self.words
        )
    }

    /// 保存時の表示
    pub fn display_saved(&self) -> String {
        format!(
            "Saved {} characters ({})",
            self.characters_without_breaks, self.characters
        )
    }
}

/// 範囲をカウントする
///
/// `---` より後ろは数えない。単語数には補正を適用しない。
pub fn count_range(text: &str, add_to_count: i64) -> CountReport {
    let counted = match text.find(SEPARATOR) {
        Some(i) => &text[..i],
        None => text,
    };

    let characters = counted.chars().count() as i64 + add_to_count - 1;
    let line_breaks = counted.chars().filter(|&c| c == '\n').count() as i64 + add_to_count - 1;
    let words = counted.split_whitespace().count();

    CountReport {
        characters,
        characters_without_breaks: characters - line_breaks,
        words,
    }
}

/// 全範囲モード（バッファ全体読み出し向け）
pub fn count_full_range(text: &str) -> CountReport {
    count_range(text, 0)
}

/// 選択範囲モード（末尾改行のない選択テキスト向け）
pub fn count_selection(text: &str) -> CountReport {
    count_range(text, 1)
}
