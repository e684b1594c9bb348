//! 検索エンジン
//!
//! 大文字小文字を無視したリテラル部分文字列検索。正規表現は使わない。
//! 先頭から末尾へ走査し、マッチのたびにその長さ分だけ進める
//! （重なり合うマッチは拾わない）。見つけた全マッチをハイライト用の
//! マークとして記録し、走査で最後に見つかったマッチを返す。

use crate::buffer::{Location, TextBuffer};

/// ハイライト対象のマッチ範囲
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchMark {
    pub start: Location,
    pub end: Location,
}

/// 検索状態（マークの記録を持つ）
#[derive(Debug, Default)]
pub struct SearchEngine {
    marks: Vec<SearchMark>,
}

impl SearchEngine {
    pub fn new() -> Self {
        Self { marks: Vec::new() }
    }

    /// 現在のマーク一覧
    pub fn marks(&self) -> &[SearchMark] {
        &self.marks
    }

    /// マークをすべて消す
    pub fn clear_marks(&mut self) {
        self.marks.clear();
    }

    /// バッファ内を検索し、左から右への走査で最後のマッチを返す
    ///
    /// 呼び出しごとに以前のマークは置き換えられる。
    /// 空の検索語はマークを消して走査せずに `None`。
    pub fn find_last(&mut self, buffer: &TextBuffer, term: &str) -> Option<SearchMark> {
        self.marks.clear();
        if term.is_empty() {
            return None;
        }

        let chars: Vec<char> = buffer.content().chars().collect();
        let term_chars: Vec<char> = term.chars().collect();
        if term_chars.len() > chars.len() {
            return None;
        }

        // 文字ごとの位置情報を前計算（末尾の1つ先も含む）
        let mut line = 1usize;
        let mut column = 0usize;
        let mut positions = Vec::with_capacity(chars.len() + 1);
        for ch in &chars {
            positions.push(Location::new(line, column));
            if *ch == '\n' {
                line += 1;
                column = 0;
            } else {
                column += 1;
            }
        }
        positions.push(Location::new(line, column));

        let mut i = 0;
        while i + term_chars.len() <= chars.len() {
            let matched = term_chars
                .iter()
                .enumerate()
                .all(|(offset, tc)| chars_equal(chars[i + offset], *tc));

            if matched {
                self.marks.push(SearchMark {
                    start: positions[i],
                    end: positions[i + term_chars.len()],
                });
                i += term_chars.len();
            } else {
                i += 1;
            }
        }

        self.marks.last().copied()
    }
}

/// 大文字小文字を無視した文字比較（簡易ケースフォールディング）
fn chars_equal(a: char, b: char) -> bool {
    if a == b {
        return true;
    }
    a.to_lowercase().to_string() == b.to_lowercase().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::TextBuffer;

    #[test]
    fn finds_last_match_and_marks_all() {
        let buffer = TextBuffer::from_str("hello world hello");
        let mut engine = SearchEngine::new();

        let last = engine.find_last(&buffer, "hello").unwrap();
        assert_eq!(engine.marks().len(), 2);
        assert_eq!(last.start, Location::new(1, 12));
        assert_eq!(last.end, Location::new(1, 17));
    }

    #[test]
    fn search_is_case_insensitive() {
        let buffer = TextBuffer::from_str("Hello WORLD");
        let mut engine = SearchEngine::new();

        let last = engine.find_last(&buffer, "world").unwrap();
        assert_eq!(last.start, Location::new(1, 6));
    }

    #[test]
    fn empty_term_clears_marks_without_scanning() {
        let buffer = TextBuffer::from_str("aaa");
        let mut engine = SearchEngine::new();

        engine.find_last(&buffer, "a");
        assert!(!engine.marks().is_empty());

        assert!(engine.find_last(&buffer, "").is_none());
        assert!(engine.marks().is_empty());
    }

    #[test]
    fn matches_do_not_overlap() {
        let buffer = TextBuffer::from_str("aaaa");
        let mut engine = SearchEngine::new();

        let last = engine.find_last(&buffer, "aa").unwrap();
        assert_eq!(engine.marks().len(), 2);
        assert_eq!(engine.marks()[0].start, Location::new(1, 0));
        assert_eq!(engine.marks()[1].start, Location::new(1, 2));
        assert_eq!(last.start, Location::new(1, 2));
    }

    #[test]
    fn marks_span_lines() {
        let buffer = TextBuffer::from_str("one\ntwo\nneedle here");
        let mut engine = SearchEngine::new();

        let last = engine.find_last(&buffer, "needle").unwrap();
        assert_eq!(last.start, Location::new(3, 0));
        assert_eq!(last.end, Location::new(3, 6));
    }

    #[test]
    fn fresh_call_replaces_prior_marks() {
        let buffer = TextBuffer::from_str("abc abc xyz");
        let mut engine = SearchEngine::new();

        engine.find_last(&buffer, "abc");
        assert_eq!(engine.marks().len(), 2);

        engine.find_last(&buffer, "xyz");
        assert_eq!(engine.marks().len(), 1);
        assert_eq!(engine.marks()[0].start, Location::new(1, 8));
    }
}
