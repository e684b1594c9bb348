//! テキストバッファ
//!
//! 行単位のテキスト格納と、位置指定の実体解決を提供する。
//! 位置の超過は常にバッファの実内容にクランプし、エラーにしない。
//! バッファ全体の読み出しには末尾の改行1つが暗黙に含まれる
//! （全範囲カウントの `-1` 補正とつり合う）。

pub mod position;

pub use position::{parse_position, PositionSpec};

/// バッファ内の実体位置（行は1始まり、列は0始まりの文字単位）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    /// バッファ先頭 `(1, 0)`
    pub const ORIGIN: Location = Location { line: 1, column: 0 };

    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.line, self.column)
    }
}

/// 行単位のテキストバッファ
///
/// 不変条件: `lines` は常に1行以上を持つ（空バッファは空行1つ）。
#[derive(Debug, Clone)]
pub struct TextBuffer {
    lines: Vec<String>,
}

impl TextBuffer {
    /// 空のバッファを作成
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
        }
    }

    /// 文字列からバッファを作成
    pub fn from_str(s: &str) -> Self {
        Self {
            lines: s.split('\n').map(|l| l.to_string()).collect(),
        }
    }

    /// 行数
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// 指定行の内容（1始まり）
    pub fn line(&self, line: usize) -> Option<&str> {
        if line == 0 {
            return None;
        }
        self.lines.get(line - 1).map(|s| s.as_str())
    }

    /// 指定行の文字数（範囲外は0）
    pub fn line_len(&self, line: usize) -> usize {
        self.line(line).map(|l| l.chars().count()).unwrap_or(0)
    }

    /// バッファ末尾の位置
    pub fn end_location(&self) -> Location {
        let line = self.lines.len();
        Location::new(line, self.line_len(line))
    }

    /// バッファが空か
    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    /// 総文字数（改行を1文字として数える、末尾の暗黙改行は含まない）
    pub fn char_count(&self) -> usize {
        let newlines = self.lines.len() - 1;
        self.lines.iter().map(|l| l.chars().count()).sum::<usize>() + newlines
    }

    /// 位置を実内容にクランプする
    pub fn clamp(&self, loc: Location) -> Location {
        let line = loc.line.clamp(1, self.lines.len());
        let column = loc.column.min(self.line_len(line));
        Location::new(line, column)
    }

    /// 位置指定を実体位置に解決する
    pub fn resolve(&self, spec: PositionSpec) -> Location {
        match spec {
            PositionSpec::Cell { line, column } => self.clamp(Location::new(line, column)),
            PositionSpec::LineEnd { line } => {
                let line = line.clamp(1, self.lines.len());
                Location::new(line, self.line_len(line))
            }
            PositionSpec::CharOffset(n) => self.location_at_offset(n),
            PositionSpec::End => self.end_location(),
        }
    }

    /// 位置→先頭からの文字オフセット
    pub fn char_offset(&self, loc: Location) -> usize {
        let loc = self.clamp(loc);
        let mut offset = 0;
        for line in 1..loc.line {
            offset += self.line_len(line) + 1; // +1 は改行
        }
        offset + loc.column
    }

    /// 先頭からの文字オフセット→位置（末尾でクランプ）
    pub fn location_at_offset(&self, n: usize) -> Location {
        let mut remaining = n;
        for (i, line) in self.lines.iter().enumerate() {
            let len = line.chars().count();
            if remaining <= len {
                return Location::new(i + 1, remaining);
            }
            remaining -= len + 1; // 改行を1文字として消費
        }
        self.end_location()
    }

    /// 位置を n 文字進める（行をまたぐ、末尾でクランプ）
    pub fn advance(&self, loc: Location, n: usize) -> Location {
        self.location_at_offset(self.char_offset(loc) + n)
    }

    /// 範囲のテキストを取得（暗黙の改行は付かない）
    pub fn text_range(&self, from: Location, to: Location) -> String {
        let from = self.clamp(from);
        let to = self.clamp(to);
        if to <= from {
            return String::new();
        }

        if from.line == to.line {
            let line = &self.lines[from.line - 1];
            return slice_chars(line, from.column, to.column);
        }

        let mut out = String::new();
        let first = &self.lines[from.line - 1];
        out.push_str(&slice_chars(first, from.column, first.chars().count()));
        for line in &self.lines[from.line..to.line - 1] {
            out.push('\n');
            out.push_str(line);
        }
        out.push('\n');
        let last = &self.lines[to.line - 1];
        out.push_str(&slice_chars(last, 0, to.column));
        out
    }

    /// 指定位置からバッファ末尾までのテキスト
    ///
    /// Tk の `get(index, END)` と同じく、末尾に改行1つが付く。
    pub fn text_from(&self, from: Location) -> String {
        let mut out = self.text_range(from, self.end_location());
        out.push('\n');
        out
    }

    /// バッファ全体のテキスト（暗黙の改行なし）
    pub fn content(&self) -> String {
        self.lines.join("\n")
    }

    /// テキストを挿入し、挿入末尾の位置を返す
    pub fn insert(&mut self, loc: Location, text: &str) -> Location {
        let loc = self.clamp(loc);
        let line = &self.lines[loc.line - 1];
        let split = byte_index(line, loc.column);
        let prefix = line[..split].to_string();
        let suffix = line[split..].to_string();

        let mut segments = text.split('\n');
        let first = segments.next().unwrap_or("");
        let rest: Vec<&str> = segments.collect();

        if rest.is_empty() {
            self.lines[loc.line - 1] = format!("{}{}{}", prefix, first, suffix);
            return Location::new(loc.line, loc.column + first.chars().count());
        }

        self.lines[loc.line - 1] = format!("{}{}", prefix, first);
        let mut insert_at = loc.line;
        for segment in &rest[..rest.len() - 1] {
            self.lines.insert(insert_at, segment.to_string());
            insert_at += 1;
        }
        let last = rest[rest.len() - 1];
        let end_column = last.chars().count();
        self.lines
            .insert(insert_at, format!("{}{}", last, suffix));
        Location::new(insert_at + 1, end_column)
    }

    /// 範囲を削除する
    pub fn delete_range(&mut self, from: Location, to: Location) {
        let from = self.clamp(from);
        let to = self.clamp(to);
        if to <= from {
            return;
        }

        let first = &self.lines[from.line - 1];
        let prefix = first[..byte_index(first, from.column)].to_string();
        let last = &self.lines[to.line - 1];
        let suffix = last[byte_index(last, to.column)..].to_string();

        self.lines
            .splice(from.line - 1..to.line, [format!("{}{}", prefix, suffix)]);
    }

    /// 全内容を破棄する
    pub fn clear(&mut self) {
        self.lines = vec![String::new()];
    }

    /// 全内容を置き換える
    pub fn replace_all(&mut self, text: &str) {
        self.lines = text.split('\n').map(|l| l.to_string()).collect();
    }

    /// 1文字挿入（カーソル編集用）
    pub fn insert_char(&mut self, loc: Location, ch: char) -> Location {
        self.insert(loc, &ch.to_string())
    }

    /// 位置直前の1文字を削除し、新しい位置を返す
    pub fn delete_backward(&mut self, loc: Location) -> Location {
        let loc = self.clamp(loc);
        if loc == Location::ORIGIN {
            return loc;
        }
        let offset = self.char_offset(loc);
        let before = self.location_at_offset(offset - 1);
        self.delete_range(before, loc);
        before
    }

    /// 位置直後の1文字を削除する
    pub fn delete_forward(&mut self, loc: Location) {
        let loc = self.clamp(loc);
        let after = self.advance(loc, 1);
        self.delete_range(loc, after);
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// 文字単位の部分スライス
fn slice_chars(s: &str, from: usize, to: usize) -> String {
    s.chars().skip(from).take(to.saturating_sub(from)).collect()
}

/// 文字数→バイト位置（行内）
fn byte_index(s: &str, chars: usize) -> usize {
    s.char_indices()
        .nth(chars)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}
