//! 位置文字列の解釈
//!
//! ユーザ入力の緩い書式（`"3.5"`、`"end"`、`"12"`、`"5.end"` など）を
//! バッファ非依存の位置指定 [`PositionSpec`] に解釈する。
//! 実体の行・列への解決と範囲クランプはバッファ側の責務。

/// 解釈済みの位置指定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionSpec {
    /// 行・列の明示指定（行は1始まり、列は0始まり）
    Cell { line: usize, column: usize },
    /// 指定行の行末
    LineEnd { line: usize },
    /// バッファ先頭から n 文字進んだ位置（行をまたいで数える）
    CharOffset(usize),
    /// バッファ末尾
    End,
}

/// 位置文字列を解釈する
///
/// * 空入力（キャンセル含む）は `None`（呼び出し側は何もしない）
/// * `"end"`（大文字小文字を問わない）はバッファ末尾
/// * `"start"` は `(1, 0)`
/// * ドットなしの数字列 `"12"` は先頭から12文字の位置
/// * `"{line}.{column}"` 形式は行・列。行トークンが数字でなければ行1、
///   列トークンは数字でなければ `end`（行末）だけを認め、他は列0
///
/// 範囲検査は行わない。行・列の超過はバッファのクランプに委ねる。
pub fn parse_position(input: &str) -> Option<PositionSpec> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if input.eq_ignore_ascii_case("end") {
        return Some(PositionSpec::End);
    }
    if input.eq_ignore_ascii_case("start") {
        return Some(PositionSpec::Cell { line: 1, column: 0 });
    }

    if !input.contains('.') {
        if let Ok(n) = input.parse::<usize>() {
            return Some(PositionSpec::CharOffset(n));
        }
        // 数字でもキーワードでもない: 既定位置 (1, 0) に落とす
        return Some(PositionSpec::Cell { line: 1, column: 0 });
    }

    let mut tokens = input.splitn(2, '.');
    let line_token = tokens.next().unwrap_or("");
    let column_token = tokens.next().unwrap_or("");

    let line = line_token.parse::<usize>().unwrap_or(1).max(1);

    if column_token.eq_ignore_ascii_case("end") {
        return Some(PositionSpec::LineEnd { line });
    }

    let column = column_token.parse::<usize>().unwrap_or(0);
    Some(PositionSpec::Cell { line, column })
}
