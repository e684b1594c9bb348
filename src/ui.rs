//! 画面描画
//!
//! 上段のステータス行（カウント表示）、中央のテキストエリア、
//! 下段のミニバッファ行を描画する。テキストエリアは検索マークを
//! 強調表示し、カウント起点より前の領域を淡色で塗る。

use crate::buffer::Location;
use crate::session::Session;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthChar;

/// ミニバッファ行の状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MinibufferState {
    /// 通常状態（何も表示しない）
    Normal,
    /// プロンプト表示（ユーザー入力待ち）
    Prompt { label: String, input: String },
    /// メッセージ表示
    Message { text: String, is_error: bool },
}

/// 画面描画器
#[derive(Debug, Default)]
pub struct Renderer {
    /// テキストエリア先頭に表示する行（1始まり）
    scroll_top: usize,
}

impl Renderer {
    pub fn new() -> Self {
        Self { scroll_top: 1 }
    }

    /// 1フレームを描画する
    pub fn render(&mut self, frame: &mut Frame<'_>, session: &Session, minibuffer: &MinibufferState) {
        let [status_area, text_area, minibuffer_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        self.render_status(frame, status_area, session);
        self.render_text(frame, text_area, session, minibuffer);
        self.render_minibuffer(frame, minibuffer_area, minibuffer);
    }

    fn render_status(&self, frame: &mut Frame<'_>, area: Rect, session: &Session) {
        let line = Line::from(vec![
            Span::styled(
                session.count_line().to_string(),
                Style::default().fg(Color::DarkGray),
            ),
            Span::raw("  |  "),
            Span::styled(
                session.save_location().display().to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_text(
        &mut self,
        frame: &mut Frame<'_>,
        area: Rect,
        session: &Session,
        minibuffer: &MinibufferState,
    ) {
        let cursor = session.cursor();
        self.adjust_scroll(cursor.line, area.height as usize);

        let buffer = session.buffer();
        let last_visible = self.scroll_top + area.height.saturating_sub(1) as usize;
        let mut lines = Vec::new();

        for line_no in self.scroll_top..=last_visible.min(buffer.line_count()) {
            lines.push(self.style_line(session, line_no));
        }

        frame.render_widget(Paragraph::new(lines), area);

        // プロンプト入力中はカーソルをミニバッファ側に出す
        if matches!(minibuffer, MinibufferState::Prompt { .. }) {
            return;
        }
        if cursor.line >= self.scroll_top && cursor.line <= last_visible {
            let row = (cursor.line - self.scroll_top) as u16;
            let column = display_width(buffer.line(cursor.line).unwrap_or(""), cursor.column);
            frame.set_cursor_position((area.x + column as u16, area.y + row));
        }
    }

    /// 1行ぶんのスパン列を組み立てる
    ///
    /// 文字ごとにスタイルを決め、連続する同スタイルをまとめる。
    fn style_line(&self, session: &Session, line_no: usize) -> Line<'static> {
        let buffer = session.buffer();
        let content = buffer.line(line_no).unwrap_or("");
        if content.is_empty() {
            return Line::default();
        }

        let work_start = session.work_start();
        let selection = session.selection_range();
        let marks = session.search_marks();

        let mut spans: Vec<Span<'static>> = Vec::new();
        let mut run = String::new();
        let mut run_style = None;

        for (column, ch) in content.chars().enumerate() {
            let loc = Location::new(line_no, column);

            let mut style = Style::default();
            if loc < work_start {
                style = style.fg(Color::DarkGray);
            }
            if marks.iter().any(|m| m.start <= loc && loc < m.end) {
                style = style.bg(Color::Yellow).fg(Color::Black);
            }
            if let Some((from, to)) = selection {
                if from <= loc && loc < to {
                    style = style.bg(Color::Blue).fg(Color::White);
                }
            }

            match run_style {
                Some(current) if current == style => run.push(ch),
                Some(current) => {
                    spans.push(Span::styled(std::mem::take(&mut run), current));
                    run.push(ch);
                    run_style = Some(style);
                }
                None => {
                    run.push(ch);
                    run_style = Some(style);
                }
            }
        }

        if let Some(style) = run_style {
            spans.push(Span::styled(run, style));
        }
        Line::from(spans)
    }

    fn render_minibuffer(&self, frame: &mut Frame<'_>, area: Rect, state: &MinibufferState) {
        let line = match state {
            MinibufferState::Normal => Line::default(),
            MinibufferState::Prompt { label, input } => {
                let text = format!("{}: {}", label, input);
                let width = text
                    .chars()
                    .map(|c| c.width().unwrap_or(0))
                    .sum::<usize>();
                frame.set_cursor_position((area.x + width as u16, area.y));
                Line::from(text)
            }
            MinibufferState::Message { text, is_error } => {
                let style = if *is_error {
                    Style::default().fg(Color::Red)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                Line::from(Span::styled(text.clone(), style))
            }
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    /// カーソル行が見えるようにスクロール位置を寄せる
    fn adjust_scroll(&mut self, cursor_line: usize, height: usize) {
        if height == 0 {
            return;
        }
        if cursor_line < self.scroll_top {
            self.scroll_top = cursor_line;
        } else if cursor_line >= self.scroll_top + height {
            self.scroll_top = cursor_line + 1 - height;
        }
        self.scroll_top = self.scroll_top.max(1);
    }
}

/// 行内の表示幅（列位置まで）
fn display_width(line: &str, column: usize) -> usize {
    line.chars()
        .take(column)
        .map(|c| c.width().unwrap_or(0))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_follows_cursor() {
        let mut renderer = Renderer::new();

        renderer.adjust_scroll(30, 10);
        assert_eq!(renderer.scroll_top, 21);

        renderer.adjust_scroll(5, 10);
        assert_eq!(renderer.scroll_top, 5);

        renderer.adjust_scroll(7, 10);
        assert_eq!(renderer.scroll_top, 5);
    }

    #[test]
    fn display_width_counts_wide_chars() {
        assert_eq!(display_width("abあc", 3), 4);
        assert_eq!(display_width("abc", 2), 2);
    }
}
