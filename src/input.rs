//! キー入力の解釈
//!
//! crossterm のキーイベントをアプリケーションコマンドへ写像する。
//! メニューの代わりに Ctrl 系ショートカットを使う。

use crate::session::{EditKey, Movement};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// アプリケーションコマンド
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// 文字の挿入
    Insert(char),
    /// 改行の挿入
    Newline,
    /// 直前を削除
    Backspace,
    /// 直後を削除
    DeleteForward,
    /// カーソル移動（`true` で選択を伸ばす）
    Move(Movement, bool),
    /// ショートカット保存
    Save,
    /// メッセージ付き保存
    SaveWithMessage,
    /// ファイルを開く
    OpenFile,
    /// ファイルを結合する
    JoinFile,
    /// 保存先の設定（読み込みなし）
    NewFile,
    /// 位置ジャンプ
    Seek,
    /// カウント起点の設定
    CountStart,
    /// 検索
    Search,
    /// プロバイダ実行
    RunProvider,
    /// 終了要求
    Quit,
    /// 何もしない
    Noop,
}

/// キーイベントをコマンドに写像する
pub fn map_key(event: &KeyEvent) -> Command {
    let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
    let shift = event.modifiers.contains(KeyModifiers::SHIFT);

    if ctrl {
        return match event.code {
            KeyCode::Char('s') => Command::Save,
            KeyCode::Char('w') => Command::SaveWithMessage,
            KeyCode::Char('o') => Command::OpenFile,
            KeyCode::Char('j') => Command::JoinFile,
            KeyCode::Char('n') => Command::NewFile,
            KeyCode::Char('g') => Command::Seek,
            KeyCode::Char('t') => Command::CountStart,
            KeyCode::Char('f') => Command::Search,
            KeyCode::Char('r') => Command::RunProvider,
            KeyCode::Char('q') => Command::Quit,
            _ => Command::Noop,
        };
    }

    match event.code {
        KeyCode::Char(ch) => Command::Insert(ch),
        KeyCode::Enter => Command::Newline,
        KeyCode::Backspace => Command::Backspace,
        KeyCode::Delete => Command::DeleteForward,
        KeyCode::Left => Command::Move(Movement::Left, shift),
        KeyCode::Right => Command::Move(Movement::Right, shift),
        KeyCode::Up => Command::Move(Movement::Up, shift),
        KeyCode::Down => Command::Move(Movement::Down, shift),
        KeyCode::Home => Command::Move(Movement::LineStart, shift),
        KeyCode::End => Command::Move(Movement::LineEnd, shift),
        _ => Command::Noop,
    }
}

/// カウント更新ゲート用のキー分類
pub fn classify_edit_key(code: KeyCode) -> EditKey {
    match code {
        KeyCode::Backspace => EditKey::Backspace,
        KeyCode::Enter => EditKey::Enter,
        KeyCode::Char(' ') => EditKey::Space,
        KeyCode::Insert => EditKey::Insert,
        KeyCode::Delete => EditKey::Delete,
        _ => EditKey::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn ctrl_s_saves() {
        let command = map_key(&key(KeyCode::Char('s'), KeyModifiers::CONTROL));
        assert_eq!(command, Command::Save);
    }

    #[test]
    fn plain_char_inserts() {
        let command = map_key(&key(KeyCode::Char('a'), KeyModifiers::NONE));
        assert_eq!(command, Command::Insert('a'));
    }

    #[test]
    fn shift_arrow_extends_selection() {
        let command = map_key(&key(KeyCode::Right, KeyModifiers::SHIFT));
        assert_eq!(command, Command::Move(Movement::Right, true));

        let command = map_key(&key(KeyCode::Right, KeyModifiers::NONE));
        assert_eq!(command, Command::Move(Movement::Right, false));
    }

    #[test]
    fn qualifying_keys_are_classified() {
        assert_eq!(classify_edit_key(KeyCode::Backspace), EditKey::Backspace);
        assert_eq!(classify_edit_key(KeyCode::Enter), EditKey::Enter);
        assert_eq!(classify_edit_key(KeyCode::Char(' ')), EditKey::Space);
        assert_eq!(classify_edit_key(KeyCode::Insert), EditKey::Insert);
        assert_eq!(classify_edit_key(KeyCode::Delete), EditKey::Delete);
        assert_eq!(classify_edit_key(KeyCode::Char('x')), EditKey::Other);
    }
}
