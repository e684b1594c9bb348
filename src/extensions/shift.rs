//! アルファベットシフトプロバイダ
//!
//! ASCII英字を n 文字分回転させる（大文字小文字は保たれ、
//! 英字以外はそのまま）。既定は自己逆変換になる13。

use super::{InputMode, TextTransform};
use crate::error::TransformError;

/// `shift_letters` プロバイダ
pub struct ShiftLetters {
    shift: u8,
}

impl ShiftLetters {
    /// 任意のシフト量で作成（26で正規化）
    pub fn new(shift: u8) -> Self {
        Self { shift: shift % 26 }
    }

    /// ROT13（2回適用で元に戻る）
    pub fn rot13() -> Self {
        Self::new(13)
    }
}

impl TextTransform for ShiftLetters {
    fn name(&self) -> &'static str {
        "shift_letters"
    }

    fn description(&self) -> &'static str {
        "Rotates ASCII letters by 13 places (ROT13). Other characters pass through."
    }

    fn input_mode(&self) -> InputMode {
        InputMode::WorkRange
    }

    fn transform(&self, input: &str) -> Result<String, TransformError> {
        Ok(input.chars().map(|c| shift_character(c, self.shift)).collect())
    }
}

/// 1文字をシフトする
fn shift_character(ch: char, n: u8) -> char {
    let base = match ch {
        'a'..='z' => b'a',
        'A'..='Z' => b'A',
        _ => return ch,
    };
    let rotated = (ch as u8 - base + n) % 26 + base;
    rotated as char
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rot13_is_self_inverse() {
        let provider = ShiftLetters::rot13();
        let once = provider.transform("Hello, World!").unwrap();
        assert_eq!(once, "Uryyb, Jbeyq!");
        let twice = provider.transform(&once).unwrap();
        assert_eq!(twice, "Hello, World!");
    }

    #[test]
    fn non_letters_pass_through() {
        assert_eq!(shift_character('7', 13), '7');
        assert_eq!(shift_character('、', 13), '、');
        assert_eq!(shift_character(' ', 5), ' ');
    }

    #[test]
    fn shift_wraps_around_alphabet() {
        assert_eq!(shift_character('z', 1), 'a');
        assert_eq!(shift_character('Z', 2), 'B');
    }
}
