//! URLクエリパラメータの復号プロバイダ
//!
//! 入力されたURLのクエリ文字列を分解し、値をパーセント復号して
//! 1行に1つずつ並べたテキストを返す。

use super::{InputMode, TextTransform};
use crate::error::TransformError;

/// `url_parameter` プロバイダ
pub struct UrlParameter;

impl TextTransform for UrlParameter {
    fn name(&self) -> &'static str {
        "url_parameter"
    }

    fn description(&self) -> &'static str {
        "Decodes all url query parameters, one per line."
    }

    fn input_mode(&self) -> InputMode {
        InputMode::Prompt
    }

    fn transform(&self, input: &str) -> Result<String, TransformError> {
        let query = query_part(input).ok_or_else(|| TransformError::Failed {
            message: format!("no query string in input: {}", input.trim()),
        })?;

        let mut values = Vec::new();
        for pair in query.split('&') {
            if pair.is_empty() {
                continue;
            }
            let value = match pair.split_once('=') {
                Some((_, v)) => v,
                None => pair,
            };
            values.push(percent_decode(value));
        }

        if values.is_empty() {
            return Err(TransformError::Failed {
                message: "query string carries no parameters".to_string(),
            });
        }

        Ok(values.join("\n"))
    }
}

/// URLからクエリ部分を取り出す
///
/// フラグメント（`#` 以降）はクエリに含めない。
fn query_part(url: &str) -> Option<&str> {
    let url = url.trim();
    let after_question = &url[url.find('?')? + 1..];
    Some(match after_question.find('#') {
        Some(i) => &after_question[..i],
        None => after_question,
    })
}

/// パーセントエンコーディングを復号する（`+` は空白）
fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'%' => match (hex_value(bytes.get(i + 1)), hex_value(bytes.get(i + 2))) {
                (Some(hi), Some(lo)) => {
                    out.push(hi * 16 + lo);
                    i += 3;
                }
                _ => {
                    out.push(b'%');
                    i += 1;
                }
            },
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }

    String::from_utf8_lossy(&out).into_owned()
}

fn hex_value(b: Option<&u8>) -> Option<u8> {
    let b = *b?;
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_query_values_one_per_line() {
        let provider = UrlParameter;
        let result = provider
            .transform("https://example.com/search?q=hello%20world&lang=ja")
            .unwrap();
        assert_eq!(result, "hello world\nja");
    }

    #[test]
    fn plus_decodes_to_space() {
        assert_eq!(percent_decode("one+two"), "one two");
    }

    #[test]
    fn invalid_escape_is_kept_literally() {
        assert_eq!(percent_decode("100%zz"), "100%zz");
    }

    #[test]
    fn url_without_query_fails_cleanly() {
        let provider = UrlParameter;
        assert!(matches!(
            provider.transform("https://example.com/plain"),
            Err(TransformError::Failed { .. })
        ));
    }

    #[test]
    fn fragment_is_excluded() {
        let provider = UrlParameter;
        let result = provider
            .transform("https://example.com/?a=1#section")
            .unwrap();
        assert_eq!(result, "1");
    }

    #[test]
    fn multibyte_values_decode_as_utf8() {
        let provider = UrlParameter;
        let result = provider
            .transform("https://example.com/?w=%E3%81%82")
            .unwrap();
        assert_eq!(result, "あ");
    }
}
