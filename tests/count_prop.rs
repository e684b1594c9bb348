//! 範囲カウンタのプロパティテスト
//!
//! 区切りトークンによる打ち切りと、全範囲／選択範囲の補正の
//! 整合性を公開APIだけで検証する。

use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;
use tallypad::count::{count_full_range, count_selection, SEPARATOR};

/// 区切りトークンを含まない小さなテキスト
fn text_without_separator() -> impl Strategy<Value = String> {
    proptest::collection::vec(any::<char>(), 0..64)
        .prop_map(|chars| chars.into_iter().collect::<String>())
        .prop_filter("must not contain the separator token", |s| {
            !s.contains(SEPARATOR) && !s.contains('-')
        })
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 256, .. ProptestConfig::default() })]

    #[test]
    fn count_depends_only_on_text_before_the_separator(
        prefix in text_without_separator(),
        suffix in proptest::collection::vec(any::<char>(), 0..64)
            .prop_map(|chars| chars.into_iter().collect::<String>()),
    ) {
        let with_tail = format!("{}{}{}", prefix, SEPARATOR, suffix);
        prop_assert_eq!(count_full_range(&with_tail), count_full_range(&prefix));
    }

    #[test]
    fn full_range_of_text_plus_newline_matches_selection_of_text(
        text in text_without_separator(),
    ) {
        // 全体読み出しの暗黙の末尾改行を足すと、選択モードの
        // カウントと文字数が一致する
        let whole = format!("{}\n", text);
        let full = count_full_range(&whole);
        let selection = count_selection(&text);

        prop_assert_eq!(full.characters, selection.characters);
        prop_assert_eq!(
            full.characters_without_breaks,
            selection.characters_without_breaks
        );
    }

    #[test]
    fn selection_characters_match_char_count(text in text_without_separator()) {
        let report = count_selection(&text);
        prop_assert_eq!(report.characters, text.chars().count() as i64);
        prop_assert_eq!(report.words, text.split_whitespace().count());
    }

    #[test]
    fn breaks_never_exceed_characters(text in text_without_separator()) {
        let report = count_selection(&text);
        prop_assert!(report.characters_without_breaks <= report.characters);
        prop_assert!(report.characters_without_breaks >= 0);
    }
}
