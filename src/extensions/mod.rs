//! 拡張ブリッジ
//!
//! バッファと外部テキスト変換プロバイダの間の狭い契約。
//! プロバイダは起動時に静的に登録された閉じた集合で、
//! 実行時の動的ロードやコード評価は行わない。
//! 変換結果がテキストならバッファ全体を置き換え、
//! そうでなければ何も適用せず診断をログする（部分適用はしない）。

mod shift;
mod url_parameter;

use crate::error::TransformError;

pub use shift::ShiftLetters;
pub use url_parameter::UrlParameter;

/// プロバイダへの入力の取り方
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// ワーク開始位置から末尾までのテキスト（末尾改行は除去済み）
    WorkRange,
    /// 別途プロンプトで入力された文字列
    Prompt,
}

/// テキスト変換プロバイダ
///
/// `description` はプロンプトのヘルプ文として表示される。
pub trait TextTransform {
    /// プロバイダ名（メニュー・プロンプトでの識別子）
    fn name(&self) -> &'static str;

    /// 人間向けの説明文
    fn description(&self) -> &'static str;

    /// 入力の取り方
    fn input_mode(&self) -> InputMode;

    /// テキストを変換する
    ///
    /// `Ok` はバッファ全体を置き換えるテキスト。`Err` は適用されず
    /// 診断ログに回る。
    fn transform(&self, input: &str) -> Result<String, TransformError>;
}

/// 静的に登録されたプロバイダの一覧
pub struct ProviderRegistry {
    providers: Vec<Box<dyn TextTransform>>,
}

impl ProviderRegistry {
    /// 空のレジストリ
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// 組み込みプロバイダをすべて登録したレジストリ
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(UrlParameter));
        registry.register(Box::new(ShiftLetters::rot13()));
        registry
    }

    /// プロバイダを登録する
    pub fn register(&mut self, provider: Box<dyn TextTransform>) {
        self.providers.push(provider);
    }

    /// 名前で探す
    pub fn find(&self, name: &str) -> Option<&dyn TextTransform> {
        self.providers
            .iter()
            .map(|p| p.as_ref())
            .find(|p| p.name() == name)
    }

    /// 登録済みプロバイダ名の一覧
    pub fn names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_are_discoverable_by_name() {
        let registry = ProviderRegistry::with_builtins();
        assert!(registry.find("url_parameter").is_some());
        assert!(registry.find("shift_letters").is_some());
        assert!(registry.find("no_such_provider").is_none());
    }

    #[test]
    fn names_lists_registration_order() {
        let registry = ProviderRegistry::with_builtins();
        assert_eq!(registry.names(), vec!["url_parameter", "shift_letters"]);
    }

    #[test]
    fn providers_expose_help_text() {
        let registry = ProviderRegistry::with_builtins();
        for name in registry.names() {
            let provider = registry.find(name).unwrap();
            assert!(!provider.description().is_empty());
        }
    }
}
