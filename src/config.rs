//! アプリケーション設定
//!
//! 起動時に決まる設定値。設定ファイルは持たず、Default と
//! コマンドライン引数（保存先パス）だけで構成する。

use std::path::PathBuf;

/// 既定の保存ファイル名（起動時に自動で開く）
pub const DEFAULT_SAVE_FILE: &str = "tallypad_save.txt";

/// アプリケーション設定
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// 終了確認が必要になるまでの編集回数しきい値
    pub changes_threshold: i64,
    /// 起動時に読み込む保存先ファイル
    pub save_location: PathBuf,
    /// ステータス行ログの追記先（None なら stderr のみ）
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            changes_threshold: 40,
            save_location: default_save_location(),
            log_file: None,
        }
    }
}

impl AppConfig {
    /// 保存先を指定して構築
    pub fn with_save_location<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            save_location: path.into(),
            ..Self::default()
        }
    }
}

/// 既定の保存先を決める
///
/// ホームディレクトリが取得できない環境ではカレントディレクトリ直下。
fn default_save_location() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_SAVE_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_threshold_is_forty() {
        let config = AppConfig::default();
        assert_eq!(config.changes_threshold, 40);
    }

    #[test]
    fn default_save_location_uses_standard_file_name() {
        let config = AppConfig::default();
        assert_eq!(
            config.save_location.file_name().unwrap().to_str().unwrap(),
            DEFAULT_SAVE_FILE
        );
    }

    #[test]
    fn with_save_location_overrides_path() {
        let config = AppConfig::with_save_location("/tmp/notes.txt");
        assert_eq!(config.save_location, PathBuf::from("/tmp/notes.txt"));
        assert_eq!(config.changes_threshold, 40);
    }
}
