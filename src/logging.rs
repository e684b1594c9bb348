//! ロギングシステム
//!
//! 位置・保存・検索・プロバイダ実行の各操作が発する
//! 人間向けステータス行の出力基盤。診断用であり構造化APIではない。

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// ログレベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    fn tag(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }
}

/// ロガー
///
/// * 既定では stderr へ出力（TUI の画面を壊さないよう終了後に読める）
/// * 追記ファイル出力にも対応
#[derive(Debug, Clone, Default)]
pub struct Logger {
    level: Option<LogLevel>,
    output_stderr: bool,
    output_file: Option<PathBuf>,
}

impl Logger {
    /// デフォルト構築
    pub fn new(level: LogLevel) -> Self {
        Self {
            level: Some(level),
            output_stderr: true,
            output_file: None,
        }
    }

    /// 開発者向けロガー
    pub fn for_development() -> Self {
        Self::new(LogLevel::Debug)
    }

    /// 何も出力しないロガー（テスト向け）
    pub fn silent() -> Self {
        Self {
            level: None,
            output_stderr: false,
            output_file: None,
        }
    }

    /// ファイル出力を設定
    pub fn with_file_output<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.output_file = Some(path.into());
        self
    }

    fn should_log(&self, level: LogLevel) -> bool {
        match self.level {
            Some(min) => level >= min,
            None => false,
        }
    }

    fn write_line(&self, message: &str) {
        if self.output_stderr {
            eprintln!("{}", message);
        }

        if let Some(path) = &self.output_file {
            if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
                let _ = writeln!(file, "{}", message);
            }
        }
    }

    /// 任意のログレベルでメッセージを出力
    pub fn log(&self, level: LogLevel, message: impl AsRef<str>) {
        if self.should_log(level) {
            self.write_line(&format!("{}: {}", level.tag(), message.as_ref()));
        }
    }

    /// 操作ステータス行（情報レベル）
    pub fn status(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Info, message);
    }

    /// 警告ログ
    pub fn warning(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Warning, message);
    }

    /// エラーログ
    pub fn error(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Error, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logger_respects_log_level() {
        let logger = Logger::new(LogLevel::Warning);
        assert!(!logger.should_log(LogLevel::Debug));
        assert!(!logger.should_log(LogLevel::Info));
        assert!(logger.should_log(LogLevel::Warning));
        assert!(logger.should_log(LogLevel::Error));
    }

    #[test]
    fn silent_logger_logs_nothing() {
        let logger = Logger::silent();
        assert!(!logger.should_log(LogLevel::Error));
    }

    #[test]
    fn file_output_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("status.log");
        let logger = Logger {
            level: Some(LogLevel::Info),
            output_stderr: false,
            output_file: Some(path.clone()),
        };

        logger.status("saved 11 characters");
        logger.status("work start moved");

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.contains("INFO: saved 11 characters"));
    }
}
