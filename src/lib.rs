//! tallypad - 文字数カウント付きスクラッチパッドエディタ
//!
//! 下書きテキストの編集と、ワーク開始位置・区切り行を考慮した
//! ライブ文字数カウントを提供する。

// コアモジュール
pub mod config;
pub mod error;
pub mod logging;

// データ層
pub mod buffer;
pub mod file;

// ロジック層
pub mod count;
pub mod input;
pub mod search;
pub mod session;

// 拡張ブリッジ
pub mod extensions;

// 表示層
pub mod app;
pub mod ui;

// 公開API
pub use app::App;
pub use config::AppConfig;
pub use error::{Result, TallypadError};
pub use session::Session;
