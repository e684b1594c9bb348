//! ファイル操作モジュール
//!
//! 全ファイル読み書きの素朴なコラボレータと、パス入力の展開処理。

pub mod io;
pub mod path;

pub use io::{read_file, write_file};
pub use path::expand_path;
