//! バッファセッション
//!
//! 可変テキストバッファ本体と、カウント起点（ワーク開始位置）、
//! 終了確認を制御する編集カウンタ、現在の保存先を一括して所有する。
//! これらはグローバルにせず、必要とするヘルパーへ参照で渡す。
//!
//! すべての操作はイベントハンドラ内で同期的に完結し、カウントと
//! 検索マークはバッファを変えた同じ呼び出しの中で再計算される。

use crate::buffer::{Location, PositionSpec, TextBuffer};
use crate::config::AppConfig;
use crate::count::{count_full_range, count_selection, CountReport};
use crate::error::{FileError, Result, TallypadError, TransformError};
use crate::extensions::{InputMode, TextTransform};
use crate::file;
use crate::logging::Logger;
use crate::search::{SearchEngine, SearchMark};
use std::path::{Path, PathBuf};

/// 保存の種類
///
/// ショートカット保存はショートカット打鍵2回分をカウンタから
/// 余分に差し引く。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveKind {
    /// ショートカットによる保存
    Plain,
    /// メニュー相当の保存（保存先のステータス行を出す）
    WithMessage,
}

/// 編集キーの分類
///
/// カウント再計算の対象は Backspace / Enter / Space / Insert / Delete。
/// それ以外のキーはバッファだけを変え、表示カウントは次の対象キー
/// または選択変更まで据え置かれる。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKey {
    Backspace,
    Enter,
    Space,
    Insert,
    Delete,
    Other,
}

impl EditKey {
    /// このキーで表示カウントを更新するか
    pub fn updates_count(self) -> bool {
        !matches!(self, EditKey::Other)
    }
}

/// カーソル移動の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    BufferStart,
    BufferEnd,
}

/// 終了要求への判定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitDecision {
    /// 未保存の変更なし。そのまま終了してよい
    Proceed,
    /// 確認が必要（しきい値超過分の編集数を添える）
    Confirm { unsaved: i64 },
}

/// バッファセッション
pub struct Session {
    buffer: TextBuffer,
    cursor: Location,
    selection_anchor: Option<Location>,
    work_start: Location,
    changes: i64,
    threshold: i64,
    save_location: PathBuf,
    search: SearchEngine,
    logger: Logger,
    count_line: String,
}

impl Session {
    /// セッションを作成し、保存先ファイルの自動読み込みを試みる
    ///
    /// ファイルが無ければ空バッファで開始する（致命的にしない）。
    pub fn new(config: &AppConfig, logger: Logger) -> Self {
        let mut session = Self {
            buffer: TextBuffer::new(),
            cursor: Location::ORIGIN,
            selection_anchor: None,
            work_start: Location::ORIGIN,
            changes: -config.changes_threshold,
            threshold: config.changes_threshold,
            save_location: config.save_location.clone(),
            search: SearchEngine::new(),
            logger,
            count_line: String::new(),
        };
        session.load_initial();
        session
    }

    fn load_initial(&mut self) {
        match file::read_file(&self.save_location) {
            Ok(content) => {
                self.buffer = TextBuffer::from_str(&content);
            }
            Err(TallypadError::File(FileError::NotFound { .. })) => {
                self.logger.status("(file not found: start blank file)");
            }
            Err(err) => {
                self.logger
                    .error(format!("起動時の読み込みに失敗: {}", err));
            }
        }
        self.refresh_count_full();
    }

    // ---- 参照系 --------------------------------------------------------

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn cursor(&self) -> Location {
        self.cursor
    }

    pub fn work_start(&self) -> Location {
        self.work_start
    }

    pub fn changes(&self) -> i64 {
        self.changes
    }

    pub fn save_location(&self) -> &Path {
        &self.save_location
    }

    /// 表示中のカウント行
    pub fn count_line(&self) -> &str {
        &self.count_line
    }

    /// 検索ハイライト用のマーク一覧
    pub fn search_marks(&self) -> &[SearchMark] {
        self.search.marks()
    }

    /// 正規化した選択範囲（空なら `None`）
    pub fn selection_range(&self) -> Option<(Location, Location)> {
        let anchor = self.selection_anchor?;
        if anchor == self.cursor {
            return None;
        }
        if anchor < self.cursor {
            Some((anchor, self.cursor))
        } else {
            Some((self.cursor, anchor))
        }
    }

    // ---- カウント ------------------------------------------------------

    /// ワーク開始位置から末尾までの全範囲カウントを表示に反映する
    pub fn refresh_count_full(&mut self) {
        let report = self.full_range_report();
        self.count_line = report.display();
    }

    /// 選択があれば選択範囲、無ければ全範囲カウント
    pub fn on_selection_or_click(&mut self) {
        match self.selection_range() {
            Some((from, to)) => {
                let report = count_selection(&self.buffer.text_range(from, to));
                self.count_line = report.display();
            }
            None => self.refresh_count_full(),
        }
    }

    fn full_range_report(&self) -> CountReport {
        count_full_range(&self.buffer.text_from(self.work_start))
    }

    // ---- 編集 ----------------------------------------------------------

    /// 編集キーの共通処理
    ///
    /// カウンタは常に進め、表示カウントは対象キーのみ再計算する。
    pub fn on_edit(&mut self, key: EditKey) {
        self.changes += 1;
        if key.updates_count() {
            self.refresh_count_full();
        }
    }

    /// カーソル位置に1文字挿入する
    pub fn insert_char(&mut self, ch: char) {
        self.selection_anchor = None;
        self.cursor = self.buffer.insert_char(self.cursor, ch);
    }

    /// カーソル位置に改行を挿入する
    pub fn insert_newline(&mut self) {
        self.selection_anchor = None;
        self.cursor = self.buffer.insert(self.cursor, "\n");
    }

    /// Backspace（選択があれば選択を削除）
    pub fn delete_backward(&mut self) {
        if let Some((from, to)) = self.selection_range() {
            self.buffer.delete_range(from, to);
            self.cursor = from;
            self.selection_anchor = None;
            return;
        }
        self.cursor = self.buffer.delete_backward(self.cursor);
    }

    /// Delete（選択があれば選択を削除）
    pub fn delete_forward(&mut self) {
        if let Some((from, to)) = self.selection_range() {
            self.buffer.delete_range(from, to);
            self.cursor = from;
            self.selection_anchor = None;
            return;
        }
        self.buffer.delete_forward(self.cursor);
    }

    /// カーソルを移動する（`select` で選択を伸ばす）
    pub fn move_cursor(&mut self, movement: Movement, select: bool) {
        if select {
            if self.selection_anchor.is_none() {
                self.selection_anchor = Some(self.cursor);
            }
        } else {
            self.selection_anchor = None;
        }

        let cursor = self.buffer.clamp(self.cursor);
        self.cursor = match movement {
            Movement::Left => {
                let offset = self.buffer.char_offset(cursor);
                self.buffer.location_at_offset(offset.saturating_sub(1))
            }
            Movement::Right => self.buffer.advance(cursor, 1),
            Movement::Up => self
                .buffer
                .clamp(Location::new(cursor.line.saturating_sub(1).max(1), cursor.column)),
            Movement::Down => self
                .buffer
                .clamp(Location::new(cursor.line + 1, cursor.column)),
            Movement::LineStart => Location::new(cursor.line, 0),
            Movement::LineEnd => Location::new(cursor.line, self.buffer.line_len(cursor.line)),
            Movement::BufferStart => Location::ORIGIN,
            Movement::BufferEnd => self.buffer.end_location(),
        };

        // 選択・クリック変化はその場でカウント表示を追従させる
        self.on_selection_or_click();
    }

    // ---- ファイル操作 --------------------------------------------------

    /// 保存先へバッファ全体を書き出す
    ///
    /// 書き出すテキストは全体読み出しから暗黙の末尾改行を除いたもの。
    /// 保存カウントはワーク開始位置に依存せず、保存テキスト全体を数える。
    pub fn save(&mut self, kind: SaveKind) -> Result<()> {
        let whole = self.buffer.text_from(Location::ORIGIN);
        let text = whole.strip_suffix('\n').unwrap_or(&whole);
        file::write_file(&self.save_location, text)?;

        let report = count_full_range(&whole);
        self.count_line = report.display_saved();

        self.changes = match kind {
            // ショートカットの Ctrl と S の2打鍵分を差し引く
            SaveKind::Plain => -self.threshold - 2,
            SaveKind::WithMessage => -self.threshold,
        };

        if kind == SaveKind::WithMessage {
            self.logger.status(format!(
                "Saved to {}. Shortcut: Ctrl-S",
                self.save_location.display()
            ));
        }
        Ok(())
    }

    /// ファイルを開く（`clear = true`）／結合する（`clear = false`）
    ///
    /// 結合では、ワーク相対のテキストが空でなければまず区切り
    /// `"\n---\n"` を先頭に挿入し、その後で新しい内容を先頭に挿入する
    /// （旧内容は区切りの後ろへ押し出され、ライブカウントから外れる）。
    /// 開く場合は旧内容を破棄し、保存先も置き換える。
    /// ファイル欠落はログだけ残してバッファを変えない。
    pub fn open_or_join(&mut self, path: PathBuf, clear: bool) -> Result<()> {
        self.logger.status(format!(
            "Current save location is {}",
            self.save_location.display()
        ));

        let content = match file::read_file(&path) {
            Ok(content) => content,
            Err(TallypadError::File(FileError::NotFound { .. })) => {
                self.logger.status("(file not found: keeping old data)");
                return Ok(());
            }
            Err(err) => return Err(err),
        };

        if clear {
            self.buffer.clear();
            self.save_location = path;
            self.logger.status(format!(
                "Set new save location to {}",
                self.save_location.display()
            ));
        } else if self.buffer.text_from(self.work_start).chars().count() > 1 {
            self.buffer.insert(Location::ORIGIN, "\n---\n");
        }

        self.buffer.insert(Location::ORIGIN, &content);
        self.cursor = Location::ORIGIN;
        self.selection_anchor = None;
        self.search.clear_marks();
        self.refresh_count_full();
        Ok(())
    }

    /// 保存先だけを差し替える（読み込みはしない）
    ///
    /// ディレクトリは保存先として受け付けない。
    pub fn set_file(&mut self, path: PathBuf) {
        if path.is_dir() {
            self.logger
                .warning(format!("{} はディレクトリのため保存先にしない", path.display()));
            return;
        }
        self.save_location = path;
        self.logger.status(format!(
            "Set new save location to {}",
            self.save_location.display()
        ));
    }

    // ---- 位置・検索 ----------------------------------------------------

    /// カウント起点を設定する
    ///
    /// `None`（空入力）は現状維持。起点より前の領域は UI が毎回
    /// `[(1,0), work_start)` を淡色で塗り直す。
    pub fn set_count_start(&mut self, spec: Option<PositionSpec>) {
        self.logger.status(format!(
            "Current work start position is {}",
            self.work_start
        ));
        if let Some(spec) = spec {
            self.work_start = self.buffer.resolve(spec);
            self.logger.status(format!(
                "Set new work start position to {}",
                self.work_start
            ));
        }
    }

    /// 指定位置へカーソルを移す
    pub fn seek(&mut self, spec: PositionSpec) {
        self.cursor = self.buffer.resolve(spec);
        self.selection_anchor = None;
        self.logger
            .status(format!("Seek to {}", self.cursor));
    }

    /// 検索して最後のマッチへ選択付きでジャンプする
    ///
    /// 空の検索語はマークを消すだけ。マッチした場合は選択と
    /// キャレットをマッチ範囲に合わせる。
    pub fn search(&mut self, term: &str) -> Option<SearchMark> {
        let found = self.search.find_last(&self.buffer, term);

        match found {
            Some(mark) => {
                self.selection_anchor = Some(mark.start);
                self.cursor = mark.end;
                self.logger.status(format!(
                    "Found {} at {} ({} matches)",
                    term,
                    mark.start,
                    self.search.marks().len()
                ));
                self.on_selection_or_click();
            }
            None if !term.is_empty() => {
                self.logger.status(format!("{} not found", term));
            }
            None => {}
        }
        found
    }

    // ---- 拡張ブリッジ --------------------------------------------------

    /// ワーク開始位置から末尾までのテキスト（末尾改行は除去）
    pub fn work_range_text(&self) -> String {
        let mut text = self.buffer.text_from(self.work_start);
        text.pop();
        text
    }

    /// プロバイダを適用し、テキスト結果ならバッファ全体を置き換える
    ///
    /// 失敗時はバッファに触れず診断をログする（部分適用はしない）。
    pub fn apply_transform(
        &mut self,
        provider: &dyn TextTransform,
        prompt_input: Option<&str>,
    ) -> std::result::Result<(), TransformError> {
        let input = match provider.input_mode() {
            InputMode::WorkRange => self.work_range_text(),
            InputMode::Prompt => prompt_input.unwrap_or("").to_string(),
        };

        if input.is_empty() {
            let err = TransformError::Failed {
                message: "empty input".to_string(),
            };
            self.logger
                .status(format!("Module execution failed\n... {}", err));
            return Err(err);
        }

        match provider.transform(&input) {
            Ok(text) => {
                self.buffer.replace_all(&text);
                self.cursor = Location::ORIGIN;
                self.selection_anchor = None;
                self.search.clear_marks();
                self.refresh_count_full();
                self.logger.status(format!(
                    "Replaced buffer with {} output ({} characters)",
                    provider.name(),
                    self.buffer.char_count()
                ));
                Ok(())
            }
            Err(err) => {
                self.logger
                    .status(format!("Module execution failed\n... {}", err));
                Err(err)
            }
        }
    }

    // ---- 終了ゲート ----------------------------------------------------

    /// 終了してよいか判定する
    ///
    /// カウンタが負なら無条件で進む。それ以外は確認が必要。
    pub fn request_exit(&self) -> ExitDecision {
        if self.changes < 0 {
            ExitDecision::Proceed
        } else {
            ExitDecision::Confirm {
                unsaved: self.changes + self.threshold,
            }
        }
    }
}
