//! メインアプリケーション
//!
//! セッション・プロバイダレジストリ・描画器を束ね、端末の
//! イベントループを回す。各イベントの処理は同期的に完結し、
//! カウントとマークの再計算を次のイベントへ持ち越さない。
//! ダイアログ類はすべてミニバッファのプロンプトで代替する。

use crate::buffer::parse_position;
use crate::config::AppConfig;
use crate::error::{Result, TallypadError};
use crate::extensions::{InputMode, ProviderRegistry};
use crate::file::expand_path;
use crate::input::{classify_edit_key, map_key, Command};
use crate::logging::Logger;
use crate::session::{EditKey, ExitDecision, SaveKind, Session};
use crate::ui::{MinibufferState, Renderer};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::stdout;
use std::time::Duration;

/// 位置入力プロンプトの補足説明
const POSITION_INSTRUCTION: &str =
    "{line}.{character} / {line}.start / {line}.end / start / end";

/// 開いているプロンプトの種類
#[derive(Debug, Clone, PartialEq, Eq)]
enum PromptKind {
    Seek,
    CountStart,
    Search,
    OpenPath,
    JoinPath,
    NewPath,
    ProviderName,
    ProviderInput { name: String },
    ConfirmExit,
}

/// メインアプリケーション
pub struct App {
    session: Session,
    registry: ProviderRegistry,
    logger: Logger,
    renderer: Renderer,
    minibuffer: MinibufferState,
    prompt: Option<PromptKind>,
    running: bool,
}

impl App {
    /// 設定からアプリケーションを組み立てる
    ///
    /// 保存先ファイルの自動読み込みを試みる（欠落は致命的にしない）。
    pub fn new(config: AppConfig) -> Result<Self> {
        let logger = match &config.log_file {
            Some(path) => Logger::for_development().with_file_output(path),
            None => Logger::for_development(),
        };
        Self::with_logger(config, logger)
    }

    fn with_logger(config: AppConfig, logger: Logger) -> Result<Self> {
        let session = Session::new(&config, logger.clone());

        Ok(Self {
            session,
            registry: ProviderRegistry::with_builtins(),
            logger,
            renderer: Renderer::new(),
            minibuffer: MinibufferState::Normal,
            prompt: None,
            running: true,
        })
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// 端末を初期化してイベントループを実行する
    pub fn run(&mut self) -> Result<()> {
        enter_terminal()?;

        let backend = CrosstermBackend::new(stdout());
        let mut terminal =
            Terminal::new(backend).map_err(|err| terminal_error("terminal init", err))?;

        let loop_result = self.event_loop(&mut terminal);
        drop(terminal);
        let cleanup_result = leave_terminal();

        loop_result.and(cleanup_result)
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<()> {
        while self.running {
            terminal
                .draw(|frame| self.renderer.render(frame, &self.session, &self.minibuffer))
                .map_err(|err| terminal_error("render", err))?;

            if event::poll(Duration::from_millis(250))
                .map_err(|err| terminal_error("event poll", err))?
            {
                match event::read().map_err(|err| terminal_error("event read", err))? {
                    Event::Key(key_event) if key_event.kind != KeyEventKind::Release => {
                        self.handle_key_event(key_event);
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }

    /// キーイベント1件を処理する
    pub fn handle_key_event(&mut self, event: KeyEvent) {
        if self.prompt.is_some() {
            self.handle_prompt_key(event);
            return;
        }

        // 新しい操作でメッセージ表示は消える
        if matches!(self.minibuffer, MinibufferState::Message { .. }) {
            self.minibuffer = MinibufferState::Normal;
        }

        match map_key(&event) {
            Command::Insert(ch) => {
                self.session.insert_char(ch);
                self.session.on_edit(classify_edit_key(event.code));
            }
            Command::Newline => {
                self.session.insert_newline();
                self.session.on_edit(EditKey::Enter);
            }
            Command::Backspace => {
                self.session.delete_backward();
                self.session.on_edit(EditKey::Backspace);
            }
            Command::DeleteForward => {
                self.session.delete_forward();
                self.session.on_edit(EditKey::Delete);
            }
            Command::Move(movement, select) => {
                self.session.move_cursor(movement, select);
            }
            Command::Save => self.save(SaveKind::Plain),
            Command::SaveWithMessage => self.save(SaveKind::WithMessage),
            Command::OpenFile => self.open_prompt(PromptKind::OpenPath, "Open file"),
            Command::JoinFile => self.open_prompt(PromptKind::JoinPath, "Join file"),
            Command::NewFile => self.open_prompt(PromptKind::NewPath, "New save location"),
            Command::Seek => self.open_prompt(
                PromptKind::Seek,
                &format!("Seek to {}", POSITION_INSTRUCTION),
            ),
            Command::CountStart => self.open_prompt(
                PromptKind::CountStart,
                &format!("Begin the character count from {}", POSITION_INSTRUCTION),
            ),
            Command::Search => self.open_prompt(PromptKind::Search, "Search (case-insensitive)"),
            Command::RunProvider => {
                let label = format!("Run provider [{}]", self.registry.names().join(", "));
                self.open_prompt(PromptKind::ProviderName, &label);
            }
            Command::Quit => self.request_exit(),
            Command::Noop => {
                // Insert キーは編集カウンタとカウント更新の対象
                if event.code == KeyCode::Insert {
                    self.session.on_edit(EditKey::Insert);
                }
            }
        }
    }

    fn save(&mut self, kind: SaveKind) {
        match self.session.save(kind) {
            Ok(()) => {
                self.minibuffer = MinibufferState::Message {
                    text: self.session.count_line().to_string(),
                    is_error: false,
                };
            }
            Err(err) => self.show_error(format!("保存に失敗しました: {}", err)),
        }
    }

    fn request_exit(&mut self) {
        match self.session.request_exit() {
            ExitDecision::Proceed => self.running = false,
            ExitDecision::Confirm { unsaved } => {
                self.prompt = Some(PromptKind::ConfirmExit);
                self.minibuffer = MinibufferState::Prompt {
                    label: format!("Close application? Changes ({}) not saved. y/n", unsaved),
                    input: String::new(),
                };
            }
        }
    }

    fn open_prompt(&mut self, kind: PromptKind, label: &str) {
        self.prompt = Some(kind);
        self.minibuffer = MinibufferState::Prompt {
            label: label.to_string(),
            input: String::new(),
        };
    }

    fn handle_prompt_key(&mut self, event: KeyEvent) {
        let Some(kind) = self.prompt.clone() else {
            return;
        };

        // 終了確認は y/n の一打で決める
        if kind == PromptKind::ConfirmExit {
            match event.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => self.running = false,
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => self.close_prompt(),
                _ => {}
            }
            return;
        }

        match event.code {
            KeyCode::Esc => {
                self.logger.status("Cancelled");
                self.close_prompt();
            }
            KeyCode::Enter => {
                let input = match &self.minibuffer {
                    MinibufferState::Prompt { input, .. } => input.clone(),
                    _ => String::new(),
                };
                self.close_prompt();
                self.submit_prompt(kind, input);
            }
            KeyCode::Backspace => {
                if let MinibufferState::Prompt { input, .. } = &mut self.minibuffer {
                    input.pop();
                }
            }
            KeyCode::Char(ch) => {
                if let MinibufferState::Prompt { input, .. } = &mut self.minibuffer {
                    input.push(ch);
                }
            }
            _ => {}
        }
    }

    fn close_prompt(&mut self) {
        self.prompt = None;
        self.minibuffer = MinibufferState::Normal;
    }

    /// プロンプト入力の確定処理
    ///
    /// 空入力は一律で「何もしない」（エラーにしない）。
    fn submit_prompt(&mut self, kind: PromptKind, input: String) {
        match kind {
            PromptKind::Seek => {
                if let Some(spec) = parse_position(&input) {
                    self.session.seek(spec);
                }
            }
            PromptKind::CountStart => {
                self.session.set_count_start(parse_position(&input));
            }
            PromptKind::Search => {
                let found = self.session.search(&input);
                if !input.is_empty() && found.is_none() {
                    self.show_message(format!("{} not found", input));
                }
            }
            PromptKind::OpenPath => self.open_or_join(&input, true),
            PromptKind::JoinPath => self.open_or_join(&input, false),
            PromptKind::NewPath => {
                if input.is_empty() {
                    return;
                }
                match expand_path(&input) {
                    Ok(path) => self.session.set_file(path),
                    Err(err) => self.show_error(err.to_string()),
                }
            }
            PromptKind::ProviderName => self.start_provider(&input),
            PromptKind::ProviderInput { name } => self.run_provider(&name, Some(&input)),
            PromptKind::ConfirmExit => {}
        }
    }

    fn open_or_join(&mut self, input: &str, clear: bool) {
        if input.is_empty() {
            return;
        }
        match expand_path(input) {
            Ok(path) => {
                if let Err(err) = self.session.open_or_join(path, clear) {
                    self.show_error(err.to_string());
                }
            }
            Err(err) => self.show_error(err.to_string()),
        }
    }

    /// プロバイダ名の確定。入力の取り方に応じて追加プロンプトを出す
    fn start_provider(&mut self, name: &str) {
        if name.is_empty() {
            return;
        }
        let Some(provider) = self.registry.find(name) else {
            self.show_error(format!("Provider not found: {}", name));
            return;
        };

        match provider.input_mode() {
            InputMode::WorkRange => {
                let name = name.to_string();
                self.run_provider(&name, None);
            }
            InputMode::Prompt => {
                // 説明文をそのままプロンプトのヘルプにする
                let label = provider.description().to_string();
                self.open_prompt(
                    PromptKind::ProviderInput {
                        name: name.to_string(),
                    },
                    &label,
                );
            }
        }
    }

    fn run_provider(&mut self, name: &str, prompt_input: Option<&str>) {
        let Some(provider) = self.registry.find(name) else {
            self.show_error(format!("Provider not found: {}", name));
            return;
        };

        match self.session.apply_transform(provider, prompt_input) {
            Ok(()) => self.show_message(self.session.count_line().to_string()),
            Err(err) => self.show_error(err.to_string()),
        }
    }

    fn show_message(&mut self, text: String) {
        self.minibuffer = MinibufferState::Message {
            text,
            is_error: false,
        };
    }

    fn show_error(&mut self, text: String) {
        self.logger.error(&text);
        self.minibuffer = MinibufferState::Message {
            text,
            is_error: true,
        };
    }
}

fn enter_terminal() -> Result<()> {
    enable_raw_mode().map_err(|err| terminal_error("enable raw mode", err))?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen)
        .map_err(|err| terminal_error("enter alternate screen", err))?;
    Ok(())
}

fn leave_terminal() -> Result<()> {
    let mut out = stdout();
    execute!(out, LeaveAlternateScreen)
        .map_err(|err| terminal_error("leave alternate screen", err))?;
    disable_raw_mode().map_err(|err| terminal_error("disable raw mode", err))?;
    Ok(())
}

fn terminal_error(context: &str, err: impl std::fmt::Display) -> TallypadError {
    TallypadError::Ui(format!("{}: {}", context, err))
}
