use anyhow::Context;
use std::path::PathBuf;
use tallypad::file::expand_path;
use tallypad::{App, AppConfig};

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = parse_args(&args)?;

    println!("tallypad - character-counting scratchpad");
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!();

    let mut app = App::new(config).context("failed to initialize application")?;
    app.run().context("application error")?;
    Ok(())
}

/// 引数を設定へ反映する
///
/// 位置引数1つを保存先パスとして受け付ける。
/// `--log-file <path>` でステータス行の追記先を指定できる。
fn parse_args(args: &[String]) -> anyhow::Result<AppConfig> {
    let mut config = AppConfig::default();

    let mut iter = args.iter().peekable();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--log-file" => {
                let path = iter
                    .next()
                    .context("--log-file requires a path argument")?;
                config.log_file = Some(PathBuf::from(path));
            }
            path if !path.starts_with('-') => {
                config.save_location = expand_path(path)
                    .with_context(|| format!("invalid save location: {}", path))?;
            }
            other => anyhow::bail!("unknown option: {}", other),
        }
    }

    Ok(config)
}
