//! termsuggest 命令行入口
//!
//! 从标准输入逐行读取：
//! - `?<前缀>` 输出补全建议
//! - `?h <前缀>` 仅从历史召回
//! - `?a <命令行>` 补全命令参数
//! - 其他输入视为执行的命令，记入历史
//!
//! 输入结束时保存历史。

use anyhow::Context;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use termsuggest_lib::completion::{ArgumentCompleter, Suggestion, SuggestionEngine};
use termsuggest_lib::config::{create_default_config, ConfigReader, TerminalConfig};
use termsuggest_lib::utils::error::{app_error, app_error_with_context};
use termsuggest_lib::utils::{init_logging, AppResult};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "termsuggest", version, about = "Command suggestions for an interactive shell")]
struct Cli {
    /// 配置文件路径
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 覆盖配置中的历史文件
    #[arg(long)]
    history_file: Option<PathBuf>,

    /// 以 JSON 输出建议
    #[arg(long)]
    json: bool,

    /// 输出默认配置并退出
    #[arg(long)]
    print_default_config: bool,
}

/// 一行输入的含义
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Suggest(&'a str),
    History(&'a str),
    Arguments(&'a str),
    Command(&'a str),
}

fn parse_input(line: &str) -> Input<'_> {
    if let Some(rest) = line.strip_prefix("?h ") {
        Input::History(rest)
    } else if let Some(rest) = line.strip_prefix("?a ") {
        Input::Arguments(rest)
    } else if let Some(rest) = line.strip_prefix('?') {
        Input::Suggest(rest)
    } else {
        Input::Command(line)
    }
}

/// 应用命令行覆盖后重新修正配置，相对的历史文件同样解析到主目录下
fn apply_cli_overrides(
    mut config: TerminalConfig,
    history_file: Option<PathBuf>,
) -> TerminalConfig {
    if let Some(history_file) = history_file {
        config.history_file = history_file.to_string_lossy().into_owned();
    }
    config.normalized()
}

fn print_suggestions(suggestions: &[Suggestion], json: bool) -> AppResult<()> {
    if json {
        let output = serde_json::to_string(suggestions).context("序列化建议失败")?;
        println!("{output}");
    } else {
        for suggestion in suggestions {
            println!(
                "{:>6}  {:<6}  {}",
                suggestion.score,
                suggestion.source.to_string(),
                suggestion.command
            );
        }
    }
    Ok(())
}

fn print_words(words: &[String], json: bool) -> AppResult<()> {
    if json {
        let output = serde_json::to_string(words).context("序列化结果失败")?;
        println!("{output}");
    } else {
        for word in words {
            println!("{word}");
        }
    }
    Ok(())
}

fn print_prompt(prompt: &str) -> AppResult<()> {
    let mut stdout = std::io::stdout();
    write!(stdout, "{prompt}")
        .and_then(|_| stdout.flush())
        .map_err(app_error_with_context("写入提示符失败"))
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();

    if cli.print_default_config {
        let content =
            toml::to_string_pretty(&create_default_config()).context("序列化默认配置失败")?;
        println!("{content}");
        return Ok(());
    }

    init_logging().map_err(app_error)?;

    let config = ConfigReader::new(cli.config)
        .load_config()
        .await
        .context("加载配置失败")?;
    let config = apply_cli_overrides(config, cli.history_file);

    let engine = SuggestionEngine::with_persisted_history(&config).await;
    let completer = ArgumentCompleter::with_builtin_specs();
    let working_dir = std::env::current_dir().context("无法获取当前目录")?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    print_prompt(&config.prompt)?;

    while let Some(line) = lines.next_line().await.context("读取输入失败")? {
        match parse_input(&line) {
            Input::Suggest(prefix) => print_suggestions(&engine.suggest(prefix), cli.json)?,
            Input::History(prefix) => print_words(&engine.suggest_history(prefix), cli.json)?,
            Input::Arguments(partial) => {
                let words = completer.complete(partial, &working_dir).await;
                print_words(&words, cli.json)?;
            }
            Input::Command(command) => {
                engine.record(command);
                if command.trim() == "exit" {
                    break;
                }
            }
        }
        print_prompt(&config.prompt)?;
    }

    // 保存失败不影响退出
    match engine.save_history().await {
        Ok(()) => info!("历史已保存"),
        Err(e) => warn!("保存历史失败: {}", e),
    }

    Ok(())
}
