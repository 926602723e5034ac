use std::path::PathBuf;

use anyhow::Result;
use thcunews_models::ModelKind;
use thcunews_shell::{render, AnalysisOutcome, ShellHandle};
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "\
输入新闻文本（可多行），或使用命令：
  :model bert|roberta   切换模型
  :load PATH            读取 .txt 文件
  :sample               填充示例
  :clear                清空
  :analyze              开始智能识别
  :show                 显示当前状态
  :help                 帮助
  :quit                 退出";

#[derive(Debug, PartialEq)]
enum Input {
    Model(String),
    Load(PathBuf),
    Sample,
    Clear,
    Analyze,
    Show,
    Help,
    Quit,
    Append(String),
    Unknown(String),
}

fn parse_line(line: &str) -> Input {
    let trimmed = line.trim();
    let Some(command) = trimmed.strip_prefix(':') else {
        return Input::Append(line.to_string());
    };
    let (name, rest) = command
        .split_once(char::is_whitespace)
        .map(|(name, rest)| (name, rest.trim()))
        .unwrap_or((command, ""));
    match name {
        "model" => Input::Model(rest.to_string()),
        "load" => Input::Load(PathBuf::from(rest)),
        "sample" => Input::Sample,
        "clear" => Input::Clear,
        "analyze" | "run" => Input::Analyze,
        "show" => Input::Show,
        "help" => Input::Help,
        "quit" | "exit" => Input::Quit,
        other => Input::Unknown(other.to_string()),
    }
}

pub async fn run(handle: &ShellHandle) -> Result<()> {
    println!("{HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = parse_line(&line);
        if input == Input::Quit {
            break;
        }
        if let Err(error) = execute(handle, input).await {
            println!("! {error}");
        }
    }
    Ok(())
}

async fn execute(handle: &ShellHandle, input: Input) -> Result<()> {
    match input {
        Input::Model(name) => {
            let model: ModelKind = name.parse()?;
            handle.select_model(model).await?;
            println!("模型: {model}");
        }
        Input::Load(path) => {
            handle.load_file(&path).await?;
            let snapshot = handle.snapshot().await?;
            println!("已读取 {} 字", snapshot.text.chars().count());
        }
        Input::Sample => {
            handle.fill_sample().await?;
            println!("{}", handle.snapshot().await?.text);
        }
        Input::Clear => {
            handle.clear().await?;
            println!("已清空");
        }
        Input::Analyze => {
            println!("AI 思考中...");
            match handle.analyze().await? {
                AnalysisOutcome::Completed(response) => {
                    print!("{}", render::render_result(&response))
                }
                AnalysisOutcome::Discarded => println!("输入已清空，结果被丢弃"),
            }
        }
        Input::Show => print!("{}", render::render_snapshot(&handle.snapshot().await?)),
        Input::Help => println!("{HELP}"),
        Input::Append(line) => {
            let mut text = handle.snapshot().await?.text;
            if !text.is_empty() {
                text.push('\n');
            }
            text.push_str(&line);
            handle.set_text(text).await?;
        }
        Input::Unknown(name) => println!("未知命令 :{name}，输入 :help 查看帮助"),
        Input::Quit => {}
    }
    Ok(())
}
