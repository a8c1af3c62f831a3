use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use client_core::{SelectedFile, SessionEvent, WizardController};
use shared::domain::{Sender, WizardStep};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

mod config;

#[derive(Parser, Debug)]
struct Args {
    /// Backend base URL; overrides docchat.toml and DOCCHAT_SERVER_URL.
    #[arg(long)]
    server_url: Option<String>,
    /// PDF to preselect before the first /upload.
    #[arg(long)]
    file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let mut settings = config::load_settings();
    if let Some(url) = args.server_url {
        settings.server_url = url;
    }
    debug!(server_url = %settings.server_url, "starting document chat");

    let controller = WizardController::over_http(settings.server_url.clone());

    if let Some(path) = args.file {
        select_path(&controller, &path).await?;
    }

    spawn_transcript_printer(&controller);

    println!("docchat connected to {}", settings.server_url);
    print_help();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim().to_string();
        if line.is_empty() {
            continue;
        }
        match line.strip_prefix('/') {
            Some(rest) => {
                if !run_command(&controller, rest).await? {
                    break;
                }
            }
            None => {
                controller.update_question_input(line).await;
                controller.submit_question().await;
            }
        }
    }

    Ok(())
}

/// Runs one slash command; returns false when the loop should exit.
async fn run_command(controller: &WizardController, rest: &str) -> Result<bool> {
    let mut parts = rest.splitn(2, ' ');
    let command = parts.next().unwrap_or_default();
    let argument = parts.next().unwrap_or("").trim();

    match command {
        "open" => {
            if argument.is_empty() {
                println!("usage: /open <path-to-pdf>");
            } else if let Err(err) = select_path(controller, Path::new(argument)).await {
                println!("could not read {argument}: {err}");
            }
        }
        "upload" => {
            if let Err(err) = controller.upload_selected_file().await {
                println!("{err}");
            }
        }
        "suggest" => {
            controller.update_question_input(argument).await;
            let session = controller.snapshot().await;
            if session.suggestions.is_empty() {
                println!("no matching suggestions");
            }
            for (index, suggestion) in session.suggestions.iter().enumerate() {
                println!("  {}: {suggestion}", index + 1);
            }
        }
        "pick" => match argument.parse::<usize>() {
            Ok(index) if index >= 1 => {
                let session = controller.snapshot().await;
                match session.suggestions.get(index - 1) {
                    Some(suggestion) => {
                        controller.pick_suggestion(suggestion.clone()).await;
                        println!("question set: {suggestion} (submit with /send)");
                    }
                    None => println!("no suggestion #{index}; run /suggest first"),
                }
            }
            _ => println!("usage: /pick <number>"),
        },
        "send" => {
            controller.submit_question().await;
        }
        "new" => {
            controller.start_new_document().await;
            println!("ready for a new document");
        }
        "again" => {
            controller.start_new_question().await;
            println!("ask another question");
        }
        "state" => {
            let session = controller.snapshot().await;
            let step = match session.step {
                WizardStep::AwaitingUpload => "awaiting upload",
                WizardStep::Asking => "asking",
                WizardStep::Answered => "answered",
            };
            println!(
                "step: {step}; document: {}; {} transcript entries",
                session
                    .document_id
                    .map(|id| id.0.to_string())
                    .unwrap_or_else(|| "none".to_string()),
                session.messages.len()
            );
        }
        "help" => print_help(),
        "quit" | "exit" => return Ok(false),
        other => println!("unknown command: /{other} (try /help)"),
    }
    Ok(true)
}

async fn select_path(controller: &WizardController, path: &Path) -> Result<()> {
    let bytes = tokio::fs::read(path).await?;
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document.pdf".to_string());
    println!("selected {} ({} bytes)", path.display(), bytes.len());
    controller.select_file(SelectedFile { filename, bytes }).await;
    Ok(())
}

fn spawn_transcript_printer(controller: &WizardController) {
    let mut events = controller.subscribe_events();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                SessionEvent::MessageAppended(message) => {
                    let tag = match message.sender {
                        Sender::User => "you",
                        Sender::System => "system",
                        Sender::Bot => "bot",
                    };
                    println!("[{tag}] {}", message.text);
                }
                SessionEvent::StepChanged(WizardStep::Answered) => {
                    println!("(answered; /again to ask more, /new for a new document)");
                }
                SessionEvent::StepChanged(_) => {}
                SessionEvent::SessionReset => {
                    println!("-- transcript cleared --");
                }
            }
        }
    });
}

fn print_help() {
    println!("commands:");
    println!("  /open <path>     select a PDF");
    println!("  /upload          upload the selected PDF");
    println!("  /suggest <text>  list suggested questions matching <text>");
    println!("  /pick <n>        adopt suggestion n as the pending question");
    println!("  /send            submit the pending question");
    println!("  /again           ask another question about the same document");
    println!("  /new             start over with a new document");
    println!("  /state           show the wizard state");
    println!("  /quit            exit");
    println!("any other text is asked as a question about the document");
}
