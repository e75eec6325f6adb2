use anyhow::Result;
use pdf_assistant_client::cli::{Command, USAGE};
use pdf_assistant_client::{
    Assistant, AssistantClient, ClientConfig, ClientError, PdfFile, TerminalView, View,
};
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let command = match Command::parse(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{e}\n\n{USAGE}");
            std::process::exit(2);
        }
    };

    let config = ClientConfig::from_env();
    log::info!("Using backend {}", config.base_url());
    let mut assistant = Assistant::new(AssistantClient::new(config), TerminalView::stdio());

    let outcome = match command {
        Command::Help => {
            println!("{USAGE}");
            Ok(())
        }
        Command::Health => assistant.client().health().await.map(|health| {
            println!("{}", health.status);
        }),
        Command::Upload(path) => upload(&mut assistant, path.as_deref()).await,
        Command::Ask(question) => assistant.ask(&question).await.map(drop),
        Command::Chat(path) => chat(&mut assistant, path.as_deref()).await,
    };

    if let Err(e) = outcome {
        // The view already told the user about a missing file.
        if !matches!(e, ClientError::NoFileSelected) {
            log::error!("{e}");
        }
        std::process::exit(1);
    }

    Ok(())
}

async fn upload<V: View>(assistant: &mut Assistant<V>, path: Option<&Path>) -> Result<(), ClientError> {
    let file = match path {
        Some(path) => Some(PdfFile::from_path(path).await?),
        None => None,
    };
    assistant.upload(file.as_ref()).await.map(drop)
}

async fn chat<V: View>(assistant: &mut Assistant<V>, path: Option<&Path>) -> Result<(), ClientError> {
    if path.is_some() {
        upload(assistant, path).await?;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|source| ClientError::Io {
            path: "<stdin>".to_string(),
            source,
        })?
    {
        if let Err(e) = assistant.ask(&line).await {
            log::error!("{e}");
        }
    }

    Ok(())
}
