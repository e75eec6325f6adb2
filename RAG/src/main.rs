use anyhow::Result;
use pdf_qa::{DocumentProcessor, GeminiConfig, GeminiService, QaChain};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let Some(pdf_path) = std::env::args().nth(1).map(PathBuf::from) else {
        eprintln!("usage: pdf-qa <file.pdf>");
        std::process::exit(2);
    };

    let gemini_service = Arc::new(GeminiService::new(GeminiConfig::from_env()?));
    let processor = DocumentProcessor::new();

    let chain = {
        let path = pdf_path.clone();
        tokio::task::spawn_blocking(move || QaChain::from_pdf(&processor, &path, gemini_service))
            .await??
    };
    log::info!("Indexed {} chunks from {}", chain.chunk_count(), pdf_path.display());
    println!("PDF loaded! You can start asking questions.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let question = line.trim();
        if question.is_empty() {
            continue;
        }

        match chain.invoke(question).await {
            Ok(answer) => println!("{answer}"),
            Err(e) => {
                log::error!("Failed to answer question: {e:#}");
                eprintln!("error: {e:#}");
            }
        }
    }

    Ok(())
}
