//! `agentwiki chat` — Interactive or single-question mode.

use agentwiki_agent::{ChatTurn, RetrieverAgent};
use agentwiki_config::AppConfig;
use agentwiki_retriever::WikipediaRetriever;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{self, AsyncBufReadExt, BufReader};

pub async fn run(
    message: Option<String>,
    with_history: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    // Check for API key early — give a clear error
    if !config.has_api_key() {
        eprintln!();
        eprintln!("  ERROR: No API key configured!");
        eprintln!();
        eprintln!("  Set one of these environment variables:");
        eprintln!("    ANTHROPIC_API_KEY = 'sk-ant-...'");
        eprintln!("    AGENTWIKI_API_KEY = 'sk-ant-...'");
        eprintln!();
        eprintln!("  Or add it to your config file:");
        eprintln!("    {}", AppConfig::config_dir().join("config.toml").display());
        eprintln!();
        return Err("No API key found. See above for setup instructions.".into());
    }

    let model = agentwiki_providers::build_model(&config)?;
    let retriever = Arc::new(WikipediaRetriever::new(&config.retriever));

    let agent = RetrieverAgent::new(model, retriever, &config.model, config.temperature)
        .with_max_tokens(config.max_tokens)
        .with_max_iterations(config.max_iterations);

    if let Some(question) = message {
        // Single question mode
        eprint!("  Searching...");
        let answer = agent.answer(&question).await?;
        eprint!("\r              \r");
        println!("{answer}");
        return Ok(());
    }

    // Interactive mode
    println!();
    println!("  agentwiki — ask me anything, I'll check Wikipedia.");
    println!();
    println!("  Model:     {}", config.model);
    println!("  Retriever: wikipedia ({})", config.retriever.api_url);
    if with_history {
        println!("  History:   prior turns are threaded into each prompt");
    }
    println!();
    println!("  Type your question and press Enter.");
    println!("  Type 'exit' or Ctrl+D to quit.");
    println!();

    let stdin = io::stdin();
    let reader = BufReader::new(stdin);
    let mut lines = reader.lines();
    let mut history: Vec<ChatTurn> = Vec::new();

    prompt_marker()?;
    while let Some(line) = lines.next_line().await? {
        let question = line.trim().to_string();
        if question.is_empty() {
            prompt_marker()?;
            continue;
        }
        if matches!(question.as_str(), "exit" | "quit" | "/exit" | "/quit" | ":q") {
            break;
        }

        eprint!("  Searching...");
        let result = if with_history {
            agent.answer_with_history(&question, &history).await
        } else {
            agent.answer(&question).await
        };
        eprint!("\r              \r");

        match result {
            Ok(answer) => {
                println!();
                println!("  {answer}");
                println!();
                if with_history {
                    history.push(ChatTurn::new(question, answer));
                }
            }
            Err(e) => {
                eprintln!();
                eprintln!("  Error: {e}");
                eprintln!();
            }
        }

        prompt_marker()?;
    }

    Ok(())
}

fn prompt_marker() -> Result<(), Box<dyn std::error::Error>> {
    print!("  You > ");
    std::io::stdout().flush()?;
    Ok(())
}
