use std::sync::Arc;

use anyhow::Result;
use colored::*;
use llm_qa::answer::AnswerService;
use llm_qa::config::Config;
use llm_qa::llm::APIClient;
use llm_qa::shell::{self, Shell};
use llm_qa::terminal::Terminal;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    dotenv::dotenv().ok();

    let config = Config::from_env();
    let mut terminal = Terminal::new()?;

    shell::print_banner();
    println!("\nSetting up LLM API connection...");

    let Some(credential) = shell::acquire_credential(&config, &mut terminal) else {
        println!("No API key provided. Exiting...");
        return Ok(());
    };

    let client = match APIClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("{} {:#}", "✗ Error setting up API:".red(), e);
            std::process::exit(1);
        }
    };
    log::info!("using model {}", client.model());
    println!("{}\n", "✓ API connection established successfully!".green());

    let mut shell = Shell::new(terminal, AnswerService::new(Arc::new(client)), credential);
    shell.run().await;

    Ok(())
}
