//! Task Agent - Entry Point
//!
//! Interactive chat loop against an in-memory task store. Free text goes
//! through the full interpretation pipeline; a few built-ins inspect state
//! directly.

use clap::Parser;
use task_agent::command::ExecutionOutcome;
use task_agent::core::config::AgentConfig;
use task_agent::core::error::Result;
use task_agent::llm::client::LlmClient;
use task_agent::orchestrator::Orchestrator;
use task_agent::task::{MemoryTaskStore, OwnerId};

use std::io::{self, Write};
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "task-agent", about = "Natural-language task assistant")]
struct Args {
    /// Locale hint for interpretation
    #[arg(long)]
    locale: Option<String>,

    /// Auto-execute ambiguous actions without confirmation
    #[arg(long)]
    auto_execute: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "task_agent=info".into()),
        )
        .init();

    let args = Args::parse();
    let config = AgentConfig::from_env();
    let locale = args.locale.unwrap_or(config.locale.clone());
    let auto_execute = args.auto_execute || config.auto_execute;

    tracing::info!("Task Agent starting...");

    // Async runtime for the LLM calls
    let rt = Runtime::new()?;

    // Optional model client: everything still works without it through the
    // keyword fallback, minus the conversational replies.
    let llm = LlmClient::from_env().ok();
    if llm.is_none() {
        tracing::warn!("LLM_API_KEY not set - running with keyword fallback only");
    }

    let mut orchestrator = Orchestrator::new(llm, MemoryTaskStore::new());
    let owner = OwnerId(1);

    println!("\n=== TASK AGENT ===");
    println!("Ketik apa saja untuk mengelola task Anda.");
    println!();
    println!("Commands:");
    println!("  tasks / l       - Show your tasks");
    println!("  quit / q        - Exit");
    println!("  <any text>      - Natural language (e.g. \"buat todo belajar rust\")");
    println!();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        if input.is_empty() {
            continue;
        }
        if input == "quit" || input == "q" {
            break;
        }
        if input == "tasks" || input == "l" {
            let tasks = orchestrator
                .execute_action(
                    task_agent::ActionKind::ListTasks,
                    &task_agent::ActionParameters::default(),
                    owner,
                )
                .ok();
            if let Some(ExecutionOutcome::Tasks(tasks)) = tasks {
                if tasks.is_empty() {
                    println!("Belum ada task.");
                }
                for task in tasks {
                    println!(
                        "  [{}] #{} {}",
                        if task.completed { "x" } else { " " },
                        task.id,
                        task.title
                    );
                }
            }
            continue;
        }

        let response = rt.block_on(orchestrator.interpret(input, owner, &locale, auto_execute));

        println!("{}", response.reply);
        if response.executed {
            if let Some(outcome) = &response.execution_result {
                match serde_json::to_string_pretty(outcome) {
                    Ok(json) => println!("-> {}: {}", response.actions.kind.as_str(), json),
                    Err(e) => tracing::error!("failed to render outcome: {e}"),
                }
            }
        } else if let Some(error) = &response.execution_error {
            println!("-> aksi gagal: {}", error);
        }
        println!(
            "   ({} task, {} selesai, {} pending)",
            response.context.total, response.context.completed, response.context.pending
        );
    }

    Ok(())
}
