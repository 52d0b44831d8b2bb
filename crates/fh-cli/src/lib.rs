//! FutureHouse platform CLI library

pub mod config;
pub mod error;
pub mod output;
pub mod task;

// Re-export CLI types for testing
pub use clap::{Parser, Subcommand};

/// Environment variable consulted when `--api-key` is not given.
pub const API_KEY_ENV: &str = "FUTUREHOUSE_API_KEY";

#[derive(Parser)]
#[command(name = "fh")]
#[command(about = "FutureHouse platform CLI")]
#[command(version, author, long_about = None)]
pub struct Cli {
    /// API key for the FutureHouse platform (falls back to FUTUREHOUSE_API_KEY)
    #[arg(long, value_name = "KEY", global = true)]
    pub api_key: Option<String>,

    /// Base URL of the task service
    #[arg(
        long,
        value_name = "URL",
        global = true,
        env = "FUTUREHOUSE_BASE_URL",
        default_value = fh_rest_client::DEFAULT_BASE_URL
    )]
    pub base_url: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Submit a task and print its identifier
    Create(task::CreateArgs),
    /// Submit a task and wait for its result
    Run(task::RunArgs),
    /// Submit a task and wait for its result on the concurrent path
    Arun(task::RunArgs),
    /// Submit a batch of tasks and wait for all results
    Batch(task::BatchArgs),
    /// Submit a batch of tasks and wait for all results concurrently
    Abatch(task::BatchArgs),
    /// Print the status of a task
    Status(task::StatusArgs),
    /// Print the result of a task
    Result(task::ResultArgs),
}
