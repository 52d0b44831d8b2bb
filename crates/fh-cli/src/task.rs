//! Task command arguments, payload construction, and dispatch

use std::path::{Path, PathBuf};

use clap::Args;
use fh_client_api::TaskServiceApi;
use fh_rest_api_contract::{validation, JobName, RuntimeConfig, TaskRequest, TaskResult};
use serde_json::Value;
use uuid::Uuid;

use crate::error::{CliError, CliResult};
use crate::output::{CommandOutput, OutputValue};
use crate::Commands;

/// Options shared by every task-submitting command
#[derive(Args)]
pub struct TaskOptions {
    /// Agent to run (CROW, FALCON, OWL, PHOENIX, DUMMY, or a raw job name)
    #[arg(long, value_name = "AGENT")]
    pub name: JobName,

    /// Query or instruction for the agent
    #[arg(long, value_name = "TEXT")]
    pub query: String,

    /// Identifier to assign to the task
    #[arg(long, value_name = "UUID")]
    pub task_id: Option<Uuid>,

    /// Continue from a previous task
    #[arg(long, value_name = "UUID")]
    pub continued_task_id: Option<Uuid>,

    /// Server-side timeout in seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Cap on agent steps
    #[arg(long, value_name = "N")]
    pub max_steps: Option<u32>,

    /// Extra runtime configuration as a JSON object
    #[arg(long, value_name = "JSON")]
    pub runtime_config: Option<String>,
}

impl TaskOptions {
    /// Build and validate the request this invocation describes.
    pub fn build_request(&self) -> CliResult<TaskRequest> {
        let mut config = match &self.runtime_config {
            Some(json) => validation::parse_runtime_config(json)
                .map_err(|e| CliError::usage(format!("invalid --runtime-config: {}", e)))?,
            None => RuntimeConfig::default(),
        };
        // Explicit flags win over entries supplied through --runtime-config.
        config.continued_task_id = self.continued_task_id.or(config.continued_task_id);
        config.timeout = self.timeout.or(config.timeout);
        config.max_steps = self.max_steps.or(config.max_steps);

        let request = TaskRequest {
            name: self.name.clone(),
            query: self.query.clone(),
            id: self.task_id,
            runtime_config: if config.is_empty() { None } else { Some(config) },
        };
        validation::validate_task_request(&request)?;
        Ok(request)
    }
}

/// Arguments for `create`
#[derive(Args)]
pub struct CreateArgs {
    #[command(flatten)]
    pub task: TaskOptions,
}

/// Arguments for `run` and `arun`
#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub task: TaskOptions,

    /// Ask the service for detailed results
    #[arg(long)]
    pub verbose: bool,
}

/// Arguments for `batch` and `abatch`
#[derive(Args)]
pub struct BatchArgs {
    /// Path to a JSON file holding an array of task requests
    #[arg(long, value_name = "FILE")]
    pub file: PathBuf,

    /// Ask the service for detailed results
    #[arg(long)]
    pub verbose: bool,
}

/// Arguments for `status`
#[derive(Args)]
pub struct StatusArgs {
    /// Task identifier
    #[arg(value_name = "TASK_ID")]
    pub task_id: String,
}

/// Arguments for `result`
#[derive(Args)]
pub struct ResultArgs {
    /// Task identifier
    #[arg(value_name = "TASK_ID")]
    pub task_id: String,

    /// Ask the service for detailed results
    #[arg(long)]
    pub verbose: bool,
}

/// Execute one parsed command against the given service.
pub async fn dispatch(command: Commands, client: &dyn TaskServiceApi) -> CliResult<CommandOutput> {
    match command {
        Commands::Create(args) => {
            let request = args.task.build_request()?;
            let task_id = client.create_task(&request).await?;
            Ok(CommandOutput::Text(task_id))
        }
        Commands::Run(args) => {
            let request = args.task.build_request()?;
            let results = client.run_tasks_until_done(&[request], args.verbose).await?;
            Ok(CommandOutput::Json(single_result(results).into_json()))
        }
        Commands::Arun(args) => {
            let request = args.task.build_request()?;
            let results = client
                .arun_tasks_until_done(&[request], args.verbose)
                .await?;
            Ok(CommandOutput::Json(single_result(results).into_json()))
        }
        Commands::Batch(args) => {
            let requests = load_batch(&args.file).await?;
            let results = client.run_tasks_until_done(&requests, args.verbose).await?;
            Ok(CommandOutput::Json(OutputValue::sequence(results).into_json()))
        }
        Commands::Abatch(args) => {
            let requests = load_batch(&args.file).await?;
            let results = client
                .arun_tasks_until_done(&requests, args.verbose)
                .await?;
            Ok(CommandOutput::Json(OutputValue::sequence(results).into_json()))
        }
        Commands::Status(args) => {
            let status = client.get_task_status(&args.task_id).await?;
            Ok(CommandOutput::Json(OutputValue::structured(&status)?.into_json()))
        }
        Commands::Result(args) => {
            let result = fetch_result(client, &args.task_id, args.verbose).await?;
            Ok(CommandOutput::Json(OutputValue::Plain(result).into_json()))
        }
    }
}

/// `run` and `arun` submit exactly one task; its result prints alone.
fn single_result(mut results: Vec<TaskResult>) -> OutputValue {
    if results.is_empty() {
        OutputValue::Plain(Value::Null)
    } else {
        OutputValue::Plain(results.swap_remove(0))
    }
}

async fn fetch_result(
    client: &dyn TaskServiceApi,
    task_id: &str,
    verbose: bool,
) -> CliResult<TaskResult> {
    match client.get_task_result(task_id, verbose).await {
        Ok(result) => Ok(result),
        // Older service builds only expose the whole-record route.
        Err(err) if err.is_unsupported() => {
            tracing::debug!(task_id, "result route unsupported, using legacy task record");
            Ok(client.get_task(task_id).await?)
        }
        Err(err) => Err(err.into()),
    }
}

async fn load_batch(path: &Path) -> CliResult<Vec<TaskRequest>> {
    let text = tokio::fs::read_to_string(path).await.map_err(|e| {
        CliError::usage(format!("cannot read batch file {}: {}", path.display(), e))
    })?;
    let requests = validation::parse_task_batch(&text)
        .map_err(|e| CliError::usage(format!("invalid batch file {}: {}", path.display(), e)))?;
    Ok(requests)
}
