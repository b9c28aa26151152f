/*!
 * `prism coordinator`: task wiring and lifecycle
 */

use super::{parse_key_value, render, OutputFormat};
use crate::config::PrismConfig;
use crate::error::Result;
use clap::Subcommand;
use prism_connect::{PreviousService, ServiceArgs, ServiceCoordinatorClient, ServiceCoordinatorRpc};

#[derive(Debug, Clone, Subcommand)]
pub enum CoordinatorAction {
    /// Start a task
    Start {
        #[arg(long)]
        task: String,
    },

    /// Stop a task
    Stop {
        #[arg(long)]
        task: String,
    },

    /// Register the service feeding a task
    InformPrevious {
        #[arg(long)]
        task: String,

        /// Name of the upstream service
        #[arg(long)]
        name: String,

        #[arg(long)]
        ip: String,

        #[arg(long)]
        port: String,

        /// Extra argument as key=value (repeatable)
        #[arg(long = "arg", value_parser = parse_key_value)]
        args: Vec<(String, String)>,
    },

    /// Publish this service's arguments and print what the coordinator returns
    InformCurrent {
        #[arg(long)]
        task: String,

        /// Argument as key=value (repeatable)
        #[arg(long = "arg", value_parser = parse_key_value)]
        args: Vec<(String, String)>,
    },
}

pub async fn execute(
    action: CoordinatorAction,
    config: &PrismConfig,
    format: OutputFormat,
) -> Result<String> {
    let client = ServiceCoordinatorClient::new(
        config.services.coordinator.endpoint(),
        config.channel.options(),
    )?;
    run(&client, action, format).await
}

pub async fn run<R: ServiceCoordinatorRpc>(
    client: &ServiceCoordinatorClient<R>,
    action: CoordinatorAction,
    format: OutputFormat,
) -> Result<String> {
    match action {
        CoordinatorAction::Start { task } => {
            client.start(&task).await?;
            Ok(format!("Started task {}", task))
        }
        CoordinatorAction::Stop { task } => {
            client.stop(&task).await?;
            Ok(format!("Stopped task {}", task))
        }
        CoordinatorAction::InformPrevious {
            task,
            name,
            ip,
            port,
            args,
        } => {
            let previous = PreviousService::new(name, ip, port);
            let args: ServiceArgs = args.into_iter().collect();
            client
                .inform_previous_service_info(&task, &previous, &args)
                .await?;
            Ok(format!(
                "Task {} now reads from {} at {}:{}",
                task, previous.name, previous.ip, previous.port
            ))
        }
        CoordinatorAction::InformCurrent { task, args } => {
            let args: ServiceArgs = args.into_iter().collect();
            let returned = client.inform_current_service_info(&task, &args).await?;
            render(&returned, format, |returned| {
                returned
                    .iter()
                    .map(|(key, value)| format!("{}={}", key, value))
                    .collect::<Vec<_>>()
                    .join("\n")
            })
        }
    }
}
