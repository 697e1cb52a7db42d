//! A command-line front-end for the task list view

use std::error::Error;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use tasks_view::client::Client;
use tasks_view::resource::StaticToken;
use tasks_view::traits::{AlertSink, Navigator};
use tasks_view::{TaskId, TaskListView};

#[derive(Parser)]
#[command(name = "tasks", about = "Manage your tasks from a terminal")]
struct Cli {
    /// Base URL of the task API [default: the configured endpoint]
    #[arg(long, env = "TASKS_API_URL", global = true)]
    url: Option<String>,

    /// Identity token sent as a bearer credential
    #[arg(long, env = "TASKS_ID_TOKEN", global = true, hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List tasks
    List,

    /// Create a task, due in a week
    Add {
        /// Task name
        name: String,
    },

    /// Mark a task as done (or not done, if it already is)
    Done {
        /// Task ID
        id: String,
    },

    /// Delete a task
    Rm {
        /// Task ID
        id: String,
    },

    /// Print the path of the edit screen of a task
    Edit {
        /// Task ID
        id: String,
    },
}

/// Alerts are written to stderr
struct StderrAlerts;

impl AlertSink for StderrAlerts {
    fn alert(&self, message: &str) {
        eprintln!("error: {}", message);
    }
}

/// There is no edit screen in a terminal: the path is printed instead
struct PrintNavigator;

impl Navigator for PrintNavigator {
    fn push(&self, path: &str) {
        println!("{}", path);
    }
}


#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let cli = Cli::parse();
    if let Some(url) = &cli.url {
        tasks_view::config::set_api_endpoint(url);
    }
    let token = match cli.token {
        Some(token) => token,
        None => return Err("An identity token is required (use --token or TASKS_ID_TOKEN)".into()),
    };

    let client = Client::from_config(Arc::new(StaticToken::new(token)))?;
    log::debug!("Using task API at {}", client.url());
    let view = TaskListView::new(client, PrintNavigator, StderrAlerts);

    if let Command::Edit { id } = &cli.command {
        view.navigate_to_edit(&TaskId::from(id.as_str()));
        return Ok(());
    }

    view.mount().await?;
    match cli.command {
        Command::List | Command::Edit { .. } => {},
        Command::Add { name } => {
            view.update_new_task_name(name);
            let id = view.create_task().await?;
            log::info!("Created task {}", id);
        },
        Command::Done { id } => view.toggle_task_done(&TaskId::from(id)).await?,
        Command::Rm { id } => view.delete_task(&TaskId::from(id)).await?,
    }

    print!("{}", view.render());
    Ok(())
}
