//! Subcommands and their handlers.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Subcommand, ValueEnum};
use log::info;
use taskdesk_api::{ApiError, Backend};
use taskdesk_core::export::ExportFile;
use taskdesk_core::import::PreviewRow;
use taskdesk_core::{TaskId, UserProfile};

#[derive(Subcommand)]
pub enum Commands {
    /// Print core health and version.
    Ping,

    /// Save the caller's profile; the first profile becomes admin.
    Init {
        /// Display name of the caller.
        #[arg(long)]
        name: String,
    },

    /// Import clients from a CSV file.
    ImportClients {
        file: PathBuf,
        /// Validate and print rows without writing.
        #[arg(long)]
        preview: bool,
    },

    /// Import tasks from a CSV file.
    ImportTasks {
        file: PathBuf,
        #[arg(long)]
        preview: bool,
    },

    /// Import team members from a CSV file (at most 20 per file).
    ImportTeam {
        file: PathBuf,
        #[arg(long)]
        preview: bool,
    },

    /// Write the task report CSV.
    ExportTasks {
        /// Comma-separated task ids; all tasks when omitted.
        #[arg(long, value_delimiter = ',')]
        ids: Vec<TaskId>,
        /// Output directory.
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },

    /// Write the caller's to-do list CSV.
    ExportTodos {
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },

    /// Write an import template CSV.
    Template {
        #[arg(value_enum)]
        kind: TemplateKind,
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },

    /// Print revenue totals and due-date counts.
    Dashboard,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum TemplateKind {
    Clients,
    Tasks,
    Team,
}

#[derive(Debug)]
pub enum CliError {
    Api(ApiError),
    Io { path: PathBuf, source: std::io::Error },
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Api(err) => write!(f, "{err}"),
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Api(err) => Some(err),
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<ApiError> for CliError {
    fn from(value: ApiError) -> Self {
        Self::Api(value)
    }
}

type CliResult<T> = Result<T, CliError>;

pub fn run(backend: &Backend, command: Commands) -> CliResult<()> {
    match command {
        Commands::Ping => {
            println!("taskdesk_core ping={}", taskdesk_api::ping());
            println!("taskdesk_core version={}", taskdesk_api::core_version());
        }
        Commands::Init { name } => {
            backend.save_caller_user_profile(&UserProfile {
                name,
                role: String::new(),
            })?;
            println!(
                "{} saved as {}",
                backend.caller(),
                backend.get_caller_user_role()?.as_str()
            );
        }
        Commands::ImportClients { file, preview } => {
            let rows = backend.preview_client_import(&read(&file)?)?;
            print_preview(&rows);
            if !preview {
                let summary = backend.commit_client_import(&rows)?;
                println!(
                    "imported {} clients, skipped {} existing",
                    summary.imported.len(),
                    summary.skipped_duplicates.len()
                );
                for name in &summary.skipped_duplicates {
                    println!("  skipped: {name}");
                }
            }
        }
        Commands::ImportTasks { file, preview } => {
            let rows = backend.preview_task_import(&read(&file)?)?;
            print_preview(&rows);
            if !preview {
                let ids = backend.commit_task_import(&rows)?;
                println!("imported {} tasks", ids.len());
            }
        }
        Commands::ImportTeam { file, preview } => {
            let members = backend.preview_team_import(&read(&file)?)?;
            for member in &members {
                println!("{}  {}", member.principal, member.name);
            }
            if !preview {
                backend.bulk_import_team_members(&members)?;
                println!("imported {} team members", members.len());
            }
        }
        Commands::ExportTasks { ids, out } => {
            let selected = (!ids.is_empty()).then_some(ids.as_slice());
            write(&out, &backend.export_tasks_csv(selected)?)?;
        }
        Commands::ExportTodos { out } => write(&out, &backend.export_todos_csv()?)?,
        Commands::Template { kind, out } => {
            let file = match kind {
                TemplateKind::Clients => backend.client_import_template(),
                TemplateKind::Tasks => backend.task_import_template()?,
                TemplateKind::Team => backend.team_import_template(),
            };
            write(&out, &file)?;
        }
        Commands::Dashboard => {
            let revenue = backend.get_revenue_cards_data()?;
            let due = backend.get_due_date_card_counts(None)?;
            println!("total revenue      {}", revenue.total_revenue);
            println!("total collected    {}", revenue.total_collected);
            println!("total outstanding  {}", revenue.total_outstanding);
            println!("due today          {}", due.due_today_count);
            println!("due tomorrow       {}", due.due_tomorrow_count);
            println!("with a due date    {}", due.any_date_count);
        }
    }
    Ok(())
}

fn print_preview<T>(rows: &[PreviewRow<T>]) {
    let valid = rows.iter().filter(|row| row.is_valid()).count();
    for row in rows {
        match &row.error {
            None => println!("line {:>4}  ok     {}", row.line, row.cells.join(" | ")),
            Some(error) => println!("line {:>4}  error  {error}", row.line),
        }
    }
    println!("{valid} of {} rows valid", rows.len());
}

fn read(path: &Path) -> CliResult<String> {
    fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write(dir: &Path, file: &ExportFile) -> CliResult<()> {
    let path = dir.join(&file.file_name);
    fs::write(&path, &file.contents).map_err(|source| CliError::Io {
        path: path.clone(),
        source,
    })?;
    info!("event=export_write module=cli status=ok bytes={}", file.contents.len());
    println!("wrote {}", path.display());
    Ok(())
}
