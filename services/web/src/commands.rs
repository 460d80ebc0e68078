use crate::cli::DataArgs;
use crate::infra::{apply_data_overrides, DashboardState};
use chrono::Local;
use clap::{Args, ValueEnum};
use retention_dashboard::config::AppConfig;
use retention_dashboard::employee_events::{model_for, schema, EntityKind, QueryBase};
use retention_dashboard::error::AppError;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ProfileArg {
    Employee,
    Team,
}

impl From<ProfileArg> for EntityKind {
    fn from(value: ProfileArg) -> Self {
        match value {
            ProfileArg::Employee => EntityKind::Employee,
            ProfileArg::Team => EntityKind::Team,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Which kind of entity to report on
    #[arg(value_enum)]
    pub(crate) profile: ProfileArg,
    /// Employee or team id
    pub(crate) id: i64,
    /// Write the HTML page here instead of stdout
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
    #[command(flatten)]
    pub(crate) data: DataArgs,
}

#[derive(Args, Debug)]
pub(crate) struct InitDbArgs {
    /// Where to create the SQLite file
    pub(crate) path: PathBuf,
    /// Replace the file if it already exists
    #[arg(long)]
    pub(crate) force: bool,
}

pub(crate) async fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let ReportArgs {
        profile,
        id,
        output,
        data,
    } = args;

    let mut config = AppConfig::load()?;
    apply_data_overrides(&mut config.data, data);
    let state = DashboardState::load(&config.data)?;
    let kind = EntityKind::from(profile);

    let page = tokio::task::spawn_blocking(move || {
        let model = model_for(kind, state.database.clone());
        state.report.render_page(id, model.as_ref())
    })
    .await??;

    match output {
        Some(path) => {
            fs::write(&path, page)?;
            println!(
                "Wrote {} {} report to {} at {}",
                kind.table(),
                id,
                path.display(),
                Local::now().format("%Y-%m-%d %H:%M:%S")
            );
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(page.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}

pub(crate) fn run_init_db(args: InitDbArgs) -> Result<(), AppError> {
    let InitDbArgs { path, force } = args;

    if path.exists() {
        if !force {
            return Err(AppError::Io(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} already exists (use --force to replace it)", path.display()),
            )));
        }
        fs::remove_file(&path)?;
    }
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let database = schema::initialize(&path, true)?;

    println!("Created demo employee events database at {}", path.display());
    for kind in EntityKind::ordered() {
        let names = model_for(kind, database.clone()).names()?;
        println!("\n{} ({})", kind.label(), names.len());
        for entry in names {
            println!("- {}: {}", entry.id, entry.name);
        }
    }

    Ok(())
}
