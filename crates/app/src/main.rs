mod args;
mod report;

use std::path::Path;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use rounds_core::model::{AddOutcome, ResetPolicy};
use services::{AppServices, BackupService, Clock, ExportFormat, ProgressService};
use ui::vm::{confirmation_message, import_message};
use ui::{App, UiApp, build_app_context};

use crate::args::{Args, Command, print_usage};

struct DesktopApp {
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn progress(&self) -> Arc<ProgressService> {
        self.services.progress()
    }

    fn backup(&self) -> Arc<BackupService> {
        self.services.backup()
    }

    fn data_file_label(&self) -> String {
        self.services
            .data_file()
            .map_or_else(|| "in-memory".to_string(), |path| path.display().to_string())
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn prepare_data_dir(data_file: &Path) -> std::io::Result<()> {
    if let Some(parent) = data_file.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn launch_ui(services: AppServices) {
    let app: Arc<dyn UiApp> = Arc::new(DesktopApp { services });
    let context = build_app_context(&app);

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Study Rounds")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse(std::env::args().skip(1), |key| std::env::var(key).ok()).map_err(
        |e| {
            eprintln!("{e}");
            print_usage();
            e
        },
    )?;

    if args.command == Command::Help {
        print_usage();
        return Ok(());
    }

    init_logging();
    prepare_data_dir(&args.data_file)?;
    let services = AppServices::new_json(&args.data_file, Clock::default_clock(), args.settings)
        .await?;
    tracing::debug!(data_file = %args.data_file.display(), "services ready");

    match args.command {
        Command::Ui | Command::Help => launch_ui(services),
        Command::Add { topic, delta, date } => {
            let progress = services.progress();
            let date = date.unwrap_or_else(|| progress.today());
            match progress.add_rounds(&topic, delta, date).await? {
                AddOutcome::Unchanged => println!("{topic}: nothing to record"),
                AddOutcome::Applied { count } => {
                    println!("{} (now {count})", confirmation_message(&topic, delta));
                }
            }
        }
        Command::Reset { clear_log } => {
            let policy = if clear_log {
                ResetPolicy::ClearLog
            } else {
                args.settings.reset_policy()
            };
            services.progress().reset_with(policy).await?;
            if policy.clears_log() {
                println!("All counts reset; change log cleared");
            } else {
                println!("All counts reset; change log kept");
            }
        }
        Command::Show => {
            let board = services.progress().board().await?;
            print!("{}", report::render_board(&board));
        }
        Command::Log { limit } => {
            let entries = services.progress().recent_log(limit).await?;
            print!("{}", report::render_log(&entries));
        }
        Command::Export { path, bom, csv } => {
            let format = if csv {
                ExportFormat::Csv { bom }
            } else {
                ExportFormat::Json { bom }
            };
            services.backup().export_to_path(&path, format).await?;
            println!("Exported to {}", path.display());
        }
        Command::Import { path } => {
            let summary = services.backup().import_from_path(&path).await?;
            println!("{}", import_message(&summary));
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
