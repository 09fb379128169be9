use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::{CrosstermBackend, Terminal};
use std::fs::{self, File};
use std::io::{stdout, Stdout};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use vexium_core::{settings, Settings};

mod export;
mod layout;
mod ui;
use ui::app::App;

/// Terminal view of need levels, and a one-shot HTML page renderer.
#[derive(Debug, Parser)]
#[command(name = "vexium", version)]
struct Cli {
    /// Settings file to use instead of the per-user config
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, PartialEq, Subcommand)]
enum Command {
    /// Write the HTML page and exit
    Render {
        /// Output file (defaults to the `output` setting)
        path: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.command.as_ref());

    let config_path = cli.config.clone().unwrap_or_else(settings::config_path);
    let settings = match &cli.config {
        Some(path) => Settings::load_from(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => Settings::load(),
    };

    match cli.command {
        Some(Command::Render { path }) => {
            let path = path.unwrap_or_else(|| settings.output.clone());
            export::export_page(&settings.shell, &settings.bars(), &path).await?;
            println!("{}", path.display());
            Ok(())
        }
        None => {
            let mut app = App::new(settings, config_path)?;
            let mut terminal = init_terminal()?;

            let result = app.run(&mut terminal).await;

            restore_terminal(&mut terminal)?;

            result
        }
    }
}

/// The TUI owns stdout, so interactive sessions log to a file instead.
fn init_tracing(command: Option<&Command>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let result = match command {
        Some(Command::Render { .. }) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init(),
        None => match open_log_file() {
            Some(file) => tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init(),
            None => return,
        },
    };

    if let Err(e) = result {
        eprintln!("Warning: failed to initialise logging: {}", e);
    }
}

fn open_log_file() -> Option<File> {
    let dir = settings::project_dirs()?.data_local_dir().to_path_buf();
    fs::create_dir_all(&dir).ok()?;
    File::options()
        .create(true)
        .append(true)
        .open(dir.join("vexium.log"))
        .ok()
}

fn init_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
