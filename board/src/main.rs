use clap::Parser;
use log::{error, info};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use todo_board::cli::Cli;
use todo_board::config::{Config, CONFIG_FILE_NAME};
use todo_board::desktop::SystemDesktop;
use todo_board::error::StartupError;
use todo_board::resources::Resources;
use todo_board::state::AppState;
use todo_board::{browser, logger, paths, ready_hooks, web_server};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let app_data_dir = match paths::init_app_data_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("{}", StartupError::DataDir(e));
            std::process::exit(1);
        }
    };

    let config = match load_config(&cli, &app_data_dir) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let _logger = match logger::setup_logging(&app_data_dir, &config.log_level) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Failed to setup logging: {}", e);
            None
        }
    };

    info!("--- Todo board starting ---");
    if let Err(e) = run(config, app_data_dir).await {
        error!("{}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }
    info!("--- Todo board shutting down ---");
}

fn load_config(cli: &Cli, app_data_dir: &Path) -> Result<Config, StartupError> {
    let path = cli
        .config
        .clone()
        .unwrap_or_else(|| app_data_dir.join(CONFIG_FILE_NAME));
    let mut config = Config::load(&path)?;
    config.apply_env(|key| std::env::var(key).ok());
    cli.apply_to(&mut config);
    Ok(config)
}

async fn run(config: Config, app_data_dir: PathBuf) -> Result<(), StartupError> {
    let listener = web_server::bind(config.server.bind_port()?).await?;
    let port = listener
        .local_addr()
        .map_err(StartupError::Serve)?
        .port();
    let board_url = browser::local_url(&port.to_string());
    info!("Todo board listening on {}", board_url);

    let resources = Resources::bundled(config.desktop.resource_dir.clone());
    // Runs on the startup thread: the macOS dock icon must be set from main.
    let lifecycle = ready_hooks(SystemDesktop, &config.desktop, resources.clone(), port);
    lifecycle.fire_ready(&mut std::io::stderr());

    let state = Arc::new(AppState {
        config,
        board_url,
        resources,
        app_data_dir,
        started_at: chrono::Local::now(),
    });
    web_server::serve(listener, state).await
}
