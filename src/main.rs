use std::error::Error;
use std::time::Duration;

use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use session_chat::common::ConversationId;
use session_chat::config::{self, AppConfig};
use session_chat::headless;
use session_chat::ui::ChatApp;

#[derive(Parser)]
#[command(
    name = "rust_session_chat",
    version,
    about = "Chat client with simulated message delivery"
)]
struct Cli {
    /// Path to JSON config file
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH, value_name = "FILE")]
    config: String,
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Subcommand, Clone, PartialEq, Eq)]
enum Mode {
    /// Run one conversation on the terminal (no UI)
    Headless {
        /// Conversation to open
        #[arg(long, default_value = "1")]
        conversation: String,
        /// Seconds to keep the session alive after input ends
        #[arg(long, default_value_t = 5)]
        linger_secs: u64,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let app_config = config::load_config(&cli.config);

    match cli.mode {
        Some(Mode::Headless {
            conversation,
            linger_secs,
        }) => {
            headless::run(
                app_config,
                ConversationId::new(conversation),
                Duration::from_secs(linger_secs),
            )
            .await
        }
        None => run_desktop(app_config, cli.config),
    }
}

fn run_desktop(app_config: AppConfig, config_path: String) -> Result<(), Box<dyn Error>> {
    let runtime = tokio::runtime::Handle::current();
    let options = eframe::NativeOptions::default();

    log::info!("Starting desktop client with config {config_path}");
    eframe::run_native(
        "Session Chat",
        options,
        Box::new(move |cc| Ok(Box::new(ChatApp::new(cc, app_config, config_path, runtime)))),
    )?;
    Ok(())
}
