use crate::prelude::*;
use clap::Parser;

mod config;
mod error;
mod fetch;
mod outline;
mod prelude;
mod server;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Turn Wikipedia articles into Markdown heading outlines"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    #[clap(flatten)]
    settings: config::Settings,

    /// Whether to display additional information.
    #[clap(long, env = "OUTLINE_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Serve GET /api/outline?country=<name> over HTTP
    Serve(crate::server::ServeOptions),

    /// Fetch one article and print its outline
    Outline(crate::outline::OutlineOptions),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Serve(options) => crate::server::run(options, app.global).await,
        SubCommands::Outline(options) => crate::outline::run(options, app.global).await,
    }
}
