mod app;
mod commands;
mod config;
mod effects;
mod logging;
mod notify;
mod render;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    let config = config::Config::parse();
    logging::initialize(config.log);
    app::run(config)
}
