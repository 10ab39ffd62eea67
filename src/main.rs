use std::net::TcpListener;

use anyhow::Context;
use env_logger::Env;
use etimad_scrape::{configuration::get_configuration, startup::run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration().context("Failed to read configuration.")?;

    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener = TcpListener::bind(&address)
        .with_context(|| format!("Failed to bind {}", address))?;
    log::info!("Serving on http://{}", address);

    run(listener, configuration.scraper)?.await?;

    Ok(())
}
