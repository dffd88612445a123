use std::{net::TcpListener, sync::Arc};

use board_result::{
    configuration::get_configuration,
    services::{DroidLauncher, ResultFetcher},
    startup::run,
};
use env_logger::Env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration()?;

    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener = TcpListener::bind(&address)?;

    let launcher = DroidLauncher::new(&configuration.scraper);
    let fetcher = ResultFetcher::new(Arc::new(launcher), configuration.scraper);

    log::info!("Server running on {}", address);
    run(listener, fetcher)?.await?;

    Ok(())
}
