use std::net::TcpListener;

use anyhow::Context;
use env_logger::Env;
use shelf_scout::{
    configuration::get_configuration,
    services::{Extractor, ExtractorConfig, HttpFetcher, PolitenessDelay, ScrapeService, TokioClock},
    startup::run,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration().context("Failed to read configuration.")?;

    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener =
        TcpListener::bind(&address).with_context(|| format!("Failed to bind {}", address))?;

    let scraper_settings = configuration.scraper;
    let fetcher = HttpFetcher::new(&scraper_settings)?;
    let extractor = Extractor::new(ExtractorConfig::default())?;
    let (min_delay, max_delay) = scraper_settings.delay_bounds();
    let pacer = PolitenessDelay::new(TokioClock, min_delay, max_delay)?;

    let scraper = ScrapeService::new(fetcher, extractor, pacer, scraper_settings.max_products);

    log::info!("Listening on {}", address);
    run(listener, scraper)?.await?;

    Ok(())
}
