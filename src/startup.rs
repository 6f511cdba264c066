use std::net::TcpListener;

use actix_cors::Cors;
use actix_web::{dev::Server, middleware::Logger, web, App, HttpServer};

use crate::{
    routes::scrape_route,
    services::{HttpFetcher, PolitenessDelay, ScrapeService, TokioClock},
};

pub type ProductScraper = ScrapeService<HttpFetcher, PolitenessDelay<TokioClock>>;

pub fn run(listener: TcpListener, scraper: ProductScraper) -> Result<Server, std::io::Error> {
    let scraper = web::Data::new(scraper);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header(),
            )
            .route(
                "/scrape",
                web::post().to(scrape_route::scrape::<HttpFetcher, PolitenessDelay<TokioClock>>),
            )
            .app_data(scraper.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
