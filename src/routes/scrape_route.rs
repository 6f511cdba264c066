use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::services::{PageSource, Pacer, ScrapeService};

#[derive(Deserialize)]
pub struct ScrapeBody {
    #[serde(default)]
    url: Option<String>,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// `POST /scrape`. Generic so tests can mount it over fake fetchers; see
/// `startup::run` for the production wiring.
pub async fn scrape<F, P>(
    service: web::Data<ScrapeService<F, P>>,
    body: Option<web::Json<ScrapeBody>>,
) -> HttpResponse
where
    F: PageSource + 'static,
    P: Pacer + 'static,
{
    let url = body
        .and_then(|b| b.into_inner().url)
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty());

    let Some(url) = url else {
        return HttpResponse::BadRequest().json(ErrorBody {
            error: "No URL provided".to_string(),
        });
    };

    log::info!("Received scraping request for: {}", url);

    match service.scrape_listing(&url).await {
        Ok(records) => HttpResponse::Ok().json(records),
        Err(e) => {
            log::error!("Listing fetch failed for {}: {}", url, e);
            HttpResponse::InternalServerError().json(ErrorBody {
                error: format!("Failed to fetch or parse page: {}", e),
            })
        }
    }
}
