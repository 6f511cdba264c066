use crate::domain::product::ProductRecord;

use super::{Extractor, FetchError, PageSource, Pacer};

pub const DEFAULT_MAX_PRODUCTS: usize = 5;

/// Fetches a listing page, then scrapes the first `max_products` product
/// pages it links to, one at a time.
pub struct ScrapeService<F: PageSource, P: Pacer> {
    fetcher: F,
    extractor: Extractor,
    pacer: P,
    max_products: usize,
}

impl<F: PageSource, P: Pacer> ScrapeService<F, P> {
    pub fn new(fetcher: F, extractor: Extractor, pacer: P, max_products: usize) -> Self {
        ScrapeService {
            fetcher,
            extractor,
            pacer,
            max_products,
        }
    }

    pub async fn scrape_listing(&self, url: &str) -> Result<Vec<ProductRecord>, FetchError> {
        let listing_html = self.fetcher.fetch(url).await?;
        let product_links = self.extractor.extract_listing_links(&listing_html);

        log::info!(
            "Found {} product links. Scraping the first {}...",
            product_links.len(),
            self.max_products
        );

        let mut scraped_data = vec![];

        for (i, product_url) in product_links.iter().take(self.max_products).enumerate() {
            if i > 0 {
                self.pacer.pause().await;
            }

            log::info!("Scraping product {}: {}", i + 1, product_url);

            match self.fetcher.fetch(product_url).await {
                Ok(html) => scraped_data.push(self.extractor.extract_product_record(&html)),
                Err(e) => log::error!(
                    "Error scraping product page {} (transient: {}): {}",
                    product_url,
                    e.is_transient(),
                    e
                ),
            }
        }

        Ok(scraped_data)
    }
}
