use itertools::Itertools;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

use crate::domain::product::ProductRecord;

#[derive(Error, Debug)]
pub enum ExtractorError {
    #[error("invalid selector for {name}: {reason}")]
    InvalidSelector { name: &'static str, reason: String },
}

/// Selectors and link rules for the target site's listing and product pages.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    pub origin: String,
    pub product_path_marker: String,
    pub listing_anchor: String,
    pub product_name: String,
    pub price_symbol: String,
    pub price_whole: String,
    pub price_fraction: String,
    pub rating: String,
    pub review_count: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        ExtractorConfig {
            origin: "https://www.amazon.com".to_string(),
            product_path_marker: "/dp/".to_string(),
            listing_anchor: r#"a[class="a-link-normal s-no-outline"]"#.to_string(),
            product_name: "span#productTitle".to_string(),
            price_symbol: "span.a-price-symbol".to_string(),
            price_whole: "span.a-price-whole".to_string(),
            price_fraction: "span.a-price-fraction".to_string(),
            rating: "i.a-icon-star".to_string(),
            review_count: "span#acrCustomerReviewText".to_string(),
        }
    }
}

pub struct Extractor {
    origin: String,
    product_path_marker: String,
    listing_anchor: Selector,
    product_name: Selector,
    price_symbol: Selector,
    price_whole: Selector,
    price_fraction: Selector,
    rating: Selector,
    review_count: Selector,
}

fn compile(name: &'static str, css: &str) -> Result<Selector, ExtractorError> {
    Selector::parse(css).map_err(|e| ExtractorError::InvalidSelector {
        name,
        reason: format!("{:?}", e),
    })
}

impl Extractor {
    pub fn new(config: ExtractorConfig) -> Result<Self, ExtractorError> {
        Ok(Extractor {
            listing_anchor: compile("listing_anchor", &config.listing_anchor)?,
            product_name: compile("product_name", &config.product_name)?,
            price_symbol: compile("price_symbol", &config.price_symbol)?,
            price_whole: compile("price_whole", &config.price_whole)?,
            price_fraction: compile("price_fraction", &config.price_fraction)?,
            rating: compile("rating", &config.rating)?,
            review_count: compile("review_count", &config.review_count)?,
            origin: config.origin,
            product_path_marker: config.product_path_marker,
        })
    }

    /// Absolute product urls in order of first appearance, duplicates dropped.
    pub fn extract_listing_links(&self, html: &str) -> Vec<String> {
        let document = Html::parse_document(html);

        document
            .select(&self.listing_anchor)
            .filter_map(|tag| tag.value().attr("href"))
            .filter(|href| href.contains(self.product_path_marker.as_str()))
            .map(|href| format!("{}{}", self.origin, href))
            .unique()
            .collect()
    }

    pub fn extract_product_record(&self, html: &str) -> ProductRecord {
        let document = Html::parse_document(html);

        let price = match (
            first_text(&document, &self.price_symbol),
            first_text(&document, &self.price_whole),
            first_text(&document, &self.price_fraction),
        ) {
            (Some(symbol), Some(whole), Some(fraction)) => {
                Some(format!("{}{}{}", symbol, whole, fraction))
            }
            _ => None,
        };

        ProductRecord {
            product_name: first_text(&document, &self.product_name),
            price,
            rating: first_text(&document, &self.rating),
            review_count: first_text(&document, &self.review_count),
        }
    }
}

fn first_text(document: &Html, selector: &Selector) -> Option<String> {
    document.select(selector).next().map(trimmed_text)
}

fn trimmed_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::{Extractor, ExtractorConfig, ExtractorError};
    use crate::domain::product::ProductRecord;

    fn extractor() -> Extractor {
        Extractor::new(ExtractorConfig::default()).unwrap()
    }

    const PRODUCT_PAGE: &str = r#"
        <html><body>
            <span id="productTitle">
                Organic Green Tea Bags, 100 Count
            </span>
            <span class="a-price">
                <span class="a-price-symbol">$</span>
                <span class="a-price-whole">12.</span>
                <span class="a-price-fraction">99</span>
            </span>
            <i class="a-icon a-icon-star a-star-4-5"><span class="a-icon-alt">4.5 out of 5 stars</span></i>
            <span id="acrCustomerReviewText">1,234 ratings</span>
        </body></html>
    "#;

    #[test]
    fn duplicate_anchors_yield_one_link() {
        let html = r#"
            <a class="a-link-normal s-no-outline" href="/dp/B000X">one</a>
            <a class="a-link-normal s-no-outline" href="/dp/B000X">again</a>
        "#;

        assert_eq!(
            extractor().extract_listing_links(html),
            vec!["https://www.amazon.com/dp/B000X"]
        );
    }

    #[test]
    fn links_keep_first_seen_order() {
        let html = r#"
            <a class="a-link-normal s-no-outline" href="/dp/C">c</a>
            <a class="a-link-normal s-no-outline" href="/dp/A">a</a>
            <a class="a-link-normal s-no-outline" href="/dp/C">c again</a>
            <a class="a-link-normal s-no-outline" href="/dp/B">b</a>
        "#;

        assert_eq!(
            extractor().extract_listing_links(html),
            vec![
                "https://www.amazon.com/dp/C",
                "https://www.amazon.com/dp/A",
                "https://www.amazon.com/dp/B",
            ]
        );
    }

    #[test]
    fn links_without_marker_or_class_are_ignored() {
        let html = r#"
            <a class="a-link-normal s-no-outline" href="/gp/help">help</a>
            <a class="a-link-normal s-no-outline">no href</a>
            <a class="a-link-normal" href="/dp/NOCLASS">missing class</a>
            <a href="/dp/PLAIN">plain</a>
            <a class="a-link-normal s-no-outline" href="/Tea-Bags/dp/B00FTAYNKE?ref=sr_1_1">kept</a>
        "#;

        assert_eq!(
            extractor().extract_listing_links(html),
            vec!["https://www.amazon.com/Tea-Bags/dp/B00FTAYNKE?ref=sr_1_1"]
        );
    }

    #[test]
    fn class_attribute_must_match_exactly() {
        let html = r#"
            <a class="a-link-normal s-underline-text s-no-outline" href="/dp/SPONSORED">extra class</a>
            <a class="s-no-outline a-link-normal" href="/dp/REORDERED">reordered</a>
            <a class="a-link-normal s-no-outline" href="/dp/EXACT">exact</a>
        "#;

        assert_eq!(
            extractor().extract_listing_links(html),
            vec!["https://www.amazon.com/dp/EXACT"]
        );
    }

    #[test]
    fn listing_without_matches_is_empty() {
        assert!(extractor()
            .extract_listing_links("<html><body><p>Nothing</p></body></html>")
            .is_empty());
        assert!(extractor().extract_listing_links("").is_empty());
    }

    #[test]
    fn full_product_page() {
        let record = extractor().extract_product_record(PRODUCT_PAGE);

        assert_eq!(
            record,
            ProductRecord {
                product_name: Some("Organic Green Tea Bags, 100 Count".to_string()),
                price: Some("$12.99".to_string()),
                rating: Some("4.5 out of 5 stars".to_string()),
                review_count: Some("1,234 ratings".to_string()),
            }
        );
    }

    #[test]
    fn missing_price_whole_drops_price_only() {
        let html = PRODUCT_PAGE.replace(r#"<span class="a-price-whole">12.</span>"#, "");
        let record = extractor().extract_product_record(&html);

        assert_eq!(record.price, None);
        assert_eq!(
            record.product_name.as_deref(),
            Some("Organic Green Tea Bags, 100 Count")
        );
        assert_eq!(record.rating.as_deref(), Some("4.5 out of 5 stars"));
        assert_eq!(record.review_count.as_deref(), Some("1,234 ratings"));
    }

    #[test]
    fn partial_price_is_not_assembled() {
        let only_symbol = r#"<span class="a-price-symbol">$</span>"#;
        let symbol_and_whole = r#"
            <span class="a-price-symbol">$</span><span class="a-price-whole">12.</span>
        "#;

        assert_eq!(extractor().extract_product_record(only_symbol).price, None);
        assert_eq!(
            extractor().extract_product_record(symbol_and_whole).price,
            None
        );
    }

    #[test]
    fn empty_page_has_every_field_missing() {
        assert_eq!(
            extractor().extract_product_record("<html></html>"),
            ProductRecord::default()
        );
        assert_eq!(
            extractor().extract_product_record("<<<not html"),
            ProductRecord::default()
        );
    }

    #[test]
    fn invalid_selector_fails_construction() {
        let config = ExtractorConfig {
            rating: "i..broken[".to_string(),
            ..Default::default()
        };

        assert!(matches!(
            Extractor::new(config),
            Err(ExtractorError::InvalidSelector { name: "rating", .. })
        ));
    }
}
