//! HTML parser for the storefront listing and game detail pages.

use crate::steam::selectors::{detail, listing};
use regex_lite::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use thiserror::Error;
use tracing::{debug, trace};

/// Leading "Save NN% on " clause of a detail page title.
static SAVE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(Save) [0-9]*%* (on)+ ").unwrap());

/// Literal suffix Steam appends to every store page title.
const STEAM_SUFFIX: &str = "on Steam";

/// Lookup failures tolerated while extracting a single deal.
///
/// None of these abort a fetch; they only leave fields of one item unset.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("deal container has no {0} element")]
    MissingField(&'static str),

    #[error("deal container has no detail link")]
    MissingLink,

    #[error("detail page has no title element")]
    MissingTitle,

    #[error("detail page title is empty")]
    EmptyTitle,
}

/// Raw fields of one deal container, before the name is resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DealCard {
    /// Absolute URL of the game's detail page
    pub detail_url: Option<String>,
    pub price: Option<String>,
    pub original_price: Option<String>,
    pub discount: Option<String>,
}

/// Parser for Steam storefront pages.
pub struct Parser {
    base_url: String,
}

impl Parser {
    /// Creates a parser resolving relative links against `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into().trim_end_matches('/').to_string() }
    }

    /// Extracts every deal container of the listing page, in document order.
    pub fn parse_listing(&self, html: &str) -> Vec<DealCard> {
        let document = Html::parse_document(html);

        let cards: Vec<DealCard> = document
            .select(&listing::DEAL)
            .enumerate()
            .map(|(idx, element)| {
                trace!("Parsing deal container {}", idx);
                self.parse_deal(element)
            })
            .collect();

        debug!("Found {} deal containers", cards.len());
        cards
    }

    fn parse_deal(&self, element: ElementRef) -> DealCard {
        let mut card = DealCard {
            detail_url: self.detail_url(element),
            ..DealCard::default()
        };

        if let Err(e) = fill_price_fields(element, &mut card) {
            debug!("Stopped field extraction: {}", e);
        }

        card
    }

    /// Resolves the deal's detail link; an anchor without `href` counts as absent.
    fn detail_url(&self, element: ElementRef) -> Option<String> {
        element
            .select(&listing::DETAIL_LINK)
            .next()
            .and_then(|e| e.value().attr("href"))
            .map(|href| self.resolve(href))
    }

    /// Joins `href` onto the base URL. Scheme-relative links (`//host/path`)
    /// take the base URL's scheme.
    fn resolve(&self, href: &str) -> String {
        if href.starts_with("http") {
            href.to_string()
        } else if href.starts_with("//") {
            let scheme = self.base_url.split_once("://").map_or("http", |(scheme, _)| scheme);
            format!("{}:{}", scheme, href)
        } else {
            format!("{}/{}", self.base_url, href.trim_start_matches('/'))
        }
    }
}

/// Fills price, original price and discount in that order, stopping at the
/// first missing element.
fn fill_price_fields(element: ElementRef, card: &mut DealCard) -> Result<(), ExtractError> {
    card.price = Some(field_text(element, &listing::FINAL_PRICE, "price")?);
    card.original_price = Some(field_text(element, &listing::ORIGINAL_PRICE, "original price")?);
    card.discount = Some(field_text(element, &listing::DISCOUNT, "discount")?);
    Ok(())
}

fn field_text(
    element: ElementRef,
    selector: &Selector,
    field: &'static str,
) -> Result<String, ExtractError> {
    element
        .select(selector)
        .next()
        .map(|e| e.text().collect::<String>())
        .ok_or(ExtractError::MissingField(field))
}

/// Extracts the game name from a detail page.
pub fn parse_game_name(html: &str) -> Result<String, ExtractError> {
    let document = Html::parse_document(html);

    let title = document
        .select(&detail::TITLE)
        .next()
        .map(|e| e.text().collect::<String>())
        .ok_or(ExtractError::MissingTitle)?;

    if title.is_empty() {
        return Err(ExtractError::EmptyTitle);
    }

    Ok(strip_game_name(&title))
}

/// Reduces a detail page title to the game name.
///
/// Two independent steps: the `Save NN% on ` prefix is removed first, then
/// every literal `on Steam`. Whitespace left around the removed suffix stays.
pub fn strip_game_name(title: &str) -> String {
    SAVE_PREFIX.replace(title, "").replace(STEAM_SUFFIX, "")
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://store.example.com";

    fn deal(link: &str, fields: &str) -> String {
        format!(r#"<div class="summersale_dailydeal_ctn">{}{}</div>"#, link, fields)
    }

    fn page(body: &str) -> String {
        format!("<html><body>{}</body></html>", body)
    }

    const PRICES: &str = r#"
        <div class="discount_block">
            <div class="discount_pct">-50%</div>
            <div class="discount_prices">
                <div class="discount_original_price">$19.99</div>
                <div class="discount_final_price">$9.99</div>
            </div>
        </div>"#;

    // Name stripping

    #[test]
    fn test_strip_save_prefix_and_suffix() {
        assert_eq!(strip_game_name("Save 50% on Example Game on Steam"), "Example Game ");
    }

    #[test]
    fn test_strip_without_save_clause() {
        assert_eq!(strip_game_name("Example Game on Steam"), "Example Game ");
        assert_eq!(strip_game_name("Example Game"), "Example Game");
    }

    #[test]
    fn test_strip_save_without_percentage_needs_double_space() {
        // The prefix pattern expects a space on both sides of the empty percentage.
        assert_eq!(strip_game_name("Save  on Foo Bar on Steam"), "Foo Bar ");
        assert_eq!(strip_game_name("Save on Foo Bar on Steam"), "Save on Foo Bar ");
    }

    #[test]
    fn test_strip_is_case_sensitive() {
        assert_eq!(strip_game_name("save 50% on Foo on Steam"), "save 50% on Foo ");
        assert_eq!(strip_game_name("Save 50% on Foo on steam"), "Foo on steam");
    }

    #[test]
    fn test_strip_prefix_only_at_start() {
        assert_eq!(strip_game_name("Big Save 10% on Foo on Steam"), "Big Save 10% on Foo ");
    }

    #[test]
    fn test_strip_removes_every_suffix_occurrence() {
        assert_eq!(strip_game_name("Life on Steam Power on Steam"), "Life  Power ");
    }

    // Listing

    #[test]
    fn test_parse_listing_empty() {
        let parser = Parser::new(BASE);
        assert!(parser.parse_listing(&page("<p>No deals today</p>")).is_empty());
        assert!(parser.parse_listing("").is_empty());
    }

    #[test]
    fn test_parse_listing_full_deal() {
        let parser = Parser::new(BASE);
        let html = page(&deal(r#"<a class="summersale_dailydeal" href="http://store.example.com/app/10/">x</a>"#, PRICES));

        let cards = parser.parse_listing(&html);
        assert_eq!(cards.len(), 1);
        assert_eq!(
            cards[0],
            DealCard {
                detail_url: Some("http://store.example.com/app/10/".to_string()),
                price: Some("$9.99".to_string()),
                original_price: Some("$19.99".to_string()),
                discount: Some("-50%".to_string()),
            }
        );
    }

    #[test]
    fn test_parse_listing_document_order() {
        let parser = Parser::new(BASE);
        let html = page(&format!(
            "{}{}",
            deal(r#"<a class="summersale_dailydeal" href="/app/2/">x</a>"#, ""),
            deal(r#"<a class="summersale_dailydeal" href="/app/1/">x</a>"#, "")
        ));

        let urls: Vec<_> =
            parser.parse_listing(&html).into_iter().map(|c| c.detail_url.unwrap()).collect();
        assert_eq!(urls, vec!["http://store.example.com/app/2/", "http://store.example.com/app/1/"]);
    }

    #[test]
    fn test_relative_link_resolution() {
        let parser = Parser::new("http://store.example.com/");
        let html = page(&deal(r#"<a class="summersale_dailydeal" href="app/7/">x</a>"#, ""));

        let cards = parser.parse_listing(&html);
        assert_eq!(cards[0].detail_url.as_deref(), Some("http://store.example.com/app/7/"));

        let html = page(&deal(
            r#"<a class="summersale_dailydeal" href="//store.steampowered.com/app/620/">x</a>"#,
            "",
        ));
        let cards = parser.parse_listing(&html);
        assert_eq!(cards[0].detail_url.as_deref(), Some("http://store.steampowered.com/app/620/"));

        let secure = Parser::new("https://store.example.com");
        let cards = secure.parse_listing(&html);
        assert_eq!(cards[0].detail_url.as_deref(), Some("https://store.steampowered.com/app/620/"));
    }

    #[test]
    fn test_missing_link_and_href() {
        let parser = Parser::new(BASE);
        let html = page(&format!(
            "{}{}",
            deal("", PRICES),
            deal(r#"<a class="summersale_dailydeal">no href</a>"#, PRICES)
        ));

        let cards = parser.parse_listing(&html);
        assert_eq!(cards.len(), 2);
        assert!(cards.iter().all(|c| c.detail_url.is_none()));
        assert!(cards.iter().all(|c| c.discount.is_some()));
    }

    #[test]
    fn test_missing_price_stops_extraction() {
        let parser = Parser::new(BASE);
        // Original price and discount exist but are never read.
        let fields = r#"
            <div class="discount_pct">-50%</div>
            <div class="discount_original_price">$19.99</div>"#;
        let cards = parser.parse_listing(&page(&deal("", fields)));

        assert_eq!(cards[0], DealCard::default());
    }

    #[test]
    fn test_missing_discount_keeps_prices() {
        let parser = Parser::new(BASE);
        let fields = r#"
            <div class="discount_final_price">$9.99</div>
            <div class="discount_original_price">$19.99</div>"#;
        let cards = parser.parse_listing(&page(&deal("", fields)));

        assert_eq!(cards[0].price.as_deref(), Some("$9.99"));
        assert_eq!(cards[0].original_price.as_deref(), Some("$19.99"));
        assert_eq!(cards[0].discount, None);
    }

    #[test]
    fn test_field_text_is_raw() {
        let parser = Parser::new(BASE);
        let fields = r#"<div class="discount_final_price"> $9.99 </div>"#;
        let cards = parser.parse_listing(&page(&deal("", fields)));

        assert_eq!(cards[0].price.as_deref(), Some(" $9.99 "));
    }

    #[test]
    fn test_fill_price_fields_reports_missing_field() {
        let html = Html::parse_fragment(&deal("", r#"<div class="discount_final_price">$1</div>"#));
        let element = html.select(&listing::DEAL).next().unwrap();

        let mut card = DealCard::default();
        let err = fill_price_fields(element, &mut card).unwrap_err();
        assert_eq!(err, ExtractError::MissingField("original price"));
        assert_eq!(err.to_string(), "deal container has no original price element");
        assert_eq!(card.price.as_deref(), Some("$1"));
    }

    // Detail page

    #[test]
    fn test_parse_game_name() {
        let html = "<html><head><title>Save 75% on Portal 2 on Steam</title></head></html>";
        assert_eq!(parse_game_name(html).unwrap(), "Portal 2 ");
    }

    #[test]
    fn test_parse_game_name_missing_title() {
        assert_eq!(parse_game_name("").unwrap_err(), ExtractError::MissingTitle);
        assert_eq!(
            parse_game_name("<html><head></head><body>Hi</body></html>").unwrap_err(),
            ExtractError::MissingTitle
        );
    }

    #[test]
    fn test_parse_game_name_empty_title() {
        let html = "<html><head><title></title></head></html>";
        assert_eq!(parse_game_name(html).unwrap_err(), ExtractError::EmptyTitle);
    }
}
