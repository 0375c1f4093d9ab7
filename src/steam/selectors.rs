//! CSS selectors for Steam storefront parsing.
//!
//! Steam renames these classes between seasonal events. When a sale page
//! stops yielding items, dump the listing with `--dump`, update the selectors
//! here and refresh the test fixtures.

use scraper::Selector;
use std::sync::LazyLock;

/// Selectors for the storefront listing page.
pub mod listing {
    use super::*;

    /// One daily deal container.
    pub static DEAL: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("div.summersale_dailydeal_ctn").unwrap());

    /// Link to the game's detail page inside a deal container.
    pub static DETAIL_LINK: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("a.summersale_dailydeal").unwrap());

    /// Discounted price.
    pub static FINAL_PRICE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("div.discount_final_price").unwrap());

    /// Price before the discount.
    pub static ORIGINAL_PRICE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("div.discount_original_price").unwrap());

    /// Discount percentage marker.
    pub static DISCOUNT: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("div.discount_pct").unwrap());
}

/// Selectors for a game's detail page.
pub mod detail {
    use super::*;

    pub static TITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("title").unwrap());
}
