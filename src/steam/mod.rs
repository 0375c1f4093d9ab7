//! Steam storefront modules for HTTP client, parsing, and data models.

pub mod client;
pub mod models;
pub mod parser;
pub mod selectors;

pub use client::{StoreFetch, SteamClient};
pub use models::{SaleItem, SaleSnapshot};
pub use parser::{parse_game_name, DealCard, ExtractError, Parser};
