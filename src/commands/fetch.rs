//! Snapshot fetching: listing page, detail pages, dedup and sort.

use crate::steam::{
    parse_game_name, DealCard, ExtractError, Parser, SaleItem, SaleSnapshot, StoreFetch,
};
use anyhow::Result;
use std::io::{self, Write};
use tracing::debug;

/// Builds sale snapshots from a storefront client.
pub struct SnapshotFetcher<C> {
    client: C,
    parser: Parser,
}

impl<C: StoreFetch> SnapshotFetcher<C> {
    /// Creates a fetcher resolving links against the client's base URL.
    pub fn new(client: C) -> Self {
        let parser = Parser::new(client.base_url());
        Self { client, parser }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Fetches the listing page and every linked detail page, returning the
    /// deduplicated snapshot sorted by name.
    ///
    /// Transport failures abort the whole fetch. Missing fields or names only
    /// leave the affected item partial.
    pub async fn fetch_snapshot(&self) -> Result<SaleSnapshot> {
        self.fetch_snapshot_with_progress(&mut io::sink()).await
    }

    /// Same as [`fetch_snapshot`](Self::fetch_snapshot), writing
    /// `Getting items`, one dot per deal container and a newline to `progress`.
    pub async fn fetch_snapshot_with_progress<W: Write>(
        &self,
        progress: &mut W,
    ) -> Result<SaleSnapshot> {
        write!(progress, "Getting items")?;
        progress.flush()?;

        let html = self.client.listing().await?;
        let cards = self.parser.parse_listing(&html);

        let mut snapshot = SaleSnapshot::new();
        for (idx, card) in cards.into_iter().enumerate() {
            debug!("Parsing item {}", idx);
            write!(progress, ".")?;
            progress.flush()?;

            let item = self.build_item(card).await?;
            let name = item.display_name().to_string();
            if snapshot.insert(item) {
                debug!("Adding item {} ({}) to sale items", name, idx);
            } else {
                debug!("Item {} already exists. Skipping.", name);
            }
        }

        writeln!(progress)?;

        snapshot.sort_by_name();
        Ok(snapshot)
    }

    async fn build_item(&self, card: DealCard) -> Result<SaleItem> {
        let name = match &card.detail_url {
            Some(url) => self.fetch_game_name(url).await?,
            None => {
                debug!("Name left unset: {}", ExtractError::MissingLink);
                None
            }
        };

        Ok(SaleItem {
            name,
            price: card.price,
            original_price: card.original_price,
            discount: card.discount,
        })
    }

    /// Resolves a game name from its detail page. Lookup failures leave the
    /// name unset; transport failures propagate.
    async fn fetch_game_name(&self, url: &str) -> Result<Option<String>> {
        debug!("Getting name from {}", url);
        let html = self.client.page(url).await?;

        match parse_game_name(&html) {
            Ok(name) => {
                debug!("Resolved name {:?}", name);
                Ok(Some(name))
            }
            Err(e) => {
                debug!("Name left unset: {}", e);
                Ok(None)
            }
        }
    }
}
