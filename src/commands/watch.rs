//! Polling loop that re-fetches the storefront and reports changes.

use crate::commands::fetch::SnapshotFetcher;
use crate::format::{self, CHANGED_NOTICE};
use crate::steam::{SaleSnapshot, StoreFetch};
use anyhow::Result;
use std::io::Write;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info};

/// Holds the current snapshot and replaces it whenever a poll differs.
pub struct Watcher<C> {
    fetcher: SnapshotFetcher<C>,
    snapshot: SaleSnapshot,
    interval: Duration,
}

impl<C: StoreFetch> Watcher<C> {
    pub fn new(fetcher: SnapshotFetcher<C>, snapshot: SaleSnapshot, interval: Duration) -> Self {
        Self { fetcher, snapshot, interval }
    }

    /// The snapshot currently held.
    pub fn snapshot(&self) -> &SaleSnapshot {
        &self.snapshot
    }

    pub fn fetcher(&self) -> &SnapshotFetcher<C> {
        &self.fetcher
    }

    /// Accepts `next` if it differs from the held snapshot in any way
    /// (length, elements or order). Returns true when it was accepted.
    pub fn update(&mut self, next: SaleSnapshot) -> bool {
        if next == self.snapshot {
            return false;
        }
        self.snapshot = next;
        true
    }

    /// Prints the held snapshot, then polls every interval until `cancel`
    /// turns true. Each changed poll prints the change notice and a fresh
    /// render to `out`.
    ///
    /// The sleep and the fetch both race against the cancellation token; a
    /// cancelled fetch is dropped mid-flight. Fetch errors propagate.
    pub async fn run_loop<W: Write>(
        &mut self,
        out: &mut W,
        mut cancel: watch::Receiver<bool>,
    ) -> Result<()> {
        debug!("Starting loop.");
        writeln!(out, "{}", format::render(&self.snapshot))?;
        out.flush()?;

        loop {
            if *cancel.borrow() {
                break;
            }

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = cancelled(&mut cancel) => break,
            }

            let next = tokio::select! {
                next = self.fetcher.fetch_snapshot() => next?,
                _ = cancelled(&mut cancel) => break,
            };

            if self.update(next) {
                info!("Sale items changed ({} items)", self.snapshot.len());
                writeln!(out, "{}", CHANGED_NOTICE)?;
                writeln!(out, "{}", format::render(&self.snapshot))?;
                out.flush()?;
            } else {
                debug!("No change in sale items");
            }
        }

        debug!("Stopping loop.");
        Ok(())
    }
}

/// Resolves once the token turns true or its sender is gone.
async fn cancelled(cancel: &mut watch::Receiver<bool>) {
    let _ = cancel.wait_for(|&stop| stop).await;
}
