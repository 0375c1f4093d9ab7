//! Text rendering of sale snapshots.

pub mod pretty;

use crate::steam::SaleSnapshot;
use chrono::{DateTime, Local, TimeZone};
use std::fmt::Display;

/// Printed ahead of a re-render when a poll finds different items.
pub const CHANGED_NOTICE: &str = "Sale items have changed!!";

const NAME_WIDTH: usize = 58;
const PRICE_WIDTH: usize = 7;
const DISCOUNT_WIDTH: usize = 5;
const SEPARATOR_WIDTH: usize = 80;

/// Renders a snapshot stamped with the current local time.
pub fn render(snapshot: &SaleSnapshot) -> String {
    render_at(snapshot, &Local::now())
}

/// Renders a snapshot with an explicit timestamp.
///
/// Only items with all four fields produce a line; partial items stay in the
/// snapshot but are not shown.
pub fn render_at<Tz: TimeZone>(snapshot: &SaleSnapshot, now: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    let mut out = format!(
        "Games on Sale ({})\n{:=<width$}\n",
        now.format("%Y-%m-%d %H:%M:%S%.6f"),
        "",
        width = SEPARATOR_WIDTH
    );

    for item in snapshot.complete_items() {
        if let (Some(name), Some(price), Some(original), Some(discount)) =
            (&item.name, &item.price, &item.original_price, &item.discount)
        {
            let original = format!("({})", original);
            out.push_str(&format!(
                "{name:.<nw$.nw$}{price:.>pw$} {original:>ow$}{discount:>dw$}\n",
                nw = NAME_WIDTH,
                pw = PRICE_WIDTH,
                ow = PRICE_WIDTH + 2,
                dw = DISCOUNT_WIDTH,
            ));
        }
    }

    out
}
