//! Data models for sale items and snapshots.

/// One daily deal as scraped from the storefront.
///
/// Fields are filled in order (name, price, original price, discount) and a
/// record may stay partial when extraction stops early. Equality is structural
/// over all four fields, which is what deduplication relies on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SaleItem {
    /// Game name recovered from the detail page title
    pub name: Option<String>,
    /// Current (discounted) price, raw text
    pub price: Option<String>,
    /// Price before the discount, raw text
    pub original_price: Option<String>,
    /// Discount marker such as `-50%`, raw text
    pub discount: Option<String>,
}

impl SaleItem {
    /// Creates a fully populated item.
    pub fn new(
        name: impl Into<String>,
        price: impl Into<String>,
        original_price: impl Into<String>,
        discount: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            price: Some(price.into()),
            original_price: Some(original_price.into()),
            discount: Some(discount.into()),
        }
    }

    /// Number of populated fields (0-4).
    pub fn field_count(&self) -> usize {
        [&self.name, &self.price, &self.original_price, &self.discount]
            .iter()
            .filter(|f| f.is_some())
            .count()
    }

    /// Returns true when all four fields are populated.
    pub fn is_complete(&self) -> bool {
        self.field_count() == 4
    }

    /// Name for log output; never assumes the name was found.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }
}

/// The full known set of sale items at one poll instant, sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaleSnapshot {
    items: Vec<SaleItem>,
}

impl SaleSnapshot {
    /// Creates an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an item unless an equal one is already present.
    ///
    /// Returns false when the item was a duplicate.
    pub fn insert(&mut self, item: SaleItem) -> bool {
        if self.items.contains(&item) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Sorts ascending by name. Unnamed items sort first; ties keep
    /// insertion order.
    pub fn sort_by_name(&mut self) {
        self.items.sort_by(|a, b| a.name.cmp(&b.name));
    }

    pub fn items(&self) -> &[SaleItem] {
        &self.items
    }

    /// Items with all four fields, in snapshot order.
    pub fn complete_items(&self) -> impl Iterator<Item = &SaleItem> {
        self.items.iter().filter(|i| i.is_complete())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<SaleItem> for SaleSnapshot {
    /// Collects with deduplication, then sorts by name.
    fn from_iter<T: IntoIterator<Item = SaleItem>>(iter: T) -> Self {
        let mut snapshot = Self::new();
        for item in iter {
            snapshot.insert(item);
        }
        snapshot.sort_by_name();
        snapshot
    }
}
