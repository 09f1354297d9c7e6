//! Pizza catalog - the purchasable menu and current prices

/// One menu entry. `name` is the natural key; nothing stops two entries
/// from sharing a name (deletion then removes the first match).
#[derive(Clone, Debug, PartialEq)]
pub struct CatalogItem {
    pub name: String,
    pub unit_price: f64,
}

/// Insertion-ordered menu, owned exclusively by the store.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    pub fn new() -> Self {
        Catalog { items: Vec::new() }
    }

    /// Append unconditionally - duplicates are permitted by insertion.
    pub fn add(&mut self, name: impl Into<String>, unit_price: f64) {
        self.items.push(CatalogItem {
            name: name.into(),
            unit_price,
        });
    }

    /// Remove the first entry whose name matches. Returns whether a
    /// removal occurred.
    pub fn remove_first(&mut self, name: &str) -> bool {
        match self.items.iter().position(|p| p.name == name) {
            Some(idx) => {
                self.items.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Current price for a named pizza (first match), if on the menu.
    pub fn price_of(&self, name: &str) -> Option<f64> {
        self.items.iter().find(|p| p.name == name).map(|p| p.unit_price)
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
