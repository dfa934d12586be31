use std::sync::Arc;

/// Source of unit prices, usually backed by a remote catalogue.
pub trait PriceSource: Send + Sync {
    fn price_of(&self, sku: &str) -> Option<u64>;
    fn report_missing(&self, sku: &str);
    fn currency(&self) -> String;
    fn set_currency(&self, currency: String);
}

/// Sums order lines against a [`PriceSource`].
pub struct Checkout {
    prices: Arc<dyn PriceSource>,
}

impl Checkout {
    pub fn new(prices: Arc<dyn PriceSource>) -> Self {
        Self { prices }
    }

    /// Total of `lines` in minor units; unknown SKUs are reported and skipped.
    pub fn total(&self, lines: &[(&str, u64)]) -> u64 {
        lines
            .iter()
            .map(|(sku, quantity)| match self.prices.price_of(sku) {
                Some(price) => price * quantity,
                None => {
                    self.prices.report_missing(sku);
                    0
                }
            })
            .sum()
    }

    pub fn label(&self, amount: u64) -> String {
        let currency = self.prices.currency();
        if currency.is_empty() {
            amount.to_string()
        } else {
            format!("{} {}", amount, currency)
        }
    }

    pub fn switch_currency(&self, currency: &str) {
        self.prices.set_currency(currency.to_string());
    }
}
