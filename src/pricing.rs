//! Business constants and the tiered price table.

/// Per-card sale price in ETB.
pub const UNIT_PRICE: f64 = 1200.0;

/// What the supplier charges per produced card.
pub const COST_PER_UNIT: f64 = 400.0;

/// Flat profit estimate per card; a coarse planning number, not a real P&L.
pub const PROFIT_PER_UNIT: f64 = 800.0;

/// Days from order creation until production is due.
pub const PRODUCTION_SLA_DAYS: i64 = 4;

/// Days from order creation until delivery is due.
pub const DELIVERY_SLA_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceTier {
    pub min_quantity: i64,
    pub unit_price: f64,
}

/// Per-unit rate lookup. Tiers are kept sorted by descending minimum
/// quantity; the base rate applies when no tier matches.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceTable {
    base: f64,
    tiers: Vec<PriceTier>,
}

impl PriceTable {
    pub fn flat(unit_price: f64) -> Self {
        Self {
            base: unit_price,
            tiers: Vec::new(),
        }
    }

    pub fn with_bulk_tier(base: f64, min_quantity: i64, unit_price: f64) -> Self {
        let mut table = Self::flat(base);
        table.tiers.push(PriceTier {
            min_quantity,
            unit_price,
        });
        table.tiers.sort_by(|a, b| b.min_quantity.cmp(&a.min_quantity));
        table
    }

    pub fn unit_price(&self, quantity: i64) -> f64 {
        self.tiers
            .iter()
            .find(|tier| quantity >= tier.min_quantity)
            .map(|tier| tier.unit_price)
            .unwrap_or(self.base)
    }

    pub fn total(&self, quantity: i64) -> f64 {
        quantity.max(0) as f64 * self.unit_price(quantity)
    }
}

impl Default for PriceTable {
    fn default() -> Self {
        Self::flat(UNIT_PRICE)
    }
}
