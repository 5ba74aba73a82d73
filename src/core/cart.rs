//! Cart ledger — the bag's line items and the totals derived from them.
//!
//! Totals are never stored: [`CartLedger::compute_totals`] folds the current
//! lines every time it is called, so there is nothing to go stale.  Edits that
//! name a product the ledger doesn't hold are silent no-ops; the UI is free to
//! call them speculatively.

use super::catalog::Material;

/// Subtotals strictly above this ship free.
pub const FREE_SHIPPING_THRESHOLD: u64 = 50_000;
/// Flat fee charged at or below the free-shipping threshold.
pub const FLAT_SHIPPING_FEE: u64 = 500;

// ───────────────────────────────────────── shipping ──────────

/// Shipping rule applied to a subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShippingPolicy {
    pub free_threshold: u64,
    pub flat_fee: u64,
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        Self {
            free_threshold: FREE_SHIPPING_THRESHOLD,
            flat_fee: FLAT_SHIPPING_FEE,
        }
    }
}

impl ShippingPolicy {
    pub fn shipping_for(&self, subtotal: u64) -> u64 {
        if subtotal > self.free_threshold {
            0
        } else {
            self.flat_fee
        }
    }
}

// ───────────────────────────────────────── lines ─────────────

/// One product in the bag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub product_id: String,
    /// Display name, carried for the panel.
    pub name: String,
    pub unit_price: u64,
    /// Always ≥ 1.
    pub quantity: u32,
    pub selected_material: Material,
}

impl CartLine {
    pub fn new(
        product_id: impl Into<String>,
        name: impl Into<String>,
        unit_price: u64,
        quantity: u32,
        selected_material: Material,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            unit_price,
            quantity: quantity.max(1),
            selected_material,
        }
    }

    pub fn line_total(&self) -> u64 {
        self.unit_price.saturating_mul(u64::from(self.quantity))
    }
}

/// Derived bag totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Totals {
    pub subtotal: u64,
    pub shipping: u64,
    pub total: u64,
}

// ───────────────────────────────────────── ledger ────────────

/// Ordered list of cart lines, one per product id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CartLedger {
    lines: Vec<CartLine>,
    policy: ShippingPolicy,
}

impl CartLedger {
    pub fn new(policy: ShippingPolicy) -> Self {
        Self {
            lines: Vec::new(),
            policy,
        }
    }

    /// Add lines to the ledger.  A line whose product is already present
    /// replaces the existing one in place (same position, new contents).
    pub fn add_or_seed(&mut self, lines: impl IntoIterator<Item = CartLine>) {
        for mut line in lines {
            line.quantity = line.quantity.max(1);
            match self
                .lines
                .iter_mut()
                .find(|l| l.product_id == line.product_id)
            {
                Some(existing) => *existing = line,
                None => self.lines.push(line),
            }
        }
        tracing::debug!(lines = self.lines.len(), "cart seeded");
    }

    /// `quantity = max(1, quantity + delta)` for the matching line.
    pub fn increment_quantity(&mut self, product_id: &str, delta: i64) {
        let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) else {
            return;
        };
        let next = i64::from(line.quantity).saturating_add(delta);
        line.quantity = next.clamp(1, i64::from(u32::MAX)) as u32;
        tracing::debug!(product_id, quantity = line.quantity, "cart quantity");
    }

    /// Delete the line for `product_id` entirely.
    pub fn remove_line(&mut self, product_id: &str) {
        let before = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);
        if self.lines.len() != before {
            tracing::debug!(product_id, "cart line removed");
        }
    }

    /// Subtotal, shipping and grand total of the current lines.
    ///
    /// An empty bag owes nothing, shipping included.
    pub fn compute_totals(&self) -> Totals {
        if self.lines.is_empty() {
            return Totals::default();
        }
        let subtotal = self
            .lines
            .iter()
            .fold(0u64, |sum, l| sum.saturating_add(l.line_total()));
        let shipping = self.policy.shipping_for(subtotal);
        Totals {
            subtotal,
            shipping,
            total: subtotal.saturating_add(shipping),
        }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, product_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn policy(&self) -> ShippingPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: ShippingPolicy) {
        self.policy = policy;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: &str, price: u64, qty: u32) -> CartLine {
        CartLine::new(id, format!("Piece {id}"), price, qty, Material::Gold)
    }

    fn seeded() -> CartLedger {
        let mut ledger = CartLedger::default();
        ledger.add_or_seed([line("1", 12_500, 1), line("3", 8_400, 1)]);
        ledger
    }

    #[test]
    fn demo_bag_totals() {
        let totals = seeded().compute_totals();
        assert_eq!(
            totals,
            Totals {
                subtotal: 20_900,
                shipping: 500,
                total: 21_400,
            }
        );
    }

    #[test]
    fn decrement_clamps_at_one() {
        let mut ledger = seeded();
        ledger.increment_quantity("1", -5);
        assert_eq!(ledger.line("1").map(|l| l.quantity), Some(1));
        ledger.increment_quantity("1", i64::MIN);
        assert_eq!(ledger.line("1").map(|l| l.quantity), Some(1));
    }

    #[test]
    fn quantity_never_drops_below_one() {
        let mut ledger = seeded();
        for delta in [3, -1, -10, 2, -2, -2, 7, -100, 1] {
            ledger.increment_quantity("3", delta);
            assert!(ledger.lines().iter().all(|l| l.quantity >= 1));
        }
    }

    #[test]
    fn removed_line_stays_removed() {
        let mut ledger = seeded();
        for _ in 0..3 {
            ledger.increment_quantity("1", 3);
        }
        assert_eq!(ledger.line("1").map(|l| l.quantity), Some(10));

        let mut ledger = seeded();
        ledger.increment_quantity("1", 3);
        assert_eq!(ledger.line("1").map(|l| l.quantity), Some(4));
        ledger.remove_line("1");
        assert!(ledger.line("1").is_none());
        ledger.increment_quantity("1", 1);
        assert!(ledger.line("1").is_none());
        assert_eq!(ledger.compute_totals().subtotal, 8_400);
    }

    #[test]
    fn unknown_product_is_a_no_op() {
        let mut ledger = seeded();
        let before = ledger.clone();
        ledger.increment_quantity("missing", 4);
        ledger.remove_line("missing");
        assert_eq!(ledger, before);
    }

    #[test]
    fn shipping_flips_above_threshold() {
        let mut ledger = seeded();
        ledger.add_or_seed([line("9", 40_000, 1)]);
        let totals = ledger.compute_totals();
        assert_eq!(totals.subtotal, 60_900);
        assert_eq!(totals.shipping, 0);
        assert_eq!(totals.total, 60_900);
    }

    #[test]
    fn threshold_is_exclusive() {
        let mut ledger = CartLedger::default();
        ledger.add_or_seed([line("a", 50_000, 1)]);
        assert_eq!(ledger.compute_totals().shipping, 500);
        ledger.increment_quantity("a", 1);
        assert_eq!(ledger.compute_totals().shipping, 0);
    }

    #[test]
    fn totals_add_up_for_any_bag() {
        let mut ledger = CartLedger::default();
        for (i, price) in [100u64, 7_000, 12_345, 33_333].iter().enumerate() {
            ledger.add_or_seed([line(&i.to_string(), *price, 2)]);
            let t = ledger.compute_totals();
            assert_eq!(t.total, t.subtotal + t.shipping);
            assert_eq!(t.shipping == 0, t.subtotal > FREE_SHIPPING_THRESHOLD);
        }
    }

    #[test]
    fn empty_bag_owes_nothing() {
        let mut ledger = seeded();
        ledger.remove_line("1");
        ledger.remove_line("3");
        assert!(ledger.is_empty());
        assert_eq!(ledger.compute_totals(), Totals::default());
    }

    #[test]
    fn duplicate_seed_overwrites_in_place() {
        let mut ledger = seeded();
        ledger.add_or_seed([line("1", 12_500, 3)]);
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.lines()[0].product_id, "1");
        assert_eq!(ledger.lines()[0].quantity, 3);
    }

    #[test]
    fn custom_policy_is_honoured() {
        let mut ledger = CartLedger::new(ShippingPolicy {
            free_threshold: 10_000,
            flat_fee: 900,
        });
        ledger.add_or_seed([line("1", 9_000, 1)]);
        assert_eq!(ledger.compute_totals().total, 9_900);
        ledger.increment_quantity("1", 1);
        assert_eq!(ledger.compute_totals().total, 18_000);
    }

    #[test]
    fn totals_are_side_effect_free() {
        let ledger = seeded();
        let before = ledger.clone();
        let a = ledger.compute_totals();
        let b = ledger.compute_totals();
        assert_eq!(a, b);
        assert_eq!(ledger, before);
    }
}
