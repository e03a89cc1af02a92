use rust_decimal::Decimal;

use crate::calculations::line_total;
use crate::models::{TreatmentCategory, TreatmentStatus};

/// One billable item within a treatment plan.
///
/// `base_cost` starts from the catalog price but is independently editable
/// per line. `total_cost` always equals `base_cost * quantity +
/// material_cost`; the setters recompute it on every write, so a stale
/// total cannot be observed. The wire representation lives in the payload
/// layer, which re-derives totals on the way in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostLine {
    pub category_id: String,
    pub category_name: String,
    base_cost: Decimal,
    quantity: u32,
    material_cost: Decimal,
    total_cost: Decimal,
}

impl CostLine {
    /// A fresh line from a catalog entry: quantity 1, no material cost.
    pub fn from_category(category: &TreatmentCategory) -> Self {
        Self::with_values(
            category.id.clone(),
            category.name.clone(),
            category.base_cost,
            1,
            Decimal::ZERO,
        )
    }

    /// Builds a line from explicit values, deriving the total.
    ///
    /// Used when reconstructing from wire data as well: the stored total is
    /// deliberately discarded and re-derived.
    pub fn with_values(
        category_id: String,
        category_name: String,
        base_cost: Decimal,
        quantity: u32,
        material_cost: Decimal,
    ) -> Self {
        Self {
            category_id,
            category_name,
            base_cost,
            quantity,
            material_cost,
            total_cost: line_total(base_cost, quantity, material_cost),
        }
    }

    pub fn base_cost(&self) -> Decimal {
        self.base_cost
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn material_cost(&self) -> Decimal {
        self.material_cost
    }

    pub fn total_cost(&self) -> Decimal {
        self.total_cost
    }

    pub fn set_base_cost(&mut self, base_cost: Decimal) {
        self.base_cost = base_cost;
        self.recompute_total();
    }

    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
        self.recompute_total();
    }

    pub fn set_material_cost(&mut self, material_cost: Decimal) {
        self.material_cost = material_cost;
        self.recompute_total();
    }

    fn recompute_total(&mut self) {
        self.total_cost = line_total(self.base_cost, self.quantity, self.material_cost);
    }
}

/// A named bundle of cost lines with its own date range and status.
///
/// Plan-level totals are derived on read, never stored, so they cannot go
/// stale relative to `costs`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreatmentPlan {
    pub name: Option<String>,
    /// Free-text `YYYY-MM-DD`; the API does not validate the format.
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: TreatmentStatus,
    pub costs: Vec<CostLine>,
}

impl TreatmentPlan {
    /// Sum of every line's total cost.
    pub fn total_cost(&self) -> Decimal {
        self.costs.iter().map(CostLine::total_cost).sum()
    }

    /// Sum of every line's material cost.
    pub fn total_material_cost(&self) -> Decimal {
        self.costs.iter().map(CostLine::material_cost).sum()
    }
}
