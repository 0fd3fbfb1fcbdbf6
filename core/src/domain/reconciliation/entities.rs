use crate::domain::{
    common::entities::app_errors::CoreError, ingredient::entities::Ingredient,
    recipe::entities::RecipeIngredient,
};

use super::services::parse_quantity;

/// One proposed deduction: a recipe requirement, the fridge row it matched and
/// the amount to take from it.
#[derive(Debug, Clone, PartialEq)]
pub struct DeductionEntry {
    pub requirement: RecipeIngredient,
    pub matched: Ingredient,
    pub deduct_quantity: String,
    pub deduct_unit: String,
    pub can_deduct: bool,
}

impl DeductionEntry {
    pub fn new(requirement: RecipeIngredient, matched: Ingredient) -> Self {
        Self {
            deduct_quantity: requirement.quantity.clone(),
            deduct_unit: requirement.unit.clone(),
            requirement,
            matched,
            can_deduct: true,
        }
    }

    /// Proposed and stocked units are both set and differ. A warning only.
    pub fn unit_mismatch(&self) -> bool {
        let proposed = self.deduct_unit.trim();
        let stocked = self.matched.unit.trim();
        !proposed.is_empty() && !stocked.is_empty() && !proposed.eq_ignore_ascii_case(stocked)
    }

    pub fn exceeds_stock(&self) -> bool {
        match (
            parse_quantity(&self.deduct_quantity),
            parse_quantity(&self.matched.quantity),
        ) {
            (Some(proposed), Some(stock)) => proposed > stock,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeductionPlan {
    entries: Vec<DeductionEntry>,
}

impl DeductionPlan {
    pub fn new(entries: Vec<DeductionEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[DeductionEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Overrides the proposed quantity and/or unit of the entry at `index`.
    pub fn adjust(
        &mut self,
        index: usize,
        quantity: Option<String>,
        unit: Option<String>,
    ) -> Result<&DeductionEntry, CoreError> {
        let len = self.entries.len();
        let entry = self.entries.get_mut(index).ok_or_else(|| {
            CoreError::Validation(format!(
                "No deduction #{} (plan has {} entries)",
                index + 1,
                len
            ))
        })?;

        if let Some(quantity) = quantity {
            entry.deduct_quantity = quantity.trim().to_string();
        }
        if let Some(unit) = unit {
            entry.deduct_unit = unit.trim().to_string();
        }
        Ok(entry)
    }

    pub fn into_entries(self) -> Vec<DeductionEntry> {
        self.entries
    }
}
