use std::mem;

use tracing::info;

use crate::domain::{
    common::entities::app_errors::CoreError, ingredient::entities::Ingredient,
    recipe::entities::RecipeSuggestion,
};

use super::{
    entities::{DeductionEntry, DeductionPlan},
    services::build_deduction_plan,
};

/// What the user agreed to deduct. Inventory is not decremented.
#[derive(Debug, Clone, PartialEq)]
pub struct CookSummary {
    pub recipe_name: String,
    pub deductions: Vec<DeductionEntry>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum CookState {
    #[default]
    Browsing,
    RecipeSelected {
        recipe: RecipeSuggestion,
    },
    ReconciliationBuilt {
        recipe: RecipeSuggestion,
        plan: DeductionPlan,
    },
    Confirmed(CookSummary),
    Cancelled,
}

impl CookState {
    pub fn name(&self) -> &'static str {
        match self {
            CookState::Browsing => "browsing",
            CookState::RecipeSelected { .. } => "recipe selected",
            CookState::ReconciliationBuilt { .. } => "reconciliation built",
            CookState::Confirmed(_) => "confirmed",
            CookState::Cancelled => "cancelled",
        }
    }
}

/// The cook-confirmation step:
/// `Browsing -> RecipeSelected -> ReconciliationBuilt -> Confirmed | Cancelled`.
#[derive(Debug, Clone, Default)]
pub struct CookFlow {
    state: CookState,
}

impl CookFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &CookState {
        &self.state
    }

    pub fn plan(&self) -> Option<&DeductionPlan> {
        match &self.state {
            CookState::ReconciliationBuilt { plan, .. } => Some(plan),
            _ => None,
        }
    }

    fn invalid(&self, action: &'static str) -> CoreError {
        CoreError::InvalidTransition {
            action,
            state: self.state.name(),
        }
    }

    pub fn select(&mut self, recipe: RecipeSuggestion) -> Result<(), CoreError> {
        if !matches!(self.state, CookState::Browsing) {
            return Err(self.invalid("select a recipe"));
        }
        self.state = CookState::RecipeSelected { recipe };
        Ok(())
    }

    pub fn reconcile(&mut self, inventory: &[Ingredient]) -> Result<&DeductionPlan, CoreError> {
        let recipe = match mem::take(&mut self.state) {
            CookState::RecipeSelected { recipe } => recipe,
            other => {
                self.state = other;
                return Err(self.invalid("reconcile"));
            }
        };

        let plan = build_deduction_plan(&recipe, inventory);
        self.state = CookState::ReconciliationBuilt { recipe, plan };
        self.plan().ok_or_else(|| self.invalid("reconcile"))
    }

    pub fn adjust(
        &mut self,
        index: usize,
        quantity: Option<String>,
        unit: Option<String>,
    ) -> Result<&DeductionEntry, CoreError> {
        match &mut self.state {
            CookState::ReconciliationBuilt { plan, .. } => plan.adjust(index, quantity, unit),
            state => Err(CoreError::InvalidTransition {
                action: "adjust a deduction",
                state: state.name(),
            }),
        }
    }

    pub fn confirm(&mut self) -> Result<CookSummary, CoreError> {
        match mem::take(&mut self.state) {
            CookState::ReconciliationBuilt { recipe, plan } => {
                let summary = CookSummary {
                    recipe_name: recipe.name,
                    deductions: plan.into_entries(),
                };
                info!(
                    recipe = %summary.recipe_name,
                    deductions = summary.deductions.len(),
                    "Cooking confirmed"
                );
                self.state = CookState::Confirmed(summary.clone());
                Ok(summary)
            }
            other => {
                self.state = other;
                Err(self.invalid("confirm"))
            }
        }
    }

    pub fn cancel(&mut self) -> Result<(), CoreError> {
        match self.state {
            CookState::RecipeSelected { .. } | CookState::ReconciliationBuilt { .. } => {
                self.state = CookState::Cancelled;
                Ok(())
            }
            _ => Err(self.invalid("cancel")),
        }
    }

    /// Back to browsing from any state; the plan is discarded.
    pub fn reset(&mut self) {
        self.state = CookState::Browsing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::recipe::entities::RecipeIngredient;

    fn omelette() -> RecipeSuggestion {
        RecipeSuggestion {
            name: "Omelette".to_string(),
            available_ingredients: vec![
                RecipeIngredient::new("Eggs", "2", "pcs"),
                RecipeIngredient::new("Chives", "1", "tbsp"),
            ],
            ..Default::default()
        }
    }

    fn fridge() -> Vec<Ingredient> {
        vec![Ingredient {
            id: "1".to_string(),
            name: "Egg".to_string(),
            quantity: "6".to_string(),
            unit: "pcs".to_string(),
            expiry_date: None,
            nutrition: None,
        }]
    }

    #[test]
    fn test_confirm_produces_summary() {
        let mut flow = CookFlow::new();
        flow.select(omelette()).unwrap();
        assert_eq!(flow.reconcile(&fridge()).unwrap().len(), 1);
        flow.adjust(0, Some("3".to_string()), None).unwrap();

        let summary = flow.confirm().unwrap();
        assert_eq!(summary.recipe_name, "Omelette");
        assert_eq!(summary.deductions[0].deduct_quantity, "3");
        assert_eq!(summary.deductions[0].matched.quantity, "6");
        assert!(matches!(flow.state(), CookState::Confirmed(_)));
    }

    #[test]
    fn test_cancel_discards_plan() {
        let mut flow = CookFlow::new();
        flow.select(omelette()).unwrap();
        flow.reconcile(&fridge()).unwrap();
        flow.cancel().unwrap();

        assert_eq!(flow.state(), &CookState::Cancelled);
        assert!(flow.plan().is_none());
    }

    #[test]
    fn test_invalid_transitions() {
        let mut flow = CookFlow::new();
        assert_eq!(
            flow.confirm().unwrap_err(),
            CoreError::InvalidTransition {
                action: "confirm",
                state: "browsing"
            }
        );
        assert!(flow.reconcile(&fridge()).is_err());
        assert!(flow.cancel().is_err());

        flow.select(omelette()).unwrap();
        assert!(flow.select(omelette()).is_err());
        assert!(flow.adjust(0, None, None).is_err());
        // A failed transition leaves the state untouched.
        assert!(flow.confirm().is_err());
        assert!(matches!(flow.state(), CookState::RecipeSelected { .. }));

        flow.reconcile(&fridge()).unwrap();
        flow.confirm().unwrap();
        assert!(flow.cancel().is_err());

        flow.reset();
        assert_eq!(flow.state(), &CookState::Browsing);
    }
}
