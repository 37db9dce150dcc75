use std::collections::BTreeMap;

use crate::ledger::Ledger;

/// Share of a budget at which a category is flagged as approaching its limit.
const ON_TRACK_THRESHOLD: f64 = 0.8;

/// Total and per-category spending for a ledger.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub total: f64,
    pub by_category: BTreeMap<String, f64>,
}

impl Summary {
    pub fn is_empty(&self) -> bool {
        self.by_category.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetHealth {
    UnderBudget,
    OnTrack,
    OverBudget,
}

/// Spending compared against the budget configured for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBudgetStatus {
    pub category: String,
    pub budget: f64,
    pub spent: f64,
    pub remaining: f64,
    pub health: BudgetHealth,
}

pub struct SummaryService;

impl SummaryService {
    pub fn total_spending(ledger: &Ledger) -> f64 {
        ledger.history().iter().map(|expense| expense.amount()).sum()
    }

    /// Groups amounts by exact category name, ordered by category.
    pub fn category_spending(ledger: &Ledger) -> BTreeMap<String, f64> {
        let mut totals: BTreeMap<String, f64> = BTreeMap::new();
        for expense in ledger.history() {
            *totals.entry(expense.category().to_string()).or_insert(0.0) += expense.amount();
        }
        totals
    }

    pub fn summarize(ledger: &Ledger) -> Summary {
        Summary {
            total: Self::total_spending(ledger),
            by_category: Self::category_spending(ledger),
        }
    }

    /// Reports every budgeted category, including ones with no spending yet.
    pub fn budget_status(ledger: &Ledger) -> Vec<CategoryBudgetStatus> {
        let spending = Self::category_spending(ledger);
        ledger
            .budgets()
            .iter()
            .map(|(category, budget)| {
                let spent = spending.get(category).copied().unwrap_or(0.0);
                CategoryBudgetStatus {
                    category: category.to_string(),
                    budget,
                    spent,
                    remaining: budget - spent,
                    health: classify(budget, spent),
                }
            })
            .collect()
    }
}

fn classify(budget: f64, spent: f64) -> BudgetHealth {
    if spent > budget {
        BudgetHealth::OverBudget
    } else if spent >= budget * ON_TRACK_THRESHOLD && spent > 0.0 {
        BudgetHealth::OnTrack
    } else {
        BudgetHealth::UnderBudget
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_ledger() -> Ledger {
        let mut ledger = Ledger::new();
        ledger.record_expense(12.50, "Food", "Lunch");
        ledger.record_expense(7.25, "Food", "Snack");
        ledger.record_expense(40.00, "Transport", "Taxi");
        ledger
    }

    #[test]
    fn summarizes_sample_expenses() {
        let summary = SummaryService::summarize(&sample_ledger());

        assert!((summary.total - 59.75).abs() < 1e-9);
        assert_eq!(summary.by_category.len(), 2);
        assert!((summary.by_category["Food"] - 19.75).abs() < 1e-9);
        assert!((summary.by_category["Transport"] - 40.0).abs() < 1e-9);
    }

    #[test]
    fn empty_ledger_has_zero_total_and_no_categories() {
        let ledger = Ledger::new();
        assert_eq!(SummaryService::total_spending(&ledger), 0.0);
        assert!(SummaryService::category_spending(&ledger).is_empty());
        assert!(SummaryService::summarize(&ledger).is_empty());
    }

    #[test]
    fn categories_differing_in_case_stay_separate() {
        let mut ledger = Ledger::new();
        ledger.record_expense(1.0, "food", "a");
        ledger.record_expense(2.0, "Food", "b");

        let keys: Vec<_> = SummaryService::category_spending(&ledger)
            .into_keys()
            .collect();
        assert_eq!(keys, vec!["Food".to_string(), "food".to_string()]);
    }

    #[test]
    fn budgets_do_not_create_spending_rows() {
        let mut ledger = sample_ledger();
        ledger.set_budget("Rent", 900.0).unwrap();
        assert!(!SummaryService::category_spending(&ledger).contains_key("Rent"));
    }

    #[test]
    fn budget_status_classifies_categories() {
        let mut ledger = sample_ledger();
        ledger.set_budget("Food", 20.0).unwrap();
        ledger.set_budget("Transport", 30.0).unwrap();
        ledger.set_budget("Rent", 900.0).unwrap();

        let status = SummaryService::budget_status(&ledger);
        let health: Vec<_> = status
            .iter()
            .map(|row| (row.category.as_str(), row.health))
            .collect();
        assert_eq!(
            health,
            vec![
                ("Food", BudgetHealth::OnTrack),
                ("Rent", BudgetHealth::UnderBudget),
                ("Transport", BudgetHealth::OverBudget),
            ]
        );
        let rent = &status[1];
        assert_eq!(rent.spent, 0.0);
        assert_eq!(rent.remaining, 900.0);
    }
}
