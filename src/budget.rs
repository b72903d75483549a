//! Drilling spend against the round budget
//!
//! Reporting only. Going over budget never stops play.

use serde::{Deserialize, Serialize};

/// Where the accumulated cost sits relative to the budget
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BudgetStatus {
    /// Spend is at or under budget, with this much left
    Under { remaining: f64 },
    /// Spend exceeds budget by this much
    Over { overrun: f64 },
}

impl BudgetStatus {
    pub fn new(budget: f64, spent: f64) -> Self {
        let diff = budget - spent;
        if diff >= 0.0 {
            BudgetStatus::Under { remaining: diff }
        } else {
            BudgetStatus::Over { overrun: -diff }
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self, BudgetStatus::Over { .. })
    }

    /// Signed margin (negative when over)
    pub fn margin(&self) -> f64 {
        match *self {
            BudgetStatus::Under { remaining } => remaining,
            BudgetStatus::Over { overrun } => -overrun,
        }
    }
}

/// Format a dollar amount as `$1,234.56`
pub fn format_money(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}.{frac:02}")
}
