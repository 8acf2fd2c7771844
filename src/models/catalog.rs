//! The fixed category catalog offered at input time.
//!
//! Categories on stored transactions are plain strings and are never checked
//! against this list on read; the catalog only drives what the forms offer.

use super::TransactionType;

pub(crate) const INCOME_CATEGORIES: &[&str] = &[
    "Cake Orders",
    "Classes",
    "Cooking",
    "Pastries",
    "Equipment Rental",
    "Mobile Money",
    "Other Income",
];

pub(crate) struct ExpenseSection {
    pub(crate) name: &'static str,
    pub(crate) categories: &'static [&'static str],
}

pub(crate) const EXPENSE_SECTIONS: &[ExpenseSection] = &[
    ExpenseSection {
        name: "Work Expenses",
        categories: &[
            "Electricity",
            "Gas",
            "Ingredients",
            "Transport",
            "Mobile Money Charges",
        ],
    },
    ExpenseSection {
        name: "Operating Expenses",
        categories: &[
            "Rent 1",
            "Rent 2",
            "Oscar Salary",
            "Other Salaries",
            "Airtime",
            "Internet",
            "DSTV",
            "Food",
            "Fuel",
            "Car Maintenance",
            "Bank Charges",
            "Oven Maintenance",
            "Cleaning",
        ],
    },
    ExpenseSection {
        name: "Non-Operating",
        categories: &["Tithe", "Loan Payment", "Other"],
    },
];

pub(crate) fn expense_sections() -> &'static [ExpenseSection] {
    EXPENSE_SECTIONS
}

/// Every expense category, flattened in catalog order.
pub(crate) fn all_expense_categories() -> Vec<&'static str> {
    EXPENSE_SECTIONS
        .iter()
        .flat_map(|s| s.categories.iter().copied())
        .collect()
}

pub(crate) fn categories_for(kind: TransactionType) -> Vec<&'static str> {
    match kind {
        TransactionType::Income => INCOME_CATEGORIES.to_vec(),
        TransactionType::Expense => all_expense_categories(),
    }
}

/// Name of the expense section a category belongs to.
pub(crate) fn section_of(category: &str) -> Option<&'static str> {
    EXPENSE_SECTIONS
        .iter()
        .find(|s| s.categories.contains(&category))
        .map(|s| s.name)
}

/// Case-insensitive lookup returning the catalog's spelling.
pub(crate) fn find(kind: TransactionType, name: &str) -> Option<&'static str> {
    let lower = name.trim().to_lowercase();
    categories_for(kind)
        .into_iter()
        .find(|c| c.to_lowercase() == lower)
}
