use super::Month;

/// Identifies one budget ceiling: a category within a month.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct BudgetKey {
    pub(crate) month: Month,
    pub(crate) category: String,
}

impl BudgetKey {
    pub(crate) fn new(month: Month, category: impl Into<String>) -> Self {
        Self {
            month,
            category: category.into(),
        }
    }

    /// Stored form: `"{YYYY-MM}-{category}"`.
    pub(crate) fn to_storage_key(&self) -> String {
        format!("{}-{}", self.month, self.category)
    }

    pub(crate) fn from_storage_key(key: &str) -> Option<Self> {
        let month = Month::parse(key.get(..7)?)?;
        let category = key.get(7..)?.strip_prefix('-')?;
        if category.is_empty() {
            return None;
        }
        Some(Self::new(month, category))
    }
}
