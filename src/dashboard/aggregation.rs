//! Transaction data aggregation for charts.
//!
//! Provides functions to total transactions by month and to group expenses
//! by category.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use time::Date;

use crate::{
    category::{Category, CategoryId},
    transaction::{Transaction, TransactionType},
};

/// The label used for expenses whose category no longer exists.
pub(super) const UNCATEGORIZED_LABEL: &str = "Sem categoria";

/// The color used for expenses whose category no longer exists.
const UNCATEGORIZED_COLOR: &str = "#9CA3AF";

/// The income and expense totals for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTotal {
    /// The month formatted as `YYYY-MM`.
    pub month: String,
    pub income: f64,
    pub expense: f64,
}

/// The total spent in one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    /// `None` for expenses whose category was deleted.
    pub category_id: Option<CategoryId>,
    pub name: String,
    pub color: String,
    pub total: f64,
}

/// Totals income and expenses by month.
///
/// # Returns
/// One entry per month that has at least one transaction, in chronological order.
pub(super) fn monthly_totals(transactions: &[Transaction]) -> Vec<MonthlyTotal> {
    let mut totals: BTreeMap<(i32, u8), (f64, f64)> = BTreeMap::new();

    for transaction in transactions {
        let month = month_key(transaction.date);
        let (income, expense) = totals.entry(month).or_insert((0.0, 0.0));

        match transaction.transaction_type {
            TransactionType::Income => *income += transaction.amount,
            TransactionType::Expense => *expense += transaction.amount,
        }
    }

    totals
        .into_iter()
        .map(|((year, month), (income, expense))| MonthlyTotal {
            month: format!("{year:04}-{month:02}"),
            income,
            expense,
        })
        .collect()
}

fn month_key(date: Date) -> (i32, u8) {
    (date.year(), u8::from(date.month()))
}

/// Groups expense transactions by category and totals each group.
///
/// Income is ignored. Expenses that reference a category missing from
/// `categories` are grouped under [UNCATEGORIZED_LABEL].
///
/// # Returns
/// The groups sorted by total, largest first. Ties are sorted by name.
pub(super) fn expenses_by_category(
    transactions: &[Transaction],
    categories: &[Category],
) -> Vec<CategoryTotal> {
    let categories_by_id: HashMap<CategoryId, &Category> = categories
        .iter()
        .map(|category| (category.id, category))
        .collect();

    let mut totals: HashMap<Option<CategoryId>, f64> = HashMap::new();

    for transaction in transactions
        .iter()
        .filter(|transaction| transaction.transaction_type == TransactionType::Expense)
    {
        let key = categories_by_id
            .contains_key(&transaction.category_id)
            .then_some(transaction.category_id);

        *totals.entry(key).or_insert(0.0) += transaction.amount;
    }

    let mut grouped: Vec<CategoryTotal> = totals
        .into_iter()
        .map(|(category_id, total)| {
            match category_id.and_then(|id| categories_by_id.get(&id)) {
                Some(category) => CategoryTotal {
                    category_id,
                    name: category.name.clone(),
                    color: category.color.clone(),
                    total,
                },
                None => CategoryTotal {
                    category_id: None,
                    name: UNCATEGORIZED_LABEL.to_owned(),
                    color: UNCATEGORIZED_COLOR.to_owned(),
                    total,
                },
            }
        })
        .collect();

    grouped.sort_by(|a, b| b.total.total_cmp(&a.total).then_with(|| a.name.cmp(&b.name)));

    grouped
}
