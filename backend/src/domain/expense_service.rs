//! Expense domain logic.
//!
//! Covers expense CRUD plus the category distribution behind the dashboard
//! pie chart. Distribution keeps categories in first-occurrence order and
//! rounds each share to a whole percent; a marketing route uses a fixed demo
//! dataset instead of live rows.

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use tracing::info;

use crate::domain::next_epoch_millis;
use crate::storage::ExpenseStorage;
use shared::{CategorySlice, CreateExpenseRequest, Expense, UpdateExpenseRequest};

/// Inclusive first/last day of a calendar month
pub(crate) fn month_bounds(month: u32, year: i32) -> Result<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| anyhow::anyhow!("Invalid month: {}/{}", month, year))?;
    let end = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .and_then(|d| d.pred_opt())
    .ok_or_else(|| anyhow::anyhow!("Invalid month: {}/{}", month, year))?;

    Ok((start, end))
}

/// Service for managing expenses
#[derive(Clone)]
pub struct ExpenseService {
    expense_repository: Arc<dyn ExpenseStorage>,
}

impl ExpenseService {
    pub fn new(expense_repository: Arc<dyn ExpenseStorage>) -> Self {
        Self { expense_repository }
    }

    /// Create a new expense for a user
    pub async fn add_expense(&self, user_id: &str, request: CreateExpenseRequest) -> Result<Expense> {
        info!("Creating expense for user {}: {:?}", user_id, request);

        if request.description.trim().is_empty() {
            return Err(anyhow::anyhow!("Expense description cannot be empty"));
        }
        if request.description.len() > 256 {
            return Err(anyhow::anyhow!(
                "Expense description cannot exceed 256 characters"
            ));
        }
        if request.amount <= 0.0 {
            return Err(anyhow::anyhow!("Expense amount must be positive"));
        }

        let expense = Expense {
            id: Expense::generate_id(next_epoch_millis()),
            user_id: user_id.to_string(),
            description: request.description.trim().to_string(),
            amount: request.amount,
            category: request.category.trim().to_string(),
            date: request.date,
            notes: request.notes,
            recurring: request.recurring,
            created_at: Utc::now().to_rfc3339(),
        };

        self.expense_repository.store_expense(&expense).await?;

        info!("Successfully created expense: {}", expense.id);
        Ok(expense)
    }

    /// Update named fields of an existing expense
    pub async fn update_expense(
        &self,
        user_id: &str,
        expense_id: &str,
        request: UpdateExpenseRequest,
    ) -> Result<Expense> {
        info!("Updating expense {} for user {}", expense_id, user_id);

        let mut expense = self
            .expense_repository
            .get_expense(user_id, expense_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Expense not found"))?;

        if let Some(description) = request.description {
            if description.trim().is_empty() {
                return Err(anyhow::anyhow!("Expense description cannot be empty"));
            }
            if description.len() > 256 {
                return Err(anyhow::anyhow!(
                    "Expense description cannot exceed 256 characters"
                ));
            }
            expense.description = description.trim().to_string();
        }
        if let Some(amount) = request.amount {
            if amount <= 0.0 {
                return Err(anyhow::anyhow!("Expense amount must be positive"));
            }
            expense.amount = amount;
        }
        if let Some(category) = request.category {
            expense.category = category.trim().to_string();
        }
        if let Some(date) = request.date {
            expense.date = date;
        }
        if let Some(notes) = request.notes {
            expense.notes = Some(notes);
        }
        if let Some(recurring) = request.recurring {
            expense.recurring = recurring;
        }

        self.expense_repository.update_expense(&expense).await?;

        Ok(expense)
    }

    /// Delete an expense, returning whether it existed
    pub async fn delete_expense(&self, user_id: &str, expense_id: &str) -> Result<bool> {
        info!("Deleting expense {} for user {}", expense_id, user_id);
        self.expense_repository
            .delete_expense(user_id, expense_id)
            .await
    }

    /// All expenses for a user, most recent first
    pub async fn get_expenses(&self, user_id: &str) -> Result<Vec<Expense>> {
        self.expense_repository.list_expenses(user_id).await
    }

    /// Expenses for a single calendar month
    pub async fn get_expenses_for_month(
        &self,
        user_id: &str,
        month: u32,
        year: i32,
    ) -> Result<Vec<Expense>> {
        let (start, end) = month_bounds(month, year)?;
        self.expense_repository
            .list_expenses_in_range(user_id, start, end)
            .await
    }

    /// Category breakdown of all expenses for a user.
    ///
    /// Categories appear in order of first occurrence; each slice carries its
    /// share of the grand total rounded to a whole percent. A zero grand
    /// total yields an empty list.
    pub async fn category_distribution(&self, user_id: &str) -> Result<Vec<CategorySlice>> {
        let expenses = self.expense_repository.list_expenses(user_id).await?;
        Ok(distribute(&expenses))
    }

    /// Fixed dataset backing the marketing route instead of live data
    pub fn demo_distribution() -> Vec<CategorySlice> {
        let demo = [
            ("Housing", 1200.0),
            ("Food", 750.0),
            ("Transport", 600.0),
            ("Leisure", 450.0),
        ];

        demo.iter()
            .map(|(category, amount)| CategorySlice {
                category: category.to_string(),
                amount: *amount,
                percentage: (amount / 3000.0 * 100.0).round(),
            })
            .collect()
    }
}

fn distribute(expenses: &[Expense]) -> Vec<CategorySlice> {
    let mut totals: Vec<(String, f64)> = Vec::new();
    for expense in expenses {
        match totals.iter_mut().find(|(name, _)| *name == expense.category) {
            Some((_, total)) => *total += expense.amount,
            None => totals.push((expense.category.clone(), expense.amount)),
        }
    }

    let grand_total: f64 = totals.iter().map(|(_, total)| total).sum();
    if grand_total == 0.0 {
        return Vec::new();
    }

    totals
        .into_iter()
        .map(|(category, amount)| CategorySlice {
            percentage: (amount / grand_total * 100.0).round(),
            category,
            amount,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sqlite::{ExpenseRepository, SqliteConnection};

    async fn create_test_service() -> ExpenseService {
        let db = SqliteConnection::init_test()
            .await
            .expect("Failed to init test DB");
        ExpenseService::new(Arc::new(ExpenseRepository::new(db)))
    }

    fn expense_request(description: &str, amount: f64, category: &str, day: u32) -> CreateExpenseRequest {
        CreateExpenseRequest {
            description: description.to_string(),
            amount,
            category: category.to_string(),
            date: NaiveDate::from_ymd_opt(2026, 3, day).unwrap(),
            notes: None,
            recurring: false,
        }
    }

    #[tokio::test]
    async fn test_add_expense() {
        let service = create_test_service().await;

        let expense = service
            .add_expense("user::1", expense_request("Groceries", 120.5, "Food", 10))
            .await
            .expect("Failed to create expense");

        assert_eq!(expense.description, "Groceries");
        assert_eq!(expense.amount, 120.5);
        assert_eq!(expense.user_id, "user::1");
        assert!(expense.id.starts_with("expense::"));
    }

    #[tokio::test]
    async fn test_add_expense_validation() {
        let service = create_test_service().await;

        let result = service
            .add_expense("user::1", expense_request("  ", 10.0, "Food", 1))
            .await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("cannot be empty"));

        let result = service
            .add_expense("user::1", expense_request("Lunch", -5.0, "Food", 1))
            .await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("must be positive"));
    }

    #[tokio::test]
    async fn test_list_expenses_ordered_by_date_descending() {
        let service = create_test_service().await;

        service
            .add_expense("user::1", expense_request("Oldest", 10.0, "Food", 1))
            .await
            .unwrap();
        service
            .add_expense("user::1", expense_request("Newest", 10.0, "Food", 20))
            .await
            .unwrap();
        service
            .add_expense("user::1", expense_request("Middle", 10.0, "Food", 10))
            .await
            .unwrap();

        let expenses = service.get_expenses("user::1").await.unwrap();
        let descriptions: Vec<&str> = expenses.iter().map(|e| e.description.as_str()).collect();
        assert_eq!(descriptions, vec!["Newest", "Middle", "Oldest"]);
    }

    #[tokio::test]
    async fn test_expenses_are_scoped_to_owner() {
        let service = create_test_service().await;

        let expense = service
            .add_expense("user::1", expense_request("Mine", 10.0, "Food", 1))
            .await
            .unwrap();

        // Another user cannot see or delete the row
        assert!(service.get_expenses("user::2").await.unwrap().is_empty());
        assert!(!service.delete_expense("user::2", &expense.id).await.unwrap());
        assert!(service.delete_expense("user::1", &expense.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_expense_partial_fields() {
        let service = create_test_service().await;

        let expense = service
            .add_expense("user::1", expense_request("Bus ticket", 4.5, "Transport", 5))
            .await
            .unwrap();

        let updated = service
            .update_expense(
                "user::1",
                &expense.id,
                UpdateExpenseRequest {
                    description: None,
                    amount: Some(5.0),
                    category: None,
                    date: None,
                    notes: Some("price went up".to_string()),
                    recurring: None,
                },
            )
            .await
            .expect("Failed to update expense");

        assert_eq!(updated.description, "Bus ticket");
        assert_eq!(updated.amount, 5.0);
        assert_eq!(updated.notes.as_deref(), Some("price went up"));
    }

    #[tokio::test]
    async fn test_update_missing_expense() {
        let service = create_test_service().await;

        let result = service
            .update_expense(
                "user::1",
                "expense::42",
                UpdateExpenseRequest {
                    description: None,
                    amount: Some(1.0),
                    category: None,
                    date: None,
                    notes: None,
                    recurring: None,
                },
            )
            .await;

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not found"));
    }

    #[tokio::test]
    async fn test_get_expenses_for_month() {
        let service = create_test_service().await;

        service
            .add_expense("user::1", expense_request("In March", 10.0, "Food", 15))
            .await
            .unwrap();
        service
            .add_expense(
                "user::1",
                CreateExpenseRequest {
                    description: "In April".to_string(),
                    amount: 10.0,
                    category: "Food".to_string(),
                    date: NaiveDate::from_ymd_opt(2026, 4, 2).unwrap(),
                    notes: None,
                    recurring: false,
                },
            )
            .await
            .unwrap();

        let march = service.get_expenses_for_month("user::1", 3, 2026).await.unwrap();
        assert_eq!(march.len(), 1);
        assert_eq!(march[0].description, "In March");
    }

    #[tokio::test]
    async fn test_category_distribution() {
        let service = create_test_service().await;

        service
            .add_expense("user::1", expense_request("A1", 30.0, "A", 1))
            .await
            .unwrap();
        service
            .add_expense("user::1", expense_request("A2", 20.0, "A", 2))
            .await
            .unwrap();
        service
            .add_expense("user::1", expense_request("B1", 50.0, "B", 3))
            .await
            .unwrap();

        let slices = service.category_distribution("user::1").await.unwrap();

        assert_eq!(slices.len(), 2);
        let a = slices.iter().find(|s| s.category == "A").unwrap();
        let b = slices.iter().find(|s| s.category == "B").unwrap();
        assert_eq!(a.amount, 50.0);
        assert_eq!(b.amount, 50.0);
        assert_eq!(a.percentage, 50.0);
        assert_eq!(b.percentage, 50.0);

        let total: f64 = slices.iter().map(|s| s.percentage).sum();
        assert_eq!(total, 100.0);
    }

    #[tokio::test]
    async fn test_category_distribution_empty_when_no_expenses() {
        let service = create_test_service().await;
        let slices = service.category_distribution("user::1").await.unwrap();
        assert!(slices.is_empty());
    }

    #[test]
    fn test_demo_distribution_percentages_sum_to_100() {
        let slices = ExpenseService::demo_distribution();
        assert_eq!(slices.len(), 4);
        let total: f64 = slices.iter().map(|s| s.percentage).sum();
        assert_eq!(total, 100.0);
    }

    #[test]
    fn test_month_bounds() {
        let (start, end) = month_bounds(2, 2026).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());

        let (start, end) = month_bounds(12, 2026).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2026, 12, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2026, 12, 31).unwrap());

        assert!(month_bounds(13, 2026).is_err());
    }
}
