use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Expense ID in format: "expense::<epoch_millis>"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    /// ID of the user this expense belongs to
    pub user_id: String,
    /// Description of the expense (max 256 characters)
    pub description: String,
    /// Expense amount, always positive
    pub amount: f64,
    /// Category name, e.g. "Food" or "Transport"
    pub category: String,
    /// Day the expense occurred
    pub date: NaiveDate,
    /// Optional free-form notes
    pub notes: Option<String>,
    /// Whether this expense repeats every month
    pub recurring: bool,
    /// RFC 3339 timestamp
    pub created_at: String,
}

/// Income ID in format: "income::<epoch_millis>"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Income {
    pub id: String,
    /// ID of the user this income belongs to
    pub user_id: String,
    /// Description of the income (max 256 characters)
    pub description: String,
    /// Income amount, always positive
    pub amount: f64,
    /// Where the money came from, e.g. "Salary"
    pub source: String,
    /// Day the income was received
    pub date: NaiveDate,
    /// Whether this income repeats every month
    pub recurring: bool,
    /// RFC 3339 timestamp
    pub created_at: String,
}

/// Budget ID in format: "budget::<epoch_millis>"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: String,
    /// ID of the user this budget belongs to
    pub user_id: String,
    /// Category the budget applies to
    pub category: String,
    /// Budgeted amount for the month
    pub amount: f64,
    /// Month the budget applies to (1-12)
    pub month: u32,
    /// Year the budget applies to
    pub year: i32,
    /// RFC 3339 timestamp
    pub created_at: String,
}

/// Goal ID in format: "goal::<epoch_millis>"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    /// ID of the user this goal belongs to
    pub user_id: String,
    /// Short title, e.g. "Emergency fund"
    pub title: String,
    /// Amount to reach
    pub target_amount: f64,
    /// Amount saved so far
    pub current_amount: f64,
    /// Day the goal should be reached by
    pub target_date: NaiveDate,
    /// Optional longer description
    pub description: Option<String>,
    /// RFC 3339 timestamp
    pub created_at: String,
}

/// Savings overview, one row per user (upserted, never listed)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsOverview {
    /// ID of the user this overview belongs to
    pub user_id: String,
    /// Total savings balance
    pub balance: f64,
    /// Amount saved this month
    pub monthly_saved: f64,
    /// Investment returns this month
    pub monthly_returns: f64,
    /// Percentage of income saved (0-100)
    pub savings_rate: f64,
    /// RFC 3339 timestamp of the last update
    pub updated_at: String,
}

/// Subscription tier, gates feature access in the UI layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanType {
    Free,
    Pro,
}

impl PlanType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanType::Free => "free",
            PlanType::Pro => "pro",
        }
    }

    pub fn from_str_or_free(value: &str) -> Self {
        match value {
            "pro" => PlanType::Pro,
            _ => PlanType::Free,
        }
    }
}

impl fmt::Display for PlanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Subscription record, one row per user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    /// ID of the user this subscription belongs to
    pub user_id: String,
    pub plan_type: PlanType,
    pub is_active: bool,
    /// Day the current billing period ends, if known
    pub end_date: Option<NaiveDate>,
    /// RFC 3339 timestamp of the last change
    pub updated_at: String,
}

/// Kind of notification for rendering purposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Warning,
    Success,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Info => "info",
            NotificationKind::Warning => "warning",
            NotificationKind::Success => "success",
        }
    }

    pub fn from_str_or_info(value: &str) -> Self {
        match value {
            "warning" => NotificationKind::Warning,
            "success" => NotificationKind::Success,
            _ => NotificationKind::Info,
        }
    }
}

/// Notification ID in format: "notification::<epoch_millis>"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    /// ID of the user this notification belongs to
    pub user_id: String,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub read: bool,
    /// RFC 3339 timestamp
    pub created_at: String,
}

/// User account row, looked up by email for account deletion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    /// RFC 3339 timestamp
    pub created_at: String,
}

/// User profile and display preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// ID of the user this profile belongs to
    pub user_id: String,
    pub name: String,
    pub phone: Option<String>,
    pub occupation: Option<String>,
    pub avatar_url: Option<String>,
    /// UI theme, "light" or "dark"
    pub theme: String,
    /// Preferred display currency code, e.g. "BRL"
    pub currency: String,
    /// Preferred date format, e.g. "DD/MM/YYYY"
    pub date_format: String,
    /// Day of the month the budgeting period starts on (1-28)
    pub month_start_day: u32,
    /// RFC 3339 timestamp of the last update
    pub updated_at: String,
}

// ---------------------------------------------------------------------------
// Expense DTOs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateExpenseRequest {
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub date: NaiveDate,
    pub notes: Option<String>,
    #[serde(default)]
    pub recurring: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateExpenseRequest {
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub category: Option<String>,
    pub date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub recurring: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseResponse {
    pub expense: Expense,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseListResponse {
    pub expenses: Vec<Expense>,
}

/// Result of deleting a record; false when nothing matched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteRecordResponse {
    pub success: bool,
}

/// One slice of the category distribution chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySlice {
    pub category: String,
    pub amount: f64,
    /// Share of the grand total, rounded to a whole percent
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseDistributionResponse {
    pub slices: Vec<CategorySlice>,
}

// ---------------------------------------------------------------------------
// Income DTOs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateIncomeRequest {
    pub description: String,
    pub amount: f64,
    pub source: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub recurring: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateIncomeRequest {
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub source: Option<String>,
    pub date: Option<NaiveDate>,
    pub recurring: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeResponse {
    pub income: Income,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeListResponse {
    pub incomes: Vec<Income>,
}

// ---------------------------------------------------------------------------
// Budget DTOs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateBudgetRequest {
    pub category: String,
    pub amount: f64,
    pub month: u32,
    pub year: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateBudgetRequest {
    pub category: Option<String>,
    pub amount: Option<f64>,
    pub month: Option<u32>,
    pub year: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetResponse {
    pub budget: Budget,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetListResponse {
    pub budgets: Vec<Budget>,
}

/// One budget compared against the month's summed expenses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetReportRow {
    pub budget: Budget,
    /// Total spent in this category for the report month
    pub spent: f64,
    /// Budgeted amount minus spent; negative when over budget
    pub remaining: f64,
    pub over_budget: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetReportResponse {
    pub month: u32,
    pub year: i32,
    pub rows: Vec<BudgetReportRow>,
}

// ---------------------------------------------------------------------------
// Goal DTOs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateGoalRequest {
    pub title: String,
    pub target_amount: f64,
    #[serde(default)]
    pub current_amount: f64,
    pub target_date: NaiveDate,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateGoalRequest {
    pub title: Option<String>,
    pub target_amount: Option<f64>,
    pub current_amount: Option<f64>,
    pub target_date: Option<NaiveDate>,
    pub description: Option<String>,
}

/// A goal together with its derived progress, computed at read time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalSummary {
    pub goal: Goal,
    /// current_amount / target_amount * 100
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalResponse {
    pub goal: GoalSummary,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalListResponse {
    pub goals: Vec<GoalSummary>,
}

// ---------------------------------------------------------------------------
// Savings DTOs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateSavingsRequest {
    pub balance: f64,
    pub monthly_saved: f64,
    pub monthly_returns: f64,
    pub savings_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsResponse {
    pub overview: SavingsOverview,
}

// ---------------------------------------------------------------------------
// Subscription DTOs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionStatusResponse {
    pub plan_type: PlanType,
    pub is_active: bool,
    /// True only for an active "pro" plan
    pub is_pro: bool,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutCompleteRequest {
    pub plan_type: PlanType,
    /// Amount paid, forwarded to the analytics sink
    pub amount: Option<f64>,
    /// Currency the payment was made in
    pub currency: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutCompleteResponse {
    pub subscription: Subscription,
    pub success_message: String,
}

// ---------------------------------------------------------------------------
// Notification DTOs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationListResponse {
    pub notifications: Vec<Notification>,
}

/// Best-effort mutation result; `success: false` never blocks the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationActionResponse {
    pub success: bool,
}

// ---------------------------------------------------------------------------
// Profile DTOs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub occupation: Option<String>,
    pub avatar_url: Option<String>,
    pub theme: Option<String>,
    pub currency: Option<String>,
    pub date_format: Option<String>,
    pub month_start_day: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub profile: Profile,
    pub success_message: String,
}

// ---------------------------------------------------------------------------
// Analytics
// ---------------------------------------------------------------------------

/// Parameters for a fire-and-forget analytics event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackEventRequest {
    pub value: Option<f64>,
    pub currency: Option<String>,
    pub email: Option<String>,
}

// ---------------------------------------------------------------------------
// Account deletion and family invites
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteUserRequest {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteUserResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InviteFamilyMemberRequest {
    pub email: String,
    pub family_plan_id: String,
    pub inviter_name: Option<String>,
    pub inviter_email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InviteFamilyMemberResponse {
    pub success: bool,
    pub message: Option<String>,
    pub error: Option<String>,
}

// ---------------------------------------------------------------------------
// Record IDs
// ---------------------------------------------------------------------------

/// Build a record ID from an entity prefix and creation timestamp
pub fn generate_record_id(prefix: &str, epoch_millis: u64) -> String {
    format!("{}::{}", prefix, epoch_millis)
}

/// Parse a record ID back into its creation timestamp
pub fn parse_record_id(prefix: &str, id: &str) -> Result<u64, RecordIdError> {
    let parts: Vec<&str> = id.split("::").collect();
    if parts.len() != 2 || parts[0] != prefix {
        return Err(RecordIdError::InvalidFormat);
    }

    parts[1]
        .parse::<u64>()
        .map_err(|_| RecordIdError::InvalidTimestamp)
}

#[derive(Debug, Clone, PartialEq)]
pub enum RecordIdError {
    InvalidFormat,
    InvalidTimestamp,
}

impl fmt::Display for RecordIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordIdError::InvalidFormat => write!(f, "Invalid record ID format"),
            RecordIdError::InvalidTimestamp => write!(f, "Invalid timestamp in record ID"),
        }
    }
}

impl std::error::Error for RecordIdError {}

impl Expense {
    pub fn generate_id(epoch_millis: u64) -> String {
        generate_record_id("expense", epoch_millis)
    }

    pub fn parse_id(id: &str) -> Result<u64, RecordIdError> {
        parse_record_id("expense", id)
    }
}

impl Income {
    pub fn generate_id(epoch_millis: u64) -> String {
        generate_record_id("income", epoch_millis)
    }

    pub fn parse_id(id: &str) -> Result<u64, RecordIdError> {
        parse_record_id("income", id)
    }
}

impl Budget {
    pub fn generate_id(epoch_millis: u64) -> String {
        generate_record_id("budget", epoch_millis)
    }

    pub fn parse_id(id: &str) -> Result<u64, RecordIdError> {
        parse_record_id("budget", id)
    }
}

impl Goal {
    pub fn generate_id(epoch_millis: u64) -> String {
        generate_record_id("goal", epoch_millis)
    }

    pub fn parse_id(id: &str) -> Result<u64, RecordIdError> {
        parse_record_id("goal", id)
    }

    /// Percentage complete, computed at read time and never stored
    pub fn percentage_complete(&self) -> f64 {
        if self.target_amount <= 0.0 {
            return 0.0;
        }
        self.current_amount / self.target_amount * 100.0
    }
}

impl Notification {
    pub fn generate_id(epoch_millis: u64) -> String {
        generate_record_id("notification", epoch_millis)
    }

    pub fn parse_id(id: &str) -> Result<u64, RecordIdError> {
        parse_record_id("notification", id)
    }
}

impl User {
    pub fn generate_id(epoch_millis: u64) -> String {
        generate_record_id("user", epoch_millis)
    }

    pub fn parse_id(id: &str) -> Result<u64, RecordIdError> {
        parse_record_id("user", id)
    }
}
