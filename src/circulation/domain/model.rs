use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::domain::Identifiable;
use crate::core::library::{HoldStatus, LibraryError, LibraryResult, LoanStatus};
use crate::utils::date::serializer;

// LoanEntity abstracts an open borrowing record linking one item to one
// user. The overdue exemption is captured from the item variant at
// checkout time: EBooks come due the day they are borrowed but are never
// reported overdue.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct LoanEntity {
    pub loan_id: String,
    pub version: i64,
    pub branch_id: String,
    pub item_id: String,
    pub user_id: String,
    pub item_type: String,
    pub loan_status: LoanStatus,
    #[serde(with = "serializer")]
    pub checkout_at: NaiveDate,
    #[serde(with = "serializer")]
    pub due_at: NaiveDate,
    pub returned_at: Option<NaiveDate>,
    pub renewals: i64,
    pub overdue_exempt: bool,
}

impl LoanEntity {
    pub fn new(branch_id: &str, item_id: &str, user_id: &str, item_type: &str,
               overdue_exempt: bool, checkout_at: NaiveDate, due_at: NaiveDate) -> Self {
        Self {
            loan_id: Uuid::new_v4().to_string(),
            version: 0,
            branch_id: branch_id.to_string(),
            item_id: item_id.to_string(),
            user_id: user_id.to_string(),
            item_type: item_type.to_string(),
            loan_status: LoanStatus::Active,
            checkout_at,
            due_at,
            returned_at: None,
            renewals: 0,
            overdue_exempt,
        }
    }

    pub fn is_active(&self) -> bool {
        self.loan_status == LoanStatus::Active
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.is_active() && !self.overdue_exempt && today > self.due_at
    }

    pub fn days_overdue(&self, today: NaiveDate) -> i64 {
        if !self.is_overdue(today) {
            return 0;
        }
        (today - self.due_at).num_days()
    }

    pub fn days_until_due(&self, today: NaiveDate) -> i64 {
        if !self.is_active() {
            return 0;
        }
        (self.due_at - today).num_days()
    }

    // Fine owed if the loan were settled on return_date; independent of
    // loan status so it can be read before or after closing.
    pub fn calculate_fine(&self, return_date: NaiveDate, daily_rate: f64) -> f64 {
        if self.overdue_exempt || return_date <= self.due_at {
            return 0.0;
        }
        let days_late = (return_date - self.due_at).num_days();
        (days_late as f64 * daily_rate * 100.0).round() / 100.0
    }

    pub(crate) fn close(&mut self, return_date: NaiveDate) {
        self.loan_status = LoanStatus::Returned;
        self.returned_at = Some(return_date);
        self.version += 1;
    }

    pub(crate) fn renew_to(&mut self, due_at: NaiveDate) {
        self.due_at = due_at;
        self.renewals += 1;
        self.version += 1;
    }
}

impl Identifiable for LoanEntity {
    fn id(&self) -> String {
        self.loan_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

// HoldEntity abstracts a queued request for an item currently on loan.
// A hold never grants possession; it only queues intent, and the queue
// is resolved oldest-first when the item comes back.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct HoldEntity {
    pub hold_id: String,
    pub version: i64,
    pub branch_id: String,
    pub item_id: String,
    pub user_id: String,
    pub hold_status: HoldStatus,
    pub notified: bool,
    #[serde(with = "serializer")]
    pub placed_at: NaiveDate,
    #[serde(with = "serializer")]
    pub expires_at: NaiveDate,
}

impl HoldEntity {
    pub fn new(branch_id: &str, item_id: &str, user_id: &str,
               placed_at: NaiveDate, expires_at: NaiveDate) -> LibraryResult<Self> {
        if expires_at < placed_at {
            return Err(LibraryError::validation(
                "hold expiry cannot be before placement date", None));
        }
        Ok(Self {
            hold_id: Uuid::new_v4().to_string(),
            version: 0,
            branch_id: branch_id.to_string(),
            item_id: item_id.to_string(),
            user_id: user_id.to_string(),
            hold_status: HoldStatus::Pending,
            notified: false,
            placed_at,
            expires_at,
        })
    }

    pub fn is_pending(&self) -> bool {
        self.hold_status == HoldStatus::Pending
    }

    pub fn is_active(&self, today: NaiveDate) -> bool {
        self.is_pending() && today <= self.expires_at
    }

    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.is_pending() && today > self.expires_at
    }

    pub fn days_until_expiry(&self, today: NaiveDate) -> i64 {
        if !self.is_pending() {
            return 0;
        }
        (self.expires_at - today).num_days()
    }

    pub(crate) fn fulfill(&mut self) -> LibraryResult<()> {
        if self.hold_status == HoldStatus::Canceled {
            return Err(LibraryError::validation(
                format!("hold {} is canceled", self.hold_id).as_str(), None));
        }
        self.hold_status = HoldStatus::Fulfilled;
        self.version += 1;
        Ok(())
    }

    pub(crate) fn cancel(&mut self) -> LibraryResult<()> {
        if self.hold_status == HoldStatus::Fulfilled {
            return Err(LibraryError::validation(
                format!("cannot cancel fulfilled hold {}", self.hold_id).as_str(), None));
        }
        self.hold_status = HoldStatus::Canceled;
        self.version += 1;
        Ok(())
    }

    pub fn notify(&mut self) -> LibraryResult<()> {
        if !self.is_pending() {
            return Err(LibraryError::validation(
                format!("hold {} is not pending", self.hold_id).as_str(), None));
        }
        self.notified = true;
        self.version += 1;
        Ok(())
    }

    pub fn extend(&mut self, additional_days: i64, today: NaiveDate) -> LibraryResult<NaiveDate> {
        if !self.is_active(today) {
            return Err(LibraryError::validation(
                format!("cannot extend inactive hold {}", self.hold_id).as_str(), None));
        }
        if additional_days < 1 {
            return Err(LibraryError::validation(
                "hold extension must be at least 1 day", None));
        }
        self.expires_at = self.expires_at + Duration::days(additional_days);
        self.version += 1;
        Ok(self.expires_at)
    }
}

impl Identifiable for HoldEntity {
    fn id(&self) -> String {
        self.hold_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}
