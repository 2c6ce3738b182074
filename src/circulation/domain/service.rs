use std::collections::HashMap;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use crate::catalog::domain::Catalog;
use crate::circulation::domain::model::{HoldEntity, LoanEntity};
use crate::core::domain::Configuration;
use crate::core::events::DomainEvent;
use crate::core::library::{LibraryError, LibraryResult};
use crate::gateway::events::EventPublisher;
use crate::items::domain::LibraryItem;
use crate::users::domain::model::UserEntity;

// ReturnOutcome reports what a return settled: the closed loan, the fine
// owed, and the follow-on loan when a pending hold was resolved.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ReturnOutcome {
    pub loan: LoanEntity,
    pub fine: f64,
    pub next_loan: Option<LoanEntity>,
}

// LibrarySystem composes the catalog, the registered users and the open
// loans and holds for one branch. It owns no type-specific logic: every
// due-date decision is delegated to the item variant involved. At most
// one active loan exists per item at a time; holds queue intent and are
// resolved oldest-first when the item comes back.
pub struct LibrarySystem {
    config: Configuration,
    catalog: Catalog,
    users: HashMap<String, UserEntity>,
    loans: HashMap<String, LoanEntity>,
    holds: Vec<HoldEntity>,
    publisher: Box<dyn EventPublisher>,
}

impl LibrarySystem {
    // The catalog and user collection are populated externally and moved
    // in; loans and holds always start empty.
    pub fn new(config: &Configuration, catalog: Catalog, users: Vec<UserEntity>,
               publisher: Box<dyn EventPublisher>) -> LibraryResult<Self> {
        let mut system = Self {
            config: config.clone(),
            catalog,
            users: HashMap::new(),
            loans: HashMap::new(),
            holds: Vec::new(),
            publisher,
        };
        for user in users {
            system.add_user(user)?;
        }
        Ok(system)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn holds(&self) -> &[HoldEntity] {
        self.holds.as_slice()
    }

    pub fn loan_count(&self) -> usize {
        self.loans.len()
    }

    pub fn recorded_events(&self) -> &[DomainEvent] {
        self.publisher.recorded()
    }

    pub fn add_user(&mut self, user: UserEntity) -> LibraryResult<()> {
        if self.users.contains_key(user.user_id.as_str()) {
            return Err(LibraryError::duplicate_key(
                format!("user {} already exists", user.user_id).as_str()));
        }
        self.users.insert(user.user_id.to_string(), user);
        Ok(())
    }

    pub fn find_user(&self, user_id: &str) -> LibraryResult<&UserEntity> {
        self.users.get(user_id).ok_or_else(|| {
            LibraryError::user_not_found(format!("user {} not found", user_id).as_str())
        })
    }

    pub fn add_item(&mut self, item: Box<dyn LibraryItem>) -> LibraryResult<()> {
        self.catalog.add_item(item)
    }

    pub fn find_item(&self, item_id: &str) -> LibraryResult<&dyn LibraryItem> {
        self.catalog.find_item_by_id(item_id)
    }

    pub fn find_loan(&self, loan_id: &str) -> LibraryResult<&LoanEntity> {
        self.loans.get(loan_id).ok_or_else(|| {
            LibraryError::not_found(format!("loan {} not found", loan_id).as_str())
        })
    }

    pub fn find_hold(&self, hold_id: &str) -> LibraryResult<&HoldEntity> {
        self.holds.iter().find(|h| h.hold_id == hold_id).ok_or_else(|| {
            LibraryError::not_found(format!("hold {} not found", hold_id).as_str())
        })
    }

    pub fn active_loan_for_item(&self, item_id: &str) -> Option<&LoanEntity> {
        self.loans.values().find(|l| l.item_id == item_id && l.is_active())
    }

    pub fn is_item_available(&self, item_id: &str) -> LibraryResult<bool> {
        let _ = self.catalog.find_item_by_id(item_id)?;
        Ok(self.active_loan_for_item(item_id).is_none())
    }

    pub fn active_holds_for_item(&self, item_id: &str, today: NaiveDate) -> Vec<&HoldEntity> {
        self.holds.iter()
            .filter(|h| h.item_id == item_id && h.is_active(today))
            .collect()
    }

    // Thin pass-throughs exposing the polymorphic item behavior.
    pub fn item_type(&self, item_id: &str) -> LibraryResult<String> {
        Ok(self.catalog.find_item_by_id(item_id)?.item_type().to_string())
    }

    pub fn calculate_due_date_for(&self, item_id: &str, checkout_date: NaiveDate,
                                  user_id: &str) -> LibraryResult<NaiveDate> {
        let item = self.catalog.find_item_by_id(item_id)?;
        let user = self.find_user(user_id)?;
        Ok(item.calculate_due_date(checkout_date, &user.role))
    }

    pub fn checkout(&mut self, item_id: &str, user_id: &str,
                    checkout_date: NaiveDate) -> LibraryResult<LoanEntity> {
        let item = self.catalog.find_item_by_id(item_id)?;
        let user = self.users.get(user_id).ok_or_else(|| {
            LibraryError::user_not_found(format!("user {} not found", user_id).as_str())
        })?;
        if self.loans.values().any(|l| l.item_id == item_id && l.is_active()) {
            return Err(LibraryError::item_unavailable(
                format!("item {} already has an open loan", item_id).as_str()));
        }
        let due_at = item.calculate_due_date(checkout_date, &user.role);
        let loan = LoanEntity::new(self.config.branch_id.as_str(), item_id, user_id,
                                   item.item_type(), !item.accrues_overdue(),
                                   checkout_date, due_at);
        let event = DomainEvent::added("item_checkout", loan.loan_id.as_str(),
                                       checkout_date, &loan)?;
        self.loans.insert(loan.loan_id.to_string(), loan.clone());
        if let Some(user) = self.users.get_mut(user_id) {
            user.add_loan(loan.loan_id.as_str());
        }
        self.publisher.publish(&event)?;
        Ok(loan)
    }

    pub fn return_item(&mut self, item_id: &str,
                       return_date: NaiveDate) -> LibraryResult<ReturnOutcome> {
        let (loan_id, user_id, fine) = match self.active_loan_for_item(item_id) {
            Some(loan) => (loan.loan_id.to_string(), loan.user_id.to_string(),
                           loan.calculate_fine(return_date, self.config.daily_fine_rate)),
            None => {
                return Err(LibraryError::no_active_loan(
                    format!("no active loan for item {}", item_id).as_str()));
            }
        };
        let next_plan = self.plan_next_loan(item_id, return_date);

        let closed = match self.loans.get_mut(loan_id.as_str()) {
            Some(loan) => {
                loan.close(return_date);
                loan.clone()
            }
            None => {
                return Err(LibraryError::no_active_loan(
                    format!("no active loan for item {}", item_id).as_str()));
            }
        };
        if let Some(user) = self.users.get_mut(user_id.as_str()) {
            user.remove_loan(loan_id.as_str())?;
            if fine > 0.0 {
                user.add_fine(fine)?;
            }
        }
        let return_event = DomainEvent::deleted("item_returned", loan_id.as_str(),
                                                return_date, &closed)?;
        self.publisher.publish(&return_event)?;

        let mut next_loan = None;
        if let Some((idx, loan)) = next_plan {
            self.holds[idx].fulfill()?;
            let hold_event = DomainEvent::updated("hold_fulfilled",
                                                  self.holds[idx].hold_id.as_str(),
                                                  return_date, &self.holds[idx])?;
            let checkout_event = DomainEvent::added("item_checkout", loan.loan_id.as_str(),
                                                    return_date, &loan)?;
            if let Some(holder) = self.users.get_mut(loan.user_id.as_str()) {
                holder.add_loan(loan.loan_id.as_str());
            }
            self.loans.insert(loan.loan_id.to_string(), loan.clone());
            self.publisher.publish(&hold_event)?;
            self.publisher.publish(&checkout_event)?;
            next_loan = Some(loan);
        }
        Ok(ReturnOutcome { loan: closed, fine, next_loan })
    }

    pub fn place_hold(&mut self, item_id: &str, user_id: &str,
                      request_date: NaiveDate) -> LibraryResult<HoldEntity> {
        let _ = self.catalog.find_item_by_id(item_id)?;
        let expires_at = request_date + Duration::days(self.config.hold_period_days);
        let hold = HoldEntity::new(self.config.branch_id.as_str(), item_id, user_id,
                                   request_date, expires_at)?;
        let event = DomainEvent::added("hold_placed", hold.hold_id.as_str(),
                                       request_date, &hold)?;
        self.holds.push(hold.clone());
        self.publisher.publish(&event)?;
        Ok(hold)
    }

    pub fn cancel_hold(&mut self, hold_id: &str, on: NaiveDate) -> LibraryResult<HoldEntity> {
        let canceled = match self.holds.iter_mut().find(|h| h.hold_id == hold_id) {
            Some(hold) => {
                hold.cancel()?;
                hold.clone()
            }
            None => {
                return Err(LibraryError::not_found(
                    format!("hold {} not found", hold_id).as_str()));
            }
        };
        let event = DomainEvent::deleted("hold_canceled", hold_id, on, &canceled)?;
        self.publisher.publish(&event)?;
        Ok(canceled)
    }

    pub fn renew_loan(&mut self, loan_id: &str, today: NaiveDate) -> LibraryResult<LoanEntity> {
        let (item_id, user_id) = match self.loans.get(loan_id) {
            Some(loan) => {
                if !loan.is_active() {
                    return Err(LibraryError::validation(
                        format!("loan {} is closed", loan_id).as_str(), None));
                }
                if loan.is_overdue(today) {
                    return Err(LibraryError::validation(
                        format!("overdue loan {} cannot be renewed", loan_id).as_str(), None));
                }
                if loan.renewals >= self.config.max_renewals {
                    return Err(LibraryError::validation(
                        format!("loan {} reached the renewal limit", loan_id).as_str(), None));
                }
                (loan.item_id.to_string(), loan.user_id.to_string())
            }
            None => {
                return Err(LibraryError::not_found(
                    format!("loan {} not found", loan_id).as_str()));
            }
        };
        if self.holds.iter().any(|h| h.item_id == item_id && h.is_active(today)) {
            return Err(LibraryError::validation(
                format!("item {} has pending holds", item_id).as_str(), None));
        }
        let item = self.catalog.find_item_by_id(item_id.as_str())?;
        let role = self.find_user(user_id.as_str())?.role.clone();
        let due_at = item.calculate_due_date(today, &role);
        let renewed = match self.loans.get_mut(loan_id) {
            Some(loan) => {
                loan.renew_to(due_at);
                loan.clone()
            }
            None => {
                return Err(LibraryError::not_found(
                    format!("loan {} not found", loan_id).as_str()));
            }
        };
        let event = DomainEvent::updated("loan_renewed", loan_id, today, &renewed)?;
        self.publisher.publish(&event)?;
        Ok(renewed)
    }

    // Selects the oldest pending hold that is still active on the return
    // date and whose user is known, and prepares the follow-on loan for
    // it. Runs before any mutation so a failed return changes nothing.
    fn plan_next_loan(&self, item_id: &str, return_date: NaiveDate) -> Option<(usize, LoanEntity)> {
        let item = self.catalog.find_item_by_id(item_id).ok()?;
        let (idx, hold) = self.holds.iter().enumerate()
            .filter(|(_, h)| h.item_id == item_id && h.is_active(return_date))
            .find(|(_, h)| self.users.contains_key(h.user_id.as_str()))?;
        let role = self.users.get(hold.user_id.as_str())?.role.clone();
        let due_at = item.calculate_due_date(return_date, &role);
        Some((idx, LoanEntity::new(self.config.branch_id.as_str(), item_id,
                                   hold.user_id.as_str(), item.item_type(),
                                   !item.accrues_overdue(), return_date, due_at)))
    }
}
