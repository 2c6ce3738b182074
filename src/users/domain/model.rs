use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::core::library::{LibraryError, LibraryResult, Role};
use crate::utils::text::normalize_name;

// UserEntity abstracts a registered borrower. The role string is mapped
// through Role::from, so an unanticipated role never blocks registration;
// it simply borrows on the standard schedule.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct UserEntity {
    pub user_id: String,
    pub version: i64,
    pub name: String,
    pub role: Role,
    pub active_loan_ids: Vec<String>,
    pub total_fines: f64,
}

impl UserEntity {
    pub fn new(user_id: &str, name: &str, role: &str) -> LibraryResult<Self> {
        if user_id.trim().is_empty() {
            return Err(LibraryError::validation("user id cannot be empty", None));
        }
        Ok(Self {
            user_id: user_id.trim().to_string(),
            version: 0,
            name: normalize_name(name),
            role: Role::from(role.to_string()),
            active_loan_ids: Vec::new(),
            total_fines: 0.0,
        })
    }

    pub fn add_loan(&mut self, loan_id: &str) {
        if !self.active_loan_ids.iter().any(|id| id == loan_id) {
            self.active_loan_ids.push(loan_id.to_string());
            self.version += 1;
        }
    }

    pub fn remove_loan(&mut self, loan_id: &str) -> LibraryResult<()> {
        match self.active_loan_ids.iter().position(|id| id == loan_id) {
            Some(pos) => {
                self.active_loan_ids.remove(pos);
                self.version += 1;
                Ok(())
            }
            None => Err(LibraryError::not_found(
                format!("loan {} not found in active loans for user {}", loan_id, self.user_id).as_str())),
        }
    }

    pub fn add_fine(&mut self, amount: f64) -> LibraryResult<()> {
        if amount < 0.0 {
            return Err(LibraryError::validation("fine amount cannot be negative", None));
        }
        self.total_fines += amount;
        self.version += 1;
        Ok(())
    }

    // Pays down fines and returns the remaining balance; the balance
    // never goes below zero.
    pub fn pay_fine(&mut self, amount: f64) -> LibraryResult<f64> {
        if amount < 0.0 {
            return Err(LibraryError::validation("payment amount cannot be negative", None));
        }
        self.total_fines = (self.total_fines - amount).max(0.0);
        self.version += 1;
        Ok(self.total_fines)
    }

    pub fn active_loan_count(&self) -> usize {
        self.active_loan_ids.len()
    }

    pub fn has_fines(&self) -> bool {
        self.total_fines > 0.0
    }
}

impl Identifiable for UserEntity {
    fn id(&self) -> String {
        self.user_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

impl Display for UserEntity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) - {} active loans", self.name, self.role, self.active_loan_ids.len())
    }
}

#[cfg(test)]
mod tests {
    use crate::core::library::Role;
    use crate::users::domain::model::UserEntity;

    #[test]
    fn test_should_build_user_with_normalized_name() {
        let user = UserEntity::new("U001", " jane   doe ", "Student").expect("should build user");
        assert_eq!("U001", user.user_id.as_str());
        assert_eq!("Jane Doe", user.name.as_str());
        assert_eq!(Role::Student, user.role);
        assert_eq!(0, user.active_loan_count());
        assert!(!user.has_fines());
    }

    #[test]
    fn test_should_reject_blank_user_id() {
        assert!(UserEntity::new("", "jane", "Student").is_err());
        assert!(UserEntity::new("   ", "jane", "Student").is_err());
    }

    #[test]
    fn test_should_fall_back_to_public_for_unknown_role() {
        let user = UserEntity::new("U001", "jane doe", "Visiting Scholar").expect("should build user");
        assert_eq!(Role::Public, user.role);
        assert!(!user.role.is_extended());
    }

    #[test]
    fn test_should_track_active_loans() {
        let mut user = UserEntity::new("U001", "jane doe", "Student").unwrap();
        user.add_loan("L001");
        user.add_loan("L001");
        user.add_loan("L002");
        assert_eq!(2, user.active_loan_count());
        user.remove_loan("L001").expect("should remove loan");
        assert_eq!(1, user.active_loan_count());
        assert!(user.remove_loan("L001").is_err());
    }

    #[test]
    fn test_should_track_fines() {
        let mut user = UserEntity::new("U001", "jane doe", "Public").unwrap();
        user.add_fine(1.25).expect("should add fine");
        assert!(user.has_fines());
        assert!(user.add_fine(-1.0).is_err());
        let remaining = user.pay_fine(1.0).expect("should pay fine");
        assert_eq!(0.25, remaining);
        let remaining = user.pay_fine(5.0).expect("should pay fine");
        assert_eq!(0.0, remaining);
        assert!(user.pay_fine(-1.0).is_err());
    }

    #[test]
    fn test_should_format_user() {
        let mut user = UserEntity::new("U001", "jane doe", "Student").unwrap();
        user.add_loan("L001");
        assert_eq!("Jane Doe (Student) - 1 active loans", user.to_string());
    }
}
