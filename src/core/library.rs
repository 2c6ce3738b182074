use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub enum LibraryError {
    // An attempt to construct the abstract item capability directly,
    // i.e. an item kind outside the closed set of variants.
    Construction {
        message: String,
    },
    ItemNotFound {
        message: String,
    },
    UserNotFound {
        message: String,
    },
    // The item already has an open loan; at most one active loan per
    // item is allowed at a time.
    ItemUnavailable {
        message: String,
    },
    // A return was requested for an item with no open loan.
    NoActiveLoan {
        message: String,
    },
    NotFound {
        message: String,
    },
    DuplicateKey {
        message: String,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
    Serialization {
        message: String,
    },
}

impl LibraryError {
    pub fn construction(message: &str) -> LibraryError {
        LibraryError::Construction { message: message.to_string() }
    }

    pub fn item_not_found(message: &str) -> LibraryError {
        LibraryError::ItemNotFound { message: message.to_string() }
    }

    pub fn user_not_found(message: &str) -> LibraryError {
        LibraryError::UserNotFound { message: message.to_string() }
    }

    pub fn item_unavailable(message: &str) -> LibraryError {
        LibraryError::ItemUnavailable { message: message.to_string() }
    }

    pub fn no_active_loan(message: &str) -> LibraryError {
        LibraryError::NoActiveLoan { message: message.to_string() }
    }

    pub fn not_found(message: &str) -> LibraryError {
        LibraryError::NotFound { message: message.to_string() }
    }

    pub fn duplicate_key(message: &str) -> LibraryError {
        LibraryError::DuplicateKey { message: message.to_string() }
    }

    pub fn validation(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Validation { message: message.to_string(), reason_code }
    }

    pub fn serialization(message: &str) -> LibraryError {
        LibraryError::Serialization { message: message.to_string() }
    }
}

impl From<serde_json::Error> for LibraryError {
    fn from(err: serde_json::Error) -> Self {
        LibraryError::serialization(
            format!("serde json parsing {:?}", err).as_str())
    }
}

impl Display for LibraryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LibraryError::Construction { message } => {
                write!(f, "{}", message)
            }
            LibraryError::ItemNotFound { message } => {
                write!(f, "{}", message)
            }
            LibraryError::UserNotFound { message } => {
                write!(f, "{}", message)
            }
            LibraryError::ItemUnavailable { message } => {
                write!(f, "{}", message)
            }
            LibraryError::NoActiveLoan { message } => {
                write!(f, "{}", message)
            }
            LibraryError::NotFound { message } => {
                write!(f, "{}", message)
            }
            LibraryError::DuplicateKey { message } => {
                write!(f, "{}", message)
            }
            LibraryError::Validation { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            LibraryError::Serialization { message } => {
                write!(f, "{}", message)
            }
        }
    }
}

/// A specialized Result type for circulation operations.
pub type LibraryResult<T> = Result<T, LibraryError>;

// Role is the borrowing-privilege tier of a user. Student and Public
// borrow on the standard (shorter) schedule; Faculty, Staff and Admin
// on the extended one. Unrecognized role strings fall back to Public so
// that checkout stays usable for unanticipated roles.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub enum Role {
    Student,
    Faculty,
    Staff,
    Admin,
    Public,
}

impl Role {
    pub fn is_extended(&self) -> bool {
        matches!(self, Role::Faculty | Role::Staff | Role::Admin)
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Student" => Role::Student,
            "Faculty" => Role::Faculty,
            "Staff" => Role::Staff,
            "Admin" => Role::Admin,
            "Public" => Role::Public,
            _ => Role::Public,
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Role::Student => write!(f, "Student"),
            Role::Faculty => write!(f, "Faculty"),
            Role::Staff => write!(f, "Staff"),
            Role::Admin => write!(f, "Admin"),
            Role::Public => write!(f, "Public"),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub enum LoanStatus {
    Active,
    Returned,
}

impl From<String> for LoanStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Active" => LoanStatus::Active,
            "Returned" => LoanStatus::Returned,
            _ => LoanStatus::Active,
        }
    }
}

impl Display for LoanStatus {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            LoanStatus::Active => write!(f, "Active"),
            LoanStatus::Returned => write!(f, "Returned"),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub enum HoldStatus {
    Pending,
    Fulfilled,
    Canceled,
}

impl From<String> for HoldStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Pending" => HoldStatus::Pending,
            "Fulfilled" => HoldStatus::Fulfilled,
            "Canceled" => HoldStatus::Canceled,
            _ => HoldStatus::Pending,
        }
    }
}

impl Display for HoldStatus {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            HoldStatus::Pending => write!(f, "Pending"),
            HoldStatus::Fulfilled => write!(f, "Fulfilled"),
            HoldStatus::Canceled => write!(f, "Canceled"),
        }
    }
}
