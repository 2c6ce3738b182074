pub mod model;

use chrono::NaiveDate;
use crate::core::domain::Identifiable;
use crate::core::library::Role;
use crate::items::domain::model::ItemDetails;

// LibraryItem is the capability every circulating item implements. There
// is no constructible base case: the four variants (Book, Journal, DVD,
// EBook) are the only implementations, and the factory rejects any other
// kind label with a Construction error.
pub trait LibraryItem: Identifiable {
    fn details(&self) -> &ItemDetails;

    // Fixed variant label, e.g. "Book" or "DVD".
    fn item_type(&self) -> &'static str;

    // Pure due-date policy for this variant given the borrower's role.
    fn calculate_due_date(&self, checkout_date: NaiveDate, role: &Role) -> NaiveDate;

    // EBooks override this: they are never reported overdue.
    fn accrues_overdue(&self) -> bool {
        true
    }
}
