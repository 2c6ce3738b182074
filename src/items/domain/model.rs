use std::collections::BTreeSet;
use std::fmt;
use std::fmt::{Display, Formatter};
use chrono::{Duration, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::core::library::{LibraryError, LibraryResult, Role};
use crate::items::domain::LibraryItem;
use crate::utils::isbn::validate_isbn;
use crate::utils::text::normalize_name;

const BOOK_STANDARD_DAYS: i64 = 14;
const BOOK_EXTENDED_DAYS: i64 = 28;
const JOURNAL_STANDARD_DAYS: i64 = 7;
const JOURNAL_EXTENDED_DAYS: i64 = 14;
const DVD_DAYS: i64 = 7;

// ItemDetails holds the catalog fields shared by every item variant:
// identifier, title, normalized creator names, lower-cased subject tags,
// shelf call number and optional ISBN.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ItemDetails {
    pub item_id: String,
    pub version: i64,
    pub title: String,
    pub creators: Vec<String>,
    pub tags: BTreeSet<String>,
    pub call_number: String,
    pub isbn: Option<String>,
}

impl ItemDetails {
    pub fn new(item_id: &str, title: &str, creators: &[&str], tags: &[&str],
               call_number: Option<&str>, isbn: Option<&str>) -> LibraryResult<Self> {
        if item_id.trim().is_empty() {
            return Err(LibraryError::validation("item id cannot be empty", None));
        }
        if title.trim().is_empty() {
            return Err(LibraryError::validation("title cannot be empty", None));
        }
        if let Some(isbn_val) = isbn {
            if !validate_isbn(isbn_val) {
                return Err(LibraryError::validation(
                    format!("invalid isbn {}", isbn_val).as_str(), None));
            }
        }
        Ok(Self {
            item_id: item_id.trim().to_string(),
            version: 0,
            title: title.trim().to_string(),
            creators: creators.iter().map(|c| normalize_name(c)).collect(),
            tags: tags.iter()
                .map(|t| t.trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
            // Unshelved items get a random Dewey-style number, 000-999.
            call_number: match call_number {
                Some(cn) => cn.trim().to_string(),
                None => format!("{:03}", rand::thread_rng().gen_range(0..1000)),
            },
            isbn: isbn.map(str::to_string),
        })
    }

    pub fn add_tag(&mut self, tag: &str) {
        let tag = tag.trim().to_lowercase();
        if !tag.is_empty() {
            self.tags.insert(tag);
            self.version += 1;
        }
    }

    pub fn remove_tag(&mut self, tag: &str) {
        if self.tags.remove(tag.trim().to_lowercase().as_str()) {
            self.version += 1;
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag.trim().to_lowercase().as_str())
    }
}

impl Display for ItemDetails {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let creators = if self.creators.is_empty() {
            "Unknown".to_string()
        } else {
            self.creators.join(", ")
        };
        write!(f, "{} by {}", self.title, creators)
    }
}

fn due_in(checkout_date: NaiveDate, days: i64) -> NaiveDate {
    checkout_date + Duration::days(days)
}

// Book lends on the 14/28-day schedule depending on the borrower's tier.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Book {
    pub details: ItemDetails,
    pub genre: Option<String>,
}

impl Book {
    pub fn new(details: ItemDetails) -> Self {
        Self { details, genre: None }
    }

    pub fn with_genre(details: ItemDetails, genre: &str) -> Self {
        Self { details, genre: Some(genre.to_string()) }
    }
}

impl Identifiable for Book {
    fn id(&self) -> String {
        self.details.item_id.to_string()
    }

    fn version(&self) -> i64 {
        self.details.version
    }
}

impl LibraryItem for Book {
    fn details(&self) -> &ItemDetails {
        &self.details
    }

    fn item_type(&self) -> &'static str {
        "Book"
    }

    fn calculate_due_date(&self, checkout_date: NaiveDate, role: &Role) -> NaiveDate {
        if role.is_extended() {
            due_in(checkout_date, BOOK_EXTENDED_DAYS)
        } else {
            due_in(checkout_date, BOOK_STANDARD_DAYS)
        }
    }
}

// Journal lends on a shorter 7/14-day schedule.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Journal {
    pub details: ItemDetails,
}

impl Journal {
    pub fn new(details: ItemDetails) -> Self {
        Self { details }
    }
}

impl Identifiable for Journal {
    fn id(&self) -> String {
        self.details.item_id.to_string()
    }

    fn version(&self) -> i64 {
        self.details.version
    }
}

impl LibraryItem for Journal {
    fn details(&self) -> &ItemDetails {
        &self.details
    }

    fn item_type(&self) -> &'static str {
        "Journal"
    }

    fn calculate_due_date(&self, checkout_date: NaiveDate, role: &Role) -> NaiveDate {
        if role.is_extended() {
            due_in(checkout_date, JOURNAL_EXTENDED_DAYS)
        } else {
            due_in(checkout_date, JOURNAL_STANDARD_DAYS)
        }
    }
}

// DVD lends for 7 days regardless of role.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Dvd {
    pub details: ItemDetails,
}

impl Dvd {
    pub fn new(details: ItemDetails) -> Self {
        Self { details }
    }
}

impl Identifiable for Dvd {
    fn id(&self) -> String {
        self.details.item_id.to_string()
    }

    fn version(&self) -> i64 {
        self.details.version
    }
}

impl LibraryItem for Dvd {
    fn details(&self) -> &ItemDetails {
        &self.details
    }

    fn item_type(&self) -> &'static str {
        "DVD"
    }

    fn calculate_due_date(&self, checkout_date: NaiveDate, _role: &Role) -> NaiveDate {
        due_in(checkout_date, DVD_DAYS)
    }
}

// EBook access is immediate: the due date is the checkout date itself and
// the item is never reported overdue.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct EBook {
    pub details: ItemDetails,
}

impl EBook {
    pub fn new(details: ItemDetails) -> Self {
        Self { details }
    }
}

impl Identifiable for EBook {
    fn id(&self) -> String {
        self.details.item_id.to_string()
    }

    fn version(&self) -> i64 {
        self.details.version
    }
}

impl LibraryItem for EBook {
    fn details(&self) -> &ItemDetails {
        &self.details
    }

    fn item_type(&self) -> &'static str {
        "EBook"
    }

    fn calculate_due_date(&self, checkout_date: NaiveDate, _role: &Role) -> NaiveDate {
        checkout_date
    }

    fn accrues_overdue(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate};
    use crate::core::library::Role;
    use crate::items::domain::LibraryItem;
    use crate::items::domain::model::{Book, Dvd, EBook, ItemDetails, Journal};

    fn details(id: &str) -> ItemDetails {
        ItemDetails::new(id, "test title", &["jane doe"], &["Testing"], Some("813.54"), None)
            .expect("should build details")
    }

    fn day_one() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 5, 1).unwrap()
    }

    #[test]
    fn test_should_build_details() {
        let details = details("item1");
        assert_eq!("item1", details.item_id.as_str());
        assert_eq!("test title", details.title.as_str());
        assert_eq!(vec!["Jane Doe".to_string()], details.creators);
        assert!(details.has_tag("testing"));
        assert_eq!("813.54", details.call_number.as_str());
    }

    #[test]
    fn test_should_reject_blank_fields() {
        assert!(ItemDetails::new("", "title", &[], &[], None, None).is_err());
        assert!(ItemDetails::new("  ", "title", &[], &[], None, None).is_err());
        assert!(ItemDetails::new("item1", "", &[], &[], None, None).is_err());
    }

    #[test]
    fn test_should_reject_invalid_isbn() {
        assert!(ItemDetails::new("item1", "title", &[], &[], None, Some("123")).is_err());
        assert!(ItemDetails::new("item1", "title", &[], &[], None, Some("0306406152")).is_ok());
    }

    #[test]
    fn test_should_assign_call_number_when_missing() {
        let details = ItemDetails::new("item1", "title", &[], &[], None, None).unwrap();
        assert_eq!(3, details.call_number.len());
        assert!(details.call_number.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_should_manage_tags() {
        let mut details = details("item1");
        details.add_tag("  Sci-Fi ");
        assert!(details.has_tag("sci-fi"));
        details.remove_tag("SCI-FI");
        assert!(!details.has_tag("sci-fi"));
        details.add_tag("   ");
        assert!(!details.has_tag(""));
    }

    #[test]
    fn test_should_return_fixed_type_labels() {
        assert_eq!("Book", Book::new(details("b")).item_type());
        assert_eq!("Journal", Journal::new(details("j")).item_type());
        assert_eq!("DVD", Dvd::new(details("d")).item_type());
        assert_eq!("EBook", EBook::new(details("e")).item_type());
    }

    #[test]
    fn test_should_calculate_book_due_dates() {
        let book = Book::with_genre(details("b"), "fiction");
        let date = day_one();
        assert_eq!(date + Duration::days(14), book.calculate_due_date(date, &Role::Student));
        assert_eq!(date + Duration::days(14), book.calculate_due_date(date, &Role::Public));
        assert_eq!(date + Duration::days(28), book.calculate_due_date(date, &Role::Faculty));
        assert_eq!(date + Duration::days(28), book.calculate_due_date(date, &Role::Staff));
        assert_eq!(date + Duration::days(28), book.calculate_due_date(date, &Role::Admin));
    }

    #[test]
    fn test_should_calculate_journal_due_dates() {
        let journal = Journal::new(details("j"));
        let date = day_one();
        assert_eq!(date + Duration::days(7), journal.calculate_due_date(date, &Role::Student));
        assert_eq!(date + Duration::days(7), journal.calculate_due_date(date, &Role::Public));
        assert_eq!(date + Duration::days(14), journal.calculate_due_date(date, &Role::Faculty));
    }

    #[test]
    fn test_should_calculate_dvd_due_dates_regardless_of_role() {
        let dvd = Dvd::new(details("d"));
        let date = day_one();
        for role in [Role::Student, Role::Faculty, Role::Staff, Role::Admin, Role::Public] {
            assert_eq!(date + Duration::days(7), dvd.calculate_due_date(date, &role));
        }
    }

    #[test]
    fn test_should_calculate_ebook_due_date_as_checkout_date() {
        let ebook = EBook::new(details("e"));
        let date = day_one();
        for role in [Role::Student, Role::Faculty, Role::Staff, Role::Admin, Role::Public] {
            assert_eq!(date, ebook.calculate_due_date(date, &role));
        }
        assert!(!ebook.accrues_overdue());
        assert!(Book::new(details("b")).accrues_overdue());
    }

    #[test]
    fn test_should_use_standard_schedule_for_unrecognized_role() {
        let book = Book::new(details("b"));
        let date = day_one();
        let role = Role::from("Visiting Scholar".to_string());
        assert_eq!(date + Duration::days(14), book.calculate_due_date(date, &role));
    }

    #[test]
    fn test_should_format_details() {
        let details = details("item1");
        assert_eq!("test title by Jane Doe", details.to_string());
        let anon = ItemDetails::new("item2", "anon title", &[], &[], Some("001"), None).unwrap();
        assert_eq!("anon title by Unknown", anon.to_string());
    }
}
