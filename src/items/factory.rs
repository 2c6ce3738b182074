use crate::core::library::{LibraryError, LibraryResult};
use crate::items::domain::LibraryItem;
use crate::items::domain::model::{Book, Dvd, EBook, ItemDetails, Journal};

// The closed set of item kinds. Anything else — including the abstract
// "LibraryItem" itself — cannot be constructed.
pub fn create_item(kind: &str, details: ItemDetails) -> LibraryResult<Box<dyn LibraryItem>> {
    match kind {
        "Book" => Ok(Box::new(Book::new(details))),
        "Journal" => Ok(Box::new(Journal::new(details))),
        "DVD" => Ok(Box::new(Dvd::new(details))),
        "EBook" => Ok(Box::new(EBook::new(details))),
        other => Err(LibraryError::construction(
            format!("cannot construct item of kind '{}', expected one of Book, Journal, DVD, EBook", other).as_str())),
    }
}

#[cfg(test)]
mod tests {
    use crate::core::library::LibraryError;
    use crate::items::domain::LibraryItem;
    use crate::items::domain::model::ItemDetails;
    use crate::items::factory::create_item;

    fn details(id: &str) -> ItemDetails {
        ItemDetails::new(id, "title", &[], &[], Some("100"), None).expect("should build details")
    }

    #[test]
    fn test_should_create_each_variant() {
        for kind in ["Book", "Journal", "DVD", "EBook"] {
            let item = create_item(kind, details(kind)).expect("should create item");
            assert_eq!(kind, item.item_type());
        }
    }

    #[test]
    fn test_should_reject_abstract_kind() {
        let res = create_item("LibraryItem", details("item1"));
        assert!(matches!(res, Err(LibraryError::Construction { message: _ })));
    }

    #[test]
    fn test_should_reject_unknown_kind() {
        let res = create_item("Magazine", details("item1"));
        assert!(matches!(res, Err(LibraryError::Construction { message: _ })));
    }
}
