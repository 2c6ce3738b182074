use std::collections::HashMap;
use crate::core::domain::Identifiable;
use crate::core::library::{LibraryError, LibraryResult};
use crate::items::domain::LibraryItem;

// Catalog owns the branch's collection of items, keyed by item id.
// Items enter at catalog population and are looked up polymorphically
// by the circulation service; the map imposes no ordering.
pub struct Catalog {
    name: String,
    items: HashMap<String, Box<dyn LibraryItem>>,
}

impl Catalog {
    pub fn new(name: &str) -> LibraryResult<Self> {
        if name.trim().is_empty() {
            return Err(LibraryError::validation("catalog name cannot be empty", None));
        }
        Ok(Self {
            name: name.trim().to_string(),
            items: HashMap::new(),
        })
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn add_item(&mut self, item: Box<dyn LibraryItem>) -> LibraryResult<()> {
        let id = item.id();
        if self.items.contains_key(id.as_str()) {
            return Err(LibraryError::duplicate_key(
                format!("item {} already exists in catalog", id).as_str()));
        }
        self.items.insert(id, item);
        Ok(())
    }

    pub fn remove_item(&mut self, item_id: &str) -> LibraryResult<Box<dyn LibraryItem>> {
        self.items.remove(item_id).ok_or_else(|| {
            LibraryError::item_not_found(
                format!("item {} not found in catalog", item_id).as_str())
        })
    }

    pub fn find_item_by_id(&self, item_id: &str) -> LibraryResult<&dyn LibraryItem> {
        self.items.get(item_id).map(|item| item.as_ref()).ok_or_else(|| {
            LibraryError::item_not_found(
                format!("item {} not found in catalog", item_id).as_str())
        })
    }

    pub fn list_items(&self) -> Vec<&dyn LibraryItem> {
        self.items.values().map(|item| item.as_ref()).collect()
    }

    // Case-insensitive match against item titles.
    pub fn search_by_keyword(&self, keyword: &str) -> Vec<&dyn LibraryItem> {
        let keyword = keyword.to_lowercase();
        self.items.values()
            .filter(|item| item.details().title.to_lowercase().contains(keyword.as_str()))
            .map(|item| item.as_ref())
            .collect()
    }

    // Case-insensitive partial match against creator names.
    pub fn search_by_creator(&self, creator: &str) -> Vec<&dyn LibraryItem> {
        let creator = creator.to_lowercase();
        self.items.values()
            .filter(|item| {
                item.details().creators.iter()
                    .any(|c| c.to_lowercase().contains(creator.as_str()))
            })
            .map(|item| item.as_ref())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::domain::Catalog;
    use crate::core::domain::Identifiable;
    use crate::core::library::LibraryError;
    use crate::items::domain::LibraryItem;
    use crate::items::domain::model::ItemDetails;
    use crate::items::factory::create_item;

    fn catalog_with_items() -> Catalog {
        let mut catalog = Catalog::new("Main Library").expect("should build catalog");
        let python = ItemDetails::new("B001", "Python Guide", &["guido van rossum"], &["programming"], None, None).unwrap();
        let rust = ItemDetails::new("B002", "The Rust Book", &["steve klabnik"], &["programming"], None, None).unwrap();
        catalog.add_item(create_item("Book", python).unwrap()).expect("should add");
        catalog.add_item(create_item("Book", rust).unwrap()).expect("should add");
        catalog
    }

    #[test]
    fn test_should_reject_blank_name() {
        assert!(Catalog::new("  ").is_err());
    }

    #[test]
    fn test_should_add_and_find_item() {
        let catalog = catalog_with_items();
        assert_eq!(2, catalog.item_count());
        let item = catalog.find_item_by_id("B001").expect("should find item");
        assert_eq!("Python Guide", item.details().title.as_str());
    }

    #[test]
    fn test_should_reject_duplicate_item() {
        let mut catalog = catalog_with_items();
        let dup = ItemDetails::new("B001", "Another", &[], &[], None, None).unwrap();
        let res = catalog.add_item(create_item("Book", dup).unwrap());
        assert!(matches!(res, Err(LibraryError::DuplicateKey { message: _ })));
    }

    #[test]
    fn test_should_remove_item() {
        let mut catalog = catalog_with_items();
        let removed = catalog.remove_item("B002").expect("should remove item");
        assert_eq!("B002", removed.id());
        assert_eq!(1, catalog.item_count());
        assert!(matches!(catalog.find_item_by_id("B002"),
                         Err(LibraryError::ItemNotFound { message: _ })));
    }

    #[test]
    fn test_should_fail_find_for_unknown_item() {
        let catalog = catalog_with_items();
        assert!(matches!(catalog.find_item_by_id("missing"),
                         Err(LibraryError::ItemNotFound { message: _ })));
    }

    #[test]
    fn test_should_search_by_keyword() {
        let catalog = catalog_with_items();
        let results = catalog.search_by_keyword("python");
        assert_eq!(1, results.len());
        assert_eq!("B001", results[0].id());
        assert_eq!(0, catalog.search_by_keyword("cobol").len());
    }

    #[test]
    fn test_should_search_by_creator() {
        let catalog = catalog_with_items();
        let results = catalog.search_by_creator("klabnik");
        assert_eq!(1, results.len());
        assert_eq!("B002", results[0].id());
    }
}
