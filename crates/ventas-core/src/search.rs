//! # Search
//!
//! Client-side filtering for the list views. The filter runs on every
//! keystroke against the last loaded collection and never touches the
//! gateway.
//!
//! ## Matching Rule
//! ```text
//! item matches term  ⇔  term == ""
//!                    ∨  ∃ field ∈ item.search_fields():
//!                          lowercase(field) contains lowercase(term)
//! ```
//!
//! Customers and products search every attribute they display. Sales search
//! the customer's "first last" name, the date and the total.

use crate::types::{Customer, Product, Sale};

/// Something that can be matched by the list filters.
pub trait Searchable {
    /// Text form of every attribute the filter looks at.
    fn search_fields(&self) -> Vec<String>;
}

/// Returns true if any search field contains `term`, ignoring case.
pub fn matches<T: Searchable + ?Sized>(item: &T, term: &str) -> bool {
    let needle = term.to_lowercase();
    if needle.is_empty() {
        return true;
    }

    item.search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Returns the items matching `term`, in their original order.
pub fn filter<'a, T: Searchable>(items: &'a [T], term: &str) -> Vec<&'a T> {
    items.iter().filter(|item| matches(*item, term)).collect()
}

impl Searchable for Customer {
    fn search_fields(&self) -> Vec<String> {
        let mut fields = Vec::with_capacity(4);
        if let Some(id) = self.id {
            fields.push(id.to_string());
        }
        fields.push(self.first_name.clone());
        fields.push(self.last_name.clone());
        fields.push(self.national_id.clone());
        fields
    }
}

impl Searchable for Product {
    fn search_fields(&self) -> Vec<String> {
        let mut fields = Vec::with_capacity(5);
        if let Some(id) = self.id {
            fields.push(id.to_string());
        }
        fields.push(self.available_quantity.to_string());
        fields.push(self.unit_cost.to_string());
        fields.push(self.name.clone());
        fields.push(self.brand.clone());
        fields
    }
}

impl Searchable for Sale {
    fn search_fields(&self) -> Vec<String> {
        vec![
            self.customer_name(),
            self.date.to_string(),
            self.total.to_string(),
        ]
    }
}
