// src/services/tags.rs

use std::collections::HashSet;

use crate::models::options::SelectOption;

/// Anything that can carry filter tags. Records without tags return `&[]`.
pub trait Tagged {
    fn tags(&self) -> &[String];
}

/// Union of every record's tags as `{value, label}` pairs, first-seen order.
///
/// Deliberately unsorted: filter dropdowns list tags in the order they were
/// first met.
pub fn aggregate_tags<'a, T, I>(records: I) -> Vec<SelectOption>
where
    T: Tagged + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut seen: HashSet<&str> = HashSet::new();
    let mut options = Vec::new();

    for record in records {
        for tag in record.tags() {
            if seen.insert(tag.as_str()) {
                options.push(SelectOption::new(tag.clone(), tag.clone()));
            }
        }
    }

    options
}
