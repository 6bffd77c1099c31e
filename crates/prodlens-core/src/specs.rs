//! Display ordering for specification rows.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::types::Specification;

/// Spec types shown first, in this order. Matching is a case-insensitive
/// substring test against the row's type.
pub const KEY_SPEC_TYPES: &[&str] = &[
    "Brand",
    "Screen Size",
    "RAM Memory Installed Size",
    "Hard Disk Size",
    "CPU Model",
    "Processor Type",
    "Operating System",
    "Colour",
    "Resolution",
    "Item Weight",
];

/// Number of rows shown before the list is expanded.
pub const MAX_COLLAPSED_SPECS: usize = 6;

/// Deduplicates by case-insensitive type (first occurrence wins) and sorts
/// key specs first, everything else alphabetically.
#[must_use]
pub fn normalize_specifications(specs: &[Specification]) -> Vec<Specification> {
    let mut seen = HashSet::new();
    let mut unique: Vec<Specification> = specs
        .iter()
        .filter(|spec| seen.insert(spec.kind.to_lowercase()))
        .cloned()
        .collect();

    unique.sort_by(compare_specs);
    unique
}

/// Splits an ordered list into the rows shown while collapsed and the number
/// of rows hidden behind the expand control.
#[must_use]
pub fn collapse(specs: &[Specification], cap: usize) -> (&[Specification], usize) {
    let shown = specs.len().min(cap);
    (&specs[..shown], specs.len() - shown)
}

fn key_index(kind: &str) -> Option<usize> {
    let kind = kind.to_lowercase();
    KEY_SPEC_TYPES
        .iter()
        .position(|key| kind.contains(&key.to_lowercase()))
}

fn compare_specs(a: &Specification, b: &Specification) -> Ordering {
    match (key_index(&a.kind), key_index(&b.kind)) {
        (Some(ia), Some(ib)) => ia.cmp(&ib),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a
            .kind
            .to_lowercase()
            .cmp(&b.kind.to_lowercase())
            .then_with(|| a.kind.cmp(&b.kind)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(kind: &str, value: &str) -> Specification {
        Specification::new(kind, value)
    }

    #[test]
    fn drops_case_insensitive_duplicates_and_prioritizes_brand() {
        let input = vec![
            spec("Colour", "Red"),
            spec("Brand", "Acme"),
            spec("colour", "dup"),
        ];
        let out = normalize_specifications(&input);
        assert_eq!(out, vec![spec("Brand", "Acme"), spec("Colour", "Red")]);
    }

    #[test]
    fn key_specs_follow_priority_order() {
        let input = vec![
            spec("Item Weight", "2 kg"),
            spec("Operating System", "Linux"),
            spec("Screen Size", "15 in"),
            spec("Brand Name", "Acme"),
        ];
        let kinds: Vec<String> = normalize_specifications(&input)
            .into_iter()
            .map(|s| s.kind)
            .collect();
        assert_eq!(
            kinds,
            ["Brand Name", "Screen Size", "Operating System", "Item Weight"]
        );
    }

    #[test]
    fn remaining_specs_sort_alphabetically_after_key_specs() {
        let input = vec![
            spec("Wattage", "1500 W"),
            spec("capacity", "1.7 L"),
            spec("Material", "Steel"),
            spec("Colour", "Black"),
        ];
        let kinds: Vec<String> = normalize_specifications(&input)
            .into_iter()
            .map(|s| s.kind)
            .collect();
        assert_eq!(kinds, ["Colour", "capacity", "Material", "Wattage"]);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(normalize_specifications(&[]).is_empty());
    }

    #[test]
    fn collapse_reports_hidden_rows() {
        let input: Vec<Specification> = (0..8).map(|i| spec(&format!("K{i}"), "v")).collect();
        let (shown, hidden) = collapse(&input, MAX_COLLAPSED_SPECS);
        assert_eq!(shown.len(), 6);
        assert_eq!(hidden, 2);

        let (shown, hidden) = collapse(&input[..3], MAX_COLLAPSED_SPECS);
        assert_eq!(shown.len(), 3);
        assert_eq!(hidden, 0);
    }
}
