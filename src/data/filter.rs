//! Sector selection over a loaded dataset.

use std::collections::HashSet;

use crate::domain::{SalesDataset, SalesRecord};

/// Distinct sectors in first-seen order (the choice list for the data view).
pub fn distinct_sectors(dataset: &SalesDataset) -> Vec<&str> {
    let mut seen = HashSet::new();
    dataset
        .iter()
        .map(SalesRecord::sector)
        .filter(|s| seen.insert(*s))
        .collect()
}

/// Every record of `sector`, in original relative order.
///
/// No match is not an error: the result is simply empty.
pub fn filter_by_sector<'a>(dataset: &'a SalesDataset, sector: &str) -> Vec<&'a SalesRecord> {
    dataset.iter().filter(|r| r.sector() == sector).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> SalesDataset {
        let rows = [
            ("Varejo", "Jan", 100.0),
            ("Tecnologia", "Jan", 200.0),
            ("Varejo", "Fev", 110.0),
            ("Saude", "Jan", 90.0),
            ("Varejo", "Mar", 120.0),
        ];
        SalesDataset::from_records(
            rows.iter()
                .map(|(s, m, a)| SalesRecord::new(s, m, *a).unwrap())
                .collect(),
        )
    }

    #[test]
    fn distinct_sectors_first_seen_order() {
        let ds = dataset();
        assert_eq!(distinct_sectors(&ds), vec!["Varejo", "Tecnologia", "Saude"]);
    }

    #[test]
    fn filter_keeps_matches_in_order() {
        let ds = dataset();
        let months: Vec<&str> = filter_by_sector(&ds, "Varejo").iter().map(|r| r.month()).collect();
        assert_eq!(months, vec!["Jan", "Fev", "Mar"]);
        assert!(filter_by_sector(&ds, "Varejo").iter().all(|r| r.sector() == "Varejo"));
    }

    #[test]
    fn filter_on_absent_sector_is_empty() {
        let ds = dataset();
        assert!(filter_by_sector(&ds, "Industria").is_empty());
        assert!(filter_by_sector(&SalesDataset::empty(), "Varejo").is_empty());
        assert!(distinct_sectors(&SalesDataset::empty()).is_empty());
    }

    #[test]
    fn filter_is_exact_match() {
        let ds = dataset();
        assert!(filter_by_sector(&ds, "varejo").is_empty());
    }
}
