use std::collections::BTreeSet;

use serde::Serialize;

use super::model::{Dataset, Record};

// ---------------------------------------------------------------------------
// Filter criteria: what the user currently has selected
// ---------------------------------------------------------------------------

/// One snapshot of the sidebar controls.
///
/// The set fields do not share semantics:
/// * `companies` is always applied, so an empty set hides everything.
/// * `continents` / `countries` only restrict when non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FilterCriteria {
    pub companies: BTreeSet<String>,
    pub continents: BTreeSet<String>,
    pub countries: BTreeSet<String>,
    /// Inclusive `(min, max)` on the normalized opened year.
    pub year_range: (i32, i32),
}

impl FilterCriteria {
    /// Initial selection: every company, no continent/country restriction,
    /// the full observed year range (sentinel included).
    pub fn from_dataset(dataset: &Dataset) -> Self {
        FilterCriteria {
            companies: dataset.companies.iter().cloned().collect(),
            continents: BTreeSet::new(),
            countries: BTreeSet::new(),
            year_range: dataset.year_bounds.unwrap_or((0, 0)),
        }
    }

    /// Whether `record` passes every active predicate.
    pub fn matches(&self, record: &Record) -> bool {
        let (lo, hi) = self.year_range;
        let year = record.opened_year.get();

        self.companies.contains(&record.company)
            && (self.continents.is_empty() || self.continents.contains(&record.continent))
            && (self.countries.is_empty() || self.countries.contains(&record.country))
            && lo <= year
            && year <= hi
    }
}

/// Return indices of records that pass all criteria, in input order.
pub fn filtered_indices(dataset: &Dataset, criteria: &FilterCriteria) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| criteria.matches(rec))
        .map(|(i, _)| i)
        .collect()
}

/// Narrow a filtered view to rows with a known opening year.
pub fn valid_indices(dataset: &Dataset, filtered: &[usize]) -> Vec<usize> {
    filtered
        .iter()
        .copied()
        .filter(|&i| dataset.records[i].opened_year.is_known())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::record;

    fn scenario() -> Dataset {
        Dataset::from_records(vec![
            record("CompanyA", "USA", "NorthAmerica", 2010),
            record("CompanyB", "USA", "NorthAmerica", 0),
            record("CompanyA", "Germany", "Europe", 2015),
        ])
    }

    fn criteria(companies: &[&str], range: (i32, i32)) -> FilterCriteria {
        FilterCriteria {
            companies: companies.iter().map(|s| s.to_string()).collect(),
            year_range: range,
            ..Default::default()
        }
    }

    #[test]
    fn year_range_excludes_sentinel_unless_it_starts_at_zero() {
        let ds = scenario();

        let c = criteria(&["CompanyA", "CompanyB"], (2000, 2020));
        let view = filtered_indices(&ds, &c);
        assert_eq!(view, vec![0, 2]);
        assert_eq!(valid_indices(&ds, &view), vec![0, 2]);

        let c = criteria(&["CompanyA", "CompanyB"], (0, 2020));
        let view = filtered_indices(&ds, &c);
        assert_eq!(view, vec![0, 1, 2]);
        assert_eq!(valid_indices(&ds, &view), vec![0, 2]);
    }

    #[test]
    fn empty_company_selection_hides_everything() {
        let ds = scenario();
        let c = criteria(&[], (0, 3000));
        assert!(filtered_indices(&ds, &c).is_empty());
    }

    #[test]
    fn empty_continent_and_country_sets_do_not_restrict() {
        let ds = scenario();
        let mut c = FilterCriteria::from_dataset(&ds);
        assert_eq!(c.year_range, (0, 2015));
        assert_eq!(filtered_indices(&ds, &c), vec![0, 1, 2]);

        c.continents.insert("Europe".to_string());
        assert_eq!(filtered_indices(&ds, &c), vec![2]);

        c.continents.clear();
        c.countries.insert("USA".to_string());
        assert_eq!(filtered_indices(&ds, &c), vec![0, 1]);

        c.continents.insert("Europe".to_string());
        assert!(filtered_indices(&ds, &c).is_empty());
    }

    #[test]
    fn every_kept_row_satisfies_all_predicates() {
        let ds = Dataset::from_records(vec![
            record("Google", "USA", "North America", 2008),
            record("Meta", "USA", "North America", 2011),
            record("Google", "Belgium", "Europe", 2010),
            record("Microsoft", "Ireland", "Europe", 2009),
            record("Google", "Chile", "South America", 2015),
            record("Meta", "Ireland", "Europe", 0),
            record("Microsoft", "Singapore", "Asia", 2013),
        ]);
        let c = FilterCriteria {
            companies: ["Google", "Microsoft"].map(String::from).into(),
            continents: ["Europe", "Asia"].map(String::from).into(),
            countries: BTreeSet::new(),
            year_range: (2009, 2013),
        };

        let view = filtered_indices(&ds, &c);
        assert_eq!(view, vec![2, 3, 6]);
        for &i in &view {
            assert!(c.matches(&ds.records[i]));
        }
        // Idempotent.
        assert_eq!(filtered_indices(&ds, &c), view);
    }
}
