use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::Serialize;

use super::model::{Dataset, Record};

// ---------------------------------------------------------------------------
// Aggregates over the positive-year view
// ---------------------------------------------------------------------------

/// Locations of one company and its share of the view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyCount {
    pub company: String,
    pub count: usize,
    /// `count / total_locations`, in `[0, 1]`.
    pub share: f64,
}

/// Country × company contingency table, zero filled.
///
/// Both axes are sorted; `counts[i][j]` is the number of locations of
/// `companies[j]` in `countries[i]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompanyCountryMatrix {
    pub countries: Vec<String>,
    pub companies: Vec<String>,
    pub counts: Vec<Vec<usize>>,
}

impl CompanyCountryMatrix {
    fn build<'a>(rows: impl Iterator<Item = &'a Record>) -> Self {
        let mut cells: BTreeMap<(&str, &str), usize> = BTreeMap::new();
        let mut companies: BTreeSet<&str> = BTreeSet::new();
        for rec in rows {
            *cells
                .entry((rec.country.as_str(), rec.company.as_str()))
                .or_insert(0) += 1;
            companies.insert(rec.company.as_str());
        }

        let countries: Vec<String> = cells
            .keys()
            .map(|(country, _)| country.to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let companies: Vec<String> = companies.into_iter().map(str::to_string).collect();

        let counts = countries
            .iter()
            .map(|country| {
                companies
                    .iter()
                    .map(|company| {
                        cells
                            .get(&(country.as_str(), company.as_str()))
                            .copied()
                            .unwrap_or(0)
                    })
                    .collect()
            })
            .collect();

        CompanyCountryMatrix {
            countries,
            companies,
            counts,
        }
    }

    /// Count for one (country, company) cell; 0 for unknown labels.
    pub fn get(&self, country: &str, company: &str) -> usize {
        let Some(i) = self.countries.iter().position(|c| c == country) else {
            return 0;
        };
        let Some(j) = self.companies.iter().position(|c| c == company) else {
            return 0;
        };
        self.counts[i][j]
    }

    /// Row sums, aligned with `countries`.
    pub fn country_totals(&self) -> Vec<usize> {
        self.counts.iter().map(|row| row.iter().sum()).collect()
    }

    /// Column sums, aligned with `companies`.
    pub fn company_totals(&self) -> Vec<usize> {
        (0..self.companies.len())
            .map(|j| self.counts.iter().map(|row| row[j]).sum())
            .collect()
    }

    /// Column of counts for one company, aligned with `countries`.
    pub fn company_column(&self, company: &str) -> Vec<usize> {
        match self.companies.iter().position(|c| c == company) {
            Some(j) => self.counts.iter().map(|row| row[j]).collect(),
            None => vec![0; self.countries.len()],
        }
    }
}

/// Openings per calendar year over a contiguous range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearHistogram {
    pub first_year: i32,
    /// One bucket per year starting at `first_year`.
    pub counts: Vec<usize>,
}

impl YearHistogram {
    /// `None` when there are no years to bucket.
    fn build(years: impl Iterator<Item = i32> + Clone) -> Option<Self> {
        let min = years.clone().min()?;
        let max = years.clone().max()?;

        let mut counts = vec![0usize; (max - min) as usize + 1];
        for y in years {
            counts[(y - min) as usize] += 1;
        }
        Some(YearHistogram {
            first_year: min,
            counts,
        })
    }

    pub fn last_year(&self) -> i32 {
        self.first_year + self.counts.len() as i32 - 1
    }

    /// `(year, count)` for every bucket, gaps included.
    pub fn buckets(&self) -> impl Iterator<Item = (i32, usize)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .map(|(i, &n)| (self.first_year + i as i32, n))
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Everything the metric cards and charts show for one filter state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub total_locations: usize,
    pub countries_covered: usize,
    pub companies_represented: usize,
    /// Ordered by count descending, then company name.
    pub company_counts: Vec<CompanyCount>,
    pub company_country_matrix: CompanyCountryMatrix,
    pub year_histogram: Option<YearHistogram>,
}

impl Summary {
    /// Aggregate the rows at `valid` (indices into `dataset.records`).
    pub fn compute(dataset: &Dataset, valid: &[usize]) -> Self {
        let rows = move || valid.iter().map(move |&i| &dataset.records[i]);
        let total = valid.len();

        let countries: BTreeSet<&str> = rows().map(|r| r.country.as_str()).collect();

        let mut per_company: HashMap<&str, usize> = HashMap::new();
        for rec in rows() {
            *per_company.entry(rec.company.as_str()).or_insert(0) += 1;
        }
        let mut company_counts: Vec<CompanyCount> = per_company
            .into_iter()
            .map(|(company, count)| CompanyCount {
                company: company.to_string(),
                count,
                share: if total == 0 { 0.0 } else { count as f64 / total as f64 },
            })
            .collect();
        company_counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.company.cmp(&b.company)));

        Summary {
            total_locations: total,
            countries_covered: countries.len(),
            companies_represented: company_counts.len(),
            company_country_matrix: CompanyCountryMatrix::build(rows()),
            year_histogram: YearHistogram::build(rows().map(|r| r.opened_year.get())),
            company_counts,
        }
    }
}

// ---------------------------------------------------------------------------
// Row-level outputs: map points and table rows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct MapPoint {
    pub lat: f64,
    pub lon: f64,
    pub company: String,
}

/// Coordinates of the rows at `valid`; rows without coordinates are skipped.
pub fn map_points(dataset: &Dataset, valid: &[usize]) -> Vec<MapPoint> {
    valid
        .iter()
        .map(|&i| &dataset.records[i])
        .filter(|r| r.has_coordinates())
        .map(|r| MapPoint {
            lat: r.lat,
            lon: r.lon,
            company: r.company.clone(),
        })
        .collect()
}

/// One line of the data table, already formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub city: String,
    pub country: String,
    /// The opening year, or "N/A" for the sentinel.
    pub opened: String,
    pub company: String,
    pub location: String,
}

pub fn table_rows(dataset: &Dataset, valid: &[usize]) -> Vec<TableRow> {
    valid
        .iter()
        .map(|&i| {
            let r = &dataset.records[i];
            TableRow {
                city: r.city.clone(),
                country: r.country.clone(),
                opened: r.opened_year.to_string(),
                company: r.company.clone(),
                location: r.location.clone(),
            }
        })
        .collect()
}
