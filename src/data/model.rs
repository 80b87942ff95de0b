use std::fmt;

// ---------------------------------------------------------------------------
// OpenedYear – normalized "Opened" column
// ---------------------------------------------------------------------------

/// Calendar year a site opened, or [`OpenedYear::UNKNOWN`] when the source
/// date was missing or could not be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct OpenedYear(i32);

impl OpenedYear {
    /// Sentinel for missing / unparseable dates.
    pub const UNKNOWN: OpenedYear = OpenedYear(0);

    /// Wrap a parsed year. Non-positive years collapse to the sentinel.
    pub fn new(year: i32) -> Self {
        if year > 0 {
            OpenedYear(year)
        } else {
            Self::UNKNOWN
        }
    }

    pub fn get(self) -> i32 {
        self.0
    }

    pub fn is_known(self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for OpenedYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_known() {
            write!(f, "{}", self.0)
        } else {
            write!(f, "N/A")
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the source table
// ---------------------------------------------------------------------------

/// A single data-center location.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub company: String,
    pub country: String,
    pub continent: String,
    pub city: String,
    /// Free-text address / description.
    pub location: String,
    /// Latitude; NaN when the source cell was blank.
    pub lat: f64,
    /// Longitude; NaN when the source cell was blank.
    pub lon: f64,
    /// The "Opened" cell exactly as read (may be empty).
    pub opened_raw: String,
    pub opened_year: OpenedYear,
}

impl Record {
    /// Whether both coordinates are usable for plotting.
    pub fn has_coordinates(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed table with the option lists the filter controls need.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub records: Vec<Record>,
    /// Distinct companies in first-appearance order.
    pub companies: Vec<String>,
    /// Distinct continents in first-appearance order.
    pub continents: Vec<String>,
    /// Distinct countries in first-appearance order.
    pub countries: Vec<String>,
    /// Observed (min, max) opened year over every record, sentinel included.
    pub year_bounds: Option<(i32, i32)>,
}

impl Dataset {
    /// Build the option lists and year bounds from the loaded records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut companies = Vec::new();
        let mut continents = Vec::new();
        let mut countries = Vec::new();
        let mut year_bounds: Option<(i32, i32)> = None;

        for rec in &records {
            push_unique(&mut companies, &rec.company);
            push_unique(&mut continents, &rec.continent);
            push_unique(&mut countries, &rec.country);

            let y = rec.opened_year.get();
            year_bounds = Some(match year_bounds {
                Some((lo, hi)) => (lo.min(y), hi.max(y)),
                None => (y, y),
            });
        }

        Dataset {
            records,
            companies,
            continents,
            countries,
            year_bounds,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records whose opening date could not be parsed.
    pub fn unknown_year_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| !r.opened_year.is_known())
            .count()
    }
}

fn push_unique(list: &mut Vec<String>, value: &str) {
    if !list.iter().any(|v| v == value) {
        list.push(value.to_string());
    }
}

#[cfg(test)]
pub(crate) fn record(company: &str, country: &str, continent: &str, year: i32) -> Record {
    Record {
        company: company.to_string(),
        country: country.to_string(),
        continent: continent.to_string(),
        city: format!("{country} City"),
        location: format!("{company} campus"),
        lat: 10.0,
        lon: 20.0,
        opened_raw: if year > 0 { format!("{year}-01-01") } else { String::new() },
        opened_year: OpenedYear::new(year),
    }
}
