use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::print_batches;
use parquet::arrow::ArrowWriter;

/// (city, country, continent, lat, lon)
const SITES: [(&str, &str, &str, f64, f64); 16] = [
    ("The Dalles", "USA", "North America", 45.59, -121.18),
    ("Prineville", "USA", "North America", 44.30, -120.83),
    ("Ashburn", "USA", "North America", 39.04, -77.49),
    ("Quincy", "USA", "North America", 47.23, -119.85),
    ("Montreal", "Canada", "North America", 45.50, -73.57),
    ("Dublin", "Ireland", "Europe", 53.35, -6.26),
    ("Hamina", "Finland", "Europe", 60.57, 27.20),
    ("Lulea", "Sweden", "Europe", 65.58, 22.15),
    ("Frankfurt", "Germany", "Europe", 50.11, 8.68),
    ("Eemshaven", "Netherlands", "Europe", 53.44, 6.83),
    ("Singapore", "Singapore", "Asia", 1.35, 103.82),
    ("Changhua", "Taiwan", "Asia", 24.08, 120.54),
    ("Tokyo", "Japan", "Asia", 35.68, 139.69),
    ("Quilicura", "Chile", "South America", -33.36, -70.73),
    ("Sydney", "Australia", "Oceania", -33.87, 151.21),
    ("Johannesburg", "South Africa", "Africa", -26.20, 28.05),
];

const COMPANIES: [&str; 5] = ["Google", "Meta", "Microsoft", "Amazon", "Apple"];

/// Cells that do not parse as dates; they load as an unknown year.
const BAD_DATES: [&str; 3] = ["", "TBD", "under construction"];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform integer in `0..n`.
    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }

    /// Small coordinate jitter in `[-0.25, 0.25)`.
    fn jitter(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64 * 0.5 - 0.25
    }
}

struct Row {
    company: String,
    country: String,
    continent: String,
    city: String,
    location: String,
    lat: f64,
    lon: f64,
    opened: String,
}

fn generate(rng: &mut SimpleRng) -> Vec<Row> {
    let mut rows = Vec::new();
    for company in COMPANIES {
        for &(city, country, continent, lat, lon) in &SITES {
            // Roughly half the sites per company.
            if rng.below(2) == 0 {
                continue;
            }
            let opened = if rng.below(10) == 0 {
                BAD_DATES[rng.below(BAD_DATES.len() as u64) as usize].to_string()
            } else {
                let year = 2000 + rng.below(24);
                let month = 1 + rng.below(12);
                let day = 1 + rng.below(28);
                format!("{year}-{month:02}-{day:02}")
            };
            rows.push(Row {
                company: company.to_string(),
                country: country.to_string(),
                continent: continent.to_string(),
                city: city.to_string(),
                location: format!("{company} {city} campus"),
                lat: lat + rng.jitter(),
                lon: lon + rng.jitter(),
                opened,
            });
        }
    }
    rows
}

fn write_csv(path: &str, rows: &[Row]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    writer.write_record([
        "Company",
        "Country",
        "Continent",
        "City",
        "Location",
        "Latitude",
        "Longitude",
        "Opened",
    ])?;
    for r in rows {
        let lat = format!("{:.4}", r.lat);
        let lon = format!("{:.4}", r.lon);
        writer.write_record([
            r.company.as_str(),
            r.country.as_str(),
            r.continent.as_str(),
            r.city.as_str(),
            r.location.as_str(),
            lat.as_str(),
            lon.as_str(),
            r.opened.as_str(),
        ])?;
    }
    writer.flush().with_context(|| format!("flushing {path}"))?;
    Ok(())
}

fn to_batch(rows: &[Row]) -> Result<RecordBatch> {
    let text = |f: fn(&Row) -> &str| -> ArrayRef {
        Arc::new(StringArray::from(rows.iter().map(f).collect::<Vec<_>>()))
    };
    let float = |f: fn(&Row) -> f64| -> ArrayRef {
        Arc::new(Float64Array::from(rows.iter().map(f).collect::<Vec<_>>()))
    };

    RecordBatch::try_from_iter(vec![
        ("Company", text(|r| r.company.as_str())),
        ("Country", text(|r| r.country.as_str())),
        ("Continent", text(|r| r.continent.as_str())),
        ("City", text(|r| r.city.as_str())),
        ("Location", text(|r| r.location.as_str())),
        ("Latitude", float(|r| r.lat)),
        ("Longitude", float(|r| r.lon)),
        ("Opened", text(|r| r.opened.as_str())),
    ])
    .context("building record batch")
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows = generate(&mut rng);

    let csv_path = "sample_data.csv";
    write_csv(csv_path, &rows)?;

    let batch = to_batch(&rows)?;
    let parquet_path = "sample_data.parquet";
    let file = std::fs::File::create(parquet_path)
        .with_context(|| format!("creating {parquet_path}"))?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
    writer.write(&batch)?;
    writer.close()?;

    print_batches(&[batch.slice(0, batch.num_rows().min(5))])?;
    println!(
        "Wrote {} locations to {csv_path} and {parquet_path}",
        rows.len()
    );
    Ok(())
}
