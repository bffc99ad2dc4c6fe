use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

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

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.below(items.len())]
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

const FIRST_NAMES: [&str; 12] = [
    "Agata", "Ben", "Carla", "Dmitri", "Elin", "Farid", "Greta", "Hugo", "Ines", "Jonas", "Kaia",
    "Luis",
];
const LAST_NAMES: [&str; 10] = [
    "Lund", "Olsen", "Moreau", "Ivanov", "Berg", "Haddad", "Novak", "Silva", "Kowalski", "Tanaka",
];
const FEDERATIONS: [&str; 4] = ["IPF", "EPF", "USAPL", "BP"];
const YEARS: std::ops::RangeInclusive<i32> = 2019..=2024;

/// (class label, body-weight ratio of a typical total)
const MEN_CLASSES: [(&str, f64); 8] = [
    ("59", 0.70),
    ("66", 0.78),
    ("74", 0.86),
    ("83", 0.93),
    ("93", 1.00),
    ("105", 1.05),
    ("120", 1.10),
    ("120+", 1.18),
];
const WOMEN_CLASSES: [(&str, f64); 8] = [
    ("47", 0.72),
    ("52", 0.78),
    ("57", 0.84),
    ("63", 0.90),
    ("69", 0.96),
    ("76", 1.00),
    ("84", 1.05),
    ("84+", 1.12),
];

struct Entry {
    name: String,
    sex: &'static str,
    date: String,
    federation: &'static str,
    weight_class: &'static str,
    squat: Option<f64>,
    bench: Option<f64>,
    deadlift: Option<f64>,
}

/// Round to the nearest 2.5 kg plate increment; roughly one in `miss` lifts
/// is left blank as a bombed-out or skipped attempt.
fn lift(rng: &mut SimpleRng, mean: f64, miss: usize) -> Option<f64> {
    if rng.below(miss) == 0 {
        return None;
    }
    let kg = rng.gauss(mean, mean * 0.08).max(20.0);
    Some((kg / 2.5).round() * 2.5)
}

fn generate(rng: &mut SimpleRng, count: usize) -> Vec<Entry> {
    (0..count)
        .map(|_| {
            let female = rng.below(3) == 0;
            let (sex, classes, base) = if female {
                ("F", &WOMEN_CLASSES, (130.0, 75.0, 160.0))
            } else {
                ("M", &MEN_CLASSES, (230.0, 155.0, 260.0))
            };
            let &(weight_class, ratio) = rng.pick(classes);
            let year = *YEARS.start() + rng.below(YEARS.clone().count()) as i32;
            let date = format!("{year}-{:02}-{:02}", 1 + rng.below(12), 1 + rng.below(28));

            Entry {
                name: format!("{} {}", rng.pick(&FIRST_NAMES), rng.pick(&LAST_NAMES)),
                sex,
                date,
                federation: *rng.pick(&FEDERATIONS),
                weight_class,
                squat: lift(rng, base.0 * ratio, 20),
                bench: lift(rng, base.1 * ratio, 25),
                deadlift: lift(rng, base.2 * ratio, 20),
            }
        })
        .collect()
}

fn write_csv(path: &str, entries: &[Entry]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    writer.write_record([
        "Name",
        "Sex",
        "Event",
        "Date",
        "Federation",
        "WeightClassKg",
        "Best3SquatKg",
        "Best3BenchKg",
        "Best3DeadliftKg",
    ])?;
    let cell = |v: Option<f64>| v.map(|kg| kg.to_string()).unwrap_or_default();
    for e in entries {
        writer.write_record([
            e.name.clone(),
            e.sex.to_string(),
            "SBD".to_string(),
            e.date.clone(),
            e.federation.to_string(),
            e.weight_class.to_string(),
            cell(e.squat),
            cell(e.bench),
            cell(e.deadlift),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn text_column(entries: &[Entry], f: fn(&Entry) -> &str) -> StringArray {
    StringArray::from(entries.iter().map(f).collect::<Vec<_>>())
}

fn kg_column(entries: &[Entry], f: fn(&Entry) -> Option<f64>) -> Float64Array {
    Float64Array::from(entries.iter().map(f).collect::<Vec<_>>())
}

fn write_parquet(path: &str, entries: &[Entry]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Name", DataType::Utf8, false),
        Field::new("Sex", DataType::Utf8, false),
        Field::new("Date", DataType::Utf8, false),
        Field::new("Federation", DataType::Utf8, false),
        Field::new("WeightClassKg", DataType::Utf8, false),
        Field::new("Best3SquatKg", DataType::Float64, true),
        Field::new("Best3BenchKg", DataType::Float64, true),
        Field::new("Best3DeadliftKg", DataType::Float64, true),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(text_column(entries, |e| e.name.as_str())),
            Arc::new(text_column(entries, |e| e.sex)),
            Arc::new(text_column(entries, |e| e.date.as_str())),
            Arc::new(text_column(entries, |e| e.federation)),
            Arc::new(text_column(entries, |e| e.weight_class)),
            Arc::new(kg_column(entries, |e| e.squat)),
            Arc::new(kg_column(entries, |e| e.bench)),
            Arc::new(kg_column(entries, |e| e.deadlift)),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let entries = generate(&mut rng, 2_000);

    let csv_path = "sample_openipf.csv";
    let parquet_path = "sample_openipf.parquet";
    write_csv(csv_path, &entries)?;
    write_parquet(parquet_path, &entries)?;

    println!(
        "Wrote {} results to {csv_path} and {parquet_path}",
        entries.len()
    );
    Ok(())
}
