//! Writes a synthetic Iris-like dataset to `iris_sample.csv` and
//! `iris_sample.parquet` in the current directory.

use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

const ROWS_PER_SPECIES: usize = 50;

/// Per-species (mean, std dev) for sepal length, sepal width, petal length,
/// petal width, in centimetres.
const SPECIES: [(&str, [(f64, f64); 4]); 3] = [
    ("setosa", [(5.01, 0.35), (3.43, 0.38), (1.46, 0.17), (0.25, 0.11)]),
    ("versicolor", [(5.94, 0.52), (2.77, 0.31), (4.26, 0.47), (1.33, 0.20)]),
    ("virginica", [(6.59, 0.64), (2.97, 0.32), (5.55, 0.55), (2.03, 0.27)]),
];

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Flower {
    sepal_length: f64,
    sepal_width: f64,
    petal_length: f64,
    petal_width: f64,
    species: &'static str,
}

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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// One measurement: normal draw, rounded to a millimetre, never below 0.1 cm.
fn measure(rng: &mut SimpleRng, (mean, std_dev): (f64, f64)) -> f64 {
    (rng.gauss(mean, std_dev) * 10.0).round().max(1.0) / 10.0
}

fn generate(rng: &mut SimpleRng) -> Vec<Flower> {
    let mut flowers = Vec::with_capacity(SPECIES.len() * ROWS_PER_SPECIES);
    for (species, params) in SPECIES {
        for _ in 0..ROWS_PER_SPECIES {
            flowers.push(Flower {
                sepal_length: measure(rng, params[0]),
                sepal_width: measure(rng, params[1]),
                petal_length: measure(rng, params[2]),
                petal_width: measure(rng, params[3]),
                species,
            });
        }
    }
    flowers
}

fn write_csv(path: &str, flowers: &[Flower]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    for flower in flowers {
        writer.serialize(flower).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn float_column(flowers: &[Flower], field: fn(&Flower) -> f64) -> ArrayRef {
    Arc::new(Float64Array::from(flowers.iter().map(field).collect::<Vec<_>>()))
}

fn write_parquet(path: &str, flowers: &[Flower]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("sepalLength", DataType::Float64, false),
        Field::new("sepalWidth", DataType::Float64, false),
        Field::new("petalLength", DataType::Float64, false),
        Field::new("petalWidth", DataType::Float64, false),
        Field::new("species", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            float_column(flowers, |f| f.sepal_length),
            float_column(flowers, |f| f.sepal_width),
            float_column(flowers, |f| f.petal_length),
            float_column(flowers, |f| f.petal_width),
            Arc::new(StringArray::from(
                flowers.iter().map(|f| f.species).collect::<Vec<_>>(),
            )),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let mut rng = SimpleRng::new(42);
    let flowers = generate(&mut rng);

    write_csv("iris_sample.csv", &flowers)?;
    write_parquet("iris_sample.parquet", &flowers)?;

    log::info!(
        "Wrote {} flowers ({} species) to iris_sample.csv and iris_sample.parquet",
        flowers.len(),
        SPECIES.len()
    );
    Ok(())
}
