use anyhow::Result;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Synthetic transactions export
// ---------------------------------------------------------------------------

/// Areas with their price premium over the city-wide base rate.
const AREAS: [(&str, f64); 14] = [
    ("Palm Jumeirah", 3.2),
    ("Downtown Dubai", 2.8),
    ("Dubai Marina", 2.2),
    ("Dubai Hills Estate", 1.9),
    ("Business Bay", 1.8),
    ("Arabian Ranches", 1.6),
    ("Jumeirah Lake Towers", 1.5),
    ("Al Barsha", 1.2),
    ("Jumeirah Village Circle", 1.1),
    ("Mirdif", 1.0),
    ("Dubai Silicon Oasis", 0.9),
    ("Deira", 0.8),
    ("Al Quoz", 0.7),
    ("International City", 0.6),
];

const GROUPS: [&str; 3] = ["Sales", "Mortgages", "Gifts"];

/// AED per square metre before premium, trend and noise.
const BASE_RATE: f64 = 12_000.0;

#[derive(Serialize)]
struct Row {
    #[serde(rename = "TRANS_VALUE")]
    trans_value: Option<f64>,
    #[serde(rename = "ACTUAL_AREA")]
    actual_area: Option<f64>,
    #[serde(rename = "PROCEDURE_AREA")]
    procedure_area: Option<f64>,
    #[serde(rename = "GROUP_EN")]
    group: &'static str,
    #[serde(rename = "AREA_EN")]
    area: &'static str,
    #[serde(rename = "INSTANCE_DATE")]
    instance_date: String,
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

    fn pick<T: Copy>(&mut self, items: &[T]) -> T {
        items[(self.next_u64() as usize) % items.len()]
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    // 18 months: 2023-01 through 2024-06, with a mild cooling trend so the
    // monthly chart has something to say.
    let months: Vec<(i32, u32)> = (0..18)
        .map(|i| (2023 + i / 12, (i % 12) as u32 + 1))
        .collect();

    let output_path = "transactions.csv";
    let mut writer = csv::Writer::from_path(output_path)?;
    let mut total = 0usize;

    for (month_no, &(year, month)) in months.iter().enumerate() {
        let trend = 1.05 - 0.005 * month_no as f64;

        for _ in 0..120 {
            let (area, premium) = rng.pick(&AREAS);
            let group = match rng.next_f64() {
                p if p < 0.70 => GROUPS[0],
                p if p < 0.95 => GROUPS[1],
                _ => GROUPS[2],
            };

            let actual_area = rng.gauss(90.0_f64.ln(), 0.5).exp().clamp(20.0, 1500.0);
            let rate = BASE_RATE * premium * trend * rng.gauss(0.0, 0.15).exp();
            let trans_value = (actual_area * rate).round();
            let procedure_area = actual_area * (1.0 + rng.gauss(0.0, 0.03));
            // A few filings omit the procedure measurement.
            let procedure_area = (rng.next_f64() >= 0.03).then_some((procedure_area * 100.0).round() / 100.0);

            let day = 1 + (rng.next_u64() % 28) as u32;
            writer.serialize(Row {
                trans_value: Some(trans_value),
                actual_area: Some((actual_area * 100.0).round() / 100.0),
                procedure_area,
                group,
                area,
                instance_date: format!("{year:04}-{month:02}-{day:02}"),
            })?;
            total += 1;
        }
    }

    writer.flush()?;
    println!("Wrote {total} transactions to {output_path}");
    Ok(())
}
