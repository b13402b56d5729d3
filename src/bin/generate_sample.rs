use std::fs;
use std::path::Path;

use encoding_rs::WINDOWS_1252;

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

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

const REGIONS: [&str; 4] = ["West", "East", "Central", "South"];
const SEGMENTS: [&str; 3] = ["Consumer", "Corporate", "Home Office"];
const CUSTOMERS: [&str; 8] = [
    "Claire Gute",
    "Zoë Baker",
    "Sean O'Donnell",
    "Brosina Hoffman",
    "Andrew Allen",
    "Irene Maddox",
    "Harold Pawlan",
    "René Müller",
];

/// (category, sub-category, typical unit price, typical margin)
const PRODUCTS: [(&str, &str, f64, f64); 12] = [
    ("Furniture", "Bookcases", 260.0, -0.03),
    ("Furniture", "Chairs", 180.0, 0.08),
    ("Furniture", "Tables", 320.0, -0.09),
    ("Furniture", "Furnishings", 45.0, 0.14),
    ("Office Supplies", "Binders", 20.0, 0.15),
    ("Office Supplies", "Paper", 18.0, 0.43),
    ("Office Supplies", "Storage", 110.0, 0.09),
    ("Office Supplies", "Art", 12.0, 0.25),
    ("Technology", "Phones", 170.0, 0.13),
    ("Technology", "Copiers", 700.0, 0.37),
    ("Technology", "Machines", 480.0, 0.02),
    ("Technology", "Accessories", 60.0, 0.25),
];
const DISCOUNTS: [f64; 6] = [0.0, 0.0, 0.1, 0.2, 0.4, 0.7];

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn main() {
    let mut rng = SimpleRng::new(42);
    let n_rows = 2000;

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record([
            "Row ID",
            "Order ID",
            "Customer Name",
            "Segment",
            "Region",
            "Category",
            "Sub-Category",
            "Sales",
            "Quantity",
            "Discount",
            "Profit",
        ])
        .expect("Failed to write header");

    for row_id in 1..=n_rows {
        let &(category, sub_category, price, margin) = rng.pick(&PRODUCTS);
        let quantity = 1 + rng.next_u64() % 9;
        let discount = *rng.pick(&DISCOUNTS);

        // Every 250th order is a free replacement: zero sales, some cost.
        let sales = if row_id % 250 == 0 {
            0.0
        } else {
            round2(price * quantity as f64 * (0.6 + 0.8 * rng.next_f64()) * (1.0 - discount))
        };
        let cost = price * quantity as f64 * (1.0 - margin) * (0.9 + 0.2 * rng.next_f64());
        let profit = if sales == 0.0 {
            -round2(cost * 0.1)
        } else {
            round2(sales - cost * (1.0 - discount * 0.5))
        };

        writer
            .write_record([
                row_id.to_string(),
                format!("CA-{}-{:06}", 2014 + row_id % 4, 100_000 + row_id * 37),
                rng.pick(&CUSTOMERS).to_string(),
                rng.pick(&SEGMENTS).to_string(),
                rng.pick(&REGIONS).to_string(),
                category.to_string(),
                sub_category.to_string(),
                sales.to_string(),
                quantity.to_string(),
                discount.to_string(),
                profit.to_string(),
            ])
            .expect("Failed to write row");
    }

    let bytes = writer
        .into_inner()
        .unwrap_or_else(|e| panic!("Failed to flush CSV: {e}"));
    let text = String::from_utf8(bytes).expect("CSV output is UTF-8");
    let (encoded, _, unmappable) = WINDOWS_1252.encode(&text);
    assert!(!unmappable, "sample text must fit Windows-1252");

    let output_path = Path::new("data").join("Superstore.csv");
    fs::create_dir_all("data").expect("Failed to create data directory");
    fs::write(&output_path, &encoded).expect("Failed to write output file");

    println!("Wrote {n_rows} orders to {}", output_path.display());
}
