use anyhow::{Context, Result};
use serde::Serialize;

use attrition_dashboard::data::model::columns::ATTRITION_YES;

const EMPLOYEES: usize = 1470;
const OUTPUT_PATH: &str = "EA.csv";

/// One synthetic employee; field order is the CSV column order.
#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct Employee {
    age: u32,
    attrition: &'static str,
    business_travel: &'static str,
    department: &'static str,
    distance_from_home: u32,
    education: u32,
    education_field: &'static str,
    employee_number: usize,
    environment_satisfaction: u32,
    gender: &'static str,
    job_role: &'static str,
    job_satisfaction: u32,
    monthly_income: u32,
    over_time: &'static str,
    percent_salary_hike: u32,
    total_working_years: u32,
    work_life_balance: u32,
    years_at_company: u32,
    years_in_current_role: u32,
    years_with_curr_manager: u32,
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

    /// Integer in `lo..=hi`.
    fn range(&mut self, lo: u32, hi: u32) -> u32 {
        lo + (self.next_f64() * f64::from(hi - lo + 1)) as u32
    }

    /// Pick from `(item, weight)` pairs.
    fn weighted<T: Copy>(&mut self, choices: &[(T, f64)]) -> T {
        let total: f64 = choices.iter().map(|c| c.1).sum();
        let mut target = self.next_f64() * total;
        for &(item, weight) in choices {
            if target < weight {
                return item;
            }
            target -= weight;
        }
        choices[choices.len() - 1].0
    }
}

fn roles_for(department: &str) -> &'static [(&'static str, f64)] {
    match department {
        "Sales" => &[
            ("Sales Executive", 0.7),
            ("Sales Representative", 0.2),
            ("Manager", 0.1),
        ],
        "Human Resources" => &[("Human Resources", 0.8), ("Manager", 0.2)],
        _ => &[
            ("Research Scientist", 0.3),
            ("Laboratory Technician", 0.27),
            ("Manufacturing Director", 0.15),
            ("Healthcare Representative", 0.13),
            ("Research Director", 0.06),
            ("Manager", 0.09),
        ],
    }
}

fn generate(rng: &mut SimpleRng, employee_number: usize) -> Employee {
    let department = rng.weighted(&[
        ("Research & Development", 0.65),
        ("Sales", 0.30),
        ("Human Resources", 0.05),
    ]);
    let job_role = rng.weighted(roles_for(department));
    let age = rng.gauss(37.0, 9.0).clamp(18.0, 60.0) as u32;
    let total_working_years = rng.range(0, (age - 18).max(1));
    let years_at_company = rng.range(0, total_working_years);
    let years_in_current_role = rng.range(0, years_at_company.min(18));
    let years_with_curr_manager = rng.range(0, years_at_company.min(17));

    let seniority = match job_role {
        "Manager" | "Research Director" => 3.5,
        "Manufacturing Director" | "Healthcare Representative" | "Sales Executive" => 2.0,
        _ => 1.0,
    };
    let monthly_income = (1000.0
        + seniority * 2500.0
        + f64::from(total_working_years) * 180.0
        + rng.gauss(0.0, 900.0))
    .clamp(1009.0, 19999.0) as u32;

    let over_time = rng.weighted(&[("Yes", 0.28), ("No", 0.72)]);
    let business_travel = rng.weighted(&[
        ("Travel_Rarely", 0.71),
        ("Travel_Frequently", 0.19),
        ("Non-Travel", 0.10),
    ]);
    let job_satisfaction = rng.range(1, 4);
    let work_life_balance = rng.weighted(&[(1, 0.05), (2, 0.23), (3, 0.61), (4, 0.11)]);
    let distance_from_home = (rng.next_f64().powi(2) * 29.0) as u32 + 1;

    // Leavers skew young, junior, overworked and unhappy.
    let mut risk = -2.6;
    if over_time == "Yes" {
        risk += 1.3;
    }
    if business_travel == "Travel_Frequently" {
        risk += 0.7;
    }
    risk += (2.5 - f64::from(job_satisfaction)) * 0.35;
    risk -= f64::from(monthly_income) / 10000.0;
    risk -= f64::from(years_at_company) * 0.05;
    risk += if age < 30 { 0.6 } else { 0.0 };
    risk += f64::from(distance_from_home) * 0.02;
    let left = rng.next_f64() < 1.0 / (1.0 + (-risk).exp());

    Employee {
        age,
        attrition: if left { ATTRITION_YES } else { "No" },
        business_travel,
        department,
        distance_from_home,
        education: rng.range(1, 5),
        education_field: rng.weighted(&[
            ("Life Sciences", 0.41),
            ("Medical", 0.32),
            ("Marketing", 0.11),
            ("Technical Degree", 0.09),
            ("Other", 0.05),
            ("Human Resources", 0.02),
        ]),
        employee_number,
        environment_satisfaction: rng.range(1, 4),
        gender: rng.weighted(&[("Male", 0.6), ("Female", 0.4)]),
        job_role,
        job_satisfaction,
        monthly_income,
        over_time,
        percent_salary_hike: rng.range(11, 25),
        total_working_years,
        work_life_balance,
        years_at_company,
        years_in_current_role,
        years_with_curr_manager,
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let mut writer = csv::Writer::from_path(OUTPUT_PATH)
        .with_context(|| format!("creating {OUTPUT_PATH}"))?;

    let mut leavers = 0;
    for employee_number in 1..=EMPLOYEES {
        let employee = generate(&mut rng, employee_number);
        if employee.attrition == ATTRITION_YES {
            leavers += 1;
        }
        writer
            .serialize(&employee)
            .with_context(|| format!("writing employee {employee_number}"))?;
    }
    writer.flush().context("flushing CSV")?;

    println!("Wrote {EMPLOYEES} employees ({leavers} leavers) to {OUTPUT_PATH}");
    Ok(())
}
