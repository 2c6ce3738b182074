use serde::{Deserialize, Serialize};

// Identifiable defines common traits that can be shared by stored objects
pub trait Identifiable {
    fn id(&self) -> String;
    fn version(&self) -> i64;
}

// Configuration abstracts circulation policy knobs for a library branch
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Configuration {
    pub branch_id: String,
    pub daily_fine_rate: f64,
    pub hold_period_days: i64,
    pub max_renewals: i64,
}

impl Configuration {
    pub fn new(branch_id: &str) -> Self {
        Configuration {
            branch_id: branch_id.to_string(),
            daily_fine_rate: 0.25,
            hold_period_days: 7,
            max_renewals: 2,
        }
    }
}
