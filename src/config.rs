use std::env;
use std::time::Duration;

use crate::classifier::ClassifierKind;

pub struct Config {
    pub port: u16,
    pub patterns_path: String,
    pub classifier: ClassifierKind,
    pub analysis_delay: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("PORT must be a valid u16"),
            patterns_path: env::var("PATTERNS_CSV")
                .unwrap_or_else(|_| "clarity_patterns.csv".to_string()),
            classifier: env::var("CLASSIFIER")
                .unwrap_or_else(|_| "placeholder".to_string())
                .parse()
                .expect("CLASSIFIER must be 'placeholder' or 'guidance'"),
            analysis_delay: Duration::from_millis(
                env::var("ANALYSIS_DELAY_MS")
                    .unwrap_or_else(|_| "0".to_string())
                    .parse()
                    .expect("ANALYSIS_DELAY_MS must be a number of milliseconds"),
            ),
        }
    }
}
