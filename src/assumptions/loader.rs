//! JSON assumption loader

use super::Assumptions;
use crate::error::Result;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Load assumptions from a JSON file
pub fn load_assumptions(path: &Path) -> Result<Assumptions> {
    let file = File::open(path)?;
    load_assumptions_from_reader(BufReader::new(file))
}

/// Load assumptions from any JSON reader. Missing sections and fields take defaults.
pub fn load_assumptions_from_reader<R: Read>(reader: R) -> Result<Assumptions> {
    Ok(serde_json::from_reader(reader)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json() {
        let json = r#"{ "property": { "base_growth_pct": 4.0 }, "rent": { "monthly_rent": 2100.0 } }"#;
        let assumptions = load_assumptions_from_reader(json.as_bytes()).unwrap();

        assert_eq!(assumptions.property.base_growth_pct, 4.0);
        assert_eq!(assumptions.property.age_threshold_years, 10);
        assert_eq!(assumptions.property.selling_cost_fraction, 0.08);
        assert_eq!(assumptions.rent.monthly_rent, 2100.0);
        assert_eq!(assumptions.rent.annual_growth, 0.03);
    }

    #[test]
    fn test_empty_json() {
        let assumptions = load_assumptions_from_reader("{}".as_bytes()).unwrap();
        assert_eq!(assumptions, Assumptions::default());
    }

    #[test]
    fn test_load_sample_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/assumptions.json");
        let assumptions = load_assumptions(&path).unwrap();
        assert_eq!(assumptions, Assumptions::default());
    }
}
