use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

/// Header line of every result table.
pub const OUTPUT_HEADER: &str = "brewery, latitude, longitude";

/// Name → remote identifier. Absent name = identifier lookup failed.
pub type IdentifierMap = BTreeMap<String, u64>;

/// Name → coordinate. Keyed by the originating name, not the identifier.
pub type CoordinateMap = BTreeMap<String, LatLng>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

// ── Ingested names ──────────────────────────────────────────────────

/// Every name occurrence read from the input, plus per-name counts.
///
/// Built row by row by the ingestor and read-only afterwards. The sum of
/// all counts always equals the number of recorded occurrences.
#[derive(Debug, Clone, Default)]
pub struct NameTally {
    order: Vec<String>,
    unique: Vec<String>,
    counts: HashMap<String, usize>,
}

impl NameTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence of `name`.
    pub fn record(&mut self, name: &str) {
        match self.counts.get_mut(name) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(name.to_string(), 1);
                self.unique.push(name.to_string());
            }
        }
        self.order.push(name.to_string());
    }

    /// Occurrences in original row order, duplicates included.
    pub fn occurrences(&self) -> &[String] {
        &self.order
    }

    /// Distinct names in first-seen order.
    pub fn unique_names(&self) -> &[String] {
        &self.unique
    }

    pub fn counts(&self) -> &HashMap<String, usize> {
        &self.counts
    }

    pub fn count(&self, name: &str) -> Option<usize> {
        self.counts.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.counts.contains_key(name)
    }

    pub fn total_rows(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

// ── Output ──────────────────────────────────────────────────────────

/// One data line of the result table.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputRecord {
    pub name: String,
    /// `None` is written as the `0, 0` sentinel.
    pub coordinate: Option<LatLng>,
}

impl OutputRecord {
    pub fn to_line(&self) -> String {
        match self.coordinate {
            Some(c) => format!(
                "{}, {}, {}",
                self.name,
                format_degrees(c.latitude),
                format_degrees(c.longitude)
            ),
            None => format!("{}, 0, 0", self.name),
        }
    }
}

/// Plain decimal, never exponent form. Whole numbers keep a `.0`.
fn format_degrees(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// Summary of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct RunStats {
    pub started_at: String,
    pub rows_read: usize,
    pub unique_names: usize,
    pub identifiers_resolved: usize,
    pub coordinates_resolved: usize,
    pub rows_written: usize,
    /// Names written with the `0, 0` sentinel, in first-seen order.
    pub unresolved: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_counts_and_order() {
        let mut tally = NameTally::new();
        for name in ["Acme Brewing", "Best Beer", "Acme Brewing"] {
            tally.record(name);
        }

        assert_eq!(tally.total_rows(), 3);
        assert_eq!(tally.occurrences(), ["Acme Brewing", "Best Beer", "Acme Brewing"]);
        assert_eq!(tally.unique_names(), ["Acme Brewing", "Best Beer"]);
        assert_eq!(tally.count("Acme Brewing"), Some(2));
        assert_eq!(tally.count("Best Beer"), Some(1));
        assert_eq!(tally.count("acme brewing"), None);
        assert_eq!(tally.counts().values().sum::<usize>(), tally.total_rows());
    }

    #[test]
    fn test_output_line_formatting() {
        let resolved = OutputRecord {
            name: "Acme Brewing".into(),
            coordinate: Some(LatLng { latitude: 40.0, longitude: -75.0 }),
        };
        assert_eq!(resolved.to_line(), "Acme Brewing, 40.0, -75.0");

        let precise = OutputRecord {
            name: "Hill Farmstead".into(),
            coordinate: Some(LatLng { latitude: 44.6225, longitude: -72.3531 }),
        };
        assert_eq!(precise.to_line(), "Hill Farmstead, 44.6225, -72.3531");

        let near_meridian = OutputRecord {
            name: "Greenwich Ales".into(),
            coordinate: Some(LatLng { latitude: 51.4769, longitude: -0.00001 }),
        };
        assert_eq!(near_meridian.to_line(), "Greenwich Ales, 51.4769, -0.00001");

        let tiny = OutputRecord {
            name: "Gulf Brew".into(),
            coordinate: Some(LatLng { latitude: 0.000000123, longitude: 0.0 }),
        };
        assert_eq!(tiny.to_line(), "Gulf Brew, 0.000000123, 0.0");

        let sentinel = OutputRecord { name: "Best Beer".into(), coordinate: None };
        assert_eq!(sentinel.to_line(), "Best Beer, 0, 0");
    }
}
