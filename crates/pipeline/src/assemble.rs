//! Result table assembly.

use std::collections::{HashMap, HashSet};

use crate::model::{CoordinateMap, OutputRecord, OUTPUT_HEADER};
use crate::report::Reporter;

/// Build one output record per occurrence.
///
/// Names are visited in first-seen order and each is repeated `count`
/// times, so duplicates end up grouped under their first appearance. A
/// name without a coordinate is written with the `0, 0` sentinel. A name
/// with no count entry is skipped with a warning.
pub fn assemble(
    occurrences: &[String],
    counts: &HashMap<String, usize>,
    coords: &CoordinateMap,
    reporter: &dyn Reporter,
) -> Vec<OutputRecord> {
    let mut records = Vec::with_capacity(occurrences.len());
    let mut emitted: HashSet<&str> = HashSet::new();

    for name in occurrences {
        if !emitted.insert(name.as_str()) {
            continue;
        }

        let Some(&count) = counts.get(name) else {
            reporter.warning(&format!("failed to save data for {name}, no count found"));
            continue;
        };

        let coordinate = coords.get(name).copied();
        if coordinate.is_none() {
            reporter.progress(&format!("no coordinates found for {name}, writing 0, 0"));
        }

        records.extend((0..count).map(|_| OutputRecord {
            name: name.clone(),
            coordinate,
        }));
        reporter.progress(&format!("stored {count} row(s) for {name}"));
    }

    records
}

/// Header plus one line per record.
pub fn render_lines(records: &[OutputRecord]) -> Vec<String> {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(OUTPUT_HEADER.to_string());
    lines.extend(records.iter().map(OutputRecord::to_line));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::ingest;
    use crate::model::LatLng;
    use crate::report::{Collected, Silent};

    #[test]
    fn test_example_table() {
        let tally = ingest("id,brewery\nH1,Acme Brewing\nH2,Acme Brewing\nH3,Best Beer\n", 1);
        let mut coords = CoordinateMap::new();
        coords.insert("Acme Brewing".into(), LatLng { latitude: 40.0, longitude: -75.0 });

        let records = assemble(tally.occurrences(), tally.counts(), &coords, &Silent);
        assert_eq!(
            render_lines(&records),
            [
                "brewery, latitude, longitude",
                "Acme Brewing, 40.0, -75.0",
                "Acme Brewing, 40.0, -75.0",
                "Best Beer, 0, 0",
            ]
        );
    }

    #[test]
    fn test_every_line_has_three_fields() {
        let tally = ingest("id,brewery\nH1,\"Smith, Jones\"\nH2,Acme\n", 1);
        let mut coords = CoordinateMap::new();
        coords.insert("Acme".into(), LatLng { latitude: 1.5, longitude: 2.0 });

        let records = assemble(tally.occurrences(), tally.counts(), &coords, &Silent);
        let lines = render_lines(&records);

        assert_eq!(lines, ["brewery, latitude, longitude", "\"Smith, 0, 0", "Acme, 1.5, 2.0"]);
        for line in &lines {
            assert_eq!(line.split(',').count(), 3, "{line}");
        }
    }

    #[test]
    fn test_row_count_preserved_with_interleaved_duplicates() {
        let tally = ingest("h,n\n1,A\n2,B\n3,A\n4,C\n5,B\n6,A\n", 1);
        let records = assemble(tally.occurrences(), tally.counts(), &CoordinateMap::new(), &Silent);

        assert_eq!(records.len(), tally.total_rows());
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["A", "A", "A", "B", "B", "C"]);
        assert!(records.iter().all(|r| r.coordinate.is_none()));
    }

    #[test]
    fn test_missing_count_skipped_with_warning() {
        let occurrences = vec!["Known".to_string(), "Ghost".to_string()];
        let mut counts = HashMap::new();
        counts.insert("Known".to_string(), 2);

        let reporter = Collected::new();
        let records = assemble(&occurrences, &counts, &CoordinateMap::new(), &reporter);

        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.name == "Known"));
        let warnings = reporter.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Ghost"));
    }

    #[test]
    fn test_empty_input_renders_header_only() {
        let records = assemble(&[], &HashMap::new(), &CoordinateMap::new(), &Silent);
        assert_eq!(render_lines(&records), ["brewery, latitude, longitude"]);
    }
}
