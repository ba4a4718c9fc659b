//! End-to-end file tests
//!
//! Tests cover:
//! - Bulk decks mixing free, small and large fields
//! - Connection and mode connection files written then read back
//! - Rigid export layout
//! - Error reporting for missing and malformed files

use std::fs;

use chrono::NaiveDate;
use meshcorr::{
    measure_edges, write_rigid, BulkFile, ConnectionFile, ConnectionFileConfig, ConnectionMatrix,
    IndependentSide, MeshcorrError, ModeConnectionMatrix, RigidExportConfig,
};
use tempfile::tempdir;

fn fixed_time() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 2, 14)
        .and_then(|d| d.and_hms_opt(9, 0, 0))
        .unwrap()
}

const MIXED_DECK: &str = "\
$ plate with a stiffener
GRID,1,,0.0,0.0,0.0
GRID    2               1.0     0.0     0.0
GRID*   3                               1.0             1.0
*       0.0
GRID,4,,0.0,1.0,0.0
CQUAD4  100     1       1       2       3       4
CBAR    200     2       1       2       0.0     0.0     1.0
+               GGG
";

#[cfg(test)]
mod bulk_files {
    use super::*;

    #[test]
    fn test_read_mixed_deck() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plate.bdf");
        fs::write(&path, MIXED_DECK).unwrap();

        let (mut model, report) = BulkFile::read(&path).unwrap();
        assert_eq!(report.counts.nodes, 4);
        assert_eq!(report.counts.quads, 1);
        assert_eq!(report.counts.bars, 1);
        assert_eq!(report.merge.comments, 1);
        assert_eq!(report.merge.continuations, 2);
        assert_eq!(model.nodes.coordinates("3"), Some([1.0, 1.0, 0.0]));

        assert_eq!(model.quads.connection_count(), 4);
        assert_eq!(model.quads.first_key(3).unwrap(), "4");
        assert_eq!(model.quads.last_key(3).unwrap(), "1");

        assert_eq!(measure_edges(&mut model), 0);
        for i in 0..4 {
            assert_eq!(model.quads.correlation(i).unwrap(), 1.0);
        }
        assert_eq!(model.bars.correlation(0).unwrap(), 1.0);
    }

    #[test]
    fn test_missing_deck() {
        let dir = tempdir().unwrap();
        let err = BulkFile::read(dir.path().join("nope.bdf")).unwrap_err();
        assert!(matches!(err, MeshcorrError::NotFound(_)));
        assert!(err.to_string().contains("nope.bdf"));
    }

    #[test]
    fn test_short_element_record() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("short.bdf");
        fs::write(&path, "GRID,1,,0.0,0.0,0.0\nCTRIA3,1,1,1,1\n").unwrap();

        let err = BulkFile::read(&path).unwrap_err();
        assert!(matches!(err, MeshcorrError::Format { .. }));
        assert_eq!(err.line(), Some(2));
    }
}

#[cfg(test)]
mod connection_files {
    use super::*;

    #[test]
    fn test_node_connections_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pairs.txt");

        let mut matrix = ConnectionMatrix::with_connections(3);
        matrix.set_connection(0, "10", "9010", 0.125).unwrap();
        matrix.set_connection(1, "11", "9011", 2.5).unwrap();
        matrix.set_connection(2, "ABCDEFGH", "12345678", 0.0).unwrap();

        let config = ConnectionFileConfig::default()
            .with_timestamp(fixed_time())
            .with_first_source("fe.bdf")
            .with_last_source("test.bdf");
        ConnectionFile::write(&path, &matrix, &config).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("$ meshcorr connection file\n"));
        assert!(text.contains("$ Created      : 2025-02-14 09:00:00\n"));

        let back = ConnectionFile::read(&path).unwrap();
        assert_eq!(back, matrix);
    }

    #[test]
    fn test_read_into_replaces_contents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("one.txt");
        fs::write(&path, "7          8           1.50000\n").unwrap();

        let mut matrix = ConnectionMatrix::with_connections(5);
        assert_eq!(ConnectionFile::read_into(&path, &mut matrix).unwrap(), 1);
        assert_eq!(matrix.connection_count(), 1);
        assert_eq!(matrix.correlation(0).unwrap(), 1.5);
    }

    #[test]
    fn test_mode_connections_reduce_then_write() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("mac.txt");
        let output = dir.path().join("mac_reduced.txt");

        let mut modes = ModeConnectionMatrix::with_connections(3);
        for (i, (mac, f)) in [(0.95, 10.0), (0.40, 20.0), (0.85, 30.0)].iter().enumerate() {
            let key = (i + 1).to_string();
            modes.set_connection(i, &key, &key, *mac).unwrap();
            modes.set_frequencies(i, *f, *f + 0.5).unwrap();
        }
        let config = ConnectionFileConfig::default().with_timestamp(fixed_time());
        ConnectionFile::write_modes(&input, &modes, &config).unwrap();

        let mut read = ConnectionFile::read_modes(&input).unwrap();
        let summary = read.reduce(0.8);
        assert_eq!(summary.retained, 2);
        assert_eq!(summary.dropped, 1);
        ConnectionFile::write_modes(&output, &read, &config).unwrap();

        let back = ConnectionFile::read_modes(&output).unwrap();
        assert_eq!(back.connection_count(), 2);
        assert_eq!(back.frequencies(1).unwrap(), (30.0, 30.5));
        assert_eq!(back.connection(1).unwrap().first, "3");
    }

    #[test]
    fn test_malformed_connection_line() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.txt");
        fs::write(&path, "$ comment\n1          2           x.y\n").unwrap();

        let err = ConnectionFile::read(&path).unwrap_err();
        assert_eq!(err.line(), Some(2));
        assert!(err.to_string().starts_with("Format error in "));
    }
}

#[cfg(test)]
mod rigid_exports {
    use super::*;

    #[test]
    fn test_export_from_connection_file() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("rigid.bdf");

        let mut matrix = ConnectionMatrix::with_connections(2);
        matrix.set_connection(0, "1", "501", 0.0).unwrap();
        matrix.set_connection(1, "2", "502", 0.0).unwrap();

        let config = RigidExportConfig::default()
            .with_timestamp(fixed_time())
            .with_start_id(70001)
            .with_independent(IndependentSide::Last);
        assert_eq!(write_rigid(&output, &matrix, &config).unwrap(), 2);

        let text = fs::read_to_string(&output).unwrap();
        let records: Vec<&str> = text.lines().filter(|l| !l.starts_with('$')).collect();
        assert_eq!(
            records,
            vec![
                "RBE2    70001   501     123456  1",
                "RBE2    70002   502     123456  2",
            ]
        );

        // The export is itself readable bulk data with no recognised entities
        let (model, report) = BulkFile::read(&output).unwrap();
        assert_eq!(report.counts.elements(), 0);
        assert!(model.nodes.is_empty());
    }
}
