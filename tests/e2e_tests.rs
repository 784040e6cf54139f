//! End-to-end integration tests
//!
//! Fixture tests copy `input.csv` from a fixture directory into a temp dir,
//! run one accessor operation on it, and compare the file with `expected.csv`.
//!
//! Test fixtures are located in tests/fixtures/ and cover:
//! - Record updates (match, no match, default test-result columns, quoted fields)
//! - Appending rows and flattened records
//! - Overwriting with a header from records
//!
//! The remaining tests pin down whole-file properties: round trips, selective
//! reads, append behaviour and quoting fidelity.

#[cfg(test)]
mod tests {
    use csv_keywords::{AppendData, CsvAccessor, CsvFormat, LineSelection, Quoting, Record, Row};
    use rstest::rstest;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::{tempdir, TempDir};

    fn row(values: &[&str]) -> Row {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn record(pairs: &[(&str, &str)]) -> Record {
        pairs.iter().copied().collect()
    }

    /// Apply the operation a fixture exercises
    fn apply(fixture_name: &str, path: &Path) {
        let csv = CsvAccessor::new();
        let format = CsvFormat::default();
        match fixture_name {
            "update_match" => {
                assert!(csv.update_one_record(path, "2", "done", "id", "status").unwrap());
            }
            "update_no_match" => {
                assert!(!csv.update_one_record(path, "42", "done", "id", "status").unwrap());
            }
            "update_test_result" => {
                assert!(csv.update_test_result(path, "Login works", "Pass").unwrap());
            }
            "quoted_fields" => {
                assert!(csv.update_one_record(path, "1", "done", "id", "status").unwrap());
            }
            "append_rows" => csv
                .append(
                    path,
                    AppendData::Rows(vec![row(&["2", "done"]), row(&["3", "failed, retried"])]),
                    &format,
                )
                .unwrap(),
            "append_records" => csv
                .append(
                    path,
                    AppendData::Records(vec![record(&[("id", "2"), ("status", "done")])]),
                    &format,
                )
                .unwrap(),
            "write_from_records" => csv
                .write_from_records(
                    path,
                    &[
                        record(&[("id", "1"), ("status", "pending")]),
                        record(&[("id", "2"), ("status", "done")]),
                    ],
                    None,
                    &format,
                )
                .unwrap(),
            other => panic!("No operation defined for fixture {}", other),
        }
    }

    /// Run a test fixture by applying its operation to a copy of input.csv
    ///
    /// # Panics
    ///
    /// Panics if fixture files cannot be read or the result differs from
    /// expected.csv.
    fn run_test_fixture(fixture_name: &str) {
        let fixture_dir = PathBuf::from(format!("tests/fixtures/{}", fixture_name));
        let input_path = fixture_dir.join("input.csv");
        let expected_path = fixture_dir.join("expected.csv");

        assert!(input_path.exists(), "Input file not found: {}", input_path.display());
        assert!(
            expected_path.exists(),
            "Expected file not found: {}",
            expected_path.display()
        );

        let workdir = tempdir().expect("Failed to create temp dir");
        let path = workdir.path().join("data.csv");
        fs::copy(&input_path, &path).expect("Failed to copy fixture input");

        apply(fixture_name, &path);

        let actual_output = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read output file: {}", e));
        let expected_output = fs::read_to_string(&expected_path)
            .unwrap_or_else(|e| panic!("Failed to read expected file: {}", e));

        assert_eq!(
            actual_output, expected_output,
            "\n\nOutput mismatch for fixture: {}\n\nActual output:\n{}\n\nExpected output:\n{}\n",
            fixture_name, actual_output, expected_output
        );
    }

    #[rstest]
    #[case("update_match")]
    #[case("update_no_match")]
    #[case("update_test_result")]
    #[case("quoted_fields")]
    #[case("append_rows")]
    #[case("append_records")]
    #[case("write_from_records")]
    fn test_fixtures(#[case] fixture: &str) {
        run_test_fixture(fixture);
    }

    fn scratch(content: &str) -> (TempDir, PathBuf) {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("data.csv");
        fs::write(&path, content).expect("Failed to write scratch file");
        (dir, path)
    }

    #[test]
    fn test_write_then_read_records_round_trip() {
        let (_dir, path) = scratch("");
        let csv = CsvAccessor::new();
        let fieldnames = row(&["id", "name", "status"]);
        let records = vec![
            record(&[("id", "1"), ("name", "login"), ("status", "pending")]),
            record(&[("id", "2"), ("name", "a, b"), ("status", "done")]),
            record(&[("id", "3"), ("name", "line\nbreak"), ("status", "")]),
        ];

        csv.write_from_records(&path, &records, Some(fieldnames.as_slice()), &CsvFormat::default())
            .unwrap();

        let inferred = csv
            .read_records(&path, &CsvFormat::default(), None, None)
            .unwrap();
        assert_eq!(inferred, records);

        // With the same fieldnames the header row comes back as data first
        let explicit = csv
            .read_records(&path, &CsvFormat::default(), Some(fieldnames.clone()), None)
            .unwrap();
        assert_eq!(explicit.len(), records.len() + 1);
        assert_eq!(explicit[0].keys().collect::<Vec<_>>(), vec!["id", "name", "status"]);
        assert_eq!(&explicit[1..], &records[..]);
    }

    #[test]
    fn test_empty_is_idempotent() {
        let (_dir, path) = scratch("a,b\nc,d\n");
        let csv = CsvAccessor::new();

        for _ in 0..2 {
            csv.empty(&path).unwrap();
            assert_eq!(fs::read_to_string(&path).unwrap(), "");
            assert!(csv.read_rows(&path, &CsvFormat::default(), None).unwrap().is_empty());
        }
    }

    #[rstest]
    #[case::first_and_third("0,2", vec![row(&["a", "0"]), row(&["c", "2"])])]
    #[case::reversed_request("2 0", vec![row(&["a", "0"]), row(&["c", "2"])])]
    #[case::single("4", vec![row(&["e", "4"])])]
    fn test_selective_read(#[case] selection: &str, #[case] expected: Vec<Row>) {
        let (_dir, path) = scratch("a,0\nb,1\nc,2\nd,3\ne,4\n");
        let selection: LineSelection = selection.parse().unwrap();

        let rows = CsvAccessor::new()
            .read_rows(&path, &CsvFormat::default(), Some(selection))
            .unwrap();

        assert_eq!(rows, expected);
    }

    #[test]
    fn test_selective_read_records() {
        let (_dir, path) = scratch("id,status\n1,a\n2,b\n3,c\n");
        let selection: LineSelection = [1].into_iter().collect();

        let records = CsvAccessor::new()
            .read_records(&path, &CsvFormat::default(), None, Some(selection))
            .unwrap();

        assert_eq!(records, vec![record(&[("id", "2"), ("status", "b")])]);
    }

    #[rstest]
    #[case::into_empty(0, 3)]
    #[case::after_existing(4, 2)]
    fn test_append_never_disturbs_prior_content(#[case] existing: usize, #[case] added: usize) {
        let initial: Vec<Row> = (0..existing).map(|i| row(&["old", i.to_string().as_str()])).collect();
        let extra: Vec<Row> = (0..added).map(|i| row(&["new", i.to_string().as_str()])).collect();
        let (_dir, path) = scratch("");
        let csv = CsvAccessor::new();
        let format = CsvFormat::default();

        csv.append(&path, AppendData::Rows(initial.clone()), &format).unwrap();
        csv.append(&path, AppendData::Rows(extra.clone()), &format).unwrap();

        let rows = csv.read_rows(&path, &format, None).unwrap();
        assert_eq!(rows.len(), existing + added);
        assert_eq!(&rows[..existing], &initial[..]);
        assert_eq!(&rows[existing..], &extra[..]);
    }

    #[test]
    fn test_appended_records_read_back_as_rows() {
        let (_dir, path) = scratch("id,status\n1,pending\n");
        let csv = CsvAccessor::new();
        let format = CsvFormat::default();

        csv.append(
            &path,
            AppendData::Records(vec![record(&[("id", "2"), ("status", "done")])]),
            &format,
        )
        .unwrap();

        let rows = csv.read_rows(&path, &format, None).unwrap();
        assert_eq!(
            rows,
            vec![
                row(&["id", "status"]),
                row(&["1", "pending"]),
                row(&["id", "2", "status", "done"]),
            ]
        );
    }

    #[test]
    fn test_append_creates_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested.csv");

        CsvAccessor::new()
            .append(&path, AppendData::Rows(vec![row(&["x"])]), &CsvFormat::default())
            .unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "x\n");
    }

    #[rstest]
    #[case::found("2", record(&[("id", "2"), ("status", "done")]))]
    #[case::not_found("9", Record::new())]
    fn test_find_record(#[case] id: &str, #[case] expected: Record) {
        let (_dir, path) = scratch("id,status\n1,pending\n2,done\n");

        let found = CsvAccessor::new().find_record(&path, id, "id").unwrap();

        assert_eq!(found, expected);
    }

    #[rstest]
    #[case::comma(",")]
    #[case::semicolon(";")]
    #[case::tab("\t")]
    fn test_quote_all_preserves_delimiter_in_field(#[case] delimiter: &str) {
        let (_dir, path) = scratch("");
        let format = CsvFormat::new(delimiter, Quoting::All);
        let value = format!("left{}right", delimiter);
        let original = vec![row(&[value.as_str(), "plain"])];
        let csv = CsvAccessor::new();

        csv.append(&path, AppendData::Rows(original.clone()), &format).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.starts_with('"'));
        assert_eq!(csv.read_rows(&path, &format, None).unwrap(), original);
    }

    #[test]
    fn test_non_numeric_quoting_reads_back_as_strings() {
        let (_dir, path) = scratch("");
        let format = CsvFormat::default().with_quoting(Quoting::NonNumeric);
        let original = vec![row(&["name", "1.5"]), row(&["other", "42"])];
        let csv = CsvAccessor::new();

        csv.append(&path, AppendData::Rows(original.clone()), &format).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "\"name\",1.5\n\"other\",42\n"
        );
        assert_eq!(csv.read_rows(&path, &format, None).unwrap(), original);
    }

    #[test]
    fn test_update_then_find() {
        let (_dir, path) = scratch("id,status\n1,pending\n2,pending\n");
        let csv = CsvAccessor::new();

        csv.update_one_record(&path, "2", "done", "id", "status").unwrap();

        assert_eq!(csv.find_record(&path, "2", "id").unwrap().get("status"), Some("done"));
        assert_eq!(csv.find_record(&path, "1", "id").unwrap().get("status"), Some("pending"));
    }
}
