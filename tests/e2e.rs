use pretty_assertions::assert_eq;
use rstruth::compute_truth_table;
use rstruth::table_io::to_csv_string;
use std::fs;
use std::path::Path;

fn file_assert_csv<P: AsRef<Path>>(statement_file: P) {
    let statement_file = statement_file.as_ref();
    let expected_file = statement_file.with_extension("csv");

    let statement = fs::read_to_string(statement_file).expect("Could not read statement file");
    let expected = fs::read_to_string(&expected_file).expect("Could not read expected csv file");

    let table = compute_truth_table(statement.trim()).expect("Could not tabulate statement");
    let actual = to_csv_string(&table).expect("Could not export csv");

    assert_eq!(actual, expected, "{}", statement_file.display());
}

#[test]
fn test_files_csv() {
    let mut count = 0;

    for file in glob::glob("tests/data/*.txt").expect("valid glob pattern") {
        let f = file.expect("readable path");
        println!("testing {}", f.display());
        file_assert_csv(f);
        count += 1;
    }

    assert!(count > 0, "no test data found");
}

#[test]
fn test_repeated_runs_are_byte_identical() {
    let statement = "(a nand b) nor (c xor d) implies e";

    let first = to_csv_string(&compute_truth_table(statement).expect("valid statement"))
        .expect("Could not export csv");
    let second = to_csv_string(&compute_truth_table(statement).expect("valid statement"))
        .expect("Could not export csv");

    assert_eq!(first.as_bytes(), second.as_bytes());
    assert_eq!(first.lines().count(), 1 + (1 << 5));
}
