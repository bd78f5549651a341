//! Reads a pre-existing initial-suite file: a CSV header row of category
//! names followed by one row per vector. Parsing errors here are fatal;
//! unknown categories/choices inside accepted rows are the compiler's
//! concern (`genpairs_compiler::compiler::suite`).

use std::path::Path;

pub fn read_suite_csv(path: &Path) -> Result<(Vec<String>, Vec<Vec<String>>), csv::Error> {
    let mut reader = csv::Reader::from_path(path)?;
    let header = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok((header, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_header_and_rows() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "A,B,C").unwrap();
        writeln!(file, "a1,b1,c1").unwrap();
        writeln!(file, "a2,b2,c2").unwrap();

        let (header, rows) = read_suite_csv(file.path()).unwrap();
        assert_eq!(header, vec!["A", "B", "C"]);
        assert_eq!(rows, vec![
            vec!["a1".to_string(), "b1".to_string(), "c1".to_string()],
            vec!["a2".to_string(), "b2".to_string(), "c2".to_string()],
        ]);
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = read_suite_csv(std::path::Path::new("/nonexistent/path.csv"));
        assert!(result.is_err());
    }
}
