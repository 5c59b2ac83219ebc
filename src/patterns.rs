use crate::models::Pattern;

/// Loads the curated pattern catalog. Columns: name, category, description,
/// when_to_use. Short rows are skipped.
pub fn load_patterns(path: &str) -> Result<Vec<Pattern>, String> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| format!("Failed to open {}: {}", path, e))?;
    let mut patterns = Vec::new();

    for result in reader.records() {
        let record = result.map_err(|e| format!("Failed to read CSV record: {}", e))?;
        if record.len() >= 4 {
            patterns.push(Pattern {
                name: record[0].to_string(),
                category: record[1].to_string(),
                description: record[2].to_string(),
                when_to_use: record[3].to_string(),
            });
        }
    }

    Ok(patterns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn loads_rows_and_skips_short_ones() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name,category,description,when_to_use").unwrap();
        writeln!(
            file,
            "Simple Payment,payments,\"Basic token transfer, peer to peer\",Use for plain transfers"
        )
        .unwrap();
        writeln!(file, "Broken Row,tokens").unwrap();
        writeln!(
            file,
            "Access Control,access,Owner-only function protection,Use for admin operations"
        )
        .unwrap();

        let patterns = load_patterns(file.path().to_str().unwrap()).unwrap();
        assert_eq!(patterns.len(), 2);
        assert_eq!(patterns[0].name, "Simple Payment");
        assert_eq!(patterns[0].description, "Basic token transfer, peer to peer");
        assert_eq!(patterns[1].category, "access");
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_patterns("/no/such/catalog.csv").is_err());
    }
}
