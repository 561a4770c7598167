//! Primary table reading with delimiter-aware header validation.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use polars::prelude::*;

use crate::error::{DataLoadError, Result};

/// Rows sampled for schema inference.
const INFER_SCHEMA_ROWS: usize = 100;

fn open_error(path: &Path, err: std::io::Error) -> DataLoadError {
    if err.kind() == std::io::ErrorKind::NotFound {
        DataLoadError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        DataLoadError::FileRead {
            path: path.to_path_buf(),
            source: err,
        }
    }
}

/// Detect encoding and validate it's supported (UTF-8 only).
///
/// Checks for UTF-16 BOM markers which are not supported.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| open_error(path, e))?;

    let mut buffer = [0u8; 4];
    let bytes_read = file.read(&mut buffer).map_err(|e| DataLoadError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if bytes_read >= 2 {
        // UTF-16 LE BOM
        if buffer[0..2] == [0xFF, 0xFE] {
            return Err(DataLoadError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 LE",
            });
        }
        // UTF-16 BE BOM
        if buffer[0..2] == [0xFE, 0xFF] {
            return Err(DataLoadError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 BE",
            });
        }
    }

    // UTF-8 BOM is acceptable (stripped when the header is read)
    Ok(())
}

/// Reads the first line of a file with any UTF-8 BOM removed.
fn read_first_line(path: &Path) -> Result<Option<String>> {
    let file = File::open(path).map_err(|e| open_error(path, e))?;
    let reader = BufReader::new(file);

    match reader.lines().next() {
        Some(line) => {
            let line = line.map_err(|e| DataLoadError::FileRead {
                path: path.to_path_buf(),
                source: e,
            })?;
            let cleaned = line.strip_prefix('\u{feff}').unwrap_or(&line).to_string();
            Ok(Some(cleaned))
        }
        None => Ok(None),
    }
}

/// Splits one header line into trimmed field names, honoring quoted
/// fields and escaped quotes.
pub fn parse_header_line(line: &str, delimiter: u8) -> Vec<String> {
    let delimiter = char::from(delimiter);
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if !in_quotes => {
                in_quotes = true;
            }
            '"' if in_quotes => {
                // Escaped quote ("")
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            c if c == delimiter && !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => {
                current.push(c);
            }
        }
    }

    fields.push(current.trim().to_string());
    fields
}

/// Reads and validates a table header: non-empty, no empty names, no
/// duplicate names.
pub fn read_header(path: &Path, delimiter: u8) -> Result<Vec<String>> {
    let line = read_first_line(path)?.ok_or_else(|| DataLoadError::NoHeader {
        path: path.to_path_buf(),
    })?;

    let columns = parse_header_line(&line, delimiter);
    if columns.iter().all(String::is_empty) {
        return Err(DataLoadError::NoHeader {
            path: path.to_path_buf(),
        });
    }

    let mut seen = std::collections::BTreeSet::new();
    for column in &columns {
        if column.is_empty() {
            return Err(DataLoadError::EmptyColumnName {
                path: path.to_path_buf(),
            });
        }
        if !seen.insert(column.as_str()) {
            return Err(DataLoadError::DuplicateColumn {
                column: column.clone(),
                path: path.to_path_buf(),
            });
        }
    }

    Ok(columns)
}

/// Checks that every required column appears in the header, failing
/// with the list of columns actually present.
pub fn ensure_columns(header: &[String], required: &[&str], path: &Path) -> Result<()> {
    for column in required {
        if !header.iter().any(|name| name == column) {
            return Err(DataLoadError::MissingColumn {
                column: (*column).to_string(),
                path: path.to_path_buf(),
                available: header.join(", "),
            });
        }
    }
    Ok(())
}

/// Reads a delimited file into a DataFrame. The header must already
/// have been validated with [`read_header`].
pub fn read_table(path: &Path, delimiter: u8) -> Result<DataFrame> {
    let parse_options = CsvParseOptions::default().with_separator(delimiter);
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .with_parse_options(parse_options)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| DataLoadError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| DataLoadError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_parse_header_line_semicolon() {
        let result = parse_header_line("name;address;tag", b';');
        assert_eq!(result, vec!["name", "address", "tag"]);
    }

    #[test]
    fn test_parse_header_line_quoted_delimiter() {
        let result = parse_header_line("\"name; full\";address", b';');
        assert_eq!(result, vec!["name; full", "address"]);
    }

    #[test]
    fn test_parse_header_line_escaped_quotes() {
        let result = parse_header_line("\"he said \"\"hi\"\"\";b", b';');
        assert_eq!(result, vec!["he said \"hi\"", "b"]);
    }

    #[test]
    fn test_parse_header_line_trims_fields() {
        let result = parse_header_line("  a  ;  b  ", b';');
        assert_eq!(result, vec!["a", "b"]);
    }

    #[test]
    fn test_read_header_strips_bom() {
        let file = create_temp_csv("\u{feff}name;address;tag\nA;B;C\n");
        let header = read_header(file.path(), b';').unwrap();
        assert_eq!(header, vec!["name", "address", "tag"]);
    }

    #[test]
    fn test_read_header_empty_file() {
        let file = create_temp_csv("");
        let result = read_header(file.path(), b';');
        assert!(matches!(result, Err(DataLoadError::NoHeader { .. })));
    }

    #[test]
    fn test_read_header_rejects_duplicates() {
        let file = create_temp_csv("name;address;name\n");
        let result = read_header(file.path(), b';');
        assert!(matches!(
            result,
            Err(DataLoadError::DuplicateColumn { column, .. }) if column == "name"
        ));
    }

    #[test]
    fn test_read_header_rejects_empty_names() {
        let file = create_temp_csv("name;;tag\n");
        let result = read_header(file.path(), b';');
        assert!(matches!(result, Err(DataLoadError::EmptyColumnName { .. })));
    }

    #[test]
    fn test_read_header_missing_file() {
        let result = read_header(std::path::Path::new("/nonexistent/rows.csv"), b';');
        assert!(matches!(result, Err(DataLoadError::FileNotFound { .. })));
    }

    #[test]
    fn test_ensure_columns_reports_available() {
        let header = vec!["name".to_string(), "address".to_string()];
        let err = ensure_columns(&header, &["tag"], std::path::Path::new("rows.csv")).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("'tag'"));
        assert!(message.contains("name, address"));
    }

    #[test]
    fn test_validate_encoding_rejects_utf16() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0xFF, 0xFE, 0x41, 0x00]).unwrap();
        let result = validate_encoding(file.path());
        assert!(matches!(
            result,
            Err(DataLoadError::UnsupportedEncoding { encoding, .. }) if encoding == "UTF-16 LE"
        ));
    }

    #[test]
    fn test_validate_encoding_accepts_utf8_bom() {
        let file = create_temp_csv("\u{feff}name;address\n");
        assert!(validate_encoding(file.path()).is_ok());
    }

    #[test]
    fn test_read_table_semicolon() {
        let file = create_temp_csv("name;address;tag\nOrgA;Addr1;red\nOrgB;Addr2;blue\n");
        let df = read_table(file.path(), b';').unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 3);
    }
}
