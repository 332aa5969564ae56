//! Integration tests for the CSV reader and header mapping
//!
//! These tests drive the public API end to end, from raw text through
//! tokenizing and header mapping, including reads from real files.

use kepler_processor::{
    FieldValue, HeaderField, HeaderSpec, KeplerError, ParseErrorKind, ReaderOptions,
    RecordReader, converters, parse, parse_str, read_matrix,
};
use std::io::Write;
use tempfile::NamedTempFile;
use tokio::io::BufReader;

/// Quote a field the way the reader expects to read it back
fn write_field(field: &str, comma: char) -> String {
    let needs_quotes = field.contains(comma)
        || field.contains('"')
        || field.contains('\n')
        || field.starts_with(char::is_whitespace);

    if needs_quotes {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn write_table(rows: &[Vec<&str>], comma: char) -> String {
    let mut out = String::new();
    for row in rows {
        let line: Vec<String> = row.iter().map(|f| write_field(f, comma)).collect();
        out.push_str(&line.join(&comma.to_string()));
        out.push('\n');
    }
    out
}

/// Rows read back after serialization match the originals exactly
#[tokio::test]
async fn test_serialized_rows_read_back_unchanged() {
    let rows = vec![
        vec!["kepid", "kepler_name", "note"],
        vec!["1", "Kepler-1 b", "plain"],
        vec!["2", "Kepler-2, b", "has \"quotes\""],
        vec!["3", "", "two\nlines"],
        vec!["4", "  padded", "ends with comma,"],
        vec!["5", "\"", "日本語,テキスト"],
    ];

    for comma in [',', ';', '\t', '|'] {
        let text = write_table(&rows, comma);
        let options = ReaderOptions::default()
            .with_comma(comma)
            .with_fields_per_record(0);

        let parsed = read_matrix(text.as_bytes(), &options).await.unwrap();
        assert_eq!(parsed, rows, "delimiter {:?}", comma);
    }
}

#[tokio::test]
async fn test_header_row_mapping_example() {
    let options = ReaderOptions::default().with_header(HeaderSpec::FirstRow);
    let rows = parse_str("name,age\nAda,30\nLin,25", &options).await.unwrap();

    assert_eq!(rows.len(), 2);
    let ada = rows[0].as_record().unwrap();
    let lin = rows[1].as_record().unwrap();
    assert_eq!(ada.get_str("name"), Some("Ada"));
    assert_eq!(ada.get_str("age"), Some("30"));
    assert_eq!(lin.get_str("name"), Some("Lin"));
    assert_eq!(lin.get_str("age"), Some("25"));
}

#[tokio::test]
async fn test_header_descriptors_with_integer_converter() {
    let options = ReaderOptions::default().with_header(HeaderSpec::Fields(vec![
        HeaderField::new("name"),
        HeaderField::converted("age", converters::integer()),
    ]));
    let rows = parse_str("Ada,30\nLin,25", &options).await.unwrap();

    let ada = rows[0].as_record().unwrap();
    assert_eq!(ada.get("age"), Some(&FieldValue::Integer(30)));
    assert_eq!(ada.get("name"), Some(&FieldValue::from("Ada")));
}

#[tokio::test]
async fn test_bare_quote_strict_and_lazy() {
    let input = "id,name\n7,Kepler \"X\" b\n";

    let err = read_matrix(input.as_bytes(), &ReaderOptions::default())
        .await
        .unwrap_err();
    let parse_error = err.as_parse_error().unwrap();
    assert_eq!(parse_error.kind, ParseErrorKind::BareQuote);
    assert_eq!(parse_error.line, 2);
    assert_eq!(parse_error.column, Some(10));

    let lazy = ReaderOptions::default().with_lazy_quotes();
    let rows = read_matrix(input.as_bytes(), &lazy).await.unwrap();
    assert_eq!(rows[1], vec!["7", "Kepler \"X\" b"]);
}

#[tokio::test]
async fn test_record_reader_over_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(
        temp_file,
        "# header comment\r\nkepid,note\r\n1,\"spans\r\ntwo lines\"\r\n\r\n2,done\r\n"
    )
    .unwrap();

    let file = tokio::fs::File::open(temp_file.path()).await.unwrap();
    let options = ReaderOptions::default().with_comment('#');
    let mut reader = RecordReader::new(BufReader::new(file), options).unwrap();

    let mut records = Vec::new();
    while let Some(record) = reader.read_record().await.unwrap() {
        if !record.is_empty() {
            records.push((reader.record_line(), record));
        }
    }

    assert_eq!(
        records,
        vec![
            (2, vec!["kepid".to_string(), "note".to_string()]),
            (3, vec!["1".to_string(), "spans\ntwo lines".to_string()]),
            (6, vec!["2".to_string(), "done".to_string()]),
        ]
    );
    assert_eq!(reader.line(), 6);
}

#[tokio::test]
async fn test_parse_from_file_with_header() {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(temp_file, "# COLUMN kepid: KepID").unwrap();
    writeln!(temp_file, "kepid,kepler_name").unwrap();
    writeln!(temp_file, "10593626,Kepler-22 b").unwrap();

    let file = tokio::fs::File::open(temp_file.path()).await.unwrap();
    let options = ReaderOptions::for_dataset();
    let rows = parse(BufReader::new(file), &options).await.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(
        rows[0].as_record().unwrap().get_str("kepler_name"),
        Some("Kepler-22 b")
    );
}

#[tokio::test]
async fn test_errors_discard_partial_output() {
    let options = ReaderOptions::default().with_header(HeaderSpec::FirstRow);
    let result = parse_str("a,b\n1,2\n3,4\n5\n", &options).await;

    assert!(matches!(
        result,
        Err(KeplerError::HeaderFieldCount { row: 4, .. })
    ));
}

#[tokio::test]
async fn test_invalid_utf8_is_an_io_error() {
    let bytes: &[u8] = b"a,b\n\xff\xfe,c\n";
    let result = read_matrix(bytes, &ReaderOptions::default()).await;
    assert!(matches!(result, Err(KeplerError::Io(_))));
}
