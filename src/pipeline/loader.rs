//! Dataset loader for delimited text files
//!
//! The file is decoded up front with an explicit [`TextEncoding`] and the
//! decoded text is handed to the polars CSV reader. Type inference scans the
//! whole file, so a column is numeric only if every non-missing value parses
//! as a number.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use polars::prelude::*;
use thiserror::Error;

/// Field values read as missing, in addition to empty fields.
/// Matches the default `na_values` of pandas' `read_csv`.
pub const MISSING_MARKERS: &[&str] = &[
    "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "null", "NULL", "None", "#N/A",
    "#N/A N/A", "#NA", "<NA>", "-1.#IND", "-1.#QNAN", "1.#IND", "1.#QNAN",
];

/// Text encoding used to decode the raw input bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    /// ISO-8859-1. Every byte maps to one code point, so decoding never fails.
    /// Non-Latin-1 input is read as mojibake instead of being rejected.
    #[default]
    Latin1,
    /// Windows-1252, the usual superset of Latin-1 produced by spreadsheet exports.
    Windows1252,
    /// Strict UTF-8. Malformed byte sequences fail the load.
    Utf8,
}

impl TextEncoding {
    /// Decode raw bytes into a string
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            TextEncoding::Latin1 => Some(encoding_rs::mem::decode_latin1(bytes).into_owned()),
            TextEncoding::Windows1252 => {
                Some(encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned())
            }
            TextEncoding::Utf8 => encoding_rs::UTF_8
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(|s| s.into_owned()),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TextEncoding::Latin1 => "ISO-8859-1",
            TextEncoding::Windows1252 => "windows-1252",
            TextEncoding::Utf8 => "UTF-8",
        }
    }
}

/// Errors that can occur while loading the input dataset.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid {encoding} text", path.display())]
    Decode {
        path: PathBuf,
        encoding: &'static str,
    },

    #[error("cannot parse {} as CSV: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },
}

/// Load a CSV file into a DataFrame.
///
/// # Arguments
/// * `path` - Path to the delimited text file (header row required)
/// * `encoding` - Encoding used to decode the file before parsing
pub fn load_dataset(path: &Path, encoding: TextEncoding) -> Result<DataFrame, LoadError> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let text = encoding.decode(&bytes).ok_or_else(|| LoadError::Decode {
        path: path.to_path_buf(),
        encoding: encoding.name(),
    })?;

    parse_csv_text(text).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse already-decoded CSV text.
fn parse_csv_text(text: String) -> PolarsResult<DataFrame> {
    let null_values = NullValues::AllColumns(
        MISSING_MARKERS
            .iter()
            .map(|marker| PlSmallStr::from_static(*marker))
            .collect(),
    );

    CsvReadOptions::default()
        .with_has_header(true)
        // Full scan: a late non-numeric value must turn the column categorical
        .with_infer_schema_length(None)
        .with_parse_options(
            CsvParseOptions::default()
                .with_quote_char(Some(b'"'))
                .with_null_values(Some(null_values)),
        )
        .into_reader_with_file_handle(Cursor::new(text.into_bytes()))
        .finish()
}
