//! Batch file decoding
//!
//! The first line names the columns; `first_name`, `second_name`, `email`,
//! `phone` and `eircode` may appear in any order and other columns are
//! ignored. A column that is absent, or a short row, yields a missing field
//! that the validator reports.

use csv::{ReaderBuilder, StringRecord, Trim};
use intake_common::{ContactCandidate, SourceReadError};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Field separator of batch files
pub const DELIMITER: u8 = b';';

const UTF8_BOM: char = '\u{feff}';

/// Column positions of the contact fields within a header row
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct ColumnMap {
    first_name: Option<usize>,
    second_name: Option<usize>,
    email: Option<usize>,
    phone: Option<usize>,
    eircode: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Self {
        let mut map = Self::default();
        for (idx, header) in headers.iter().enumerate() {
            match header.trim_start_matches(UTF8_BOM).trim() {
                "first_name" => map.first_name = Some(idx),
                "second_name" => map.second_name = Some(idx),
                "email" => map.email = Some(idx),
                "phone" => map.phone = Some(idx),
                "eircode" => map.eircode = Some(idx),
                _ => {},
            }
        }
        map
    }

    fn candidate(&self, record: &StringRecord) -> ContactCandidate {
        let field = |idx: Option<usize>| {
            idx.and_then(|i| record.get(i))
                .map(|value| value.trim().to_string())
        };
        ContactCandidate {
            first_name: field(self.first_name),
            second_name: field(self.second_name),
            email: field(self.email),
            phone: field(self.phone),
            eircode: field(self.eircode),
        }
    }
}

/// Decode every data row of a batch file at `path`
///
/// # Errors
///
/// `SourceReadError::Open` when the file cannot be opened, `Decode` when it
/// is not valid UTF-8 or not parseable as delimited text.
pub fn read_contacts(path: &Path) -> Result<Vec<ContactCandidate>, SourceReadError> {
    let file = File::open(path).map_err(|source| SourceReadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let contacts = decode(file).map_err(|e| SourceReadError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    tracing::info!(path = %path.display(), rows = contacts.len(), "Batch file read");
    Ok(contacts)
}

/// Decode delimited contact rows from any reader
pub fn decode<R: Read>(reader: R) -> Result<Vec<ContactCandidate>, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let columns = ColumnMap::from_headers(reader.headers()?);

    let mut contacts = Vec::new();
    for record in reader.records() {
        contacts.push(columns.candidate(&record?));
    }
    Ok(contacts)
}
