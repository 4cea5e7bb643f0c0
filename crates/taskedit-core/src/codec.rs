//! Delimited-text reading and writing for [`Table`].
//!
//! Comma delimiter, double-quote quoting with doubled embedded quotes,
//! mandatory header row. Everything is read back as text.

use std::io::{Read, Write};

use crate::error::{Result, TableError};
use crate::table::Table;

const DELIMITER: u8 = b',';
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

impl Table {
    /// Parse a whole CSV document with a header row
    pub fn from_csv_str(content: &str) -> Result<Self> {
        Self::from_reader(content.as_bytes())
    }

    /// Parse CSV from any reader. The reader is consumed to the end.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        let content = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes[..]);

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(DELIMITER)
            .has_headers(true)
            .flexible(false)
            .from_reader(content);

        let header: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        if header.is_empty() {
            return Err(TableError::format("missing header row"));
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Table::from_records(header, rows)
    }

    /// Write the table as CSV, header first, `\n` after every record.
    ///
    /// Line endings are normalized: a file read with `\r\n` is written back
    /// with `\n`. Fields are quoted only when they need it.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(DELIMITER)
            .terminator(csv::Terminator::Any(b'\n'))
            .quote_style(csv::QuoteStyle::Necessary)
            .from_writer(writer);

        writer.write_record(self.columns())?;
        for row in self.rows() {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn to_csv_string(&self) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|e| TableError::format(format!("invalid UTF-8 in output: {}", e)))
    }
}
