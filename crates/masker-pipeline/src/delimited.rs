//! CSV mode: header-aware, row-at-a-time masking

use std::io::{Read, Write};

use masker_core::{
    Classifier, Error, FieldSpec, MaskPlan, Record, RecordProcessor, Result, ValueGenerator,
};

use crate::detect::FileType;
use crate::interrupt::Interrupt;
use crate::summary::Summary;

pub(crate) const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub struct CsvMasker<R: Read> {
    reader: csv::Reader<R>,
    header: csv::StringRecord,
    plan: MaskPlan,
    delimiter: u8,
    bom: bool,
}

impl<R: Read> CsvMasker<R> {
    /// Read the header and resolve `fields` against it.
    ///
    /// Nothing is written yet, so a configuration error here leaves no output.
    pub fn open(input: R, delimiter: u8, fields: &[FieldSpec]) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            // Row width is checked per record so short rows can be skipped
            .flexible(true)
            .from_reader(input);

        let header = reader.headers().map_err(from_csv)?.clone();
        let columns: Vec<String> = header.iter().map(String::from).collect();
        let plan = Classifier::for_header(fields, &columns)?;

        tracing::debug!(
            columns = columns.len(),
            masked = plan.target_count(),
            "Resolved CSV header"
        );

        Ok(Self {
            reader,
            header,
            plan,
            delimiter,
            bom: false,
        })
    }

    /// Write a UTF-8 byte order mark before the header, for inputs that had one.
    /// The csv reader drops it, so it has to be put back by hand.
    pub fn with_bom(mut self, bom: bool) -> Self {
        self.bom = bom;
        self
    }

    /// Copy the header, then mask and write one row at a time
    pub fn stream<W: Write>(
        mut self,
        mut output: W,
        generator: &mut ValueGenerator<'_>,
        interrupt: &Interrupt,
    ) -> Result<Summary> {
        let header: Vec<&str> = self
            .header
            .iter()
            .enumerate()
            .map(|(i, h)| if i == 0 { h.trim_start_matches('\u{feff}') } else { h })
            .collect();
        if self.bom {
            output.write_all(UTF8_BOM)?;
        }

        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(output);
        writer.write_record(&header).map_err(from_csv)?;

        let processor = RecordProcessor::new(&self.plan);
        let mut summary = Summary::new(FileType::Csv);
        let mut row = csv::StringRecord::new();

        loop {
            if interrupt.is_triggered() {
                summary.interrupted = true;
                break;
            }

            match self.reader.read_record(&mut row) {
                Ok(false) => break,
                Ok(true) => {}
                Err(e) => match from_csv(e) {
                    Error::MalformedRecord { line, reason } => {
                        summary.record_skipped(line, &reason);
                        continue;
                    }
                    fatal => return Err(fatal),
                },
            }

            let line = row.position().map(|p| p.line()).unwrap_or(0);
            let record = Record::Row(row.iter().map(String::from).collect());

            match processor.process(line, record, generator) {
                Ok(processed) => {
                    if let Record::Row(fields) = &processed.record {
                        writer.write_record(fields).map_err(from_csv)?;
                    }
                    summary.record_written(processed.masked);
                }
                Err(Error::MalformedRecord { line, reason }) => {
                    summary.record_skipped(line, &reason);
                }
                Err(e) => return Err(e),
            }
        }

        writer.flush()?;
        Ok(summary)
    }
}

/// I/O failures stay fatal; anything else is a problem with one record
fn from_csv(err: csv::Error) -> Error {
    let line = err.position().map(|p| p.line()).unwrap_or(0);
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(e) => Error::Io(e),
        _ => Error::malformed(line, message),
    }
}
