//! File pipeline for masker
//!
//! Detects the input type, resolves the configured fields, then streams the
//! input through the record processor one record at a time.

pub mod delimited;
pub mod detect;
pub mod interrupt;
pub mod summary;
pub mod text;

pub use delimited::CsvMasker;
pub use detect::{FileType, default_delimiter, detect};
pub use interrupt::Interrupt;
pub use summary::Summary;
pub use text::TextMasker;

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use masker_core::{Error, FieldSpec, GeneratorContext, Result, ValueGenerator};

/// Where masked output goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Stdout,
    File(PathBuf),
}

impl Output {
    fn open(&self) -> Result<Box<dyn Write>> {
        Ok(match self {
            Output::Stdout => Box::new(BufWriter::new(std::io::stdout().lock())),
            Output::File(path) => Box::new(BufWriter::new(File::create(path)?)),
        })
    }

    fn describe(&self) -> String {
        match self {
            Output::Stdout => "stdout".to_string(),
            Output::File(path) => path.display().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Init,
    DetectType,
    CsvMode,
    TextMode,
    Streaming,
    Done,
}

/// One masking run over one input
pub struct Pipeline<'a> {
    fields: &'a [FieldSpec],
    context: &'a GeneratorContext,
    file_type: Option<FileType>,
    delimiter: Option<u8>,
    interrupt: Interrupt,
    state: PipelineState,
}

impl<'a> Pipeline<'a> {
    pub fn new(fields: &'a [FieldSpec], context: &'a GeneratorContext) -> Self {
        Self {
            fields,
            context,
            file_type: None,
            delimiter: None,
            interrupt: Interrupt::new(),
            state: PipelineState::Init,
        }
    }

    /// Skip detection and treat the input as `file_type`
    pub fn with_file_type(mut self, file_type: Option<FileType>) -> Self {
        self.file_type = file_type;
        self
    }

    pub fn with_delimiter(mut self, delimiter: Option<u8>) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_interrupt(mut self, interrupt: Interrupt) -> Self {
        self.interrupt = interrupt;
        self
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Mask `input` into `output`.
    ///
    /// The output is only created once the file type and fields are known to
    /// be valid, so startup failures never leave an output file behind.
    pub fn run(&mut self, input: &Path, output: &Output) -> Result<Summary> {
        if let Output::File(path) = output
            && same_file(input, path)
        {
            return Err(Error::config(format!(
                "Output {} would overwrite the input",
                path.display()
            )));
        }

        let file = File::open(input).map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("Input file {}: {}", input.display(), e),
            ))
        })?;
        let mut reader = BufReader::with_capacity(detect::SNIFF_LEN, file);

        self.transition(PipelineState::DetectType);
        let file_type = match self.file_type {
            Some(file_type) => file_type,
            None => detect(input, reader.fill_buf()?)?,
        };
        tracing::info!(input = %input.display(), %file_type, "Detected file type");

        let mut generator = ValueGenerator::new(self.context);
        let result = match file_type {
            FileType::Csv => {
                self.transition(PipelineState::CsvMode);
                let delimiter = self.delimiter.unwrap_or_else(|| default_delimiter(input));
                let bom = reader.fill_buf()?.starts_with(delimited::UTF8_BOM);
                let masker = CsvMasker::open(reader, delimiter, self.fields)?.with_bom(bom);
                let sink = output.open()?;
                self.transition(PipelineState::Streaming);
                masker.stream(sink, &mut generator, &self.interrupt)
            }
            FileType::Text => {
                self.transition(PipelineState::TextMode);
                let masker = TextMasker::new(self.fields)?;
                let sink = output.open()?;
                self.transition(PipelineState::Streaming);
                masker.stream(reader, sink, &mut generator, &self.interrupt)
            }
        };

        let summary = result.inspect_err(|e| {
            tracing::warn!(output = %output.describe(), error = %e, "Output may be incomplete");
        })?;

        self.transition(PipelineState::Done);
        tracing::info!(
            records = summary.records,
            masked = summary.masked_values,
            skipped = summary.skipped,
            interrupted = summary.interrupted,
            "Masking complete"
        );

        Ok(summary)
    }

    fn transition(&mut self, next: PipelineState) {
        tracing::debug!(from = ?self.state, to = ?next, "Pipeline state");
        self.state = next;
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
