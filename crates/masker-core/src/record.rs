/// One unit of input flowing through the processor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    /// CSV row, fields in header order
    Row(Vec<String>),
    /// Text line, including its terminator if it had one
    Line(String),
}

/// Result of processing a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Processed {
    pub record: Record,
    /// Number of values replaced
    pub masked: usize,
}
