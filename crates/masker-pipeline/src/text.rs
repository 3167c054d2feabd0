//! Text mode: pattern-driven, line-at-a-time masking

use std::io::{BufRead, Write};

use masker_core::{
    Classifier, Error, FieldSpec, MaskPlan, Record, RecordProcessor, Result, ValueGenerator,
};

use crate::detect::FileType;
use crate::interrupt::Interrupt;
use crate::summary::Summary;

pub struct TextMasker {
    plan: MaskPlan,
}

impl TextMasker {
    /// Compile `fields` as patterns
    pub fn new(fields: &[FieldSpec]) -> Result<Self> {
        let plan = Classifier::for_text(fields)?;
        tracing::debug!(groups = plan.target_count(), "Compiled text patterns");
        Ok(Self { plan })
    }

    /// Mask and write one line at a time. Line terminators are kept as-is.
    pub fn stream<R: BufRead, W: Write>(
        &self,
        mut input: R,
        mut output: W,
        generator: &mut ValueGenerator<'_>,
        interrupt: &Interrupt,
    ) -> Result<Summary> {
        let processor = RecordProcessor::new(&self.plan);
        let mut summary = Summary::new(FileType::Text);
        let mut buf = Vec::new();
        let mut line = 0u64;

        loop {
            if interrupt.is_triggered() {
                summary.interrupted = true;
                break;
            }

            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            line += 1;

            let text = match std::str::from_utf8(&buf) {
                Ok(text) => text.to_string(),
                Err(e) => {
                    summary.record_skipped(line, &format!("invalid UTF-8: {}", e));
                    continue;
                }
            };

            match processor.process(line, Record::Line(text), generator) {
                Ok(processed) => {
                    if let Record::Line(masked) = &processed.record {
                        output.write_all(masked.as_bytes())?;
                    }
                    summary.record_written(processed.masked);
                }
                Err(Error::MalformedRecord { line, reason }) => {
                    summary.record_skipped(line, &reason);
                }
                Err(e) => return Err(e),
            }
        }

        output.flush()?;
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use masker_core::{GeneratorContext, Locale};

    fn run(input: &[u8], patterns: &[&str], seed: u64) -> (String, Summary) {
        let fields: Vec<_> = patterns.iter().map(|p| FieldSpec::parse(p)).collect();
        let masker = TextMasker::new(&fields).unwrap();
        let context = GeneratorContext::new(Locale::EnUs).with_seed(Some(seed));
        let mut generator = ValueGenerator::new(&context);

        let mut out = Vec::new();
        let summary = masker
            .stream(input, &mut out, &mut generator, &Interrupt::new())
            .unwrap();
        (String::from_utf8(out).unwrap(), summary)
    }

    #[test]
    fn test_masks_groups_and_keeps_layout() {
        let input = b"Name: Alice Smith\nnothing to see\nName: Bob Jones";
        let (out, summary) = run(input, &[r"name=Name: (\w+ \w+)"], 42);
        let lines: Vec<&str> = out.split('\n').collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Name: "));
        assert!(!lines[0].contains("Alice Smith"));
        assert_eq!(lines[1], "nothing to see");
        assert!(!lines[2].contains("Bob Jones"));
        assert!(!out.ends_with('\n'));
        assert_eq!(summary.records, 3);
        assert_eq!(summary.masked_values, 2);
    }

    #[test]
    fn test_same_seed_same_output() {
        let input = b"call 555-0100 or mail a@x.com\n";
        let patterns = [r"phone=(\d{3}-\d{4})", r"email=(\S+@\S+)"];
        assert_eq!(run(input, &patterns, 9).0, run(input, &patterns, 9).0);
    }

    #[test]
    fn test_invalid_utf8_line_skipped() {
        let input = b"id: 1\n\xff\xfe id: 2\nid: 3\n";
        let (out, summary) = run(input, &[r"id: (\d+)"], 1);

        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.records, 2);
        assert_eq!(out.lines().count(), 2);
    }

    #[test]
    fn test_pattern_without_group_rejected() {
        let fields = vec![FieldSpec::parse(r"\d+")];
        assert!(matches!(TextMasker::new(&fields), Err(Error::Config(_))));
    }
}
