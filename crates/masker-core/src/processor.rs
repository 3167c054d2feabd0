//! Apply a mask plan to individual records

use crate::classifier::{ColumnTarget, MaskPlan, TextRule};
use crate::error::{Error, Result};
use crate::generator::ValueGenerator;
use crate::record::{Processed, Record};

/// Replaces the planned values of each record; everything else passes through
pub struct RecordProcessor<'p> {
    plan: &'p MaskPlan,
}

impl<'p> RecordProcessor<'p> {
    pub fn new(plan: &'p MaskPlan) -> Self {
        Self { plan }
    }

    /// Mask one record. `line` is only used for error reporting.
    pub fn process(
        &self,
        line: u64,
        record: Record,
        generator: &mut ValueGenerator<'_>,
    ) -> Result<Processed> {
        match (record, self.plan) {
            (Record::Row(fields), MaskPlan::Columns { width, targets }) => {
                if fields.len() != *width {
                    return Err(Error::malformed(
                        line,
                        format!("expected {} fields, found {}", width, fields.len()),
                    ));
                }
                Ok(mask_row(fields, targets, generator))
            }
            (Record::Line(text), MaskPlan::Patterns(rules)) => {
                Ok(mask_line(&text, rules, generator))
            }
            (Record::Row(_), MaskPlan::Patterns(_)) => Err(Error::malformed(
                line,
                "got a CSV row but the plan expects text lines",
            )),
            (Record::Line(_), MaskPlan::Columns { .. }) => Err(Error::malformed(
                line,
                "got a text line but the plan expects CSV rows",
            )),
        }
    }
}

fn mask_row(
    mut fields: Vec<String>,
    targets: &[ColumnTarget],
    generator: &mut ValueGenerator<'_>,
) -> Processed {
    for target in targets {
        let original = &fields[target.index];
        fields[target.index] = generator.substitute(target.category, original);
    }

    Processed {
        record: Record::Row(fields),
        masked: targets.len(),
    }
}

fn mask_line(line: &str, rules: &[TextRule], generator: &mut ValueGenerator<'_>) -> Processed {
    // Patterns never see the terminator, so `\s+` cannot eat the newline
    let (body, terminator) = split_terminator(line);

    let mut current = body.to_string();
    let mut masked = 0;

    for rule in rules {
        let mut out = String::with_capacity(current.len());
        let mut last = 0;

        for caps in rule.regex.captures_iter(&current) {
            for &(group, category) in &rule.groups {
                let Some(m) = caps.get(group) else {
                    continue;
                };
                // Nested or empty groups are covered by an earlier replacement
                if m.start() < last || m.is_empty() {
                    continue;
                }
                out.push_str(&current[last..m.start()]);
                out.push_str(&generator.substitute(category, m.as_str()));
                last = m.end();
                masked += 1;
            }
        }

        out.push_str(&current[last..]);
        current = out;
    }

    current.push_str(terminator);

    Processed {
        record: Record::Line(current),
        masked,
    }
}

fn split_terminator(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}
