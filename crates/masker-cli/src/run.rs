use anyhow::Result;
use masker_config::Config;
use masker_core::{Error, FieldSpec, split_field_list};
use masker_pipeline::{FileType, Interrupt, Output, Pipeline, Summary};

use crate::cli::{Cli, FileTypeArg};

pub fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    let context = config.generator_context(cli.locale.as_deref(), cli.seed, cli.consistent)?;
    let fields = parse_fields(&cli.fields, &config)?;

    tracing::debug!(
        locale = %context.locale,
        seed = ?context.seed,
        fields = fields.len(),
        "Starting masking run"
    );

    let interrupt = Interrupt::new();
    let handler = interrupt.clone();
    if let Err(e) = ctrlc::set_handler(move || handler.trigger()) {
        tracing::warn!("Failed to install interrupt handler: {}", e);
    }

    let output = match cli.output() {
        Some(path) => Output::File(path.clone()),
        None => Output::Stdout,
    };

    let file_type = cli.file_type.map(|t| match t {
        FileTypeArg::Csv => FileType::Csv,
        FileTypeArg::Text => FileType::Text,
    });

    let summary = Pipeline::new(&fields, &context)
        .with_file_type(file_type)
        .with_delimiter(cli.delimiter)
        .with_interrupt(interrupt)
        .run(&cli.input, &output)?;

    report(&summary, &output, cli.summary_json)?;

    if summary.interrupted {
        return Err(Error::Interrupted.into());
    }

    Ok(())
}

/// Expand `--fields` values into field specs, applying config categories
/// to fields whose category was not given explicitly
fn parse_fields(values: &[String], config: &Config) -> masker_core::Result<Vec<FieldSpec>> {
    let fields: Vec<FieldSpec> = values
        .iter()
        .flat_map(|value| split_field_list(value))
        .map(|token| {
            let spec = FieldSpec::parse(&token);
            let configured = if spec.explicit {
                None
            } else {
                spec.name().and_then(|name| config.category_for(name))
            };
            match configured {
                Some(category) => spec.with_category(category),
                None => spec,
            }
        })
        .collect();

    if fields.is_empty() {
        return Err(Error::config("--fields must name at least one field"));
    }

    Ok(fields)
}

fn report(summary: &Summary, output: &Output, json: bool) -> Result<()> {
    if json {
        eprintln!("{}", serde_json::to_string(summary)?);
        return Ok(());
    }

    let target = match output {
        Output::Stdout => "stdout".to_string(),
        Output::File(path) => path.display().to_string(),
    };
    eprintln!(
        "✓ Masked {} {} records into {}",
        summary.records, summary.file_type, target
    );
    eprintln!("  Values replaced: {}", summary.masked_values);
    if summary.skipped > 0 {
        eprintln!("  Skipped records: {}", summary.skipped);
    }
    if summary.interrupted {
        eprintln!("  Interrupted: output is incomplete");
    }

    Ok(())
}

/// Exit code for a failed run; anything that isn't a masking error is a
/// configuration problem (bad config file, unusable arguments)
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<Error>().map(Error::exit_code).unwrap_or(1)
}
