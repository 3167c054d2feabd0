use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "masker")]
#[command(
    about = "Replace personal data in CSV or text files with realistic fake values",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Input file (CSV or text)
    pub input: PathBuf,

    /// Output file (default: stdout)
    #[arg(conflicts_with = "output_flag")]
    pub output: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short = 'o', long = "output", value_name = "OUTPUT")]
    pub output_flag: Option<PathBuf>,

    /// Fields to mask, comma-separated (repeatable). CSV: column names or
    /// 1-based column numbers. Text: regexes whose capture groups are
    /// replaced. Prefix with `<category>=` to pick the kind of fake value
    /// (e.g. email=contact).
    #[arg(long, required = true, value_name = "FIELDS")]
    pub fields: Vec<String>,

    /// Input type (default: detect from extension or content)
    #[arg(long = "file_type", visible_alias = "file-type", value_enum)]
    pub file_type: Option<FileTypeArg>,

    /// Locale for fake data, e.g. en_US, de_DE (default: en_US)
    #[arg(long)]
    pub locale: Option<String>,

    /// Seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// Replace equal values with equal fakes
    #[arg(long)]
    pub consistent: bool,

    /// CSV delimiter (default: ',' or tab for .tsv)
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,

    /// Config file (default: the per-user config.toml, if present)
    #[arg(long, env = "MASKER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print the run summary as JSON on stderr
    #[arg(long)]
    pub summary_json: bool,
}

impl Cli {
    pub fn output(&self) -> Option<&PathBuf> {
        self.output.as_ref().or(self.output_flag.as_ref())
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileTypeArg {
    Csv,
    Text,
}

fn parse_delimiter(s: &str) -> Result<u8, String> {
    let s = match s {
        "\\t" | "tab" => "\t",
        other => other,
    };
    match s.as_bytes() {
        [byte] if byte.is_ascii() => Ok(*byte),
        _ => Err(format!("delimiter must be a single ASCII character, got '{}'", s)),
    }
}
