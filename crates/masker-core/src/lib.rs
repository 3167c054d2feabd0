//! Core masking logic for masker
//!
//! This crate contains:
//! - Field selection and category inference
//! - Seeded fake value generation
//! - Per-record substitution

pub mod category;
pub mod classifier;
pub mod error;
pub mod field;
pub mod generator;
pub mod locale;
pub mod processor;
pub mod record;

pub use category::FieldCategory;
pub use classifier::{Classifier, ColumnTarget, MaskPlan, TextRule};
pub use error::{Error, Result};
pub use field::{FieldSelector, FieldSpec, split_field_list};
pub use generator::{GeneratorContext, ValueGenerator};
pub use locale::Locale;
pub use processor::RecordProcessor;
pub use record::{Processed, Record};
