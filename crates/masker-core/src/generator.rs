//! Seeded, locale-aware replacement values

use std::collections::HashMap;
use std::ops::RangeInclusive;

use fake::Fake;
use fake::faker::address::raw::{BuildingNumber, CityName, StateAbbr, StreetName, ZipCode};
use fake::faker::company::raw::CompanyName;
use fake::faker::impls::address::CityNameGenFn;
use fake::faker::internet::raw::SafeEmail;
use fake::faker::name::raw::{FirstName, LastName, Name};
use fake::faker::phone_number::raw::PhoneNumber;
use fake::locales::{DE_DE, Data, EN, FR_FR, JA_JP, PT_BR, ZH_CN, ZH_TW};
use rand::distr::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::category::FieldCategory;
use crate::error::{Error, Result};
use crate::locale::Locale;

pub const DEFAULT_GENERIC_MIN_LEN: usize = 10;
pub const DEFAULT_GENERIC_MAX_LEN: usize = 20;

/// Settings shared by every generated value in a run.
///
/// Built once at startup and passed by reference; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorContext {
    pub locale: Locale,
    /// `None` draws the initial state from the OS, so output differs per run
    pub seed: Option<u64>,
    pub generic_len: RangeInclusive<usize>,
    /// Map equal originals to equal replacements
    pub consistent: bool,
}

impl Default for GeneratorContext {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            seed: None,
            generic_len: DEFAULT_GENERIC_MIN_LEN..=DEFAULT_GENERIC_MAX_LEN,
            consistent: false,
        }
    }
}

impl GeneratorContext {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_consistent(mut self, consistent: bool) -> Self {
        self.consistent = consistent;
        self
    }

    pub fn with_generic_len(mut self, min: usize, max: usize) -> Result<Self> {
        if min == 0 || min > max {
            return Err(Error::config(format!(
                "Invalid generic token length range {}..={}",
                min, max
            )));
        }
        self.generic_len = min..=max;
        Ok(self)
    }
}

/// Produces replacement values from one pseudorandom sequence.
///
/// For a fixed seed the n-th call always yields the same value, so the
/// output of a run depends only on the seed, locale and input.
pub struct ValueGenerator<'a> {
    context: &'a GeneratorContext,
    rng: StdRng,
    assigned: HashMap<(FieldCategory, String), String>,
}

impl<'a> ValueGenerator<'a> {
    pub fn new(context: &'a GeneratorContext) -> Self {
        let rng = match context.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            context,
            rng,
            assigned: HashMap::new(),
        }
    }

    /// Next value for `category`
    pub fn generate(&mut self, category: FieldCategory) -> String {
        let rng = &mut self.rng;
        match self.context.locale {
            Locale::EnUs => fake_value(EN, category, rng, &self.context.generic_len),
            Locale::FrFr => fake_value(FR_FR, category, rng, &self.context.generic_len),
            Locale::DeDe => fake_value(DE_DE, category, rng, &self.context.generic_len),
            Locale::PtBr => fake_value(PT_BR, category, rng, &self.context.generic_len),
            Locale::JaJp => fake_value(JA_JP, category, rng, &self.context.generic_len),
            Locale::ZhCn => fake_value(ZH_CN, category, rng, &self.context.generic_len),
            Locale::ZhTw => fake_value(ZH_TW, category, rng, &self.context.generic_len),
        }
    }

    /// Replacement for `original`.
    ///
    /// In consistent mode the first replacement chosen for an original value is
    /// reused for every later occurrence in the same category.
    pub fn substitute(&mut self, category: FieldCategory, original: &str) -> String {
        if !self.context.consistent {
            return self.generate(category);
        }

        let key = (category, original.to_string());
        if let Some(existing) = self.assigned.get(&key) {
            return existing.clone();
        }

        let value = self.generate(category);
        self.assigned.insert(key, value.clone());
        value
    }
}

fn fake_value<L: Data + CityNameGenFn + Copy>(
    locale: L,
    category: FieldCategory,
    rng: &mut StdRng,
    generic_len: &RangeInclusive<usize>,
) -> String {
    match category {
        FieldCategory::PersonName => Name(locale).fake_with_rng(rng),
        FieldCategory::FirstName => FirstName(locale).fake_with_rng(rng),
        FieldCategory::LastName => LastName(locale).fake_with_rng(rng),
        FieldCategory::Address => {
            let building: String = BuildingNumber(locale).fake_with_rng(rng);
            let street: String = StreetName(locale).fake_with_rng(rng);
            let city: String = CityName(locale).fake_with_rng(rng);
            let state: String = StateAbbr(locale).fake_with_rng(rng);
            let zip: String = ZipCode(locale).fake_with_rng(rng);
            format!("{} {}, {}, {} {}", building, street, city, state, zip)
        }
        FieldCategory::City => CityName(locale).fake_with_rng(rng),
        FieldCategory::PostalCode => ZipCode(locale).fake_with_rng(rng),
        FieldCategory::Phone => PhoneNumber(locale).fake_with_rng(rng),
        FieldCategory::Email => SafeEmail(locale).fake_with_rng(rng),
        FieldCategory::Company => CompanyName(locale).fake_with_rng(rng),
        FieldCategory::Generic => generic_token(rng, generic_len),
    }
}

fn generic_token(rng: &mut StdRng, len: &RangeInclusive<usize>) -> String {
    let len = rng.random_range(len.clone());
    (0..len).map(|_| char::from(rng.sample(Alphanumeric))).collect()
}
