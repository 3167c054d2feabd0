use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Locales the fake data source can produce values for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    EnUs,
    FrFr,
    DeDe,
    PtBr,
    JaJp,
    ZhCn,
    ZhTw,
}

impl Locale {
    pub const ALL: [Locale; 7] = [
        Locale::EnUs,
        Locale::FrFr,
        Locale::DeDe,
        Locale::PtBr,
        Locale::JaJp,
        Locale::ZhCn,
        Locale::ZhTw,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Locale::EnUs => "en_US",
            Locale::FrFr => "fr_FR",
            Locale::DeDe => "de_DE",
            Locale::PtBr => "pt_BR",
            Locale::JaJp => "ja_JP",
            Locale::ZhCn => "zh_CN",
            Locale::ZhTw => "zh_TW",
        }
    }
}

impl FromStr for Locale {
    type Err = Error;

    /// Accepts `en_US`, `en-us`, `EN_us` and bare language codes like `fr`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('-', "_").to_ascii_lowercase();
        let locale = match normalized.as_str() {
            "en" | "en_us" => Locale::EnUs,
            "fr" | "fr_fr" => Locale::FrFr,
            "de" | "de_de" => Locale::DeDe,
            "pt" | "pt_br" => Locale::PtBr,
            "ja" | "ja_jp" => Locale::JaJp,
            "zh" | "zh_cn" => Locale::ZhCn,
            "zh_tw" => Locale::ZhTw,
            _ => {
                let supported: Vec<_> = Locale::ALL.iter().map(|l| l.code()).collect();
                return Err(Error::config(format!(
                    "Invalid locale: {} (supported: {})",
                    s,
                    supported.join(", ")
                )));
            }
        };
        Ok(locale)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
