//! `tradefeed-countries` — ISO 3166-1 alpha-2 lookup table and value object.
//!
//! The code set is closed and known at compile time, so it is baked into the
//! binary as a perfect-hash set: immutable, zero-initialization, safe for
//! concurrent reads from any number of normalizer calls.

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use tradefeed_core::ValueObject;

/// The 249 officially assigned ISO 3166-1 alpha-2 codes.
static ALPHA2: phf::Set<&'static str> = phf::phf_set! {
    "AD", "AE", "AF", "AG", "AI", "AL", "AM", "AO", "AQ", "AR", "AS", "AT",
    "AU", "AW", "AX", "AZ",
    "BA", "BB", "BD", "BE", "BF", "BG", "BH", "BI", "BJ", "BL", "BM", "BN",
    "BO", "BQ", "BR", "BS", "BT", "BV", "BW", "BY", "BZ",
    "CA", "CC", "CD", "CF", "CG", "CH", "CI", "CK", "CL", "CM", "CN", "CO",
    "CR", "CU", "CV", "CW", "CX", "CY", "CZ",
    "DE", "DJ", "DK", "DM", "DO", "DZ",
    "EC", "EE", "EG", "EH", "ER", "ES", "ET",
    "FI", "FJ", "FK", "FM", "FO", "FR",
    "GA", "GB", "GD", "GE", "GF", "GG", "GH", "GI", "GL", "GM", "GN", "GP",
    "GQ", "GR", "GS", "GT", "GU", "GW", "GY",
    "HK", "HM", "HN", "HR", "HT", "HU",
    "ID", "IE", "IL", "IM", "IN", "IO", "IQ", "IR", "IS", "IT",
    "JE", "JM", "JO", "JP",
    "KE", "KG", "KH", "KI", "KM", "KN", "KP", "KR", "KW", "KY", "KZ",
    "LA", "LB", "LC", "LI", "LK", "LR", "LS", "LT", "LU", "LV", "LY",
    "MA", "MC", "MD", "ME", "MF", "MG", "MH", "MK", "ML", "MM", "MN", "MO",
    "MP", "MQ", "MR", "MS", "MT", "MU", "MV", "MW", "MX", "MY", "MZ",
    "NA", "NC", "NE", "NF", "NG", "NI", "NL", "NO", "NP", "NR", "NU", "NZ",
    "OM",
    "PA", "PE", "PF", "PG", "PH", "PK", "PL", "PM", "PN", "PR", "PS", "PT",
    "PW", "PY",
    "QA",
    "RE", "RO", "RS", "RU", "RW",
    "SA", "SB", "SC", "SD", "SE", "SG", "SH", "SI", "SJ", "SK", "SL", "SM",
    "SN", "SO", "SR", "SS", "ST", "SV", "SX", "SY", "SZ",
    "TC", "TD", "TF", "TG", "TH", "TJ", "TK", "TL", "TM", "TN", "TO", "TR",
    "TT", "TV", "TW", "TZ",
    "UA", "UG", "UM", "US", "UY", "UZ",
    "VA", "VC", "VE", "VG", "VI", "VN", "VU",
    "WF", "WS",
    "YE", "YT",
    "ZA", "ZM", "ZW",
};

/// Whether `code` is an officially assigned alpha-2 code (exact case, i.e.
/// uppercase — the feed sends uppercase and we do not paper over deviations).
pub fn is_assigned_alpha2(code: &str) -> bool {
    ALPHA2.contains(code)
}

/// Error parsing a [`CountryCode`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown ISO 3166-1 alpha-2 code: {0:?}")]
pub struct UnknownCountryCode(pub String);

/// A validated ISO 3166-1 alpha-2 country code.
///
/// Construction goes through [`CountryCode::parse`] (or `FromStr`/serde),
/// which checks membership in the assigned set; an in-range value is
/// therefore guaranteed wherever this type appears.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CountryCode(&'static str);

impl CountryCode {
    pub fn parse(code: &str) -> Result<Self, UnknownCountryCode> {
        match ALPHA2.get_key(code) {
            Some(key) => Ok(Self(*key)),
            None => Err(UnknownCountryCode(code.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl ValueObject for CountryCode {}

impl core::fmt::Display for CountryCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.0)
    }
}

impl FromStr for CountryCode {
    type Err = UnknownCountryCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<'de> Deserialize<'de> for CountryCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        CountryCode::parse(&raw).map_err(serde::de::Error::custom)
    }
}
