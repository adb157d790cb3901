//! Conversions between the three Steam identifier formats
//!
//! - full id: the Steam ID64 (`76561197960265730`)
//! - small id: the full id minus [`BASE_OFFSET`], used in cache keys and URLs
//! - legacy id: the `STEAM_0:<universe>:<account>` string predating ID64
//!
//! Ids are held as `u128` so caller-supplied values past the 64-bit range still
//! convert exactly. Every conversion uses checked arithmetic; a value that would
//! leave the `u128` range is reported as [`SteamError::ConversionUnavailable`]
//! instead of wrapping.

use crate::error::SteamError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Offset between a full id and its small id
pub const BASE_OFFSET: u128 = 76_561_197_960_265_728;

/// Steam ID64
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FullId(u128);

/// Full id minus [`BASE_OFFSET`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SmallId(u128);

/// `STEAM_0:<universe>:<account>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LegacyId {
    universe: u8,
    account: u128,
}

impl FullId {
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u128 {
        self.0
    }

    pub fn to_small_id(self) -> Result<SmallId, SteamError> {
        self.0.checked_sub(BASE_OFFSET).map(SmallId).ok_or_else(|| {
            SteamError::ConversionUnavailable(format!(
                "{} is below the Steam ID64 base offset",
                self.0
            ))
        })
    }

    /// Derive the legacy id. The universe bit follows the parity of the last
    /// decimal digit; ids at or below the base offset have no legacy form.
    pub fn to_legacy_id(self) -> Result<LegacyId, SteamError> {
        let universe = ((self.0 % 10) % 2) as u8;
        let offset = match self.0.checked_sub(BASE_OFFSET) {
            Some(offset) if offset > 0 => offset,
            _ => {
                return Err(SteamError::ConversionUnavailable(format!(
                    "{} has no legacy id",
                    self.0
                )))
            }
        };

        Ok(LegacyId {
            universe,
            account: (offset - u128::from(universe)) / 2,
        })
    }
}

impl SmallId {
    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u128 {
        self.0
    }

    pub fn to_full_id(self) -> Result<FullId, SteamError> {
        self.0.checked_add(BASE_OFFSET).map(FullId).ok_or_else(|| {
            SteamError::ConversionUnavailable(format!("small id {} exceeds the 128-bit range", self.0))
        })
    }

    /// Key of the update record for this identity
    pub fn cache_key(self) -> String {
        format!("profile_{}", self.0)
    }
}

impl LegacyId {
    pub fn universe(&self) -> u8 {
        self.universe
    }

    pub fn account(&self) -> u128 {
        self.account
    }

    pub fn to_full_id(self) -> Result<FullId, SteamError> {
        self.account
            .checked_mul(2)
            .and_then(|v| v.checked_add(u128::from(self.universe)))
            .and_then(|v| v.checked_add(BASE_OFFSET))
            .map(FullId)
            .ok_or_else(|| {
                SteamError::ConversionUnavailable(format!("{self} exceeds the 128-bit range"))
            })
    }
}

impl fmt::Display for FullId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for SmallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for LegacyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "STEAM_0:{}:{}", self.universe, self.account)
    }
}

impl FromStr for FullId {
    type Err = SteamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_identifier(s).map(FullId)
    }
}

impl FromStr for SmallId {
    type Err = SteamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_identifier(s).map(SmallId)
    }
}

impl FromStr for LegacyId {
    type Err = SteamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SteamError::InvalidArgument(format!("{s:?} is not a legacy Steam id"));

        let rest = s.trim().strip_prefix("STEAM_").ok_or_else(invalid)?;
        let mut parts = rest.split(':');
        let (Some(prefix), Some(universe), Some(account), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };

        // STEAM_1 is the same account rendered by newer game builds
        if prefix != "0" && prefix != "1" {
            return Err(invalid());
        }
        let universe = match universe {
            "0" => 0,
            "1" => 1,
            _ => return Err(invalid()),
        };
        if account.is_empty() || !account.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let account = account.parse::<u128>().map_err(|_| invalid())?;

        Ok(LegacyId { universe, account })
    }
}

/// Parse a caller-supplied identifier.
///
/// Blank input, zero, and anything that is not an optionally `+`-signed run of
/// ASCII digits is rejected as empty or NaN. Digit strings too large for 128
/// bits are numeric but cannot be converted.
fn parse_identifier(input: &str) -> Result<u128, SteamError> {
    let trimmed = input.trim();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SteamError::empty_or_nan());
    }

    let value = digits.parse::<u128>().map_err(|_| {
        SteamError::ConversionUnavailable(format!("{digits} does not fit in 128 bits"))
    })?;

    if value == 0 {
        return Err(SteamError::empty_or_nan());
    }
    Ok(value)
}

/// Convert a full id given as text to its small id
pub fn to_small_id(full_id: &str) -> Result<SmallId, SteamError> {
    full_id.parse::<FullId>()?.to_small_id()
}

/// Convert a small id given as text back to its full id
pub fn to_full_id(small_id: &str) -> Result<FullId, SteamError> {
    small_id.parse::<SmallId>()?.to_full_id()
}

/// Convert a full id given as text to its legacy `STEAM_0:u:n` form
pub fn to_legacy_id(full_id: &str) -> Result<LegacyId, SteamError> {
    full_id.parse::<FullId>()?.to_legacy_id()
}
