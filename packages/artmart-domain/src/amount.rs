use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};

/// Largest decimal digit count accepted for a lamport amount. Covers the full
/// u64 lamport range with headroom for aggregate amounts.
const MAX_DIGITS: usize = 39;

/// A large-integer currency amount kept as a string-encoded decimal.
///
/// Lamport-scale values overflow f64 mantissas, so the amount is never held as
/// a float. Construction validates the encoding; a constructed value is always
/// a non-empty, digits-only string without a sign or separator.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct LamportAmount(String);

impl LamportAmount {
	pub fn new(raw: impl Into<String>) -> Result<Self, AmountError> {
		let raw = raw.into();

		if raw.is_empty() {
			return Err(AmountError::Empty);
		}
		if raw.len() > MAX_DIGITS {
			return Err(AmountError::TooLong { len: raw.len() });
		}
		if !raw.bytes().all(|b| b.is_ascii_digit()) {
			return Err(AmountError::NonDigit { raw });
		}

		Ok(Self(raw))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl Ord for LamportAmount {
	fn cmp(&self, other: &Self) -> std::cmp::Ordering {
		let lhs = self.0.trim_start_matches('0');
		let rhs = other.0.trim_start_matches('0');

		// The raw tiebreak keeps Ord consistent with the derived Eq when the
		// encodings differ only in leading zeros.
		lhs.len().cmp(&rhs.len()).then_with(|| lhs.cmp(rhs)).then_with(|| self.0.cmp(&other.0))
	}
}

impl PartialOrd for LamportAmount {
	fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
		Some(self.cmp(other))
	}
}

impl fmt::Display for LamportAmount {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl FromStr for LamportAmount {
	type Err = AmountError;

	fn from_str(raw: &str) -> Result<Self, Self::Err> {
		Self::new(raw)
	}
}

impl From<u64> for LamportAmount {
	fn from(value: u64) -> Self {
		Self(value.to_string())
	}
}

impl<'de> Deserialize<'de> for LamportAmount {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let raw = String::deserialize(deserializer)?;

		Self::new(raw).map_err(serde::de::Error::custom)
	}
}

#[derive(Debug, thiserror::Error)]
pub enum AmountError {
	#[error("Lamport amount must be non-empty.")]
	Empty,
	#[error("Lamport amount exceeds {MAX_DIGITS} digits ({len}).")]
	TooLong { len: usize },
	#[error("Lamport amount must be a decimal integer, got {raw:?}.")]
	NonDigit { raw: String },
}
