// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2025 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! Represents an amount of QAI in its smallest indivisible unit.
//!
//! A [`Qai`] owns an arbitrary-precision signed integer magnitude counting smallest
//! units, where one QAI equals `10^18` units. The display precision is a constant of
//! the type and is never stored per value.
//!
//! An absent amount is modelled as `Option<Qai>::None`. Read accessors for the absent
//! state live on [`QaiReadExt`] and treat `None` as zero. Mutation is only available on
//! a constructed [`Qai`] through `&mut self`, so there is no absent receiver to mutate.
//!
//! Mutating methods take `&mut self` and are not internally synchronized; sharing an
//! amount across threads for mutation requires the caller to provide a lock.

use std::{
    fmt::{Debug, Display},
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
    str::FromStr,
};

use alloy_primitives::B256;
use num_bigint::BigInt;
use num_traits::{Num, Zero};
use qai_core::{
    correctness::{FAILED, check_in_range_inclusive_u32, check_valid_digits},
    serialization::{Serializable, deserialize_from_str, serialize_to_str},
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::fixed::{QAI_PRECISION, format_fixed};
use crate::{
    error::QaiError,
    hash::{HASH_LENGTH, bigint_to_hash},
};

/// The ticker symbol of the QAI currency.
pub const QAI_SYMBOL: &str = "QAI";

/// The minimum radix accepted for digit strings.
///
/// Radix 0 with prefix detection (`0x`, `0o`, `0b`) is not supported, callers pass the radix.
pub const MIN_RADIX: u32 = 2;

/// The maximum radix accepted for digit strings.
///
/// Radixes 37 to 62, which use uppercase letters as separate digits, are not supported.
pub const MAX_RADIX: u32 = 36;

/// Represents an amount of QAI as an arbitrary-precision count of smallest units.
///
/// Cloning performs a deep copy of the magnitude, so mutating one amount never affects
/// another.
///
/// Ordering follows the signed integer order of the magnitude. It is only defined between
/// two constructed amounts; callers comparing possibly absent amounts must first normalize
/// with `unwrap_or_default()` so that `None` compares as zero.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Qai {
    magnitude: BigInt,
}

impl Qai {
    /// Creates a new [`Qai`] instance from the given count of smallest `units`.
    #[must_use]
    pub fn new(units: i64) -> Self {
        Self {
            magnitude: BigInt::from(units),
        }
    }

    /// Creates a new [`Qai`] instance with a magnitude of zero.
    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }

    /// Creates a new [`Qai`] instance owning the given `magnitude`.
    #[must_use]
    pub fn from_bigint(magnitude: BigInt) -> Self {
        Self { magnitude }
    }

    /// Creates a new [`Qai`] instance by parsing the digit string `s` in the given `radix`.
    ///
    /// An optional leading `+` or `-` sign is accepted. Digit separators and whitespace are not.
    /// The radix is never inferred from a prefix, and radixes above 36 are rejected rather than
    /// reading uppercase letters as the digits 36 to 61.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `radix` is outside [[`MIN_RADIX`], [`MAX_RADIX`]].
    /// - `s` is not a valid digit string in `radix`.
    pub fn from_str_radix(s: &str, radix: u32) -> Result<Self, QaiError> {
        parse_magnitude(s, radix, "text").map(Self::from_bigint)
    }

    /// Overwrites the magnitude with the given count of smallest `units`.
    pub fn set_i64(&mut self, units: i64) -> &mut Self {
        self.magnitude = BigInt::from(units);
        self
    }

    /// Overwrites the magnitude with a deep copy of the magnitude of `other`.
    pub fn set(&mut self, other: &Self) -> &mut Self {
        self.magnitude.clone_from(&other.magnitude);
        self
    }

    /// Overwrites the magnitude by parsing the digit string `s` in the given `radix`.
    ///
    /// The receiver is left unchanged when parsing fails.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `radix` is outside [[`MIN_RADIX`], [`MAX_RADIX`]].
    /// - `s` is not a valid digit string in `radix`.
    pub fn set_str_radix(&mut self, s: &str, radix: u32) -> Result<&mut Self, QaiError> {
        self.magnitude = parse_magnitude(s, radix, "text")?;
        Ok(self)
    }

    /// Overwrites the magnitude with the sum `x + y`.
    ///
    /// Use `+=` when the receiver is itself one of the operands.
    pub fn set_sum(&mut self, x: &Self, y: &Self) -> &mut Self {
        self.magnitude = &x.magnitude + &y.magnitude;
        self
    }

    /// Returns `true` if the magnitude is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.magnitude.is_zero()
    }

    /// Returns a reference to the raw magnitude for interop with integer-consuming code.
    #[must_use]
    pub fn as_bigint(&self) -> &BigInt {
        &self.magnitude
    }

    /// Consumes the amount and returns the raw magnitude.
    #[must_use]
    pub fn into_bigint(self) -> BigInt {
        self.magnitude
    }

    /// Returns the digit string of the magnitude in the given `radix`, with no precision scaling.
    ///
    /// Digits above 9 are rendered in lowercase. Radixes above 36 are not supported, since
    /// lowercase and uppercase letters are not distinct digits here.
    ///
    /// # Panics
    ///
    /// Panics if `radix` is outside [[`MIN_RADIX`], [`MAX_RADIX`]].
    #[must_use]
    pub fn text(&self, radix: u32) -> String {
        check_in_range_inclusive_u32(radix, MIN_RADIX, MAX_RADIX, "radix").expect(FAILED);
        self.magnitude.to_str_radix(radix)
    }

    /// Returns the amount in QAI units as a decimal string with exactly 18 fractional digits.
    ///
    /// A zero amount renders as the bare string `"0"`.
    #[must_use]
    pub fn qai(&self) -> String {
        if self.is_zero() {
            return "0".to_string();
        }
        format_fixed(&self.magnitude, QAI_PRECISION)
    }

    /// Returns the ticker symbol for the currency.
    #[must_use]
    pub const fn symbol() -> &'static str {
        QAI_SYMBOL
    }

    /// Returns the 32-byte big-endian projection of the magnitude.
    ///
    /// See [`bigint_to_hash`] for the truncation behavior on values of `2^256` or more.
    #[must_use]
    pub fn to_hash(&self) -> B256 {
        bigint_to_hash(&self.magnitude)
    }

    /// Returns the 32-byte big-endian projection of the magnitude as a byte array.
    #[must_use]
    pub fn to_hash_bytes(&self) -> [u8; HASH_LENGTH] {
        self.to_hash().0
    }
}

/// Parses `value` in `radix` into a magnitude, tagging failures with the source `shape`.
pub(crate) fn parse_magnitude(
    value: &str,
    radix: u32,
    shape: &'static str,
) -> Result<BigInt, QaiError> {
    if check_in_range_inclusive_u32(radix, MIN_RADIX, MAX_RADIX, "radix").is_err() {
        return Err(QaiError::InvalidRadix { radix });
    }

    let parse_error = || QaiError::Parse {
        value: value.to_string(),
        shape,
        radix,
    };

    check_valid_digits(value, "value").map_err(|_| parse_error())?;
    BigInt::from_str_radix(value, radix).map_err(|_| parse_error())
}

/// Read accessors for a possibly absent amount, where `None` reads as zero.
///
/// These accessors never fail.
pub trait QaiReadExt {
    /// Returns the base-10 digit string of the magnitude, or `"0"` when absent.
    fn to_plain_string(&self) -> String;

    /// Returns the 18-fractional-digit decimal string, or `"0"` when absent or zero.
    fn qai(&self) -> String;

    /// Returns `true` if absent or if the magnitude is zero.
    fn is_zero(&self) -> bool;

    /// Returns the ticker symbol for the currency.
    fn symbol(&self) -> &'static str {
        QAI_SYMBOL
    }
}

impl QaiReadExt for Option<&Qai> {
    fn to_plain_string(&self) -> String {
        match self {
            Some(qai) => qai.to_string(),
            None => "0".to_string(),
        }
    }

    fn qai(&self) -> String {
        match self {
            Some(qai) => qai.qai(),
            None => "0".to_string(),
        }
    }

    fn is_zero(&self) -> bool {
        self.is_none_or(|qai| qai.is_zero())
    }
}

impl QaiReadExt for Option<Qai> {
    fn to_plain_string(&self) -> String {
        self.as_ref().to_plain_string()
    }

    fn qai(&self) -> String {
        self.as_ref().qai()
    }

    fn is_zero(&self) -> bool {
        QaiReadExt::is_zero(&self.as_ref())
    }
}

impl FromStr for Qai {
    type Err = QaiError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::from_str_radix(value, 10)
    }
}

impl From<i64> for Qai {
    fn from(units: i64) -> Self {
        Self::new(units)
    }
}

impl From<BigInt> for Qai {
    fn from(magnitude: BigInt) -> Self {
        Self::from_bigint(magnitude)
    }
}

impl From<Qai> for BigInt {
    fn from(qai: Qai) -> Self {
        qai.magnitude
    }
}

impl Neg for Qai {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self {
            magnitude: -self.magnitude,
        }
    }
}

impl Add for Qai {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            magnitude: self.magnitude + rhs.magnitude,
        }
    }
}

impl Add for &Qai {
    type Output = Qai;
    fn add(self, rhs: Self) -> Self::Output {
        Qai {
            magnitude: &self.magnitude + &rhs.magnitude,
        }
    }
}

impl Sub for Qai {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            magnitude: self.magnitude - rhs.magnitude,
        }
    }
}

impl Sub for &Qai {
    type Output = Qai;
    fn sub(self, rhs: Self) -> Self::Output {
        Qai {
            magnitude: &self.magnitude - &rhs.magnitude,
        }
    }
}

impl AddAssign for Qai {
    fn add_assign(&mut self, other: Self) {
        self.magnitude += other.magnitude;
    }
}

impl AddAssign<&Self> for Qai {
    fn add_assign(&mut self, other: &Self) {
        self.magnitude += &other.magnitude;
    }
}

impl SubAssign for Qai {
    fn sub_assign(&mut self, other: Self) {
        self.magnitude -= other.magnitude;
    }
}

impl SubAssign<&Self> for Qai {
    fn sub_assign(&mut self, other: &Self) {
        self.magnitude -= &other.magnitude;
    }
}

impl<'a> Sum<&'a Self> for Qai {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |mut acc, qai| {
            acc += qai;
            acc
        })
    }
}

impl Debug for Qai {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", stringify!(Qai), self.magnitude)
    }
}

impl Display for Qai {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.magnitude)
    }
}

impl Serialize for Qai {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serialize_to_str(self, serializer)
    }
}

impl<'de> Deserialize<'de> for Qai {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserialize_from_str(deserializer)
    }
}

impl Serializable for Qai {}
