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

//! Marshaling of [`Qai`] amounts to and from relational database column values.
//!
//! Amounts are persisted as the base-10 digit string of the magnitude in a single
//! text-compatible column. Drivers may hand the stored value back in several physical
//! shapes, which are captured by the closed [`SqlValue`] union:
//!
//! - [`SqlValue::Text`] is parsed directly as base-10 digits.
//! - [`SqlValue::Bytes`] is read as the UTF-8 text of the digit string, which is how many
//!   drivers return `NUMERIC` columns.
//! - [`SqlValue::Int64`] is always rejected. A native integer column cannot hold the full
//!   range of an amount, so receiving one points at a misconfigured schema.
//! - Every other shape is rejected.

use std::{borrow::Cow, fmt::Display};

use crate::{
    error::QaiError,
    types::{Qai, qai::parse_magnitude},
};

/// Represents a column value in one of the physical shapes a database driver may deliver.
#[derive(Clone, Debug, PartialEq)]
pub enum SqlValue<'a> {
    /// A text value.
    Text(Cow<'a, str>),
    /// A raw byte sequence.
    Bytes(Cow<'a, [u8]>),
    /// A native 64-bit integer.
    Int64(i64),
    /// A native 64-bit float.
    Float64(f64),
    /// A boolean.
    Bool(bool),
    /// A SQL `NULL`.
    Null,
    /// A value of a column type with no dedicated shape, carrying the type name.
    Other(Cow<'a, str>),
}

impl SqlValue<'_> {
    /// Returns the name of the physical shape of this value.
    #[must_use]
    pub const fn shape(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Bytes(_) => "bytes",
            Self::Int64(_) => "int64",
            Self::Float64(_) => "float64",
            Self::Bool(_) => "bool",
            Self::Null => "null",
            Self::Other(_) => "other",
        }
    }
}

impl Display for SqlValue<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(value) => write!(f, "{value}"),
            Self::Bytes(value) => write!(f, "{}", String::from_utf8_lossy(value)),
            Self::Int64(value) => write!(f, "{value}"),
            Self::Float64(value) => write!(f, "{value}"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Null => write!(f, "NULL"),
            Self::Other(type_name) => write!(f, "<{type_name}>"),
        }
    }
}

impl Qai {
    /// Returns the column value for persisting this amount.
    ///
    /// This is always the base-10 digit string of the magnitude in smallest units, never
    /// the decimal QAI form.
    #[must_use]
    pub fn value(&self) -> SqlValue<'static> {
        SqlValue::Text(Cow::Owned(self.to_string()))
    }

    /// Replaces the magnitude with the amount decoded from a column `value`.
    ///
    /// On success the receiver is fully replaced. On failure it is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `value` is text or bytes which are not a base-10 digit string.
    /// - `value` is a native integer, regardless of its value.
    /// - `value` is of any other shape.
    pub fn scan(&mut self, value: &SqlValue<'_>) -> Result<(), QaiError> {
        *self = Self::decode(value)?;
        Ok(())
    }

    /// Decodes a new [`Qai`] from a column `value`.
    ///
    /// # Errors
    ///
    /// Returns an error under the same conditions as [`Qai::scan`].
    pub fn decode(value: &SqlValue<'_>) -> Result<Self, QaiError> {
        let result = match value {
            SqlValue::Text(text) => parse_magnitude(text, 10, value.shape()).map(Self::from_bigint),
            SqlValue::Bytes(bytes) => match std::str::from_utf8(bytes) {
                Ok(text) => parse_magnitude(text, 10, value.shape()).map(Self::from_bigint),
                Err(_) => Err(QaiError::Parse {
                    value: value.to_string(),
                    shape: value.shape(),
                    radix: 10,
                }),
            },
            SqlValue::Int64(int) => {
                log::warn!("Rejected int64 column value {int} for QAI, check the SQL column type");
                return Err(QaiError::UnsupportedInteger { value: *int });
            }
            _ => Err(QaiError::UnsupportedShape {
                value: value.to_string(),
                shape: value.shape(),
            }),
        };

        if let Err(e) = &result {
            log::debug!("Failed to decode QAI column value: {e}");
        }
        result
    }
}

impl From<&Qai> for SqlValue<'static> {
    fn from(qai: &Qai) -> Self {
        qai.value()
    }
}

impl TryFrom<&SqlValue<'_>> for Qai {
    type Error = QaiError;

    fn try_from(value: &SqlValue<'_>) -> Result<Self, Self::Error> {
        Self::decode(value)
    }
}
