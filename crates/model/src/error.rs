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

//! Errors associated with parsing and decoding QAI amounts.

/// Represents an error when parsing or decoding a [`Qai`](crate::types::Qai) amount.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QaiError {
    /// A digit string could not be parsed in the requested radix.
    #[error("unable to parse {shape} value '{value}' as base {radix} integer for QAI")]
    Parse {
        value: String,
        shape: &'static str,
        radix: u32,
    },
    /// The requested radix is outside the supported range.
    #[error("invalid radix {radix} for QAI, must be in range [2, 36]")]
    InvalidRadix { radix: u32 },
    /// The database value arrived as a native integer, which is never trusted to hold full precision.
    #[error("unable to convert {value} of int64 to QAI, is the SQL column type set to varchar?")]
    UnsupportedInteger { value: i64 },
    /// The database value arrived in a shape with no QAI mapping.
    #[error("unable to convert {value} of {shape} to QAI")]
    UnsupportedShape { value: String, shape: &'static str },
}
