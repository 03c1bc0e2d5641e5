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

//! Functions for rendering arbitrary-precision integers at a fixed decimal precision.
//!
//! A fixed-point amount is an integer count of smallest units, where one display
//! unit equals `10^precision` smallest units. Rendering is exact: the quotient and
//! remainder by `10^precision` are computed over the integer itself and no float
//! conversion takes place.

use num_bigint::{BigInt, BigUint, Sign};

/// The fixed decimal precision of a QAI amount.
pub const QAI_PRECISION: u32 = 18;

/// Returns the denominator `10^precision` for the given `precision`.
#[must_use]
pub fn denominator(precision: u32) -> BigUint {
    BigUint::from(10_u32).pow(precision)
}

/// Renders `value` as a decimal string with exactly `precision` fractional digits.
///
/// The integer part is the quotient truncated toward zero and the fractional part is
/// the zero-padded remainder, so no rounding is ever applied. Negative values carry a
/// single leading minus sign, including those with a zero integer part
/// (e.g. `-42` at precision 18 renders as `-0.000000000000000042`).
///
/// A `precision` of zero renders the plain integer with no decimal point.
#[must_use]
pub fn format_fixed(value: &BigInt, precision: u32) -> String {
    let magnitude = value.magnitude();
    let sign = if value.sign() == Sign::Minus { "-" } else { "" };

    if precision == 0 {
        return format!("{sign}{magnitude}");
    }

    let divisor = denominator(precision);
    let integer = magnitude / &divisor;
    let fraction = magnitude % &divisor;

    format!(
        "{sign}{integer}.{fraction:0>width$}",
        width = precision as usize
    )
}
