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

//! Projection of arbitrary-precision integers onto fixed-width 32-byte keys.

use alloy_primitives::B256;
use num_bigint::BigInt;

/// The width in bytes of a projected hash key.
pub const HASH_LENGTH: usize = 32;

/// Returns the big-endian, left zero-padded 32-byte projection of `value`.
///
/// Only the absolute value is projected, the sign is discarded. No overflow check is
/// performed: when the absolute value needs more than [`HASH_LENGTH`] bytes, the
/// high-order bytes are silently dropped and the low-order 32 bytes are kept.
/// Keeping values below `2^256` is the caller's responsibility.
#[must_use]
pub fn bigint_to_hash(value: &BigInt) -> B256 {
    let (_, bytes) = value.to_bytes_be();
    let start = bytes.len().saturating_sub(HASH_LENGTH);
    B256::left_padding_from(&bytes[start..])
}
