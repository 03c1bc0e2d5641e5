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

//! Domain model for arbitrary-precision QAI amounts.
//!
//! The `qai-model` crate provides the [`Qai`](types::Qai) value type, an amount of QAI held as an
//! arbitrary-precision count of smallest units (one QAI equals `10^18` units), together with:
//!
//! - Exact fixed-precision decimal rendering at 18 fractional digits.
//! - Projection onto 32-byte big-endian keys for hashing and addressing.
//! - A SQL column codec which persists the base-10 digit string and decodes the physical
//!   shapes a database driver may deliver.
//! - JSON and `MsgPack` serialization as a digit string.
//!
//! # Feature flags
//!
//! - `stubs`: Enables type stubs for use in testing scenarios.

#![warn(rustc::all)]
#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(missing_debug_implementations)]
#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod error;
pub mod hash;
pub mod sql;
pub mod types;
