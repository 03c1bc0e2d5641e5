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

use num_bigint::BigInt;
use rstest::fixture;

use super::{
    Qai,
    fixed::{QAI_PRECISION, denominator},
};

#[fixture]
pub fn qai_one() -> Qai {
    Qai::from_bigint(BigInt::from(denominator(QAI_PRECISION)))
}

#[fixture]
pub fn qai_one_and_half() -> Qai {
    Qai::new(1_500_000_000_000_000_000)
}

#[fixture]
pub fn qai_beyond_u128() -> Qai {
    Qai::from_bigint(BigInt::from(u128::MAX) * 1_000)
}
