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

use std::{borrow::Cow, iter};

use num_bigint::BigInt;
use num_traits::Zero;
use qai_core::correctness::check_predicate_true;
use qai_model::{sql::SqlValue, types::Qai};
use sqlx::{
    Database, Decode, Postgres, TypeInfo, ValueRef,
    encode::IsNull,
    error::BoxDynError,
    postgres::{PgTypeInfo, PgValueFormat, PgValueRef},
    types::Type,
};

/// The base of the digit groups in the binary `NUMERIC` wire format.
const NUMERIC_BASE: u32 = 10_000;

/// The length of the binary `NUMERIC` header: digit count, weight, sign and display scale.
const NUMERIC_HEADER_LEN: usize = 8;

const NUMERIC_POS: u16 = 0x0000;
const NUMERIC_NEG: u16 = 0x4000;
const NUMERIC_NAN: u16 = 0xC000;
const NUMERIC_PINF: u16 = 0xD000;
const NUMERIC_NINF: u16 = 0xF000;

/// Wraps a [`Qai`] amount for binding to and reading from PostgreSQL columns.
///
/// Amounts are written as `TEXT` holding the base-10 digit string of the magnitude.
/// Columns should be declared `TEXT` or `VARCHAR`. `NUMERIC` columns are readable at any
/// precision, though binding into them requires an explicit `$1::numeric` cast in the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QaiModel(pub Qai);

/// Represents the physical shape a PostgreSQL column type is read as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnShape {
    Text,
    Bytes,
    Numeric,
    Int64,
    Other,
}

/// Returns the [`ColumnShape`] for the given PostgreSQL `type_name`.
///
/// Every integer column type maps to [`ColumnShape::Int64`], so that reads from any of them
/// are rejected with the column type hint.
#[must_use]
pub fn column_shape(type_name: &str) -> ColumnShape {
    match type_name.to_ascii_uppercase().as_str() {
        "TEXT" | "VARCHAR" | "BPCHAR" | "CHAR" | "NAME" | "CITEXT" | "UNKNOWN" => {
            ColumnShape::Text
        }
        "BYTEA" => ColumnShape::Bytes,
        "NUMERIC" => ColumnShape::Numeric,
        "INT2" | "INT4" | "INT8" => ColumnShape::Int64,
        _ => ColumnShape::Other,
    }
}

fn to_sql_value(value: PgValueRef<'_>) -> Result<SqlValue<'_>, BoxDynError> {
    if value.is_null() {
        return Ok(SqlValue::Null);
    }

    let type_name = value.type_info().name().to_ascii_uppercase();
    let sql_value = match (column_shape(&type_name), value.format()) {
        (ColumnShape::Text, _) => {
            SqlValue::Text(Cow::Borrowed(<&str as Decode<Postgres>>::decode(value)?))
        }
        (ColumnShape::Bytes, _) => {
            SqlValue::Bytes(Cow::Borrowed(<&[u8] as Decode<Postgres>>::decode(value)?))
        }
        // Text format NUMERIC arrives as the ASCII digits
        (ColumnShape::Numeric, PgValueFormat::Text) => {
            SqlValue::Bytes(Cow::Borrowed(value.as_bytes()?))
        }
        (ColumnShape::Numeric, PgValueFormat::Binary) => numeric_to_sql_value(value.as_bytes()?)?,
        (ColumnShape::Int64, _) => SqlValue::Int64(decode_integer(value, &type_name)?),
        (ColumnShape::Other, _) => SqlValue::Other(Cow::Owned(type_name)),
    };
    Ok(sql_value)
}

fn decode_integer(value: PgValueRef<'_>, type_name: &str) -> Result<i64, BoxDynError> {
    match type_name {
        "INT2" => Ok(i64::from(<i16 as Decode<Postgres>>::decode(value)?)),
        "INT4" => Ok(i64::from(<i32 as Decode<Postgres>>::decode(value)?)),
        _ => <i64 as Decode<Postgres>>::decode(value),
    }
}

/// Converts an integral binary format `NUMERIC` value to its digit string.
///
/// The value is read from the base 10000 digit groups of the wire format, so there is no
/// limit on the number of digits.
///
/// # Errors
///
/// Returns an error if:
/// - `buf` is not a well-formed binary `NUMERIC` value.
/// - The value is `NaN` or infinite.
/// - The value has a non-zero fractional part.
pub fn numeric_to_sql_value(buf: &[u8]) -> anyhow::Result<SqlValue<'static>> {
    check_predicate_true(
        buf.len() >= NUMERIC_HEADER_LEN,
        &format!("invalid NUMERIC value, header was {} bytes", buf.len()),
    )?;
    let ndigits = i16::from_be_bytes([buf[0], buf[1]]);
    let weight = i16::from_be_bytes([buf[2], buf[3]]);
    let sign = u16::from_be_bytes([buf[4], buf[5]]);
    let dscale = u16::from_be_bytes([buf[6], buf[7]]);

    let expected_len = usize::try_from(ndigits)
        .ok()
        .map(|n| NUMERIC_HEADER_LEN + 2 * n);
    check_predicate_true(
        expected_len == Some(buf.len()),
        &format!("invalid NUMERIC value, {ndigits} digit groups in {} bytes", buf.len()),
    )?;

    let negative = match sign {
        NUMERIC_POS => false,
        NUMERIC_NEG => true,
        NUMERIC_NAN => anyhow::bail!("unable to convert NUMERIC NaN to QAI"),
        NUMERIC_PINF => anyhow::bail!("unable to convert NUMERIC Infinity to QAI"),
        NUMERIC_NINF => anyhow::bail!("unable to convert NUMERIC -Infinity to QAI"),
        _ => anyhow::bail!("invalid NUMERIC value, sign was {sign:#06x}"),
    };

    let groups: Vec<i16> = buf[NUMERIC_HEADER_LEN..]
        .chunks_exact(2)
        .map(|chunk| i16::from_be_bytes([chunk[0], chunk[1]]))
        .collect();
    check_predicate_true(
        groups.iter().all(|group| (0..10_000).contains(group)),
        "invalid NUMERIC value, digit group out of range",
    )?;

    // Groups at index `weight + 1` and beyond sit after the decimal point
    let integral_len = usize::try_from(i32::from(weight) + 1).unwrap_or(0);
    let is_integral = groups.iter().skip(integral_len).all(|group| *group == 0);
    if !is_integral {
        log::warn!("Rejected NUMERIC column value for QAI with a fractional part");
    }
    let fail_msg = format!(
        "unable to convert NUMERIC with scale {dscale} to QAI, value has a fractional part"
    );
    check_predicate_true(is_integral, &fail_msg)?;

    let magnitude = groups
        .iter()
        .copied()
        .chain(iter::repeat(0))
        .take(integral_len)
        .fold(BigInt::zero(), |acc, group| acc * NUMERIC_BASE + BigInt::from(group));
    let magnitude = if negative { -magnitude } else { magnitude };

    Ok(SqlValue::Text(Cow::Owned(magnitude.to_string())))
}

impl sqlx::Encode<'_, sqlx::Postgres> for QaiModel {
    fn encode_by_ref(
        &self,
        buf: &mut <Postgres as Database>::ArgumentBuffer<'_>,
    ) -> Result<IsNull, BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0.to_string(), buf)
    }
}

impl<'r> sqlx::Decode<'r, sqlx::Postgres> for QaiModel {
    fn decode(value: <Postgres as Database>::ValueRef<'r>) -> Result<Self, BoxDynError> {
        let sql_value = to_sql_value(value)?;
        let qai = Qai::decode(&sql_value)?;
        Ok(QaiModel(qai))
    }
}

impl sqlx::Type<sqlx::Postgres> for QaiModel {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as Type<sqlx::Postgres>>::type_info()
    }

    // Every shape with a decode path is accepted, so that integer columns reach the
    // decoder and fail with the column type hint rather than a generic mismatch
    fn compatible(ty: &PgTypeInfo) -> bool {
        <&str as Type<sqlx::Postgres>>::compatible(ty)
            || column_shape(ty.name()) != ColumnShape::Other
    }
}

impl From<Qai> for QaiModel {
    fn from(qai: Qai) -> Self {
        Self(qai)
    }
}

impl From<QaiModel> for Qai {
    fn from(model: QaiModel) -> Self {
        model.0
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use qai_model::{error::QaiError, types::stubs::qai_one_and_half};
    use rstest::rstest;
    use sqlx::{Encode, postgres::PgArgumentBuffer};

    use super::*;

    fn numeric_bytes(weight: i16, sign: u16, dscale: u16, groups: &[i16]) -> Vec<u8> {
        let ndigits = i16::try_from(groups.len()).unwrap();
        let mut buf = Vec::with_capacity(NUMERIC_HEADER_LEN + 2 * groups.len());
        buf.extend_from_slice(&ndigits.to_be_bytes());
        buf.extend_from_slice(&weight.to_be_bytes());
        buf.extend_from_slice(&sign.to_be_bytes());
        buf.extend_from_slice(&dscale.to_be_bytes());
        for group in groups {
            buf.extend_from_slice(&group.to_be_bytes());
        }
        buf
    }

    // Lays out an integer digit string the way PostgreSQL sends it, trailing zero groups dropped
    fn integer_numeric_bytes(digits: &str) -> Vec<u8> {
        let (sign, digits) = match digits.strip_prefix('-') {
            Some(rest) => (NUMERIC_NEG, rest),
            None => (NUMERIC_POS, digits),
        };
        let padded = format!("{}{digits}", "0".repeat((4 - digits.len() % 4) % 4));
        let mut groups: Vec<i16> = padded
            .as_bytes()
            .chunks(4)
            .map(|chunk| std::str::from_utf8(chunk).unwrap().parse().unwrap())
            .collect();
        let weight = i16::try_from(groups.len()).unwrap() - 1;
        while groups.last() == Some(&0) {
            groups.pop();
        }
        let weight = if groups.is_empty() { 0 } else { weight };
        numeric_bytes(weight, sign, 0, &groups)
    }

    #[rstest]
    #[case("TEXT", ColumnShape::Text)]
    #[case("VARCHAR", ColumnShape::Text)]
    #[case("varchar", ColumnShape::Text)]
    #[case("BPCHAR", ColumnShape::Text)]
    #[case("citext", ColumnShape::Text)]
    #[case("BYTEA", ColumnShape::Bytes)]
    #[case("NUMERIC", ColumnShape::Numeric)]
    #[case("INT2", ColumnShape::Int64)]
    #[case("INT4", ColumnShape::Int64)]
    #[case("INT8", ColumnShape::Int64)]
    #[case("int4", ColumnShape::Int64)]
    #[case("FLOAT8", ColumnShape::Other)]
    #[case("BOOL", ColumnShape::Other)]
    #[case("TIMESTAMPTZ", ColumnShape::Other)]
    fn test_column_shape(#[case] type_name: &str, #[case] expected: ColumnShape) {
        assert_eq!(column_shape(type_name), expected);
    }

    #[rstest]
    fn test_column_shape_for_driver_type_infos() {
        assert_eq!(
            column_shape(<String as Type<Postgres>>::type_info().name()),
            ColumnShape::Text
        );
        assert_eq!(
            column_shape(<Vec<u8> as Type<Postgres>>::type_info().name()),
            ColumnShape::Bytes
        );
        assert_eq!(
            column_shape(PgTypeInfo::with_name("NUMERIC").name()),
            ColumnShape::Numeric
        );
        assert_eq!(
            column_shape(<i16 as Type<Postgres>>::type_info().name()),
            ColumnShape::Int64
        );
        assert_eq!(
            column_shape(<i32 as Type<Postgres>>::type_info().name()),
            ColumnShape::Int64
        );
        assert_eq!(
            column_shape(<i64 as Type<Postgres>>::type_info().name()),
            ColumnShape::Int64
        );
        assert_eq!(
            column_shape(<bool as Type<Postgres>>::type_info().name()),
            ColumnShape::Other
        );
    }

    #[rstest]
    fn test_compatible_types() {
        assert!(QaiModel::compatible(&<String as Type<Postgres>>::type_info()));
        assert!(QaiModel::compatible(&<Vec<u8> as Type<Postgres>>::type_info()));
        assert!(QaiModel::compatible(&PgTypeInfo::with_name("NUMERIC")));
        assert!(QaiModel::compatible(&<i16 as Type<Postgres>>::type_info()));
        assert!(QaiModel::compatible(&<i32 as Type<Postgres>>::type_info()));
        assert!(QaiModel::compatible(&<i64 as Type<Postgres>>::type_info()));
        assert!(!QaiModel::compatible(&<bool as Type<Postgres>>::type_info()));
        assert!(!QaiModel::compatible(&<f64 as Type<Postgres>>::type_info()));
    }

    #[rstest]
    fn test_integer_column_value_fails_with_column_hint() {
        // Narrow integer columns are widened before reaching the decoder
        let value = SqlValue::Int64(i64::from(7_i32));
        assert_eq!(
            Qai::decode(&value).unwrap_err().to_string(),
            "unable to convert 7 of int64 to QAI, is the SQL column type set to varchar?"
        );
    }

    #[rstest]
    fn test_type_info_is_text() {
        assert_eq!(QaiModel::type_info().name(), "TEXT");
    }

    #[rstest]
    fn test_encode_writes_digit_string(qai_one_and_half: Qai) {
        let mut buf = PgArgumentBuffer::default();
        let is_null = QaiModel(qai_one_and_half).encode_by_ref(&mut buf).unwrap();
        assert!(matches!(is_null, IsNull::No));
        assert_eq!(buf.as_slice(), b"1500000000000000000");
    }

    #[rstest]
    fn test_encode_negative() {
        let mut buf = PgArgumentBuffer::default();
        QaiModel(Qai::new(-42)).encode_by_ref(&mut buf).unwrap();
        assert_eq!(buf.as_slice(), b"-42");
    }

    #[rstest]
    #[case(numeric_bytes(0, NUMERIC_POS, 0, &[]), "0")]
    #[case(numeric_bytes(4, NUMERIC_POS, 0, &[150]), "1500000000000000000")]
    #[case(numeric_bytes(0, NUMERIC_NEG, 0, &[42]), "-42")]
    #[case(numeric_bytes(0, NUMERIC_POS, 3, &[42]), "42")]
    #[case(numeric_bytes(1, NUMERIC_POS, 2, &[1, 2345, 0]), "12345")]
    #[case(numeric_bytes(2, NUMERIC_POS, 0, &[7]), "700000000")]
    fn test_numeric_to_sql_value(#[case] buf: Vec<u8>, #[case] expected: &str) {
        let sql_value = numeric_to_sql_value(&buf).unwrap();
        assert_eq!(sql_value, SqlValue::Text(Cow::Borrowed(expected)));
        assert_eq!(Qai::decode(&sql_value).unwrap().to_string(), expected);
    }

    #[rstest]
    #[case("123456789012345678901234567890123")]
    #[case("-100000000000000000000000000000000000000000000")]
    #[case("340282366920938463463374607431768211455000")]
    #[case("10000000000000000000000000000")]
    fn test_numeric_to_sql_value_beyond_28_digits(#[case] digits: &str) {
        let sql_value = numeric_to_sql_value(&integer_numeric_bytes(digits)).unwrap();
        assert_eq!(sql_value, SqlValue::Text(Cow::Borrowed(digits)));
        assert_eq!(Qai::decode(&sql_value).unwrap().to_string(), digits);
    }

    #[rstest]
    fn test_numeric_to_sql_value_fractional_fails() {
        // 1.5
        let buf = numeric_bytes(0, NUMERIC_POS, 1, &[1, 5000]);
        assert_eq!(
            numeric_to_sql_value(&buf).unwrap_err().to_string(),
            "unable to convert NUMERIC with scale 1 to QAI, value has a fractional part"
        );
    }

    #[rstest]
    fn test_numeric_to_sql_value_below_one_fails() {
        // 0.5
        let buf = numeric_bytes(-1, NUMERIC_POS, 1, &[5000]);
        assert!(numeric_to_sql_value(&buf).is_err());
    }

    #[rstest]
    #[case(NUMERIC_NAN, "unable to convert NUMERIC NaN to QAI")]
    #[case(NUMERIC_PINF, "unable to convert NUMERIC Infinity to QAI")]
    #[case(NUMERIC_NINF, "unable to convert NUMERIC -Infinity to QAI")]
    fn test_numeric_to_sql_value_special_fails(#[case] sign: u16, #[case] expected: &str) {
        let buf = numeric_bytes(0, sign, 0, &[]);
        assert_eq!(numeric_to_sql_value(&buf).unwrap_err().to_string(), expected);
    }

    #[rstest]
    #[case(vec![0, 1])]
    #[case(numeric_bytes(0, NUMERIC_POS, 0, &[1])[..9].to_vec())]
    #[case(numeric_bytes(0, NUMERIC_POS, 0, &[10_000]))]
    #[case(numeric_bytes(0, 0x1234, 0, &[1]))]
    fn test_numeric_to_sql_value_malformed_fails(#[case] buf: Vec<u8>) {
        assert!(numeric_to_sql_value(&buf).is_err());
    }

    #[rstest]
    fn test_numeric_value_decodes_as_qai() {
        let digits = "123456789012345678901234567890123";
        let sql_value = numeric_to_sql_value(&integer_numeric_bytes(digits)).unwrap();
        assert_eq!(
            Qai::decode(&sql_value).unwrap(),
            Qai::from_str_radix(digits, 10).unwrap()
        );
        assert!(matches!(
            Qai::decode(&SqlValue::Int64(0)),
            Err(QaiError::UnsupportedInteger { value: 0 })
        ));
    }

    #[rstest]
    fn test_model_conversions(qai_one_and_half: Qai) {
        let model = QaiModel::from(qai_one_and_half.clone());
        assert_eq!(model.0, qai_one_and_half);
        assert_eq!(Qai::from(model), qai_one_and_half);
    }
}
