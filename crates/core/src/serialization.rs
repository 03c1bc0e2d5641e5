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

//! Common serialization traits and functions.

use std::{fmt::Display, marker::PhantomData, str::FromStr};

use bytes::Bytes;
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{Unexpected, Visitor},
};

/// Represents types which are serializable for JSON and `MsgPack` specifications.
pub trait Serializable: Serialize + for<'de> Deserialize<'de> {
    /// Deserialize an object from JSON encoded bytes.
    ///
    /// # Errors
    ///
    /// Returns serialization errors.
    fn from_json_bytes(data: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(data)
    }

    /// Deserialize an object from `MsgPack` encoded bytes.
    ///
    /// # Errors
    ///
    /// Returns serialization errors.
    fn from_msgpack_bytes(data: &[u8]) -> Result<Self, rmp_serde::decode::Error> {
        rmp_serde::from_slice(data)
    }

    /// Serialize an object to JSON encoded bytes.
    ///
    /// # Errors
    ///
    /// Returns serialization errors.
    fn as_json_bytes(&self) -> Result<Bytes, serde_json::Error> {
        serde_json::to_vec(self).map(Bytes::from)
    }

    /// Serialize an object to `MsgPack` encoded bytes.
    ///
    /// # Errors
    ///
    /// Returns serialization errors.
    fn as_msgpack_bytes(&self) -> Result<Bytes, rmp_serde::encode::Error> {
        rmp_serde::to_vec_named(self).map(Bytes::from)
    }
}

struct FromStrVisitor<T>(PhantomData<T>);

impl<T> Visitor<'_> for FromStrVisitor<T>
where
    T: FromStr,
    T::Err: Display,
{
    type Value = T;

    fn expecting(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("a string")
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        T::from_str(value).map_err(|_| E::invalid_value(Unexpected::Str(value), &self))
    }

    fn visit_bytes<E>(self, value: &[u8]) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        let s = std::str::from_utf8(value)
            .map_err(|_| E::invalid_value(Unexpected::Bytes(value), &self))?;
        self.visit_str(s)
    }
}

/// Serialize the value as its `Display` string.
///
/// # Errors
///
/// Returns serialization errors.
pub fn serialize_to_str<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Display,
    S: Serializer,
{
    serializer.collect_str(value)
}

/// Deserialize the value from a string with its `FromStr` implementation.
///
/// # Errors
///
/// Returns serialization errors.
pub fn deserialize_from_str<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: FromStr,
    T::Err: Display,
    D: Deserializer<'de>,
{
    deserializer.deserialize_str(FromStrVisitor(PhantomData))
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use rstest::*;
    use serde::{Deserialize, Serialize};

    use super::{Serializable, deserialize_from_str, serialize_to_str};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    pub struct TestStruct {
        #[serde(
            serialize_with = "serialize_to_str",
            deserialize_with = "deserialize_from_str"
        )]
        pub value: i64,
    }

    impl Serializable for TestStruct {}

    #[rstest]
    #[case(r#"{"value":"42"}"#, 42)]
    #[case(r#"{"value":"-7"}"#, -7)]
    fn test_deserialize_from_str(#[case] json_str: &str, #[case] expected: i64) {
        let test_struct: TestStruct = serde_json::from_str(json_str).unwrap();
        assert_eq!(test_struct.value, expected);
    }

    #[rstest]
    #[case(r#"{"value":42}"#)]
    #[case(r#"{"value":"4x2"}"#)]
    fn test_deserialize_from_str_invalid(#[case] json_str: &str) {
        let result: Result<TestStruct, _> = serde_json::from_str(json_str);
        assert!(result.is_err());
    }

    #[rstest]
    fn test_serialize_to_str() {
        let test_struct = TestStruct { value: -42 };
        let json = serde_json::to_string(&test_struct).unwrap();
        assert_eq!(json, r#"{"value":"-42"}"#);
    }

    #[rstest]
    fn test_json_bytes_roundtrip() {
        let test_struct = TestStruct { value: 1_500 };
        let bytes = test_struct.as_json_bytes().unwrap();
        let result = TestStruct::from_json_bytes(&bytes).unwrap();
        assert_eq!(result, test_struct);
    }

    #[rstest]
    fn test_msgpack_bytes_roundtrip() {
        let test_struct = TestStruct { value: i64::MIN };
        let bytes = test_struct.as_msgpack_bytes().unwrap();
        let result = TestStruct::from_msgpack_bytes(&bytes).unwrap();
        assert_eq!(result, test_struct);
    }
}
