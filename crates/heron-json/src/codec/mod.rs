//! JSON encoding and decoding under [`JsonSerializerOptions`].
//!
//! `serde_json` does the actual work; the options are layered on top:
//!
//! - naming policy: a serializer adapter renames struct fields on output and
//!   a deserializer adapter around `serde_json::Deserializer` maps incoming
//!   keys back to field names
//! - case-insensitive matching: handled by the same deserializer adapter
//! - escaping and indentation: a custom `serde_json` formatter
//! - trailing commas: removed from the input before parsing

mod de;
mod format;
mod lenient;
mod ser;

use std::borrow::Cow;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::options::JsonSerializerOptions;

use self::de::{KeyMatching, MatchingDeserializer};
use self::format::OptionsFormatter;
use self::ser::Renamed;

/// Encodes a value as JSON bytes.
///
/// # Example
///
/// ```rust
/// use heron_json::{encode, JsonSerializerOptions};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct User {
///     user_name: String,
/// }
///
/// let user = User { user_name: "ada".into() };
/// let bytes = encode(&user, &JsonSerializerOptions::web()).unwrap();
/// assert_eq!(bytes, br#"{"userName":"ada"}"#);
/// ```
///
/// # Errors
///
/// Returns an error if the value's `Serialize` implementation fails, for
/// example on a map with non-string keys.
pub fn encode<T>(value: &T, options: &JsonSerializerOptions) -> serde_json::Result<Vec<u8>>
where
    T: ?Sized + Serialize,
{
    let mut buf = Vec::with_capacity(128);
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, OptionsFormatter::new(options));

    match options.property_naming_policy {
        Some(policy) => Renamed::new(value, policy).serialize(&mut serializer)?,
        None => value.serialize(&mut serializer)?,
    }

    Ok(buf)
}

/// Decodes JSON bytes into a value.
///
/// # Example
///
/// ```rust
/// use heron_json::{decode, JsonSerializerOptions};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct User {
///     user_name: String,
/// }
///
/// let user: User = decode(br#"{"USERNAME":"ada"}"#, &JsonSerializerOptions::web()).unwrap();
/// assert_eq!(user.user_name, "ada");
/// ```
///
/// # Errors
///
/// Returns an error if the input is not valid JSON or does not match `T`.
pub fn decode<T>(bytes: &[u8], options: &JsonSerializerOptions) -> serde_json::Result<T>
where
    T: DeserializeOwned,
{
    let bytes = if options.allow_trailing_commas {
        lenient::strip_trailing_commas(bytes)
    } else {
        Cow::Borrowed(bytes)
    };

    if !options.remaps_keys() {
        return serde_json::from_slice(&bytes);
    }

    let mut deserializer = serde_json::Deserializer::from_slice(&bytes);
    let value = T::deserialize(MatchingDeserializer::new(
        &mut deserializer,
        KeyMatching::from(options),
    ))?;
    deserializer.end()?;

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Escaping;
    use crate::NamingPolicy;
    use serde_json::Value;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Order {
        order_id: u64,
        line_items: Vec<LineItem>,
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct LineItem {
        product_name: String,
        unit_price: f64,
    }

    fn sample() -> Order {
        Order {
            order_id: 7,
            line_items: vec![LineItem {
                product_name: "<tea>".into(),
                unit_price: 2.5,
            }],
        }
    }

    #[test]
    fn test_encode_web_options() {
        let bytes = encode(&sample(), &JsonSerializerOptions::web()).unwrap();

        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r#"{"orderId":7,"lineItems":[{"productName":"<tea>","unitPrice":2.5}]}"#
        );
    }

    #[test]
    fn test_encode_general_options() {
        let bytes = encode(&sample(), &JsonSerializerOptions::default()).unwrap();

        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r#"{"order_id":7,"line_items":[{"product_name":"\u003Ctea\u003E","unit_price":2.5}]}"#
        );
    }

    #[test]
    fn test_encode_indented() {
        let options = JsonSerializerOptions::web().with_write_indented(true);
        let bytes = encode(&[1], &options).unwrap();

        assert_eq!(bytes, b"[\n  1\n]");
    }

    #[test]
    fn test_encode_scalars() {
        let options = JsonSerializerOptions::web();

        assert_eq!(encode(&1, &options).unwrap(), b"1");
        assert_eq!(encode(&Option::<u8>::None, &options).unwrap(), b"null");
        assert_eq!(encode(&Value::Null, &options).unwrap(), b"null");
    }

    #[test]
    fn test_round_trip_with_policy() {
        let options = JsonSerializerOptions::default().with_naming_policy(NamingPolicy::CamelCase);
        let bytes = encode(&sample(), &options).unwrap();
        let decoded: Order = decode(&bytes, &options).unwrap();

        assert_eq!(decoded, sample());
    }

    #[test]
    fn test_decode_without_remapping() {
        let options = JsonSerializerOptions::default().with_escaping(Escaping::UnsafeRelaxed);
        let decoded: Order = decode(
            br#"{"order_id":7,"line_items":[{"product_name":"<tea>","unit_price":2.5}]}"#,
            &options,
        )
        .unwrap();

        assert_eq!(decoded, sample());
    }

    #[test]
    fn test_decode_trailing_commas() {
        let strict = JsonSerializerOptions::web();
        let lenient = strict.with_trailing_commas(true);

        assert!(decode::<Vec<i32>>(b"[1,2,]", &strict).is_err());
        assert_eq!(decode::<Vec<i32>>(b"[1,2,]", &lenient).unwrap(), vec![1, 2]);
        assert!(decode::<Vec<i32>>(b"[1,,]", &lenient).is_err());
    }

    #[test]
    fn test_decode_large_integer_with_web_options() {
        let max = decode::<u128>(
            b"340282366920938463463374607431768211455",
            &JsonSerializerOptions::web(),
        )
        .unwrap();

        assert_eq!(max, u128::MAX);
    }

    #[test]
    fn test_decode_errors_keep_position() {
        let err = decode::<Order>(
            b"{\n  \"orderId\": \"seven\",\n  \"lineItems\": []\n}",
            &JsonSerializerOptions::web(),
        )
        .unwrap_err();

        assert!(err.is_data());
        assert_eq!(err.line(), 2);
    }

    #[test]
    fn test_decode_rejects_trailing_data() {
        let err = decode::<Vec<i32>>(b"[1] [2]", &JsonSerializerOptions::web()).unwrap_err();
        assert!(err.is_syntax());
    }

    #[test]
    fn test_flatten_and_tagged_round_trip() {
        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        struct Audit {
            created_by: String,
        }

        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        struct Document {
            doc_id: u32,
            #[serde(flatten)]
            audit: Audit,
        }

        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        #[serde(tag = "event_kind")]
        enum Change {
            Moved { from_city: String },
        }

        let options = JsonSerializerOptions::web();
        let document = Document {
            doc_id: 1,
            audit: Audit {
                created_by: "ada".into(),
            },
        };
        let change = Change::Moved {
            from_city: "Oslo".into(),
        };

        let bytes = encode(&document, &options).unwrap();
        assert_eq!(bytes, br#"{"docId":1,"createdBy":"ada"}"#);
        assert_eq!(decode::<Document>(&bytes, &options).unwrap(), document);

        let bytes = encode(&change, &options).unwrap();
        assert_eq!(bytes, br#"{"eventKind":"Moved","fromCity":"Oslo"}"#);
        assert_eq!(decode::<Change>(&bytes, &options).unwrap(), change);
    }

    #[test]
    fn test_decode_empty_input() {
        let err = decode::<i32>(b"", &JsonSerializerOptions::web()).unwrap_err();
        assert!(err.is_eof());
    }

    #[test]
    fn test_decode_untyped_value() {
        let value: Value =
            decode(br#"{"Any_Key":[1,true,null]}"#, &JsonSerializerOptions::web()).unwrap();
        assert_eq!(value["Any_Key"][1], Value::Bool(true));
    }
}
