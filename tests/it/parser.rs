// Copyright 2023 Datafuse Labs.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use bufjson::parse_buffer;
use bufjson::parse_value;
use bufjson::parse_value_borrowed;
use bufjson::parse_with_options;
use bufjson::Buffer;
use bufjson::Error;
use bufjson::Object;
use bufjson::ParseErrorCode;
use bufjson::ParseOptions;
use bufjson::StrSlice;
use bufjson::Value;

const PROFILE: &str = r#"{"info":["AiKatherine","KG/M","NB",20,1.71,false,null],"isAdmin":true,"links":{"youtube":"https://youtube.com/@katherine"}}"#;

#[test]
fn test_parse_profile() {
    let value = parse_value(PROFILE.as_bytes()).unwrap();
    let info = value["info"].as_array().unwrap();
    assert_eq!(info.len(), 7);
    assert_eq!(info[0].as_str(), Some("AiKatherine"));
    assert_eq!(info[3].as_i64(), Some(20));
    assert_eq!(info[4].as_f64(), Some(1.71));
    assert_eq!(info[5], Value::Bool(false));
    assert!(info[6].is_null());
    assert_eq!(value["isAdmin"].as_bool(), Some(true));
    assert_eq!(value.to_string(), PROFILE);
}

#[test]
fn test_escapes() {
    let value = parse_value(br#""\n\t\\\"\u00e9""#).unwrap();
    let s = value.as_str().unwrap();
    assert_eq!(s.chars().collect::<Vec<_>>(), ['\n', '\t', '\\', '"', 'é']);

    let value = parse_value(br#""\uD83D\uDE00""#).unwrap();
    let s = value.as_str().unwrap();
    assert_eq!(s.chars().count(), 1);
    assert_eq!(s.len(), 4);
    assert_eq!(s, "\u{1F600}");
}

#[test]
fn test_escape_errors() {
    let cases: &[(&[u8], ParseErrorCode)] = &[
        (br#""\x""#, ParseErrorCode::InvalidEscaped(b'x')),
        (br#""\u12G4""#, ParseErrorCode::InvalidHex(b'G')),
        (br#""\u12""#, ParseErrorCode::UnexpectedEndOfHexEscape),
        (br#""\uD83D""#, ParseErrorCode::InvalidLoneLeadingSurrogateInHexEscape(0xD83D)),
        (br#""\uDE00""#, ParseErrorCode::InvalidSurrogateInHexEscape(0xDE00)),
    ];
    for (text, expected) in cases {
        match parse_value(text) {
            Err(Error::Syntax { code, .. }) => assert_eq!(&code, expected),
            other => panic!("unexpected result {other:?}"),
        }
    }
}

#[test]
fn test_raw_control_characters_are_kept() {
    let value = parse_value(b"\"a\x01b\tc\"").unwrap();
    assert_eq!(value.as_str(), Some("a\u{1}b\tc"));
}

#[test]
fn test_numbers() {
    let cases = [
        ("0", 0.0),
        ("-0", 0.0),
        ("42", 42.0),
        ("-17", -17.0),
        ("1.5e3", 1500.0),
        ("1E-2", 0.01),
        ("2.5E+1", 25.0),
        ("9007199254740993", 9007199254740992.0),
    ];
    for (text, expected) in cases {
        let value = parse_value(text.as_bytes()).unwrap();
        assert_eq!(value, Value::Number(expected), "parsing {text}");
    }

    for text in ["1e", "1..2", "--1", "1-", "1.2.3", "+1", ".5", "1e400", "-1e400"] {
        assert!(parse_value(text.as_bytes()).is_err(), "accepted {text}");
    }

    let err = parse_value(b"[1, 1e400]").unwrap_err();
    assert_eq!(
        err,
        Error::Syntax {
            code: ParseErrorCode::InvalidNumberValue,
            pos: 4,
            found: Some(b'1'),
        }
    );
}

#[test]
fn test_copy_outlives_input_and_original() {
    let text = PROFILE.as_bytes().to_vec();
    let value = parse_value(&text).unwrap();
    drop(text);

    let copy = value.clone();
    let before = copy["links"]["youtube"].as_str().unwrap().to_string();
    drop(value);
    assert_eq!(copy["links"]["youtube"].as_str(), Some(before.as_str()));
    assert_eq!(copy["info"][0].as_str(), Some("AiKatherine"));
}

#[test]
fn test_shared_buffer_handles() {
    let buffer = Buffer::from(r#"{"a":"x","b":["y","z"],"c":"e\"sc"}"#);
    assert_eq!(buffer.handle_count(), 1);

    let value = parse_buffer(&buffer).unwrap();
    // "x", "y" and "z" share the buffer, the escaped string owns its copy
    assert_eq!(buffer.handle_count(), 4);
    let slice: &StrSlice = value["a"].as_json_string().unwrap().as_borrowed().unwrap();
    assert!(slice.buffer().unwrap().ptr_eq(&buffer));
    assert!(value["c"].as_json_string().unwrap().is_owned());

    let copy = value.clone();
    assert_eq!(buffer.handle_count(), 7);
    drop(value);
    drop(copy);
    assert_eq!(buffer.handle_count(), 1);
}

#[test]
fn test_borrowed_mode_points_into_input() {
    let text = String::from(r#"{"name":"Joe"}"#);
    let value = parse_value_borrowed(text.as_bytes()).unwrap();
    let name = value["name"].as_str().unwrap();
    assert_eq!(name, "Joe");
    let offset = name.as_ptr() as usize - text.as_ptr() as usize;
    assert_eq!(offset, 9);

    let detached = value.into_static();
    drop(text);
    assert_eq!(detached["name"].as_str(), Some("Joe"));
}

#[test]
fn test_duplicate_keys_last_wins_in_first_position() {
    let value = parse_value(br#"{"a":1,"b":2,"a":3}"#).unwrap();
    let obj = value.as_object().unwrap();
    assert_eq!(obj.len(), 2);
    assert_eq!(obj.keys().collect::<Vec<_>>(), ["a", "b"]);
    assert_eq!(obj["a"], Value::from(3));
    assert_eq!(value.to_string(), r#"{"a":3,"b":2}"#);
}

#[test]
fn test_object_equality_ignores_order() {
    let a = parse_value(br#"{"x":1,"y":[true,null]}"#).unwrap();
    let b = parse_value(br#"{ "y" : [ true , null ] , "x" : 1 }"#).unwrap();
    assert_eq!(a, b);
    let c = parse_value(br#"{"x":1,"y":[null,true]}"#).unwrap();
    assert_ne!(a, c);

    let mut built = Object::new();
    built.set("y", Value::array([Value::Bool(true), Value::Null]));
    built.set("x", 1);
    assert_eq!(a, Value::from(built));
}

#[test]
fn test_trailing_characters() {
    let err = parse_value(br#"{"a":1} x"#).unwrap_err();
    assert_eq!(err.position(), Some(8));
    assert_eq!(err.to_string(), "trailing characters, pos 8");

    assert!(parse_value(b"[1]  \r\n").is_ok());

    let options = ParseOptions::default().allow_trailing_characters(true);
    let text = br#"[1,2] {"next":true}"#;
    let (value, end) = parse_with_options(text, &options).unwrap();
    assert_eq!(value, Value::array([1, 2]));
    assert_eq!(end, 5);
    let (next, _) = parse_with_options(&text[end..], &options).unwrap();
    assert_eq!(next["next"], Value::Bool(true));
}

#[test]
fn test_depth_limit() {
    let nested = format!("{}{}", "[".repeat(64), "]".repeat(64));
    assert!(parse_value(nested.as_bytes()).is_ok());

    let options = ParseOptions::default().max_depth(Some(63));
    match parse_with_options(nested.as_bytes(), &options) {
        Err(Error::Syntax { code, pos, .. }) => {
            assert_eq!(code, ParseErrorCode::RecursionLimitExceeded);
            assert_eq!(pos, 63);
        }
        other => panic!("unexpected result {other:?}"),
    }
    let options = options.max_depth(Some(64));
    assert!(parse_with_options(nested.as_bytes(), &options).is_ok());
}

#[test]
fn test_borrowed_options() {
    let text = br#"{"k":"v"}"#.to_vec();
    let options = ParseOptions::default().copy_input(false);
    let (value, end) = parse_with_options(&text, &options).unwrap();
    assert_eq!(end, text.len());
    assert!(value["k"]
        .as_json_string()
        .unwrap()
        .as_borrowed()
        .unwrap()
        .buffer()
        .is_none());
}

#[test]
fn test_from_str() {
    let value: Value = r#" [ "a" , { } , [ ] ] "#.parse().unwrap();
    assert_eq!(value.to_string(), r#"["a",{},[]]"#);
    assert!("[".parse::<Value>().is_err());
}

#[test]
fn test_built_value_round_trip() {
    let value = Value::object([
        ("name", Value::from("line1\nline2 \"quoted\" \u{1} é")),
        ("values", Value::array([Value::from(-3), Value::from(0.25), Value::from(1e300)])),
        ("nested", Value::object([("empty", Value::array(Vec::<Value>::new()))])),
        ("flag", Value::from(false)),
        ("nothing", Value::Null),
    ]);
    let text = value.to_string();
    assert_eq!(parse_value(text.as_bytes()).unwrap(), value);
    assert_eq!(
        serde_json::from_str::<serde_json::Value>(&text).unwrap(),
        serde_json::Value::from(&value)
    );
}
