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

use bufjson::keys;
use bufjson::parse_value;
use bufjson::Array;
use bufjson::Error;
use bufjson::JsonString;
use bufjson::Key;
use bufjson::KeyPath;
use bufjson::Null;
use bufjson::Object;
use bufjson::Value;
use bufjson::ValueKind;
use bufjson::NULL;

const PROFILE: &str = r#"{"info":["AiKatherine","KG/M","NB",20,1.71,false,null],"isAdmin":true,"links":{"youtube":"https://youtube.com/@katherine"}}"#;

fn profile() -> Value<'static> {
    parse_value(PROFILE.as_bytes()).unwrap()
}

#[test]
fn test_find_in_every_family() {
    let value = profile();
    let youtube = Value::from("https://youtube.com/@katherine");

    assert_eq!(value.find(&keys!["links", "youtube"]), Some(&youtube));
    assert_eq!(value.find_or_null(&keys!["links", "youtube"]), &youtube);
    assert_eq!(value.find_checked(&keys!["links", "youtube"]), Ok(&youtube));
    assert_eq!(value.find_cloned(&keys!["links", "youtube"]), Some(youtube.clone()));
    assert_eq!(value.find_cloned_or_null(&keys!["links", "youtube"]), youtube);
    assert_eq!(value.find_cloned_checked(&keys!["links", "youtube"]), Ok(youtube.clone()));
    assert_eq!(value.clone().into_find(&keys!["links", "youtube"]), Some(youtube.clone()));
    assert_eq!(value.clone().into_find_or_null(&keys!["links", "youtube"]), youtube);
    assert_eq!(value.clone().into_find_checked(&keys!["links", "youtube"]), Ok(youtube));

    // the last element of "info" is a null member, not a miss
    assert_eq!(value.find(&keys!["info", -1]), Some(&Value::Null));
    assert!(value.find_checked(&keys!["info", -1]).unwrap().is_null());
}

#[test]
fn test_missing_path_in_every_family() {
    let value = profile();
    let path = keys!["missing", "path"];
    let expected = Error::KeyNotFound {
        key: "missing".to_string(),
        path: KeyPath::default(),
    };

    assert_eq!(value.find(&path), None);
    assert!(std::ptr::eq(value.find_or_null(&path), &NULL));
    assert_eq!(value.find_checked(&path), Err(expected.clone()));

    assert_eq!(value.find_cloned(&path), None);
    assert_eq!(value.find_cloned_or_null(&path), Value::Null);
    assert_eq!(value.find_cloned_checked(&path), Err(expected.clone()));

    assert_eq!(value.clone().into_find(&path), None);
    assert_eq!(value.clone().into_find_or_null(&path), Value::Null);
    assert_eq!(value.into_find_checked(&path), Err(expected));
}

#[test]
fn test_checked_errors_name_the_failure() {
    let value = profile();

    let err = value.find_checked(&keys!["links", "twitter"]).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), r#"key "twitter" not found at {links}"#);

    let err = value.find_checked(&keys!["info", 7]).unwrap_err();
    assert_eq!(
        err,
        Error::IndexOutOfRange {
            index: 7,
            len: 7,
            path: KeyPath::new(vec![Key::from("info")]),
        }
    );

    let err = value.find_checked(&keys!["info", "name"]).unwrap_err();
    assert!(!err.is_not_found());
    assert_eq!(
        err,
        Error::WrongType {
            expected: ValueKind::Object,
            found: ValueKind::Array,
            path: KeyPath::new(vec![Key::from("info")]),
        }
    );

    let err = value.find_checked(&keys!["isAdmin", 0]).unwrap_err();
    assert_eq!(err.to_string(), "expected array, found boolean at {isAdmin}");
}

#[test]
fn test_negative_indexing() {
    let value = Value::array(["a", "b", "c", "d", "e"]);
    assert_eq!(value.get(-1), value.get(4));
    assert_eq!(value.get(-5), value.get(0));
    assert_eq!(value.get(-6), None);
    assert!(value.get_checked(-6).unwrap_err().is_not_found());
    assert_eq!(value.get_cloned_or_null(5), Value::Null);
    assert_eq!(value.clone().into_get(-2), Some(Value::from("d")));
    assert_eq!(value.into_get_checked(2), Ok(Value::from("c")));
}

#[test]
fn test_get_by_name_and_mutate() {
    let mut value = profile();
    assert_eq!(value.get("isAdmin"), Some(&Value::Bool(true)));
    assert_eq!(value.get_or_null("isUser"), &Value::Null);

    *value.get_mut("isAdmin").unwrap() = Value::Bool(false);
    *value.find_mut(&keys!["info", 3]).unwrap() = Value::from(21);
    assert_eq!(value["isAdmin"], Value::Bool(false));
    assert_eq!(value["info"][3].as_i64(), Some(21));

    let links = value.into_get_checked("links").unwrap();
    assert_eq!(links.get_cloned("youtube").unwrap().as_str(), Some("https://youtube.com/@katherine"));
}

#[test]
fn test_owned_keys_and_parsed_paths() {
    let value = profile();
    let name = String::from("links");
    assert!(value.get(&name).is_some());
    assert!(value.get(name).is_some());

    let path = bufjson::parse_key_path(b"{links, youtube}").unwrap();
    assert!(value.find(&path).is_some());
    let path: KeyPath = ["info", "-1"].into_iter().collect();
    // "-1" is a name here, not an index
    assert!(value.find(&path).is_none());
}

#[test]
fn test_search() {
    let value = parse_value(br#"[{"id":1,"tag":"a"},{"id":2,"tag":"b"},{"id":3,"tag":"b"}]"#).unwrap();
    let tag_b = |v: &Value| v["tag"].as_str() == Some("b");

    assert_eq!(value.search(tag_b).unwrap()["id"], Value::from(2));
    assert_eq!(value.search_cloned(tag_b).unwrap()["id"], Value::from(2));
    assert_eq!(value.search_cloned_checked(tag_b).unwrap()["id"], Value::from(2));
    assert!(value.search_or_null(|v| v["id"] == Value::from(9)).is_null());
    assert_eq!(value.search_cloned_or_null(|v| v.is_array()), Value::Null);
    assert_eq!(value.search_checked(|v| v.is_string()), Err(Error::NoMatch));
    assert_eq!(value.clone().into_search_or_null(tag_b)["id"], Value::from(2));
    assert_eq!(value.clone().into_search_checked(tag_b).unwrap()["id"], Value::from(2));

    let obj = value.get_cloned(0).unwrap();
    assert_eq!(obj.search(|_| true), None);
    assert_eq!(
        obj.search_checked(|_| true),
        Err(Error::WrongType {
            expected: ValueKind::Array,
            found: ValueKind::Object,
            path: KeyPath::default(),
        })
    );
}

#[test]
fn test_search_mut_updates_first_match() {
    let mut value = Value::array([1, 5, 10, 5]);
    *value.search_mut(|v| v.as_f64() == Some(5.0)).unwrap() = Value::from(6);
    assert_eq!(value, Value::array([1, 6, 10, 5]));
    assert!(value.search_mut(|v| v.is_null()).is_none());
}

#[test]
fn test_type_mismatch_never_coerces() {
    let mut value = Value::from(3);
    assert!(!value.is::<JsonString>());
    assert!(value.ensure::<JsonString>().is_none());
    assert!(value.ensure_mut::<JsonString>().is_none());
    assert_eq!(
        value.ensure_checked::<JsonString>().unwrap_err(),
        Error::WrongType {
            expected: ValueKind::String,
            found: ValueKind::Number,
            path: KeyPath::default(),
        }
    );
    assert!(value.clone().into_ensure::<JsonString>().is_none());
    assert!(value.clone().into_ensure_checked::<JsonString>().is_err());
    assert!(value.as_str().is_none());

    assert_eq!(value.ensure::<f64>(), Some(&3.0));
    assert!(Value::Null.is::<Null>());
    assert!(profile().is::<Object>());
    assert_eq!(profile().into_get("info").unwrap().into_ensure::<Array>().map(|a| a.len()), Some(7));
}

#[test]
fn test_string_mutation_detaches_from_buffer() {
    let mut value = profile();
    let s = value.find_mut(&keys!["info", 0]).unwrap();
    assert!(s.as_json_string().unwrap().is_borrowed());
    s.as_string_mut().unwrap().push_str("!!");
    assert!(s.as_json_string().unwrap().is_owned());
    assert_eq!(value["info"][0].as_str(), Some("AiKatherine!!"));
}
