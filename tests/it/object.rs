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

use bufjson::parse_value;
use bufjson::LinearMap;
use bufjson::Object;
use bufjson::Value;

#[test]
fn test_try_emplace_is_idempotent() {
    let mut map: LinearMap<String, i32> = LinearMap::new();
    let (slot, inserted) = map.try_emplace("a", || 1);
    assert!(inserted);
    *slot += 1;

    let (slot, inserted) = map.try_emplace("a", || panic!("value already present"));
    assert!(!inserted);
    assert_eq!(*slot, 2);
    assert_eq!(map.len(), 1);
}

#[test]
fn test_set_and_set_if_absent() {
    let mut obj = Object::new();
    assert_eq!(obj.set("name", "Joe"), None);
    assert!(!obj.set_if_absent("name", "Ann"));
    assert_eq!(obj["name"].as_str(), Some("Joe"));

    assert_eq!(obj.set("name", "Ann"), Some(Value::from("Joe")));
    assert_eq!(obj["name"].as_str(), Some("Ann"));
    assert!(obj.set_if_absent("age", 30));
    assert_eq!(obj.keys().collect::<Vec<_>>(), ["name", "age"]);
}

#[test]
fn test_object_accessors() {
    let value = parse_value(br#"{"id":7,"tags":["x"],"owner":null}"#).unwrap();
    let obj = value.as_object().unwrap();

    assert!(obj.contains_key("owner"));
    assert!(obj.contains_entry("id", &Value::from(7)));
    assert!(!obj.contains_entry("id", &Value::from(8)));
    assert!(!obj.contains_entry("name", &Value::Null));

    assert_eq!(obj.get("id"), Some(&Value::from(7)));
    assert_eq!(obj.get("name"), None);
    assert!(obj.get_or_null("name").is_null());
    assert_eq!(obj.get_cloned("tags"), Some(Value::array(["x"])));
    assert!(obj.get_cloned_or_null("name").is_null());

    let owned = obj.clone();
    assert_eq!(owned.clone().into_get("tags"), Some(Value::array(["x"])));
    assert!(owned.into_get_or_null("name").is_null());
}

#[test]
fn test_remove_keeps_order() {
    let mut obj: Object = [("a", 1), ("b", 2), ("c", 3)].into_iter().collect();
    assert_eq!(obj.remove("b"), Some(Value::from(2)));
    assert_eq!(obj.remove("b"), None);
    let rest: Vec<(&str, f64)> = obj
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_f64().unwrap()))
        .collect();
    assert_eq!(rest, [("a", 1.0), ("c", 3.0)]);
}

#[test]
fn test_get_or_insert_null() {
    let mut obj = Object::new();
    assert!(obj.get_or_insert_null("fresh").is_null());
    *obj.get_or_insert_null("fresh") = Value::from(true);
    assert_eq!(obj.len(), 1);
    assert_eq!(obj["fresh"], Value::Bool(true));
}

#[test]
fn test_objects_compare_by_content() {
    let a: Object = [("k", "v"), ("n", "m")].into_iter().collect();
    let b: Object = [("n", "m"), ("k", "v")].into_iter().collect();
    let c: Object = [("k", "v")].into_iter().collect();
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_ne!(c, a);
}
