use std::fmt::{self, Display, Formatter};
use std::num::ParseIntError;
use std::str::FromStr;

use serde_derive::{Deserialize, Serialize};

use ordered_collect::codec::{binary, text};
use ordered_collect::{CodecError, KeyKind, OrderedMap, OrderedSet, TextCodec, TextKey};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Point {
    x: i32,
    y: i32,
}
impl Display for Point {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{{{} {}}}", self.x, self.y)
    }
}

/// A grid cell, keyed as `row/column`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
struct Cell {
    row: u32,
    column: u32,
}
impl Display for Cell {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.row, self.column)
    }
}
#[derive(Debug)]
enum ParseCellError {
    MissingSeparator,
    Number(ParseIntError),
}
impl Display for ParseCellError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match *self {
            ParseCellError::MissingSeparator => f.write_str("missing separator"),
            ParseCellError::Number(ref cause) => write!(f, "{}", cause),
        }
    }
}
impl FromStr for Cell {
    type Err = ParseCellError;

    fn from_str(s: &str) -> Result<Cell, ParseCellError> {
        let separator = s.find('/').ok_or(ParseCellError::MissingSeparator)?;
        let row = s[..separator].parse().map_err(ParseCellError::Number)?;
        let column = s[separator + 1..].parse().map_err(ParseCellError::Number)?;
        Ok(Cell { row, column })
    }
}
ordered_collect::text_key_via_str!(Cell);

fn points() -> OrderedMap<String, Point> {
    let mut map = OrderedMap::new();
    map.insert("p1".to_owned(), Point { x: 1, y: 2 });
    map.insert("p2".to_owned(), Point { x: 2, y: 4 });
    map.insert("p3".to_owned(), Point { x: 3, y: 6 });
    map.insert("p1".to_owned(), Point { x: 0, y: 0 });
    map
}

#[test]
fn order_survives_mixed_operations() {
    let mut map = OrderedMap::new();
    for (round, key) in ["e", "b", "d", "a", "c"].iter().enumerate() {
        map.insert(*key, round);
    }
    map.remove("d");
    map.insert("b", 100);
    map.insert("d", 200);
    assert_eq!(map.keys(), vec!["e", "b", "a", "c", "d"]);
    assert_eq!(map.values(), vec![0, 100, 3, 4, 200]);
    assert_eq!(map.len(), map.keys().len());
    assert_eq!(map.len(), map.key_values().len());
}

#[test]
fn reinsertion_is_idempotent() {
    let mut map = points();
    let before = map.clone();
    assert_eq!(map.insert("p2".to_owned(), Point { x: 2, y: 4 }), Some(Point { x: 2, y: 4 }));
    assert_eq!(map, before);
    let mut set = OrderedSet::from_elements(vec![1, 2, 3]);
    assert!(!set.insert(2));
    assert_eq!(set.elements(), vec![1, 2, 3]);
}

#[test]
fn points_scenario() {
    let map = points();
    assert_eq!(map.to_string(), "map{p1:{0 0} p2:{2 4} p3:{3 6}}");
    let encoded = map.encode_text().unwrap();
    assert_eq!(encoded, r#"{"p1":{"x":0,"y":0},"p2":{"x":2,"y":4},"p3":{"x":3,"y":6}}"#);
    let decoded: OrderedMap<String, Point> = text::from_str(&encoded).unwrap();
    assert_eq!(decoded, map);
}

#[test]
fn languages_scenario() {
    let mut set = OrderedSet::new();
    assert!(set.insert("C++".to_owned()));
    assert!(set.insert("Java".to_owned()));
    assert!(set.insert("Go".to_owned()));
    assert!(!set.insert("Java".to_owned()));
    assert_eq!(set.to_string(), "set{C++ Java Go}");
    assert!(set.remove("Java"));
    assert!(!set.contains("Java"));
    assert_eq!(set.elements(), vec!["C++".to_owned(), "Go".to_owned()]);
    let mut decoded: OrderedSet<String> = OrderedSet::new();
    decoded.decode_text(&set.encode_text().unwrap()).unwrap();
    assert_eq!(decoded, set);
}

#[test]
fn integer_key_scenario() {
    let map: OrderedMap<u32, u32> = text::from_str(r#"{"1":10,"2":20}"#).unwrap();
    assert_eq!(map.key_values(), vec![(1, 10), (2, 20)]);
    assert_eq!(map.encode_text().unwrap(), r#"{"1":10,"2":20}"#);
    assert_eq!(<u32 as TextKey>::KIND, KeyKind::Integer);
}

#[test]
fn unterminated_array_scenario() {
    let mut set: OrderedSet<String> = OrderedSet::new();
    match set.decode_text(r#"["foo""#) {
        Err(ref error) if error.is_malformed() => {}
        other => panic!("Unexpected result: {:?}", other),
    }
}

#[test]
fn custom_keys() {
    let mut board = OrderedMap::new();
    board.insert(Cell { row: 2, column: 7 }, 'x');
    board.insert(Cell { row: 0, column: 0 }, 'o');
    let encoded = board.encode_text().unwrap();
    assert_eq!(encoded, r#"{"2/7":"x","0/0":"o"}"#);
    let decoded: OrderedMap<Cell, char> = text::from_str(&encoded).unwrap();
    assert_eq!(decoded, board);
    match text::from_str::<OrderedMap<Cell, char>>(r#"{"2/7":"x","center":"o"}"#) {
        Err(CodecError::InvalidKeyType(cause)) => {
            assert_eq!(cause.kind, KeyKind::TextConvertible);
            assert_eq!(cause.text, "center");
        }
        other => panic!("Unexpected result: {:?}", other),
    }
}

#[test]
fn binary_round_trips() {
    let map = points();
    let decoded: OrderedMap<String, Point> = binary::decode(&binary::encode(&map).unwrap()).unwrap();
    assert_eq!(decoded, map);
    let set = OrderedSet::from_elements(vec!['z', 'a', 'q']);
    let decoded: OrderedSet<char> = binary::decode(&binary::encode(&set).unwrap()).unwrap();
    assert_eq!(decoded.elements(), vec!['z', 'a', 'q']);
}

#[test]
fn empty_round_trips() {
    let map: OrderedMap<String, u8> = OrderedMap::new();
    assert_eq!(map.encode_text().unwrap(), "{}");
    assert!(text::from_str::<OrderedMap<String, u8>>("{}").unwrap().is_empty());
    let decoded: OrderedMap<String, u8> = binary::decode(&binary::encode(&map).unwrap()).unwrap();
    assert!(decoded.is_empty());
    let set: OrderedSet<u8> = text::from_str("[]").unwrap();
    assert!(set.is_empty());
}
