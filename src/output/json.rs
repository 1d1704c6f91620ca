use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

/// 4-space indented JSON, the on-disk format of the report files.
pub fn to_pretty_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(String::from_utf8(buf).expect("serde_json writes utf-8"))
}
