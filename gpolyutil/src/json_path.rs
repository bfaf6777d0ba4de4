use serde_json::Value;

/// Walks a `/`-separated path like `a/b/1/d` through nested objects and arrays. Numeric segments
/// index into arrays. Returns `None` as soon as any segment doesn't exist, including trying to
/// descend into a string or number.
pub fn get_item<'a>(doc: &'a Value, item_path: &str) -> Option<&'a Value> {
    let mut current = doc;
    for key in item_path.split('/') {
        current = match current {
            Value::Object(map) => map.get(key)?,
            Value::Array(list) => list.get(key.parse::<usize>().ok()?)?,
            _ => {
                return None;
            }
        };
    }
    Some(current)
}

/// Like `get_item`, but only succeeds if the value is a string.
pub fn get_string<'a>(doc: &'a Value, item_path: &str) -> Option<&'a str> {
    get_item(doc, item_path)?.as_str()
}

/// Like `get_item`, but interprets the value as an integer. Routing services aren't consistent
/// about this, so numbers (truncated) and numeric strings both work.
pub fn get_number(doc: &Value, item_path: &str) -> Option<i64> {
    match get_item(doc, item_path)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|x| x.trunc() as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|x| x.trunc() as i64))
        }
        _ => None,
    }
}
