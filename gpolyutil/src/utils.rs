use std::path::Path;

/// Adds commas every third digit.
pub fn prettyprint_usize(x: usize) -> String {
    let num = format!("{}", x);
    let mut result = String::new();
    let mut i = num.len();
    for c in num.chars() {
        result.push(c);
        i -= 1;
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
    }
    result
}

/// The file name without directories or extension. "foo/bar.json" becomes "bar".
pub fn basename<I: AsRef<str>>(path: I) -> String {
    Path::new(path.as_ref())
        .file_stem()
        .map(|x| x.to_string_lossy().to_string())
        .unwrap_or_default()
}
