use crate::value::Value;

/// Walks `root` along `path` and returns the terminal value, or
/// `Undefined` the moment an intermediate lookup comes up empty. Never
/// errors; callers decide whether an unresolved destination is fatal.
///
/// Segments may themselves be dot-delimited compound strings, so
/// `resolve(o, &["a.b.c"])`, `resolve(o, &["a", "b", "c"])` and
/// `resolve(o, &["a.b", "c"])` are all equivalent. The expansion works
/// on an owned segment list; the caller's slice is untouched.
pub fn resolve(root: &Value, path: &[&str]) -> Value {
    let segments = expand_segments(path);
    let mut current = root.clone();

    for segment in &segments {
        let next = current.member_str(segment);
        if next.is_undefined() {
            return Value::Undefined;
        }
        current = next;
    }

    current
}

fn expand_segments(path: &[&str]) -> Vec<String> {
    let mut segments = Vec::with_capacity(path.len());
    for part in path {
        if part.contains('.') {
            segments.extend(part.split('.').map(str::to_string));
        } else {
            segments.push((*part).to_string());
        }
    }
    segments
}
