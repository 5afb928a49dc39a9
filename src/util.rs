//! Small utility helpers used across modules.

/// Very small and safe string templating.
/// Replaces occurrences of `{key}` in the template with provided values.
/// Values are inserted verbatim and never re-scanned, so text containing braces is safe.
pub fn fill_template(tpl: &str, pairs: &[(&str, &str)]) -> String {
  let mut out = String::with_capacity(tpl.len());
  let mut rest = tpl;
  'scan: while let Some(open) = rest.find('{') {
    for (k, v) in pairs {
      let needle = format!("{{{}}}", k);
      if rest[open..].starts_with(&needle) {
        out.push_str(&rest[..open]);
        out.push_str(v);
        rest = &rest[open + needle.len()..];
        continue 'scan;
      }
    }
    out.push_str(&rest[..=open]);
    rest = &rest[open + 1..];
  }
  out.push_str(rest);
  out
}

/// First `max` characters of `s`, for log fields.
pub fn preview(s: &str, max: usize) -> String {
  s.chars().take(max).collect()
}

/// Lowercased extension of `filename` (text after the last dot), if any.
pub fn file_extension(filename: &str) -> Option<String> {
  let (_, ext) = filename.rsplit_once('.')?;
  Some(ext.to_lowercase())
}
