//! Small utility helpers used across modules.

/// Log-safe truncation for free-text answers.
/// Cuts on a char boundary so multi-byte input never panics.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.len() <= max {
    return s.to_string();
  }
  let mut end = max;
  while !s.is_char_boundary(end) {
    end -= 1;
  }
  format!("{}… ({} bytes total)", &s[..end], s.len())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn short_strings_pass_through() {
    assert_eq!(trunc_for_log("abc", 10), "abc");
  }

  #[test]
  fn long_strings_are_cut_on_char_boundary() {
    let s = "éééé";
    assert_eq!(trunc_for_log(s, 3), "é… (8 bytes total)");
  }
}
