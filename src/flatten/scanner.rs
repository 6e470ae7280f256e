//! Module reference scanner
//!
//! Extracts inter-module reference paths from compiled module source. A
//! reference is the double-quoted argument of a `require("...")` marker. The
//! scanner is a small state machine rather than a pattern match: it walks the
//! text marker by marker, consumes the quoted argument byte-for-byte (honoring
//! `\"` escapes), and only accepts arguments terminated by the closing `")`.
//! Minified output with several references on one line is handled without
//! over-matching across neighboring arguments.

/// Opening marker of an inter-module reference
const MARKER: &str = "require(\"";

/// A reference found in module source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleRef {
  /// The path argument, exactly as written between the quotes
  pub path: String,
  /// Byte offset of the first path byte
  pub start: usize,
  /// Byte offset one past the last path byte
  pub end: usize,
}

/// Scan module source for references
///
/// Returns references in source order. An argument with no closing `")` before
/// end of input yields nothing.
pub fn scan_references(source: &str) -> Vec<ModuleRef> {
  let mut refs = Vec::new();
  let bytes = source.as_bytes();
  let mut pos = 0;

  while let Some(found) = source[pos..].find(MARKER) {
    let arg_start = pos + found + MARKER.len();

    match scan_argument(bytes, arg_start) {
      Some(arg_end) => {
        refs.push(ModuleRef {
          path: source[arg_start..arg_end].to_string(),
          start: arg_start,
          end: arg_end,
        });
        // Resume after the closing `")`
        pos = arg_end + 2;
      }
      None => {
        // Malformed or unterminated argument; skip past the marker
        pos = arg_start;
      }
    }
  }

  refs
}

/// Consume a quoted argument starting at `start`, returning the offset of the
/// closing quote if the argument is terminated by `")`.
fn scan_argument(bytes: &[u8], start: usize) -> Option<usize> {
  let mut i = start;

  while i < bytes.len() {
    match bytes[i] {
      b'\\' => i += 2,
      b'"' => {
        // Only a quote immediately followed by `)` closes a reference
        if bytes.get(i + 1) == Some(&b')') {
          return Some(i);
        }
        return None;
      }
      _ => i += 1,
    }
  }

  None
}
