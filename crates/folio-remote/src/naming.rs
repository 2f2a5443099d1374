//! Filename handling for imported images.
//!
//! Remote folders hold camera or export filenames like `concert_01.jpg`.
//! These helpers decide which files are images, how they sort, and what
//! display title they get:
//! - `concert_01.jpg` → "Concert 01"
//! - `back-stage-2.JPEG` → "Back Stage 2"
//! - `IMG_0042.png` → "IMG 0042"

use std::{cmp::Ordering, iter::Peekable, str::Chars};

const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

/// Whether `name` has one of the accepted image extensions (any case).
pub fn is_image_file(name: &str) -> bool {
  name
    .rsplit_once('.')
    .is_some_and(|(_, ext)| IMAGE_EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)))
}

/// Strip the final extension.
fn stem(name: &str) -> &str {
  match name.rsplit_once('.') {
    Some((stem, ext)) if !ext.is_empty() && !ext.contains('/') => stem,
    _ => name,
  }
}

/// Display title for a filename: extension removed, `-` and `_` turned into
/// spaces, and the first letter of every word upper-cased. Letters already
/// in upper case stay that way.
pub fn format_title(filename: &str) -> String {
  let mut title = String::with_capacity(filename.len());
  let mut in_word = false;
  for c in stem(filename).chars() {
    let c = if c == '-' || c == '_' { ' ' } else { c };
    let is_word = c.is_alphanumeric();
    if is_word && !in_word {
      title.extend(c.to_uppercase());
    } else {
      title.push(c);
    }
    in_word = is_word;
  }
  title
}

// ─── Natural ordering ────────────────────────────────────────────────────────

enum Chunk {
  Digits(String),
  Text(String),
}

fn next_chunk(chars: &mut Peekable<Chars<'_>>) -> Option<Chunk> {
  let first = *chars.peek()?;
  let digits = first.is_ascii_digit();
  let mut chunk = String::new();
  while let Some(&c) = chars.peek() {
    if c.is_ascii_digit() != digits {
      break;
    }
    chunk.push(c);
    chars.next();
  }
  Some(if digits { Chunk::Digits(chunk) } else { Chunk::Text(chunk) })
}

fn cmp_digits(a: &str, b: &str) -> Ordering {
  let a_trim = a.trim_start_matches('0');
  let b_trim = b.trim_start_matches('0');
  a_trim
    .len()
    .cmp(&b_trim.len())
    .then_with(|| a_trim.cmp(b_trim))
    .then_with(|| a.len().cmp(&b.len()))
}

/// Compare filenames so that `photo-2` sorts before `photo-10`. Runs of
/// digits compare numerically, everything else case-insensitively.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
  let mut left = a.chars().peekable();
  let mut right = b.chars().peekable();
  loop {
    let ordering = match (next_chunk(&mut left), next_chunk(&mut right)) {
      (None, None) => return a.cmp(b),
      (None, Some(_)) => return Ordering::Less,
      (Some(_), None) => return Ordering::Greater,
      (Some(Chunk::Digits(x)), Some(Chunk::Digits(y))) => cmp_digits(&x, &y),
      (Some(Chunk::Digits(_)), Some(Chunk::Text(_))) => Ordering::Less,
      (Some(Chunk::Text(_)), Some(Chunk::Digits(_))) => Ordering::Greater,
      (Some(Chunk::Text(x)), Some(Chunk::Text(y))) => {
        x.to_lowercase().cmp(&y.to_lowercase())
      }
    };
    if ordering != Ordering::Equal {
      return ordering;
    }
  }
}
