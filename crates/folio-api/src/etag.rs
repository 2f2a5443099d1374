//! ETag computation for site documents.
//!
//! The tag is a SHA-256 over the document's compact JSON. Serialisation is
//! deterministic (struct field order, `BTreeMap` labels), so equal documents
//! always get equal tags.

use folio_core::document::SiteDocument;
use sha2::{Digest, Sha256};

/// Quoted strong ETag for `document`.
pub fn compute_etag(document: &SiteDocument) -> folio_core::Result<String> {
  let json = document.to_json()?;
  let hash = Sha256::digest(json.as_bytes());
  Ok(format!("\"{}\"", hex::encode(hash)))
}

fn strip_etag(tag: &str) -> &str {
  let tag = tag.trim();
  let tag = tag.strip_prefix("W/").unwrap_or(tag);
  tag.trim_matches('"')
}

/// Whether an `If-None-Match` header value names `etag`. Accepts `*`, lists,
/// weak tags, and unquoted tags.
pub fn if_none_match(header: &str, etag: &str) -> bool {
  header
    .split(',')
    .any(|candidate| candidate.trim() == "*" || strip_etag(candidate) == strip_etag(etag))
}

#[cfg(test)]
mod tests {
  use folio_core::defaults::default_document;

  use super::*;

  #[test]
  fn equal_documents_share_a_tag() {
    let a = compute_etag(&default_document()).unwrap();
    let b = compute_etag(&default_document()).unwrap();
    assert_eq!(a, b);
    assert!(a.starts_with('"') && a.ends_with('"'));
  }

  #[test]
  fn any_change_changes_the_tag() {
    let mut doc = default_document();
    let before = compute_etag(&doc).unwrap();
    doc.labels.insert("nav.home".into(), "Start".into());
    assert_ne!(before, compute_etag(&doc).unwrap());
  }

  #[test]
  fn header_matching() {
    let tag = "\"abc\"";
    assert!(if_none_match("\"abc\"", tag));
    assert!(if_none_match("abc", tag));
    assert!(if_none_match("W/\"abc\"", tag));
    assert!(if_none_match("\"x\", \"abc\"", tag));
    assert!(if_none_match("*", tag));
    assert!(!if_none_match("\"abcd\"", tag));
  }
}
