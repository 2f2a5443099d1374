//! SQL schema for the Folio SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One serialised site document per storage key.
-- Writes replace the whole value; there is no history.
CREATE TABLE IF NOT EXISTS documents (
    storage_key TEXT PRIMARY KEY,
    value       TEXT NOT NULL,   -- document JSON
    updated_at  TEXT NOT NULL    -- RFC 3339 UTC
);

PRAGMA user_version = 1;
";
