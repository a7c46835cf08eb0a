//! SQL schema for the Rolodex SQLite store.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- AUTOINCREMENT keeps ids of deleted rows from being handed out again.
CREATE TABLE IF NOT EXISTS contacts (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name   TEXT NOT NULL,
    last_name    TEXT NOT NULL,
    email        TEXT NOT NULL,
    phone        TEXT NOT NULL,
    address      TEXT,
    city         TEXT,
    postal_code  TEXT,
    created_at   TEXT NOT NULL,   -- RFC 3339 UTC, fixed width; store-assigned
    updated_at   TEXT NOT NULL,
    CONSTRAINT contacts_email_key UNIQUE (email),
    CONSTRAINT contacts_phone_key UNIQUE (phone),
    CHECK (created_at <= updated_at)
);

CREATE INDEX IF NOT EXISTS contacts_city_idx ON contacts(city);

PRAGMA user_version = 1;
";

/// Column list shared by every `SELECT` / `RETURNING` clause; order matches
/// [`RawContact::from_row`](crate::encode::RawContact::from_row).
pub const COLUMNS: &str = "id, first_name, last_name, email, phone, address, city, \
                           postal_code, created_at, updated_at";
