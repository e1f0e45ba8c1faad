/// Applied in order on every start; each step must be idempotent.
pub const MIGRATIONS: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS assets (
        seq             INTEGER PRIMARY KEY AUTOINCREMENT,
        id              TEXT NOT NULL UNIQUE,
        image_data      BLOB,
        thumbnail_data  BLOB,
        source_uri      TEXT,
        created_at      INTEGER NOT NULL,
        is_uploaded     INTEGER NOT NULL DEFAULT 0 CHECK (is_uploaded IN (0, 1))
    );",
    "CREATE INDEX IF NOT EXISTS idx_assets_created_at ON assets(created_at DESC, seq DESC);",
];
