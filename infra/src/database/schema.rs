//! Table definitions ensured at startup

/// Registered identities; `email` is the unique lookup key and compares
/// byte-for-byte, like the in-memory store
pub const CREATE_USERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id CHAR(36) NOT NULL PRIMARY KEY,
        email VARCHAR(255) COLLATE utf8mb4_bin NOT NULL,
        name VARCHAR(255) NOT NULL,
        password_hash VARCHAR(255) NOT NULL,
        registered_at DATETIME(6) NOT NULL,
        UNIQUE KEY uk_users_email (email)
    ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4
"#;

/// Revocation ledger; raw tokens are indexed by their SHA-256 hex digest
pub const CREATE_REVOKED_TOKENS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS revoked_tokens (
        id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
        token_hash CHAR(64) NOT NULL,
        token TEXT NOT NULL,
        revoked_at DATETIME(6) NOT NULL,
        expires_at DATETIME(6) NULL,
        KEY idx_revoked_tokens_hash (token_hash),
        KEY idx_revoked_tokens_expires_at (expires_at)
    ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4
"#;

/// All statements, in creation order
pub const SCHEMA: &[&str] = &[CREATE_USERS_TABLE, CREATE_REVOKED_TOKENS_TABLE];
