//! # Configuration
//!
//! Settings are layered, later sources winning:
//! built-in defaults, `config/default.toml`, `config/{RUN_ENV}.toml`,
//! `APP__SECTION__KEY` variables, then the plain `SERVER_HOST`, `SERVER_PORT`,
//! `DATABASE_URL`, `JWT_SECRET`, `SNOWFLAKE_MACHINE_ID` and `STORAGE_BACKEND`
//! overrides. A `.env` file is read first when present.
//!
//! ```rust,ignore
//! use storefront_api::config::{Settings, StorageBackend};
//!
//! let settings = Settings::load()?;
//! if settings.storage.backend == StorageBackend::Memory {
//!     tracing::warn!("running without a database");
//! }
//! ```

mod settings;

pub use settings::*;
