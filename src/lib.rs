//! # Academia
//!
//! Backend of a locally launched academy management app. Serves the web
//! frontend and generates pending charges ("cargos") for active
//! enrollments ("matriculas") per billing period.
//!
//! ## Architecture
//!
//! - **domain**: entities, money helpers and repository traits
//! - **application**: charge generation service
//! - **infrastructure**: SeaORM entities, migrations and repositories (SQLite)
//! - **interfaces**: REST API with Swagger documentation and SPA serving
//! - **server**: runtime lifecycle (connect, migrate, serve, shut down)

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

pub use application::{ChargeGenerationService, GenerationReport, SkipReason};
pub use infrastructure::database::repositories::SeaOrmRepositoryProvider;
pub use infrastructure::{init_database, DatabaseConfig};
pub use interfaces::http::create_api_router;
