//! Users Domain
//!
//! Registration, listing and deletion of users. Creating a user publishes
//! one welcome [`email::NotificationMessage`] through a [`UserEventPublisher`].
//!
//! ```text
//! Handlers  → HTTP endpoints under /api/user
//! Service   → validation, persist-then-publish
//! Repository / Publisher → storage and bus (trait + implementations)
//! ```
//!
//! ```rust,no_run
//! use domain_users::{handlers, InMemoryEventPublisher, InMemoryUserRepository, UserService};
//!
//! let service = UserService::new(InMemoryUserRepository::new(), InMemoryEventPublisher::new());
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod events;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{UserError, UserResult};
pub use events::{InMemoryEventPublisher, UserEventPublisher};
pub use models::{CreateUser, User, UserResponse};
pub use postgres::PgUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;
