//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod session;
pub mod transaction;
pub mod user;

pub use session::SessionRepository;
pub use transaction::{TransactionFilter, TransactionRepository};
pub use user::{UserChanges, UserError, UserRepository};
