//! Data transfer objects (DTOs) for API requests and responses.
//!
//! These structs are serialized to JSON for API consumers.
//! - `commit`: Commit, PaginatedCommits, TextExport, CommitQuery
//! - `user`: User, LoginForm, Token, AuthStatus

pub mod commit;
pub mod user;

pub use commit::*;
pub use user::*;
