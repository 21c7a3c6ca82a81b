pub mod client;
pub mod filter;
pub mod history;
pub mod pagination;
pub mod service;

pub use client::GitLabClient;
pub use service::CommitService;
