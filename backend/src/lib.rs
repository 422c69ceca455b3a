//! Invoice dashboard backend: form actions, upstream data fetching, and the
//! REST surface between them.
//!
//! The crate is organized in three layers:
//! - `domain` holds the services: invoice write actions, dashboard read
//!   pipelines, credential-based login, and the validation and money
//!   arithmetic they share.
//! - `io` holds the edges: the upstream content-API client (`io::cms`) and
//!   the REST handlers (`io::rest`).
//! - `storage` holds the sqlx repositories behind the direct-SQL read paths.

pub mod config;
pub mod domain;
pub mod error;
pub mod io;
pub mod storage;
