//! Engine operations.
//!
//! Each public function here is one unit of work: it opens a transaction on
//! the pool, threads it through the query functions in [`crate::db`], and
//! commits only if every step succeeded.
//! - `teams`: team directory (create, roster, deactivate, stats)
//! - `users`: user registry (activity flag, review queue)
//! - `assignment`: reviewer selection on PR creation and reassignment
//! - `pull_requests`: PR lifecycle (merge, read)

pub mod assignment;
pub mod pull_requests;
pub mod teams;
pub mod users;

#[cfg(test)]
pub(crate) mod test_support;
