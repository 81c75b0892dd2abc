//! SQL access, one module per table.
//!
//! Functions take a bare connection so callers decide the transaction they
//! run in; nothing here begins or commits.

pub mod board;
pub mod card;
pub mod comment;
pub mod list;
pub mod tag;
pub mod user;
