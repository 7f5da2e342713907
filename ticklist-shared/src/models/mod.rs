/// Database models
///
/// - `user`: user accounts and credential checks
/// - `task`: to-do tasks and their ownership-scoped queries

pub mod task;
pub mod user;
