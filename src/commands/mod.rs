pub mod chat;
pub mod reconcile;
