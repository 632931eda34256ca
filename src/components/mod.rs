pub mod chart;
pub mod chat;
pub mod detail;
pub mod navbar;
pub mod network;
pub mod search;
