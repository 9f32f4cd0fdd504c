// Module tree shared by the binary and the integration tests.

pub mod config;
pub mod corpus;
pub mod event;
pub mod session;
pub mod ui;
