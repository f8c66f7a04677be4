//! Library side of the `leaddesk` binary: settings, logging and the session
//! that ties the lead store, the upload error log and the filters together.

pub mod config;
pub mod logging;
pub mod session;
