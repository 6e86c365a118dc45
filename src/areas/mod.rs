//! Session state
//!
//! - `history_log`: Revision events read from JSON and fed to the graph builder
//! - `review_session`: Built history graph plus the output the commands write to

pub mod history_log;
pub mod review_session;
