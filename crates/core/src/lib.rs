pub mod error;
pub mod event;
pub mod history;
pub mod state;

pub use error::{Result, SysmonError};
pub use event::Message;
pub use history::{History, HistorySet, DEFAULT_HISTORY_LEN};
pub use state::{AppState, Snapshot};
