//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod file_session_store;
mod in_memory_identity_directory;
mod in_memory_session_store;
mod notification_sinks;
mod role_grants;

pub use file_session_store::FileSessionStore;
pub use in_memory_identity_directory::InMemoryIdentityDirectory;
pub use in_memory_session_store::InMemorySessionStore;
pub use notification_sinks::{
    BufferedNotificationSink, DEFAULT_NOTIFICATION_CAPACITY, TracingNotificationSink,
};
pub use role_grants::load_role_registry;
