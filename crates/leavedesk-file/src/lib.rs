//! leavedesk-file - Filesystem-backed session store.
//!
//! [`FileSessionStore`] keeps the token pair in a small JSON file so a
//! session survives process restarts.

mod store;

pub use store::{FileSessionStore, SESSION_FILE_NAME};
