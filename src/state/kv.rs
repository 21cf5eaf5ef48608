use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Internal HashMap type: user name -> stored value.
pub type InnerMap = HashMap<String, String>;

/// Shared user store used across the app.
pub type UserStore = Arc<RwLock<InnerMap>>;

/// Create a new, empty store.
pub fn new_store() -> UserStore {
    Arc::new(RwLock::new(HashMap::new()))
}
