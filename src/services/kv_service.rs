use std::sync::PoisonError;

use crate::state::kv::UserStore;

/// Store `value` under `user`, replacing any previous value.
pub fn set(store: &UserStore, user: String, value: String) {
    // A single insert never leaves the map half-written; poisoning is ignored.
    let mut map = store.write().unwrap_or_else(PoisonError::into_inner);
    map.insert(user, value);
}

/// Retrieve the value stored for `user`, if any.
pub fn get(store: &UserStore, user: &str) -> Option<String> {
    let map = store.read().unwrap_or_else(PoisonError::into_inner);
    map.get(user).cloned()
}
