use serde::{Deserialize, Serialize};

use crate::accessor::Prefs;
use crate::store::MemoryStore;

mod observing;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct Profile {
    name: String,
    age: u32,
}

fn fresh_prefs() -> Prefs<MemoryStore> {
    Prefs::new(MemoryStore::new())
}
