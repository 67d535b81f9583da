use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Per-chat memory of the last joke offered for translation.
///
/// One mutex guards the whole map, so a chat's entry is always replaced as a
/// single unit. Entries are never evicted; the map grows with the number of
/// chats, which is an accepted limitation.
#[derive(Clone, Default)]
pub struct JokeMemory {
    inner: Arc<Mutex<HashMap<i64, String>>>,
}

impl JokeMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, chat_id: i64) -> Option<String> {
        self.inner
            .lock()
            .expect("joke memory lock poisoned")
            .get(&chat_id)
            .cloned()
    }

    pub fn set(&self, chat_id: i64, text: String) {
        self.inner
            .lock()
            .expect("joke memory lock poisoned")
            .insert(chat_id, text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remembers_last_joke_per_chat() {
        let memory = JokeMemory::new();
        assert_eq!(memory.get(1), None);

        memory.set(1, "first".into());
        memory.set(2, "other chat".into());
        assert_eq!(memory.get(1).as_deref(), Some("first"));
        assert_eq!(memory.get(2).as_deref(), Some("other chat"));

        memory.set(1, "second".into());
        assert_eq!(memory.get(1).as_deref(), Some("second"));
    }

    #[test]
    fn reading_does_not_invalidate() {
        let memory = JokeMemory::new();
        memory.set(7, "keep me".into());
        let _ = memory.get(7);
        assert_eq!(memory.get(7).as_deref(), Some("keep me"));
    }
}
