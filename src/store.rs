//! In-memory record store.
//!
//! An insertion-ordered list of records behind a single async `RwLock`.
//! Reads clone out snapshots; every mutation holds the write lock for its
//! full check-then-act sequence, so concurrent creates cannot both pass
//! the uniqueness check.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::RecordError;

/// An entity held in a [`Store`].
pub trait Record:
    Clone + Default + Serialize + DeserializeOwned + Send + Sync + 'static
{
    fn id(&self) -> &str;

    fn set_id(&mut self, id: String);

    /// Checks required fields before the record is accepted.
    fn validate(&self) -> Result<(), RecordError> {
        Ok(())
    }
}

/// Ordered, process-lifetime collection of records. Identifiers are unique
/// for records that entered through [`Store::create`]; seed data is trusted.
#[derive(Debug)]
pub struct Store<R> {
    records: RwLock<Vec<R>>,
}

impl<R: Record> Store<R> {
    pub fn new() -> Self {
        Self::seeded(Vec::new())
    }

    pub fn seeded(records: impl IntoIterator<Item = R>) -> Self {
        Self { records: RwLock::new(records.into_iter().collect()) }
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Every record, in insertion order.
    pub async fn list(&self) -> Vec<R> {
        self.records.read().await.clone()
    }

    /// The first record whose identifier equals `id`.
    pub async fn get(&self, id: &str) -> Result<R, RecordError> {
        self.records.read().await
            .iter()
            .find(|r| r.id() == id)
            .cloned()
            .ok_or_else(|| RecordError::NotFound(id.to_owned()))
    }

    /// Validates and appends `record`, returning the full list afterwards.
    pub async fn create(&self, record: R) -> Result<Vec<R>, RecordError> {
        record.validate()?;
        let mut records = self.records.write().await;
        if records.iter().any(|r| r.id() == record.id()) {
            return Err(RecordError::Conflict(record.id().to_owned()));
        }
        debug!(id = record.id(), "record created");
        records.push(record);
        Ok(records.clone())
    }

    /// Like [`Store::create`], but assigns the next numeric identifier:
    /// one past the largest numeric id present, or `"1"` when there is none.
    pub async fn create_with_next_id(&self, mut record: R) -> Result<Vec<R>, RecordError> {
        record.validate()?;
        let mut records = self.records.write().await;
        let next = records.iter()
            .filter_map(|r| r.id().parse::<u64>().ok())
            .max()
            .map_or(1, |max| max + 1);
        record.set_id(next.to_string());
        debug!(id = record.id(), "record created");
        records.push(record);
        Ok(records.clone())
    }

    /// Replaces the first record whose identifier equals `id`.
    ///
    /// The replacement always carries `id`, whatever it held before.
    pub async fn update(&self, id: &str, mut record: R) -> Result<R, RecordError> {
        record.set_id(id.to_owned());
        record.validate()?;
        let mut records = self.records.write().await;
        let slot = records.iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| RecordError::NotFound(id.to_owned()))?;
        *slot = record.clone();
        debug!(id, "record updated");
        Ok(record)
    }

    /// Removes the first record whose identifier equals `id`, keeping the
    /// order of the rest. Absent ids are a no-op. Returns the full list.
    pub async fn remove(&self, id: &str) -> Vec<R> {
        let mut records = self.records.write().await;
        if let Some(pos) = records.iter().position(|r| r.id() == id) {
            records.remove(pos);
            debug!(id, "record removed");
        }
        records.clone()
    }
}

impl<R: Record> Default for Store<R> {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    struct Note {
        id: String,
        text: String,
    }

    impl Record for Note {
        fn id(&self) -> &str { &self.id }
        fn set_id(&mut self, id: String) { self.id = id; }
        fn validate(&self) -> Result<(), RecordError> {
            if self.text.is_empty() {
                return Err(RecordError::InvalidInput("text is required".into()));
            }
            Ok(())
        }
    }

    fn note(id: &str, text: &str) -> Note {
        Note { id: id.into(), text: text.into() }
    }

    fn ids(records: &[Note]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[tokio::test]
    async fn get_returns_first_match() {
        let store = Store::seeded([note("1", "a"), note("2", "b"), note("2", "c")]);
        assert_eq!(store.get("2").await.unwrap(), note("2", "b"));
        assert_eq!(store.get("9").await, Err(RecordError::NotFound("9".into())));
    }

    #[tokio::test]
    async fn create_appends_and_rejects_duplicates() {
        let store = Store::seeded([note("1", "a")]);
        let all = store.create(note("x", "b")).await.unwrap();
        assert_eq!(ids(&all), ["1", "x"]);

        let err = store.create(note("x", "again")).await.unwrap_err();
        assert_eq!(err, RecordError::Conflict("x".into()));
        assert_eq!(store.len().await, 2);

        let err = store.create(note("y", "")).await.unwrap_err();
        assert!(matches!(err, RecordError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn next_id_skips_past_the_largest_numeric_id() {
        let store = Store::new();
        let all = store.create_with_next_id(note("", "a")).await.unwrap();
        assert_eq!(ids(&all), ["1"]);

        let store = Store::seeded([note("3", "a"), note("abc", "b"), note("1", "c")]);
        let all = store.create_with_next_id(note("ignored", "d")).await.unwrap();
        assert_eq!(all.last().unwrap(), &note("4", "d"));
    }

    #[tokio::test]
    async fn remove_drops_only_the_first_match() {
        let store = Store::seeded([note("1", "a"), note("2", "b"), note("3", "c"), note("2", "d")]);
        let all = store.remove("2").await;
        assert_eq!(ids(&all), ["1", "3", "2"]);
        assert_eq!(store.get("2").await.unwrap().text, "d");
    }

    #[tokio::test]
    async fn remove_of_missing_id_leaves_store_untouched() {
        let store = Store::seeded([note("1", "a"), note("2", "b")]);
        let before = store.list().await;
        assert_eq!(store.remove("7").await, before);
        assert_eq!(store.list().await, before);
    }

    #[tokio::test]
    async fn update_targets_identity_not_position() {
        let store = Store::seeded([note("1", "a"), note("2", "b"), note("3", "c")]);
        store.remove("1").await;

        // "3" now sits at index 1; a positional update would hit the wrong slot.
        let updated = store.update("3", note("whatever", "z")).await.unwrap();
        assert_eq!(updated, note("3", "z"));
        assert_eq!(store.list().await, vec![note("2", "b"), note("3", "z")]);

        let err = store.update("9", note("", "z")).await.unwrap_err();
        assert_eq!(err, RecordError::NotFound("9".into()));
    }
}
