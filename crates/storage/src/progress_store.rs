//! Namespaced progress persistence on top of a [`KeyValueStore`].
//!
//! The whole [`ProgressRecord`] lives as one JSON document under a single key.
//! Reads never fail: a missing key, unreadable backend or corrupt document all
//! degrade to defaults. Writes are best-effort: failures are logged and the
//! caller carries on with its in-memory state.

use std::sync::Arc;

use serde_json::{Map, Value};
use theory_core::model::{
    CircleProgress, Namespace, ProgressRecord, ProgressionProgress, ScalesProgress, Section,
};
use tracing::{debug, info, warn};

use crate::repository::KeyValueStore;

/// Well-known key the progress record is stored under.
pub const PROGRESS_KEY: &str = "musicMasterFlashcards";

#[derive(Clone)]
pub struct ProgressStore {
    backend: Arc<dyn KeyValueStore>,
    key: String,
}

impl ProgressStore {
    #[must_use]
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self {
            backend,
            key: PROGRESS_KEY.to_owned(),
        }
    }

    /// Store the record under a different key.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the full record, merged over defaults.
    #[must_use]
    pub fn load(&self) -> ProgressRecord {
        let raw = match self.backend.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return ProgressRecord::default(),
            Err(err) => {
                warn!(key = %self.key, error = %err, "failed to read progress; using defaults");
                return ProgressRecord::default();
            }
        };

        match parse_record(&raw) {
            Ok(record) => record,
            Err(err) => {
                warn!(key = %self.key, error = %err, "stored progress is corrupt; using defaults");
                ProgressRecord::default()
            }
        }
    }

    /// Serialize and write the record. Failures are logged, not returned.
    ///
    /// Fields in the stored document that this build does not know about are
    /// written back unchanged.
    pub fn save(&self, record: &ProgressRecord) {
        let fresh = match serde_json::to_value(record) {
            Ok(fresh) => fresh,
            Err(err) => {
                warn!(key = %self.key, error = %err, "failed to serialize progress");
                return;
            }
        };
        let document = match self.backend.get(&self.key) {
            Ok(Some(stored)) => carry_unknown_fields(&stored, fresh),
            _ => fresh,
        };
        let raw = document.to_string();
        if let Err(err) = self.backend.set(&self.key, &raw) {
            warn!(key = %self.key, error = %err, "failed to save progress");
        }
    }

    /// One namespace of the stored record, merged with its defaults.
    #[must_use]
    pub fn section<S: Section>(&self) -> S {
        self.load().section::<S>().clone()
    }

    /// Load, mutate one namespace in place, and write back.
    ///
    /// Returns the record as written.
    pub fn update<S: Section>(&self, apply: impl FnOnce(&mut S)) -> ProgressRecord {
        let mut record = self.load();
        apply(record.section_mut::<S>());
        debug!(namespace = %S::NAMESPACE, "progress updated");
        self.save(&record);
        record
    }

    /// Shallow-merge raw `fields` into `namespace` and write back.
    ///
    /// Unknown fields are ignored and `null` values leave the current value in
    /// place. If a field has the wrong type the namespace is left untouched and
    /// nothing is written. Returns the record as it now stands.
    pub fn update_namespace(
        &self,
        namespace: Namespace,
        fields: &Map<String, Value>,
    ) -> ProgressRecord {
        let mut record = self.load();
        if let Err(err) = merge_namespace(&mut record, namespace, fields) {
            warn!(%namespace, error = %err, "rejected progress update with mistyped fields");
            return record;
        }
        debug!(%namespace, fields = fields.len(), "progress namespace merged");
        self.save(&record);
        record
    }

    /// Restore one namespace to its defaults, leaving the others alone.
    pub fn reset_namespace(&self, namespace: Namespace) {
        let mut record = self.load();
        record.reset(namespace);
        info!(%namespace, "progress namespace reset");
        self.save(&record);
    }

    /// Remove the stored record entirely.
    pub fn reset_all(&self) {
        if let Err(err) = self.backend.remove(&self.key) {
            warn!(key = %self.key, error = %err, "failed to clear progress");
        } else {
            info!(key = %self.key, "all progress cleared");
        }
    }
}

fn parse_record(raw: &str) -> Result<ProgressRecord, serde_json::Error> {
    let value: Value = serde_json::from_str(raw)?;
    let Value::Object(stored) = value else {
        return Err(serde::de::Error::custom("progress record is not a JSON object"));
    };

    let mut record = ProgressRecord::default();
    for namespace in Namespace::ALL {
        let Some(Value::Object(fields)) = stored.get(namespace.key()) else {
            continue;
        };
        if let Err(err) = merge_namespace(&mut record, namespace, fields) {
            warn!(%namespace, error = %err, "stored namespace is corrupt; using defaults");
        }
    }
    Ok(record)
}

/// Overlay `fresh` on the stored document, one level deep, so unknown
/// top-level keys and unknown fields inside each namespace survive.
fn carry_unknown_fields(stored: &str, fresh: Value) -> Value {
    let Ok(Value::Object(mut document)) = serde_json::from_str::<Value>(stored) else {
        return fresh;
    };
    let fresh = match fresh {
        Value::Object(fresh) => fresh,
        other => return other,
    };
    for (key, value) in fresh {
        match value {
            Value::Object(section) => match document.get_mut(&key) {
                Some(Value::Object(existing)) => existing.extend(section),
                _ => {
                    document.insert(key, Value::Object(section));
                }
            },
            other => {
                document.insert(key, other);
            }
        }
    }
    Value::Object(document)
}

fn merge_namespace(
    record: &mut ProgressRecord,
    namespace: Namespace,
    fields: &Map<String, Value>,
) -> Result<(), serde_json::Error> {
    match namespace {
        Namespace::Scales => merge_section::<ScalesProgress>(record, fields),
        Namespace::CircleOfFifths => merge_section::<CircleProgress>(record, fields),
        Namespace::ScaleProgression => merge_section::<ProgressionProgress>(record, fields),
    }
}

fn merge_section<S: Section>(
    record: &mut ProgressRecord,
    fields: &Map<String, Value>,
) -> Result<(), serde_json::Error> {
    let mut merged = match serde_json::to_value(record.section::<S>())? {
        Value::Object(current) => current,
        _ => Map::new(),
    };
    for (name, value) in fields {
        if !value.is_null() {
            merged.insert(name.clone(), value.clone());
        }
    }
    *record.section_mut::<S>() = serde_json::from_value(Value::Object(merged))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryStore;
    use serde_json::json;
    use theory_core::model::QuestionId;

    fn store() -> (InMemoryStore, ProgressStore) {
        let backend = InMemoryStore::new();
        let progress = ProgressStore::new(Arc::new(backend.clone()));
        (backend, progress)
    }

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn first_load_returns_defaults() {
        let (_, progress) = store();
        assert_eq!(progress.load(), ProgressRecord::default());
    }

    #[test]
    fn corrupt_text_loads_full_defaults() {
        let (backend, progress) = store();
        backend.set(PROGRESS_KEY, "{not json at all").unwrap();
        assert_eq!(progress.load(), ProgressRecord::default());

        backend.set(PROGRESS_KEY, "[1, 2, 3]").unwrap();
        assert_eq!(progress.load(), ProgressRecord::default());
    }

    #[test]
    fn partial_shape_is_merged_over_defaults() {
        let (backend, progress) = store();
        backend
            .set(
                PROGRESS_KEY,
                r#"{ "circleOfFifths": { "score": 3, "futureField": "x" }, "scales": null }"#,
            )
            .unwrap();

        let record = progress.load();
        assert_eq!(record.circle_of_fifths.score, 3);
        assert_eq!(record.circle_of_fifths.total_attempts, 0);
        assert_eq!(record.scales, ScalesProgress::default());
    }

    #[test]
    fn mistyped_namespace_falls_back_without_touching_others() {
        let (backend, progress) = store();
        backend
            .set(
                PROGRESS_KEY,
                r#"{ "scales": { "currentIndex": "two" }, "circleOfFifths": { "score": 5 } }"#,
            )
            .unwrap();

        let record = progress.load();
        assert_eq!(record.scales, ScalesProgress::default());
        assert_eq!(record.circle_of_fifths.score, 5);
    }

    #[test]
    fn update_namespace_round_trips_and_leaves_others_unchanged() {
        let (_, progress) = store();
        progress.update::<CircleProgress>(|circle| circle.score = 4);

        progress.update_namespace(Namespace::Scales, &fields(json!({ "currentIndex": 2 })));

        let record = progress.load();
        assert_eq!(record.scales.current_index, 2);
        assert!(!record.scales.shuffle_mode);
        assert_eq!(record.circle_of_fifths.score, 4);
        assert_eq!(record.scale_progression, ProgressionProgress::default());
    }

    #[test]
    fn update_namespace_rejects_mistyped_fields() {
        let (_, progress) = store();
        progress.update_namespace(Namespace::Scales, &fields(json!({ "currentIndex": 1 })));

        let record =
            progress.update_namespace(Namespace::Scales, &fields(json!({ "shuffleMode": "yes" })));

        assert_eq!(record.scales.current_index, 1);
        assert_eq!(progress.load().scales.current_index, 1);
    }

    #[test]
    fn typed_update_persists_section() {
        let (_, progress) = store();
        progress.update::<ProgressionProgress>(|quiz| {
            quiz.completed_questions.push(QuestionId::new("q1"));
            quiz.correct_answers = 1;
        });

        let quiz = progress.section::<ProgressionProgress>();
        assert_eq!(quiz.completed_questions, vec![QuestionId::new("q1")]);
        assert_eq!(quiz.correct_answers, 1);
    }

    #[test]
    fn persisted_json_uses_camel_case_namespaces() {
        let (backend, progress) = store();
        progress.update::<ScalesProgress>(|scales| scales.shuffle_mode = true);

        let raw = backend.get(PROGRESS_KEY).unwrap().unwrap();
        let value: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["scales"]["shuffleMode"], json!(true));
        assert!(value.get("circleOfFifths").is_some());
        assert!(value.get("scaleProgression").is_some());
    }

    #[test]
    fn reset_namespace_and_reset_all() {
        let (backend, progress) = store();
        progress.update::<ScalesProgress>(|scales| scales.current_index = 5);
        progress.update::<CircleProgress>(|circle| circle.score = 9);

        progress.reset_namespace(Namespace::CircleOfFifths);
        let record = progress.load();
        assert_eq!(record.scales.current_index, 5);
        assert_eq!(record.circle_of_fifths.score, 0);

        progress.reset_all();
        assert_eq!(backend.get(PROGRESS_KEY).unwrap(), None);
        assert_eq!(progress.load(), ProgressRecord::default());
    }

    #[test]
    fn failed_write_is_swallowed() {
        let backend = InMemoryStore::new().with_quota(16);
        let progress = ProgressStore::new(Arc::new(backend.clone()));

        let record = progress.update::<CircleProgress>(|circle| circle.score = 1);

        assert_eq!(record.circle_of_fifths.score, 1);
        assert_eq!(backend.get(PROGRESS_KEY).unwrap(), None);
        assert_eq!(progress.load(), ProgressRecord::default());
    }

    #[test]
    fn custom_key_isolates_records() {
        let backend = InMemoryStore::new();
        let first = ProgressStore::new(Arc::new(backend.clone()));
        let second = ProgressStore::new(Arc::new(backend)).with_key("other");

        first.update::<CircleProgress>(|circle| circle.score = 2);
        assert_eq!(second.load().circle_of_fifths.score, 0);
        assert_eq!(second.key(), "other");
    }

    #[test]
    fn unknown_stored_fields_survive_a_write() {
        let (backend, progress) = store();
        backend
            .set(
                PROGRESS_KEY,
                r#"{ "scales": { "currentIndex": 1, "futureField": "x" }, "extra": [1] }"#,
            )
            .unwrap();

        progress.update::<CircleProgress>(|circle| circle.score = 2);
        progress.update::<ScalesProgress>(|scales| scales.current_index = 3);

        let raw = backend.get(PROGRESS_KEY).unwrap().unwrap();
        let value: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["scales"]["futureField"], json!("x"));
        assert_eq!(value["scales"]["currentIndex"], json!(3));
        assert_eq!(value["extra"], json!([1]));
        assert_eq!(value["circleOfFifths"]["score"], json!(2));
        assert_eq!(progress.load().scales.current_index, 3);
    }

    #[test]
    fn corrupt_stored_document_is_replaced_on_write() {
        let (backend, progress) = store();
        backend.set(PROGRESS_KEY, "{broken").unwrap();

        progress.update::<CircleProgress>(|circle| circle.score = 1);

        let raw = backend.get(PROGRESS_KEY).unwrap().unwrap();
        let value: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["circleOfFifths"]["score"], json!(1));
    }
}
