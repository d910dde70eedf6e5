//! The four resources (journal, todo, affirmation, gratitude) share one
//! save/get/history shape and differ only in which fields they carry and
//! what an empty save means. [`ResourceService`] captures the shared logic;
//! the [`ResourceProfile`] constants below are the four configurations.

use chrono::{NaiveDate, Utc};
use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};
use crate::store::{Fields, RecordStore};

/// What `save` does when the content field is empty or absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyPolicy {
    /// Upsert anyway. A journal day may hold only stickers or images.
    AllowEmpty,
    /// Remove any existing record and report "deleted".
    Delete,
    /// Refuse the save with a validation error; any prior record stays.
    Reject,
}

/// Value used for a payload field the caller left out.
#[derive(Debug, Clone, Copy)]
pub enum FieldDefault {
    Text,
    List,
}

impl FieldDefault {
    fn value(self) -> Value {
        match self {
            FieldDefault::Text => Value::String(String::new()),
            FieldDefault::List => Value::Array(Vec::new()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub default: FieldDefault,
}

/// Per-resource configuration: collection name, carried fields, and the
/// empty-save policy keyed off `content_field`.
#[derive(Debug)]
pub struct ResourceProfile {
    pub collection: &'static str,
    pub fields: &'static [FieldSpec],
    pub content_field: &'static str,
    pub on_empty: EmptyPolicy,
    pub stamp_updated_at: bool,
}

pub static JOURNAL: ResourceProfile = ResourceProfile {
    collection: "journal",
    fields: &[
        FieldSpec { name: "text", default: FieldDefault::Text },
        FieldSpec { name: "stickers", default: FieldDefault::List },
        FieldSpec { name: "images", default: FieldDefault::List },
    ],
    content_field: "text",
    on_empty: EmptyPolicy::AllowEmpty,
    stamp_updated_at: true,
};

pub static TODO: ResourceProfile = ResourceProfile {
    collection: "todo",
    fields: &[FieldSpec { name: "tasks", default: FieldDefault::List }],
    content_field: "tasks",
    on_empty: EmptyPolicy::Delete,
    stamp_updated_at: false,
};

pub static AFFIRMATION: ResourceProfile = ResourceProfile {
    collection: "affirmations",
    fields: &[FieldSpec { name: "text", default: FieldDefault::Text }],
    content_field: "text",
    on_empty: EmptyPolicy::Delete,
    stamp_updated_at: false,
};

pub static GRATITUDE: ResourceProfile = ResourceProfile {
    collection: "gratitude",
    fields: &[
        FieldSpec { name: "text", default: FieldDefault::Text },
        FieldSpec { name: "stickers", default: FieldDefault::List },
        FieldSpec { name: "images", default: FieldDefault::List },
    ],
    content_field: "text",
    on_empty: EmptyPolicy::Reject,
    stamp_updated_at: true,
};

/// Result of a save: either the record was written, or an empty payload
/// under [`EmptyPolicy::Delete`] removed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    Deleted,
}

#[derive(Clone)]
pub struct ResourceService<S> {
    store: S,
    profile: &'static ResourceProfile,
}

impl<S: RecordStore> ResourceService<S> {
    pub fn new(store: S, profile: &'static ResourceProfile) -> Self {
        Self { store, profile }
    }

    /// Upsert the record for (user_id, date), applying the profile's
    /// empty-save policy first. The payload fully replaces any prior fields.
    pub async fn save(
        &self,
        user_id: &str,
        date: NaiveDate,
        payload: &Map<String, Value>,
    ) -> AppResult<SaveOutcome> {
        let collection = self.profile.collection;

        if is_empty_content(payload.get(self.profile.content_field)) {
            match self.profile.on_empty {
                EmptyPolicy::Reject => {
                    return Err(AppError::Validation(format!(
                        "Entry {} is required",
                        self.profile.content_field
                    )));
                }
                EmptyPolicy::Delete => {
                    // Deleting a record that never existed is still a success.
                    self.store.delete_one(collection, user_id, date).await?;
                    tracing::info!(collection, user_id, date = %date, "Deleted entry");
                    return Ok(SaveOutcome::Deleted);
                }
                EmptyPolicy::AllowEmpty => {}
            }
        }

        let fields = self.shape(payload);
        self.store.upsert(collection, user_id, date, fields).await?;
        tracing::info!(collection, user_id, date = %date, "Saved entry");

        Ok(SaveOutcome::Saved)
    }

    /// Fetch the record for (user_id, date). Absence yields an empty document.
    pub async fn get(&self, user_id: &str, date: NaiveDate) -> AppResult<Fields> {
        let record = self
            .store
            .find_one(self.profile.collection, user_id, date)
            .await?;
        Ok(record.unwrap_or_default())
    }

    /// Dates with a record for this user, most recent first.
    pub async fn history(&self, user_id: &str) -> AppResult<Vec<NaiveDate>> {
        let dates = self
            .store
            .list_dates(self.profile.collection, user_id)
            .await?;
        Ok(dates)
    }

    /// Project the caller payload onto the profile's fields, filling defaults
    /// and stamping `updated_at` where configured. Unknown payload keys are
    /// dropped.
    fn shape(&self, payload: &Map<String, Value>) -> Fields {
        let mut fields = Fields::new();
        for spec in self.profile.fields {
            let value = payload
                .get(spec.name)
                .filter(|v| !v.is_null())
                .cloned()
                .unwrap_or_else(|| spec.default.value());
            fields.insert(spec.name.to_string(), value);
        }
        if self.profile.stamp_updated_at {
            fields.insert(
                "updated_at".to_string(),
                Value::String(Utc::now().to_rfc3339()),
            );
        }
        fields
    }
}

/// Empty means: absent, null, whitespace-only text, or an empty sequence.
fn is_empty_content(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(_) => false,
    }
}
