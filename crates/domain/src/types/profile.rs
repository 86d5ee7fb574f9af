//! The editable profile document
//!
//! A flat set of fields owned by the signed-in user. Fields are addressed by
//! [`ProfileField`] so form sections, the auto-save store and the document
//! store agree on one key per field.

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::{
    DEFAULT_PRONOUNS, MAX_PROFILE_AGE, MIN_PROFILE_AGE, PHOTO_SLOT_COUNT, PROFESSIONAL_PROMPTS,
    SOCIAL_PROMPTS,
};
use crate::errors::{KindredError, Result};
use crate::impl_domain_key_conversions;

/// Reference to a photo held in a slot.
///
/// Persisted as a plain string; the variant is recovered from the scheme.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PhotoRef {
    /// Device-only reference (`file://`, `content://`, `ph://`, bare paths).
    Local(String),
    /// Durable, fetchable reference returned by the blob store.
    Remote(String),
}

impl PhotoRef {
    const REMOTE_SCHEMES: [&'static str; 3] = ["https://", "http://", "gs://"];

    /// Classify a raw reference by its scheme.
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let lower = raw.to_ascii_lowercase();
        if Self::REMOTE_SCHEMES.iter().any(|scheme| lower.starts_with(scheme)) {
            Self::Remote(raw)
        } else {
            Self::Local(raw)
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, Self::Local(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Local(raw) | Self::Remote(raw) => raw,
        }
    }
}

impl Serialize for PhotoRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PhotoRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::parse)
    }
}

/// Fixed-length photo slot array.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PhotoSlots([Option<PhotoRef>; PHOTO_SLOT_COUNT]);

impl PhotoSlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from any number of slots: extra slots are dropped, missing ones
    /// are empty.
    pub fn from_slots<I>(slots: I) -> Self
    where
        I: IntoIterator<Item = Option<PhotoRef>>,
    {
        let mut result = Self::default();
        for (index, slot) in slots.into_iter().take(PHOTO_SLOT_COUNT).enumerate() {
            result.0[index] = slot;
        }
        result
    }

    pub fn get(&self, index: usize) -> Option<&PhotoRef> {
        self.0.get(index).and_then(Option::as_ref)
    }

    /// Replace one slot. Out-of-range indices are rejected.
    pub fn set(&mut self, index: usize, photo: Option<PhotoRef>) -> Result<()> {
        let slot = self.0.get_mut(index).ok_or_else(|| {
            KindredError::InvalidInput(format!(
                "photo slot {index} out of range (0..{PHOTO_SLOT_COUNT})"
            ))
        })?;
        *slot = photo;
        Ok(())
    }

    /// Copy with one slot replaced.
    pub fn with_slot(&self, index: usize, photo: Option<PhotoRef>) -> Result<Self> {
        let mut next = self.clone();
        next.set(index, photo)?;
        Ok(next)
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<&PhotoRef>> {
        self.0.iter().map(Option::as_ref)
    }

    /// Indices and raw references of slots still holding local references.
    pub fn local_slots(&self) -> Vec<(usize, String)> {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| match slot {
                Some(PhotoRef::Local(raw)) => Some((index, raw.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn has_local(&self) -> bool {
        self.0.iter().any(|slot| matches!(slot, Some(PhotoRef::Local(_))))
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Option::is_none)
    }

    /// Non-empty slots in order, as written by a photo merge-write.
    pub fn compacted(&self) -> Vec<PhotoRef> {
        self.0.iter().flatten().cloned().collect()
    }
}

impl Serialize for PhotoSlots {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PhotoSlots {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let slots = Vec::<Option<PhotoRef>>::deserialize(deserializer)?;
        Ok(Self::from_slots(slots))
    }
}

/// Addressable fields of a [`ProfileDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProfileField {
    Name,
    Age,
    Pronouns,
    JobTitle,
    School,
    Location,
    SocialPhotos,
    SocialInterests,
    Hobbies,
    LookingFor,
    SelectedPrompt,
    PromptResponse,
    ProfessionalPhotos,
    ProfessionalGoals,
    IndustryInterests,
    ProfessionalPrompt,
    ProfessionalPromptResponse,
    LinkedIn,
    Instagram,
    Twitter,
}

impl_domain_key_conversions!(ProfileField {
    Name => "name",
    Age => "age",
    Pronouns => "pronouns",
    JobTitle => "jobTitle",
    School => "school",
    Location => "location",
    SocialPhotos => "socialPhotos",
    SocialInterests => "socialInterests",
    Hobbies => "hobbies",
    LookingFor => "lookingFor",
    SelectedPrompt => "selectedPrompt",
    PromptResponse => "promptResponse",
    ProfessionalPhotos => "professionalPhotos",
    ProfessionalGoals => "professionalGoals",
    IndustryInterests => "industryInterests",
    ProfessionalPrompt => "professionalPrompt",
    ProfessionalPromptResponse => "professionalPromptResponse",
    LinkedIn => "linkedIn",
    Instagram => "instagram",
    Twitter => "twitter",
});

/// Shape of a field's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Tags,
    Photos,
}

impl ProfileField {
    pub fn kind(self) -> FieldKind {
        match self {
            Self::SocialPhotos | Self::ProfessionalPhotos => FieldKind::Photos,
            Self::SocialInterests
            | Self::Hobbies
            | Self::LookingFor
            | Self::ProfessionalGoals
            | Self::IndustryInterests => FieldKind::Tags,
            _ => FieldKind::Text,
        }
    }

    pub fn is_photos(self) -> bool {
        self.kind() == FieldKind::Photos
    }
}

/// Value carried by a single field mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Tags(Vec<String>),
    Photos(PhotoSlots),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Text(_) => FieldKind::Text,
            Self::Tags(_) => FieldKind::Tags,
            Self::Photos(_) => FieldKind::Photos,
        }
    }

    /// JSON form sent in a merge-write. Photo slots are compacted to their
    /// non-empty entries.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Text(text) => Value::String(text.clone()),
            Self::Tags(tags) => Value::Array(tags.iter().cloned().map(Value::String).collect()),
            Self::Photos(slots) => Value::Array(
                slots.compacted().iter().map(|photo| Value::String(photo.as_str().to_string())).collect(),
            ),
        }
    }

    /// Parse a stored JSON value for a field of `kind`.
    pub fn from_json(kind: FieldKind, value: &Value) -> Result<Self> {
        let invalid = || KindredError::Storage(format!("unexpected {kind:?} value: {value}"));
        match kind {
            FieldKind::Text => match value {
                Value::String(text) => Ok(Self::Text(text.clone())),
                Value::Number(number) => Ok(Self::Text(number.to_string())),
                Value::Null => Ok(Self::Text(String::new())),
                _ => Err(invalid()),
            },
            FieldKind::Tags => {
                let items = value.as_array().ok_or_else(invalid)?;
                items
                    .iter()
                    .map(|item| item.as_str().map(str::to_string).ok_or_else(invalid))
                    .collect::<Result<Vec<_>>>()
                    .map(Self::Tags)
            }
            FieldKind::Photos => {
                let items = value.as_array().ok_or_else(invalid)?;
                let slots = items
                    .iter()
                    .map(|item| match item {
                        Value::Null => Ok(None),
                        Value::String(raw) if raw.is_empty() => Ok(None),
                        Value::String(raw) => Ok(Some(PhotoRef::parse(raw.clone()))),
                        _ => Err(invalid()),
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(Self::Photos(PhotoSlots::from_slots(slots)))
            }
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        Self::Tags(value)
    }
}

impl From<PhotoSlots> for FieldValue {
    fn from(value: PhotoSlots) -> Self {
        Self::Photos(value)
    }
}

/// The profile being authored by the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileDocument {
    // Basic info (shared)
    pub name: String,
    pub pronouns: String,
    /// Numeric string as typed by the user.
    pub age: String,
    pub job_title: String,
    pub school: String,
    pub location: String,

    // Social
    pub social_photos: PhotoSlots,
    pub social_interests: Vec<String>,
    pub hobbies: Vec<String>,
    pub looking_for: Vec<String>,
    pub selected_prompt: String,
    pub prompt_response: String,

    // Professional
    pub professional_photos: PhotoSlots,
    pub professional_goals: Vec<String>,
    pub industry_interests: Vec<String>,
    pub professional_prompt: String,
    pub professional_prompt_response: String,

    // Social media handles
    pub linked_in: String,
    pub instagram: String,
    pub twitter: String,
}

impl Default for ProfileDocument {
    fn default() -> Self {
        Self {
            name: String::new(),
            pronouns: DEFAULT_PRONOUNS.to_string(),
            age: String::new(),
            job_title: String::new(),
            school: String::new(),
            location: String::new(),
            social_photos: PhotoSlots::new(),
            social_interests: Vec::new(),
            hobbies: Vec::new(),
            looking_for: Vec::new(),
            selected_prompt: SOCIAL_PROMPTS[0].to_string(),
            prompt_response: String::new(),
            professional_photos: PhotoSlots::new(),
            professional_goals: Vec::new(),
            industry_interests: Vec::new(),
            professional_prompt: PROFESSIONAL_PROMPTS[0].to_string(),
            professional_prompt_response: String::new(),
            linked_in: String::new(),
            instagram: String::new(),
            twitter: String::new(),
        }
    }
}

impl ProfileDocument {
    fn text_mut(&mut self, field: ProfileField) -> Option<&mut String> {
        Some(match field {
            ProfileField::Name => &mut self.name,
            ProfileField::Age => &mut self.age,
            ProfileField::Pronouns => &mut self.pronouns,
            ProfileField::JobTitle => &mut self.job_title,
            ProfileField::School => &mut self.school,
            ProfileField::Location => &mut self.location,
            ProfileField::SelectedPrompt => &mut self.selected_prompt,
            ProfileField::PromptResponse => &mut self.prompt_response,
            ProfileField::ProfessionalPrompt => &mut self.professional_prompt,
            ProfileField::ProfessionalPromptResponse => &mut self.professional_prompt_response,
            ProfileField::LinkedIn => &mut self.linked_in,
            ProfileField::Instagram => &mut self.instagram,
            ProfileField::Twitter => &mut self.twitter,
            _ => return None,
        })
    }

    fn tags_mut(&mut self, field: ProfileField) -> Option<&mut Vec<String>> {
        Some(match field {
            ProfileField::SocialInterests => &mut self.social_interests,
            ProfileField::Hobbies => &mut self.hobbies,
            ProfileField::LookingFor => &mut self.looking_for,
            ProfileField::ProfessionalGoals => &mut self.professional_goals,
            ProfileField::IndustryInterests => &mut self.industry_interests,
            _ => return None,
        })
    }

    fn photos_mut(&mut self, field: ProfileField) -> Option<&mut PhotoSlots> {
        match field {
            ProfileField::SocialPhotos => Some(&mut self.social_photos),
            ProfileField::ProfessionalPhotos => Some(&mut self.professional_photos),
            _ => None,
        }
    }

    /// Current value of `field`.
    pub fn get(&self, field: ProfileField) -> FieldValue {
        let text = |value: &String| FieldValue::Text(value.clone());
        let tags = |value: &Vec<String>| FieldValue::Tags(value.clone());
        match field {
            ProfileField::Name => text(&self.name),
            ProfileField::Age => text(&self.age),
            ProfileField::Pronouns => text(&self.pronouns),
            ProfileField::JobTitle => text(&self.job_title),
            ProfileField::School => text(&self.school),
            ProfileField::Location => text(&self.location),
            ProfileField::SelectedPrompt => text(&self.selected_prompt),
            ProfileField::PromptResponse => text(&self.prompt_response),
            ProfileField::ProfessionalPrompt => text(&self.professional_prompt),
            ProfileField::ProfessionalPromptResponse => text(&self.professional_prompt_response),
            ProfileField::LinkedIn => text(&self.linked_in),
            ProfileField::Instagram => text(&self.instagram),
            ProfileField::Twitter => text(&self.twitter),
            ProfileField::SocialInterests => tags(&self.social_interests),
            ProfileField::Hobbies => tags(&self.hobbies),
            ProfileField::LookingFor => tags(&self.looking_for),
            ProfileField::ProfessionalGoals => tags(&self.professional_goals),
            ProfileField::IndustryInterests => tags(&self.industry_interests),
            ProfileField::SocialPhotos => FieldValue::Photos(self.social_photos.clone()),
            ProfileField::ProfessionalPhotos => FieldValue::Photos(self.professional_photos.clone()),
        }
    }

    /// Photo slots of a photo field; empty slots for any other field.
    pub fn photos(&self, field: ProfileField) -> PhotoSlots {
        match field {
            ProfileField::SocialPhotos => self.social_photos.clone(),
            ProfileField::ProfessionalPhotos => self.professional_photos.clone(),
            _ => PhotoSlots::new(),
        }
    }

    /// Replace `field` with `value`.
    ///
    /// Fails only when the value's shape does not match the field.
    pub fn set(&mut self, field: ProfileField, value: FieldValue) -> Result<()> {
        let mismatch = |value: &FieldValue| {
            KindredError::InvalidInput(format!(
                "field '{}' expects {:?}, got {:?}",
                field,
                field.kind(),
                value.kind()
            ))
        };
        match value {
            FieldValue::Text(text) => {
                let slot = self.text_mut(field).ok_or_else(|| mismatch(&FieldValue::Text(String::new())))?;
                *slot = text;
            }
            FieldValue::Tags(tags) => {
                let slot = self.tags_mut(field).ok_or_else(|| mismatch(&FieldValue::Tags(Vec::new())))?;
                *slot = tags;
            }
            FieldValue::Photos(photos) => {
                let slot =
                    self.photos_mut(field).ok_or_else(|| mismatch(&FieldValue::Photos(PhotoSlots::new())))?;
                *slot = photos;
            }
        }
        Ok(())
    }

    /// Shallow-merge a stored document over this one.
    ///
    /// Known keys replace the current value; unknown keys are ignored.
    /// Returns the keys whose stored value could not be parsed.
    pub fn merge_stored(&mut self, stored: &Map<String, Value>) -> Vec<String> {
        let mut rejected = Vec::new();
        for (key, value) in stored {
            let Ok(field) = key.parse::<ProfileField>() else {
                continue;
            };
            match FieldValue::from_json(field.kind(), value).and_then(|parsed| self.set(field, parsed)) {
                Ok(()) => {}
                Err(_) => rejected.push(key.clone()),
            }
        }
        rejected
    }

    /// Full document as a JSON object keyed by field key.
    pub fn to_json_map(&self) -> Map<String, Value> {
        ProfileField::ALL
            .iter()
            .map(|field| {
                let value = match self.get(*field) {
                    // Full saves keep slot positions.
                    FieldValue::Photos(slots) => serde_json::to_value(&slots).unwrap_or(Value::Null),
                    other => other.to_json(),
                };
                (field.as_key().to_string(), value)
            })
            .collect()
    }

    /// Required-field checks applied on explicit save.
    pub fn validate_for_save(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(KindredError::InvalidInput("name is required".into()));
        }
        let age = self.age.trim();
        if !age.is_empty() {
            let parsed: u32 = age
                .parse()
                .map_err(|_| KindredError::InvalidInput(format!("age '{age}' is not a number")))?;
            if !(MIN_PROFILE_AGE..=MAX_PROFILE_AGE).contains(&parsed) {
                return Err(KindredError::InvalidInput(format!(
                    "age must be between {MIN_PROFILE_AGE} and {MAX_PROFILE_AGE}"
                )));
            }
        }
        Ok(())
    }
}
