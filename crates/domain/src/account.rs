//! Account — the persisted customer record managed by the service.
//!
//! The wire schema is explicit: [`AccountPatch`] is what a request body may
//! contain, [`AccountFields`] is a complete and valid set of business fields,
//! and [`Account`] is a set of fields stored under a server-assigned id.
//! Keys outside the schema are ignored, so a serialized [`Account`] (with its
//! `id`) can be sent back as-is.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{AccountsError, ValidationError};
use crate::id::AccountId;
use crate::time;

/// Business fields of an account, independent of persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountFields {
    pub name: String,
    pub email: String,
    pub address: String,
    pub phone_number: Option<String>,
    pub date_joined: NaiveDate,
}

impl AccountFields {
    /// Create a builder for constructing [`AccountFields`].
    #[must_use]
    pub fn builder() -> AccountFieldsBuilder {
        AccountFieldsBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AccountsError::Validation`] when `name`, `email` or `address`
    /// is blank.
    pub fn validate(&self) -> Result<(), AccountsError> {
        for (field, value) in [
            ("name", &self.name),
            ("email", &self.email),
            ("address", &self.address),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::EmptyField(field).into());
            }
        }
        Ok(())
    }

    /// Overwrite every field present in `patch`, leaving the others untouched.
    pub fn apply(&mut self, patch: AccountPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(address) = patch.address {
            self.address = address;
        }
        if let Some(phone_number) = patch.phone_number {
            self.phone_number = phone_number;
        }
        if let Some(date_joined) = patch.date_joined {
            self.date_joined = date_joined;
        }
    }
}

/// A persisted account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    #[serde(flatten)]
    pub fields: AccountFields,
}

impl Account {
    /// Attach a store-assigned id to a set of fields.
    #[must_use]
    pub fn new(id: AccountId, fields: AccountFields) -> Self {
        Self { id, fields }
    }

    /// Apply a partial update and re-check invariants.
    ///
    /// The id never changes.
    ///
    /// # Errors
    ///
    /// Returns [`AccountsError::Validation`] if the resulting fields are invalid.
    pub fn apply(&mut self, patch: AccountPatch) -> Result<(), AccountsError> {
        self.fields.apply(patch);
        self.fields.validate()
    }
}

/// Account fields as they arrive in a request body; every key is optional.
///
/// `phone_number` distinguishes an absent key (`None`) from an explicit
/// `null` (`Some(None)`), so an update can clear it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AccountPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub phone_number: Option<Option<String>>,
    pub date_joined: Option<NaiveDate>,
}

impl AccountPatch {
    /// Parse a JSON request body.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidJson`] when the body is empty, not
    /// JSON, not an object, or carries a value of the wrong type.
    pub fn from_json(body: &[u8]) -> Result<Self, AccountsError> {
        serde_json::from_slice(body)
            .map_err(|err| ValidationError::InvalidJson(err).into())
    }

    /// Turn the patch into a complete set of fields for a new account.
    ///
    /// `date_joined` defaults to today when absent.
    ///
    /// # Errors
    ///
    /// Returns [`AccountsError::Validation`] if a required field is missing
    /// or blank.
    pub fn into_fields(self) -> Result<AccountFields, AccountsError> {
        let fields = AccountFields {
            name: self.name.ok_or(ValidationError::MissingField("name"))?,
            email: self.email.ok_or(ValidationError::MissingField("email"))?,
            address: self.address.ok_or(ValidationError::MissingField("address"))?,
            phone_number: self.phone_number.flatten(),
            date_joined: self.date_joined.unwrap_or_else(time::today),
        };
        fields.validate()?;
        Ok(fields)
    }
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Step-by-step builder for [`AccountFields`].
#[derive(Debug, Default)]
pub struct AccountFieldsBuilder {
    name: Option<String>,
    email: Option<String>,
    address: Option<String>,
    phone_number: Option<String>,
    date_joined: Option<NaiveDate>,
}

impl AccountFieldsBuilder {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    #[must_use]
    pub fn phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_number = Some(phone_number.into());
        self
    }

    #[must_use]
    pub fn date_joined(mut self, date_joined: NaiveDate) -> Self {
        self.date_joined = Some(date_joined);
        self
    }

    /// Consume the builder, validate, and return [`AccountFields`].
    ///
    /// # Errors
    ///
    /// Returns [`AccountsError::Validation`] if a required field is missing
    /// or blank.
    pub fn build(self) -> Result<AccountFields, AccountsError> {
        AccountPatch {
            name: self.name,
            email: self.email,
            address: self.address,
            phone_number: Some(self.phone_number),
            date_joined: self.date_joined,
        }
        .into_fields()
    }
}
