//! The `Movie` entity and the payloads used to create or edit one

use crate::core::error::{FieldValidationError, ValidationError};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Date format used by forms, JSON and the SQLite backend
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A persisted movie record
///
/// `id` is assigned by the store on creation and never changes afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: Uuid,
    pub title: String,
    pub release_date: NaiveDate,
    pub genre: String,
    pub price: Decimal,
}

impl Movie {
    /// Build a record from validated input and a store-assigned id
    pub fn from_input(id: Uuid, input: MovieInput) -> Self {
        Self {
            id,
            title: input.title,
            release_date: input.release_date,
            genre: input.genre,
            price: input.price,
        }
    }

    /// The caller-editable part of this record
    pub fn to_input(&self) -> MovieInput {
        MovieInput {
            title: self.title.clone(),
            release_date: self.release_date,
            genre: self.genre.clone(),
            price: self.price,
        }
    }
}

/// Everything about a movie except its id
///
/// Stores call [`Validate::validate`] before every write.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct MovieInput {
    #[validate(custom(function = "not_blank"))]
    pub title: String,

    pub release_date: NaiveDate,

    #[validate(custom(function = "not_blank"))]
    pub genre: String,

    #[validate(custom(function = "non_negative"))]
    pub price: Decimal,
}

impl MovieInput {
    pub fn new(
        title: impl Into<String>,
        release_date: NaiveDate,
        genre: impl Into<String>,
        price: Decimal,
    ) -> Self {
        Self {
            title: title.into(),
            release_date,
            genre: genre.into(),
            price,
        }
    }
}

fn not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        Err(validator::ValidationError::new("required").with_message(Cow::from("is required")))
    } else {
        Ok(())
    }
}

fn non_negative(value: &Decimal) -> Result<(), validator::ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        Err(validator::ValidationError::new("range")
            .with_message(Cow::from("must not be negative")))
    } else {
        Ok(())
    }
}

/// Raw HTML form payload
///
/// Every field arrives as text so that a bad date or price can be reported
/// next to the field instead of rejecting the whole request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub price: String,
}

impl MovieForm {
    /// Parse and validate the form into a [`MovieInput`]
    ///
    /// All problems are collected, not just the first one.
    pub fn parse(&self) -> Result<MovieInput, ValidationError> {
        let mut errors = Vec::new();

        let release_date = match self.release_date.trim() {
            "" => {
                errors.push(field_error("release_date", "is required"));
                None
            }
            raw => match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
                Ok(date) => Some(date),
                Err(_) => {
                    errors.push(field_error("release_date", "must be a date (YYYY-MM-DD)"));
                    None
                }
            },
        };

        let price = match self.price.trim() {
            "" => {
                errors.push(field_error("price", "is required"));
                None
            }
            raw => match Decimal::from_str(raw) {
                Ok(price) => Some(price),
                Err(_) => {
                    errors.push(field_error("price", "must be a decimal amount"));
                    None
                }
            },
        };

        // Placeholders let the remaining fields run through the same validator
        let input = MovieInput {
            title: self.title.trim().to_string(),
            release_date: release_date.unwrap_or_default(),
            genre: self.genre.trim().to_string(),
            price: price.unwrap_or_default(),
        };

        if let Err(validation) = input.validate() {
            if let ValidationError::FieldErrors(fields) = ValidationError::from(validation) {
                errors.extend(fields);
            }
        }

        if errors.is_empty() {
            Ok(input)
        } else {
            errors.sort_by(|a, b| a.field.cmp(&b.field));
            Err(ValidationError::FieldErrors(errors))
        }
    }
}

impl From<&Movie> for MovieForm {
    fn from(movie: &Movie) -> Self {
        Self {
            title: movie.title.clone(),
            release_date: movie.release_date.format(DATE_FORMAT).to_string(),
            genre: movie.genre.clone(),
            price: movie.price.to_string(),
        }
    }
}

fn field_error(field: &str, message: &str) -> FieldValidationError {
    FieldValidationError {
        field: field.to_string(),
        message: message.to_string(),
    }
}
