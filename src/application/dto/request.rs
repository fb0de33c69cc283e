//! Request DTOs
//!
//! Data structures for API request bodies.
//!
//! Every field is optional at the serde level so that a missing or null
//! value becomes a per-field "required" message instead of a parse error.
//! Update requests are partial: absent fields are left unchanged.
//! Text fields are trimmed on the way in, before any length check.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::domain::{
    ProductSize, BARCODE_MAX, CATEGORY_NAME_MAX, PRODUCT_NAME_MAX, STORE_NAME_MAX, STORE_NAME_MIN,
};
use crate::shared::validation::error_with_message;

/// Korean mobile numbers: 010/011/016/017/018/019 followed by 7-8 digits.
pub static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^01[016789][0-9]{7,8}$").expect("phone pattern is valid"));

fn trimmed<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.map(|s| s.trim().to_string()))
}

fn validate_size(size: &str) -> Result<(), ValidationError> {
    match ProductSize::parse(size) {
        Some(_) => Ok(()),
        None => Err(error_with_message(
            "choice",
            format!("\"{}\" is not a valid choice.", size),
        )),
    }
}

/// User registration request
#[derive(Debug, Default, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(
        required(message = "This field is required."),
        regex(path = *PHONE_REGEX, message = "Enter a valid phone number.")
    )]
    pub phone: Option<String>,

    #[validate(
        required(message = "This field is required."),
        length(min = 1, message = "This field may not be blank.")
    )]
    pub password: Option<String>,

    #[validate(required(message = "This field is required."))]
    pub password2: Option<String>,
}

impl RegisterRequest {
    /// Field rules plus the confirmation check, reported on `password2`.
    pub fn validate_registration(&self) -> Result<(), ValidationErrors> {
        let mut errors = self.validate().err().unwrap_or_else(ValidationErrors::new);

        if let (Some(password), Some(password2)) = (&self.password, &self.password2) {
            if password != password2 {
                errors.add(
                    "password2",
                    error_with_message("password_mismatch", "Password fields didn't match."),
                );
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Token pair request
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ObtainTokenRequest {
    #[validate(required(message = "This field is required."))]
    pub phone: Option<String>,

    #[validate(required(message = "This field is required."))]
    pub password: Option<String>,
}

/// Refresh/blacklist request carrying a refresh token
#[derive(Debug, Default, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[validate(required(message = "This field is required."))]
    pub refresh: Option<String>,
}

/// Create store request
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateStoreRequest {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(
        required(message = "This field is required."),
        length(
            min = STORE_NAME_MIN,
            max = STORE_NAME_MAX,
            message = "Ensure this field has 3 to 32 characters."
        )
    )]
    pub name: Option<String>,
}

/// Update store request
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateStoreRequest {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(
        min = STORE_NAME_MIN,
        max = STORE_NAME_MAX,
        message = "Ensure this field has 3 to 32 characters."
    ))]
    pub name: Option<String>,
}

/// Create category request
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(
        required(message = "This field is required."),
        length(min = 1, max = CATEGORY_NAME_MAX, message = "Ensure this field has 1 to 16 characters.")
    )]
    pub name: Option<String>,
}

/// Update category request
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateCategoryRequest {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = CATEGORY_NAME_MAX, message = "Ensure this field has 1 to 16 characters."))]
    pub name: Option<String>,
}

/// Create product request
#[derive(Debug, Default, Clone, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(required(message = "This field is required."))]
    pub category: Option<i64>,

    #[validate(
        required(message = "This field is required."),
        range(min = 0, max = 2147483647, message = "Ensure this value is between 0 and 2147483647.")
    )]
    pub price: Option<i64>,

    #[validate(
        required(message = "This field is required."),
        range(min = 0, max = 2147483647, message = "Ensure this value is between 0 and 2147483647.")
    )]
    pub cost: Option<i64>,

    #[serde(default, deserialize_with = "trimmed")]
    #[validate(
        required(message = "This field is required."),
        length(min = 1, max = PRODUCT_NAME_MAX, message = "Ensure this field has 1 to 32 characters.")
    )]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "trimmed")]
    #[validate(
        required(message = "This field is required."),
        length(min = 1, message = "This field may not be blank.")
    )]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "trimmed")]
    #[validate(
        required(message = "This field is required."),
        length(min = 1, max = BARCODE_MAX, message = "Ensure this field has 1 to 16 characters.")
    )]
    pub barcode: Option<String>,

    #[validate(
        required(message = "This field is required."),
        range(min = 0, max = 2147483647, message = "Ensure this value is between 0 and 2147483647.")
    )]
    pub sell_by_days: Option<i64>,

    #[validate(required(message = "This field is required."), custom(function = "validate_size"))]
    pub size: Option<String>,
}

/// Update product request
#[derive(Debug, Default, Clone, Deserialize, Validate)]
pub struct UpdateProductRequest {
    pub category: Option<i64>,

    #[validate(range(min = 0, max = 2147483647, message = "Ensure this value is between 0 and 2147483647."))]
    pub price: Option<i64>,

    #[validate(range(min = 0, max = 2147483647, message = "Ensure this value is between 0 and 2147483647."))]
    pub cost: Option<i64>,

    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = PRODUCT_NAME_MAX, message = "Ensure this field has 1 to 32 characters."))]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = BARCODE_MAX, message = "Ensure this field has 1 to 16 characters."))]
    pub barcode: Option<String>,

    #[validate(range(min = 0, max = 2147483647, message = "Ensure this value is between 0 and 2147483647."))]
    pub sell_by_days: Option<i64>,

    #[validate(custom(function = "validate_size"))]
    pub size: Option<String>,
}

/// Product list query string
#[derive(Debug, Default, Deserialize)]
pub struct ProductListQuery {
    pub search: Option<String>,
    pub cursor: Option<String>,
}
