//! Form checks run before anything is sent to the API

use crate::client::models::{Credentials, NewProduct, SignupProfile, StoreProfile};
use crate::error::ValidationError;

const ALL_FIELDS: &str = "Please fill in all fields";

/// Minimum password length accepted at registration
pub const MIN_PASSWORD_LEN: usize = 6;

/// Minimum store name length
pub const MIN_STORE_NAME_LEN: usize = 2;

/// Minimum store description length
pub const MIN_STORE_DESCR_LEN: usize = 10;

type Result = std::result::Result<(), ValidationError>;

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub fn validate_credentials(credentials: &Credentials) -> Result {
    if blank(&credentials.email) || credentials.password.is_empty() {
        return Err(ValidationError::new(ALL_FIELDS));
    }
    if !credentials.email.contains('@') {
        return Err(ValidationError::new("Please enter a valid email address"));
    }
    Ok(())
}

pub fn validate_signup(profile: &SignupProfile) -> Result {
    if blank(&profile.username)
        || blank(&profile.email)
        || profile.password.is_empty()
        || profile.confirm_password.is_empty()
    {
        return Err(ValidationError::new(ALL_FIELDS));
    }
    if !profile.email.contains('@') {
        return Err(ValidationError::new("Please enter a valid email address"));
    }
    if profile.password != profile.confirm_password {
        return Err(ValidationError::new("Passwords do not match"));
    }
    if profile.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::new(format!(
            "Password must be at least {} characters long",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

pub fn validate_store(profile: &StoreProfile) -> Result {
    if blank(&profile.name)
        || blank(&profile.main_good)
        || blank(&profile.address.city)
        || blank(&profile.address.state)
        || blank(&profile.address.address)
        || blank(&profile.descr)
    {
        return Err(ValidationError::new(ALL_FIELDS));
    }
    if profile.name.trim().chars().count() < MIN_STORE_NAME_LEN {
        return Err(ValidationError::new(format!(
            "Store name must be at least {} characters long",
            MIN_STORE_NAME_LEN
        )));
    }
    if profile.descr.trim().chars().count() < MIN_STORE_DESCR_LEN {
        return Err(ValidationError::new(format!(
            "Store description must be at least {} characters long",
            MIN_STORE_DESCR_LEN
        )));
    }
    Ok(())
}

/// Build a product from raw form input.
///
/// The discount defaults to 0 when left empty.
pub fn parse_product(
    price: &str,
    discount: Option<&str>,
    descr: &str,
    images: &[String],
) -> std::result::Result<NewProduct, ValidationError> {
    if blank(descr) || blank(price) {
        return Err(ValidationError::new(ALL_FIELDS));
    }

    let price: f64 = price
        .trim()
        .parse()
        .ok()
        .filter(|p: &f64| p.is_finite() && *p >= 0.0)
        .ok_or_else(|| ValidationError::new("Price must be a non-negative number"))?;

    let discount = match discount.map(str::trim).filter(|d| !d.is_empty()) {
        None => 0,
        Some(d) => d
            .parse::<u8>()
            .ok()
            .filter(|d| *d <= 100)
            .ok_or_else(|| ValidationError::new("Discount must be a whole number from 0 to 100"))?,
    };

    if let Some(bad) = images
        .iter()
        .find(|url| !url.starts_with("https://") && !url.starts_with("http://"))
    {
        return Err(ValidationError::new(format!(
            "Image must be an http(s) URL: {}",
            bad
        )));
    }

    Ok(NewProduct {
        price,
        discount,
        descr: descr.trim().to_string(),
        imgs: images.to_vec(),
    })
}
