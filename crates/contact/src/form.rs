use std::{borrow::Cow, fmt};

use serde::{
    Deserialize, Deserializer,
    de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor},
};
use strum::VariantArray;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{Field, FieldError, is_email_shaped};

/// Untyped submission as it arrives on the wire. Missing fields are empty.
#[derive(Debug, Default, Clone, Deserialize, Validate)]
#[serde(default)]
pub struct ContactForm {
    #[serde(deserialize_with = "any_text")]
    #[validate(custom(function = "required", message = "Name is required"))]
    pub name: String,
    #[serde(deserialize_with = "any_text")]
    #[validate(custom(function = "email_shape"))]
    pub email: String,
    #[serde(deserialize_with = "any_text")]
    #[validate(custom(function = "required", message = "Phone number is required"))]
    pub phone: String,
    #[serde(deserialize_with = "any_text")]
    #[validate(custom(function = "required", message = "Subject is required"))]
    pub subject: String,
    #[serde(deserialize_with = "any_text")]
    #[validate(custom(function = "required", message = "Message is required"))]
    pub message: String,
}

/// Reads any JSON value as text. Numbers and booleans keep their literal
/// form, while `null`, arrays and objects become empty.
pub fn any_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct TextVisitor;

    impl<'de> Visitor<'de> for TextVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a text value")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.to_owned())
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value)
        }

        fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(String::new())
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(String::new())
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            while seq.next_element::<IgnoredAny>()?.is_some() {}

            Ok(String::new())
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}

            Ok(String::new())
        }
    }

    deserializer.deserialize_any(TextVisitor)
}

impl ContactForm {
    pub fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            phone: self.phone.trim().to_owned(),
            subject: self.subject.trim().to_owned(),
            message: self.message.trim().to_owned(),
        }
    }

    /// Every failing field with one message each, in form order.
    pub fn field_errors(&self) -> Vec<FieldError> {
        match self.validate() {
            Ok(_) => vec![],
            Err(errors) => collect_field_errors(&errors),
        }
    }
}

fn collect_field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let field_errors = errors.field_errors();

    Field::VARIANTS
        .iter()
        .filter_map(|field| {
            let error = field_errors.get(field.as_str())?.first()?;
            let message = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("{} is invalid", field.label()));

            Some(FieldError::new(field.as_str(), message))
        })
        .collect()
}

fn required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }

    Ok(())
}

fn email_shape(value: &str) -> Result<(), ValidationError> {
    if is_email_shaped(value) {
        return Ok(());
    }

    let mut error = ValidationError::new("email");
    error.message = Some(Cow::from("Valid email is required"));

    Err(error)
}
