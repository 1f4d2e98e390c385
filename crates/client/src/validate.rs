use std::collections::BTreeMap;

use boomabrovers_contact::{Field, is_email_shaped};
use serde::{Deserialize, Serialize};
use strum::VariantArray;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
}

impl ContactFields {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
            Field::Subject => &mut self.subject,
            Field::Message => &mut self.message,
        };

        *slot = value.into();
    }
}

/// Field name to message. Empty means the form may be sent.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

pub fn validate(fields: &ContactFields) -> FieldErrors {
    let mut errors = BTreeMap::new();

    for field in Field::VARIANTS {
        if fields.get(*field).trim().is_empty() {
            errors.insert(*field, format!("{} is required", field.label()));
        }
    }

    if !errors.contains_key(&Field::Email) && !is_email_shaped(&fields.email) {
        errors.insert(Field::Email, "Email is invalid".to_owned());
    }

    FieldErrors(errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> ContactFields {
        ContactFields {
            name: "A".to_owned(),
            email: "a@b.com".to_owned(),
            phone: "1".to_owned(),
            subject: "S".to_owned(),
            message: "M".to_owned(),
        }
    }

    #[test]
    fn test_valid_fields() {
        assert!(validate(&valid()).is_empty());
    }

    #[test]
    fn test_blank_field_reports_exactly_that_field() {
        for field in Field::VARIANTS {
            for blank in ["", "   ", "\t\n"] {
                let mut fields = valid();
                fields.set(*field, blank);

                let errors = validate(&fields);
                assert_eq!(errors.fields().collect::<Vec<_>>(), vec![*field]);
                assert_eq!(
                    errors.get(*field),
                    Some(format!("{} is required", field.label()).as_str())
                );
            }
        }
    }

    #[test]
    fn test_malformed_email_adds_to_other_errors() {
        for email in ["bad", "a@b", "@b.c", "a@.c d", "a b@c.d"] {
            let fields = ContactFields {
                email: email.to_owned(),
                phone: "".to_owned(),
                ..valid()
            };

            let errors = validate(&fields);
            assert_eq!(errors.len(), 2, "{email}");
            assert_eq!(errors.get(Field::Email), Some("Email is invalid"));
            assert_eq!(errors.get(Field::Phone), Some("Phone is required"));
        }
    }

    #[test]
    fn test_padded_email_is_accepted() {
        let fields = ContactFields {
            email: "  john.doe@example.com ".to_owned(),
            ..valid()
        };

        assert!(validate(&fields).is_empty());
    }

    #[test]
    fn test_validate_is_deterministic() {
        let fields = ContactFields {
            name: " ".to_owned(),
            email: "x".to_owned(),
            ..Default::default()
        };

        assert_eq!(validate(&fields), validate(&fields));
        assert_eq!(validate(&fields).len(), 5);
    }
}
