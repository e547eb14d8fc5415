use validator::{Validate, ValidationError};

fn validate_dotted_domain(s: &str) -> Result<(), ValidationError> {
    let domain = match s.rsplit_once('@') {
        Some((_, domain)) => domain,
        None => return Err(ValidationError::new("Email address has no domain part")),
    };
    let mut labels = domain.split('.');
    let dotted = domain.contains('.') && labels.all(|label| !label.is_empty());
    if !dotted {
        return Err(ValidationError::new(
            "Email domain must be made of dot-separated labels",
        ));
    }
    Ok(())
}

#[derive(Debug, Clone, Validate, serde::Deserialize)]
#[serde(try_from = "String")]
pub struct EmailAddress {
    #[validate(email, custom(function = "validate_dotted_domain"))]
    email: String,
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.email
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.email.fmt(f)
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = String;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        let email_address = Self {
            email: value.trim().to_string(),
        };
        match email_address.validate() {
            Ok(_) => Ok(email_address),
            Err(_) => Err(format!(
                "'{}' is not a valid email address",
                email_address.email
            )),
        }
    }
}
