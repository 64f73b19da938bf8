//! Request-schema helpers shared by the server and client.

use std::borrow::Cow;

use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::youtube;

/// Custom validator: the URL must resolve to a YouTube video id.
pub fn youtube_url(url: &str) -> Result<(), ValidationError> {
    if youtube::is_youtube_url(url) {
        Ok(())
    } else {
        let mut err = ValidationError::new("youtube_url");
        err.message = Some(Cow::Borrowed("must be a YouTube video URL"));
        Err(err)
    }
}

/// Flatten validation errors into one stable, human-readable line.
///
/// Nested fields are reported with dotted paths (`youtube_links[0].url`).
/// Entries are sorted so the message does not depend on hash order.
pub fn describe(errors: &ValidationErrors) -> String {
    let mut lines = Vec::new();
    collect(errors, "", &mut lines);
    lines.sort();
    lines.join("; ")
}

fn collect(errors: &ValidationErrors, prefix: &str, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(errs) => {
                for err in errs {
                    out.push(format!("{path}: {}", message(err)));
                }
            }
            ValidationErrorsKind::Struct(inner) => collect(inner, &path, out),
            ValidationErrorsKind::List(items) => {
                for (idx, inner) in items {
                    collect(inner, &format!("{path}[{idx}]"), out);
                }
            }
        }
    }
}

fn message(err: &ValidationError) -> Cow<'static, str> {
    match &err.message {
        Some(msg) => msg.clone(),
        None => match err.code.as_ref() {
            "email" => Cow::Borrowed("must be a valid email address"),
            "url" => Cow::Borrowed("must be a valid URL"),
            "length" => Cow::Borrowed("has an invalid length"),
            "range" => Cow::Borrowed("is out of range"),
            "required" => Cow::Borrowed("is required"),
            other => Cow::Owned(format!("failed '{other}' check")),
        },
    }
}

#[cfg(test)]
mod tests {
    use validator::Validate;

    use super::*;

    #[derive(Validate)]
    struct Link {
        #[validate(custom(function = "youtube_url"))]
        url: String,
    }

    #[derive(Validate)]
    struct Form {
        #[validate(email)]
        email: String,
        #[validate(length(min = 1))]
        name: String,
        #[validate(nested)]
        links: Vec<Link>,
    }

    #[test]
    fn youtube_url_validator() {
        assert!(youtube_url("https://youtu.be/dQw4w9WgXcQ").is_ok());
        assert!(youtube_url("https://example.com").is_err());
    }

    #[test]
    fn describe_is_sorted_and_includes_nested_paths() {
        let form = Form {
            email: "nope".into(),
            name: String::new(),
            links: vec![
                Link {
                    url: "https://youtu.be/dQw4w9WgXcQ".into(),
                },
                Link {
                    url: "bad".into(),
                },
            ],
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(
            describe(&errors),
            "email: must be a valid email address; \
             links[1].url: must be a YouTube video URL; \
             name: has an invalid length"
        );
    }
}
