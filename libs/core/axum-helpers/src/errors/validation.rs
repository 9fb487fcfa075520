use serde::Serialize;
use std::fmt;
use utoipa::ToSchema;
use validator::{ValidationErrors, ValidationErrorsKind};

/// Key validator uses for errors that belong to the object rather than a field.
const GLOBAL_KEY: &str = "__all__";

/// One violated rule, in the shape clients of the API expect.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FieldErrorItem {
    /// Name of the validated object, e.g. `eventDto`
    pub object_name: String,
    /// Offending field; absent for object-level errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Machine-readable rule code, e.g. `NotBlank`
    pub code: String,
    pub default_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub rejected_value: Option<serde_json::Value>,
}

/// Validation errors of a named object.
#[derive(Debug)]
pub struct ValidationFailure {
    pub object_name: String,
    pub errors: ValidationErrors,
}

impl ValidationFailure {
    pub fn new(object_name: impl Into<String>, errors: ValidationErrors) -> Self {
        Self {
            object_name: object_name.into(),
            errors,
        }
    }

    /// Flattens the errors into items: field errors sorted by field, then object errors.
    pub fn items(&self) -> Vec<FieldErrorItem> {
        let mut items: Vec<FieldErrorItem> = self
            .errors
            .errors()
            .iter()
            .filter_map(|(field, kind)| {
                let field: &str = field;
                match kind {
                    ValidationErrorsKind::Field(list) => Some((field, list)),
                    _ => None,
                }
            })
            .flat_map(|(field, list)| {
                list.iter().map(move |error| FieldErrorItem {
                    object_name: self.object_name.clone(),
                    field: (field != GLOBAL_KEY).then(|| field.to_string()),
                    code: error.code.to_string(),
                    default_message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| error.code.to_string()),
                    rejected_value: error.params.get("value").cloned(),
                })
            })
            .collect();

        items.sort_by(|a, b| {
            (a.field.is_none(), &a.field, &a.code).cmp(&(b.field.is_none(), &b.field, &b.code))
        });
        items
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.object_name, self.errors)
    }
}

impl std::error::Error for ValidationFailure {}

/// lowerCamelCase name of `T` without its module path, e.g. `EventDto` -> `eventDto`.
pub fn object_name_of<T: ?Sized>() -> String {
    let full = std::any::type_name::<T>();
    let without_generics = full.split('<').next().unwrap_or(full);
    let short = without_generics.rsplit("::").next().unwrap_or(without_generics);

    let mut chars = short.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
