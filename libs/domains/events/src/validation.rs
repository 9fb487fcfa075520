//! Rules an [`EventDto`] must satisfy before it is stored.
//!
//! Every violated rule is reported; nothing short-circuits. Codes and
//! messages are part of the API:
//!
//! | rule | code | message |
//! |---|---|---|
//! | name, description present | `NotBlank` | must not be blank |
//! | all four date-times present | `NotNull` | must not be null |
//! | prices and limit `>= 0` | `Min` | must be greater than or equal to 0 |
//! | `basePrice <= maxPrice` when `maxPrice > 0` | `wrongValue` + global `wrongPrices` | |
//! | enrollment closes after it begins | `wrongValue` | |
//! | event ends after it begins and after enrollment | `wrongValue` | |

use serde::Serialize;
use std::borrow::Cow;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::EventDto;

/// Key for errors about the object as a whole.
const GLOBAL: &str = "__all__";

fn violation<T: Serialize>(
    code: &'static str,
    message: &'static str,
    rejected: Option<&T>,
) -> ValidationError {
    let mut error = ValidationError::new(code).with_message(Cow::Borrowed(message));
    if let Some(value) = rejected {
        error.add_param(Cow::Borrowed("value"), value);
    }
    error
}

impl Validate for EventDto {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        for (field, value) in [("name", &self.name), ("description", &self.description)] {
            if value.trim().is_empty() {
                errors.add(field, violation("NotBlank", "must not be blank", Some(value)));
            }
        }

        for (field, value) in [
            ("beginEnrollmentDateTime", &self.begin_enrollment_date_time),
            ("closeEnrollmentDateTime", &self.close_enrollment_date_time),
            ("beginEventDateTime", &self.begin_event_date_time),
            ("endEventDateTime", &self.end_event_date_time),
        ] {
            if value.is_none() {
                errors.add(field, violation::<()>("NotNull", "must not be null", None));
            }
        }

        for (field, value) in [
            ("basePrice", self.base_price),
            ("maxPrice", self.max_price),
            ("limitOfEnrollment", self.limit_of_enrollment),
        ] {
            if value < 0 {
                errors.add(
                    field,
                    violation("Min", "must be greater than or equal to 0", Some(&value)),
                );
            }
        }

        // maxPrice 0 means "no cap"
        if self.max_price > 0 && self.base_price > self.max_price {
            errors.add(
                "basePrice",
                violation("wrongValue", "BasePrice is wrong", Some(&self.base_price)),
            );
            errors.add(
                "maxPrice",
                violation("wrongValue", "MaxPrice is wrong", Some(&self.max_price)),
            );
            errors.add(
                GLOBAL,
                violation::<()>("wrongPrices", "Values for prices are wrong", None),
            );
        }

        if let (Some(begin), Some(close)) = (
            self.begin_enrollment_date_time,
            self.close_enrollment_date_time,
        ) && close < begin
        {
            errors.add(
                "closeEnrollmentDateTime",
                violation(
                    "wrongValue",
                    "CloseEnrollmentDateTime is wrong",
                    Some(&close),
                ),
            );
        }

        if let Some(end) = self.end_event_date_time {
            let ends_too_early = [
                self.begin_event_date_time,
                self.close_enrollment_date_time,
                self.begin_enrollment_date_time,
            ]
            .into_iter()
            .flatten()
            .any(|bound| end < bound);

            if ends_too_early {
                errors.add(
                    "endEventDateTime",
                    violation("wrongValue", "EndEventDateTime is wrong", Some(&end)),
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
