pub mod request {
    use crate::utils::number;
    use serde_json::Value;
    use std::borrow::Cow;
    use validator::{Validate, ValidationError};

    fn validate_grade(payload: &Payload) -> Result<(), ValidationError> {
        match payload.grade.is_finite() {
            true => Ok(()),
            false => Err(ValidationError::new("INVALID_GRADE")
                .with_message(Cow::from("Grade must be a finite number"))),
        }
    }

    #[derive(Debug, Validate)]
    #[validate(schema(function = "validate_grade"))]
    pub struct Payload {
        #[validate(length(min = 1, code = "INVALID_STUDENT_ID"))]
        pub student_id: String,
        pub grade: f64,
    }

    impl From<&Value> for Payload {
        /// Non-string student ids become empty and fail validation.
        fn from(body: &Value) -> Self {
            Self {
                student_id: body
                    .get("student_id")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                grade: number::coerce(body.get("grade")),
            }
        }
    }
}

pub mod response {
    use crate::modules::grade::routes::types::response::Reply;
    use axum::http::StatusCode;
    use serde_json::json;

    pub enum Success {
        Saved { average: f64, items_saved: usize },
    }

    impl From<Success> for Reply {
        fn from(success: Success) -> Self {
            match success {
                // itemsSaved counts every numeric grade in the table after the insert
                Success::Saved {
                    average,
                    items_saved,
                } => Reply::json(
                    StatusCode::OK,
                    json!({ "average": average, "itemsSaved": items_saved }),
                ),
            }
        }
    }
}
