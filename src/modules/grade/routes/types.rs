pub mod request {
    use serde::{Deserialize, Serialize};

    /// An HTTP-like event: the method and, for writes, a JSON-encoded body.
    #[derive(Serialize, Deserialize, Clone, Debug, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct Event {
        #[serde(default)]
        pub http_method: Option<String>,
        #[serde(default)]
        pub body: Option<String>,
    }
}

pub mod response {
    use crate::modules::grade::repository;
    use axum::{
        body::Body,
        http::{HeaderName, HeaderValue, StatusCode},
        response::IntoResponse,
    };
    use serde::{Deserialize, Serialize};
    use serde_json::{json, Value};
    use std::collections::BTreeMap;

    pub const ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";
    pub const ALLOW_HEADERS: &str = "Access-Control-Allow-Headers";
    pub const ALLOW_METHODS: &str = "Access-Control-Allow-Methods";
    pub const CONTENT_TYPE: &str = "Content-Type";

    /// An HTTP-like response: status, headers and a JSON-encoded body.
    #[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
    #[serde(rename_all = "camelCase")]
    pub struct Reply {
        pub status_code: u16,
        pub headers: BTreeMap<String, String>,
        pub body: String,
    }

    impl Reply {
        pub fn json(status: StatusCode, body: Value) -> Self {
            Self {
                status_code: status.as_u16(),
                headers: BTreeMap::from([
                    (CONTENT_TYPE.to_string(), "application/json".to_string()),
                    (ALLOW_ORIGIN.to_string(), "*".to_string()),
                ]),
                body: body.to_string(),
            }
        }

        pub fn preflight(body: Value) -> Self {
            Self {
                status_code: StatusCode::OK.as_u16(),
                headers: BTreeMap::from([
                    (ALLOW_ORIGIN.to_string(), "*".to_string()),
                    (ALLOW_HEADERS.to_string(), "Content-Type".to_string()),
                    (ALLOW_METHODS.to_string(), "GET,POST,OPTIONS".to_string()),
                ]),
                body: body.to_string(),
            }
        }

        pub fn header(&self, name: &str) -> Option<&str> {
            self.headers.get(name).map(String::as_str)
        }

        pub fn json_body(&self) -> Result<Value, serde_json::Error> {
            serde_json::from_str(&self.body)
        }
    }

    impl IntoResponse for Reply {
        fn into_response(self) -> axum::response::Response {
            let mut response = axum::response::Response::new(Body::from(self.body));
            *response.status_mut() =
                StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

            for (name, value) in self.headers {
                match (
                    HeaderName::from_bytes(name.as_bytes()),
                    HeaderValue::from_str(&value),
                ) {
                    (Ok(name), Ok(value)) => {
                        response.headers_mut().insert(name, value);
                    }
                    _ => tracing::warn!("Dropping malformed response header"),
                }
            }

            response
        }
    }

    /// Anything that aborts a request midway: body parsing or table access.
    #[derive(thiserror::Error, Debug)]
    pub enum Failure {
        #[error("Request body is missing")]
        MissingBody,
        #[error("{0}")]
        UnreadableBody(String),
        #[error("{0}")]
        MalformedBody(#[from] serde_json::Error),
        #[error("Cannot read properties of null (reading 'student_id')")]
        NullBody,
        #[error(transparent)]
        Storage(#[from] repository::Error),
    }

    impl Failure {
        pub fn kind(&self) -> &'static str {
            match self {
                Self::MissingBody | Self::MalformedBody(_) => "SyntaxError",
                Self::NullBody => "TypeError",
                Self::UnreadableBody(_) => "RequestBodyError",
                Self::Storage(err) => err.kind().as_str(),
            }
        }
    }

    pub enum Error {
        InvalidStudentIdOrGrade,
        MethodNotAllowed,
        Unexpected(Failure),
    }

    impl From<Failure> for Error {
        fn from(failure: Failure) -> Self {
            Self::Unexpected(failure)
        }
    }

    impl From<repository::Error> for Error {
        fn from(err: repository::Error) -> Self {
            Self::Unexpected(Failure::Storage(err))
        }
    }

    impl From<Error> for Reply {
        fn from(err: Error) -> Self {
            match err {
                Error::InvalidStudentIdOrGrade => Reply::json(
                    StatusCode::BAD_REQUEST,
                    json!({ "error": "Invalid student_id or grade" }),
                ),
                Error::MethodNotAllowed => Reply::json(
                    StatusCode::METHOD_NOT_ALLOWED,
                    json!({ "error": "Method not allowed" }),
                ),
                Error::Unexpected(failure) => {
                    tracing::error!("Error: {} ({})", failure, failure.kind());
                    Reply::json(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        json!({ "error": failure.to_string(), "errorType": failure.kind() }),
                    )
                }
            }
        }
    }

    pub type Response<T> = Result<T, Error>;
}
