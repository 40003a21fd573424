use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// A grade as written by this service.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct GradeRecord {
    pub student_id: String,
    pub timestamp: i64,
    pub grade: f64,
}

/// A grade as read back from the table. Nothing about the stored shape is
/// trusted, so every field is optional and `grade` keeps whatever type the
/// table handed back.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, sqlx::FromRow)]
pub struct StoredGrade {
    #[serde(default)]
    pub student_id: Option<String>,
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub grade: Option<Value>,
}

impl From<GradeRecord> for StoredGrade {
    fn from(record: GradeRecord) -> Self {
        Self {
            student_id: Some(record.student_id),
            timestamp: Some(record.timestamp),
            grade: Some(json!(record.grade)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Unavailable,
    Rejected,
    Decode,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unavailable => "StorageUnavailable",
            Self::Rejected => "StorageRejected",
            Self::Decode => "StorageDecode",
        }
    }
}

#[derive(thiserror::Error, Clone, Debug)]
#[error("{message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

/// The table grades live in.
///
/// `scan` returns a single unfiltered page; no continuation is followed.
#[async_trait]
pub trait GradeStore: Send + Sync {
    async fn scan(&self) -> Result<Vec<StoredGrade>, Error>;

    async fn put(&self, record: GradeRecord) -> Result<(), Error>;
}
