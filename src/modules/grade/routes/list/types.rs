pub mod response {
    use crate::modules::grade::{routes::types::response::Reply, summary::GradeEntry};
    use axum::http::StatusCode;
    use serde_json::json;

    pub enum Success {
        Grades { grades: Vec<GradeEntry>, average: f64 },
    }

    impl From<Success> for Reply {
        fn from(success: Success) -> Self {
            match success {
                Success::Grades { grades, average } => Reply::json(
                    StatusCode::OK,
                    json!({ "grades": grades, "average": average }),
                ),
            }
        }
    }
}
