pub mod response {
    use crate::modules::grade::routes::types::response::Reply;
    use serde_json::json;

    pub enum Success {
        CorsOk,
    }

    impl From<Success> for Reply {
        fn from(success: Success) -> Self {
            match success {
                Success::CorsOk => Reply::preflight(json!({ "message": "CORS OK" })),
            }
        }
    }
}
