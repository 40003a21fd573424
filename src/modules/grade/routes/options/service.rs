use super::types::response;

pub fn service() -> response::Success {
    response::Success::CorsOk
}
