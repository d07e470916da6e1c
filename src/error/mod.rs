mod response_error;

pub use response_error::{json_error_handler, query_error_handler, ResponseError};
