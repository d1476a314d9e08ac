pub mod capture_file_parser;
pub mod errors;
pub mod execute;
pub mod http_request;
pub mod http_request_executor;
pub mod http_response;
pub mod logger;
pub mod raw_http;
pub mod request_resolver;
