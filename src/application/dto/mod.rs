/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod network_request;
mod network_response;
mod output_format;

pub use network_request::{NetworkRequest, DEFAULT_MAX_LEVELS};
pub use network_response::NetworkResponse;
pub use output_format::OutputFormat;
