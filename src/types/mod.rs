//! Type definitions for the API client and the bundled server
//!
//! - Refresh endpoint request/response bodies
//! - Server responses
//! - Page rendering context and results

pub mod page;
pub mod request;
pub mod response;

pub use page::{PageContext, PageResult, Redirect};
pub use request::{CpfValidationRequest, RefreshRequest, RefreshResponse};
pub use response::{CpfValidationResponse, ErrorResponse, PingResponse};
