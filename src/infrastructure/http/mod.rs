//! HTTP Client Facade
//!
//! Request description, the [`Transport`] seam and its `reqwest`
//! implementation, and the credentials shared with the auth store.

mod credentials;
mod request;
mod transport;

pub use credentials::{Credentials, Session, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY};
pub use request::{ApiRequest, Method, QueryParams, RequestBody};
pub use transport::{HttpTransport, Transport};

#[cfg(test)]
pub use transport::MockTransport;
