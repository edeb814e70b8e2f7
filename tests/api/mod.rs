//! Tests against a `wiremock` server standing in for the board and user
//! services, and against session files in temporary directories.

mod storage_tests;
mod store_tests;
mod transport_tests;
