//! In-process stub of the hosted backend, for integration tests.
//!
//! Serves the auth endpoints and the PostgREST-style table endpoints the
//! gateway talks to, bound to an ephemeral localhost port. State lives in
//! memory behind a mutex; tests can inspect it directly and flip failure
//! switches (e.g. making membership inserts fail to exercise the
//! create-then-join gap).

mod backend;

pub use backend::{StubBackend, API_KEY};
