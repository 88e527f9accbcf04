//! Hosted table backend.
//!
//! Talks to a PostgREST-style endpoint, as exposed by hosted
//! backend-as-a-service products, at `{base}/rest/v1/{table}`.
//!
//! | operation   | request                                    |
//! |-------------|--------------------------------------------|
//! | select all  | `GET ?select=*&order=title.asc`            |
//! | select ids  | `GET ?select=id`                           |
//! | insert      | `POST` with a JSON array body              |
//! | update      | `PATCH ?id=eq.{id}` with the changed fields |
//! | delete      | `DELETE ?id=eq.{id}`                       |

mod error;
mod store;

pub use store::RestEntryStore;
