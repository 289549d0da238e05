//! Request routing: pattern matcher, route table and middleware chain.
//!
//! actix-web only hosts the server; every application request enters
//! through [`serve`] and is resolved here.

pub mod handler;
pub mod matcher;
pub mod middleware;
pub mod router;

pub use handler::{BoxedHandler, Handler, bind, serve};
pub use matcher::{matches, path_id, path_segment_id};
pub use middleware::{Middleware, RequestId, access_log, chain, request_id};
pub use router::Router;
