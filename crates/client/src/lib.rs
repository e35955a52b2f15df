//! Client side of the `/api/whereis` endpoint: date resolution, query
//! assembly and the HTTP adapter.

mod client;
mod date;
mod error;
mod query;
mod trace;

pub use self::client::{Request, WHEREIS_PATH, WhereisApi, WhereisClient};
pub use self::date::{DateResolver, LAYOUT};
pub use self::error::{Error, Result};
pub use self::query::{Filters, Query};
pub use self::trace::{NoTrace, TraceSink, WriterTrace};
