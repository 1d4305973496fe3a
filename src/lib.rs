pub mod cli;
pub mod error;
pub mod pagination;
pub mod protocol;

pub use cli::{ClientConfig, ServerConfig};
pub use error::ServiceError;
pub use pagination::{Pagination, paginate};
pub use protocol::{Request, Response, SearchServer};
