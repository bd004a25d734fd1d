pub mod common {
    pub use inkpost_common::*;
}

#[cfg(feature = "request")]
pub mod request {
    pub use inkpost_request::*;
}

#[cfg(feature = "service")]
pub mod service {
    pub use inkpost_service::*;
}
