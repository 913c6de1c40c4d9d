mod cache;
mod client;
mod request;

pub use self::{
    cache::ResponseCache,
    client::{decode, parse_envelope, Backend, WebApi},
    request::{Endpoint, Method, RequestBuilder},
};
