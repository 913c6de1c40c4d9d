mod fallback;
mod fetch;
mod nav;

pub use self::{
    fallback::{Fallback, Source},
    fetch::{plan, Fetch, Payload},
    nav::{Ticket, ViewController},
};
