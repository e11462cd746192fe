//! The scheduling domain: who is booked when, and what still fits.

mod appointment;
pub use appointment::*;

mod availability;
pub use availability::*;

mod conflict;
pub use conflict::*;

mod ids;
pub use ids::*;

mod request;
pub use request::*;

mod resource;
pub use resource::*;

mod schedule;
pub use schedule::*;

mod slots;
pub use slots::*;

mod store;
pub use store::*;

mod validate;
pub use validate::*;
