pub mod attributes;
pub mod category;
pub mod errors;
mod fulfillment;
pub mod request;
pub mod response;
mod serialization;
pub mod skill;

pub use attributes::Attributes;
pub use fulfillment::Alexa;
pub use request::RequestEnvelope;
pub use response::{Response, ResponseEnvelope};
pub use skill::Skill;
