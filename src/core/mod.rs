pub mod client;
pub mod controller;
pub mod form;
pub mod render;

pub use crate::domain::model::FormRecord;
pub use crate::domain::ports::{EndpointProvider, PredictionService};
pub use crate::utils::error::Result;
