// Domain layer: form schemas, one-hot table, presets and the prediction-service port.

pub mod kind;
pub mod model;
pub mod onehot;
pub mod ports;
pub mod presets;
