// Application layer: wires the deployment config, the HTTP client and the form controller.

pub mod runner;
