mod http;
mod simulated;

pub use http::HttpTransport;
pub use simulated::SimulatedTransport;
