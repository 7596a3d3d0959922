//! Transport layer: where validated forms are sent

mod simulated;
mod traits;

pub use simulated::SimulatedTransport;
pub use traits::{Submission, Transport, TransportError};

#[cfg(test)]
pub use traits::MockTransport;
