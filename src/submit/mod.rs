//! Turn submission: payloads, transports and the submitter.

mod error;
mod payload;
mod submitter;
mod transport;

pub use error::SubmitError;
pub use payload::{Submission, TurnPayload, build_payload};
pub use submitter::{Delivery, SubmitDelays, SubmitHandle, TurnSubmitter};
pub use transport::{HttpTransport, LogTransport, TurnTransport};
