//! Messaging relay: `POST /send-email` and `POST /send-whatsapp`
//!
//! Requests are forwarded to Resend and Twilio when credentials are
//! configured. Without them the relay simulates delivery: it logs the
//! message, waits a moment and answers with a `sim_` id.

pub mod handler;
pub mod providers;
pub mod server;

pub use handler::{Relay, RelayResponse, SimulatedDelays};
pub use providers::{EmailProvider, ResendClient, TwilioClient, WhatsAppProvider};
pub use server::serve;
