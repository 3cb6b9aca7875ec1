// Headless editor client: the session state machine plus the pieces it drives
// (relay transport, result presentation, onboarding flag). Rendering is left to
// whatever front end embeds it.
pub mod onboarding;
pub mod presentation;
pub mod session;
pub mod transport;

pub use onboarding::{JsonFileStore, MemoryStore, OnboardingStore};
pub use presentation::{DisplayState, DownloadFile, ResultView};
pub use session::{PendingSubmission, Studio, SubmitOutcome};
pub use transport::{GenerateTransport, RelayClient, TransportError};
