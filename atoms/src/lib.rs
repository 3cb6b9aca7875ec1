// Domain atoms for the photo editor. Each atom keeps its wire/domain types in
// `model`, its pure logic in `service`, and (where the relay exposes it) its HTTP
// handler in `http`. Atoms take provider clients as arguments, they never own them.
pub mod error;
pub mod modes;
pub mod settings;
pub mod media;
pub mod crop;
pub mod generation;

pub use error::ValidationError;
pub use modes::model::EditingMode;
