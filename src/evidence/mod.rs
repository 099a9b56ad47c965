//! Ready-made collaborators: JSON recognition, Ed25519 signing and a directory outbox

pub mod cryptographer;
pub mod hash;
pub mod outbox;
pub mod recognizer;
pub mod signature;

pub use cryptographer::{verify_signed_content, Ed25519Cryptographer, SignedContent};
pub use hash::HashInfo;
pub use outbox::OutboxSender;
pub use recognizer::JsonRecognizer;
pub use signature::{KeyManager, SignatureInfo};
