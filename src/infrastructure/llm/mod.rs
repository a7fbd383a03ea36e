//! Generation provider implementations

mod groq;

pub use groq::GroqProvider;
