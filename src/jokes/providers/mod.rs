//! One module per joke source. Each provider binds a single endpoint to its
//! normalization strategy and owns its HTTP client; endpoints are
//! overridable for tests.

pub mod anekdot;
pub mod baneks;
pub mod dadjoke;
pub mod jokeapi;
pub mod rzhunemogu;

pub use anekdot::AnekdotRuProvider;
pub use baneks::BaneksProvider;
pub use dadjoke::DadJokeProvider;
pub use jokeapi::JokeApiProvider;
pub use rzhunemogu::RzhunemoguProvider;
