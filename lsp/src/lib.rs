pub mod convert;
mod server;

pub use server::{MelLanguageServer, run};
