// API layer module (HTTP adapter)
// Translates query strings into search conditions and rows into JSON

pub mod errors;
pub mod handlers;
pub mod router;
pub mod state;
