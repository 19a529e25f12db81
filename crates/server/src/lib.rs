pub mod errors;
pub mod observability;
pub mod routes;
pub mod startup;
pub mod state;

pub use startup::{build_store, run};
pub use state::AppState;
