pub mod firefly;
pub mod hs;
pub mod pso;

pub use firefly::FireflySolver;
pub use hs::HSSolver;
pub use pso::{PSOSolver, SwarmState};
