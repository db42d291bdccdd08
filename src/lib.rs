//! lockrain - Matrix-style binary rain around a rotating padlock
//!
//! Renders a decorative 3D scene in the terminal: columns of binary digits
//! fall along an invisible cylinder, facing inward, while a padlock
//! wireframe spins at the center. The camera orbits under keyboard control.

pub mod assets;
pub mod config;
pub mod field;
pub mod math;
pub mod scene;
pub mod viz;

pub use config::LockrainConfig;
pub use scene::Scene;
