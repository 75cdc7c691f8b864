// src/constants.rs

/// Bohr magneton (J/T).
pub const MU_BOHR: f64 = 9.27400915e-24;

/// Boltzmann constant (J/K), as used in the thermal-field derivation.
pub const K_BOLTZMANN: f64 = 1.3806503e-23;

/// Electron gyromagnetic ratio (rad s^-1 T^-1). Also the default SI->reduced
/// time conversion: one reduced time unit is gamma_si * dt_si.
pub const GAMMA_ELECTRON: f64 = 1.76e11;
