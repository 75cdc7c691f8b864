// src/config.rs
//
// Raw (user-facing) and derived global configuration for one simulation run.
//
// Raw fields hold physically-expressed inputs (SI units, Angstrom lengths)
// and are owned by the default/override stages. Derived fields are owned by
// the derivation stage and recomputed wholesale on every pass, so the
// pipeline can be re-run without accumulating state.

use serde::Serialize;

use crate::constants::GAMMA_ELECTRON;

/// Indices into the Hamiltonian contribution flags.
pub const FLAG_EXCHANGE: usize = 0;
pub const FLAG_ANISOTROPY: usize = 1;
pub const FLAG_APPLIED: usize = 2;
pub const FLAG_THERMAL: usize = 3;
pub const FLAG_DIPOLAR: usize = 4;

/// Process-wide configuration, one instance per simulation run.
#[derive(Debug, Clone, Serialize)]
pub struct GlobalConfig {
    // ---- raw system parameters ----
    /// Global crystal structure name; materials with an empty structure
    /// inherit this. Validated during derivation.
    pub crystal_structure: String,
    /// Hamiltonian family; only "generic" is supported by derivation.
    pub hamiltonian_type: String,
    /// Unit-cell lattice constants (Angstrom).
    pub lattice_constant: [f64; 3],
    /// Physical system extents (Angstrom).
    pub system_dimensions: [f64; 3],
    /// Diameter of particles/grains (Angstrom).
    pub particle_scale: f64,
    /// Spacing between particles (Angstrom).
    pub particle_spacing: f64,
    /// Offset of particle centre (odd/even).
    pub particle_creation_parity: i32,
    /// Selects the single-spin override before derivation.
    pub single_spin: bool,

    // ---- integration time constants ----
    /// Time step (seconds).
    pub dt_si: f64,
    /// Gyromagnetic ratio used for the SI -> reduced time conversion.
    pub gamma_si: f64,
    /// Reduced time step, always dt_si * gamma_si. Never read before a
    /// derivation pass has recomputed it from the current inputs.
    pub dt: f64,
    pub half_dt: f64,

    // ---- contribution switches ----
    /// Active Hamiltonian contributions, indexed by the FLAG_* constants
    /// (0 exchange, 1 anisotropy, 2 applied field, 3 thermal, 4 dipolar).
    pub hamiltonian_flags: [bool; 10],
    /// System creation flags consumed by the structure builder.
    pub creation_flags: [bool; 10],

    // ---- derived system parameters ----
    /// Lattice -> fractional coordinate scale factors.
    pub lattice_space_conversion: [f64; 3],
    /// Integer discretisation of the system extents.
    pub int_system_dimensions: [i32; 3],
    pub num_nearest_neighbours: usize,
    pub hamiltonian_num_neighbours: usize,
}

impl Default for GlobalConfig {
    /// Baseline system: 3 Angstrom simple-cubic lattice, 100^3 Angstrom
    /// extents, generic Hamiltonian with exchange/anisotropy/applied/thermal
    /// on and dipolar off, femtosecond time step.
    fn default() -> Self {
        let dt_si = 1.0e-15;
        let gamma_si = GAMMA_ELECTRON;
        // dt must be valid before the thermal-field derivation runs.
        let dt = dt_si * gamma_si;

        let mut hamiltonian_flags = [false; 10];
        hamiltonian_flags[FLAG_EXCHANGE] = true;
        hamiltonian_flags[FLAG_ANISOTROPY] = true;
        hamiltonian_flags[FLAG_APPLIED] = true;
        hamiltonian_flags[FLAG_THERMAL] = true;

        Self {
            crystal_structure: "sc".to_string(),
            hamiltonian_type: "generic".to_string(),
            lattice_constant: [3.0; 3],
            system_dimensions: [100.0; 3],
            particle_scale: 50.0,
            particle_spacing: 10.0,
            particle_creation_parity: 0,
            single_spin: false,
            dt_si,
            gamma_si,
            dt,
            half_dt: 0.5 * dt,
            hamiltonian_flags,
            creation_flags: [false; 10],
            lattice_space_conversion: [0.0; 3],
            int_system_dimensions: [0; 3],
            num_nearest_neighbours: 0,
            hamiltonian_num_neighbours: 0,
        }
    }
}

/// Time-integration scheme selected for the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Integrator {
    LlgHeun,
    MonteCarlo,
}

impl Integrator {
    pub fn from_arg(s: &str) -> Option<Self> {
        match s {
            "llg-heun" | "llg" | "heun" => Some(Self::LlgHeun),
            "monte-carlo" | "mc" => Some(Self::MonteCarlo),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LlgHeun => "llg-heun",
            Self::MonteCarlo => "monte-carlo",
        }
    }
}

/// Run-level simulation settings consumed by the integrator.
#[derive(Debug, Clone, Serialize)]
pub struct SimSettings {
    pub integrator: Integrator,
    /// Total simulation time steps (single run).
    pub total_time: u64,
    /// Time steps in a loop, e.g. hysteresis or Tc sweeps.
    pub loop_time: u64,
    /// Time steps between statistics collection.
    pub partial_time: u64,
    /// Equilibration time steps before the main loop.
    pub equilibration_time: u64,
    /// Constant system temperature (K).
    pub temperature: f64,
    /// Applied field strength (T).
    pub applied_field_strength: f64,
    /// Applied field direction; normalised to unit length by derivation.
    pub applied_field: [f64; 3],
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            integrator: Integrator::LlgHeun,
            total_time: 1_000_000,
            loop_time: 0,
            partial_time: 100,
            equilibration_time: 100_000,
            temperature: 0.0,
            applied_field_strength: 0.0,
            applied_field: [0.0, 0.0, 1.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_flags_enable_local_terms_only() {
        let g = GlobalConfig::default();
        assert!(g.hamiltonian_flags[FLAG_EXCHANGE]);
        assert!(g.hamiltonian_flags[FLAG_ANISOTROPY]);
        assert!(g.hamiltonian_flags[FLAG_APPLIED]);
        assert!(g.hamiltonian_flags[FLAG_THERMAL]);
        assert!(!g.hamiltonian_flags[FLAG_DIPOLAR]);
        assert!(g.creation_flags.iter().all(|&f| !f));
    }

    #[test]
    fn default_time_constants_are_consistent() {
        let g = GlobalConfig::default();
        assert_eq!(g.dt, g.dt_si * g.gamma_si);
        assert_eq!(g.half_dt, 0.5 * g.dt);
    }

    #[test]
    fn integrator_round_trips_through_names() {
        for i in [Integrator::LlgHeun, Integrator::MonteCarlo] {
            assert_eq!(Integrator::from_arg(i.as_str()), Some(i));
        }
        assert_eq!(Integrator::from_arg("mc"), Some(Integrator::MonteCarlo));
        assert!(Integrator::from_arg("verlet").is_none());
    }
}
