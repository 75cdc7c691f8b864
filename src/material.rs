// src/material.rs
//
// Per-material parameters.
//
// `Material` holds the physically-expressed inputs (SI units) exactly as the
// user supplied them; the derivation stage never rewrites an authoritative
// input. Everything the integrator consumes lives in `MaterialConstants`,
// which is recomputed wholesale on every derivation pass.

use serde::Serialize;

use crate::constants::MU_BOHR;

/// One material species, raw input side.
#[derive(Debug, Clone, Serialize)]
pub struct Material {
    /// Display name.
    pub name: String,
    /// Atomic species label.
    pub element: String,

    /// Gilbert damping constant.
    pub alpha: f64,
    /// Gyromagnetic ratio relative to the free-electron value.
    pub gamma_rel: f64,

    /// Atomic magnetic moment (J/T). Authoritative when `moment_flag` is set.
    pub mu_s_si: f64,
    /// Bulk magnetisation (J/T/m^3). Authoritative when `moment_flag` is
    /// unset; the other of the two is derived via the unit-cell volume.
    pub magnetisation: f64,
    /// True: `mu_s_si` is the authoritative moment input.
    pub moment_flag: bool,

    /// Uniaxial anisotropy constant (J/atom when `anis_flag` is set,
    /// otherwise an energy density rescaled during derivation).
    pub ku1_si: f64,
    pub anis_flag: bool,

    /// Exchange coupling to each material (J), one entry per material.
    pub jij_si: Vec<f64>,

    /// Initial spin direction; normalised to unit length by derivation.
    pub initial_spin: [f64; 3],

    /// Hamiltonian family; only "generic" is supported.
    pub hamiltonian_type: String,
    /// Crystal structure name; empty means "inherit the global structure".
    pub crystal_structure: String,

    /// When set, this material only occupies the [min, max] height range.
    pub geometry: bool,
    pub min: f64,
    pub max: f64,

    /// Reduced-unit constants; valid only after a derivation pass.
    pub constants: MaterialConstants,
}

/// Reduced-unit material constants consumed by the Hamiltonian evaluator
/// and the integrator. Write-once per derivation pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MaterialConstants {
    /// Reduced exchange couplings, jij_si / mu_s_si.
    pub jij: Vec<f64>,
    /// Reduced anisotropy, per-atom ku1_si / mu_s_si.
    pub ku: f64,
    /// Thermal-field standard deviation per sqrt(K).
    pub h_th_sigma: f64,
    /// LLG drift coefficient, -gamma_rel / (1 + alpha^2).
    pub one_oneplusalpha_sq: f64,
    /// LLG damping coefficient, alpha * one_oneplusalpha_sq.
    pub alpha_oneplusalpha_sq: f64,
    pub num_nearest_neighbours: usize,
    pub hamiltonian_num_neighbours: usize,
    /// Interaction cutoff radius in lattice units.
    pub cutoff: f64,
}

impl Material {
    /// Default material: cobalt with a generic nearest-neighbour Hamiltonian.
    pub fn cobalt() -> Self {
        Self {
            name: "Co".to_string(),
            element: "Ag".to_string(),
            alpha: 0.1,
            gamma_rel: 1.0,
            mu_s_si: 1.5 * MU_BOHR,
            magnetisation: 0.0,
            moment_flag: true,
            ku1_si: -4.644e-24,
            anis_flag: true,
            jij_si: vec![-11.2e-21],
            initial_spin: [0.0, 0.0, 1.0],
            hamiltonian_type: "generic".to_string(),
            crystal_structure: String::new(),
            geometry: false,
            min: 0.0,
            max: 0.0,
            constants: MaterialConstants::default(),
        }
    }

    /// Fresh material slot for override lists longer than the default one.
    /// Same baseline as `cobalt` but unnamed.
    pub fn unnamed() -> Self {
        Self {
            name: String::new(),
            element: String::new(),
            ..Self::cobalt()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cobalt_baseline_values() {
        let m = Material::cobalt();
        assert_eq!(m.alpha, 0.1);
        assert_eq!(m.mu_s_si, 1.5 * 9.27400915e-24);
        assert_eq!(m.ku1_si, -4.644e-24);
        assert_eq!(m.jij_si, vec![-11.2e-21]);
        assert!(m.moment_flag);
        assert!(m.anis_flag);
        assert!(m.crystal_structure.is_empty());
    }
}
