// src/setup.rs
//
// Configuration-to-physics setup pipeline.
//
// Three stages, run in strict order once per simulation setup:
//
//   1. default_system()        - fixed, physically plausible baseline
//   2. input::read().apply()   - user overrides (raw inputs only)
//      single_spin_system()    - optional minimal-topology override
//   3. set_derived_parameters() - recompute every quantity that couples
//      more than one raw input, and validate cross-material consistency
//
// The derivation stage is a straight-line pipeline with fatal branch points
// (unknown crystal structure, unsupported Hamiltonian, zero-norm direction)
// surfaced as typed errors; the caller turns an Err into a terminating
// diagnostic. Raw inputs are never rewritten from derived values, so the
// pipeline is idempotent and safe to re-run after further overrides.

use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::config::{GlobalConfig, SimSettings, FLAG_DIPOLAR, FLAG_EXCHANGE};
use crate::constants::K_BOLTZMANN;
use crate::crystal::CrystalStructure;
use crate::error::SetupError;
use crate::input;
use crate::material::{Material, MaterialConstants};
use crate::vec3::try_unit;

/// Seed for the shared thermal-noise source, fixed so identical inputs give
/// identical runs on every rank.
const DEFAULT_RNG_SEED: u64 = 1234;

/// Complete setup context for one simulation run: global configuration,
/// run settings, the material list and the shared random source.
///
/// Written exclusively by the setup stages; read-only for all later
/// simulation code.
#[derive(Debug, Clone, Serialize)]
pub struct SimSetup {
    pub global: GlobalConfig,
    pub sim: SimSettings,
    /// Material list; the index is the material id.
    pub materials: Vec<Material>,
    /// Seedable uniform source consumed by the thermal-noise term.
    #[serde(skip_serializing)]
    pub rng: StdRng,
}

impl SimSetup {
    /// Default stage: reset everything to the documented baseline (one
    /// cobalt material, simple-cubic lattice, generic Hamiltonian) and
    /// reseed the shared random source. Always succeeds.
    pub fn default_system() -> Self {
        Self {
            global: GlobalConfig::default(),
            sim: SimSettings::default(),
            materials: vec![Material::cobalt()],
            rng: StdRng::seed_from_u64(DEFAULT_RNG_SEED),
        }
    }

    /// Single-spin override: force a minimal 2x2x2 unit-cell simple-cubic
    /// system and disable the multi-spin contributions (exchange, dipolar),
    /// leaving anisotropy/applied/thermal untouched. Used to isolate
    /// on-site physics for reduced-degree-of-freedom testing.
    pub fn single_spin_system(&mut self) {
        let g = &mut self.global;

        g.creation_flags = [false; 10];

        g.lattice_constant = [3.0; 3];
        g.system_dimensions = [2.0; 3];

        g.particle_scale = 50.0;
        g.particle_spacing = 10.0;
        g.particle_creation_parity = 0;

        g.crystal_structure = "sc".to_string();
        g.hamiltonian_type = "generic".to_string();

        g.hamiltonian_flags[FLAG_EXCHANGE] = false;
        g.hamiltonian_flags[FLAG_DIPOLAR] = false;
    }

    /// Derivation stage: recompute all derived quantities from the current
    /// raw inputs and validate the configuration.
    ///
    /// Every rank runs the identical sequence; only the primary rank emits
    /// diagnostics, so numeric agreement across ranks is guaranteed by
    /// construction.
    pub fn set_derived_parameters(&mut self, is_primary: bool) -> Result<(), SetupError> {
        // (a) geometric discretisation
        let a = self.global.lattice_constant;
        self.global.lattice_space_conversion = [a[0] * 0.5, a[1] * 0.5 / 3.0, a[2] * 0.5];

        let d = self.global.system_dimensions;
        self.global.int_system_dimensions = [
            2 * iround(d[0] / a[0]),
            6 * iround(d[1] / a[1]),
            2 * iround(d[2] / a[2]),
        ];

        let structure = CrystalStructure::from_name(&self.global.crystal_structure).ok_or_else(
            || SetupError::UnknownCrystalStructure {
                structure: self.global.crystal_structure.clone(),
                scope: "system".to_string(),
            },
        )?;
        self.global.num_nearest_neighbours = structure.num_nearest_neighbours();
        let atoms_per_cell = structure.atoms_per_unit_cell();

        // (b) Hamiltonian neighbour-count resolution
        self.global.hamiltonian_num_neighbours = if self.global.hamiltonian_type == "generic" {
            self.global.num_nearest_neighbours
        } else {
            0
        };
        if self.global.hamiltonian_num_neighbours == 0 {
            return Err(SetupError::UnsupportedHamiltonian(
                self.global.hamiltonian_type.clone(),
            ));
        }

        // (c) time-constant refresh; must precede the thermal-field term
        self.global.dt = self.global.dt_si * self.global.gamma_si;
        self.global.half_dt = 0.5 * self.global.dt;

        // (d) applied-field direction to unit length
        self.sim.applied_field = try_unit(self.sim.applied_field)
            .ok_or_else(|| SetupError::ZeroNormVector("applied field".to_string()))?;

        // (e) per-material constants
        let v_cell = a[0] * a[1] * a[2];
        let dt = self.global.dt;
        let global_structure = &self.global.crystal_structure;
        let num_materials = self.materials.len();

        for (idx, mat) in self.materials.iter_mut().enumerate() {
            // Exactly one of {moment, magnetisation} is authoritative; the
            // other is derived through the unit-cell volume.
            if mat.moment_flag {
                mat.magnetisation = atoms_per_cell * mat.mu_s_si / v_cell;
            } else {
                mat.mu_s_si = mat.magnetisation * v_cell / atoms_per_cell;
            }

            // Anisotropy as energy/atom. An energy-density input is rescaled
            // into the derived value only; ku1_si itself stays as supplied,
            // so a second derivation pass cannot double-scale it.
            let ku_atom_si = if mat.anis_flag {
                mat.ku1_si
            } else {
                let rescaled = mat.ku1_si * v_cell / atoms_per_cell;
                log::debug!("material {idx}: anisotropy density rescaled to {rescaled} J/atom");
                rescaled
            };

            mat.initial_spin = try_unit(mat.initial_spin).ok_or_else(|| {
                SetupError::ZeroNormVector(format!("material {idx} initial spin"))
            })?;

            if mat.hamiltonian_type != "generic" {
                return Err(SetupError::UnsupportedHamiltonian(
                    mat.hamiltonian_type.clone(),
                ));
            }

            // Empty per-material structure inherits the global one.
            let structure_name = if mat.crystal_structure.is_empty() {
                global_structure
            } else {
                &mat.crystal_structure
            };
            let scope = format!("material {idx} '{}'", mat.name);
            let mat_structure = CrystalStructure::from_name(structure_name).ok_or_else(|| {
                SetupError::UnknownCrystalStructure {
                    structure: structure_name.clone(),
                    scope: scope.clone(),
                }
            })?;
            let shell =
                mat_structure
                    .neighbour_shell()
                    .ok_or_else(|| SetupError::UnknownCrystalStructure {
                        structure: structure_name.clone(),
                        scope,
                    })?;

            let one_oneplusalpha_sq = -mat.gamma_rel / (1.0 + mat.alpha * mat.alpha);

            mat.constants = MaterialConstants {
                jij: (0..num_materials).map(|j| mat.jij_si[j] / mat.mu_s_si).collect(),
                ku: ku_atom_si / mat.mu_s_si,
                h_th_sigma: (2.0 * mat.alpha * K_BOLTZMANN
                    / (mat.mu_s_si * mat.gamma_rel * dt))
                    .sqrt(),
                one_oneplusalpha_sq,
                alpha_oneplusalpha_sq: mat.alpha * one_oneplusalpha_sq,
                num_nearest_neighbours: shell.num_neighbours,
                hamiltonian_num_neighbours: shell.num_neighbours,
                cutoff: shell.cutoff,
            };
        }

        // (f) cross-material spatial-overlap diagnostic
        self.warn_on_range_overlap(is_primary);

        Ok(())
    }

    /// Warn when two geometry-restricted materials occupy overlapping height
    /// ranges. Diagnostic only: overlap usually means the model wants an
    /// alloy (mixed material at a site) rather than two stacked materials.
    fn warn_on_range_overlap(&self, is_primary: bool) {
        for (i, mat) in self.materials.iter().enumerate() {
            if !mat.geometry {
                continue;
            }
            for (j, other) in self.materials.iter().enumerate() {
                if i == j {
                    continue;
                }
                if ranges_overlap((mat.min, mat.max), (other.min, other.max)) && is_primary {
                    log::warn!(
                        "material {i} '{}' range [{}, {}] overlaps material {j} '{}' range [{}, {}] \
                         - possibly use an alloy definition instead",
                        mat.name,
                        mat.min,
                        mat.max,
                        other.name,
                        other.min,
                        other.max,
                    );
                }
            }
        }
    }
}

/// True when an endpoint of `a` lies strictly inside the open interval `b`.
/// Touching ranges ([0,10] and [10,20]) do not overlap.
fn ranges_overlap(a: (f64, f64), b: (f64, f64)) -> bool {
    (a.0 > b.0 && a.0 < b.1) || (a.1 > b.0 && a.1 < b.1)
}

/// Round to the nearest integer (half away from zero).
#[inline]
fn iround(x: f64) -> i32 {
    x.round() as i32
}

/// Top-level setup orchestrator: defaults, input-file overrides, optional
/// single-spin override, then derivation. Returns the completed, from-here-on
/// read-only setup, or the first fatal configuration error.
pub fn initialise(infile: &Path, is_primary: bool) -> Result<SimSetup, SetupError> {
    if is_primary {
        log::info!("Initialising system variables");
    }

    let mut setup = SimSetup::default_system();

    input::read(infile)?.apply(&mut setup);

    if setup.global.single_spin {
        setup.single_spin_system();
    }

    setup.set_derived_parameters(is_primary)?;

    Ok(setup)
}
