// src/input.rs
//
// Input-file reader for the override stage.
//
// The reader is a thin boundary: it deserialises a JSON input file into
// records of optional fields and overlays the present ones onto an
// already-defaulted setup. Raw inputs only; derived quantities are always
// recomputed afterwards by the derivation stage, so nothing a user set here
// can be lost to a recompute.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::config::{
    FLAG_ANISOTROPY, FLAG_APPLIED, FLAG_DIPOLAR, FLAG_EXCHANGE, FLAG_THERMAL,
};
use crate::error::SetupError;
use crate::material::Material;
use crate::setup::SimSetup;

/// Parsed input file: every field optional, missing fields keep defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct InputFile {
    // system
    pub crystal_structure: Option<String>,
    pub hamiltonian_type: Option<String>,
    pub lattice_constant: Option<[f64; 3]>,
    pub system_dimensions: Option<[f64; 3]>,
    pub particle_scale: Option<f64>,
    pub particle_spacing: Option<f64>,
    pub single_spin: Option<bool>,

    // integration
    pub dt_si: Option<f64>,
    pub gamma_si: Option<f64>,
    pub integrator: Option<String>,
    pub total_time: Option<u64>,
    pub loop_time: Option<u64>,
    pub partial_time: Option<u64>,
    pub equilibration_time: Option<u64>,
    pub temperature: Option<f64>,

    // applied field
    pub applied_field_strength: Option<f64>,
    pub applied_field: Option<[f64; 3]>,

    // Hamiltonian contribution switches
    pub exchange: Option<bool>,
    pub anisotropy: Option<bool>,
    pub applied: Option<bool>,
    pub thermal: Option<bool>,
    pub dipolar: Option<bool>,

    pub materials: Vec<MaterialInput>,
}

/// Per-material overrides, index-aligned with the material list.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MaterialInput {
    pub name: Option<String>,
    pub element: Option<String>,
    pub alpha: Option<f64>,
    pub gamma_rel: Option<f64>,
    pub mu_s_si: Option<f64>,
    pub magnetisation: Option<f64>,
    pub moment_flag: Option<bool>,
    pub ku1_si: Option<f64>,
    pub anis_flag: Option<bool>,
    pub jij_si: Option<Vec<f64>>,
    pub initial_spin: Option<[f64; 3]>,
    pub crystal_structure: Option<String>,
    pub geometry: Option<bool>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Read an input file, or fail with a fatal diagnostic naming the file.
pub fn read(path: &Path) -> Result<InputFile, SetupError> {
    let file = File::open(path).map_err(|source| SetupError::InputFileNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| SetupError::InputParse {
        path: path.to_path_buf(),
        source,
    })
}

impl InputFile {
    /// Overlay every present field onto `setup`.
    ///
    /// The material list grows to the number of entries supplied; new slots
    /// start from the unnamed baseline. Exchange rows are padded with zero
    /// coupling so each material carries one entry per material.
    pub fn apply(&self, setup: &mut SimSetup) {
        let g = &mut setup.global;
        if let Some(v) = &self.crystal_structure {
            g.crystal_structure = v.clone();
        }
        if let Some(v) = &self.hamiltonian_type {
            g.hamiltonian_type = v.clone();
        }
        if let Some(v) = self.lattice_constant {
            g.lattice_constant = v;
        }
        if let Some(v) = self.system_dimensions {
            g.system_dimensions = v;
        }
        if let Some(v) = self.particle_scale {
            g.particle_scale = v;
        }
        if let Some(v) = self.particle_spacing {
            g.particle_spacing = v;
        }
        if let Some(v) = self.single_spin {
            g.single_spin = v;
        }
        if let Some(v) = self.dt_si {
            g.dt_si = v;
        }
        if let Some(v) = self.gamma_si {
            g.gamma_si = v;
        }

        if let Some(v) = self.exchange {
            g.hamiltonian_flags[FLAG_EXCHANGE] = v;
        }
        if let Some(v) = self.anisotropy {
            g.hamiltonian_flags[FLAG_ANISOTROPY] = v;
        }
        if let Some(v) = self.applied {
            g.hamiltonian_flags[FLAG_APPLIED] = v;
        }
        if let Some(v) = self.thermal {
            g.hamiltonian_flags[FLAG_THERMAL] = v;
        }
        if let Some(v) = self.dipolar {
            g.hamiltonian_flags[FLAG_DIPOLAR] = v;
        }

        let s = &mut setup.sim;
        if let Some(v) = &self.integrator {
            match crate::config::Integrator::from_arg(v) {
                Some(i) => s.integrator = i,
                None => log::warn!("unknown integrator '{v}', keeping {}", s.integrator.as_str()),
            }
        }
        if let Some(v) = self.total_time {
            s.total_time = v;
        }
        if let Some(v) = self.loop_time {
            s.loop_time = v;
        }
        if let Some(v) = self.partial_time {
            s.partial_time = v;
        }
        if let Some(v) = self.equilibration_time {
            s.equilibration_time = v;
        }
        if let Some(v) = self.temperature {
            s.temperature = v;
        }
        if let Some(v) = self.applied_field_strength {
            s.applied_field_strength = v;
        }
        if let Some(v) = self.applied_field {
            s.applied_field = v;
        }

        if !self.materials.is_empty() {
            while setup.materials.len() < self.materials.len() {
                setup.materials.push(Material::unnamed());
            }
            for (mat, over) in setup.materials.iter_mut().zip(&self.materials) {
                over.apply(mat);
            }
        }

        // One exchange entry per material, missing couplings read as zero.
        let num_materials = setup.materials.len();
        for mat in &mut setup.materials {
            mat.jij_si.resize(num_materials, 0.0);
        }
    }
}

impl MaterialInput {
    fn apply(&self, mat: &mut Material) {
        if let Some(v) = &self.name {
            mat.name = v.clone();
        }
        if let Some(v) = &self.element {
            mat.element = v.clone();
        }
        if let Some(v) = self.alpha {
            mat.alpha = v;
        }
        if let Some(v) = self.gamma_rel {
            mat.gamma_rel = v;
        }
        if let Some(v) = self.mu_s_si {
            mat.mu_s_si = v;
            mat.moment_flag = true;
        }
        if let Some(v) = self.magnetisation {
            mat.magnetisation = v;
            // Supplying a magnetisation makes it authoritative unless the
            // same record also supplied an explicit moment.
            if self.mu_s_si.is_none() {
                mat.moment_flag = false;
            }
        }
        if let Some(v) = self.moment_flag {
            mat.moment_flag = v;
        }
        if let Some(v) = self.ku1_si {
            mat.ku1_si = v;
        }
        if let Some(v) = self.anis_flag {
            mat.anis_flag = v;
        }
        if let Some(v) = &self.jij_si {
            mat.jij_si = v.clone();
        }
        if let Some(v) = self.initial_spin {
            mat.initial_spin = v;
        }
        if let Some(v) = &self.crystal_structure {
            mat.crystal_structure = v.clone();
        }
        if let Some(v) = self.geometry {
            mat.geometry = v;
        }
        if let Some(v) = self.min {
            mat.min = v;
        }
        if let Some(v) = self.max {
            mat.max = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut f = File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn missing_file_is_a_typed_error() {
        let err = read(Path::new("/no/such/input.json")).unwrap_err();
        assert!(matches!(err, SetupError::InputFileNotFound { .. }));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let path = write_temp("spin_sim_bad_input.json", "{ not json");
        let err = read(&path).unwrap_err();
        assert!(matches!(err, SetupError::InputParse { .. }));
    }

    #[test]
    fn overrides_replace_only_supplied_fields() {
        let path = write_temp(
            "spin_sim_override_input.json",
            r#"{
                "crystal_structure": "bcc",
                "dt_si": 2.0e-15,
                "dipolar": true,
                "materials": [{ "alpha": 0.05 }]
            }"#,
        );
        let mut setup = SimSetup::default_system();
        read(&path).unwrap().apply(&mut setup);

        assert_eq!(setup.global.crystal_structure, "bcc");
        assert_eq!(setup.global.dt_si, 2.0e-15);
        assert!(setup.global.hamiltonian_flags[FLAG_DIPOLAR]);
        // untouched defaults survive
        assert_eq!(setup.global.system_dimensions, [100.0; 3]);
        assert_eq!(setup.materials[0].alpha, 0.05);
        assert_eq!(setup.materials[0].name, "Co");
    }

    #[test]
    fn material_list_grows_and_exchange_rows_are_padded() {
        let path = write_temp(
            "spin_sim_two_materials.json",
            r#"{
                "materials": [
                    { "jij_si": [-11.2e-21] },
                    { "name": "Fe", "mu_s_si": 2.04e-23 }
                ]
            }"#,
        );
        let mut setup = SimSetup::default_system();
        read(&path).unwrap().apply(&mut setup);

        assert_eq!(setup.materials.len(), 2);
        assert_eq!(setup.materials[1].name, "Fe");
        // every exchange row padded to one entry per material
        for mat in &setup.materials {
            assert_eq!(mat.jij_si.len(), 2);
        }
        assert_eq!(setup.materials[0].jij_si[1], 0.0);
    }

    #[test]
    fn supplied_magnetisation_becomes_authoritative() {
        let path = write_temp(
            "spin_sim_magnetisation.json",
            r#"{ "materials": [{ "magnetisation": 1.4e6 }] }"#,
        );
        let mut setup = SimSetup::default_system();
        read(&path).unwrap().apply(&mut setup);
        assert!(!setup.materials[0].moment_flag);
        assert_eq!(setup.materials[0].magnetisation, 1.4e6);
    }
}
