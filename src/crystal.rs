// src/crystal.rs
//
// Crystal structure topology tables.
//
// The crystal structure fixes three things for the setup pipeline:
//  - the number of nearest neighbours each site has,
//  - the number of atoms per unit cell (moment <-> magnetisation conversion),
//  - the interaction cutoff radius used by the neighbour-list builder.
//
// The per-material neighbour-shell table deliberately has no fct entry:
// fct is accepted for the global discretisation step, but a material that
// resolves to fct is a configuration error, matching the physical model
// this setup targets (see `neighbour_shell`).

use serde::Serialize;

/// Lattice topology of the simulated crystal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CrystalStructure {
    /// Simple cubic.
    Sc,
    /// Body-centred cubic.
    Bcc,
    /// Face-centred tetragonal.
    Fct,
    /// Face-centred cubic.
    Fcc,
}

/// Nearest-neighbour shell of a crystal structure: coordination number and
/// the geometric cutoff radius (in lattice units) enclosing exactly it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeighbourShell {
    pub num_neighbours: usize,
    pub cutoff: f64,
}

impl CrystalStructure {
    /// Parse a structure name as it appears in input files ("sc", "bcc",
    /// "fct", "fcc"). Returns `None` for anything else.
    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "sc" => Some(Self::Sc),
            "bcc" => Some(Self::Bcc),
            "fct" => Some(Self::Fct),
            "fcc" => Some(Self::Fcc),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sc => "sc",
            Self::Bcc => "bcc",
            Self::Fct => "fct",
            Self::Fcc => "fcc",
        }
    }

    /// Nearest-neighbour count used for the global Hamiltonian sizing.
    pub fn num_nearest_neighbours(&self) -> usize {
        match self {
            Self::Sc => 6,
            Self::Bcc => 8,
            Self::Fct => 4,
            Self::Fcc => 12,
        }
    }

    /// Atoms per unit cell, used to convert between atomic moment (J/T) and
    /// bulk magnetisation (J/T/m^3 over the unit-cell volume).
    pub fn atoms_per_unit_cell(&self) -> f64 {
        match self {
            Self::Sc => 1.0,
            Self::Bcc => 2.0,
            Self::Fct => 2.0,
            Self::Fcc => 4.0,
        }
    }

    /// Per-material neighbour shell for the generic Hamiltonian.
    ///
    /// The cutoff factors enclose exactly the nearest-neighbour shell with a
    /// 1% margin: 1.01 (sc), sqrt(3)/2 * 1.01 (bcc), sqrt(2)/2 * 1.01 (fcc).
    /// fct has no shell defined here and resolves to `None`.
    pub fn neighbour_shell(&self) -> Option<NeighbourShell> {
        match self {
            Self::Sc => Some(NeighbourShell {
                num_neighbours: 6,
                cutoff: 1.01,
            }),
            Self::Bcc => Some(NeighbourShell {
                num_neighbours: 8,
                cutoff: 3.0_f64.sqrt() * 0.5 * 1.01,
            }),
            Self::Fcc => Some(NeighbourShell {
                num_neighbours: 12,
                cutoff: 2.0_f64.sqrt() * 0.5 * 1.01,
            }),
            Self::Fct => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_known_structures() {
        for name in ["sc", "bcc", "fct", "fcc"] {
            let s = CrystalStructure::from_name(name).unwrap();
            assert_eq!(s.as_str(), name);
        }
    }

    #[test]
    fn rejects_unknown_structure_names() {
        assert!(CrystalStructure::from_name("hcp").is_none());
        assert!(CrystalStructure::from_name("").is_none());
        assert!(CrystalStructure::from_name("SC").is_none());
    }

    #[test]
    fn global_tables_match_reference_values() {
        use CrystalStructure::*;
        assert_eq!(Sc.num_nearest_neighbours(), 6);
        assert_eq!(Bcc.num_nearest_neighbours(), 8);
        assert_eq!(Fct.num_nearest_neighbours(), 4);
        assert_eq!(Fcc.num_nearest_neighbours(), 12);

        assert_eq!(Sc.atoms_per_unit_cell(), 1.0);
        assert_eq!(Bcc.atoms_per_unit_cell(), 2.0);
        assert_eq!(Fct.atoms_per_unit_cell(), 2.0);
        assert_eq!(Fcc.atoms_per_unit_cell(), 4.0);
    }

    #[test]
    fn neighbour_shells_match_reference_values() {
        use CrystalStructure::*;
        let sc = Sc.neighbour_shell().unwrap();
        assert_eq!(sc.num_neighbours, 6);
        assert_eq!(sc.cutoff, 1.01);

        let bcc = Bcc.neighbour_shell().unwrap();
        assert_eq!(bcc.num_neighbours, 8);
        assert_eq!(bcc.cutoff, 3.0_f64.sqrt() * 0.5 * 1.01);

        let fcc = Fcc.neighbour_shell().unwrap();
        assert_eq!(fcc.num_neighbours, 12);
        assert_eq!(fcc.cutoff, 2.0_f64.sqrt() * 0.5 * 1.01);
    }

    #[test]
    fn fct_has_no_neighbour_shell() {
        assert!(CrystalStructure::Fct.neighbour_shell().is_none());
    }
}
