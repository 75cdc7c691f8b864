// src/main.rs
//
// Setup driver: compiles a physically-expressed input file into the
// normalized simulation constants consumed by the integrator, and prints
// them for inspection.
//
// Examples:
//
//   cargo run --release -- material.json
//       -> default system overridden by material.json, derived constants
//          printed to stdout.
//
//   cargo run --release -- material.json single-spin out=runs
//       -> minimal 2x2x2 single-spin topology; derived setup additionally
//          written to runs/setup.json.
//
// In a multi-process run only rank 0 prints (rank=N on the other ranks);
// every rank still executes the identical derivation sequence.

use std::env;
use std::fs::{create_dir_all, File};
use std::path::PathBuf;
use std::process::ExitCode;

use env_logger::Env;

use spin_sim::input;
use spin_sim::setup::SimSetup;

fn print_usage() {
    eprintln!(
        r#"Usage:
  cargo run -- [INPUT.json] [single-spin] [rank=N] [out=DIR]

Notes:
  - Without INPUT.json the driver runs on pure defaults (one Co material,
    simple-cubic, 100x100x100 Angstrom).
  - 'single-spin' forces the minimal 2x2x2 diagnostic topology.
  - 'out=DIR' writes the fully derived setup to DIR/setup.json.
"#
    );
}

fn print_summary(s: &SimSetup) {
    let g = &s.global;
    println!("================================================================================");
    println!("System setup");
    println!("  crystal structure    : {}", g.crystal_structure);
    println!("  hamiltonian          : {}", g.hamiltonian_type);
    println!(
        "  system dimensions    : {} x {} x {} A  (cells: {} x {} x {})",
        g.system_dimensions[0],
        g.system_dimensions[1],
        g.system_dimensions[2],
        g.int_system_dimensions[0],
        g.int_system_dimensions[1],
        g.int_system_dimensions[2],
    );
    println!(
        "  dt                   : {:.6e} s  (reduced {:.6e})",
        g.dt_si, g.dt
    );
    println!("  integrator           : {}", s.sim.integrator.as_str());
    println!(
        "  applied field        : {:.3} T along [{:.3}, {:.3}, {:.3}]",
        s.sim.applied_field_strength,
        s.sim.applied_field[0],
        s.sim.applied_field[1],
        s.sim.applied_field[2],
    );

    for (i, m) in s.materials.iter().enumerate() {
        let c = &m.constants;
        println!("Material {i}: {} ({})", m.name, m.element);
        println!("  mu_s                 : {:.6e} J/T", m.mu_s_si);
        println!("  magnetisation        : {:.6e} J/T/m^3", m.magnetisation);
        println!("  Ku (reduced)         : {:.6e}", c.ku);
        println!("  Jij (reduced)        : {:?}", c.jij);
        println!("  H_th sigma           : {:.6e}", c.h_th_sigma);
        println!(
            "  neighbours / cutoff  : {} / {:.4}",
            c.num_nearest_neighbours, c.cutoff
        );
    }
    println!("================================================================================");
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let argv: Vec<String> = env::args().collect();

    let mut input_path: Option<PathBuf> = None;
    let mut single_spin = false;
    let mut rank: u32 = 0;
    let mut out_dir: Option<PathBuf> = None;

    for arg in argv.iter().skip(1) {
        if arg == "-h" || arg == "--help" || arg == "help" {
            print_usage();
            return Ok(());
        }
        if arg == "single-spin" {
            single_spin = true;
            continue;
        }
        if let Some(v) = arg.strip_prefix("rank=") {
            match v.parse::<u32>() {
                Ok(r) => rank = r,
                Err(_) => eprintln!("Warning: could not parse rank value '{v}', using 0"),
            }
            continue;
        }
        if let Some(v) = arg.strip_prefix("out=") {
            out_dir = Some(PathBuf::from(v));
            continue;
        }
        if input_path.is_none() && !arg.starts_with('-') {
            input_path = Some(PathBuf::from(arg));
            continue;
        }
        eprintln!("Warning: ignoring unknown argument '{arg}'");
    }

    let is_primary = rank == 0;

    // Default -> override -> single-spin -> derivation, in strict order.
    let mut setup = SimSetup::default_system();
    if let Some(path) = &input_path {
        input::read(path)?.apply(&mut setup);
    }
    if single_spin {
        setup.global.single_spin = true;
    }
    if setup.global.single_spin {
        setup.single_spin_system();
    }
    setup.set_derived_parameters(is_primary)?;

    if is_primary {
        print_summary(&setup);
    }

    if let Some(dir) = out_dir {
        create_dir_all(&dir)?;
        let path = dir.join("setup.json");
        let file = File::create(&path)?;
        serde_json::to_writer_pretty(file, &setup)?;
        if is_primary {
            println!("Derived setup written to {}", path.display());
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    // Fatal configuration errors terminate the whole run: continuing with
    // inconsistent physical units would be worse than aborting.
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error - {e}");
            ExitCode::FAILURE
        }
    }
}
