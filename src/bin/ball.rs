//! Solve the ball's orientation from two starmap anchor symbols and print
//! every symbol's absolute direction vector as CSV, with similarity
//! diagnostics against the rest of the starmap. Optionally resolve a target
//! direction to its full subdivision address.
//!
//! Run with: cargo run --bin ball -- 14 13
//!
//! Usage:
//!   ball 14 13                              Solve using default csv paths
//!   ball 14 13 --triangles t.csv --starmap s.csv
//!   ball 14 13 --symbols leaf.csv --target 0.431,-0.777,0.458

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use glam::DVec3;

use pentakis::loader::{find_anchors, load_face_table, load_starmap, load_symbol_map};
use pentakis::{resolve_address, solve_orientation, Polyhedron};

#[derive(Parser)]
#[command(about = "Solve the ball orientation and resolve symbol directions")]
struct Args {
    /// Symbol id of the first starmap anchor.
    symbol_a: u32,

    /// Symbol id of the second starmap anchor.
    symbol_b: u32,

    /// CSV with the 60 face-table triples (ico,dod_a,dod_b per row).
    #[arg(long, default_value = "triangles.csv")]
    triangles: PathBuf,

    /// CSV with the starmap vectors (id,x,y,z per row).
    #[arg(long, default_value = "starmap.csv")]
    starmap: PathBuf,

    /// CSV with the 64 leaf symbols, one per row. Required with --target.
    #[arg(long)]
    symbols: Option<PathBuf>,

    /// Target direction "x,y,z" to resolve to a full address.
    #[arg(long, value_parser = parse_vector)]
    target: Option<DVec3>,
}

fn parse_vector(text: &str) -> Result<DVec3, String> {
    let parts: Vec<&str> = text.split(',').collect();
    if parts.len() != 3 {
        return Err(format!("expected x,y,z, got {:?}", text));
    }
    let parse = |s: &str| s.trim().parse::<f64>().map_err(|e| format!("{}: {}", s, e));
    Ok(DVec3::new(
        parse(parts[0])?,
        parse(parts[1])?,
        parse(parts[2])?,
    ))
}

fn open(path: &Path) -> Result<BufReader<File>> {
    Ok(BufReader::new(File::open(path).with_context(|| {
        format!("unable to open file {}", path.display())
    })?))
}

fn main() -> Result<()> {
    let args = Args::parse();

    let table = load_face_table(open(&args.triangles)?)
        .with_context(|| format!("unable to parse triangle table {}", args.triangles.display()))?;
    let starmap = load_starmap(open(&args.starmap)?)
        .with_context(|| format!("unable to parse starmap {}", args.starmap.display()))?;
    let anchors = find_anchors(&starmap, args.symbol_a, args.symbol_b)?;

    eprintln!(
        "Computing symbol vectors using starmap symbol IDs {} and {}",
        args.symbol_a, args.symbol_b
    );

    let poly = Polyhedron::new();
    let solution = solve_orientation(&poly, &table, &anchors, &starmap)?;

    println!("Symbol ID,X,Y,Z");
    for (i, d) in solution.directions.iter().enumerate() {
        println!("{},{},{},{}", i + 1, d.x, d.y, d.z);
    }

    println!();
    println!("Checking how close we are to the rest of the starmap vectors...");
    println!("Symbol ID,Similarity,Computed X,Computed Y,Computed Z,Starmap X,Starmap Y,Starmap Z");
    for check in &solution.similarities {
        println!(
            "{},{:.9},{},{},{},{},{},{}",
            check.symbol,
            check.similarity,
            check.computed.x,
            check.computed.y,
            check.computed.z,
            check.starmap.x,
            check.starmap.y,
            check.starmap.z
        );
    }

    if let Some(target) = args.target {
        let Some(symbols_path) = &args.symbols else {
            bail!("--symbols is required to resolve a --target");
        };
        let symbols = load_symbol_map(open(symbols_path)?)
            .with_context(|| format!("unable to parse symbol map {}", symbols_path.display()))?;

        let faces = solution.orient_faces(&poly, &table);
        let address = resolve_address(&faces, &symbols, target)?;

        println!();
        println!("Face symbol: {}", address.face_symbol);
        println!("Raycast path: {:?} -> {:?}", address.raycast_path, address.raycast_symbols);
        println!("Lattice path: {:?} -> {:?}", address.lattice_path, address.lattice_symbols);
        println!("Methods agree: {}", address.methods_agree());
    }

    Ok(())
}
