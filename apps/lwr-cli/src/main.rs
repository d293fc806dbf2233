use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use lwr_core::FeaturePoint;
use lwr_io::{read_tree, write_tree};
use lwr_model::{
    AssemblyKind, Component, ControlBank, FuelAssembly, GridLabels, IncoreInstrument, Material,
    MaterialKind, Reactor, Rod, Tube, TubeType,
};
use lwr_store::MemStore;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "lwr-cli")]
#[command(about = "lwrkit CLI - reactor model container tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a small demonstration reactor and persist it
    Sample {
        /// Output container file path
        file: PathBuf,
    },
    /// Load a container and print the component tree
    Inspect {
        /// Path to the container file
        file: PathBuf,
        /// Emit the tree as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Load, re-write, re-read, and compare structurally
    Verify {
        /// Path to the container file
        file: PathBuf,
    },
    /// Export one feature's time series as CSV
    ExportSeries {
        /// Path to the container file
        file: PathBuf,
        /// Slash-separated component path (e.g. "Plant Unit 1/FA-01/rodA")
        path: String,
        /// Feature name to export
        feature: String,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> CliResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Sample { file } => cmd_sample(&file),
        Commands::Inspect { file, json } => cmd_inspect(&file, json),
        Commands::Verify { file } => cmd_verify(&file),
        Commands::ExportSeries {
            file,
            path,
            feature,
            output,
        } => cmd_export_series(&file, &path, &feature, output.as_deref()),
    }
}

fn cmd_sample(file: &Path) -> CliResult<()> {
    let reactor = build_sample_reactor();

    let mut store = MemStore::new();
    write_tree(&mut store, &Component::Reactor(reactor))?;
    lwr_store::save(&store, file)?;

    println!("Wrote sample reactor to {}", file.display());
    println!("  groups: {}", store.group_count());
    Ok(())
}

fn cmd_inspect(file: &Path, json: bool) -> CliResult<()> {
    let store = lwr_store::load(file)?;
    let Some(component) = read_tree(&store) else {
        return Err("no readable component tree in the container".into());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&summarize(&component))?);
    } else {
        print_tree(&component, 0);
    }
    Ok(())
}

fn cmd_verify(file: &Path) -> CliResult<()> {
    let store = lwr_store::load(file)?;
    let Some(original) = read_tree(&store) else {
        return Err("no readable component tree in the container".into());
    };

    let mut scratch = MemStore::new();
    write_tree(&mut scratch, &original)?;
    let Some(read_back) = read_tree(&scratch) else {
        return Err("re-written tree did not read back".into());
    };

    if read_back == original {
        println!(
            "OK: {} \"{}\" survives the roundtrip ({} groups)",
            original.tag(),
            original.name(),
            scratch.group_count()
        );
        Ok(())
    } else {
        Err("roundtrip mismatch: the re-read tree differs structurally".into())
    }
}

fn cmd_export_series(
    file: &Path,
    path: &str,
    feature: &str,
    output: Option<&Path>,
) -> CliResult<()> {
    let store = lwr_store::load(file)?;
    let Some(root) = read_tree(&store) else {
        return Err("no readable component tree in the container".into());
    };

    let mut component = &root;
    let mut segments = path.split('/');
    let first = segments.next().unwrap_or_default();
    if first != component.name() {
        return Err(format!("tree root is \"{}\", not \"{first}\"", component.name()).into());
    }
    for segment in segments {
        component = child_of(component, segment)
            .ok_or_else(|| format!("no component \"{segment}\" under \"{}\"", component.name()))?;
    }

    let data = component.core().data();
    let mut csv = String::from("time,value,uncertainty,units\n");
    let mut rows = 0;
    for time in data.times() {
        for point in data.data_at(time, feature) {
            csv.push_str(&format!(
                "{time},{},{},{}\n",
                point.value, point.uncertainty, point.units
            ));
            rows += 1;
        }
    }
    if rows == 0 {
        return Err(format!(
            "component \"{}\" has no data for feature \"{feature}\"",
            component.name()
        )
        .into());
    }

    match output {
        Some(path) => {
            std::fs::write(path, csv)?;
            println!("Wrote {rows} rows to {}", path.display());
        }
        None => {
            io::stdout().write_all(csv.as_bytes())?;
        }
    }
    Ok(())
}

/// Resolve one path segment below a component.
fn child_of<'a>(component: &'a Component, name: &str) -> Option<&'a Component> {
    match component {
        Component::Composite(composite) => composite.component(name),
        Component::Reactor(reactor) => AssemblyKind::ALL
            .iter()
            .find_map(|&kind| reactor.assembly_by_name(kind, name)),
        Component::PinAssembly(assembly) => assembly.rods().component(name),
        Component::FuelAssembly(assembly) => assembly
            .base()
            .rods()
            .component(name)
            .or_else(|| assembly.tubes().component(name)),
        Component::RodClusterAssembly(assembly) => assembly.base().rods().component(name),
        _ => None,
    }
}

fn print_tree(component: &Component, depth: usize) {
    let indent = "  ".repeat(depth);
    let core = component.core();
    let data = core.data();
    let mut line = format!(
        "{indent}{} \"{}\" (id {})",
        component.tag(),
        core.name(),
        core.id()
    );
    if !data.is_empty() {
        line.push_str(&format!(
            " [{} timesteps, {} points]",
            data.step_count(),
            data.point_count()
        ));
    }
    println!("{line}");

    match component {
        Component::Composite(composite) => {
            for (_, child) in composite.iter() {
                print_tree(child, depth + 1);
            }
        }
        Component::GridManager(grid) => {
            for (location, entry) in grid.occupied() {
                println!("{indent}  {} -> \"{}\"", location, entry.name());
            }
        }
        Component::Reactor(reactor) => {
            for kind in AssemblyKind::ALL {
                let members = reactor.members(kind);
                if members.is_empty() {
                    continue;
                }
                println!("{indent}  [{kind} assemblies]");
                for (_, child) in members.iter() {
                    print_tree(child, depth + 2);
                }
                for (location, entry) in reactor.grid(kind).occupied() {
                    println!("{indent}    {} -> \"{}\"", location, entry.name());
                }
            }
        }
        Component::PinAssembly(assembly) => {
            for (_, child) in assembly.rods().iter() {
                print_tree(child, depth + 1);
            }
        }
        Component::FuelAssembly(assembly) => {
            for (_, child) in assembly.base().rods().iter() {
                print_tree(child, depth + 1);
            }
            for (_, child) in assembly.tubes().iter() {
                print_tree(child, depth + 1);
            }
        }
        Component::RodClusterAssembly(assembly) => {
            for (_, child) in assembly.base().rods().iter() {
                print_tree(child, depth + 1);
            }
        }
        _ => {}
    }
}

fn summarize(component: &Component) -> serde_json::Value {
    let core = component.core();
    let mut value = serde_json::json!({
        "tag": component.tag().as_str(),
        "name": core.name(),
        "id": core.id(),
        "description": core.description(),
    });

    let data = core.data();
    if !data.is_empty() {
        value["timesteps"] = data.step_count().into();
        value["points"] = data.point_count().into();
        value["features"] = data.feature_names().into();
    }

    let children: Vec<serde_json::Value> = match component {
        Component::Composite(composite) => {
            composite.iter().map(|(_, c)| summarize(c)).collect()
        }
        Component::Reactor(reactor) => AssemblyKind::ALL
            .iter()
            .flat_map(|&kind| reactor.members(kind).iter().map(|(_, c)| summarize(c)))
            .collect(),
        Component::PinAssembly(assembly) => {
            assembly.rods().iter().map(|(_, c)| summarize(c)).collect()
        }
        Component::FuelAssembly(assembly) => assembly
            .base()
            .rods()
            .iter()
            .chain(assembly.tubes().iter())
            .map(|(_, c)| summarize(c))
            .collect(),
        Component::RodClusterAssembly(assembly) => {
            assembly.base().rods().iter().map(|(_, c)| summarize(c)).collect()
        }
        _ => Vec::new(),
    };
    if !children.is_empty() {
        value["children"] = children.into();
    }

    value
}

/// A small but representative core: two fuel assemblies with rods and
/// tubes, a control bank, and an incore instrument, with a few state
/// points scattered over the grid data.
fn build_sample_reactor() -> Reactor {
    let mut reactor = Reactor::new(15);
    reactor.core_mut().set_name("Sample Plant Unit 1");
    reactor.set_fuel_assembly_pitch(21.5);

    let mut labels = GridLabels::new(15);
    labels.set_row_labels((1..=15).map(|i| i.to_string()).collect());
    labels.set_column_labels((b'A'..=b'O').map(|c| char::from(c).to_string()).collect());
    reactor.set_labels(labels);

    for (index, position) in [(7_usize, 7_usize), (7, 8)].iter().enumerate() {
        let name = format!("FA-{:02}", index + 1);
        let mut assembly = FuelAssembly::new(17);
        assembly.core_mut().set_name(&name);
        assembly.base_mut().set_rod_pitch(1.26);

        let mut rod = Rod::named("fuel rod");
        rod.set_pressure(1550.0);
        rod.set_fill_gas(Material::named("Helium", MaterialKind::Gas));
        assembly.base_mut().add_rod(rod);
        for column in 0..17 {
            assembly.base_mut().set_rod_location("fuel rod", 8, column);
        }

        let mut tube = Tube::new();
        tube.core_mut().set_name("instrument tube");
        tube.set_kind(TubeType::Instrument);
        assembly.add_tube(tube);
        assembly.set_tube_location("instrument tube", 8, 8);

        reactor.add_assembly(AssemblyKind::Fuel, Component::FuelAssembly(assembly));
        reactor.set_assembly_location(AssemblyKind::Fuel, &name, position.0, position.1);

        if let Some(data) = reactor.assembly_data_at_mut(AssemblyKind::Fuel, position.0, position.1)
        {
            for (time, value) in [(0.0, 0.011), (100.0, 0.012), (200.0, 0.0125)] {
                data.add(
                    FeaturePoint::new("Power Fraction")
                        .with_value(value)
                        .with_uncertainty(0.0005)
                        .with_units("1"),
                    time,
                );
            }
        }
    }

    let mut bank = ControlBank::new();
    bank.core_mut().set_name("Bank D");
    bank.set_step_size(1.58);
    bank.set_max_steps(230);
    reactor.add_assembly(AssemblyKind::ControlBank, Component::ControlBank(bank));
    reactor.set_assembly_location(AssemblyKind::ControlBank, "Bank D", 7, 7);

    let mut instrument = IncoreInstrument::new();
    instrument.core_mut().set_name("detector 12");
    reactor.add_assembly(
        AssemblyKind::IncoreInstrument,
        Component::IncoreInstrument(instrument),
    );
    reactor.set_assembly_location(AssemblyKind::IncoreInstrument, "detector 12", 3, 11);

    reactor
}
