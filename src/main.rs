extern crate clap;
extern crate pbr;

use lattice_canvas::elements::*;
use lattice_canvas::generate_layout;
use lattice_canvas::generate_stats;
use lattice_canvas::layout::*;
use lattice_canvas::placeholder::*;
use lattice_canvas::util::*;
use lattice_canvas::visualize::*;
use pbr::ProgressBar;
use rand_xoshiro::rand_core::{RngCore, SeedableRng};
use std::collections::BTreeSet;

fn create_clap_parser(color_choice: clap::ColorChoice) -> clap::Command<'static> {
    clap::Command::new("Lattice Canvas")
        .version(env!("CARGO_PKG_VERSION"))
        .author(clap::crate_authors!(", "))
        .about("Surface code lattice layout generator for quantum error correction diagrams")
        .color(color_choice)
        .propagate_version(true)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            with_layout_args(clap::Command::new("generate"))
                .about("compute a layout and write the render data file")
                .arg(
                    clap::Arg::new("filename")
                        .long("filename")
                        .takes_value(true)
                        .help("output filename under the render data folder, defaults to a timestamp"),
                ),
        )
        .subcommand(
            with_layout_args(clap::Command::new("stats"))
                .about("print the closed-form layout statistics as JSON"),
        )
        .subcommand(
            clap::Command::new("test")
                .about("testing features")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(
                    clap::Command::new("consistency")
                        .about("cross-check closed-form statistics against generated element tallies")
                        .arg(value_arg("rounds", "1000", "number of randomized parameter combinations"))
                        .arg(value_arg("max_distance", "21", "largest code distance to sample, odd")),
                ),
        )
}

fn value_arg(name: &'static str, default: &'static str, help: &'static str) -> clap::Arg<'static> {
    clap::Arg::new(name)
        .long(name)
        .takes_value(true)
        .default_value(default)
        .help(help)
}

/// the layout parameters and visibility flags shared by `generate` and `stats`
fn with_layout_args(command: clap::Command<'static>) -> clap::Command<'static> {
    command
        .arg(value_arg("distance", "5", "code distance, odd and at least 3"))
        .arg(value_arg("rows", "2", "number of patch rows"))
        .arg(value_arg("cols_per_row", "4", "number of patches per row"))
        .arg(value_arg("cell_size", "100", "edge length of one background cell"))
        .arg(value_arg("qubit_size", "24", "diameter of a data qubit marker"))
        .arg(value_arg("stabilizer_size", "32", "diameter of a stabilizer marker"))
        .arg(value_arg("gap", "120", "spacing between adjacent patches"))
        .arg(value_arg("placeholder_count", "16", "number of placeholder markers"))
        .arg(
            clap::Arg::new("placeholder_mode")
                .long("placeholder_mode")
                .takes_value(true)
                .possible_values(["beside", "below", "scatter"])
                .default_value("beside")
                .help("where the placeholder layer is tiled"),
        )
        .arg(
            clap::Arg::new("placeholders")
                .long("placeholders")
                .help("include the unused-circuit placeholder layer"),
        )
        .arg(
            clap::Arg::new("placeholders_only")
                .long("placeholders_only")
                .help("show only the placeholder layer"),
        )
}

fn parse_u32(matches: &clap::ArgMatches, name: &str) -> u32 {
    matches
        .value_of(name)
        .unwrap()
        .parse::<u32>()
        .unwrap_or_else(|_| panic!("{} must be a non-negative integer", name))
}

fn params_from_matches(matches: &clap::ArgMatches) -> LayoutParams {
    let mut params = LayoutParams::new(
        parse_u32(matches, "distance"),
        parse_u32(matches, "rows"),
        parse_u32(matches, "cols_per_row"),
    );
    params.cell_size = parse_u32(matches, "cell_size");
    params.qubit_size = parse_u32(matches, "qubit_size");
    params.stabilizer_size = parse_u32(matches, "stabilizer_size");
    params.gap = parse_u32(matches, "gap");
    params.placeholder.count = parse_u32(matches, "placeholder_count");
    params.placeholder.mode = match matches.value_of("placeholder_mode").unwrap() {
        "beside" => PlaceholderMode::GridBesideCanvas,
        "below" => PlaceholderMode::GridBelowCanvas,
        "scatter" => PlaceholderMode::BackgroundScatter,
        _ => unreachable!(),
    };
    params
}

fn visibility_from_matches(matches: &clap::ArgMatches) -> VisibilityFlags {
    if matches.is_present("placeholders_only") {
        VisibilityFlags::only_placeholders()
    } else if matches.is_present("placeholders") {
        VisibilityFlags::with_placeholders()
    } else {
        VisibilityFlags::full()
    }
}

/// independent cross-check of a generated layout: unique ids, and closed-form
/// statistics against tallies of the actual element list
fn verify_layout(layout: &Layout, visibility: &VisibilityFlags) {
    let mut ids = BTreeSet::new();
    for element in layout.elements.iter() {
        assert!(ids.insert(element.id.as_str()), "duplicate element id {}", element.id);
    }
    let tally =
        |kind: ElementKind| layout.elements.iter().filter(|element| element.kind == kind).count() as u32;
    let total = &layout.stats.total;
    if !visibility.placeholders_only {
        assert_eq!(tally(ElementKind::DataQubit), total.data_qubits, "data qubit mismatch");
        assert_eq!(tally(ElementKind::XStabilizer), total.x_stabilizers, "X stabilizer mismatch");
        assert_eq!(tally(ElementKind::ZStabilizer), total.z_stabilizers, "Z stabilizer mismatch");
        assert_eq!(
            tally(ElementKind::BackgroundCell),
            total.background_cells,
            "background cell mismatch"
        );
        assert_eq!(
            tally(ElementKind::BoundaryQubit),
            total.boundary_qubits,
            "boundary qubit mismatch"
        );
        assert_eq!(
            tally(ElementKind::BoundaryTriangle),
            total.boundary_triangles,
            "boundary triangle mismatch"
        );
    }
    assert_eq!(
        tally(ElementKind::UnusedPlaceholder),
        total.placeholders,
        "placeholder mismatch"
    );
}

pub fn main() {
    let matches = create_clap_parser(clap::ColorChoice::Auto).get_matches();

    match matches.subcommand() {
        Some(("generate", matches)) => {
            let params = params_from_matches(matches);
            let visibility = visibility_from_matches(matches);
            let layout = match generate_layout(&params, &visibility) {
                Ok(layout) => layout,
                Err(error) => {
                    eprintln!("{error}");
                    std::process::exit(1);
                }
            };
            let filename = matches
                .value_of("filename")
                .map(|filename| filename.to_string())
                .unwrap_or_else(auto_render_data_filename);
            print_render_link(&filename);
            let mut visualizer = LayoutVisualizer::new(Some(render_data_folder() + filename.as_str())).unwrap();
            visualizer.snapshot(format!("layout"), &layout).unwrap();
            println!("{}", serde_json::to_string_pretty(&layout.stats).unwrap());
        }
        Some(("stats", matches)) => {
            let params = params_from_matches(matches);
            let visibility = visibility_from_matches(matches);
            match generate_stats(&params, &visibility) {
                Ok(stats) => println!("{}", serde_json::to_string_pretty(&stats).unwrap()),
                Err(error) => {
                    eprintln!("{error}");
                    std::process::exit(1);
                }
            }
        }
        Some(("test", matches)) => match matches.subcommand() {
            Some(("consistency", matches)) => {
                let rounds = parse_u32(matches, "rounds") as u64;
                let max_distance = parse_u32(matches, "max_distance");
                assert!(
                    max_distance >= 3 && max_distance % 2 == 1,
                    "max_distance must be odd and at least 3"
                );
                let distance_choices = ((max_distance - 3) / 2 + 1) as u64;
                let mut rng = DeterministicRng::seed_from_u64(0);
                let mut pb = ProgressBar::on(std::io::stderr(), rounds);
                for round in 0..rounds {
                    pb.set(round);
                    let mut params = LayoutParams::new(
                        3 + 2 * (rng.next_u64() % distance_choices) as u32,
                        1 + (rng.next_u64() % 3) as u32,
                        1 + (rng.next_u64() % 4) as u32,
                    );
                    params.placeholder.count = (rng.next_u64() % 64) as u32;
                    params.placeholder.mode = match rng.next_u64() % 3 {
                        0 => PlaceholderMode::GridBesideCanvas,
                        1 => PlaceholderMode::GridBelowCanvas,
                        _ => PlaceholderMode::BackgroundScatter,
                    };
                    for visibility in [
                        VisibilityFlags::full(),
                        VisibilityFlags::with_placeholders(),
                        VisibilityFlags::only_placeholders(),
                    ] {
                        let layout = generate_layout(&params, &visibility).unwrap();
                        verify_layout(&layout, &visibility);
                        let repeated = generate_layout(&params, &visibility).unwrap();
                        assert_eq!(
                            serde_json::to_string(&layout).unwrap(),
                            serde_json::to_string(&repeated).unwrap(),
                            "layout generation must be deterministic"
                        );
                    }
                }
                pb.finish();
                println!("");
            }
            _ => unreachable!(),
        },
        _ => unreachable!(),
    }
}
