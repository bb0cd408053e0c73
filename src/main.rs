use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use newt_rust::{
    benchmark::{synthetic_surface_fields, BenchmarkSuite},
    config::{parse_arg, Config},
    grid::ChunkedArray,
    math,
    parallel::ChunkExecutor,
    pipeline::{Pipeline, PseudoadiabatTemperature, WetBulbPotentialTemperature},
};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("point", sub_matches)) => {
            if let Err(e) = run_point(sub_matches) {
                eprintln!("Point evaluation error: {}", e);
                std::process::exit(1);
            }
        }
        Some(("wet-bulb", sub_matches)) => {
            if let Err(e) = run_wet_bulb(sub_matches) {
                eprintln!("Wet-bulb error: {}", e);
                std::process::exit(1);
            }
        }
        Some(("validate", sub_matches)) => {
            if let Err(e) = run_validation(sub_matches) {
                eprintln!("Validation error: {}", e);
                std::process::exit(1);
            }
        }
        Some(("benchmark", sub_matches)) => {
            if let Err(e) = run_benchmark(sub_matches) {
                eprintln!("Benchmark error: {}", e);
                std::process::exit(1);
            }
        }
        _ => {
            eprintln!("Please specify a subcommand. Use --help for more information.");
            std::process::exit(1);
        }
    }
}

fn run_point(matches: &ArgMatches) -> Result<(), String> {
    let pressure: f64 = parse_arg(matches, "pressure")?;
    let temperature: f64 = parse_arg(matches, "temperature")?;

    if matches.get_flag("inverse") {
        let t = math::temperature(pressure, temperature);
        println!(
            "temperature(p = {} Pa, thw = {} K) = {} K",
            pressure, temperature, t
        );
    } else {
        let thw = math::wbpt(pressure, temperature);
        println!("wbpt(p = {} Pa, T = {} K) = {} K", pressure, temperature, thw);
    }
    Ok(())
}

fn run_wet_bulb(matches: &ArgMatches) -> Result<(), String> {
    let pressure: f64 = parse_arg(matches, "pressure")?;
    let temperature: f64 = parse_arg(matches, "temperature")?;
    let dewpoint: f64 = parse_arg(matches, "dewpoint")?;
    let constants = Config::default().constants;

    let q = math::specific_humidity_from_dewpoint(pressure, dewpoint, &constants);
    let (p_lcl, t_lcl) = math::lifting_condensation_level(pressure, temperature, q, &constants);
    let tw = math::adiabatic_wet_bulb_temperature(pressure, temperature, q, &constants);

    println!("Specific humidity: {:.6} kg/kg", q);
    println!("LCL: {:.1} Pa, {:.2} K", p_lcl, t_lcl);
    println!(
        "Wet-bulb temperature: {:.3} K ({:.3} degC)",
        tw,
        math::kelvin_to_celsius(tw, &constants)
    );
    Ok(())
}

/// Round trip `temperature(p, wbpt(p, T))` over a pressure/temperature grid
/// through the chunked pipeline.
fn run_validation(matches: &ArgMatches) -> Result<(), String> {
    let tolerance = *matches
        .get_one::<f64>("tolerance")
        .ok_or("Missing argument: --tolerance")?;
    let config = Config::from_matches(matches)?;

    let pressures: Vec<f64> = (0..=17).map(|i| 20_000.0 + 5_000.0 * i as f64).collect();
    let temperatures: Vec<f64> = (0..=16).map(|i| 233.15 + 5.0 * i as f64).collect();
    let shape = [pressures.len(), temperatures.len()];

    let mut p_values = Vec::with_capacity(shape[0] * shape[1]);
    let mut t_values = Vec::with_capacity(shape[0] * shape[1]);
    for &p in &pressures {
        for &t in &temperatures {
            p_values.push(p);
            t_values.push(t);
        }
    }

    let chunk_shape = [shape[0].div_ceil(3), shape[1].div_ceil(2)];
    let p_field = ChunkedArray::from_shape_vec("p", "Pa", &shape, p_values, &chunk_shape)
        .map_err(|e| e.to_string())?;
    let t_field = ChunkedArray::from_shape_vec("t", "K", &shape, t_values, &chunk_shape)
        .map_err(|e| e.to_string())?;
    let expected = t_field.data().clone();

    let mut pipeline = Pipeline::new();
    let p = pipeline.input(p_field);
    let t = pipeline.input(t_field);
    let thw = pipeline
        .register(WetBulbPotentialTemperature, &[p, t])
        .map_err(|e| e.to_string())?;
    let back = pipeline
        .register(PseudoadiabatTemperature, &[p, thw])
        .map_err(|e| e.to_string())?;

    let executor = ChunkExecutor::from_config(&config.pipeline).map_err(|e| e.to_string())?;
    let result = pipeline
        .materialize(back, &executor)
        .map_err(|e| e.to_string())?;

    let mut max_error = 0.0f64;
    let mut compared = 0usize;
    for (&got, &want) in result.array.data().iter().zip(expected.iter()) {
        if got.is_finite() {
            max_error = max_error.max((got - want).abs());
            compared += 1;
        }
    }

    println!("Round trip over {} states:", expected.len());
    println!("  Compared: {}", compared);
    println!("  Undefined: {}", result.array.count_undefined());
    println!("  Max error: {:.4} K (tolerance {} K)", max_error, tolerance);

    if max_error > tolerance {
        return Err(format!(
            "Round-trip error {:.4} K exceeds tolerance {} K",
            max_error, tolerance
        ));
    }
    println!("Validation passed");
    Ok(())
}

fn run_benchmark(matches: &ArgMatches) -> Result<(), String> {
    let config = Config::from_matches(matches)?;
    let shape = parse_list(&parse_arg::<String>(matches, "shape")?, "--shape")?;
    let thread_counts = parse_list(&parse_arg::<String>(matches, "thread-counts")?, "--thread-counts")?;
    let seed: u64 = parse_arg(matches, "seed")?;

    let dataset = synthetic_surface_fields(
        &shape,
        &config.pipeline.chunks,
        config.pipeline.target_chunk_elements,
        seed,
    )
    .map_err(|e| e.to_string())?;

    let suite = BenchmarkSuite::run_suite(&dataset, &config, &thread_counts)?;
    println!("{}", suite.report());

    if !suite.all_identical() {
        return Err("Output differs between thread counts".to_string());
    }
    Ok(())
}

fn parse_list(raw: &str, name: &str) -> Result<Vec<usize>, String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<usize>()
                .map_err(|_| format!("Invalid value for {}: {}", name, s))
        })
        .collect()
}

fn build_cli() -> Command {
    Command::new("newt_rust")
        .version(clap::crate_version!())
        .about("Non-iterative pseudoadiabats and wet-bulb temperature over chunked fields")
        .subcommand_required(true)
        .subcommand(
            Command::new("point")
                .about("Evaluate the pseudoadiabat models at one state")
                .arg(
                    Arg::new("pressure")
                        .short('p')
                        .long("pressure")
                        .value_name("PA")
                        .help("Pressure in Pa")
                        .required(true)
                        .allow_negative_numbers(true),
                )
                .arg(
                    Arg::new("temperature")
                        .short('t')
                        .long("temperature")
                        .value_name("K")
                        .help("Temperature, or wet-bulb potential temperature with --inverse, in K")
                        .required(true)
                        .allow_negative_numbers(true),
                )
                .arg(
                    Arg::new("inverse")
                        .long("inverse")
                        .help("Evaluate temperature from wet-bulb potential temperature")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("wet-bulb")
                .about("Wet-bulb temperature of one surface state")
                .arg(
                    Arg::new("pressure")
                        .short('p')
                        .long("pressure")
                        .value_name("PA")
                        .help("Surface pressure in Pa")
                        .required(true),
                )
                .arg(
                    Arg::new("temperature")
                        .short('t')
                        .long("temperature")
                        .value_name("K")
                        .help("Air temperature in K")
                        .required(true),
                )
                .arg(
                    Arg::new("dewpoint")
                        .short('d')
                        .long("dewpoint")
                        .value_name("K")
                        .help("Dewpoint temperature in K")
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("validate")
                .about("Check the forward and inverse models against each other")
                .arg(
                    Arg::new("tolerance")
                        .long("tolerance")
                        .value_name("KELVIN")
                        .help("Maximum round-trip error")
                        .default_value("0.5")
                        .value_parser(value_parser!(f64)),
                )
                .args(Config::pipeline_args()),
        )
        .subcommand(
            Command::new("benchmark")
                .about("Benchmark the wet-bulb workflow with different thread counts")
                .arg(
                    Arg::new("shape")
                        .long("shape")
                        .value_name("DIMS")
                        .help("Comma-separated field shape (time,lat,lon)")
                        .default_value("24,181,360"),
                )
                .arg(
                    Arg::new("thread-counts")
                        .short('t')
                        .long("thread-counts")
                        .value_name("COUNTS")
                        .help("Comma-separated thread counts to test (e.g., 1,4,8)")
                        .default_value("1,2,4,8"),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .value_name("SEED")
                        .help("Seed for the synthetic input fields")
                        .default_value("42"),
                )
                .args(Config::pipeline_args()),
        )
}
