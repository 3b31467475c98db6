use clap::Parser;
use liftline_core::{
    AeroError, ChordPolicy, Degrees, FlowConditions, KgPerCubicMeter, LiftingLine, LinearThrust,
    MeshConfig, MetersPerSecond, Newtons, PerformanceModel, Radians, SolveMode, SpacingPolicy,
    SpanwiseDistribution,
};
use std::f64::consts::PI;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Lifting-line wing analysis demo with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "liftline-demo")]
#[command(about = "Lifting-line finite wing analysis", long_about = None)]
struct Args {
    /// Number of span stations
    #[arg(short = 'n', long, default_value_t = 40)]
    stations: usize,

    /// Spanwise spacing (cosine, uniform)
    #[arg(short, long, default_value = "cosine")]
    spacing: String,

    /// Chord distribution (elliptical, uniform)
    #[arg(short, long, default_value = "elliptical")]
    chord: String,

    /// Reference (root) chord as a fraction of the span
    #[arg(long, default_value_t = 0.1)]
    chord_ref: f64,

    /// Span in metres (chords scale with it)
    #[arg(long, default_value_t = 1.0)]
    scale: f64,

    /// Angle of attack in degrees
    #[arg(short, long, default_value_t = 4.0)]
    alpha: f64,

    /// Solve for this lift coefficient instead of a fixed angle of attack
    #[arg(short, long)]
    target_cl: Option<f64>,

    /// Ignore spanwise coupling (2D thin-airfoil response per station)
    #[arg(short, long)]
    uncoupled: bool,

    /// Print the per-station distribution
    #[arg(long)]
    table: bool,

    /// Aircraft weight in newtons; enables the climb performance report
    #[arg(short, long)]
    weight: Option<f64>,

    /// Zero-lift profile drag coefficient for the performance report
    #[arg(long, default_value_t = 0.01)]
    cd0: f64,

    /// Static thrust in newtons for the performance report
    #[arg(long, default_value_t = 5.0)]
    static_thrust: f64,

    /// Run validation tests
    #[arg(short, long)]
    validate: bool,
}

fn main() -> Result<(), AeroError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    println!("=== Lifting-Line Demo ===\n");

    let spacing = match args.spacing.to_lowercase().as_str() {
        "uniform" => SpacingPolicy::Uniform,
        "cosine" => SpacingPolicy::Cosine,
        other => {
            warn!("Unknown spacing '{}', using cosine", other);
            SpacingPolicy::Cosine
        }
    };
    let chord = match args.chord.to_lowercase().as_str() {
        "uniform" | "rectangular" => ChordPolicy::Uniform(args.chord_ref),
        "elliptical" | "elliptic" => ChordPolicy::Elliptical(args.chord_ref),
        other => {
            warn!("Unknown chord policy '{}', using elliptical", other);
            ChordPolicy::Elliptical(args.chord_ref)
        }
    };
    let config = MeshConfig {
        stations: args.stations,
        spacing,
        chord,
        scale: args.scale,
        ..MeshConfig::default()
    };

    let mut wing = LiftingLine::new(&config)?;
    let mesh = wing.mesh();
    println!(
        "Mesh: {} stations, span {:.3} m, area {:.4} m², AR {:.3}",
        mesh.len(),
        mesh.span(),
        mesh.area(),
        mesh.aspect_ratio()
    );

    let mode = if args.uncoupled {
        SolveMode::Uncoupled
    } else {
        SolveMode::Coupled
    };

    let alpha = if let Some(cl) = args.target_cl {
        wing.solve_for_lift_coefficient(cl, mode)?
    } else {
        let alpha = Degrees::new(args.alpha).to_radians();
        wing.solve_with(mode, alpha)?;
        alpha
    };

    let c = wing.coefficients()?;
    println!("\nSolve ({mode}) at alpha = {}", alpha.to_degrees());
    println!("  CL      = {:.5}", c.lift_coefficient);
    println!("  CDi     = {:.6}", c.induced_drag_coefficient);
    println!("  AR      = {:.4}", c.aspect_ratio);
    println!("  L       = {:.6}", c.lift);
    println!("  Di      = {:.6}", c.induced_drag);
    match (c.span_efficiency, c.span_efficiency_arclength) {
        (Some(e), Some(e_arc)) => {
            println!("  e       = {:.5}", e);
            println!("  e (arc) = {:.5}", e_arc);
        }
        _ => println!("  e       = undefined (no induced drag)"),
    }
    println!("  CL/dα   = {:.4} /rad", wing.lift_curve_slope(mode)?);

    if args.table {
        print_distribution(&SpanwiseDistribution::capture(&wing)?);
    }

    if let Some(weight) = args.weight {
        report_performance(&mut wing, &args, weight)?;
    }

    if args.validate {
        run_validation_tests()?;
    }

    Ok(())
}

fn print_distribution(dist: &SpanwiseDistribution) {
    println!("\n       y |    chord |        kappa |       upwash |  local cl |   elliptic");
    println!("---------|----------|--------------|--------------|-----------|-----------");
    for i in 0..dist.len() {
        println!(
            "{:8.4} | {:8.5} | {:12.6e} | {:12.6e} | {:9.5} | {:10.6e}",
            dist.y[i],
            dist.chord[i],
            dist.kappa[i],
            dist.upwash[i],
            dist.local_lift_coefficient[i],
            dist.elliptic_kappa[i]
        );
    }
}

fn report_performance(wing: &mut LiftingLine, args: &Args, weight: f64) -> Result<(), AeroError> {
    let model = PerformanceModel {
        weight: Newtons::new(weight),
        profile_cd0: args.cd0,
        speed_limits: (MetersPerSecond::new(8.0), MetersPerSecond::new(30.0)),
        climb_angle_limits: (Radians::new(-0.3), Radians::new(0.6)),
        thrust: LinearThrust {
            static_thrust: Newtons::new(args.static_thrust),
            thrust_at_max: Newtons::new(0.2 * args.static_thrust),
            max_speed: MetersPerSecond::new(30.0),
        },
        ..PerformanceModel::default()
    };

    println!("\n=== Performance (sea level) ===\n");
    println!("  V (m/s) |  Drag (N) | Thrust (N)");
    println!("----------|-----------|-----------");
    for v in [8.0, 12.0, 16.0, 20.0, 25.0, 30.0] {
        let speed = MetersPerSecond::new(v);
        let flow = FlowConditions::sea_level(speed)?;
        let drag = model.drag(wing, &flow, Radians::new(0.0))?;
        println!(
            "{:9.1} | {:9.4} | {:10.4}",
            v,
            *drag,
            *model.thrust.thrust(speed)
        );
    }

    let envelope = model.climb_envelope(wing, KgPerCubicMeter::SEA_LEVEL_AIR, 10)?;
    println!(
        "\nClimb envelope: {} flyable / {} unflyable points",
        envelope.succeeded.len(),
        envelope.failed.len()
    );
    match envelope.max_climb_rate() {
        Some(rate) => println!("Max climb rate: {rate}"),
        None => println!("No flyable point in the envelope"),
    }
    Ok(())
}

fn run_validation_tests() -> Result<(), AeroError> {
    println!("\n=== Running Validation Tests ===\n");

    // Test 1: Elliptical loading
    println!("Test 1: Elliptical Wing Span Efficiency");
    let mut wing = LiftingLine::new(&MeshConfig::elliptical(80, 0.1))?;
    wing.solve(Degrees::new(4.0).to_radians())?;
    let e = wing.span_efficiency()?;
    let cl = wing.lift_coefficient()?;
    let cdi = wing.induced_drag_coefficient()?;
    let ar = wing.aspect_ratio()?;
    println!("  e = {:.4}, CDi = {:.6}, CL²/(πAR) = {:.6}", e, cdi, cl * cl / (PI * ar));
    if (e - 1.0).abs() < 0.03 {
        println!("  ✓ PASS: Elliptical loading recovered");
    } else {
        println!("  ✗ FAIL: Expected e ≈ 1");
    }

    // Test 2: Thin-airfoil baseline
    println!("\nTest 2: Uncoupled Thin-Airfoil Response");
    let alpha = Degrees::new(3.0).to_radians();
    let mut rect = LiftingLine::new(&MeshConfig::rectangular(20, 0.15, SpacingPolicy::Uniform))?;
    rect.solve_no_wash(alpha)?;
    let worst = rect
        .kappa()
        .iter()
        .zip(rect.mesh().chords().iter())
        .map(|(k, c)| (k + PI * c * *alpha).abs())
        .fold(0.0, f64::max);
    println!("  max |κ + πcα| = {:.3e}", worst);
    if worst < 1e-12 && rect.upwash().iter().all(|w| *w == 0.0) {
        println!("  ✓ PASS: κ = −πcα with zero upwash");
    } else {
        println!("  ✗ FAIL: Uncoupled solve deviates from thin-airfoil theory");
    }

    // Test 3: Symmetry
    println!("\nTest 3: Circulation Symmetry");
    let mut sym = LiftingLine::new(&MeshConfig::elliptical(41, 0.12))?;
    sym.solve(Degrees::new(6.0).to_radians())?;
    let kappa = sym.kappa();
    let n = kappa.len();
    let asym = (0..n)
        .map(|i| (kappa[i] - kappa[n - 1 - i]).abs())
        .fold(0.0, f64::max);
    println!("  max |κ[i] − κ[N−1−i]| = {:.3e}", asym);
    if asym < 1e-10 {
        println!("  ✓ PASS: Symmetric loading");
    } else {
        println!("  ✗ FAIL: Loading is not symmetric");
    }

    info!("Validation complete");
    println!("\n=== Validation Complete ===");
    Ok(())
}
