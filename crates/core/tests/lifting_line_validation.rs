//! Validation of the lifting-line solver against classical finite-wing results
use approx::assert_relative_eq;
use liftline_core::{
    AeroError, ChordPolicy, Degrees, LiftingLine, MeshConfig, Radians, SolveMode, SpacingPolicy,
    SpanwiseMesh, Vec3,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("liftline_core=debug")
        .with_test_writer()
        .try_init();
}

#[test]
fn test_elliptical_wing_has_unit_span_efficiency() {
    init_logging();
    for (n, spacing) in [
        (60, SpacingPolicy::Cosine),
        (100, SpacingPolicy::Cosine),
        (60, SpacingPolicy::Uniform),
    ] {
        let config = MeshConfig {
            stations: n,
            spacing: spacing.clone(),
            ..MeshConfig::elliptical(n, 0.1)
        };
        let mut wing = LiftingLine::new(&config).unwrap();
        wing.solve(Degrees::new(4.0).to_radians()).unwrap();

        let e = wing.span_efficiency().unwrap();
        assert!((e - 1.0).abs() < 0.03, "N={n} {spacing:?}: e = {e}");

        let cl = wing.lift_coefficient().unwrap();
        let ar = wing.aspect_ratio().unwrap();
        let cdi = wing.induced_drag_coefficient().unwrap();
        assert_relative_eq!(cdi, cl * cl / (PI * ar), max_relative = 0.03);
    }
}

#[test]
fn test_elliptical_lift_slope_matches_finite_wing_theory() {
    let wing = LiftingLine::new(&MeshConfig::elliptical(80, 0.1)).unwrap();
    let ar = wing.mesh().aspect_ratio();
    let slope = wing.lift_curve_slope(SolveMode::Coupled).unwrap();
    let theory = 2.0 * PI / (1.0 + 2.0 / ar);
    assert_relative_eq!(slope, theory, max_relative = 0.03);
}

#[test]
fn test_uncoupled_solve_is_thin_airfoil_theory() {
    let alpha = Radians::new(0.08);
    let mut wing =
        LiftingLine::new(&MeshConfig::rectangular(16, 0.12, SpacingPolicy::Uniform)).unwrap();
    wing.solve_no_wash(alpha).unwrap();

    for (k, c) in wing.kappa().iter().zip(wing.mesh().chords().iter()) {
        assert_relative_eq!(*k, -PI * c * 0.08, epsilon = 1e-15);
    }
    assert!(wing.upwash().iter().all(|w| *w == 0.0));
    assert_relative_eq!(
        wing.lift_coefficient().unwrap(),
        2.0 * PI * 0.08,
        epsilon = 1e-12
    );
    assert_eq!(wing.induced_drag_coefficient().unwrap(), 0.0);
    assert!(matches!(
        wing.span_efficiency(),
        Err(AeroError::UndefinedCoefficient { .. })
    ));
}

#[test]
fn test_random_symmetric_wings_have_symmetric_loading() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..5 {
        let n: usize = rng.random_range(4..40);
        let mut chords = vec![0.0; n];
        for i in 0..n.div_ceil(2) {
            let c = rng.random_range(0.02..0.3);
            chords[i] = c;
            chords[n - 1 - i] = c;
        }
        let config = MeshConfig {
            stations: n,
            spacing: SpacingPolicy::Cosine,
            chord: ChordPolicy::Explicit(chords),
            ..MeshConfig::default()
        };
        let alpha = Radians::new(rng.random_range(-0.2..0.2));
        let mut wing = LiftingLine::new(&config).unwrap();
        wing.solve(alpha).unwrap();

        let kappa = wing.kappa();
        let scale = kappa.amax();
        for i in 0..n {
            assert!(
                (kappa[i] - kappa[n - 1 - i]).abs() <= 1e-10 * scale,
                "asymmetric loading at station {i} of {n}"
            );
        }
    }
}

#[test]
fn test_repeated_solves_are_identical() {
    let mut wing = LiftingLine::new(&MeshConfig::default()).unwrap();
    let alpha = Degrees::new(2.5).to_radians();
    wing.solve(alpha).unwrap();
    let (kappa, upwash) = (wing.kappa().clone(), wing.upwash().clone());
    wing.solve(alpha).unwrap();
    assert_eq!(wing.kappa(), &kappa);
    assert_eq!(wing.upwash(), &upwash);
}

#[test]
fn test_coefficients_before_solve_are_errors() {
    let wing = LiftingLine::new(&MeshConfig::default()).unwrap();
    assert_eq!(wing.lift_coefficient(), Err(AeroError::NotSolved));
    assert_eq!(wing.span_efficiency(), Err(AeroError::NotSolved));
}

#[test]
fn test_coefficients_do_not_depend_on_scale_or_offsets() {
    let alpha = Radians::new(0.06);
    let mut unit = LiftingLine::new(&MeshConfig::elliptical(50, 0.1)).unwrap();
    unit.solve(alpha).unwrap();

    let moved = MeshConfig {
        scale: 7.5,
        x_offset: 1.3,
        z_offset: -0.4,
        ..MeshConfig::elliptical(50, 0.1)
    };
    let mut big = LiftingLine::new(&moved).unwrap();
    big.solve(alpha).unwrap();

    let a = unit.coefficients().unwrap();
    let b = big.coefficients().unwrap();
    assert_relative_eq!(a.lift_coefficient, b.lift_coefficient, max_relative = 1e-10);
    assert_relative_eq!(
        a.induced_drag_coefficient,
        b.induced_drag_coefficient,
        max_relative = 1e-10
    );
    assert_relative_eq!(a.aspect_ratio, b.aspect_ratio, max_relative = 1e-10);
    // Circulation carries a length: it scales with the span
    assert_relative_eq!(b.lift, 7.5 * 7.5 * a.lift, max_relative = 1e-10);
}

#[test]
fn test_target_lift_coefficient_is_reached() {
    let mut wing = LiftingLine::new(&MeshConfig::elliptical(40, 0.1)).unwrap();
    for target in [-0.3, 0.2, 0.9] {
        let alpha = wing
            .solve_for_lift_coefficient(target, SolveMode::Coupled)
            .unwrap();
        assert_relative_eq!(wing.lift_coefficient().unwrap(), target, epsilon = 1e-10);
        assert_eq!(target.signum(), alpha.signum());
    }
}

#[test]
fn test_reconfigure_rebuilds_and_resets() {
    let mut wing = LiftingLine::new(&MeshConfig::elliptical(20, 0.1)).unwrap();
    wing.solve(Radians::new(0.05)).unwrap();
    let before = wing.lift_coefficient().unwrap();

    wing.reconfigure(&MeshConfig::elliptical(60, 0.1)).unwrap();
    assert_eq!(wing.mesh().len(), 60);
    assert_eq!(wing.lift_coefficient(), Err(AeroError::NotSolved));

    wing.solve(Radians::new(0.05)).unwrap();
    assert_relative_eq!(wing.lift_coefficient().unwrap(), before, max_relative = 0.02);
}

#[test]
fn test_dihedral_wing_arclength_efficiency() {
    let n = 60;
    let tan_dihedral = 10f64.to_radians().tan();
    let mut points = Vec::with_capacity(n);
    let mut chords = Vec::with_capacity(n);
    for i in 0..n {
        let s = (0.5 * PI * (i as f64 + 0.5) / n as f64).sin().powi(2);
        points.push(Vec3::new(0.0, s, (s - 0.5).abs() * tan_dihedral));
        chords.push(0.1 * (1.0 - (2.0 * s - 1.0).powi(2)).sqrt());
    }
    let mesh = SpanwiseMesh::from_stations(&points, &chords).unwrap();
    let mut wing = LiftingLine::from_mesh(mesh);
    wing.solve(Radians::new(0.05)).unwrap();

    let e_arc = wing.span_efficiency_arclength().unwrap();
    assert!((e_arc - 1.0).abs() < 0.03, "e_arc = {e_arc}");

    let kappa = wing.kappa();
    for i in 0..n {
        assert_relative_eq!(kappa[i], kappa[n - 1 - i], max_relative = 1e-9);
    }
}
