
//! End-to-end checks against a realistic registry of SI and US
//! customary units, built entirely through the public API.

use mensura::{
  ConversionError, Dimension, Logarithm, Measurement, Number, Quantity, Tolerance, Unit,
  UnitRegistry,
};

use approx::assert_abs_diff_eq;
use num::pow::Pow;

struct World {
  registry: UnitRegistry,
  meter: Unit,
  second: Unit,
  foot: Unit,
  mile: Unit,
  hour: Unit,
}

fn bootstrap() -> World {
  let registry = UnitRegistry::new();

  let length = registry.define_base_dimension("Length", "L").unwrap();
  let time = registry.define_base_dimension("Time", "T").unwrap();
  let mass = registry.define_base_dimension("Mass", "M").unwrap();

  let meter = registry
    .define_unit("meter", "m", Dimension::base(length.clone()))
    .unwrap();
  let second = registry
    .define_unit("second", "s", Dimension::base(time.clone()))
    .unwrap();
  registry
    .define_unit("gram", "g", Dimension::base(mass))
    .unwrap();

  registry.define_prefix_catalog(&mensura::SI_PREFIXES).unwrap();
  let kilo = registry.prefix_by_symbol("k").unwrap();
  registry.define_scaled_unit(&kilo, &meter).unwrap();

  let foot = registry
    .define_unit("foot", "ft", Dimension::base(length.clone()))
    .unwrap();
  registry
    .define_conversion(&foot, Number::ratio(3048, 10_000), &Unit::from(meter.clone()))
    .unwrap();

  let mile = registry
    .define_unit("mile", "mi", Dimension::base(length.clone()))
    .unwrap();
  registry
    .define_conversion(&mile, Number::from(5280), &Unit::from(foot.clone()))
    .unwrap();

  let minute = registry
    .define_unit("minute", "min", Dimension::base(time.clone()))
    .unwrap();
  registry
    .define_conversion(&minute, Number::from(60), &Unit::from(second.clone()))
    .unwrap();
  let hour = registry
    .define_unit("hour", "h", Dimension::base(time.clone()))
    .unwrap();
  registry
    .define_conversion(&hour, Number::from(60), &Unit::from(minute))
    .unwrap();

  let speed = Dimension::base(length) / Dimension::base(time);
  registry.define_dimension(speed, "Speed", "v").unwrap();

  World {
    meter: Unit::from(meter),
    second: Unit::from(second),
    foot: Unit::from(foot),
    mile: Unit::from(mile),
    hour: Unit::from(hour),
    registry,
  }
}

#[test]
fn mile_to_foot_is_exact() {
  let w = bootstrap();
  let miles = Quantity::of(3, w.mile.clone());
  let feet = miles.convert_to(&w.foot).unwrap();
  assert_eq!(feet.magnitude(), &Number::from(15_840));
  assert!(feet.magnitude().is_exact());
}

#[test]
fn speed_from_division() {
  let w = bootstrap();
  let speed = Quantity::of(10, w.meter.clone()) / Quantity::of(2, w.second.clone());
  assert_eq!(speed, Quantity::of(5, &w.meter / &w.second));
  assert_eq!(
    w.registry.dimension_name(speed.dimension()),
    Some("Speed".to_owned())
  );
}

#[test]
fn adding_length_to_time_fails() {
  let w = bootstrap();
  let err = Quantity::of(1, w.meter.clone()).try_add(&Quantity::of(1, w.second.clone()));
  assert!(matches!(err, Err(ConversionError::Incompatible(_))));
}

#[test]
fn unit_multiplication_is_commutative_and_associative() {
  let w = bootstrap();
  let (m, s, ft) = (w.meter, w.second, w.foot);
  assert_eq!(&m * &s, &s * &m);
  assert_eq!((&m * &s) * ft.clone(), m * (s * ft));
}

#[test]
fn unit_divided_by_itself_is_dimensionless() {
  let w = bootstrap();
  let mph = &w.mile / &w.hour;
  assert_eq!(&mph / &mph, Unit::dimensionless());
}

#[test]
fn mile_per_hour_resolves_through_shared_roots() {
  let w = bootstrap();
  let mph = &w.mile / &w.hour;
  let mps = &w.meter / &w.second;
  // 1 mi/h = 1609.344 m / 3600 s, exactly.
  let converted = Quantity::of(1, mph).convert_to(&mps).unwrap();
  assert_eq!(converted.magnitude(), &Number::ratio(1_609_344, 3_600_000));
}

#[test]
fn round_trip_conversions_are_exact() {
  let w = bootstrap();
  let original = Quantity::of(Number::ratio(7, 3), w.mile.clone());
  let back = original
    .convert_to(&w.meter)
    .unwrap()
    .convert_to(&w.mile)
    .unwrap();
  assert_eq!(back.magnitude(), &Number::ratio(7, 3));
}

#[test]
fn scaled_units_convert_exactly() {
  let w = bootstrap();
  let km = Unit::from(w.registry.unit_by_symbol("km").unwrap());
  let marathon = Quantity::of(Number::ratio(42_195, 1000), km);
  let meters = marathon.convert_to(&w.meter).unwrap();
  assert_eq!(meters.magnitude(), &Number::from(42_195));
}

#[test]
fn squared_units_convert_with_squared_ratio() {
  let w = bootstrap();
  let sq_ft = w.foot.pow(2);
  let sq_m = w.meter.pow(2);
  let acre_ish = Quantity::of(10_000, sq_ft);
  let converted = acre_ish.convert_to(&sq_m).unwrap();
  assert_eq!(
    converted.magnitude(),
    &(Number::ratio(3048, 10_000).powi(2) * Number::from(10_000))
  );
}

#[test]
fn interning_returns_one_instance_for_equal_units() {
  let w = bootstrap();
  let a = w.registry.intern(&w.meter / &w.second);
  let b = w.registry.intern(&w.meter / &w.second);
  assert_eq!(a, b);
  // Interning is only a cache; equality holds without it.
  assert_eq!(&w.meter / &w.second, a);
}

#[test]
fn registry_ratio_is_memoized_and_exact() {
  let w = bootstrap();
  let first = w.registry.ratio(&w.mile, &w.foot).unwrap();
  let second = w.registry.ratio(&w.mile, &w.foot).unwrap();
  assert_eq!(first, Number::from(5280));
  assert_eq!(first, second);
}

#[test]
fn unit_specs_round_trip_through_json() {
  let w = bootstrap();
  let mph = &w.mile / &w.hour;
  let json = serde_json::to_string(&mph.spec()).unwrap();
  let spec = serde_json::from_str(&json).unwrap();
  let rebuilt = w.registry.unit_from_spec(&spec).unwrap();
  assert_eq!(rebuilt, mph);
}

#[test]
fn decibel_round_trip() {
  let db = Logarithm::decibel().against(Quantity::scalar(1));
  let level = db.level_of(&Quantity::scalar(1000)).unwrap();
  assert_abs_diff_eq!(level.magnitude().to_f64(), 30.0, epsilon = 1e-9);
  let linear = level.to_quantity();
  assert_abs_diff_eq!(linear.magnitude().to_f64(), 1000.0, epsilon = 1e-6);
}

#[test]
fn decibel_addition_is_linear() {
  let db = Logarithm::decibel().against(Quantity::scalar(1));
  let sum = db.level(0).try_add(&db.level(10)).unwrap();
  assert_abs_diff_eq!(sum.to_quantity().magnitude().to_f64(), 11.0, epsilon = 1e-9);
}

#[test]
fn referenced_decibels_convert_between_references() {
  let w = bootstrap();
  let db_m = Logarithm::decibel().against(Quantity::of(1, w.meter.clone()));
  let db_km = Logarithm::decibel().against(Quantity::of(
    1,
    w.registry.unit_by_symbol("km").unwrap(),
  ));
  let level = db_m.level(30).convert_to(&db_km).unwrap();
  assert_abs_diff_eq!(level.magnitude().to_f64(), 0.0, epsilon = 1e-9);
}

#[test]
fn measurements_compare_by_overlap() {
  let w = bootstrap();
  let surveyed = Measurement::new(
    Quantity::of(1, w.mile.clone()),
    Quantity::of(10, w.foot.clone()),
  )
  .unwrap();
  let paced = Measurement::new(
    Quantity::of(5275, w.foot.clone()),
    Quantity::of(2, w.foot.clone()),
  )
  .unwrap();
  assert_eq!(surveyed, paced);
  let far_off = Measurement::new(
    Quantity::of(5000, w.foot.clone()),
    Quantity::of(2, w.foot),
  )
  .unwrap();
  assert_ne!(surveyed, far_off);
}

#[test]
fn quantities_approximate_within_tolerance() {
  let w = bootstrap();
  let exact = Quantity::of(Number::ratio(1, 3), w.meter.clone());
  let rounded = Quantity::of(0.3333, w.meter);
  assert!(!exact.approximates(&rounded, &Tolerance::default()));
  assert!(exact.approximates(&rounded, &Tolerance::absolute(1e-3)));
  assert!(exact.approximates(&rounded, &Tolerance::relative(1e-3)));
}
