use std::fmt;

use crate::{
    error::{ConfigError, QuatrotResult},
    vector::Vec3,
};


/// Parsing states. Vector flags carry the index of the next component.
#[derive(Clone, Copy)]
enum Parse {
    None,
    Axis(usize),
    Angle,
    Degrees,
    Point(usize),
    Samples,
    Seed,
    Tolerance,
}
impl Parse {
    /// The flag still waiting for a value, if any.
    fn pending(&self) -> Option<&'static str> {
        match self {
            Parse::None       => None,
            Parse::Axis(_)    => Some("-axis"),
            Parse::Angle      => Some("-angle"),
            Parse::Degrees    => Some("-degrees"),
            Parse::Point(_)   => Some("-point"),
            Parse::Samples    => Some("-samples"),
            Parse::Seed       => Some("-seed"),
            Parse::Tolerance  => Some("-tolerance"),
        }
    }
}

fn parse_f32(flag: &str, arg: &str) -> QuatrotResult<f32> {
    match arg.parse::<f32>() {
        Ok(f) if f.is_finite() => Ok(f),
        _ => Err(ConfigError::InvalidNumber(flag.to_string(), arg.to_string())),
    }
}

fn set_component(vec: &mut Vec3, i: usize, f: f32) {
    match i {
        0 => vec.x = f,
        1 => vec.y = f,
        _ => vec.z = f,
    }
}


/// User defined configuration settings.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Rotation axis as given, not necessarily unit length.
    pub axis: Vec3,
    /// Radians.
    pub angle: f32,
    pub point: Vec3,
    pub samples: usize,
    pub seed: u64,
    pub tolerance: f32,
}
impl Config {
    /// Create a new Config from the command line arguments, program name excluded.
    pub fn new(args: Vec<String>) -> QuatrotResult<Config> {
        let mut parser = Parse::None;
        let mut cfg    = Config::default();

        for arg in args.into_iter() {
            let flag = match arg.as_str() {
                "-axis"      => Some(Parse::Axis(0)),
                "-angle"     => Some(Parse::Angle),
                "-degrees"   => Some(Parse::Degrees),
                "-point"     => Some(Parse::Point(0)),
                "-samples"   => Some(Parse::Samples),
                "-seed"      => Some(Parse::Seed),
                "-tolerance" => Some(Parse::Tolerance),
                _ => None,
            };
            if let Some(next) = flag {
                if let Some(pending) = parser.pending() {
                    return Err(
                        ConfigError::MissingValue(pending.to_string())
                    );
                }
                parser = next;
                continue;
            }
            parser = match parser {
                Parse::None => {
                    return Err(
                        ConfigError::UnknownFlag(arg)
                    );
                }
                Parse::Axis(i) => {
                    set_component(&mut cfg.axis, i, parse_f32("-axis", &arg)?);
                    if i < 2 { Parse::Axis(i + 1) } else { Parse::None }
                }
                Parse::Point(i) => {
                    set_component(&mut cfg.point, i, parse_f32("-point", &arg)?);
                    if i < 2 { Parse::Point(i + 1) } else { Parse::None }
                }
                Parse::Angle => {
                    cfg.angle = parse_f32("-angle", &arg)?;
                    Parse::None
                }
                Parse::Degrees => {
                    cfg.angle = parse_f32("-degrees", &arg)?.to_radians();
                    Parse::None
                }
                Parse::Tolerance => {
                    let tolerance = parse_f32("-tolerance", &arg)?;
                    if tolerance < 0.0 {
                        return Err(
                            ConfigError::InvalidNumber("-tolerance".to_string(), arg)
                        );
                    }
                    cfg.tolerance = tolerance;
                    Parse::None
                }
                Parse::Samples => {
                    if let Ok(samples) = arg.parse::<usize>() {
                        cfg.samples = samples;
                    }
                    else {
                        return Err(
                            ConfigError::InvalidSamples(arg)
                        );
                    }
                    Parse::None
                }
                Parse::Seed => {
                    if let Ok(seed) = arg.parse::<u64>() {
                        cfg.seed = seed;
                    }
                    else {
                        return Err(
                            ConfigError::InvalidNumber("-seed".to_string(), arg)
                        );
                    }
                    Parse::None
                }
            };
        }
        if let Some(pending) = parser.pending() {
            return Err(
                ConfigError::MissingValue(pending.to_string())
            );
        }
        // A zero axis normalizes to NaNs.
        let len = cfg.unit_axis().len();
        if len.is_nan() || (len - 1.0).abs() > 1e-5 {
            return Err(ConfigError::ZeroAxis);
        }
        Ok(cfg)
    }

    /// The axis scaled to unit length, as the rotation factory requires.
    pub fn unit_axis(&self) -> Vec3 {
        self.axis.normalized()
    }
}
impl Default for Config {
    fn default() -> Self {
        Self {
            axis: Vec3::new(1.0, 0.4, -0.2),
            angle: 0.45,
            point: Vec3::new(2.1, -0.9, 1.3),
            samples: 0,
            seed: 555555555,
            tolerance: 1e-5,
        }
    }
}
impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "
            \rAxis: {}
            \rAngle: {} rad
            \rPoint: {}
            \rSamples: {} (seed {})
            \rTolerance: {}",
            self.axis,
            self.angle,
            self.point,
            self.samples,
            self.seed,
            self.tolerance,
        )
    }
}


#[cfg(test)]
fn args(s: &str) -> Vec<String> {
    s.split_whitespace().map(String::from).collect()
}

#[test]
fn no_arguments_gives_defaults() {
    assert!(Config::new(Vec::new()) == Ok(Config::default()));
}

#[test]
fn parses_all_flags() {
    let cfg = Config::new(args(
        "-axis 0 0 2 -angle 1.5 -point 1 -2.5 3 -samples 10 -seed 9 -tolerance 0.001"
    )).unwrap();

    assert!(cfg.axis == Vec3::new(0.0, 0.0, 2.0));
    assert!(cfg.unit_axis() == Vec3::unit_z());
    assert!(cfg.angle == 1.5);
    assert!(cfg.point == Vec3::new(1.0, -2.5, 3.0));
    assert!(cfg.samples == 10);
    assert!(cfg.seed == 9);
    assert!(cfg.tolerance == 0.001);
}

#[test]
fn degrees_are_converted() {
    let cfg = Config::new(args("-degrees 180")).unwrap();
    assert!((cfg.angle - std::f32::consts::PI).abs() < 1e-6);
}

#[test]
fn negative_numbers_are_values_not_flags() {
    let cfg = Config::new(args("-axis -1 -0.4 0.2")).unwrap();
    assert!(cfg.axis == Vec3::new(-1.0, -0.4, 0.2));
}

#[test]
fn incomplete_vector_is_missing_value() {
    assert!(Config::new(args("-point 1 2")) == Err(ConfigError::MissingValue("-point".to_string())));
    assert!(Config::new(args("-axis 1 -angle 2")) == Err(ConfigError::MissingValue("-axis".to_string())));
}

#[test]
fn rejects_bad_input() {
    assert!(Config::new(args("-angle abc")) == Err(ConfigError::InvalidNumber("-angle".to_string(), "abc".to_string())));
    assert!(Config::new(args("-angle inf")).is_err());
    assert!(Config::new(args("-samples -3")) == Err(ConfigError::InvalidSamples("-3".to_string())));
    assert!(Config::new(args("-tolerance -1")).is_err());
    assert!(Config::new(args("-verbose")) == Err(ConfigError::UnknownFlag("-verbose".to_string())));
    assert!(Config::new(args("-axis 0 0 0")) == Err(ConfigError::ZeroAxis));
    assert!(Config::new(args("-axis 1e39 0 0")).is_err());
}

#[test]
fn extreme_axis_magnitudes_are_normalized() {
    let cfg = Config::new(args("-axis 1e20 1e20 0 -point 1 0 0")).unwrap();
    let half = std::f32::consts::FRAC_1_SQRT_2;
    assert!(cfg.unit_axis().approx_eq(Vec3::new(half, half, 0.0), 1e-6));

    let cfg = Config::new(args("-axis 1e-23 0 0")).unwrap();
    assert!(cfg.unit_axis().approx_eq(Vec3::unit_x(), 1e-6));
}
