use serde::{Deserialize, Serialize};

use super::phase::{Phase, PhaseSet};
use crate::error::{Result, SimError};
use crate::physics::gravity::{gravity_earth, EARTH_RADIUS};

// ---------------------------------------------------------------------------
// Vehicle configuration (immutable for one run)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleConfig {
    #[serde(default)]
    pub name: String,
    pub initial_mass: f64, // kg, wet
    pub final_mass: f64,   // kg, dry
    pub thrust: f64,       // N, nominal
    pub isp: f64,          // s
    pub cd: f64,           // drag coefficient
    pub area: f64,         // reference area, m^2
    #[serde(default)]
    pub start: u32, // s, first integration step
    pub end: u32,   // s, last integration step (inclusive)
    #[serde(default = "default_sample_interval")]
    pub sample_interval: u32, // s, planar record sampling
    #[serde(default)]
    pub phases: PhaseSet,
}

fn default_sample_interval() -> u32 {
    1
}

impl VehicleConfig {
    /// Check every invariant a run relies on. Drivers call this before the
    /// first step so a bad configuration never fails mid-run.
    pub fn validate(&self) -> Result<()> {
        let finite = [
            ("initial_mass", self.initial_mass),
            ("final_mass", self.final_mass),
            ("thrust", self.thrust),
            ("isp", self.isp),
            ("cd", self.cd),
            ("area", self.area),
        ];
        if let Some((field, _)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(SimError::invalid(format!("{field} must be finite")));
        }
        if self.final_mass <= 0.0 {
            return Err(SimError::invalid("final_mass must be positive"));
        }
        if self.final_mass >= self.initial_mass {
            return Err(SimError::invalid(format!(
                "final_mass ({}) must be below initial_mass ({})",
                self.final_mass, self.initial_mass
            )));
        }
        if self.thrust < 0.0 {
            return Err(SimError::invalid("thrust must not be negative"));
        }
        if self.isp <= 0.0 {
            return Err(SimError::invalid("isp must be positive"));
        }
        if self.cd < 0.0 || self.area < 0.0 {
            return Err(SimError::invalid("cd and area must not be negative"));
        }
        if self.end <= self.start {
            return Err(SimError::invalid(format!(
                "end ({}) must be after start ({})",
                self.end, self.start
            )));
        }
        if self.sample_interval == 0 {
            return Err(SimError::invalid("sample_interval must be positive"));
        }
        for phase in self.phases.iter() {
            let finite = match phase {
                Phase::GravityTurn(g) => g.start.is_finite() && g.impulse.iter().all(|c| c.is_finite()),
                Phase::Ascent(w) | Phase::MaxQ(w) | Phase::Circularization(w) => {
                    w.start.is_finite() && w.end.is_finite()
                }
            };
            if !finite {
                return Err(SimError::invalid(format!("{:?} values must be finite", phase.kind())));
            }
            if let Some(w) = phase.window() {
                if !(0.0..=1.0).contains(&w.thrust_ratio) {
                    return Err(SimError::invalid(format!(
                        "{:?} thrust_ratio {} outside [0, 1]",
                        phase.kind(),
                        w.thrust_ratio
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn propellant_mass(&self) -> f64 {
        self.initial_mass - self.final_mass
    }

    /// Share of propellant left at `mass`, 1.0 at ignition and 0.0 when dry.
    pub fn propellant_remaining(&self, mass: f64) -> f64 {
        (mass - self.final_mass) / self.propellant_mass()
    }

    /// Thrust-to-weight ratio on the pad.
    pub fn liftoff_twr(&self) -> f64 {
        self.thrust / (self.initial_mass * gravity_earth(EARTH_RADIUS))
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

pub struct VehicleConfigBuilder {
    name: String,
    initial_mass: f64,
    final_mass: f64,
    thrust: f64,
    isp: f64,
    cd: f64,
    area: f64,
    start: u32,
    end: u32,
    sample_interval: u32,
    phases: PhaseSet,
}

impl VehicleConfigBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            initial_mass: 1_000.0,
            final_mass: 400.0,
            thrust: 20_000.0,
            isp: 250.0,
            cd: 0.3,
            area: 1.0,
            start: 0,
            end: 600,
            sample_interval: 1,
            phases: PhaseSet::new(),
        }
    }

    pub fn initial_mass(mut self, v: f64) -> Self { self.initial_mass = v; self }
    pub fn final_mass(mut self, v: f64) -> Self { self.final_mass = v; self }
    pub fn thrust(mut self, v: f64) -> Self { self.thrust = v; self }
    pub fn isp(mut self, v: f64) -> Self { self.isp = v; self }
    pub fn cd(mut self, v: f64) -> Self { self.cd = v; self }
    pub fn area(mut self, v: f64) -> Self { self.area = v; self }
    pub fn start(mut self, v: u32) -> Self { self.start = v; self }
    pub fn end(mut self, v: u32) -> Self { self.end = v; self }
    pub fn sample_interval(mut self, v: u32) -> Self { self.sample_interval = v; self }
    pub fn phase(mut self, p: Phase) -> Self { self.phases.insert(p); self }

    pub fn build(self) -> Result<VehicleConfig> {
        let config = VehicleConfig {
            name: self.name,
            initial_mass: self.initial_mass,
            final_mass: self.final_mass,
            thrust: self.thrust,
            isp: self.isp,
            cd: self.cd,
            area: self.area,
            start: self.start,
            end: self.end,
            sample_interval: self.sample_interval,
            phases: self.phases,
        };
        config.validate()?;
        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// Preset vehicles
// ---------------------------------------------------------------------------

pub mod presets {
    use nalgebra::Vector3;

    use super::*;
    use crate::vehicle::phase::{GravityTurn, ThrustWindow};

    fn falcon9(name: &str, isp: f64, end: u32) -> VehicleConfig {
        VehicleConfig {
            name: name.into(),
            initial_mass: 549_054.0,
            final_mass: 200_000.0,
            thrust: 7_607_000.0,
            isp,
            cd: 0.3,
            area: 10.7521,
            start: 0,
            end,
            sample_interval: 1,
            phases: PhaseSet::new(),
        }
    }

    /// Falcon 9-like vehicle flown to orbit. The inflated Isp makes up for
    /// the single-stage model.
    pub fn falcon9_orbit() -> VehicleConfig {
        VehicleConfig {
            phases: PhaseSet::new()
                .with(Phase::Ascent(ThrustWindow::new(0.0, 8.0 * 60.0 + 10.0, 1.0)))
                .with(Phase::GravityTurn(GravityTurn {
                    start: 23.0,
                    impulse: Vector3::new(1.0, 0.0, 0.0),
                }))
                .with(Phase::MaxQ(ThrustWindow::new(30.0, 65.0, 0.9)))
                .with(Phase::Circularization(ThrustWindow::new(
                    34.0 * 60.0 + 55.0,
                    35.0 * 60.0 + 6.8,
                    0.5,
                ))),
            ..falcon9("Falcon 9 (orbit)", 1_200.0, 10_000)
        }
    }

    /// Falcon 9-like vehicle with a realistic Isp; does not reach orbit.
    ///
    /// Max-Q is its only window, so the 3D step coasts outside 30-65 s.
    /// Fly it through the planar record.
    pub fn falcon9_suborbital() -> VehicleConfig {
        VehicleConfig {
            phases: PhaseSet::new()
                .with(Phase::GravityTurn(GravityTurn {
                    start: 11.0,
                    impulse: Vector3::new(1.0, 0.0, 0.0),
                }))
                .with(Phase::MaxQ(ThrustWindow::new(30.0, 65.0, 0.9))),
            ..falcon9("Falcon 9 (suborbital)", 290.0, 8_000)
        }
    }
}
