use std::io::{self, Write};
use std::path::Path;

use crate::dynamics::state::FlightSample;
use crate::orbital::OrbitalState;
use crate::sim::record::{Channel, TrajectoryRecord};

/// Write the planar record to CSV.
///
/// Columns: time, one per channel in chart order (keyed by channel name),
///          phase (thrust | coast)
pub fn write_record<W: Write>(writer: &mut W, record: &TrajectoryRecord) -> io::Result<()> {
    write!(writer, "time")?;
    for channel in Channel::ALL {
        write!(writer, ",{}", channel.name())?;
    }
    writeln!(writer, ",phase")?;

    for row in &record.rows {
        write!(writer, "{}", row.time)?;
        for channel in Channel::ALL {
            write!(writer, ",{:.4}", row.value(channel))?;
        }
        let phase = if row.thrust == 0.0 { "coast" } else { "thrust" };
        writeln!(writer, ",{phase}")?;
    }

    Ok(())
}

/// Write 3D flight samples to CSV.
///
/// Columns: time, pos_x, pos_y, pos_z, vel_x, vel_y, vel_z,
///          altitude, speed, thrust, mass, grounded, depleted
pub fn write_samples<W: Write>(writer: &mut W, samples: &[FlightSample]) -> io::Result<()> {
    writeln!(
        writer,
        "time,pos_x,pos_y,pos_z,vel_x,vel_y,vel_z,\
         altitude,speed,thrust,mass,grounded,depleted"
    )?;

    for s in samples {
        writeln!(
            writer,
            "{},{:.4},{:.4},{:.4},{:.4},{:.4},{:.4},\
             {:.4},{:.4},{:.1},{:.4},{},{}",
            s.time,
            s.pos.x, s.pos.y, s.pos.z,
            s.vel.x, s.vel.y, s.vel.z,
            s.altitude(),
            s.speed(),
            s.thrust.norm(),
            s.mass,
            s.grounded,
            s.depleted,
        )?;
    }

    Ok(())
}

/// Write an orbit state history to CSV.
///
/// Columns: time, pos_x, pos_y, pos_z, vel_x, vel_y, vel_z, altitude
pub fn write_orbit<W: Write>(writer: &mut W, history: &[OrbitalState]) -> io::Result<()> {
    writeln!(writer, "time,pos_x,pos_y,pos_z,vel_x,vel_y,vel_z,altitude")?;

    for s in history {
        writeln!(
            writer,
            "{:.2},{:.4},{:.4},{:.4},{:.4},{:.4},{:.4},{:.4}",
            s.time,
            s.pos.x, s.pos.y, s.pos.z,
            s.vel.x, s.vel.y, s.vel.z,
            s.altitude(),
        )?;
    }

    Ok(())
}

pub fn write_record_file(path: impl AsRef<Path>, record: &TrajectoryRecord) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_record(&mut file, record)
}

pub fn write_samples_file(path: impl AsRef<Path>, samples: &[FlightSample]) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_samples(&mut file, samples)
}

pub fn write_orbit_file(path: impl AsRef<Path>, history: &[OrbitalState]) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_orbit(&mut file, history)
}
