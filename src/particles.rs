use std::f64::consts::PI;

use log::debug;
use rand::Rng;
use rand_distr::Distribution;

use crate::Error;

/// Particle properties during simulation, not including forces
#[derive(Debug)]
pub struct Particles {
    pub positions: Vec<[f64; 3]>,
    pub velocities: Vec<[f64; 3]>,
}
impl Particles {
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
            velocities: Vec::new(),
        }
    }

    /// Place unit-diameter particles uniformly in a cubic box sized from
    /// the packing fraction.
    pub fn create_random(num_particles: usize, packing_fraction: f64) -> Result<Self, Error> {
        if num_particles == 0 {
            return Err(Error::Configuration(String::from(
                "cannot create an empty particle set",
            )));
        }
        if packing_fraction <= 0.0 || packing_fraction >= 1.0 {
            return Err(Error::Configuration(format!(
                "packing fraction should be in (0, 1), found {}",
                packing_fraction,
            )));
        }

        // phi = N * (pi / 6) / L^3 for unit-diameter spheres
        let edge = (num_particles as f64 * PI / (6.0 * packing_fraction)).cbrt();
        debug!(
            "creating {} random particles in a box of edge {:.3}",
            num_particles, edge,
        );

        let mut rng = rand::thread_rng();
        let mut particles = Self::new();
        let coords = (0..num_particles)
            .map(|_| {
                [
                    rng.gen_range(0.0..edge),
                    rng.gen_range(0.0..edge),
                    rng.gen_range(0.0..edge),
                ]
            })
            .collect();
        particles.add_particles(coords);
        Ok(particles)
    }

    pub fn num_particles(&self) -> usize {
        self.positions.len()
    }
    pub fn positions(&self) -> &Vec<[f64; 3]> {
        &self.positions
    }
    pub fn velocities(&self) -> &Vec<[f64; 3]> {
        &self.velocities
    }

    /// Append particles at rest at the given coordinates
    pub fn add_particles(&mut self, coords: Vec<[f64; 3]>) {
        let num_particles = coords.len();
        self.positions.reserve(num_particles);
        self.velocities.reserve(num_particles);
        for coord in coords {
            self.positions.push(coord);
            self.velocities.push([0.0, 0.0, 0.0]);
        }
    }

    /// Draw velocities from a Maxwell-Boltzmann distribution at unit mass
    pub fn set_temperature(&mut self, temperature: f64) {
        let mut rng = rand::thread_rng();
        let dist = rand_distr::Normal::new(0.0, temperature.sqrt()).expect("Invalid temperature");
        for v in self.velocities.iter_mut() {
            *v = [
                dist.sample(&mut rng),
                dist.sample(&mut rng),
                dist.sample(&mut rng),
            ];
        }
    }
}
