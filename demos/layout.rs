// demos/layout.rs

use rs_force_layout::particles::{LennardJones, Particle, Simulation, SimulationEvent};
use rs_force_layout::utils::PhysicsError;

fn main() -> Result<(), PhysicsError> {
    env_logger::init();

    // Twenty unplaced particles land on the phyllotaxis spiral; one is pinned at the origin.
    let mut particles = vec![Particle::default(); 20];
    particles[0] = Particle::pinned(0.0, 0.0);

    let mut sim = Simulation::new(particles)?;
    let mut lj = LennardJones::new();
    lj.set_distance_max(25.0)?;
    sim.add_force("lj", lj);

    sim.on(SimulationEvent::End, Some(Box::new(|sim: &mut Simulation| {
        println!("Converged at alpha={:.5}", sim.alpha());
    })));

    println!("Initial state:");
    println!("Kinetic energy: {:.6}", sim.kinetic_energy());

    sim.restart();
    let steps = sim.run(1_000);

    println!("\nAfter {} steps:", steps);
    for particle in sim.nodes() {
        println!("Particle {:2}: position=({:8.4}, {:8.4}), energy={:.4}", particle.index, particle.x, particle.y, particle.energy);
    }
    println!("Potential energy: {:.6}", sim.potential_energy());
    println!("Kinetic energy: {:.6}", sim.kinetic_energy());

    if let Some(nearest) = sim.find(1.0, 1.0, None) {
        println!("\nParticle nearest to (1, 1): {}", nearest.index);
    }

    Ok(())
}
