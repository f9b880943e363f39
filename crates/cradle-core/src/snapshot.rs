//! Flat per-particle state for renderers.

use crate::particle::Particle;

/// Render-facing particle state: 32 bytes, safe to view as raw `f32`s via
/// `bytemuck::cast_slice` for upload into a vertex or storage buffer.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleSnapshot {
    pub position: [f32; 3],
    pub radius: f32,
    pub velocity: [f32; 3],
    pub _pad: f32,
}

impl From<&Particle> for ParticleSnapshot {
    fn from(p: &Particle) -> Self {
        Self {
            position: p.position.to_array(),
            radius: p.radius,
            velocity: p.velocity.to_array(),
            _pad: 0.0,
        }
    }
}

/// Refill `out` with one snapshot per particle, reusing its allocation.
pub fn write_snapshots(particles: &[Particle], out: &mut Vec<ParticleSnapshot>) {
    out.clear();
    out.extend(particles.iter().map(ParticleSnapshot::from));
}
