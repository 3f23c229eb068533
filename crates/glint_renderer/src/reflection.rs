//! Bounded mirror bounces.
//!
//! The bounce loop is an explicit state machine. Bounce `i` (counting from
//! zero) is weighted by `0.5^i`, and the loop never runs more than the
//! starting mesh's reflection level.

use glint_core::{Color, Light};
use glint_math::{reflect, Ray, Vec3};

use crate::traversal::{HitInfo, Tracer};

/// Where the bounce loop is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BounceState {
    /// Still following the mirror path.
    Tracing,
    /// Hit a surface without effects; its flat color ends the path.
    HitUnlitSurface,
    /// Hit a lit surface with no reflection of its own.
    HitMatteSurface,
    /// Used every bounce the starting mesh allows.
    MaxBounces,
    /// The reflected ray left the scene.
    Escaped,
}

impl BounceState {
    pub fn is_terminal(self) -> bool {
        self != BounceState::Tracing
    }
}

/// Accumulated result of a reflection path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reflection {
    pub color: Color,
    pub state: BounceState,
    /// Number of surfaces the path hit.
    pub bounces: u32,
}

impl Reflection {
    /// True when the path ended on an unlit surface.
    pub fn ended_early(&self) -> bool {
        self.state == BounceState::HitUnlitSurface
    }
}

impl<'a> Tracer<'a> {
    /// Light from `light` arriving at `hit` along its mirror path.
    ///
    /// `incoming` is the direction of the ray that produced `hit`.
    pub fn reflection(&self, light: &Light, incoming: Vec3, hit: &HitInfo) -> Reflection {
        let max_bounces = self.mesh(hit).reflection_level();

        let mut color = Color::ZERO;
        let mut direction = incoming;
        let mut current = *hit;
        let mut bounce = 0;
        let mut state = BounceState::Tracing;

        while !state.is_terminal() {
            if bounce >= max_bounces {
                state = BounceState::MaxBounces;
                break;
            }

            let normal = self.interpolated_normal(&current);
            direction = reflect(direction, normal).normalize_or_zero();
            let weight = 0.5f32.powi(bounce as i32);

            let Some(next) = self.intersect(&Ray::new(current.point, direction)) else {
                state = BounceState::Escaped;
                break;
            };
            bounce += 1;

            let mesh = self.mesh(&next);
            if !mesh.use_effects() {
                color += self.surface_color(&next) * weight;
                state = BounceState::HitUnlitSurface;
            } else {
                color += self.light_contribution(light, &next, direction) * weight;
                if !mesh.settings().is_reflective() {
                    state = BounceState::HitMatteSurface;
                }
            }
            current = next;
        }

        log::trace!("Reflection ended in {:?} after {} bounces", state, bounce);

        Reflection {
            color,
            state,
            bounces: bounce,
        }
    }
}
