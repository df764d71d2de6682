//! Ball-to-ball collision response
//!
//! Equal-mass elastic collisions along the line of centers, followed by a
//! symmetric push-out so balls never stay interpenetrated.

use glam::Vec2;

use super::state::Ball;

/// Two balls that touched this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub first: u8,
    pub second: u8,
}

impl Contact {
    /// The other ball if the cue ball is part of this contact
    pub fn cue_partner(&self, cue: u8) -> Option<u8> {
        if self.first == cue {
            Some(self.second)
        } else if self.second == cue {
            Some(self.first)
        } else {
            None
        }
    }
}

/// Resolve one pair. Returns whether they were overlapping.
pub fn resolve_pair(a: &mut Ball, b: &mut Ball) -> bool {
    if a.pocketed || b.pocketed {
        return false;
    }

    let delta = b.pos - a.pos;
    let dist = delta.length();
    if dist >= a.radius + b.radius {
        return false;
    }

    // Coincident centers: separate along +x
    let normal = if dist > 0.0 { delta / dist } else { Vec2::X };
    let tangent = normal.perp();

    // Into the collision frame
    let (a_n, a_t) = (a.vel.dot(normal), a.vel.dot(tangent));
    let (b_n, b_t) = (b.vel.dot(normal), b.vel.dot(tangent));

    // Equal masses: normal components swap, tangential ones stay
    a.vel = normal * b_n + tangent * a_t;
    b.vel = normal * a_n + tangent * b_t;

    let overlap = (a.radius + b.radius - dist) / 2.0;
    a.pos -= normal * overlap;
    b.pos += normal * overlap;

    true
}

/// Resolve every overlapping pair in index order (i < j)
pub fn resolve_collisions(balls: &mut [Ball]) -> Vec<Contact> {
    let mut contacts = Vec::new();
    for i in 0..balls.len() {
        let (head, tail) = balls.split_at_mut(i + 1);
        let a = &mut head[i];
        for b in tail.iter_mut() {
            if resolve_pair(a, b) {
                contacts.push(Contact {
                    first: a.number,
                    second: b.number,
                });
            }
        }
    }
    contacts
}
