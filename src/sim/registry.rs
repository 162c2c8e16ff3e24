//! Ordered actor registry
//!
//! Every table member lives in one ordered list. A tick visits each member
//! once; with [`TickOrder::Registration`] that is plain list order, so forces
//! produced by members registered after the balls reach them on the next
//! tick. Only pockets change the list's shape, and they do it after
//! scanning a copied snapshot, adjusting the pass so no member is skipped or
//! visited twice and no removed ball is updated.

use std::collections::VecDeque;

use super::body::Body;
use super::boundary::{Boundary, CushionContact};
use super::pocket::{BallEntry, Pocket};
use super::resolver::{CollisionResolver, PairContact};
use super::world::World;
use crate::config::TickOrder;
use crate::consts::CUE_BALL_ID;

/// A member of the table
#[derive(Debug, Clone)]
pub enum Actor {
    Ball(Body),
    Resolver(CollisionResolver),
    Cushion(Boundary),
    Pocket(Pocket),
}

impl Actor {
    /// The physical-body role: members that collide, fall, and feel forces
    #[inline]
    pub fn as_body(&self) -> Option<&Body> {
        match self {
            Actor::Ball(body) => Some(body),
            _ => None,
        }
    }

    #[inline]
    pub fn as_body_mut(&mut self) -> Option<&mut Body> {
        match self {
            Actor::Ball(body) => Some(body),
            _ => None,
        }
    }

    #[inline]
    pub fn as_pocket(&self) -> Option<&Pocket> {
        match self {
            Actor::Pocket(pocket) => Some(pocket),
            _ => None,
        }
    }

    /// Pass in which a phased tick visits this member
    fn stage(&self) -> u8 {
        match self {
            Actor::Resolver(_) | Actor::Cushion(_) => 0,
            Actor::Ball(_) => 1,
            Actor::Pocket(_) => 2,
        }
    }
}

/// What a member does this tick, worked out before anything is mutated
enum Effect {
    Integrate,
    Pairs(Vec<PairContact>),
    Cushion(Vec<CushionContact>),
    Absorb(Vec<BallEntry>),
}

#[derive(Debug, Clone, Default)]
pub struct Registry {
    actors: Vec<Actor>,
}

impl Registry {
    pub fn new() -> Self {
        Self { actors: Vec::new() }
    }

    pub fn push(&mut self, actor: Actor) {
        self.actors.push(actor);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    /// Balls still on the table, in registration order
    pub fn bodies(&self) -> impl Iterator<Item = &Body> {
        self.actors.iter().filter_map(Actor::as_body)
    }

    pub fn pockets(&self) -> impl Iterator<Item = &Pocket> {
        self.actors.iter().filter_map(Actor::as_pocket)
    }

    pub fn body(&self, id: u32) -> Option<&Body> {
        self.bodies().find(|b| b.id() == id)
    }

    pub fn body_mut(&mut self, id: u32) -> Option<&mut Body> {
        self.actors
            .iter_mut()
            .filter_map(Actor::as_body_mut)
            .find(|b| b.id() == id)
    }

    pub fn cue_ball(&self) -> Option<&Body> {
        self.body(CUE_BALL_ID)
    }

    pub fn cue_ball_mut(&mut self) -> Option<&mut Body> {
        self.body_mut(CUE_BALL_ID)
    }

    fn indexed_bodies(&self) -> Vec<(usize, &Body)> {
        self.actors
            .iter()
            .enumerate()
            .filter_map(|(i, a)| a.as_body().map(|b| (i, b)))
            .collect()
    }

    fn ball_entries(&self) -> Vec<BallEntry> {
        self.indexed_bodies()
            .into_iter()
            .map(|(index, body)| BallEntry {
                index,
                id: body.id(),
                pixel_pos: body.pixel_pos(),
            })
            .collect()
    }

    /// Advance every member once. Returns the ids of balls pocketed this tick.
    pub fn tick(&mut self, world: &World, order: TickOrder) -> Vec<u32> {
        let mut pending: VecDeque<usize> = match order {
            TickOrder::Registration => (0..self.actors.len()).collect(),
            TickOrder::Phased => {
                let mut indices: Vec<usize> = (0..self.actors.len()).collect();
                // Stable, so registration order holds within each stage
                indices.sort_by_key(|&i| self.actors[i].stage());
                indices.into()
            }
        };

        let mut dropped = Vec::new();
        while let Some(index) = pending.pop_front() {
            for (removed, id) in self.update_member(index, world) {
                dropped.push(id);
                pending.retain(|&p| p != removed);
                for p in pending.iter_mut() {
                    if *p > removed {
                        *p -= 1;
                    }
                }
            }
        }
        dropped
    }

    /// Run one member. Returns `(index, ball id)` of every removed ball,
    /// highest index first.
    fn update_member(&mut self, index: usize, world: &World) -> Vec<(usize, u32)> {
        let dt = world.dt();
        let effect = match &self.actors[index] {
            Actor::Ball(_) => Effect::Integrate,
            Actor::Resolver(resolver) => Effect::Pairs(resolver.contacts(&self.indexed_bodies(), dt)),
            Actor::Cushion(boundary) => Effect::Cushion(boundary.contacts(&self.indexed_bodies(), dt)),
            Actor::Pocket(_) => Effect::Absorb(self.ball_entries()),
        };

        match effect {
            Effect::Integrate => {
                if let Some(body) = self.actors[index].as_body_mut() {
                    body.update(world);
                }
                Vec::new()
            }
            Effect::Pairs(contacts) => {
                for contact in &contacts {
                    self.apply_pair(contact, dt);
                }
                Vec::new()
            }
            Effect::Cushion(contacts) => {
                for contact in &contacts {
                    if let Some(body) = self.actors[contact.index].as_body_mut() {
                        contact.apply(body);
                    }
                }
                Vec::new()
            }
            Effect::Absorb(snapshot) => {
                let mut fallen = match &mut self.actors[index] {
                    Actor::Pocket(pocket) => pocket.absorb(&snapshot),
                    _ => Vec::new(),
                };
                fallen.sort_unstable_by(|a, b| b.cmp(a));
                fallen
                    .into_iter()
                    .filter_map(|i| match self.actors.remove(i) {
                        Actor::Ball(body) => Some((i, body.id())),
                        _ => None,
                    })
                    .collect()
            }
        }
    }

    fn apply_pair(&mut self, contact: &PairContact, dt: f32) {
        debug_assert!(contact.a < contact.b);
        let (left, right) = self.actors.split_at_mut(contact.b);
        if let (Actor::Ball(a), Actor::Ball(b)) = (&mut left[contact.a], &mut right[0]) {
            contact.apply(a, b, dt);
        }
    }
}
