//! Giant Frog: jump-land, dashes with damage trails, orbit shots, and
//! phase-two corner turrets.

use std::f32::consts::{PI, TAU};

use glam::Vec2;
use rand::Rng;

use hordeline_ai::fsm::scaled_damage;
use hordeline_ai::profiles::SkillTrigger;
use hordeline_core::constants::*;
use hordeline_core::enums::{BossPhase, SkillId, VisualTag};
use hordeline_core::state::{TrailView, ZoneView};
use hordeline_core::types::PlayerState;

use super::effects::{DamageZone, OrbitShot, TrailPool};
use super::{BossCore, Cast, ClipKind};
use crate::collision;
use crate::projectile::ring;

const JUMP_RISE_TICKS: u32 = 40;
const JUMP_RISE_HEIGHT: f32 = 700.0;
const JUMP_FALL_TICKS: u32 = 20;
const JUMP_FALL_HEIGHT: f32 = 520.0;
const LAND_PAUSE_TICKS: u32 = 30;
const LAND_ZONE_LIFETIME: u32 = 500;
const LAND_ZONE_DANGER: f32 = 0.7;

const DASH_TRAVEL_TICKS: u32 = 20;
const DASH_PAUSE_TICKS: u32 = 10;
const TRAIL_HALF_HEIGHT: f32 = 22.0;
const TRAIL_FACTOR: f32 = 0.5;
const TRAIL_LIFETIME: u32 = 500;

const ORBIT_COUNT: u32 = 6;
const ORBIT_START_RADIUS: f32 = 80.0;
const ORBIT_ANGULAR_SPEED: f32 = 0.015;
const ORBIT_RADIAL_SPEED: f32 = 1.2;
const ORBIT_FROZEN_TICKS: u32 = 60;
const ORBIT_COUNTER_FROZEN_TICKS: u32 = 120;
const ORBIT_FACTOR: f32 = 0.4;

const TURRET_INTERVAL: u32 = 45;
const TURRET_SHOTS: u32 = 12;
const TURRET_SPEED: f32 = 4.5;
const TURRET_FACTOR: f32 = 0.25;
const TURRET_LIFETIME: u32 = 360;

fn ease_out(t: f32) -> f32 {
    1.0 - (1.0 - t) * (1.0 - t)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum JumpStage {
    Rising,
    Falling,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Jump {
    stage: JumpStage,
    tick: u32,
    start: Vec2,
    target: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum DashStage {
    Warning(u32),
    Active {
        tick: u32,
        from: Vec2,
        trail: Option<usize>,
    },
    Pause(u32),
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Dash {
    stage: DashStage,
    /// Dashes left, including the current one.
    remaining: u32,
    warning: u32,
    target: Vec2,
}

#[derive(Debug, Clone, Default)]
pub struct FrogState {
    jump: Option<Jump>,
    dash: Option<Dash>,
    land_pause: u32,
    landing_zones: Vec<DamageZone>,
    orbits: Vec<OrbitShot>,
    trails: TrailPool,
    turret_timer: u32,
    last_corner: Option<usize>,
    turret_offset: f32,
}

impl FrogState {
    pub fn is_jumping(&self) -> bool {
        self.jump.is_some()
    }

    pub fn is_rising(&self) -> bool {
        matches!(self.jump, Some(j) if j.stage == JumpStage::Rising)
    }

    /// Jump or dash in progress.
    pub fn is_traversing(&self) -> bool {
        self.jump.is_some() || self.dash.is_some()
    }

    fn is_busy(&self) -> bool {
        self.is_traversing() || self.land_pause > 0
    }

    pub fn update(&mut self, core: &mut BossCore, target: Vec2, rng: &mut impl Rng) {
        self.update_effects(core, rng);

        if self.jump.is_some() {
            core.anim.advance(core.tuning.anim_speed);
            self.update_jump(core);
            return;
        }
        if self.dash.is_some() {
            self.update_dash(core, target);
            return;
        }
        if self.land_pause > 0 {
            self.land_pause -= 1;
            if self.land_pause == 0 {
                finish_skill(core);
            }
            return;
        }

        if let Some(cast) = core.cast {
            let entered = core.anim.advance(core.tuning.anim_speed);
            if let (SkillTrigger::AtFrame(frame), Some(now)) = (cast.trigger, entered) {
                if now == frame && !cast.fired {
                    core.cast = Some(Cast { fired: true, ..cast });
                    self.release_orbits(core);
                }
            }
            if core.anim.finished {
                finish_skill(core);
            }
            return;
        }

        core.anim.advance(core.tuning.anim_speed);
        if !self.is_busy() {
            if let Some(skill) = core.next_skill(rng) {
                self.start(core, skill, target);
            }
        }
    }

    /// Begin `skill` against the player at `target`, abandoning whatever
    /// traversal was in progress.
    pub fn start(&mut self, core: &mut BossCore, skill: SkillId, target: Vec2) {
        let Some(cast) = core.begin_cast(skill) else {
            return;
        };
        self.jump = None;
        self.dash = None;
        self.land_pause = 0;

        match (cast.skill, cast.trigger) {
            (SkillId::JumpLand, _) => {
                self.jump = Some(Jump {
                    stage: JumpStage::Rising,
                    tick: 0,
                    start: core.pos(),
                    target,
                });
                core.play(ClipKind::Jump);
            }
            (SkillId::Dash, _) => {
                let (remaining, warning) = match core.phase {
                    BossPhase::One => (1, 40),
                    BossPhase::Two => (3, 20),
                };
                self.dash = Some(Dash {
                    stage: DashStage::Warning(warning),
                    remaining,
                    warning,
                    target,
                });
            }
            (SkillId::OrbitShots, SkillTrigger::AtFrame(_)) => {}
            (SkillId::OrbitShots, SkillTrigger::Immediate) => {
                self.release_orbits(core);
                finish_skill(core);
            }
            (other, _) => {
                core.cast = None;
                core.reject(other);
            }
        }
    }

    fn update_jump(&mut self, core: &mut BossCore) {
        let Some(jump) = self.jump.as_mut() else {
            return;
        };
        jump.tick += 1;
        match jump.stage {
            JumpStage::Rising => {
                let t = jump.tick as f32 / JUMP_RISE_TICKS as f32;
                core.body.pos.y = jump.start.y - ease_out(t) * JUMP_RISE_HEIGHT;
                if jump.tick >= JUMP_RISE_TICKS {
                    core.body.pos = Vec2::new(jump.target.x, jump.target.y - JUMP_FALL_HEIGHT);
                    jump.stage = JumpStage::Falling;
                    jump.tick = 0;
                }
            }
            JumpStage::Falling => {
                let t = jump.tick as f32 / JUMP_FALL_TICKS as f32;
                core.body.pos.y = jump.target.y - JUMP_FALL_HEIGHT + t * t * JUMP_FALL_HEIGHT;
                if jump.tick >= JUMP_FALL_TICKS {
                    let landing = jump.target;
                    self.land(core, landing);
                }
            }
        }
    }

    fn land(&mut self, core: &mut BossCore, landing: Vec2) {
        core.body.pos = landing;
        self.jump = None;

        self.landing_zones.retain(DamageZone::is_lethal);
        let (radius, factor) = match core.phase {
            BossPhase::One => (115.0, 1.3),
            BossPhase::Two => (155.0, 1.8),
        };
        self.landing_zones.push(DamageZone::new(
            landing,
            radius,
            LAND_ZONE_LIFETIME,
            LAND_ZONE_DANGER,
            scaled_damage(core.profile.damage, factor),
        ));
        self.land_pause = LAND_PAUSE_TICKS;
        core.play(ClipKind::Idle);
    }

    fn update_dash(&mut self, core: &mut BossCore, player: Vec2) {
        let Some(dash) = self.dash.as_mut() else {
            return;
        };
        // Warnings and pauses hold during a freeze; a leg in motion finishes.
        let holding = core.freeze > 0 && !matches!(dash.stage, DashStage::Active { .. });
        if holding {
            return;
        }

        match dash.stage {
            DashStage::Warning(ticks) => {
                if ticks > 1 {
                    dash.stage = DashStage::Warning(ticks - 1);
                    return;
                }
                let trail = match core.phase {
                    BossPhase::One => None,
                    BossPhase::Two => self.trails.claim(
                        core.pos(),
                        TRAIL_HALF_HEIGHT,
                        scaled_damage(core.profile.damage, TRAIL_FACTOR),
                        TRAIL_LIFETIME,
                    ),
                };
                dash.stage = DashStage::Active {
                    tick: 0,
                    from: core.pos(),
                    trail,
                };
            }
            DashStage::Active { tick, from, trail } => {
                let tick = tick + 1;
                let t = tick as f32 / DASH_TRAVEL_TICKS as f32;
                core.body.pos = from.lerp(dash.target, t.min(1.0));
                if let Some(idx) = trail {
                    self.trails.extend(idx, core.pos());
                }
                if tick < DASH_TRAVEL_TICKS {
                    dash.stage = DashStage::Active { tick, from, trail };
                    return;
                }
                if let Some(idx) = trail {
                    self.trails.finish(idx);
                }
                dash.remaining -= 1;
                if dash.remaining > 0 {
                    dash.stage = DashStage::Pause(DASH_PAUSE_TICKS);
                } else {
                    self.dash = None;
                    finish_skill(core);
                }
            }
            DashStage::Pause(ticks) => {
                if ticks > 1 {
                    dash.stage = DashStage::Pause(ticks - 1);
                } else {
                    dash.target = player;
                    dash.stage = DashStage::Warning(dash.warning);
                }
            }
        }
    }

    fn release_orbits(&mut self, core: &BossCore) {
        let center = core.pos();
        let step = TAU / ORBIT_COUNT as f32;
        let shot = |angle: f32, angular_speed: f32, frozen: u32| OrbitShot {
            center,
            angle,
            radius: ORBIT_START_RADIUS,
            angular_speed,
            radial_speed: ORBIT_RADIAL_SPEED,
            frozen,
        };

        self.orbits.extend(
            (0..ORBIT_COUNT).map(|i| shot(step * i as f32, ORBIT_ANGULAR_SPEED, ORBIT_FROZEN_TICKS)),
        );
        if core.phase == BossPhase::Two {
            self.orbits.extend((0..ORBIT_COUNT).map(|i| {
                shot(
                    step * i as f32 + PI / 6.0,
                    -ORBIT_ANGULAR_SPEED,
                    ORBIT_COUNTER_FROZEN_TICKS,
                )
            }));
        }
    }

    fn update_effects(&mut self, core: &mut BossCore, rng: &mut impl Rng) {
        for orbit in self.orbits.iter_mut() {
            orbit.update();
        }
        self.orbits.retain(|o| !o.is_spent());

        for zone in self.landing_zones.iter_mut() {
            zone.update();
        }
        self.landing_zones.retain(|z| !z.is_expired());

        self.trails.update();

        if core.phase == BossPhase::Two {
            self.turret_timer += 1;
            if self.turret_timer >= TURRET_INTERVAL {
                self.turret_timer = 0;
                self.fire_turret(core, rng);
            }
        }
    }

    fn fire_turret(&mut self, core: &mut BossCore, rng: &mut impl Rng) {
        let b = core.bounds;
        let inset = CORNER_TURRET_INSET;
        let corners = [
            Vec2::new(inset, inset),
            Vec2::new(b.width - inset, inset),
            Vec2::new(inset, b.height - inset),
            Vec2::new(b.width - inset, b.height - inset),
        ];
        let choices: Vec<usize> = (0..corners.len())
            .filter(|&i| Some(i) != self.last_corner)
            .collect();
        let corner = choices[rng.gen_range(0..choices.len())];
        self.last_corner = Some(corner);

        let damage = scaled_damage(core.profile.damage, TURRET_FACTOR);
        core.pending.extend(
            ring(corners[corner], TURRET_SHOTS, TURRET_SPEED, self.turret_offset, damage)
                .map(|spec| spec.lifetime(TURRET_LIFETIME).visual(VisualTag::Turret)),
        );
        self.turret_offset += PI / 12.0;
    }

    /// Phase-two reset: the idle timer is pulled close to its new threshold.
    pub fn enter_phase_two(&mut self, core: &mut BossCore) {
        core.skill_timer = core.skill_timer.min(core.tuning.skill_delay.saturating_sub(1));
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// First of orbit shots, lethal landing zones and trails that reaches
    /// the player.
    pub fn special_hit(&self, core: &BossCore, player: &PlayerState) -> Option<i32> {
        if self
            .orbits
            .iter()
            .any(|o| collision::circle_hits_player(o.pos(), ORBIT_SHOT_RADIUS, player))
        {
            return Some(scaled_damage(core.profile.damage, ORBIT_FACTOR));
        }

        let tolerance = player.width() * PLAYER_ZONE_SCALE;
        if let Some(zone) = self
            .landing_zones
            .iter()
            .find(|z| z.hits(player.pos(), tolerance))
        {
            return Some(zone.damage);
        }

        self.trails
            .iter_active()
            .find(|t| t.hits(player.pos(), tolerance))
            .map(|t| t.damage)
    }

    pub fn zone_views(&self) -> Vec<ZoneView> {
        self.landing_zones.iter().map(DamageZone::view).collect()
    }

    pub fn orbit_positions(&self) -> Vec<Vec2> {
        self.orbits.iter().map(OrbitShot::pos).collect()
    }

    pub fn trail_views(&self) -> Vec<TrailView> {
        self.trails.iter_active().map(|t| t.view()).collect()
    }
}

fn finish_skill(core: &mut BossCore) {
    core.cast = None;
    core.skill_timer = 0;
    core.play(ClipKind::Idle);
}
