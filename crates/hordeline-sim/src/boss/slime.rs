//! Giant Slime: clip-synchronized ranged skills followed by a chase.

use std::f32::consts::{PI, TAU};

use glam::Vec2;
use rand::Rng;

use hordeline_ai::fsm::scaled_damage;
use hordeline_ai::profiles::SkillTrigger;
use hordeline_core::constants::*;
use hordeline_core::enums::{BossPhase, EnemyKind, SkillId, VisualTag};
use hordeline_core::state::ZoneView;
use hordeline_core::types::{direction_to, PlayerState};

use super::effects::{DamageZone, DelayedBurst};
use super::{BossCore, Cast, ClipKind};
use crate::projectile::{ring, ShotSpec};

const SPREAD_DELAY: u32 = 15;
const SPREAD_COUNT: u32 = 32;
const SPREAD_SPEED: f32 = 5.0;
const SPREAD_FACTOR: f32 = 0.3;
const SPREAD_WAVE_AMPLITUDE: f32 = 3.0;
const SPREAD_WAVE_FREQUENCY: f32 = 0.15;

const BOMB_COUNT: usize = 6;
const BOMB_MIN_DISTANCE: f32 = 150.0;
const BOMB_MAX_DISTANCE: f32 = 600.0;
const BOMB_FUSE: i32 = 120;
const BOMB_SHOTS: u32 = 8;
const BOMB_SPEED: f32 = 4.0;
const BOMB_FACTOR: f32 = 0.4;

const METEOR_PRE_DELAYS: [i32; 3] = [15, 45, 75];
const METEOR_FALL: i32 = 60;
const METEOR_JITTER: f32 = 40.0;
const METEOR_SHOTS: u32 = 12;
const METEOR_SPEED: f32 = 5.0;
const METEOR_FACTOR: f32 = 0.35;
const METEOR_ZONE_LIFETIME: u32 = 300;
const METEOR_ZONE_DANGER: f32 = 0.75;

/// Attack-clip frame that fires a dash ring while chasing in phase two.
const DASH_SPREAD_FRAME: u32 = 8;
const DASH_SPREAD_SHOTS: u32 = 10;
const DASH_SPREAD_SPEED: f32 = 4.0;
const DASH_SPREAD_FACTOR: f32 = 0.2;

const SHOT_LIFETIME: u32 = 240;

#[derive(Debug, Clone, Default)]
pub struct SlimeState {
    /// Chase ticks left after a cast.
    chase: u32,
    /// Ticks until each queued spread ring is released.
    spreads: Vec<u32>,
    bursts: Vec<DelayedBurst>,
    meteor_zones: Vec<DamageZone>,
    dash_spreads: u32,
}

impl SlimeState {
    pub fn is_chasing(&self) -> bool {
        self.chase > 0
    }

    pub fn update(&mut self, core: &mut BossCore, target: Vec2, rng: &mut impl Rng) {
        self.update_effects(core, target, rng);

        if let Some(cast) = core.cast {
            let entered = core.anim.advance(core.tuning.anim_speed);
            if let (SkillTrigger::AtFrame(frame), Some(now)) = (cast.trigger, entered) {
                if now == frame && !cast.fired {
                    core.cast = Some(Cast { fired: true, ..cast });
                    self.execute(core, cast.skill, rng);
                }
            }
            if core.anim.finished {
                core.cast = None;
                self.begin_chase(core);
            }
            return;
        }

        if self.chase > 0 {
            self.chase -= 1;
            let (dir, distance) = direction_to(core.pos(), target);
            if distance > 0.0 {
                core.body.pos += dir * core.tuning.move_speed;
            }
            let entered = core.anim.advance(core.tuning.anim_speed);
            if core.phase == BossPhase::Two && entered == Some(DASH_SPREAD_FRAME) {
                self.dash_spread(core);
            }
            if self.chase == 0 {
                core.skill_timer = 0;
                core.play(ClipKind::Idle);
            }
            return;
        }

        core.anim.advance(core.tuning.anim_speed);
        if let Some(skill) = core.next_skill(rng) {
            self.start(core, skill, rng);
        }
    }

    /// Begin casting `skill`, abandoning any chase in progress.
    pub fn start(&mut self, core: &mut BossCore, skill: SkillId, rng: &mut impl Rng) {
        if let Some(cast) = core.begin_cast(skill) {
            self.chase = 0;
            if cast.trigger == SkillTrigger::Immediate {
                // No clip to wait for: fire now, then chase.
                core.cast = None;
                self.execute(core, skill, rng);
                self.begin_chase(core);
            }
        }
    }

    fn begin_chase(&mut self, core: &mut BossCore) {
        if core.tuning.move_speed > 0.0 && core.tuning.move_duration > 0 {
            self.chase = core.tuning.move_duration;
            self.dash_spreads = 0;
            let attack = core.profile.clips.attack;
            core.anim.play(ClipKind::Attack, attack, true);
        } else {
            core.skill_timer = 0;
            core.play(ClipKind::Idle);
        }
    }

    fn execute(&mut self, core: &mut BossCore, skill: SkillId, rng: &mut impl Rng) {
        let origin = core.pos();
        match skill {
            SkillId::SpreadShot => self.spreads.push(SPREAD_DELAY),
            SkillId::BombField => {
                for _ in 0..BOMB_COUNT {
                    let angle = rng.gen_range(0.0..TAU);
                    let distance = rng.gen_range(BOMB_MIN_DISTANCE..=BOMB_MAX_DISTANCE);
                    let pos = core
                        .bounds
                        .clamp(origin + Vec2::from_angle(angle) * distance, BOMB_FIELD_MARGIN);
                    self.bursts.push(DelayedBurst::bomb(pos, BOMB_FUSE));
                }
            }
            SkillId::MeteorStrike => {
                self.bursts.extend(
                    METEOR_PRE_DELAYS
                        .iter()
                        .map(|&pre| DelayedBurst::meteor(pre, METEOR_FALL, METEOR_JITTER)),
                );
            }
            SkillId::SummonMinions => {
                for i in 0..SUMMON_COUNT {
                    let angle = PI * i as f32;
                    let kind = if rng.gen_bool(0.5) {
                        EnemyKind::Zombie
                    } else {
                        EnemyKind::Skeleton
                    };
                    core.minions
                        .push((kind, origin + Vec2::from_angle(angle) * SUMMON_RADIUS));
                }
            }
            other => core.reject(other),
        }
    }

    fn update_effects(&mut self, core: &mut BossCore, target: Vec2, rng: &mut impl Rng) {
        let damage = core.profile.damage;

        let mut released = 0;
        for ticks in self.spreads.iter_mut() {
            *ticks = ticks.saturating_sub(1);
            if *ticks == 0 {
                released += 1;
            }
        }
        self.spreads.retain(|&t| t > 0);
        for _ in 0..released {
            let phase_two = core.phase == BossPhase::Two;
            core.pending.extend(
                ring(core.pos(), SPREAD_COUNT, SPREAD_SPEED, 0.0, scaled_damage(damage, SPREAD_FACTOR)).map(
                    |spec| {
                        let spec = spec.lifetime(SHOT_LIFETIME).visual(VisualTag::Crimson);
                        if phase_two {
                            spec.oscillating(SPREAD_WAVE_AMPLITUDE, SPREAD_WAVE_FREQUENCY)
                        } else {
                            spec
                        }
                    },
                ),
            );
        }

        for burst in self.bursts.iter_mut() {
            if !burst.update(target, rng) {
                continue;
            }
            if burst.spawns_zone {
                core.pending.extend(burst_ring(burst.pos, METEOR_SHOTS, METEOR_SPEED, damage, METEOR_FACTOR, VisualTag::Meteor));
                let (radius, factor) = match core.phase {
                    BossPhase::One => (60.0, 1.0),
                    BossPhase::Two => (90.0, 1.5),
                };
                self.meteor_zones.push(DamageZone::new(
                    burst.pos,
                    radius,
                    METEOR_ZONE_LIFETIME,
                    METEOR_ZONE_DANGER,
                    scaled_damage(damage, factor),
                ));
            } else {
                core.pending.extend(burst_ring(burst.pos, BOMB_SHOTS, BOMB_SPEED, damage, BOMB_FACTOR, VisualTag::Bomb));
            }
        }
        self.bursts.retain(|b| !b.done);

        for zone in self.meteor_zones.iter_mut() {
            zone.update();
        }
        self.meteor_zones.retain(|z| !z.is_expired());
    }

    fn dash_spread(&mut self, core: &mut BossCore) {
        let offset = PI / 10.0 * self.dash_spreads as f32;
        let damage = scaled_damage(core.profile.damage, DASH_SPREAD_FACTOR);
        core.pending.extend(
            ring(core.pos(), DASH_SPREAD_SHOTS, DASH_SPREAD_SPEED, offset, damage)
                .map(|spec| spec.lifetime(SHOT_LIFETIME).visual(VisualTag::Cyan)),
        );
        self.dash_spreads += 1;
    }

    /// Phase-two reset: queued spread rings are dropped and the agent
    /// returns to idle.
    pub fn enter_phase_two(&mut self, core: &mut BossCore) {
        self.spreads.clear();
        self.chase = 0;
        self.dash_spreads = 0;
        core.cast = None;
        core.skill_timer = 0;
        core.play(ClipKind::Idle);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Lethal meteor zones reaching the player.
    pub fn special_hit(&self, player: &PlayerState) -> Option<i32> {
        let tolerance = player.width() * PLAYER_ZONE_SCALE;
        self.meteor_zones
            .iter()
            .find(|z| z.hits(player.pos(), tolerance))
            .map(|z| z.damage)
    }

    pub fn zone_views(&self) -> Vec<ZoneView> {
        self.meteor_zones.iter().map(DamageZone::view).collect()
    }

    /// Impact points of bombs and locked-on meteors.
    pub fn impacts(&self) -> Vec<Vec2> {
        self.bursts.iter().filter(|b| b.locked).map(|b| b.pos).collect()
    }
}

fn burst_ring(
    pos: Vec2,
    count: u32,
    speed: f32,
    damage: i32,
    factor: f32,
    visual: VisualTag,
) -> impl Iterator<Item = ShotSpec> {
    ring(pos, count, speed, 0.0, scaled_damage(damage, factor))
        .map(move |spec| spec.lifetime(SHOT_LIFETIME).visual(visual))
}
