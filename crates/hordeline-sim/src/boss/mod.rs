//! Boss agents.
//!
//! `BossCore` holds what every archetype shares: HP, phase, skill timer,
//! animation clock, death sequence and the outgoing shot/minion/event
//! buffers. Archetype state lives in `Archetype` and is advanced by its own
//! module; `BossAgent` dispatches between the two.

pub mod effects;
pub mod frog;
pub mod slime;

use glam::Vec2;
use rand::Rng;

use hordeline_ai::fsm::{crosses_phase_two, frame_delay, mitigate, pick_next_skill};
use hordeline_ai::profiles::{get_boss_profile, AnimClip, BossProfile, PhaseTuning, SkillTrigger};
use hordeline_core::constants::*;
use hordeline_core::enums::{BossKind, BossPhase, BossState, EnemyKind, SkillId};
use hordeline_core::events::CombatEvent;
use hordeline_core::state::{BossHud, BossView};
use hordeline_core::types::{Body, EmitterId, FieldBounds, Hitbox, PlayerState};

use crate::collision;
use crate::projectile::ShotSpec;

use self::frog::FrogState;
use self::slime::SlimeState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipKind {
    Idle,
    Attack,
    Jump,
    Dead,
}

/// Frame counter over one animation clip. Skill triggers key off frame
/// entries, so the clock reports each frame it enters.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimClock {
    pub kind: ClipKind,
    pub clip: AnimClip,
    pub looping: bool,
    pub frame: u32,
    ticks: u32,
    pub finished: bool,
}

impl AnimClock {
    pub fn new(kind: ClipKind, clip: AnimClip) -> Self {
        Self {
            kind,
            clip,
            looping: clip.looping,
            frame: 0,
            ticks: 0,
            finished: false,
        }
    }

    /// Restart on `clip`, overriding its looping flag.
    pub fn play(&mut self, kind: ClipKind, clip: AnimClip, looping: bool) {
        *self = Self::new(kind, clip);
        self.looping = looping;
    }

    /// Advance one tick. Returns the frame entered this tick, if any.
    pub fn advance(&mut self, anim_speed: f32) -> Option<u32> {
        if self.finished {
            return None;
        }
        self.ticks += 1;
        if self.ticks < frame_delay(self.clip.delay, anim_speed) {
            return None;
        }
        self.ticks = 0;
        if self.frame < self.clip.last_frame() {
            self.frame += 1;
            Some(self.frame)
        } else if self.looping {
            self.frame = 0;
            Some(0)
        } else {
            self.finished = true;
            None
        }
    }
}

/// A skill between being picked and its clip finishing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cast {
    pub skill: SkillId,
    pub trigger: SkillTrigger,
    pub fired: bool,
}

/// Outcome of a hit on a boss.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BossDamage {
    /// HP removed after armor.
    pub dealt: i32,
    pub killed: bool,
}

#[derive(Debug, Clone)]
pub struct BossCore {
    pub id: EmitterId,
    pub kind: BossKind,
    pub profile: BossProfile,
    pub body: Body,
    pub hp: i32,
    pub phase: BossPhase,
    pub tuning: PhaseTuning,
    pub skill_timer: u32,
    pub last_skill: Option<SkillId>,
    pub cast: Option<Cast>,
    pub freeze: u32,
    pub anim: AnimClock,
    pub dead: bool,
    /// Grace ticks left once the death clip has finished.
    pub death_grace: u32,
    pub active: bool,
    pub bounds: FieldBounds,
    /// Shots fired this tick, drained by the orchestrator.
    pub pending: Vec<ShotSpec>,
    /// Minions summoned this tick, spawned by the orchestrator.
    pub minions: Vec<(EnemyKind, Vec2)>,
    pub events: Vec<CombatEvent>,
}

impl BossCore {
    fn new(id: EmitterId, kind: BossKind, pos: Vec2, bounds: FieldBounds) -> Self {
        let profile = get_boss_profile(kind);
        let body = Body::new(pos, profile.size).with_hitbox(Hitbox {
            size: profile.hitbox_size(),
            offset: Vec2::new(0.0, profile.hitbox_offset_y),
        });

        Self {
            id,
            kind,
            profile,
            body,
            hp: profile.max_hp,
            phase: BossPhase::One,
            tuning: profile.phase_one,
            skill_timer: 0,
            last_skill: None,
            cast: None,
            freeze: 0,
            anim: AnimClock::new(ClipKind::Idle, profile.clips.idle),
            dead: false,
            death_grace: BOSS_DEATH_TICKS,
            active: true,
            bounds,
            pending: Vec::new(),
            minions: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn pos(&self) -> Vec2 {
        self.body.pos
    }

    pub fn play(&mut self, kind: ClipKind) {
        let clips = self.profile.clips;
        let clip = match kind {
            ClipKind::Idle => clips.idle,
            ClipKind::Attack => clips.attack,
            ClipKind::Jump => clips.jump.unwrap_or(clips.idle),
            ClipKind::Dead => clips.dead,
        };
        self.anim.play(kind, clip, clip.looping);
    }

    /// Count the idle timer and pick the next skill once it is due.
    /// Nothing is picked during a freeze.
    pub fn next_skill(&mut self, rng: &mut impl Rng) -> Option<SkillId> {
        if self.freeze > 0 {
            return None;
        }
        self.skill_timer += 1;
        if self.skill_timer < self.tuning.skill_delay {
            return None;
        }
        pick_next_skill(self.profile.skill_ids(), self.last_skill, rng)
    }

    /// Record a cast of `skill`. Returns `None`, with a warning and a
    /// rejection event, if this archetype does not have the skill.
    pub fn begin_cast(&mut self, skill: SkillId) -> Option<Cast> {
        let Some(trigger) = self.profile.trigger_for(skill) else {
            self.reject(skill);
            return None;
        };
        let cast = Cast {
            skill,
            trigger,
            fired: false,
        };
        self.last_skill = Some(skill);
        self.skill_timer = 0;
        self.cast = Some(cast);
        self.events.push(CombatEvent::SkillCast {
            kind: self.kind,
            skill,
        });
        tracing::debug!(boss = ?self.kind, skill = ?skill, "skill cast");
        if let SkillTrigger::AtFrame(_) = trigger {
            self.play(ClipKind::Attack);
        }
        Some(cast)
    }

    pub fn reject(&mut self, skill: SkillId) {
        tracing::warn!(boss = ?self.kind, skill = ?skill, "skill not supported by boss");
        self.events.push(CombatEvent::SkillRejected {
            kind: self.kind,
            skill,
        });
    }

    /// Damage the boss contact hit-box deals, if it overlaps the player.
    pub fn contact(&self, player: &PlayerState) -> Option<i32> {
        collision::bodies_overlap(&self.body, &player.body).then_some(self.profile.damage)
    }

    /// Apply armor, then check the phase threshold and death. Returns whether
    /// the phase changed alongside the damage outcome.
    fn apply_damage(&mut self, damage: i32) -> (BossDamage, bool) {
        let dealt = mitigate(damage, self.profile.armor);
        self.hp = (self.hp - dealt).max(0);

        if self.hp == 0 {
            self.die();
            return (BossDamage { dealt, killed: true }, false);
        }

        let transitioned = crosses_phase_two(self.phase, self.hp, self.profile.max_hp);
        if transitioned {
            self.phase = BossPhase::Two;
            self.tuning = self.profile.phase_two;
            self.pending.clear();
            self.freeze = PHASE_TWO_FREEZE_TICKS;
            self.events.push(CombatEvent::PhaseTransition { kind: self.kind });
            tracing::info!(boss = ?self.kind, hp = self.hp, "boss entered phase two");
        }
        (BossDamage { dealt, killed: false }, transitioned)
    }

    fn die(&mut self) {
        self.dead = true;
        self.cast = None;
        self.pending.clear();
        self.minions.clear();
        self.play(ClipKind::Dead);
        self.events.push(CombatEvent::BossDefeated { kind: self.kind });
        tracing::info!(boss = ?self.kind, "boss defeated");
    }

    /// Play out the death clip, then the grace window.
    fn update_dead(&mut self) {
        if !self.anim.finished {
            self.anim.advance(self.tuning.anim_speed);
            return;
        }
        self.death_grace = self.death_grace.saturating_sub(1);
        if self.death_grace == 0 {
            self.active = false;
        }
    }
}

#[derive(Debug, Clone)]
pub enum Archetype {
    Slime(SlimeState),
    Frog(FrogState),
}

/// A live boss: shared core plus archetype state.
#[derive(Debug, Clone)]
pub struct BossAgent {
    pub core: BossCore,
    pub archetype: Archetype,
}

impl BossAgent {
    pub fn new(id: EmitterId, kind: BossKind, pos: Vec2, bounds: FieldBounds) -> Self {
        let archetype = match kind {
            BossKind::GiantSlime => Archetype::Slime(SlimeState::default()),
            BossKind::GiantFrog => Archetype::Frog(FrogState::default()),
        };
        Self {
            core: BossCore::new(id, kind, pos, bounds),
            archetype,
        }
    }

    pub fn kind(&self) -> BossKind {
        self.core.kind
    }

    pub fn id(&self) -> EmitterId {
        self.core.id
    }

    pub fn pos(&self) -> Vec2 {
        self.core.pos()
    }

    pub fn is_active(&self) -> bool {
        self.core.active
    }

    pub fn is_dead(&self) -> bool {
        self.core.dead
    }

    pub fn hud(&self) -> BossHud {
        BossHud {
            kind: self.core.kind,
            hp: self.core.hp,
            max_hp: self.core.profile.max_hp,
            phase: self.core.phase,
        }
    }

    pub fn state(&self) -> BossState {
        let core = &self.core;
        if core.dead {
            return BossState::Dead;
        }
        let traversing = match &self.archetype {
            Archetype::Slime(_) => false,
            Archetype::Frog(f) => f.is_traversing(),
        };
        if traversing {
            BossState::Dashing
        } else if core.freeze > 0 {
            BossState::Frozen
        } else if core.cast.is_some() {
            BossState::Casting
        } else if matches!(&self.archetype, Archetype::Slime(s) if s.is_chasing()) {
            BossState::Moving
        } else {
            BossState::Idle
        }
    }

    /// Advance one tick against the current player state.
    pub fn update(&mut self, player: &PlayerState, rng: &mut impl Rng) {
        let core = &mut self.core;
        if !core.active {
            return;
        }
        if core.dead {
            core.update_dead();
            return;
        }
        core.freeze = core.freeze.saturating_sub(1);

        match &mut self.archetype {
            Archetype::Slime(s) => s.update(core, player.pos(), rng),
            Archetype::Frog(f) => f.update(core, player.pos(), rng),
        }
    }

    /// Start `skill` now, bypassing the idle timer. Skills this archetype
    /// does not have are rejected with a warning and otherwise ignored.
    pub fn force_skill(&mut self, skill: SkillId, player: &PlayerState, rng: &mut impl Rng) {
        if self.core.dead {
            return;
        }
        match &mut self.archetype {
            Archetype::Slime(s) => s.start(&mut self.core, skill, rng),
            Archetype::Frog(f) => f.start(&mut self.core, skill, player.pos()),
        }
    }

    /// Take a player hit. Ignored while dead or invulnerable.
    pub fn take_damage(&mut self, damage: i32) -> BossDamage {
        if self.core.dead || !self.is_vulnerable() {
            return BossDamage::default();
        }
        let (outcome, transitioned) = self.core.apply_damage(damage);
        match &mut self.archetype {
            Archetype::Slime(s) => {
                if outcome.killed {
                    s.clear();
                } else if transitioned {
                    s.enter_phase_two(&mut self.core);
                }
            }
            Archetype::Frog(f) => {
                if outcome.killed {
                    f.clear();
                } else if transitioned {
                    f.enter_phase_two(&mut self.core);
                }
            }
        }
        outcome
    }

    pub fn is_vulnerable(&self) -> bool {
        match &self.archetype {
            Archetype::Slime(_) => true,
            Archetype::Frog(f) => !f.is_rising(),
        }
    }

    /// Whether a player shot at `pos` with `radius` reaches the hit-box.
    pub fn is_hit_by(&self, pos: Vec2, radius: f32) -> bool {
        self.core.active && !self.core.dead && collision::circle_hits_body(pos, radius, &self.core.body)
    }

    /// Contact damage against the player.
    pub fn contact(&self, player: &PlayerState) -> Option<i32> {
        if self.core.dead {
            return None;
        }
        match &self.archetype {
            Archetype::Frog(f) if f.is_jumping() => None,
            _ => self.core.contact(player),
        }
    }

    /// Archetype-specific area damage against the player.
    pub fn special_hit(&self, player: &PlayerState) -> Option<i32> {
        if self.core.dead {
            return None;
        }
        match &self.archetype {
            Archetype::Slime(s) => s.special_hit(player),
            Archetype::Frog(f) => f.special_hit(&self.core, player),
        }
    }

    pub fn view(&self) -> BossView {
        let (zones, orbit_shots, trails, impacts) = match &self.archetype {
            Archetype::Slime(s) => (s.zone_views(), Vec::new(), Vec::new(), s.impacts()),
            Archetype::Frog(f) => (f.zone_views(), f.orbit_positions(), f.trail_views(), Vec::new()),
        };
        BossView {
            hud: self.hud(),
            pos: self.pos(),
            state: self.state(),
            zones,
            orbit_shots,
            trails,
            impacts,
        }
    }
}
