//! Kind-specific stat and behavior profiles.
//!
//! Consolidates per-kind parameters for enemies and bosses. Fire patterns
//! and skill triggers are plain data; the simulation interprets them.

use glam::Vec2;

use hordeline_core::constants::*;
use hordeline_core::enums::{BossKind, EnemyKind, SkillId, VisualTag};

/// How a ranged enemy fires once its cooldown allows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FirePattern {
    /// One shot straight at the player.
    Aimed { speed: f32, radius: f32 },
    /// Fixed angular offsets around the bearing to the player.
    Cone { offsets: [f32; 3], speed: f32 },
    /// Flies at the player's position and bursts there.
    SelfDetonating { speed: f32, radius: f32 },
    /// Evenly spaced ring around the enemy.
    Radial { count: u32, speed: f32 },
    /// One shot per cooldown, stepping the spiral angle; rests after a turn.
    Spiral { step: f32, shots_per_turn: u32, speed: f32 },
    /// Slow shot that turns toward the player every tick.
    Homing { speed: f32, radius: f32, turn_rate: f32 },
}

/// Ranged attack profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangedProfile {
    pub range: f32,
    /// Stand still while in range.
    pub stops_to_shoot: bool,
    pub pattern: FirePattern,
    /// Shot damage as a fraction of contact damage (floored).
    pub damage_factor: f32,
    pub lifetime: u32,
    pub visual: VisualTag,
}

/// Static stat table entry for a regular enemy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyProfile {
    pub speed: f32,
    pub max_hp: i32,
    /// Contact damage.
    pub damage: i32,
    /// Carried for display; not applied to incoming damage.
    pub armor: i32,
    /// Inclusive gold drop range.
    pub gold: (u32, u32),
    pub size: f32,
    pub ranged: Option<RangedProfile>,
}

/// Get the stat profile for an enemy kind.
pub fn get_enemy_profile(kind: EnemyKind) -> EnemyProfile {
    let melee = |speed, max_hp, damage, armor, gold| EnemyProfile {
        speed,
        max_hp,
        damage,
        armor,
        gold,
        size: ENEMY_SIZE,
        ranged: None,
    };

    match kind {
        EnemyKind::Zombie => melee(1.2, 80, 8, 0, (3, 8)),
        EnemyKind::Skeleton => EnemyProfile {
            ranged: Some(RangedProfile {
                range: 400.0,
                stops_to_shoot: true,
                pattern: FirePattern::Aimed {
                    speed: 5.0,
                    radius: 8.0,
                },
                damage_factor: 0.5,
                lifetime: 210,
                visual: VisualTag::Bone,
            }),
            ..melee(1.8, 60, 10, 0, (5, 10))
        },
        EnemyKind::Goblin => melee(2.0, 100, 12, 5, (8, 15)),
        EnemyKind::Orc => EnemyProfile {
            ranged: Some(RangedProfile {
                range: 450.0,
                stops_to_shoot: true,
                pattern: FirePattern::Cone {
                    offsets: [-0.35, 0.0, 0.35],
                    speed: 5.0,
                },
                damage_factor: 0.4,
                lifetime: 220,
                visual: VisualTag::Ember,
            }),
            ..melee(1.3, 180, 15, 10, (12, 20))
        },
        EnemyKind::Darkwolf => melee(2.5, 90, 14, 3, (10, 18)),
        EnemyKind::Demon => melee(1.8, 250, 20, 15, (20, 35)),
        EnemyKind::Wraith => EnemyProfile {
            ranged: Some(RangedProfile {
                range: 500.0,
                stops_to_shoot: true,
                pattern: FirePattern::SelfDetonating {
                    speed: 8.0,
                    radius: 16.0,
                },
                damage_factor: 0.7,
                lifetime: 360,
                visual: VisualTag::Spirit,
            }),
            ..melee(2.2, 180, 18, 8, (18, 30))
        },
        EnemyKind::Golem => EnemyProfile {
            ranged: Some(RangedProfile {
                range: 380.0,
                stops_to_shoot: true,
                pattern: FirePattern::Homing {
                    speed: 3.5,
                    radius: 12.0,
                    turn_rate: 0.025,
                },
                damage_factor: 0.6,
                lifetime: 360,
                visual: VisualTag::Frost,
            }),
            ..melee(0.8, 400, 25, 25, (25, 40))
        },
        EnemyKind::Dragon => EnemyProfile {
            ranged: Some(RangedProfile {
                range: 350.0,
                stops_to_shoot: true,
                pattern: FirePattern::Spiral {
                    step: std::f32::consts::PI / 6.0,
                    shots_per_turn: SPIRAL_SHOTS_PER_TURN,
                    speed: 5.0,
                },
                damage_factor: 0.3,
                lifetime: 280,
                visual: VisualTag::Flame,
            }),
            ..melee(1.5, 500, 30, 20, (40, 60))
        },
        EnemyKind::Lich => melee(1.6, 350, 28, 15, (35, 55)),
        EnemyKind::Titan => EnemyProfile {
            ranged: Some(RangedProfile {
                range: 350.0,
                stops_to_shoot: false,
                pattern: FirePattern::Radial {
                    count: 12,
                    speed: 5.0,
                },
                damage_factor: 0.35,
                lifetime: 480,
                visual: VisualTag::Blood,
            }),
            ..melee(1.0, 700, 35, 30, (50, 80))
        },
    }
}

/// Sprite-clip timing; the skill trigger is synchronized to clip frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimClip {
    pub frames: u32,
    /// Ticks per frame at animation speed 1.0.
    pub delay: u32,
    pub looping: bool,
}

impl AnimClip {
    pub const fn new(frames: u32, delay: u32, looping: bool) -> Self {
        Self {
            frames,
            delay,
            looping,
        }
    }

    pub fn last_frame(&self) -> u32 {
        self.frames.saturating_sub(1)
    }
}

/// When a picked skill takes effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillTrigger {
    /// As soon as it is picked; no attack clip.
    Immediate,
    /// When the attack clip reaches this frame.
    AtFrame(u32),
}

/// Phase-dependent cadence and movement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseTuning {
    /// Idle ticks before the next skill is picked.
    pub skill_delay: u32,
    pub anim_speed: f32,
    /// Post-cast chase speed (px/tick). Zero disables the chase.
    pub move_speed: f32,
    pub move_duration: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BossClips {
    pub idle: AnimClip,
    pub attack: AnimClip,
    pub jump: Option<AnimClip>,
    pub dead: AnimClip,
}

/// Static profile of a boss archetype.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BossProfile {
    pub max_hp: i32,
    pub damage: i32,
    pub armor: i32,
    pub speed: f32,
    pub gold: (u32, u32),
    pub size: Vec2,
    /// Hit-box extents as a fraction of `size`.
    pub hitbox_scale: Vec2,
    pub hitbox_offset_y: f32,
    pub pool_capacity: usize,
    pub skills: &'static [(SkillId, SkillTrigger)],
    pub clips: BossClips,
    pub phase_one: PhaseTuning,
    pub phase_two: PhaseTuning,
}

impl BossProfile {
    /// Trigger for `skill`, or `None` if this archetype does not have it.
    pub fn trigger_for(&self, skill: SkillId) -> Option<SkillTrigger> {
        self.skills
            .iter()
            .find(|(id, _)| *id == skill)
            .map(|&(_, trigger)| trigger)
    }

    pub fn skill_ids(&self) -> impl Iterator<Item = SkillId> + '_ {
        self.skills.iter().map(|&(id, _)| id)
    }

    pub fn hitbox_size(&self) -> Vec2 {
        self.size * self.hitbox_scale
    }
}

const SLIME_SKILLS: &[(SkillId, SkillTrigger)] = &[
    (SkillId::SpreadShot, SkillTrigger::AtFrame(8)),
    (SkillId::BombField, SkillTrigger::AtFrame(8)),
    (SkillId::MeteorStrike, SkillTrigger::AtFrame(8)),
    (SkillId::SummonMinions, SkillTrigger::AtFrame(8)),
];

const FROG_SKILLS: &[(SkillId, SkillTrigger)] = &[
    (SkillId::JumpLand, SkillTrigger::Immediate),
    (SkillId::Dash, SkillTrigger::Immediate),
    (SkillId::OrbitShots, SkillTrigger::AtFrame(7)),
];

/// Get the profile for a boss archetype.
pub fn get_boss_profile(kind: BossKind) -> BossProfile {
    match kind {
        BossKind::GiantSlime => {
            let speed = 1.0;
            BossProfile {
                max_hp: 3500,
                damage: 35,
                armor: 10,
                speed,
                gold: (200, 400),
                size: Vec2::new(310.0, 260.0),
                hitbox_scale: Vec2::new(0.6, 0.4),
                hitbox_offset_y: 40.0,
                pool_capacity: SLIME_POOL_CAPACITY,
                skills: SLIME_SKILLS,
                clips: BossClips {
                    idle: AnimClip::new(5, 9, true),
                    attack: AnimClip::new(13, 7, false),
                    jump: None,
                    dead: AnimClip::new(5, 9, false),
                },
                phase_one: PhaseTuning {
                    skill_delay: 120,
                    anim_speed: 1.0,
                    move_speed: speed * 2.0,
                    move_duration: 240,
                },
                phase_two: PhaseTuning {
                    skill_delay: 60,
                    anim_speed: 1.8,
                    move_speed: speed * 2.75,
                    move_duration: 300,
                },
            }
        }
        BossKind::GiantFrog => BossProfile {
            max_hp: 4000,
            damage: 50,
            armor: 15,
            speed: 1.2,
            gold: (250, 450),
            size: Vec2::new(200.0, 200.0),
            hitbox_scale: Vec2::new(0.65, 0.45),
            hitbox_offset_y: 10.0,
            pool_capacity: FROG_POOL_CAPACITY,
            skills: FROG_SKILLS,
            clips: BossClips {
                idle: AnimClip::new(5, 9, true),
                attack: AnimClip::new(10, 8, false),
                jump: Some(AnimClip::new(6, 9, true)),
                dead: AnimClip::new(3, 12, false),
            },
            phase_one: PhaseTuning {
                skill_delay: 150,
                anim_speed: 1.0,
                move_speed: 0.0,
                move_duration: 0,
            },
            phase_two: PhaseTuning {
                skill_delay: 60,
                anim_speed: 1.6,
                move_speed: 0.0,
                move_duration: 0,
            },
        },
    }
}
