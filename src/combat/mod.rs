//! Combat engine
//!
//! Leaves first: dice, body parts and armor, the damage model, status
//! tracking (wounds, stress, defeat), initiative, the action resolvers and
//! finally the session that drives them.

pub mod actions;
pub mod aiming;
pub mod ammo;
pub mod armor;
pub mod body_zone;
pub mod combatant;
pub mod damage;
pub mod defeat;
pub mod dice;
pub mod environment;
pub mod initiative;
pub mod session;
pub mod stress;
pub mod target;
pub mod weapons;
pub mod wounds;

pub use actions::{
    ActionDetail, ActionResult, AmmoState, MeleeRequest, ReloadRequest, RollKind, ShootRequest,
    UnjamRequest,
};
pub use aiming::AimType;
pub use armor::{ArmorMaterial, ArmorPiece, ArmorType, AttackKind};
pub use body_zone::BodyPart;
pub use combatant::{Attributes, Combatant, DerivedBonuses};
pub use damage::{apply_damage_to_body_part, DamageReport};
pub use dice::{Dice, ScriptedDice, SeededDice};
pub use environment::{Environment, Light, Weather};
pub use initiative::{roll_initiative, InitiativeEntry};
pub use session::{BurnReport, CombatSession, RoundReport};
pub use stress::StressTier;
pub use target::{BodyPartState, Target};
pub use weapons::{AmmoType, FiringMode, Magazine, VolleySize, Weapon, WeaponFunctionality};
pub use wounds::WoundTier;
