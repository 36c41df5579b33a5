//! Firearm model: firing profiles, magazines, attachments
//!
//! A weapon has a primary firing profile and optionally a secondary one
//! (underslung launcher, second barrel) with its own magazine and jam state.
//! The profile's functional class decides which firing modes are legal.

use serde::{Deserialize, Serialize};

/// Catalog category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponCategory {
    Primitive,
    Handgun,
    SubMachineGun,
    GrenadeLauncher,
    AssaultRifle,
    SniperRifle,
    Shotgun,
    LightMachineGun,
    HeavyMachineGun,
    RocketLauncher,
}

/// Action of the firing mechanism
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponFunctionality {
    Manual,
    SemiAutomatic,
    FullAutomatic,
    SemiAutomaticBurst3,
}

/// Rounds fired in a rapid volley
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VolleySize {
    Two,
    Three,
    Four,
    Five,
}

impl VolleySize {
    pub fn rounds(self) -> u32 {
        match self {
            VolleySize::Two => 2,
            VolleySize::Three => 3,
            VolleySize::Four => 4,
            VolleySize::Five => 5,
        }
    }
}

/// How a single Shoot action spends ammunition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FiringMode {
    SingleRound,
    Burst,
    FullAuto,
    RapidVolley(VolleySize),
    /// Always fired uncontrolled
    AreaSpray,
}

impl WeaponFunctionality {
    /// Is `mode` legal for this mechanism?
    pub fn allows(self, mode: FiringMode) -> bool {
        match self {
            WeaponFunctionality::Manual => mode == FiringMode::SingleRound,
            WeaponFunctionality::SemiAutomatic => {
                matches!(mode, FiringMode::SingleRound | FiringMode::RapidVolley(_))
            }
            WeaponFunctionality::FullAutomatic => true,
            WeaponFunctionality::SemiAutomaticBurst3 => matches!(
                mode,
                FiringMode::SingleRound | FiringMode::RapidVolley(_) | FiringMode::Burst
            ),
        }
    }
}

/// Loaded ammunition type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AmmoType {
    #[default]
    Standard,
    ArmorPenetration,
    Hardballs,
}

/// Damage dice: uniform `min..=max` plus `added`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageDice {
    pub min: i32,
    pub max: i32,
    #[serde(default)]
    pub added: i32,
}

impl DamageDice {
    pub fn new(min: i32, max: i32, added: i32) -> Self {
        Self { min, max, added }
    }

    /// Damage of a critical hit
    pub fn max_damage(&self) -> i32 {
        self.max + self.added
    }
}

/// Magazine contents and jam state of one firing profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Magazine {
    pub capacity: u32,
    pub current: u32,
    #[serde(default)]
    pub jammed: bool,
    #[serde(default)]
    pub unjam_attempts: u16,
}

impl Magazine {
    /// A full magazine
    pub fn full(capacity: u32) -> Self {
        Self {
            capacity,
            current: capacity,
            jammed: false,
            unjam_attempts: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.current == 0
    }

    /// Remove up to `rounds`, flooring at zero; returns rounds removed
    pub fn consume(&mut self, rounds: u32) -> u32 {
        let taken = rounds.min(self.current);
        self.current -= taken;
        taken
    }

    /// Empty the magazine; returns rounds removed
    pub fn exhaust(&mut self) -> u32 {
        std::mem::take(&mut self.current)
    }

    pub fn refill(&mut self) {
        self.current = self.capacity;
    }

    /// Load a single round, up to capacity
    pub fn load_round(&mut self) {
        self.current = (self.current + 1).min(self.capacity);
    }

    pub fn jam(&mut self) {
        self.jammed = true;
        self.unjam_attempts = 0;
    }

    pub fn clear_jam(&mut self) {
        self.jammed = false;
        self.unjam_attempts = 0;
    }
}

/// Everything needed to fire one mode of a weapon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiringProfile {
    pub functionality: WeaponFunctionality,
    pub damage: DamageDice,
    /// Body areas a hit can strike (0 = one area)
    #[serde(default)]
    pub multiple_hits: u32,
    pub jamming_factor: i32,
    pub reloading_time: i32,
    pub magazine: Magazine,
}

/// Secondary firing mode mounted on a weapon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecondaryMode {
    pub name: String,
    #[serde(default = "equipped")]
    pub equipped: bool,
    pub profile: FiringProfile,
}

/// Bayonet-style melee attachment with its own damage dice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeleeAttachment {
    pub name: String,
    #[serde(default = "equipped")]
    pub equipped: bool,
    pub damage: DamageDice,
}

fn equipped() -> bool {
    true
}

/// Sights mounted on a weapon
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SightModifiers {
    /// Aimed shots cost one action less
    #[serde(default)]
    pub laser_sight: bool,
    #[serde(default)]
    pub night_sight: bool,
    #[serde(default)]
    pub telescopic_sight: bool,
}

/// A carried weapon with its current ammunition state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: WeaponCategory,
    /// Kilograms, picks the melee damage band when used as a club
    pub weight: f32,
    #[serde(default)]
    pub strength_requirement: i32,
    #[serde(default)]
    pub ammo_type: AmmoType,
    pub primary: FiringProfile,
    #[serde(default)]
    pub secondary: Option<SecondaryMode>,
    #[serde(default)]
    pub melee_attachment: Option<MeleeAttachment>,
    #[serde(default)]
    pub sights: SightModifiers,
}

impl Weapon {
    /// Primary profile, or the equipped secondary one
    pub fn mode(&self, secondary: bool) -> Option<&FiringProfile> {
        if secondary {
            self.secondary
                .as_ref()
                .filter(|mode| mode.equipped)
                .map(|mode| &mode.profile)
        } else {
            Some(&self.primary)
        }
    }

    pub fn mode_mut(&mut self, secondary: bool) -> Option<&mut FiringProfile> {
        if secondary {
            self.secondary
                .as_mut()
                .filter(|mode| mode.equipped)
                .map(|mode| &mut mode.profile)
        } else {
            Some(&mut self.primary)
        }
    }

    pub fn is_shotgun(&self) -> bool {
        self.category == WeaponCategory::Shotgun
    }

    /// Equipped melee attachment, if any
    pub fn mounted_melee(&self) -> Option<&MeleeAttachment> {
        self.melee_attachment.as_ref().filter(|a| a.equipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rifle() -> Weapon {
        Weapon {
            name: "Test Rifle".into(),
            description: String::new(),
            category: WeaponCategory::AssaultRifle,
            weight: 4.5,
            strength_requirement: 0,
            ammo_type: AmmoType::Standard,
            primary: FiringProfile {
                functionality: WeaponFunctionality::FullAutomatic,
                damage: DamageDice::new(1, 8, 2),
                multiple_hits: 0,
                jamming_factor: 3,
                reloading_time: 1,
                magazine: Magazine::full(30),
            },
            secondary: Some(SecondaryMode {
                name: "Launcher".into(),
                equipped: false,
                profile: FiringProfile {
                    functionality: WeaponFunctionality::Manual,
                    damage: DamageDice::new(2, 12, 0),
                    multiple_hits: 4,
                    jamming_factor: 2,
                    reloading_time: 2,
                    magazine: Magazine::full(1),
                },
            }),
            melee_attachment: None,
            sights: SightModifiers::default(),
        }
    }

    #[test]
    fn test_manual_only_single() {
        let manual = WeaponFunctionality::Manual;
        assert!(manual.allows(FiringMode::SingleRound));
        assert!(!manual.allows(FiringMode::Burst));
        assert!(!manual.allows(FiringMode::RapidVolley(VolleySize::Two)));
        assert!(!manual.allows(FiringMode::AreaSpray));
    }

    #[test]
    fn test_semi_auto_modes() {
        let semi = WeaponFunctionality::SemiAutomatic;
        assert!(semi.allows(FiringMode::RapidVolley(VolleySize::Five)));
        assert!(!semi.allows(FiringMode::Burst));
        assert!(!semi.allows(FiringMode::FullAuto));
    }

    #[test]
    fn test_burst_capable_modes() {
        let burst = WeaponFunctionality::SemiAutomaticBurst3;
        assert!(burst.allows(FiringMode::Burst));
        assert!(!burst.allows(FiringMode::FullAuto));
        assert!(!burst.allows(FiringMode::AreaSpray));
    }

    #[test]
    fn test_full_auto_allows_everything() {
        let auto = WeaponFunctionality::FullAutomatic;
        for mode in [
            FiringMode::SingleRound,
            FiringMode::Burst,
            FiringMode::FullAuto,
            FiringMode::RapidVolley(VolleySize::Three),
            FiringMode::AreaSpray,
        ] {
            assert!(auto.allows(mode));
        }
    }

    #[test]
    fn test_magazine_floors_at_zero() {
        let mut mag = Magazine::full(2);
        assert_eq!(mag.consume(3), 2);
        assert!(mag.is_empty());
        mag.load_round();
        mag.load_round();
        mag.load_round();
        assert_eq!(mag.current, 2);
    }

    #[test]
    fn test_jam_resets_attempts() {
        let mut mag = Magazine::full(10);
        mag.unjam_attempts = 2;
        mag.jam();
        assert!(mag.jammed);
        assert_eq!(mag.unjam_attempts, 0);
        mag.clear_jam();
        assert!(!mag.jammed);
    }

    #[test]
    fn test_unequipped_secondary_is_unavailable() {
        let mut weapon = rifle();
        assert!(weapon.mode(true).is_none());
        weapon.secondary.as_mut().unwrap().equipped = true;
        assert_eq!(weapon.mode(true).unwrap().magazine.capacity, 1);
        assert_eq!(weapon.mode(false).unwrap().magazine.capacity, 30);
    }

    #[test]
    fn test_critical_damage() {
        assert_eq!(DamageDice::new(1, 8, 2).max_damage(), 10);
    }
}
