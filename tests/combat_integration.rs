//! Combat engine integration tests
//!
//! Drives the resolvers and the damage model through the public API with
//! scripted dice, one test per documented scenario plus the main action
//! paths end to end.

use firefight::combat::actions::{
    resolve_reload, resolve_shoot, ActionContext, ActionDetail, AvoidOutcome, ReloadOutcome,
    ReloadRequest, RollKind, ShootRequest,
};
use firefight::combat::ammo;
use firefight::combat::armor::{ArmorMaterial, ArmorPiece, ArmorType, AttackKind};
use firefight::combat::body_zone::BodyPart;
use firefight::combat::combatant::{Attributes, Combatant, DerivedBonuses};
use firefight::combat::damage::apply_damage_to_body_part;
use firefight::combat::dice::ScriptedDice;
use firefight::combat::environment::Environment;
use firefight::combat::initiative::roll_initiative;
use firefight::combat::session::CombatSession;
use firefight::combat::weapons::{
    AmmoType, DamageDice, FiringMode, FiringProfile, Magazine, SightModifiers, Weapon,
    WeaponCategory, WeaponFunctionality,
};
use firefight::core::config::RulesConfig;
use firefight::core::error::{CombatError, ValidationError};

fn weapon(category: WeaponCategory, functionality: WeaponFunctionality, rounds: u32) -> Weapon {
    Weapon {
        name: "Test gun".into(),
        description: String::new(),
        category,
        weight: 3.0,
        strength_requirement: 0,
        ammo_type: AmmoType::Standard,
        primary: FiringProfile {
            functionality,
            damage: DamageDice::new(1, 6, 0),
            multiple_hits: 0,
            jamming_factor: 3,
            reloading_time: 2,
            magazine: Magazine {
                current: rounds,
                ..Magazine::full(20)
            },
        },
        secondary: None,
        melee_attachment: None,
        sights: SightModifiers::default(),
    }
}

fn combatant(name: &str, initiative: i32, actions: i32) -> Combatant {
    Combatant::new(
        name,
        Attributes {
            strength: 10,
            physique: 15,
            mental_strength: 15,
            ..Default::default()
        },
        DerivedBonuses {
            initiative,
            defensive: 4,
            actions_per_round: actions,
            ..Default::default()
        },
    )
}

/// Burst from a magazine holding 2 rounds: emptied, one shot resolved
#[test]
fn test_scenario_a_short_burst() {
    let mut magazine = Magazine {
        current: 2,
        ..Magazine::full(30)
    };
    let draw = ammo::draw(&mut magazine, FiringMode::Burst, 2);
    assert_eq!(magazine.current, 0);
    assert_eq!(draw.shots, 1);
    assert_eq!(draw.rounds_spent, 2);
}

/// 12 points of armor against 5 raw: 2 guaranteed, the rest up to a d10
#[test]
fn test_scenario_b_heavy_armor_soaks_light_hit() {
    let rules = RulesConfig::default();
    let mut wearer = combatant("Wearer", 0, 2).with_armor(vec![ArmorPiece::new(
        "Plate vest",
        12,
        ArmorType::Harness,
        ArmorMaterial::HeavyCombat,
    )]);
    let before = wearer.target.part(BodyPart::Chest).temporary;

    for roll in 1..=10 {
        let part = wearer.target.part_mut(BodyPart::Chest);
        part.temporary = before;
        let mut dice = ScriptedDice::new([roll]).with_chances([true]);
        let report = apply_damage_to_body_part(
            part,
            5,
            AttackKind::Ranged,
            AmmoType::Standard,
            &rules,
            &mut dice,
        );
        assert_eq!(report.effective_armor, 12);
        assert_eq!(report.absorbed, roll + 2);
        let expected_net = (5 - (roll + 2)).max(0);
        assert_eq!(report.net, expected_net);
        assert_eq!(part.temporary, before - expected_net);
        if roll >= 3 {
            assert_eq!(part.temporary, before);
        }
    }
}

/// Shooting with no actions left changes nothing
#[test]
fn test_scenario_c_no_actions_no_mutation() {
    let rules = RulesConfig::default();
    let mut shooter = combatant("Shooter", 0, 3).with_main_hand(weapon(
        WeaponCategory::AssaultRifle,
        WeaponFunctionality::FullAutomatic,
        20,
    ));
    shooter.actions_remaining = 0;
    let mut target = combatant("Target", 0, 3);
    let target_before = target.target.clone();

    let mut dice = ScriptedDice::new([1, 1, 1]);
    let mut ctx = ActionContext {
        rules: &rules,
        environment: Environment::default(),
        dice: &mut dice,
    };
    let err = resolve_shoot(
        &mut shooter,
        &mut target,
        &ShootRequest::new("Target", FiringMode::FullAuto, 15),
        &mut ctx,
    )
    .unwrap_err();

    assert_eq!(
        err,
        CombatError::Validation(ValidationError::NoActionsRemaining("Shooter".into()))
    );
    assert_eq!(shooter.main_hand.as_ref().unwrap().primary.magazine.current, 20);
    assert_eq!(target.target, target_before);
    assert!(target.under_fire_from.is_empty());
    assert_eq!(dice.remaining(), 3);
}

/// Four distinct bonuses: strictly descending totals, bonus breaks ties
#[test]
fn test_scenario_d_initiative_order() {
    let roster = vec![
        combatant("A", 1, 2),
        combatant("B", 4, 2),
        combatant("C", 2, 2),
        combatant("D", 3, 2),
    ];
    // (roll, tiebreak) per combatant in roster order: totals A 8, B 8, C 9, D 4
    let mut dice = ScriptedDice::new([7, 1, 4, 1, 7, 1, 1, 1]);
    let order = roll_initiative(&roster, &mut dice);

    let names: Vec<&str> = order
        .iter()
        .map(|e| {
            roster
                .iter()
                .find(|c| c.id == e.combatant)
                .map(|c| c.name.as_str())
                .unwrap()
        })
        .collect();
    assert_eq!(names, vec!["C", "B", "A", "D"]);
    for pair in order.windows(2) {
        assert!(
            pair[0].total > pair[1].total
                || (pair[0].total == pair[1].total && pair[0].bonus > pair[1].bonus)
        );
    }
}

/// A natural 20 on reload drops the magazine whatever the base chance
#[test]
fn test_scenario_e_dropped_magazine() {
    let rules = RulesConfig::default();
    for base_chance in [1, 10, 20, 30] {
        let mut loader = combatant("Loader", 0, 3).with_main_hand(weapon(
            WeaponCategory::Handgun,
            WeaponFunctionality::SemiAutomatic,
            4,
        ));
        let mut dice = ScriptedDice::new([20]);
        let mut ctx = ActionContext {
            rules: &rules,
            environment: Environment::default(),
            dice: &mut dice,
        };
        let res = resolve_reload(&mut loader, &ReloadRequest::new(base_chance), &mut ctx).unwrap();
        assert_eq!(
            res.detail,
            ActionDetail::Reload {
                roll: 20,
                outcome: ReloadOutcome::MagazineDropped
            }
        );
        assert_eq!(loader.actions_remaining, 1);
        assert_eq!(loader.main_hand.as_ref().unwrap().primary.magazine.current, 4);
    }
}

#[test]
fn test_full_auto_through_a_session() {
    // Initiative: Gunner 3+5, Runner 0+5
    let rolls = [
        5, 1, 5, 1, // initiative
        4, 11, 3, // shot 1: hit, location 11 (stomach), damage 3
        15, // shot 2: miss, full auto stops
    ];
    let mut session = CombatSession::new(
        RulesConfig::default(),
        Box::new(ScriptedDice::new(rolls)),
    );
    session
        .start(vec![
            combatant("Gunner", 3, 2).with_main_hand(weapon(
                WeaponCategory::AssaultRifle,
                WeaponFunctionality::FullAutomatic,
                20,
            )),
            combatant("Runner", 0, 2),
        ])
        .unwrap();
    let result = session
        .shoot(
            &ShootRequest::new("Runner", FiringMode::FullAuto, 12),
            Environment::default(),
        )
        .unwrap();

    match &result.detail {
        ActionDetail::Shoot { target, shots } => {
            assert_eq!(target, "Runner");
            assert_eq!(shots.len(), 2);
            assert_eq!(shots[0].kind, RollKind::Hit);
            assert_eq!(shots[0].hits[0].part, BodyPart::Stomach);
            assert_eq!(shots[0].hits[0].damage.unwrap().net, 3);
            assert_eq!(shots[1].kind, RollKind::Miss);
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(result.ammo.unwrap().current, 10);
    assert_eq!(result.actions_remaining, 1);
    assert_eq!(result.next_actor.as_deref(), Some("Gunner"));

    let runner = session.find("Runner").unwrap();
    let stomach = runner.target.part(BodyPart::Stomach);
    assert_eq!(stomach.deficit(), 3);
}

#[test]
fn test_dodging_target_avoids_the_hit() {
    let rules = RulesConfig::default();
    let mut shooter = combatant("Shooter", 0, 3).with_main_hand(weapon(
        WeaponCategory::Handgun,
        WeaponFunctionality::SemiAutomatic,
        5,
    ));
    let mut target = combatant("Target", 0, 3);
    target.is_avoiding = true;

    // hit 6, location 17, damage 4, avoid 2 (defence 4 - stress 1)
    let mut dice = ScriptedDice::new([6, 17, 4, 2]);
    let mut ctx = ActionContext {
        rules: &rules,
        environment: Environment::default(),
        dice: &mut dice,
    };
    let res = resolve_shoot(
        &mut shooter,
        &mut target,
        &ShootRequest::new("Target", FiringMode::SingleRound, 12),
        &mut ctx,
    )
    .unwrap();

    match res.detail {
        ActionDetail::Shoot { shots, .. } => {
            assert_eq!(shots[0].hits[0].avoid, Some(AvoidOutcome::Avoided));
            assert!(shots[0].hits[0].damage.is_none());
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(target.target.total_temporary(), target.target.total_maximum());
    assert_eq!(target.actions_remaining, 3);
}
