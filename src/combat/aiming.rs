//! Aim types: action cost and range penalty
//!
//! Uncontrolled fire is cheap but drops off quickly with range. Aimed and
//! accurately aimed fire share a long-range ladder; accurate aim adds a flat
//! bonus and costs one more action. A laser sight makes either aim one
//! action cheaper.

use serde::{Deserialize, Serialize};

use crate::core::table::{BandTable, Upper};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AimType {
    #[default]
    Uncontrolled,
    Aimed,
    AccurateAimed,
}

/// Cost and chance modifier of a shot's aim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AimAdjustment {
    pub action_cost: i32,
    pub chance_modifier: i32,
}

/// Squares → penalty for uncontrolled fire
const UNCONTROLLED_RANGE: BandTable<f64, i32> = BandTable::new(&[
    (Upper::Below(3.0), -3),
    (Upper::AtMost(7.5), 0),
    (Upper::AtMost(12.0), -1),
    (Upper::Below(16.5), -2),
    (Upper::Below(21.0), -3),
    (Upper::Below(25.5), -4),
    (Upper::Below(30.0), -5),
]);

/// Squares → penalty for aimed fire
const AIMED_RANGE: BandTable<f64, i32> = BandTable::new(&[
    (Upper::Below(3.0), -3),
    (Upper::AtMost(150.0), 0),
    (Upper::AtMost(300.0), -3),
    (Upper::AtMost(450.0), -6),
    (Upper::AtMost(750.0), -9),
    (Upper::AtMost(1050.0), -12),
]);

const ACCURATE_AIM_BONUS: i32 = 3;

/// Most extra bands counted past the end of a table
const MAX_EXTRA_BANDS: f64 = 1000.0;

/// Whole bands of `width` past `edge`, capped so the penalty stays in range
fn extra_bands(range: f64, edge: f64, width: f64) -> i32 {
    let bands = ((range - edge) / width).ceil();
    if bands.is_nan() {
        return MAX_EXTRA_BANDS as i32;
    }
    bands.clamp(0.0, MAX_EXTRA_BANDS) as i32
}

fn uncontrolled_beyond(range: &f64) -> i32 {
    -5 - extra_bands(*range, 30.0, 4.5)
}

fn aimed_beyond(range: &f64) -> i32 {
    -3 * extra_bands(*range, 1050.0, 300.0)
}

/// Range penalty for `aim` at `range` squares
pub fn range_modifier(aim: AimType, range: f64) -> i32 {
    match aim {
        AimType::Uncontrolled => UNCONTROLLED_RANGE.lookup_or_else(&range, uncontrolled_beyond),
        AimType::Aimed | AimType::AccurateAimed => {
            AIMED_RANGE.lookup_or_else(&range, aimed_beyond)
        }
    }
}

pub fn aim_adjustment(aim: AimType, laser_sight: bool, range: f64) -> AimAdjustment {
    let laser_discount = i32::from(laser_sight);
    let (action_cost, bonus) = match aim {
        AimType::Uncontrolled => (1, 0),
        AimType::Aimed => (2 - laser_discount, 0),
        AimType::AccurateAimed => (3 - laser_discount, ACCURATE_AIM_BONUS),
    };
    AimAdjustment {
        action_cost,
        chance_modifier: bonus + range_modifier(aim, range),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_costs() {
        assert_eq!(aim_adjustment(AimType::Uncontrolled, false, 5.0).action_cost, 1);
        assert_eq!(aim_adjustment(AimType::Uncontrolled, true, 5.0).action_cost, 1);
        assert_eq!(aim_adjustment(AimType::Aimed, false, 5.0).action_cost, 2);
        assert_eq!(aim_adjustment(AimType::Aimed, true, 5.0).action_cost, 1);
        assert_eq!(aim_adjustment(AimType::AccurateAimed, false, 5.0).action_cost, 3);
        assert_eq!(aim_adjustment(AimType::AccurateAimed, true, 5.0).action_cost, 2);
    }

    #[test]
    fn test_uncontrolled_bands() {
        let m = |r| range_modifier(AimType::Uncontrolled, r);
        assert_eq!(m(2.0), -3);
        assert_eq!(m(3.0), 0);
        assert_eq!(m(7.5), 0);
        assert_eq!(m(12.0), -1);
        assert_eq!(m(16.4), -2);
        assert_eq!(m(16.5), -3);
        assert_eq!(m(25.0), -4);
        assert_eq!(m(29.9), -5);
        assert_eq!(m(30.0), -5);
        assert_eq!(m(34.5), -6);
        assert_eq!(m(35.0), -7);
    }

    #[test]
    fn test_aimed_bands() {
        let m = |r| range_modifier(AimType::Aimed, r);
        assert_eq!(m(1.0), -3);
        assert_eq!(m(3.0), 0);
        assert_eq!(m(150.0), 0);
        assert_eq!(m(151.0), -3);
        assert_eq!(m(450.0), -6);
        assert_eq!(m(700.0), -9);
        assert_eq!(m(1050.0), -12);
        assert_eq!(m(1100.0), -3);
        assert_eq!(m(1400.0), -6);
    }

    #[test]
    fn test_far_range_saturates() {
        let wild = aim_adjustment(AimType::Uncontrolled, false, 1.0e10);
        assert_eq!(wild.chance_modifier, -5 - 1000);
        let aimed = aim_adjustment(AimType::AccurateAimed, false, f64::INFINITY);
        assert_eq!(aimed.chance_modifier, 3 - 3 * 1000);
        assert_eq!(range_modifier(AimType::Aimed, f64::NAN), -3 * 1000);
    }

    #[test]
    fn test_accurate_aim_bonus() {
        let adj = aim_adjustment(AimType::AccurateAimed, false, 100.0);
        assert_eq!(adj.chance_modifier, 3);
        let far = aim_adjustment(AimType::AccurateAimed, true, 400.0);
        assert_eq!(far.chance_modifier, -3);
    }
}
