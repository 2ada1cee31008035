//! Per-level difficulty derivation

use serde::{Deserialize, Serialize};

use crate::consts::MAX_LEVEL;
use crate::tuning::Tuning;

/// Background and floor colors for a level (CSS color strings)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub background: String,
    pub floor: String,
}

impl Theme {
    pub fn new(background: &str, floor: &str) -> Self {
        Self {
            background: background.to_string(),
            floor: floor.to_string(),
        }
    }

    /// Warm brown on odd levels, darker brown on even levels
    pub fn for_parity(level: u32) -> Self {
        if level % 2 == 1 {
            Self::new("#8B5E3C", "#3E1E0E")
        } else {
            Self::new("#654321", "#2B160C")
        }
    }
}

/// Difficulty parameters for one round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelSettings {
    /// Level these settings were derived for (always >= 1)
    pub level: u32,
    pub theme: Theme,
    /// Expected light failures per second per light
    pub decay_rate: f32,
    /// Round length in seconds
    pub timer: f32,
    /// Player speed in px/s
    pub player_speed: f32,
}

/// Map a requested level into the playable range; 0 and anything past
/// `MAX_LEVEL` fall back to level 1
pub fn normalize_level(level: u32) -> u32 {
    if (1..=MAX_LEVEL).contains(&level) {
        level
    } else {
        1
    }
}

/// Last level a session plays before finishing
pub fn last_level(max_level: Option<u32>) -> u32 {
    max_level.map_or(MAX_LEVEL, |max| max.clamp(1, MAX_LEVEL))
}

impl LevelSettings {
    /// Derive the settings for `level` from `tuning`
    pub fn for_level(level: u32, tuning: &Tuning) -> Self {
        let level = normalize_level(level);
        let steps = (level - 1) as f32;

        let speed_multiplier = (1.0 / tuning.speed_factor).powf(steps);
        let decay_rate = tuning.light_decay_rate * speed_multiplier;
        let timer = (tuning.base_level_time - steps * tuning.time_step_per_level)
            .max(tuning.min_level_time);
        let player_speed = tuning.base_player_speed + steps * tuning.player_speed_per_level;

        let theme = tuning
            .themes
            .get((level - 1) as usize)
            .cloned()
            .unwrap_or_else(|| Theme::for_parity(level));

        Self {
            level,
            theme,
            decay_rate,
            timer,
            player_speed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_level_one_uses_base_values() {
        let s = LevelSettings::for_level(1, &Tuning::default());
        assert_eq!(s.level, 1);
        assert!(close(s.decay_rate, 0.1));
        assert!(close(s.timer, 20.0));
        assert!(close(s.player_speed, 400.0));
        assert_eq!(s.theme, Theme::new("#8B5E3C", "#3E1E0E"));
    }

    #[test]
    fn test_difficulty_scales_with_level() {
        let s = LevelSettings::for_level(3, &Tuning::default());
        assert!(close(s.decay_rate, 0.1 / (0.85 * 0.85)));
        assert!(close(s.timer, 17.0));
        assert!(close(s.player_speed, 500.0));
        assert_eq!(s.theme, Theme::new("#8B5E3C", "#3E1E0E"));

        let even = LevelSettings::for_level(2, &Tuning::default());
        assert_eq!(even.theme, Theme::new("#654321", "#2B160C"));
    }

    #[test]
    fn test_timer_bottoms_out() {
        let s = LevelSettings::for_level(50, &Tuning::default());
        assert!(close(s.timer, 10.0));
    }

    #[test]
    fn test_level_zero_falls_back_to_level_one() {
        let tuning = Tuning::default();
        assert_eq!(
            LevelSettings::for_level(0, &tuning),
            LevelSettings::for_level(1, &tuning)
        );
    }

    #[test]
    fn test_theme_table_overrides_parity_then_falls_back() {
        let tuning = Tuning {
            themes: vec![Theme::new("#000", "#111"), Theme::new("#222", "#333")],
            ..Default::default()
        };
        assert_eq!(LevelSettings::for_level(2, &tuning).theme.background, "#222");
        // Past the end of the table
        assert_eq!(
            LevelSettings::for_level(3, &tuning).theme,
            Theme::for_parity(3)
        );
    }

    #[test]
    fn test_out_of_range_levels_fall_back_to_level_one() {
        let tuning = Tuning::default();
        let first = LevelSettings::for_level(1, &tuning);
        for level in [MAX_LEVEL + 1, 1_000, u32::MAX] {
            let s = LevelSettings::for_level(level, &tuning);
            assert_eq!(s, first, "level {level}");
        }
        assert_eq!(normalize_level(MAX_LEVEL), MAX_LEVEL);
    }

    #[test]
    fn test_highest_level_has_finite_difficulty() {
        let s = LevelSettings::for_level(MAX_LEVEL, &Tuning::default());
        assert_eq!(s.level, MAX_LEVEL);
        assert!(s.decay_rate.is_finite());
        assert!(s.timer > 0.0);
        assert!(s.player_speed.is_finite());
    }

    #[test]
    fn test_last_level_is_capped() {
        assert_eq!(last_level(None), MAX_LEVEL);
        assert_eq!(last_level(Some(5)), 5);
        assert_eq!(last_level(Some(u32::MAX)), MAX_LEVEL);
    }
}
