//! The planet's two lighting moods and the switch between them.

/// Sun colour and cloud visibility for one time of day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightPreset {
    pub color: [f32; 3],
    pub clouds_intensity: f32,
}

impl LightPreset {
    pub const DAY: LightPreset = LightPreset {
        color: [0.988, 0.945, 0.784],
        clouds_intensity: 0.25,
    };
    pub const NIGHT: LightPreset = LightPreset {
        color: [0.98, 0.859, 0.0],
        clouds_intensity: 0.01,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeOfDay {
    #[default]
    Day,
    Night,
}

impl TimeOfDay {
    pub fn toggled(self) -> Self {
        match self {
            TimeOfDay::Day => TimeOfDay::Night,
            TimeOfDay::Night => TimeOfDay::Day,
        }
    }

    pub fn preset(self) -> LightPreset {
        match self {
            TimeOfDay::Day => LightPreset::DAY,
            TimeOfDay::Night => LightPreset::NIGHT,
        }
    }
}

/// Which surface texture is bound and how the planet is lit.
///
/// Only [`toggle`](Self::toggle) changes it; there are no intermediate states.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayNightCycle {
    time: TimeOfDay,
    main_texture: usize,
    light: LightPreset,
}

impl Default for DayNightCycle {
    fn default() -> Self {
        Self {
            time: TimeOfDay::Day,
            main_texture: 0,
            light: LightPreset::DAY,
        }
    }
}

impl DayNightCycle {
    pub fn toggle(&mut self) {
        self.main_texture ^= 1;
        self.time = self.time.toggled();
        self.light = self.time.preset();
        log::info!("Switched to {:?}", self.time);
    }

    pub fn time(&self) -> TimeOfDay {
        self.time
    }

    /// 0 selects the day map, 1 the night map.
    pub fn main_texture(&self) -> usize {
        self.main_texture
    }

    pub fn light(&self) -> LightPreset {
        self.light
    }
}
