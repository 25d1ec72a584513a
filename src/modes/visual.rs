use std::fmt;

use serde::Serialize;

/// One of the lamp's built-in animation patterns.
///
/// The firmware ships 18 fixed modes, addressed by id on the wire. Each mode
/// carries an English and a Russian display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VisualMode {
    /// Wire id of the mode, `0..=17`.
    pub id: u8,
    /// English display name.
    pub name_en: &'static str,
    /// Russian display name.
    pub name_ru: &'static str,
}

impl fmt::Display for VisualMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name_en)
    }
}

static MODES: [VisualMode; 18] = [
    VisualMode {
        id: 0,
        name_en: "Confetti",
        name_ru: "Конфетти",
    },
    VisualMode {
        id: 1,
        name_en: "Fire",
        name_ru: "Огонь",
    },
    VisualMode {
        id: 2,
        name_en: "Vertical rainbow",
        name_ru: "Вертикальная радуга",
    },
    VisualMode {
        id: 3,
        name_en: "Horizontal rainbow",
        name_ru: "Горизонтальная радуга",
    },
    VisualMode {
        id: 4,
        name_en: "Color change",
        name_ru: "Смена цвета",
    },
    VisualMode {
        id: 5,
        name_en: "3D Madness",
        name_ru: "Безумие 3D",
    },
    VisualMode {
        id: 6,
        name_en: "Clouds 3D",
        name_ru: "Облака 3D",
    },
    VisualMode {
        id: 7,
        name_en: "Lava 3D",
        name_ru: "Лава 3D",
    },
    VisualMode {
        id: 8,
        name_en: "3D plasma",
        name_ru: "Плазма 3D",
    },
    VisualMode {
        id: 9,
        name_en: "Rainbow 3D",
        name_ru: "Радуга 3D",
    },
    VisualMode {
        id: 10,
        name_en: "Peacock 3D",
        name_ru: "Павлин 3D",
    },
    VisualMode {
        id: 11,
        name_en: "Zebra 3D",
        name_ru: "Зебра 3D",
    },
    VisualMode {
        id: 12,
        name_en: "Forest 3D",
        name_ru: "Лес 3D",
    },
    VisualMode {
        id: 13,
        name_en: "Ocean 3D",
        name_ru: "Океан 3D",
    },
    VisualMode {
        id: 14,
        name_en: "Color",
        name_ru: "Цвет",
    },
    VisualMode {
        id: 15,
        name_en: "Snow",
        name_ru: "Снег",
    },
    VisualMode {
        id: 16,
        name_en: "Matrix",
        name_ru: "Матрица",
    },
    VisualMode {
        id: 17,
        name_en: "Fireflies",
        name_ru: "Светлячки",
    },
];

/// Catalog of the lamp's visual modes.
pub struct VisualModes;

impl VisualModes {
    /// Looks a mode up by its English display name. The match is exact.
    pub fn by_name(name: &str) -> Option<&'static VisualMode> {
        MODES.iter().find(|mode| mode.name_en == name)
    }

    /// Looks a mode up by its wire id.
    pub fn by_id(id: i32) -> Option<&'static VisualMode> {
        MODES.iter().find(|mode| i32::from(mode.id) == id)
    }

    /// All modes, in id order.
    pub fn all() -> &'static [VisualMode] {
        &MODES
    }
}
