//! Built-in collage templates, grouped by photo count.

use super::{CollageTemplate, FractionalFrame};

const fn f(x: f32, y: f32, width: f32, height: f32) -> FractionalFrame {
    FractionalFrame::new(x, y, width, height)
}

static TWO_PHOTOS: [CollageTemplate; 4] = [
    CollageTemplate {
        name: "2 Horizontal",
        photo_count: 2,
        frames: &[f(0.0, 0.0, 0.5, 1.0), f(0.5, 0.0, 0.5, 1.0)],
    },
    CollageTemplate {
        name: "2 Vertical",
        photo_count: 2,
        frames: &[f(0.0, 0.0, 1.0, 0.5), f(0.0, 0.5, 1.0, 0.5)],
    },
    CollageTemplate {
        name: "2 Asimétrico V",
        photo_count: 2,
        frames: &[f(0.0, 0.0, 1.0, 0.7), f(0.0, 0.7, 1.0, 0.3)],
    },
    CollageTemplate {
        name: "2 Asimétrico H",
        photo_count: 2,
        frames: &[f(0.0, 0.0, 0.7, 1.0), f(0.7, 0.0, 0.3, 1.0)],
    },
];

static THREE_PHOTOS: [CollageTemplate; 4] = [
    CollageTemplate {
        name: "3 Top Grande",
        photo_count: 3,
        frames: &[
            f(0.0, 0.0, 1.0, 0.6),
            f(0.0, 0.6, 0.5, 0.4),
            f(0.5, 0.6, 0.5, 0.4),
        ],
    },
    CollageTemplate {
        name: "3 Izquierda Grande",
        photo_count: 3,
        frames: &[
            f(0.0, 0.0, 0.6, 1.0),
            f(0.6, 0.0, 0.4, 0.5),
            f(0.6, 0.5, 0.4, 0.5),
        ],
    },
    CollageTemplate {
        name: "3 Horizontal",
        photo_count: 3,
        frames: &[
            f(0.0, 0.0, 0.333, 1.0),
            f(0.333, 0.0, 0.334, 1.0),
            f(0.667, 0.0, 0.333, 1.0),
        ],
    },
    CollageTemplate {
        name: "3 Vertical",
        photo_count: 3,
        frames: &[
            f(0.0, 0.0, 1.0, 0.333),
            f(0.0, 0.333, 1.0, 0.334),
            f(0.0, 0.667, 1.0, 0.333),
        ],
    },
];

static FOUR_PHOTOS: [CollageTemplate; 4] = [
    CollageTemplate {
        name: "4 Cuadrado",
        photo_count: 4,
        frames: &[
            f(0.0, 0.0, 0.5, 0.5),
            f(0.5, 0.0, 0.5, 0.5),
            f(0.0, 0.5, 0.5, 0.5),
            f(0.5, 0.5, 0.5, 0.5),
        ],
    },
    CollageTemplate {
        name: "4 Top Grande",
        photo_count: 4,
        frames: &[
            f(0.0, 0.0, 1.0, 0.5),
            f(0.0, 0.5, 0.333, 0.5),
            f(0.333, 0.5, 0.334, 0.5),
            f(0.667, 0.5, 0.333, 0.5),
        ],
    },
    CollageTemplate {
        name: "4 Izquierda Grande",
        photo_count: 4,
        frames: &[
            f(0.0, 0.0, 0.5, 1.0),
            f(0.5, 0.0, 0.5, 0.333),
            f(0.5, 0.333, 0.5, 0.334),
            f(0.5, 0.667, 0.5, 0.333),
        ],
    },
    CollageTemplate {
        name: "4 Horizontal",
        photo_count: 4,
        frames: &[
            f(0.0, 0.0, 0.25, 1.0),
            f(0.25, 0.0, 0.25, 1.0),
            f(0.5, 0.0, 0.25, 1.0),
            f(0.75, 0.0, 0.25, 1.0),
        ],
    },
];

static FIVE_PHOTOS: [CollageTemplate; 3] = [
    CollageTemplate {
        name: "5 Centro Grande",
        photo_count: 5,
        frames: &[
            f(0.0, 0.0, 0.5, 0.3),
            f(0.5, 0.0, 0.5, 0.3),
            f(0.0, 0.3, 1.0, 0.4),
            f(0.0, 0.7, 0.5, 0.3),
            f(0.5, 0.7, 0.5, 0.3),
        ],
    },
    CollageTemplate {
        name: "5 Izquierda Grande",
        photo_count: 5,
        frames: &[
            f(0.0, 0.0, 0.6, 1.0),
            f(0.6, 0.0, 0.4, 0.25),
            f(0.6, 0.25, 0.4, 0.25),
            f(0.6, 0.5, 0.4, 0.25),
            f(0.6, 0.75, 0.4, 0.25),
        ],
    },
    CollageTemplate {
        name: "5 Mix",
        photo_count: 5,
        frames: &[
            f(0.0, 0.0, 0.333, 0.5),
            f(0.333, 0.0, 0.334, 0.5),
            f(0.667, 0.0, 0.333, 0.5),
            f(0.0, 0.5, 0.5, 0.5),
            f(0.5, 0.5, 0.5, 0.5),
        ],
    },
];

static SIX_PHOTOS: [CollageTemplate; 3] = [
    CollageTemplate {
        name: "6 Cuadrícula 3x2",
        photo_count: 6,
        frames: &[
            f(0.0, 0.0, 0.333, 0.5),
            f(0.333, 0.0, 0.334, 0.5),
            f(0.667, 0.0, 0.333, 0.5),
            f(0.0, 0.5, 0.333, 0.5),
            f(0.333, 0.5, 0.334, 0.5),
            f(0.667, 0.5, 0.333, 0.5),
        ],
    },
    CollageTemplate {
        name: "6 Cuadrícula 2x3",
        photo_count: 6,
        frames: &[
            f(0.0, 0.0, 0.5, 0.333),
            f(0.5, 0.0, 0.5, 0.333),
            f(0.0, 0.333, 0.5, 0.334),
            f(0.5, 0.333, 0.5, 0.334),
            f(0.0, 0.667, 0.5, 0.333),
            f(0.5, 0.667, 0.5, 0.333),
        ],
    },
    CollageTemplate {
        name: "6 Top Grande",
        photo_count: 6,
        frames: &[
            f(0.0, 0.0, 1.0, 0.5),
            f(0.0, 0.5, 0.2, 0.5),
            f(0.2, 0.5, 0.2, 0.5),
            f(0.4, 0.5, 0.2, 0.5),
            f(0.6, 0.5, 0.2, 0.5),
            f(0.8, 0.5, 0.2, 0.5),
        ],
    },
];

/// Templates for `photo_count` photos; empty outside `2..=6`.
pub fn templates_for(photo_count: usize) -> &'static [CollageTemplate] {
    match photo_count {
        2 => &TWO_PHOTOS,
        3 => &THREE_PHOTOS,
        4 => &FOUR_PHOTOS,
        5 => &FIVE_PHOTOS,
        6 => &SIX_PHOTOS,
        _ => &[],
    }
}

/// Every template group, from two photos to six.
pub fn all_templates() -> [&'static [CollageTemplate]; 5] {
    [
        &TWO_PHOTOS,
        &THREE_PHOTOS,
        &FOUR_PHOTOS,
        &FIVE_PHOTOS,
        &SIX_PHOTOS,
    ]
}
