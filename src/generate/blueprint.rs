//! Player blueprint: the full creative brief for one image batch.
//!
//! `Blueprint::from_seed` is deterministic for a given seed. Caller overrides
//! are applied with `Blueprint::merged`:
//! - top-level fields present in the override replace the base value
//! - `appearance` and `attire` merge field by field
//! - `accessories` is replaced only by a non-empty list

use std::fmt;

use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Position {
    Forward,
    Midfielder,
    Defender,
    Goalkeeper,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DominantFoot {
    Right,
    Left,
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KitPattern {
    Stripes,
    Solid,
    Gradient,
    Geometric,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Position::Forward => "Forward",
            Position::Midfielder => "Midfielder",
            Position::Defender => "Defender",
            Position::Goalkeeper => "Goalkeeper",
        })
    }
}

impl fmt::Display for DominantFoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DominantFoot::Right => "Right",
            DominantFoot::Left => "Left",
            DominantFoot::Both => "Both",
        })
    }
}

impl fmt::Display for KitPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            KitPattern::Stripes => "stripes",
            KitPattern::Solid => "solid",
            KitPattern::Gradient => "gradient",
            KitPattern::Geometric => "geometric",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appearance {
    pub hairstyle: String,
    pub facial_hair: String,
    pub accessories: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attire {
    pub pattern: KitPattern,
    pub sleeves: String,
    pub collar: String,
    pub shirt_number: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blueprint {
    pub id: String,
    pub position: Position,
    pub dominant_foot: DominantFoot,
    pub nationality: String,
    pub age: u8,
    pub playing_style: String,
    pub club_colors: Vec<String>,
    pub appearance: Appearance,
    pub attire: Attire,
    pub personality: Vec<String>,
}

/// Partial appearance; absent fields keep the base value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppearanceOverrides {
    pub hairstyle: Option<String>,
    pub facial_hair: Option<String>,
    pub accessories: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AttireOverrides {
    pub pattern: Option<KitPattern>,
    pub sleeves: Option<String>,
    pub collar: Option<String>,
    pub shirt_number: Option<u8>,
}

/// Caller-supplied partial blueprint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BlueprintOverrides {
    pub id: Option<String>,
    pub position: Option<Position>,
    pub dominant_foot: Option<DominantFoot>,
    pub nationality: Option<String>,
    pub age: Option<u8>,
    pub playing_style: Option<String>,
    pub club_colors: Option<Vec<String>>,
    pub appearance: Option<AppearanceOverrides>,
    pub attire: Option<AttireOverrides>,
    pub personality: Option<Vec<String>>,
}

const POSITIONS: [Position; 4] = [
    Position::Forward,
    Position::Midfielder,
    Position::Defender,
    Position::Goalkeeper,
];
const FEET: [DominantFoot; 3] = [DominantFoot::Right, DominantFoot::Left, DominantFoot::Both];
const PATTERNS: [KitPattern; 4] = [
    KitPattern::Stripes,
    KitPattern::Solid,
    KitPattern::Gradient,
    KitPattern::Geometric,
];
const NATIONALITIES: &[&str] = &[
    "Brazilian", "Argentine", "French", "Spanish", "English", "German", "Italian", "Portuguese",
    "Dutch", "Nigerian", "Senegalese", "Moroccan", "Japanese", "Korean", "Mexican", "Croatian",
];
const HAIRSTYLES: &[&str] = &[
    "buzz cut", "curly top", "cornrows", "undercut", "man bun", "high fade", "bleached crop",
    "shoulder-length waves",
];
const FACIAL_HAIR: &[&str] = &["clean shaven", "light stubble", "goatee", "full beard", "moustache"];
const ACCESSORIES: &[&str] = &[
    "headband", "captain armband", "wristband", "finger tape", "compression sleeve", "snood",
];
const TRAITS: &[&str] = &[
    "relentless", "composed", "charismatic", "fearless", "cerebral", "flamboyant", "stoic",
    "vocal leader", "workhorse",
];
const COLORS: &[&str] = &[
    "#0b3d91", "#ffffff", "#c8102e", "#ffd700", "#006847", "#000000", "#6cabdd", "#7a263a",
    "#f58220", "#241f20",
];
const SLEEVES: &[&str] = &["short", "long"];
const COLLARS: &[&str] = &["crew", "v-neck", "polo", "grandad"];

fn styles_for(position: Position) -> &'static [&'static str] {
    match position {
        Position::Forward => &["poacher", "target man", "false nine", "inside forward"],
        Position::Midfielder => &["deep-lying playmaker", "box-to-box", "mezzala", "ball winner"],
        Position::Defender => &["ball-playing centre-back", "stopper", "overlapping full-back"],
        Position::Goalkeeper => &["sweeper keeper", "shot stopper"],
    }
}

fn pick(rng: &mut StdRng, items: &[&'static str]) -> &'static str {
    items.choose(rng).copied().unwrap_or_default()
}

fn pick_many(rng: &mut StdRng, items: &[&str], min: usize, max: usize) -> Vec<String> {
    let n = rng.random_range(min..=max).min(items.len());
    let mut pool: Vec<&str> = items.to_vec();
    pool.shuffle(rng);
    pool.into_iter().take(n).map(str::to_string).collect()
}

impl Blueprint {
    /// Deterministic blueprint for `seed`. Always carries at least one accessory.
    pub fn from_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);

        let position = *POSITIONS.choose(&mut rng).unwrap_or(&Position::Forward);
        let dominant_foot = *FEET.choose(&mut rng).unwrap_or(&DominantFoot::Right);
        let pattern = *PATTERNS.choose(&mut rng).unwrap_or(&KitPattern::Solid);

        let mut accessories = pick_many(&mut rng, ACCESSORIES, 0, 2);
        if accessories.is_empty() {
            accessories.push("headband".to_string());
        }

        Self {
            id: format!("player-{seed}"),
            position,
            dominant_foot,
            nationality: pick(&mut rng, NATIONALITIES).to_string(),
            age: rng.random_range(17..=36),
            playing_style: pick(&mut rng, styles_for(position)).to_string(),
            club_colors: pick_many(&mut rng, COLORS, 2, 2),
            appearance: Appearance {
                hairstyle: pick(&mut rng, HAIRSTYLES).to_string(),
                facial_hair: pick(&mut rng, FACIAL_HAIR).to_string(),
                accessories,
            },
            attire: Attire {
                pattern,
                sleeves: pick(&mut rng, SLEEVES).to_string(),
                collar: pick(&mut rng, COLLARS).to_string(),
                shirt_number: rng.random_range(1..=99),
            },
            personality: pick_many(&mut rng, TRAITS, 2, 3),
        }
    }

    /// Deep-merge caller overrides onto this blueprint.
    pub fn merged(mut self, o: &BlueprintOverrides) -> Self {
        if let Some(v) = &o.id {
            self.id = v.clone();
        }
        if let Some(v) = o.position {
            self.position = v;
        }
        if let Some(v) = o.dominant_foot {
            self.dominant_foot = v;
        }
        if let Some(v) = &o.nationality {
            self.nationality = v.clone();
        }
        if let Some(v) = o.age {
            self.age = v;
        }
        if let Some(v) = &o.playing_style {
            self.playing_style = v.clone();
        }
        if let Some(v) = &o.club_colors {
            self.club_colors = v.clone();
        }
        if let Some(v) = &o.personality {
            self.personality = v.clone();
        }

        if let Some(a) = &o.appearance {
            if let Some(v) = &a.hairstyle {
                self.appearance.hairstyle = v.clone();
            }
            if let Some(v) = &a.facial_hair {
                self.appearance.facial_hair = v.clone();
            }
            if let Some(v) = a.accessories.as_ref().filter(|v| !v.is_empty()) {
                self.appearance.accessories = v.clone();
            }
        }

        if let Some(t) = &o.attire {
            if let Some(v) = t.pattern {
                self.attire.pattern = v;
            }
            if let Some(v) = &t.sleeves {
                self.attire.sleeves = v.clone();
            }
            if let Some(v) = &t.collar {
                self.attire.collar = v.clone();
            }
            if let Some(v) = t.shirt_number {
                self.attire.shirt_number = v;
            }
        }

        self
    }
}
