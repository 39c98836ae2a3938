// src/generate/prompt.rs
use crate::generate::blueprint::Blueprint;

pub const NEGATIVE_PROMPT: &str = "distorted, low resolution, text artifacts, watermark, photo frame";

const STYLE_SUFFIX: &str = "cinematic lighting, 8k, high fidelity, sports photography, bokeh";

fn list_or_none(items: &[String], sep: &str) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(sep)
    }
}

/// Fixed-order descriptive prompt for the primary provider.
pub fn build_prompt(b: &Blueprint) -> String {
    [
        format!(
            "ultra detailed portrait of a fictional {} {}",
            b.nationality, b.position
        ),
        format!(
            "age {}, {} footed player",
            b.age,
            b.dominant_foot.to_string().to_lowercase()
        ),
        format!(
            "wearing {} kit in {}",
            b.attire.pattern,
            b.club_colors.join(" and ")
        ),
        format!(
            "hairstyle: {}, facial hair: {}",
            b.appearance.hairstyle, b.appearance.facial_hair
        ),
        format!("accessories: {}", list_or_none(&b.appearance.accessories, ", ")),
        format!("personality: {}", b.personality.join(", ")),
        format!("playing style: {}", b.playing_style),
        STYLE_SUFFIX.to_string(),
    ]
    .join(", ")
}

/// Short human-readable summary shown next to the brief.
pub fn prompt_preview(b: &Blueprint) -> String {
    [
        format!(
            "Create a {} with {} dominant foot.",
            b.position.to_string().to_lowercase(),
            b.dominant_foot.to_string().to_lowercase()
        ),
        format!("Club colors {}", b.club_colors.join(" & ")),
        format!(
            "Hair: {}, Facial hair: {}",
            b.appearance.hairstyle, b.appearance.facial_hair
        ),
        format!("Accessories: {}", list_or_none(&b.appearance.accessories, ", ")),
        format!("Kit pattern {}.", b.attire.pattern),
    ]
    .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::blueprint::{
        Appearance, Attire, DominantFoot, KitPattern, Position,
    };

    fn sample() -> Blueprint {
        Blueprint {
            id: "player-1".into(),
            position: Position::Midfielder,
            dominant_foot: DominantFoot::Left,
            nationality: "Brazilian".into(),
            age: 24,
            playing_style: "box-to-box".into(),
            club_colors: vec!["#0b3d91".into(), "#ffffff".into()],
            appearance: Appearance {
                hairstyle: "cornrows".into(),
                facial_hair: "goatee".into(),
                accessories: vec![],
            },
            attire: Attire {
                pattern: KitPattern::Stripes,
                sleeves: "short".into(),
                collar: "crew".into(),
                shirt_number: 8,
            },
            personality: vec!["composed".into(), "vocal leader".into()],
        }
    }

    #[test]
    fn prompt_is_fixed_order() {
        let p = build_prompt(&sample());
        assert_eq!(
            p,
            "ultra detailed portrait of a fictional Brazilian Midfielder, \
             age 24, left footed player, \
             wearing stripes kit in #0b3d91 and #ffffff, \
             hairstyle: cornrows, facial hair: goatee, \
             accessories: none, \
             personality: composed, vocal leader, \
             playing style: box-to-box, \
             cinematic lighting, 8k, high fidelity, sports photography, bokeh"
        );
    }

    #[test]
    fn preview_mentions_key_fields() {
        let p = prompt_preview(&sample());
        assert!(p.starts_with("Create a midfielder with left dominant foot."));
        assert!(p.contains("Club colors #0b3d91 & #ffffff"));
        assert!(p.ends_with("Kit pattern stripes."));
    }
}
