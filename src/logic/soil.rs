use crate::models::{CropProfile, Drainage, Level, SoilProfile, SoilTexture, Tolerance};

/// Soil compatibility score in [0, 100].
///
/// Sum of a pH score (0, 70 or 100), a texture bonus (+20, 0 or -50) and a
/// drainage bonus (0-10), clamped.
pub fn score(crop: &CropProfile, soil: &SoilProfile) -> f64 {
    let ph = ph_score(crop, soil.ph);
    let texture = texture_bonus(crop, soil.texture);
    let drainage = drainage_bonus(crop.waterlogging_tolerance, soil.drainage);
    let total = (ph + texture + drainage).clamp(0.0, 100.0);

    tracing::debug!(
        "Soil compatibility for {}: pH={:.1}, texture={:.1}, drainage={:.1}, total={:.1}",
        crop.common_name,
        ph,
        texture,
        drainage,
        total
    );

    total
}

pub fn ph_score(crop: &CropProfile, ph: f64) -> f64 {
    if crop.ph_range.optimal().contains(ph) {
        100.0
    } else if crop.ph_range.contains(ph) {
        70.0
    } else {
        0.0
    }
}

pub fn texture_bonus(crop: &CropProfile, texture: SoilTexture) -> f64 {
    if crop.is_suitable_for_texture(texture) {
        20.0
    } else if is_related_texture(texture, &crop.suitable_textures) {
        0.0
    } else {
        -50.0
    }
}

/// Textures are related when they share a component, e.g. Loam and Clay-Loam.
pub fn is_related_texture(texture: SoilTexture, suitable: &[SoilTexture]) -> bool {
    suitable.iter().any(|candidate| {
        texture
            .components()
            .any(|part| candidate.components().any(|other| other == part))
    })
}

pub fn drainage_bonus(waterlogging: Tolerance, drainage: Option<Drainage>) -> f64 {
    let Some(drainage) = drainage else {
        return 5.0;
    };

    match (waterlogging, drainage) {
        (Tolerance::High, Drainage::Poor) => 10.0,
        (Tolerance::High, Drainage::Medium) => 8.0,
        (Tolerance::High, Drainage::Good) => 5.0,
        (Tolerance::Moderate, Drainage::Medium) => 10.0,
        (Tolerance::Moderate, _) => 5.0,
        (Tolerance::Low, Drainage::Good) => 10.0,
        (Tolerance::Low, Drainage::Medium) => 5.0,
        (Tolerance::Low, Drainage::Poor) => 0.0,
    }
}

/// Practical amendments that would bring the soil closer to the crop's needs.
pub fn suggest_amendments(crop: &CropProfile, soil: &SoilProfile) -> Vec<String> {
    let mut suggestions = Vec::new();
    let (ph_min, ph_max) = (crop.ph_range.min, crop.ph_range.max);

    if soil.ph < ph_min {
        if ph_min - soil.ph > 1.0 {
            suggestions.push(format!(
                "Add lime to increase pH from {:.1} to at least {:.1} (apply 2-3 tons/ha of agricultural lime)",
                soil.ph, ph_min
            ));
        } else {
            suggestions.push(format!(
                "Add lime to slightly increase pH from {:.1} to {:.1} (apply 1-2 tons/ha of agricultural lime)",
                soil.ph, ph_min
            ));
        }
    } else if soil.ph > ph_max {
        if soil.ph - ph_max > 1.0 {
            suggestions.push(format!(
                "Add sulfur or organic matter to decrease pH from {:.1} to {:.1} (apply 200-300 kg/ha of elemental sulfur)",
                soil.ph, ph_max
            ));
        } else {
            suggestions.push(format!(
                "Add organic matter to slightly decrease pH from {:.1} to {:.1}",
                soil.ph, ph_max
            ));
        }
    }

    if !crop.is_suitable_for_texture(soil.texture) {
        match soil.texture {
            SoilTexture::Clay => suggestions.push(
                "Add sand and organic matter to improve clay soil structure and drainage \
                 (apply 5-10 tons/ha of well-decomposed compost)"
                    .to_string(),
            ),
            SoilTexture::Sandy => suggestions.push(
                "Add organic matter and clay to improve sandy soil water retention \
                 (apply 10-15 tons/ha of compost or farmyard manure)"
                    .to_string(),
            ),
            _ => {}
        }
    }

    if soil.drainage == Some(Drainage::Poor) && crop.waterlogging_tolerance == Tolerance::Low {
        suggestions.push(
            "Improve drainage by creating raised beds or installing subsurface drainage systems"
                .to_string(),
        );
    }

    if soil.organic_matter == Level::Low {
        suggestions.push(
            "Increase organic matter content by adding compost or farmyard manure \
             (apply 10-15 tons/ha annually)"
                .to_string(),
        );
    }

    suggestions
}
