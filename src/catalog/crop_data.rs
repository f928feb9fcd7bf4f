use crate::models::{
    CropProfile, Demand, Level, NutrientDemand, PhRange, Season, SoilTexture, TemperatureBand,
    Tolerance,
};
use std::collections::BTreeMap;

use Level::{High as H, Low as L, Medium as M};
use SoilTexture::{Clay, ClayLoam, Loam, Sandy, SandyLoam};

/// Order of the suitability values in every row below.
const DISTRICTS: [&str; 10] = [
    "PUNE",
    "SOLAPUR",
    "NASHIK",
    "AHMEDNAGAR",
    "AURANGABAD",
    "JALGAON",
    "SANGLI",
    "KOLHAPUR",
    "SATARA",
    "LATUR",
];

fn suitability(values: [f64; 10]) -> BTreeMap<String, f64> {
    DISTRICTS
        .iter()
        .zip(values)
        .map(|(id, v)| (id.to_string(), v))
        .collect()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn crop(
    id: &str,
    common_name: &str,
    scientific_name: &str,
    duration: (u32, u32, u32),
    temperature: [f64; 4],
    water_requirement_mm: f64,
    tolerance: (Tolerance, Tolerance),
    ph: (f64, f64),
    textures: &[SoilTexture],
    npk: (Level, Level, Level),
    regional: [f64; 10],
    successful: &[&str],
    seasons: &[Season],
    varieties: &[&str],
    typical_yield_kg_per_ha: u32,
    market_demand: Demand,
) -> CropProfile {
    let [t_min, t_opt_min, t_opt_max, t_max] = temperature;
    CropProfile {
        id: id.to_string(),
        common_name: common_name.to_string(),
        scientific_name: scientific_name.to_string(),
        duration_days: duration.0,
        duration_range: (duration.1, duration.2),
        temperature: TemperatureBand::new(t_min, t_opt_min, t_opt_max, t_max),
        water_requirement_mm,
        drought_tolerance: tolerance.0,
        waterlogging_tolerance: tolerance.1,
        ph_range: PhRange::new(ph.0, ph.1),
        suitable_textures: textures.to_vec(),
        nutrients: NutrientDemand::new(npk.0, npk.1, npk.2),
        regional_suitability: suitability(regional),
        successful_regions: strings(successful),
        seasons: seasons.to_vec(),
        varieties: strings(varieties),
        typical_yield_kg_per_ha,
        market_demand,
    }
}

/// Built-in short-duration crops for the Maharashtra districts.
pub(crate) fn builtin_crops() -> Vec<CropProfile> {
    use Season::{Kharif, Rabi};
    use Tolerance::{High, Low, Moderate};

    vec![
        // Millets
        crop(
            "BAJRA_01",
            "Bajra (Pearl Millet)",
            "Pennisetum glaucum",
            (75, 70, 85),
            [20.0, 25.0, 35.0, 42.0],
            400.0,
            (High, Low),
            (6.0, 8.0),
            &[Sandy, SandyLoam, Loam],
            (M, M, M),
            [0.85, 0.90, 0.80, 0.85, 0.88, 0.75, 0.82, 0.70, 0.78, 0.90],
            &["SOLAPUR", "AURANGABAD", "LATUR", "AHMEDNAGAR"],
            &[Kharif],
            &["GHB-558", "GHB-732", "ICMH-356"],
            1500,
            Demand::High,
        ),
        crop(
            "JOWAR_01",
            "Jowar (Sorghum)",
            "Sorghum bicolor",
            (85, 75, 90),
            [18.0, 25.0, 35.0, 40.0],
            450.0,
            (High, Low),
            (5.5, 8.5),
            &[Clay, ClayLoam, Loam],
            (M, M, L),
            [0.88, 0.92, 0.85, 0.90, 0.90, 0.82, 0.88, 0.75, 0.85, 0.92],
            &["SOLAPUR", "AHMEDNAGAR", "AURANGABAD", "LATUR"],
            &[Kharif, Rabi],
            &["CSH-16", "CSV-15", "M-35-1"],
            1800,
            Demand::High,
        ),
        crop(
            "RAGI_01",
            "Ragi (Finger Millet)",
            "Eleusine coracana",
            (80, 75, 85),
            [18.0, 22.0, 30.0, 35.0],
            500.0,
            (Moderate, Low),
            (5.0, 8.2),
            &[SandyLoam, Loam, ClayLoam],
            (M, M, M),
            [0.75, 0.70, 0.80, 0.72, 0.70, 0.78, 0.75, 0.85, 0.82, 0.68],
            &["KOLHAPUR", "SATARA", "NASHIK"],
            &[Kharif],
            &["GPU-28", "ML-365", "VL-149"],
            1200,
            Demand::Moderate,
        ),
        crop(
            "FOXTAIL_01",
            "Foxtail Millet",
            "Setaria italica",
            (70, 65, 75),
            [20.0, 25.0, 32.0, 38.0],
            350.0,
            (High, Low),
            (5.5, 7.5),
            &[Sandy, SandyLoam, Loam],
            (L, L, L),
            [0.70, 0.75, 0.72, 0.73, 0.75, 0.70, 0.72, 0.68, 0.70, 0.75],
            &["SOLAPUR", "AURANGABAD", "LATUR"],
            &[Kharif],
            &["SiA-3156", "Prasad", "Lepakshi"],
            1000,
            Demand::Moderate,
        ),
        // Pulses
        crop(
            "MOONG_01",
            "Green Gram (Moong)",
            "Vigna radiata",
            (70, 65, 75),
            [20.0, 25.0, 35.0, 40.0],
            350.0,
            (Moderate, Low),
            (6.0, 7.5),
            &[SandyLoam, Loam, ClayLoam],
            (L, M, M),
            [0.82, 0.85, 0.80, 0.83, 0.85, 0.82, 0.80, 0.75, 0.78, 0.85],
            &["SOLAPUR", "AURANGABAD", "AHMEDNAGAR", "LATUR"],
            &[Kharif, Rabi],
            &["Pusa-105", "SML-668", "IPM-02-3"],
            800,
            Demand::High,
        ),
        crop(
            "URAD_01",
            "Black Gram (Urad)",
            "Vigna mungo",
            (75, 70, 80),
            [20.0, 25.0, 35.0, 40.0],
            400.0,
            (Moderate, Low),
            (6.5, 7.5),
            &[Loam, ClayLoam, SandyLoam],
            (L, M, M),
            [0.78, 0.80, 0.75, 0.78, 0.80, 0.77, 0.75, 0.72, 0.75, 0.80],
            &["SOLAPUR", "AURANGABAD", "AHMEDNAGAR"],
            &[Kharif],
            &["TAU-1", "PU-31", "LBG-752"],
            700,
            Demand::High,
        ),
        crop(
            "COWPEA_01",
            "Cowpea",
            "Vigna unguiculata",
            (75, 70, 80),
            [20.0, 25.0, 35.0, 40.0],
            400.0,
            (High, Moderate),
            (5.5, 7.5),
            &[Sandy, SandyLoam, Loam, ClayLoam],
            (L, M, M),
            [0.80, 0.82, 0.78, 0.80, 0.82, 0.80, 0.78, 0.75, 0.77, 0.82],
            &["SOLAPUR", "AURANGABAD", "JALGAON"],
            &[Kharif],
            &["Pusa-578", "Arka-Garima", "Kashi-Kanchan"],
            900,
            Demand::Moderate,
        ),
        crop(
            "GUAR_01",
            "Cluster Bean (Guar)",
            "Cyamopsis tetragonoloba",
            (85, 80, 90),
            [20.0, 25.0, 35.0, 42.0],
            350.0,
            (High, Low),
            (6.0, 8.5),
            &[Sandy, SandyLoam, Loam],
            (L, M, M),
            [0.75, 0.85, 0.70, 0.78, 0.82, 0.72, 0.75, 0.65, 0.70, 0.85],
            &["SOLAPUR", "AURANGABAD", "LATUR"],
            &[Kharif],
            &["RGC-1066", "HG-563", "Pusa-Navbahar"],
            1200,
            Demand::Moderate,
        ),
        // Oilseeds
        crop(
            "SESAME_01",
            "Sesame (Til)",
            "Sesamum indicum",
            (85, 80, 90),
            [20.0, 25.0, 35.0, 40.0],
            400.0,
            (Moderate, Low),
            (5.5, 8.0),
            &[SandyLoam, Loam, ClayLoam],
            (M, M, M),
            [0.75, 0.78, 0.72, 0.75, 0.77, 0.73, 0.75, 0.70, 0.72, 0.78],
            &["SOLAPUR", "AURANGABAD", "AHMEDNAGAR"],
            &[Kharif, Rabi],
            &["Phule-Til", "N-32", "TKG-22"],
            600,
            Demand::High,
        ),
        crop(
            "SUNFLOWER_01",
            "Sunflower (Short-duration)",
            "Helianthus annuus",
            (85, 80, 90),
            [15.0, 20.0, 30.0, 35.0],
            500.0,
            (Moderate, Low),
            (6.0, 7.5),
            &[Loam, ClayLoam, SandyLoam],
            (H, H, H),
            [0.80, 0.75, 0.82, 0.80, 0.75, 0.80, 0.78, 0.82, 0.80, 0.73],
            &["PUNE", "NASHIK", "KOLHAPUR", "SATARA"],
            &[Kharif, Rabi],
            &["KBSH-44", "Phule-Bhaskar", "DRSH-1"],
            1500,
            Demand::High,
        ),
        crop(
            "SOYBEAN_01",
            "Soybean (Early variety)",
            "Glycine max",
            (85, 80, 90),
            [20.0, 25.0, 30.0, 35.0],
            500.0,
            (Moderate, Moderate),
            (6.0, 7.5),
            &[Loam, ClayLoam, SandyLoam],
            (L, H, H),
            [0.78, 0.72, 0.80, 0.77, 0.73, 0.82, 0.75, 0.80, 0.78, 0.70],
            &["JALGAON", "NASHIK", "KOLHAPUR"],
            &[Kharif],
            &["JS-335", "MAUS-71", "Phule-Kalyani"],
            1800,
            Demand::High,
        ),
        // Vegetables
        crop(
            "TOMATO_01",
            "Tomato (Short-duration)",
            "Solanum lycopersicum",
            (75, 70, 80),
            [15.0, 20.0, 28.0, 35.0],
            600.0,
            (Low, Low),
            (6.0, 7.0),
            &[Loam, SandyLoam, ClayLoam],
            (H, H, H),
            [0.85, 0.70, 0.88, 0.80, 0.72, 0.82, 0.78, 0.85, 0.83, 0.68],
            &["PUNE", "NASHIK", "KOLHAPUR", "SATARA"],
            &[Kharif, Rabi],
            &["Abhinav", "Pusa-Ruby", "Arka-Vikas"],
            25000,
            Demand::High,
        ),
        crop(
            "BRINJAL_01",
            "Brinjal (Eggplant)",
            "Solanum melongena",
            (80, 75, 85),
            [18.0, 22.0, 30.0, 38.0],
            550.0,
            (Moderate, Low),
            (5.5, 7.0),
            &[Loam, SandyLoam, ClayLoam],
            (H, H, H),
            [0.82, 0.75, 0.85, 0.80, 0.75, 0.82, 0.80, 0.85, 0.82, 0.72],
            &["PUNE", "NASHIK", "KOLHAPUR", "SATARA"],
            &[Kharif, Rabi],
            &["Pusa-Purple-Long", "Arka-Shirish", "Phule-Prakash"],
            20000,
            Demand::High,
        ),
        crop(
            "OKRA_01",
            "Okra (Bhindi)",
            "Abelmoschus esculentus",
            (70, 65, 75),
            [20.0, 25.0, 35.0, 40.0],
            500.0,
            (Moderate, Low),
            (6.0, 7.5),
            &[Loam, SandyLoam, ClayLoam],
            (H, M, M),
            [0.80, 0.78, 0.82, 0.80, 0.78, 0.82, 0.80, 0.82, 0.80, 0.75],
            &["PUNE", "NASHIK", "JALGAON", "KOLHAPUR"],
            &[Kharif, Rabi],
            &["Pusa-Sawani", "Arka-Anamika", "Phule-Utkarsha"],
            12000,
            Demand::High,
        ),
        crop(
            "BOTTLEGOURD_01",
            "Bottle Gourd (Lauki)",
            "Lagenaria siceraria",
            (75, 70, 80),
            [18.0, 22.0, 32.0, 38.0],
            550.0,
            (Moderate, Moderate),
            (6.0, 7.5),
            &[Loam, SandyLoam, ClayLoam],
            (H, M, M),
            [0.78, 0.72, 0.80, 0.77, 0.73, 0.80, 0.75, 0.80, 0.78, 0.70],
            &["PUNE", "NASHIK", "JALGAON", "KOLHAPUR"],
            &[Kharif, Rabi],
            &["Pusa-Summer-Prolific-Long", "Arka-Bahar", "Samrat"],
            18000,
            Demand::Moderate,
        ),
    ]
}
