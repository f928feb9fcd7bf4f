use crate::cli::{Cli, Commands, HistoryCommands, OptionalSoilArgs, RecommendArgs, RegionCommands, SoilArgs};
use chrono::{Local, NaiveDate};
use fasal::catalog::{CropCatalog, RegionCatalog, DEFAULT_MIN_SOIL_SCORE};
use fasal::config::Config;
use fasal::datasources::OpenMeteoClient;
use fasal::db::{Database, Statistic};
use fasal::error::{FasalError, Result};
use fasal::logic::season::{parse_season, SeasonReport};
use fasal::logic::soil::{score as soil_score, suggest_amendments};
use fasal::logic::{Advice, AdviceRequest, Advisor, RecommendationEngine};
use fasal::models::{
    Drainage, IrrigationLevel, Level, Location, RegionProfile, SoilProfile, SoilTexture,
};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

/// Everything a subcommand needs, resolved once from the global flags.
pub struct Context {
    pub config: Config,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
}

impl Context {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        // `init` rewrites the config, so a broken file must not block it
        let config = match cli.command {
            Some(Commands::Init) => Config::default(),
            _ => Config::load_or_default(cli.config.clone())?,
        };
        Ok(Self {
            config,
            data_dir: cli.data_dir.clone(),
            json: cli.json,
        })
    }

    pub fn regions(&self) -> Result<RegionCatalog> {
        RegionCatalog::load(&self.config.regions_path(self.data_dir.as_ref())?)
    }

    pub fn crops(&self) -> Result<CropCatalog> {
        match self.config.crops.catalog_path {
            Some(ref path) => CropCatalog::from_json_file(path),
            None => Ok(CropCatalog::builtin()),
        }
    }

    pub fn database(&self) -> Result<Database> {
        Database::open(&Config::db_path(self.data_dir.as_ref())?)
    }

    pub fn advisor(&self) -> Result<Advisor<OpenMeteoClient>> {
        Ok(Advisor::new(
            RecommendationEngine::new(Arc::new(self.crops()?)),
            Arc::new(self.regions()?),
            OpenMeteoClient::new(self.config.weather.clone()),
            self.config.weather.forecast_days,
            self.config.regions.max_distance_km,
        ))
    }

    fn print<T: Serialize>(&self, value: &T, human: impl FnOnce(&T)) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            human(value);
        }
        Ok(())
    }
}

pub async fn run(ctx: &Context, command: Commands) -> Result<()> {
    match command {
        Commands::Recommend(args) => run_recommend(ctx, args).await,
        Commands::Season { date } => run_season(ctx, date.unwrap_or_else(today)),
        Commands::Soil { crop, soil } => run_soil(ctx, crop, soil),
        Commands::Crops {
            season,
            region,
            threshold,
            min_days,
            max_days,
        } => run_crops(ctx, season, region, threshold, min_days, max_days),
        Commands::Regions { command } => run_regions(ctx, command),
        Commands::History { command } => run_history(ctx, command).await,
        Commands::Init => init(ctx),
        Commands::Check => check(ctx).await,
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn parse_texture(s: &str) -> Result<SoilTexture> {
    SoilTexture::from_str(s).ok_or_else(|| {
        FasalError::invalid(format!(
            "unknown soil texture '{}'; expected Clay, Loam, Sandy, Clay-Loam or Sandy-Loam",
            s
        ))
    })
}

fn parse_level(s: &str) -> Result<Level> {
    Level::from_str(s)
        .ok_or_else(|| FasalError::invalid(format!("unknown level '{}'; expected Low, Medium or High", s)))
}

fn apply_drainage(soil: SoilProfile, drainage: Option<&str>) -> Result<SoilProfile> {
    match drainage {
        Some(d) => {
            let drainage = Drainage::from_str(d).ok_or_else(|| {
                FasalError::invalid(format!("unknown drainage '{}'; expected Poor, Medium or Good", d))
            })?;
            Ok(soil.with_drainage(Some(drainage)))
        }
        None => Ok(soil),
    }
}

fn soil_from_args(args: &SoilArgs) -> Result<SoilProfile> {
    let soil = SoilProfile::new(
        parse_texture(&args.texture)?,
        args.ph,
        parse_level(&args.organic_matter)?,
    )?;
    apply_drainage(soil, args.drainage.as_deref())
}

fn optional_soil(args: &OptionalSoilArgs) -> Result<Option<SoilProfile>> {
    match (args.texture.as_deref(), args.ph) {
        (Some(texture), Some(ph)) => {
            let organic = args.organic_matter.as_deref().unwrap_or("Medium");
            let soil = SoilProfile::new(parse_texture(texture)?, ph, parse_level(organic)?)?;
            apply_drainage(soil, args.drainage.as_deref()).map(Some)
        }
        _ => Ok(None),
    }
}

async fn run_recommend(ctx: &Context, args: RecommendArgs) -> Result<()> {
    let farm = &ctx.config.farm;

    let location = match (args.region, args.lat, args.lon) {
        (Some(id), _, _) => Location::Region(id),
        (None, Some(latitude), Some(longitude)) => Location::Coordinates {
            latitude,
            longitude,
        },
        _ => farm.location().ok_or_else(|| {
            FasalError::invalid("no location given; pass --region or --lat/--lon, or set farm.region_id")
        })?,
    };

    let season = args.season.as_deref().map(parse_season).transpose()?;
    let irrigation = match args.irrigation.as_deref() {
        Some(s) => IrrigationLevel::from_str(s).ok_or_else(|| {
            FasalError::invalid(format!("unknown irrigation '{}'; expected None, Limited or Full", s))
        })?,
        None => farm.irrigation,
    };
    let soil = optional_soil(&args.soil)?.or_else(|| farm.soil.clone());

    let request = AdviceRequest::new(location)
        .with_season(season)
        .with_soil(soil)
        .with_irrigation(irrigation)
        .with_planning_days(args.planning_days.unwrap_or(farm.planning_days));

    let advice = ctx.advisor()?.advise(request, today()).await?;
    let top = args.top;
    ctx.print(&advice, |a| print_advice(a, top))
}

fn print_advice(advice: &Advice, top: usize) {
    match advice.distance_km {
        Some(d) => println!(
            "Region: {} ({}), {:.1} km from ({:.4}, {:.4})",
            advice.region_name, advice.region_id, d, advice.latitude, advice.longitude
        ),
        None => println!("Region: {} ({})", advice.region_name, advice.region_id),
    }
    println!(
        "Season: {}{}",
        advice.season,
        if advice.season_detected { " (detected)" } else { "" }
    );
    println!("  {}", advice.guidance);
    println!(
        "Soil: {} pH {:.1}, organic matter {} ({})",
        advice.soil.texture,
        advice.soil.ph,
        advice.soil.organic_matter,
        advice.soil_source.as_str()
    );
    println!("Irrigation: {}", advice.irrigation);
    println!(
        "Outlook ({} days): {:.1}°C, {:.0} mm rain, dry-spell risk {}",
        advice.outlook.planning_days,
        advice.outlook.expected_avg_temp,
        advice.outlook.expected_rainfall_mm,
        advice.outlook.dry_spell_risk
    );
    println!();

    if advice.recommendations.is_empty() {
        println!("No crop passed the season, region and soil filters.");
        return;
    }

    println!(
        "{:<4} {:<22} {:>6} {:>8} {:>9} {:>5}  Risk",
        "#", "Crop", "Score", "Water", "Irrigate", "Days"
    );
    for (i, rec) in advice.top(top).iter().enumerate() {
        println!(
            "{:<4} {:<22} {:>6.1} {:>6.0}mm {:>7.0}mm {:>5}  {}",
            i + 1,
            rec.crop,
            rec.suitability_score,
            rec.water_required_mm,
            rec.irrigation_needed_mm,
            rec.growth_duration_days,
            rec.risk_note
        );
    }
    println!();
    println!(
        "Showing {} of {} crops analysed.",
        top.min(advice.total_analyzed),
        advice.total_analyzed
    );
}

fn run_season(ctx: &Context, date: NaiveDate) -> Result<()> {
    let report = SeasonReport::for_date(date);
    ctx.print(&report, |r| {
        let info = r.season.info();
        println!("{}: {} ({})", r.date, r.season, info.description);
        println!("Season ends {}", r.season_end);
        if let Some(next) = r.next_season {
            println!("Transition: {} begins soon", next);
        }
        if let Some(ref window) = r.planting_window {
            println!(
                "Planting window: {} to {} ({})",
                window.start, window.end, window.description
            );
        }
        println!("{}", r.guidance);
    })
}

#[derive(Serialize)]
struct SoilFit {
    crop_id: String,
    crop: String,
    score: f64,
    amendments: Vec<String>,
}

fn run_soil(ctx: &Context, crop: Option<String>, args: SoilArgs) -> Result<()> {
    let soil = soil_from_args(&args)?;
    let catalog = ctx.crops()?;

    let fits: Vec<SoilFit> = match crop {
        Some(id) => {
            let profile = catalog
                .get(&id)
                .ok_or_else(|| FasalError::NotFound(format!("crop {}", id)))?;
            vec![SoilFit {
                crop_id: profile.id.clone(),
                crop: profile.common_name.clone(),
                score: soil_score(profile, &soil),
                amendments: suggest_amendments(profile, &soil),
            }]
        }
        None => catalog
            .with_soil_scores(catalog.all().iter().collect(), &soil)
            .into_iter()
            .map(|(profile, score, amendments)| SoilFit {
                crop_id: profile.id.clone(),
                crop: profile.common_name.clone(),
                score,
                amendments,
            })
            .collect(),
    };

    ctx.print(&fits, |fits| {
        for fit in fits {
            let marker = if fit.score >= DEFAULT_MIN_SOIL_SCORE { " " } else { "!" };
            println!("{} {:<22} {:>5.1}", marker, fit.crop, fit.score);
            for amendment in &fit.amendments {
                println!("    - {}", amendment);
            }
        }
    })
}

fn run_crops(
    ctx: &Context,
    season: Option<String>,
    region: Option<String>,
    threshold: f64,
    min_days: Option<u32>,
    max_days: Option<u32>,
) -> Result<()> {
    let catalog = ctx.crops()?;
    let season = season.as_deref().map(parse_season).transpose()?;

    let crops: Vec<_> = catalog
        .all()
        .iter()
        .filter(|c| season.map_or(true, |s| c.is_suitable_for_season(s)))
        .filter(|c| {
            region
                .as_deref()
                .map_or(true, |r| c.is_suitable_for_region(r, threshold))
        })
        .filter(|c| {
            c.is_short_duration(min_days.unwrap_or(0), max_days.unwrap_or(u32::MAX))
        })
        .collect();

    ctx.print(&crops, |crops| {
        for c in crops {
            println!(
                "{:<12} {:<22} {:>3} days ({}-{})  water {:>4.0}mm  drought {}",
                c.id,
                c.common_name,
                c.duration_days,
                c.duration_range.0,
                c.duration_range.1,
                c.water_requirement_mm,
                c.drought_tolerance
            );
        }
        println!("{} crops", crops.len());
    })
}

fn run_regions(ctx: &Context, command: RegionCommands) -> Result<()> {
    match command {
        RegionCommands::List => {
            let catalog = ctx.regions()?;
            ctx.print(&catalog.all(), |regions| {
                for r in regions.iter() {
                    println!(
                        "{:<12} {:<24} {:>8.4} {:>8.4} {:>5}m  {}",
                        r.id, r.name, r.latitude, r.longitude, r.elevation_m, r.climate_zone
                    );
                }
            })
        }
        RegionCommands::Nearest {
            lat,
            lon,
            max_distance,
        } => {
            let catalog = ctx.regions()?;
            let cap = max_distance.unwrap_or(ctx.config.regions.max_distance_km);
            let (region, distance_km) = catalog.find_nearest(lat, lon, cap)?;

            #[derive(Serialize)]
            struct Nearest<'a> {
                region: &'a RegionProfile,
                distance_km: f64,
            }

            ctx.print(&Nearest { region, distance_km }, |n| {
                println!("{} ({}) at {:.1} km", n.region.name, n.region.id, n.distance_km);
            })
        }
        RegionCommands::Add {
            id,
            name,
            lat,
            lon,
            elevation,
            climate_zone,
            soil,
        } => {
            let mut catalog = ctx.regions()?;
            let mut region = RegionProfile::new(id.to_uppercase(), name, lat, lon)
                .with_elevation(elevation)
                .with_climate_zone(climate_zone);
            if let Some(soil) = optional_soil(&soil)? {
                region = region.with_textures(&[soil.texture]).with_default_soil(soil);
            }
            let existed = catalog.contains(&region.id);
            catalog.upsert(region.clone())?;
            ctx.print(&region, |r| {
                let verb = if existed { "Updated" } else { "Added" };
                println!("{} region {} ({})", verb, r.name, r.id);
            })
        }
    }
}

async fn run_history(ctx: &Context, command: HistoryCommands) -> Result<()> {
    match command {
        HistoryCommands::Import { region, year } => {
            let catalog = ctx.regions()?;
            let profile = catalog
                .get(&region)
                .ok_or_else(|| FasalError::NotFound(format!("region {}", region)))?;
            let start = NaiveDate::from_ymd_opt(year, 1, 1)
                .ok_or_else(|| FasalError::invalid(format!("invalid year {}", year)))?;
            let end = NaiveDate::from_ymd_opt(year, 12, 31)
                .ok_or_else(|| FasalError::invalid(format!("invalid year {}", year)))?;
            if start > today() {
                return Err(FasalError::invalid(format!("year {} is in the future", year)));
            }
            let end = end.min(today());

            let client = OpenMeteoClient::new(ctx.config.weather.clone());
            let days = client
                .fetch_archive(profile.latitude, profile.longitude, start, end)
                .await?;
            let saved = ctx.database()?.save_history(&profile.id, year, &days)?;

            #[derive(Serialize)]
            struct Imported<'a> {
                region_id: &'a str,
                year: i32,
                records: usize,
            }

            ctx.print(
                &Imported {
                    region_id: &profile.id,
                    year,
                    records: saved,
                },
                |i| println!("Imported {} days for {} {}", i.records, i.region_id, i.year),
            )
        }
        HistoryCommands::Climatology {
            region,
            month,
            stat,
        } => {
            let statistic = Statistic::from_str(&stat).ok_or_else(|| {
                FasalError::invalid(format!(
                    "unknown statistic '{}'; expected mean, p25, p75, max or min",
                    stat
                ))
            })?;
            let result = ctx.database()?.climatology(&region, month, statistic)?;
            ctx.print(&result, |c| match c {
                Some(c) => println!(
                    "{} month {} ({} over {} days): max {:.1}°C, min {:.1}°C, rain {:.1}mm",
                    c.region_id, c.month, c.statistic, c.samples, c.temp_max, c.temp_min, c.rainfall_mm
                ),
                None => println!("No data for {} in month {}", region, month),
            })
        }
        HistoryCommands::Coverage { region } => {
            let coverage = ctx.database()?.coverage(&region)?;
            ctx.print(&coverage, |c| match c.year_range() {
                Some(range) => println!(
                    "{}: {} records covering {} ({} years)",
                    c.region_id,
                    c.total_records,
                    range,
                    c.years.len()
                ),
                None => println!("{}: no history imported", c.region_id),
            })
        }
    }
}

/// `fasal init`: interactive setup offering the known regions.
pub fn init(ctx: &Context) -> Result<()> {
    let region_ids: Vec<String> = ctx.regions()?.all().iter().map(|r| r.id.clone()).collect();
    let (config, path) = Config::setup_interactive(&region_ids)?;
    tracing::info!("Wrote config for region {:?} to {}", config.farm.region_id, path.display());
    Ok(())
}

/// `fasal check`: validate config and catalogs, then probe the weather API.
pub async fn check(ctx: &Context) -> Result<()> {
    println!("Config: OK");

    let regions = ctx.regions()?;
    println!("Regions: {} loaded", regions.len());

    let crops = ctx.crops()?;
    println!("Crops: {} loaded", crops.len());

    let db = ctx.database()?;
    println!("History: {} regions imported ({})", db.history_regions()?.len(), db.path().display());

    let (lat, lon) = match ctx.config.farm.region_id.as_deref().and_then(|id| regions.get(id)) {
        Some(region) => (region.latitude, region.longitude),
        None => (
            ctx.config.farm.latitude.unwrap_or(18.5204),
            ctx.config.farm.longitude.unwrap_or(73.8567),
        ),
    };

    let client = OpenMeteoClient::new(ctx.config.weather.clone());
    match client.test_connection(lat, lon).await {
        Ok(true) => println!("Open-Meteo: OK"),
        Ok(false) => println!("Open-Meteo: FAILED (non-success status)"),
        Err(e) => println!("Open-Meteo: FAILED ({})", e),
    }

    Ok(())
}
