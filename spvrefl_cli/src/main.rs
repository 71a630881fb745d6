//! SPIR-V reflection command-line tool

use clap::{Parser, Subcommand, ValueEnum};
use spvrefl::{FeatureFlags, Reflection, count};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "spvrefl")]
#[command(about = "SPIR-V reflection tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show everything the module declares
    Reflect {
        /// Input SPIR-V file
        input: PathBuf,
    },

    /// Show per-category counts only
    Count {
        /// Input SPIR-V file
        input: PathBuf,
    },

    /// Show capabilities and the device features they require
    #[command(alias = "caps")]
    Features {
        /// Input SPIR-V file
        input: PathBuf,

        /// Fail unless every required feature is in this list
        #[arg(long, value_enum, value_name = "FEATURE", num_args = 0..)]
        check: Option<Vec<Feature>>,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Feature {
    #[value(name = "float64")]
    Float64,
    #[value(name = "int64")]
    Int64,
    #[value(name = "int16")]
    Int16,
    #[value(name = "clip-distance")]
    ClipDistance,
    #[value(name = "cull-distance")]
    CullDistance,
    #[value(name = "image-cube-array")]
    ImageCubeArray,
    #[value(name = "sample-rate-shading")]
    SampleRateShading,
    #[value(name = "extended-storage-formats")]
    ExtendedStorageFormats,
    #[value(name = "dynamic-indexing")]
    DynamicIndexing,
    #[value(name = "multiview")]
    Multiview,
    #[value(name = "draw-parameters")]
    DrawParameters,
    #[value(name = "geometry")]
    Geometry,
    #[value(name = "tessellation")]
    Tessellation,
}

impl From<Feature> for FeatureFlags {
    fn from(f: Feature) -> Self {
        match f {
            Feature::Float64 => FeatureFlags::FLOAT64,
            Feature::Int64 => FeatureFlags::INT64,
            Feature::Int16 => FeatureFlags::INT16,
            Feature::ClipDistance => FeatureFlags::CLIP_DISTANCE,
            Feature::CullDistance => FeatureFlags::CULL_DISTANCE,
            Feature::ImageCubeArray => FeatureFlags::IMAGE_CUBE_ARRAY,
            Feature::SampleRateShading => FeatureFlags::SAMPLE_RATE_SHADING,
            Feature::ExtendedStorageFormats => FeatureFlags::EXTENDED_STORAGE_FORMATS,
            Feature::DynamicIndexing => FeatureFlags::DYNAMIC_INDEXING,
            Feature::Multiview => FeatureFlags::MULTIVIEW,
            Feature::DrawParameters => FeatureFlags::DRAW_PARAMETERS,
            Feature::Geometry => FeatureFlags::GEOMETRY,
            Feature::Tessellation => FeatureFlags::TESSELLATION,
        }
    }
}

fn read_module(input: &Path) -> Result<Vec<u8>, String> {
    std::fs::read(input).map_err(|e| format!("Failed to read {}: {}", input.display(), e))
}

fn mask_to_string(mask: u32) -> String {
    let locations: Vec<String> = (0..32)
        .filter(|bit| mask & (1 << bit) != 0)
        .map(|bit| bit.to_string())
        .collect();
    if locations.is_empty() {
        "none".to_string()
    } else {
        locations.join(", ")
    }
}

fn reflect_module(input: PathBuf) -> Result<(), String> {
    let bytes = read_module(&input)?;
    let reflection =
        Reflection::new(&bytes).map_err(|e| format!("Reflection failed: {}", e))?;

    let header = reflection.header();
    println!("SPIR-V: {}", header.version);
    println!("Generator: {}", header.generator);
    println!("Bound: {}", header.bound);
    println!();

    let capabilities: Vec<_> = reflection.capabilities().collect();
    if !capabilities.is_empty() {
        println!("Capabilities ({}):", capabilities.len());
        for capability in capabilities {
            println!("  {}", capability);
        }
        println!();
    }

    println!(
        "Input Locations: {}",
        mask_to_string(reflection.input_locations())
    );
    println!();

    let constants = reflection.spec_constants();
    if !constants.is_empty() {
        println!("Specialization Constants ({}):", constants.len());
        for constant in constants {
            let ty = constant
                .ty
                .map(|ty| ty.to_string())
                .unwrap_or_else(|| "?".to_string());
            println!(
                "  [{:3}] {} ({})",
                constant.id,
                constant.name.unwrap_or("<unnamed>"),
                ty
            );
        }
        println!();
    }

    let resources = reflection.resources();
    if !resources.is_empty() {
        println!("Resources ({}):", resources.len());
        for resource in resources {
            let kind = resource
                .kind
                .map(|kind| format!("{:?}", kind))
                .unwrap_or_else(|| "Unknown".to_string());
            let count = match resource.bind_count {
                Some(0) => "[]".to_string(),
                Some(1) | None => String::new(),
                Some(n) => format!("[{}]", n),
            };
            println!(
                "  [{}:{}] {}{} ({}, {})",
                resource.set,
                resource.binding,
                resource.name.unwrap_or("<unnamed>"),
                count,
                kind,
                resource.storage_class
            );
        }
        println!();
    }

    Ok(())
}

fn count_module(input: PathBuf) -> Result<(), String> {
    let bytes = read_module(&input)?;
    let counts = count(&bytes).map_err(|e| format!("Reflection failed: {}", e))?;

    println!("Capabilities: {}", counts.features);
    println!("Input locations: {}", mask_to_string(counts.input_locations));
    println!("Specialization constants: {}", counts.spec_constants);
    println!("Push constant bytes: {}", counts.push_constant_size);
    println!("Resources: {}", counts.resources);

    Ok(())
}

fn show_features(input: PathBuf, check: Option<Vec<Feature>>) -> Result<(), String> {
    let bytes = read_module(&input)?;
    let reflection =
        Reflection::new(&bytes).map_err(|e| format!("Reflection failed: {}", e))?;

    for capability in reflection.capabilities() {
        let features = capability.required_features();
        if features.is_empty() {
            println!("  {}", capability);
        } else {
            println!("  {} -> {:?}", capability, features);
        }
    }

    let required = reflection.required_features();
    println!("Required features: {:?}", required);

    if let Some(check) = check {
        let allowed = check
            .into_iter()
            .map(FeatureFlags::from)
            .fold(FeatureFlags::empty(), |acc, f| acc | f);
        let missing = required - allowed;
        if !missing.is_empty() {
            return Err(format!(
                "{} requires features that are not allowed: {:?}",
                input.display(),
                missing
            ));
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Reflect { input } => reflect_module(input),
        Commands::Count { input } => count_module(input),
        Commands::Features { input, check } => show_features(input, check),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_features_check_list() {
        let cli = Cli::try_parse_from(["spvrefl", "features", "a.spv", "--check", "int64", "float64"])
            .unwrap();
        let Commands::Features { check, .. } = cli.command else {
            panic!("expected the features command");
        };
        let check = check.unwrap();
        assert_eq!(check.len(), 2);
        let allowed = check
            .into_iter()
            .map(FeatureFlags::from)
            .fold(FeatureFlags::empty(), |acc, f| acc | f);
        assert_eq!(allowed, FeatureFlags::INT64 | FeatureFlags::FLOAT64);

        assert!(Cli::try_parse_from(["spvrefl", "features", "a.spv", "--allow", "int64"]).is_err());
    }
}
