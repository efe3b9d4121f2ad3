//! The fixed catalogue of natural hazards scored by the National Risk Index.

use std::fmt;

/// One of the eighteen hazard categories carried by an NRIS record.
///
/// Variants are declared in the provider's canonical order, so the derived
/// `Ord` sorts them the way the provider lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HazardType {
    Avalanche,
    CoastalFlooding,
    ColdWave,
    Drought,
    Earthquake,
    Hail,
    HeatWave,
    Hurricane,
    IceStorm,
    Landslide,
    Lightning,
    RiverineFlooding,
    StrongWind,
    Tornado,
    Tsunami,
    VolcanicActivity,
    Wildfire,
    WinterWeather,
}

impl HazardType {
    /// Every hazard, in canonical order.
    pub const ALL: [HazardType; 18] = [
        HazardType::Avalanche,
        HazardType::CoastalFlooding,
        HazardType::ColdWave,
        HazardType::Drought,
        HazardType::Earthquake,
        HazardType::Hail,
        HazardType::HeatWave,
        HazardType::Hurricane,
        HazardType::IceStorm,
        HazardType::Landslide,
        HazardType::Lightning,
        HazardType::RiverineFlooding,
        HazardType::StrongWind,
        HazardType::Tornado,
        HazardType::Tsunami,
        HazardType::VolcanicActivity,
        HazardType::Wildfire,
        HazardType::WinterWeather,
    ];

    /// Key under which the provider stores this hazard.
    pub const fn key(self) -> &'static str {
        match self {
            HazardType::Avalanche => "avalanche",
            HazardType::CoastalFlooding => "coastalFlooding",
            HazardType::ColdWave => "coldWave",
            HazardType::Drought => "drought",
            HazardType::Earthquake => "earthquake",
            HazardType::Hail => "hail",
            HazardType::HeatWave => "heatWave",
            HazardType::Hurricane => "hurricane",
            HazardType::IceStorm => "iceStorm",
            HazardType::Landslide => "landslide",
            HazardType::Lightning => "lightning",
            HazardType::RiverineFlooding => "riverineFlooding",
            HazardType::StrongWind => "strongWind",
            HazardType::Tornado => "tornado",
            HazardType::Tsunami => "tsunami",
            HazardType::VolcanicActivity => "volcanicActivity",
            HazardType::Wildfire => "wildfire",
            HazardType::WinterWeather => "winterWeather",
        }
    }
}

impl fmt::Display for HazardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
