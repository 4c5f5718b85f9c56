use serde::{Deserialize, Serialize};

/// Element status the provider reports for a successfully computed pair.
pub const ELEMENT_STATUS_OK: &str = "OK";

/// Top-level status of a payload the provider could fully service.
pub const RESPONSE_STATUS_OK: &str = "OK";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    #[default]
    Driving,
    Walking,
    Transit,
}

impl TravelMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Driving => "driving",
            TravelMode::Walking => "walking",
            TravelMode::Transit => "transit",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }
}

/// The cacheable unit of work. Origin and destination order carries no
/// meaning; two requests over the same sets are equivalent. Omitted mode
/// and units deserialize to their defaults, so an explicit default and a
/// missing field are indistinguishable by the time a key is built.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatrixRequest {
    pub origins: Vec<String>,
    pub destinations: Vec<String>,
    #[serde(default)]
    pub mode: TravelMode,
    #[serde(default)]
    pub units: Units,
}

impl MatrixRequest {
    pub fn new(
        origins: impl IntoIterator<Item = impl Into<String>>,
        destinations: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            origins: origins.into_iter().map(Into::into).collect(),
            destinations: destinations.into_iter().map(Into::into).collect(),
            mode: TravelMode::default(),
            units: Units::default(),
        }
    }

    pub fn with_mode(mut self, mode: TravelMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_units(mut self, units: Units) -> Self {
        self.units = units;
        self
    }
}

/// Magnitude-plus-label pair as the provider renders it ("243 km" / 243046).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TextValue {
    pub text: String,
    pub value: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatrixElement {
    pub status: String,
    #[serde(default)]
    pub distance: Option<TextValue>,
    #[serde(default)]
    pub duration: Option<TextValue>,
}

impl MatrixElement {
    pub fn is_ok(&self) -> bool {
        self.status == ELEMENT_STATUS_OK
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MatrixRow {
    #[serde(default)]
    pub elements: Vec<MatrixElement>,
}

/// Provider payload, passed through the cache unchanged. The cache only
/// inspects the statuses and distance magnitudes; every other field is
/// opaque freight.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatrixResponse {
    pub status: String,
    #[serde(default)]
    pub origin_addresses: Vec<String>,
    #[serde(default)]
    pub destination_addresses: Vec<String>,
    #[serde(default)]
    pub rows: Vec<MatrixRow>,
}

impl MatrixResponse {
    pub fn is_ok(&self) -> bool {
        self.status == RESPONSE_STATUS_OK
    }
}

/// Whether a served payload came out of the store or from a fresh fetch.
/// The HTTP boundary turns this into its diagnostic cache header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CacheSource {
    Hit,
    Upstream,
}

impl CacheSource {
    pub fn as_header_value(&self) -> &'static str {
        match self {
            CacheSource::Hit => "HIT",
            CacheSource::Upstream => "MISS",
        }
    }
}

#[derive(Clone, Debug)]
pub struct ServedResponse {
    pub data: MatrixResponse,
    pub source: CacheSource,
}

impl ServedResponse {
    pub fn new(data: MatrixResponse, source: CacheSource) -> Self {
        Self { data, source }
    }

    pub fn is_hit(&self) -> bool {
        self.source == CacheSource::Hit
    }
}

/// Point-in-time store diagnostics.
#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct StoreStats {
    pub valid_entries: usize,
    pub oldest_entry_age_minutes: Option<u64>,
}
