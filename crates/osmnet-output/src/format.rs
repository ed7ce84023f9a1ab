use std::fmt;
use std::str::FromStr;

/// Output format selected on the command line.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum Format {
    #[default]
    Text,
    Json,
    GeoJson,
    Csv,
}

impl Format {
    pub const ALL: [Format; 4] = [Format::Text, Format::Json, Format::GeoJson, Format::Csv];

    pub fn as_str(self) -> &'static str {
        match self {
            Format::Text    => "text",
            Format::Json    => "json",
            Format::GeoJson => "geojson",
            Format::Csv     => "csv",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Format::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown output format {s:?} (expected text, json, geojson or csv)"))
    }
}
