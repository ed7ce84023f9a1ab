//! Map data and profile loading.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use log::info;

use osmnet_core::{ElementSet, NetError, NetResult};
use osmnet_graph::RoutingProfiles;

fn open(path: &Path) -> NetResult<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| NetError::Io(io::Error::new(e.kind(), format!("{}: {e}", path.display()))))
}

fn is_pbf(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("pbf"))
}

/// Read the element file named by `--input`.
///
/// `.pbf` files go through the PBF loader; anything else is parsed as a JSON
/// element set.
pub fn load_elements(path: Option<&Path>) -> NetResult<ElementSet> {
    let path = path.ok_or_else(|| NetError::Config("no map data given, pass --input <file>".into()))?;

    let elements = if is_pbf(path) {
        load_pbf(path)?
    } else {
        serde_json::from_reader(open(path)?)
            .map_err(|e| NetError::Parse(format!("{}: {e}", path.display())))?
    };

    info!(
        "loaded {} nodes and {} ways from {}",
        elements.nodes.len(),
        elements.ways.len(),
        path.display()
    );
    Ok(elements)
}

#[cfg(feature = "osm")]
fn load_pbf(path: &Path) -> NetResult<ElementSet> {
    Ok(osmnet_graph::osm::load_elements_from_pbf(path)?)
}

#[cfg(not(feature = "osm"))]
fn load_pbf(path: &Path) -> NetResult<ElementSet> {
    Err(NetError::Config(format!(
        "{} is a PBF file; rebuild with the `osm` feature to read it",
        path.display()
    )))
}

/// Built-in profiles, or the JSON file named by `--profiles`.
///
/// Modes missing from the file keep their built-in tables.
pub fn load_profiles(path: Option<&Path>) -> NetResult<RoutingProfiles> {
    let Some(path) = path else {
        return Ok(RoutingProfiles::default());
    };
    let profiles: RoutingProfiles = serde_json::from_reader(open(path)?)
        .map_err(|e| NetError::Config(format!("{}: {e}", path.display())))?;
    profiles.validate()?;
    info!("routing profiles loaded from {}", path.display());
    Ok(profiles)
}
