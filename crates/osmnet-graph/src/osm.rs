//! OSM PBF loader, enabled with the `osm` Cargo feature.
//!
//! # Usage
//!
//! ```ignore
//! use std::path::Path;
//! use osmnet_graph::osm::load_elements_from_pbf;
//!
//! let elements = load_elements_from_pbf(Path::new("city.osm.pbf"))?;
//! ```
//!
//! # What is loaded
//!
//! Every node position (road vertices need them) and the tags of tagged
//! nodes, plus every way carrying a `highway` tag.  Relations, areas, and
//! untagged non-road ways are skipped.  The graph builder decides which
//! ways each travel mode may use.

use std::path::Path;

use log::info;
use osmpbf::{Element, ElementReader};

use osmnet_core::{ElementSet, OsmNode, OsmWay, Tags};

use crate::error::GraphError;

fn collect_tags<'a>(iter: impl Iterator<Item = (&'a str, &'a str)>) -> Tags {
    iter.map(|(k, v)| (k.to_owned(), v.to_owned())).collect()
}

/// Read nodes and highway ways from an OSM PBF file.
///
/// # Errors
///
/// [`GraphError::Io`] when the file is missing, [`GraphError::Osm`] on
/// read or parse errors.
pub fn load_elements_from_pbf(path: &Path) -> Result<ElementSet, GraphError> {
    if !path.exists() {
        return Err(GraphError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} does not exist", path.display()),
        )));
    }
    let reader = ElementReader::from_path(path).map_err(|e| GraphError::Osm(e.to_string()))?;

    let mut set = ElementSet::default();
    reader
        .for_each(|elem| match elem {
            Element::Node(n) => {
                let mut node = OsmNode::new(n.id(), n.lat(), n.lon());
                node.tags = collect_tags(n.tags());
                set.nodes.push(node);
            }
            Element::DenseNode(n) => {
                let mut node = OsmNode::new(n.id(), n.lat(), n.lon());
                node.tags = collect_tags(n.tags());
                set.nodes.push(node);
            }
            Element::Way(w) => {
                if w.tags().any(|(k, _)| k == "highway") {
                    let mut way = OsmWay::new(w.id(), w.refs().collect());
                    way.tags = collect_tags(w.tags());
                    set.ways.push(way);
                }
            }
            Element::Relation(_) => {}
        })
        .map_err(|e| GraphError::Osm(e.to_string()))?;

    info!(
        "loaded {} nodes and {} highway ways from {}",
        set.nodes.len(),
        set.ways.len(),
        path.display()
    );
    Ok(set)
}
