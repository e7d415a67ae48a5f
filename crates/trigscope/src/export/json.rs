use std::io::Write;

use indexmap::IndexSet;
use log::{debug, info};
use serde::Serialize;

use trigscope_core::{
    identifier::NodeId,
    semantic::{Edge, ModelStats, Node, NodeFilter},
};
use trigscope_parser::ParsedMap;

use crate::export::{Error, Exporter};

/// The exported document.
#[derive(Debug, Serialize)]
struct GraphDocument<'a> {
    stats: ModelStats,
    nodes: Vec<&'a Node>,
    edges: Vec<&'a Edge>,
    warnings: Vec<WarningEntry<'a>>,
}

#[derive(Debug, Serialize)]
struct WarningEntry<'a> {
    code: Option<&'static str>,
    message: &'a str,
}

/// Writes the node and edge lists as JSON.
///
/// Only nodes accepted by the filter are written, together with the edges
/// between them. `stats` always describes the whole map.
pub struct JsonExporter<W> {
    writer: W,
    filter: NodeFilter,
    pretty: bool,
}

impl<W: Write> JsonExporter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            filter: NodeFilter::default(),
            pretty: false,
        }
    }

    pub fn with_filter(mut self, filter: NodeFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Exporter for JsonExporter<W> {
    fn export_map(&mut self, parsed: &ParsedMap) -> Result<(), Error> {
        let model = &parsed.model;
        let nodes = self.filter.visible(model);
        let visible: IndexSet<&NodeId> = nodes.iter().map(|node| node.id()).collect();
        let edges: Vec<&Edge> = model
            .edges()
            .iter()
            .filter(|edge| visible.contains(&edge.from) && visible.contains(&edge.to))
            .collect();
        debug!(nodes = nodes.len(), edges = edges.len(); "Exporting graph");

        let document = GraphDocument {
            stats: model.stats(),
            nodes,
            edges,
            warnings: parsed
                .warnings
                .iter()
                .map(|warning| WarningEntry {
                    code: warning.code().map(|code| code.as_str()),
                    message: warning.message(),
                })
                .collect(),
        };

        let result = if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &document)
        } else {
            serde_json::to_writer(&mut self.writer, &document)
        };
        result.map_err(Error::Serialize)?;
        writeln!(self.writer)?;
        self.writer.flush()?;

        info!("Graph exported");
        Ok(())
    }
}
