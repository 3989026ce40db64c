use crate::index::RouteGraph;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

pub const DEFAULT_GRAPH_TITLE: &str = "City Route Graph";

/// Produces a visual artifact from the graph's adjacency view.
pub trait GraphRenderer: Send + Sync {
    fn render(&self, graph: &RouteGraph, out: &mut dyn Write) -> io::Result<()>;
}

/// Graphviz `digraph` with edge labels carrying the base weight.
///
/// Output is sorted by node name so that the same graph always renders to
/// the same bytes.
pub struct DotRenderer {
    title: String,
}

impl DotRenderer {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

impl Default for DotRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_GRAPH_TITLE)
    }
}

impl GraphRenderer for DotRenderer {
    fn render(&self, graph: &RouteGraph, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "digraph {{")?;
        writeln!(out, "    label=\"{}\";", escape(&self.title))?;
        writeln!(out, "    node [shape=ellipse, style=filled, fillcolor=lightblue];")?;

        for node in graph.nodes() {
            writeln!(out, "    \"{}\";", escape(node))?;
        }

        for from in graph.nodes() {
            let mut targets: Vec<(&str, u64)> = graph.neighbors(from).collect();
            targets.sort_unstable();
            for (to, weight) in targets {
                writeln!(
                    out,
                    "    \"{}\" -> \"{}\" [label=\"{}\"];",
                    escape(from),
                    escape(to),
                    weight
                )?;
            }
        }

        writeln!(out, "}}")
    }
}

pub fn render_to_file(
    renderer: &dyn GraphRenderer,
    graph: &RouteGraph,
    path: impl AsRef<Path>,
) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    renderer.render(graph, &mut writer)?;
    writer.flush()
}

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}
