//! Human-readable coupling report.
//!
//! Summarises the cross-reference edge list at file granularity: which files
//! are depended upon the most, which depend on the most others, and every
//! file-to-file link with the symbols that create it.

use anyhow::Result;
use petgraph::visit::EdgeRef;
use std::fs;
use std::path::Path;

use crate::core::graph::{most_dependent, most_referenced, CouplingGraph};
use crate::core::{AnalysisReport, CouplingGraphBuilder};

pub struct MarkdownReportFormatter {
    /// Number of rows in the ranking sections
    top: usize,
    /// Whether to list every file-to-file link
    include_links: bool,
}

impl MarkdownReportFormatter {
    pub fn new() -> Self {
        Self {
            top: 10,
            include_links: true,
        }
    }

    pub fn with_top(mut self, top: usize) -> Self {
        self.top = top;
        self
    }

    pub fn with_links(mut self, include: bool) -> Self {
        self.include_links = include;
        self
    }

    pub fn format_to_file(&self, report: &AnalysisReport, output_path: &Path) -> Result<()> {
        fs::write(output_path, self.format_report(report))?;
        Ok(())
    }

    pub fn format_report(&self, report: &AnalysisReport) -> String {
        let graph = CouplingGraphBuilder::from_edges(&report.cross_reference);
        let mut output = String::with_capacity(4096);

        output.push_str("# CROSS_REFERENCE\n");
        output.push_str(&format!(
            "FILES:{} SYMBOLS:{} EDGES:{}\n",
            report.reference_map.len(),
            report.origin_map.len(),
            report.cross_reference.len()
        ));
        output.push_str(&format!(
            "COUPLED_FILES:{} LINKS:{}\n\n",
            graph.node_count(),
            graph.edge_count()
        ));

        self.add_ranking(&mut output, "## MOST_REFERENCED", &most_referenced(&graph, self.top));
        self.add_ranking(&mut output, "## MOST_DEPENDENT", &most_dependent(&graph, self.top));

        if self.include_links {
            self.add_links(&mut output, &graph);
        }

        output
    }

    fn add_ranking(&self, output: &mut String, header: &str, ranking: &[(String, usize)]) {
        output.push_str(header);
        output.push('\n');
        if ranking.is_empty() {
            output.push_str("(none)\n");
        }
        for (file, degree) in ranking {
            output.push_str(&format!("{file}: {degree}\n"));
        }
        output.push('\n');
    }

    fn add_links(&self, output: &mut String, graph: &CouplingGraph) {
        let mut links: Vec<(String, String, Vec<&str>)> = graph
            .edge_references()
            .map(|edge| {
                let symbols = edge.weight().symbols.iter().map(String::as_str).collect();
                (
                    graph[edge.source()].clone(),
                    graph[edge.target()].clone(),
                    symbols,
                )
            })
            .collect();
        links.sort();

        output.push_str("## LINKS\n");
        for (used_in, defined_in, symbols) in links {
            output.push_str(&format!(
                "{used_in} -> {defined_in} {{{}}}\n",
                symbols.join(",")
            ));
        }
        output.push('\n');
    }
}

impl Default for MarkdownReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}
