//! Reader for the `graph SparseTSP { ... }` documents written by
//! [`crate::write_graph`].
//!
//! The grammar is line oriented. A `graph <name> {` header opens the body,
//! each statement sits on its own line, and a lone `}` closes the document.
//! Statements are either vertex declarations (`"3";`) or undirected edges
//! (`"0" -- "3" [weight=1.5];`). Edge weights are read from the first
//! `weight`, `label` or `w` attribute and default to `1.0` when absent.
//! Blank lines and lines starting with `//` or `#` are ignored.

use std::{
    collections::{HashMap, HashSet},
    fmt,
};

use thiserror::Error;

use crate::{adjacency::Adjacency, error::define_error_codes};

/// Weight assigned to edges without a weight attribute.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Error raised while reading a graph document.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ParseError {
    /// The document contained no statements at all.
    #[error("document is empty")]
    EmptyDocument,
    /// The first statement was not a `graph <name> {` header.
    #[error("line {line}: expected `graph <name> {{` header")]
    MissingHeader {
        /// 1-based line number.
        line: usize,
    },
    /// The body was never closed with `}`.
    #[error("document ended before the closing `}}`")]
    Unterminated,
    /// A statement followed the closing brace.
    #[error("line {line}: unexpected content after the closing `}}`")]
    TrailingContent {
        /// 1-based line number.
        line: usize,
    },
    /// A statement could not be understood.
    #[error("line {line}: malformed statement")]
    MalformedStatement {
        /// 1-based line number.
        line: usize,
    },
    /// A weight attribute did not hold a finite number.
    #[error("line {line}: invalid weight `{value}`")]
    InvalidWeight {
        /// 1-based line number.
        line: usize,
        /// Raw attribute value.
        value: String,
    },
    /// An edge referenced an undeclared vertex.
    #[error("line {line}: vertex `{label}` is not declared")]
    UnknownVertex {
        /// 1-based line number.
        line: usize,
        /// Label of the missing vertex.
        label: String,
    },
    /// A vertex was declared twice.
    #[error("line {line}: vertex `{label}` is declared twice")]
    DuplicateVertex {
        /// 1-based line number.
        line: usize,
        /// Repeated label.
        label: String,
    },
    /// A vertex label is not the decimal index of a vertex in `[0, n)`.
    #[error("vertex label `{label}` is not an index below {vertex_count}")]
    NonIndexVertex {
        /// Offending label.
        label: String,
        /// Number of declared vertices.
        vertex_count: usize,
    },
    /// An edge joined a vertex to itself.
    #[error("line {line}: self loop on `{label}`")]
    SelfLoop {
        /// 1-based line number.
        line: usize,
        /// Label of the vertex.
        label: String,
    },
    /// The same undirected edge appeared twice.
    #[error("line {line}: edge `{from}` -- `{to}` is listed twice")]
    DuplicateEdge {
        /// 1-based line number of the repeated edge.
        line: usize,
        /// First endpoint label.
        from: String,
        /// Second endpoint label.
        to: String,
    },
}

define_error_codes! {
    /// Stable codes describing [`ParseError`] variants.
    enum ParseErrorCode for ParseError {
        /// The document contained no statements at all.
        EmptyDocument => EmptyDocument => "PARSE_EMPTY_DOCUMENT",
        /// The first statement was not a header.
        MissingHeader => MissingHeader { .. } => "PARSE_MISSING_HEADER",
        /// The body was never closed.
        Unterminated => Unterminated => "PARSE_UNTERMINATED",
        /// A statement followed the closing brace.
        TrailingContent => TrailingContent { .. } => "PARSE_TRAILING_CONTENT",
        /// A statement could not be understood.
        MalformedStatement => MalformedStatement { .. } => "PARSE_MALFORMED_STATEMENT",
        /// A weight attribute did not hold a finite number.
        InvalidWeight => InvalidWeight { .. } => "PARSE_INVALID_WEIGHT",
        /// An edge referenced an undeclared vertex.
        UnknownVertex => UnknownVertex { .. } => "PARSE_UNKNOWN_VERTEX",
        /// A vertex was declared twice.
        DuplicateVertex => DuplicateVertex { .. } => "PARSE_DUPLICATE_VERTEX",
        /// A vertex label is not a vertex index.
        NonIndexVertex => NonIndexVertex { .. } => "PARSE_NON_INDEX_VERTEX",
        /// An edge joined a vertex to itself.
        SelfLoop => SelfLoop { .. } => "PARSE_SELF_LOOP",
        /// The same undirected edge appeared twice.
        DuplicateEdge => DuplicateEdge { .. } => "PARSE_DUPLICATE_EDGE",
    }
}

/// An undirected weighted edge read from a document.
#[derive(Clone, Debug, PartialEq)]
pub struct DocumentEdge {
    /// Label of the first endpoint.
    pub from: String,
    /// Label of the second endpoint.
    pub to: String,
    /// Edge weight.
    pub weight: f64,
    /// 1-based line number of the statement.
    pub line: usize,
}

/// A parsed graph document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphDocument {
    name: String,
    vertices: Vec<String>,
    edges: Vec<DocumentEdge>,
}

enum State {
    Header,
    Body,
    Closed,
}

impl GraphDocument {
    /// Parses `text`.
    ///
    /// # Errors
    /// Returns [`ParseError`] describing the first problem found.
    ///
    /// # Examples
    /// ```
    /// use sparsetsp_core::GraphDocument;
    ///
    /// let text = "graph SparseTSP {\n  \"0\";\n  \"1\";\n  \"0\" -- \"1\" [weight=2.500000];\n}\n";
    /// let document = GraphDocument::parse(text).expect("document must parse");
    /// assert_eq!(document.name(), "SparseTSP");
    /// assert_eq!(document.vertices().len(), 2);
    /// assert_eq!(document.edges()[0].weight, 2.5);
    /// ```
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut document = Self::default();
        let mut declared = HashSet::new();
        let mut state = State::Header;

        for (index, raw) in text.lines().enumerate() {
            let line = index.saturating_add(1);
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with("//") || trimmed.starts_with('#') {
                continue;
            }
            match state {
                State::Header => {
                    document.name =
                        parse_header(trimmed).ok_or(ParseError::MissingHeader { line })?;
                    state = State::Body;
                }
                State::Body if trimmed == "}" => state = State::Closed,
                State::Body => document.parse_statement(trimmed, line, &mut declared)?,
                State::Closed => return Err(ParseError::TrailingContent { line }),
            }
        }

        match state {
            State::Header => Err(ParseError::EmptyDocument),
            State::Body => Err(ParseError::Unterminated),
            State::Closed => Ok(document),
        }
    }

    fn parse_statement(
        &mut self,
        statement: &str,
        line: usize,
        declared: &mut HashSet<String>,
    ) -> Result<(), ParseError> {
        let body = statement.strip_suffix(';').unwrap_or(statement).trim_end();
        let (head, attributes) = match body.split_once('[') {
            Some((head, rest)) => {
                let attributes = rest
                    .trim_end()
                    .strip_suffix(']')
                    .ok_or(ParseError::MalformedStatement { line })?;
                (head, Some(attributes))
            }
            None => (body, None),
        };

        if let Some((from, to)) = head.split_once("--") {
            let from = parse_label(from, line)?;
            let to = parse_label(to, line)?;
            for label in [from, to] {
                if !declared.contains(label) {
                    return Err(ParseError::UnknownVertex {
                        line,
                        label: label.to_owned(),
                    });
                }
            }
            self.edges.push(DocumentEdge {
                from: from.to_owned(),
                to: to.to_owned(),
                weight: parse_weight(attributes, line)?,
                line,
            });
        } else {
            let label = parse_label(head, line)?;
            if !declared.insert(label.to_owned()) {
                return Err(ParseError::DuplicateVertex {
                    line,
                    label: label.to_owned(),
                });
            }
            self.vertices.push(label.to_owned());
        }
        Ok(())
    }

    /// Returns the graph name from the header.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns vertex labels in declaration order.
    #[must_use]
    pub fn vertices(&self) -> &[String] {
        &self.vertices
    }

    /// Returns edges in document order.
    #[must_use]
    pub fn edges(&self) -> &[DocumentEdge] {
        &self.edges
    }

    /// Returns the smallest and largest edge weight, or `None` without edges.
    #[must_use]
    pub fn weight_range(&self) -> Option<(f64, f64)> {
        let mut weights = self.edges.iter().map(|edge| edge.weight);
        let first = weights.next()?;
        Some(weights.fold((first, first), |(low, high), weight| {
            (low.min(weight), high.max(weight))
        }))
    }

    /// Rebuilds the adjacency structure. Vertex labels must be the decimal
    /// indices `0..n` (in any declaration order).
    ///
    /// # Errors
    /// Returns [`ParseError::NonIndexVertex`] for labels outside `0..n`, and
    /// [`ParseError::SelfLoop`] or [`ParseError::DuplicateEdge`] when the
    /// edge list does not describe a simple graph.
    pub fn to_adjacency(&self) -> Result<Adjacency, ParseError> {
        let vertex_count = self.vertices.len();
        let mut indices = HashMap::with_capacity(vertex_count);
        for label in &self.vertices {
            let index = label
                .parse::<usize>()
                .ok()
                .filter(|&index| index < vertex_count && index.to_string() == *label)
                .ok_or_else(|| ParseError::NonIndexVertex {
                    label: label.clone(),
                    vertex_count,
                })?;
            indices.insert(label.as_str(), index);
        }

        let mut graph = Adjacency::with_vertices(vertex_count);
        for edge in &self.edges {
            let lookup = |label: &str| {
                indices
                    .get(label)
                    .copied()
                    .ok_or_else(|| ParseError::UnknownVertex {
                        line: edge.line,
                        label: label.to_owned(),
                    })
            };
            let from = lookup(&edge.from)?;
            let to = lookup(&edge.to)?;
            if from == to {
                return Err(ParseError::SelfLoop {
                    line: edge.line,
                    label: edge.from.clone(),
                });
            }
            if !graph.insert_edge(from, to) {
                return Err(ParseError::DuplicateEdge {
                    line: edge.line,
                    from: edge.from.clone(),
                    to: edge.to.clone(),
                });
            }
        }
        Ok(graph)
    }
}

impl fmt::Display for GraphDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "graph `{}` with {} vertices and {} edges",
            self.name,
            self.vertices.len(),
            self.edges.len()
        )
    }
}

fn parse_header(line: &str) -> Option<String> {
    let rest = line.strip_prefix("graph")?.strip_suffix('{')?;
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some(strip_quotes(rest.trim()).to_owned())
}

fn parse_label(token: &str, line: usize) -> Result<&str, ParseError> {
    let label = strip_quotes(token.trim());
    if label.is_empty() {
        Err(ParseError::MalformedStatement { line })
    } else {
        Ok(label)
    }
}

fn strip_quotes(token: &str) -> &str {
    token
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .or_else(|| {
            token
                .strip_prefix('\'')
                .and_then(|rest| rest.strip_suffix('\''))
        })
        .unwrap_or(token)
}

fn parse_weight(attributes: Option<&str>, line: usize) -> Result<f64, ParseError> {
    let Some(attributes) = attributes else {
        return Ok(DEFAULT_WEIGHT);
    };
    for pair in attributes.split([',', ';']) {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        if matches!(key.trim(), "weight" | "label" | "w") {
            let raw = strip_quotes(value.trim());
            return raw
                .parse::<f64>()
                .ok()
                .filter(|weight| weight.is_finite())
                .ok_or_else(|| ParseError::InvalidWeight {
                    line,
                    value: raw.to_owned(),
                });
        }
    }
    Ok(DEFAULT_WEIGHT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const SQUARE: &str = "\
graph SparseTSP {
  \"0\";
  \"1\";
  \"2\";
  \"3\";
  \"0\" -- \"1\" [weight=1.000000];
  \"0\" -- \"3\" [weight=4.000000];
  \"1\" -- \"2\" [weight=2.000000];
  \"2\" -- \"3\" [weight=3.000000];
}
";

    #[test]
    fn parses_generated_documents() {
        let document = GraphDocument::parse(SQUARE).expect("square must parse");
        assert_eq!(document.name(), "SparseTSP");
        assert_eq!(document.vertices(), ["0", "1", "2", "3"]);
        assert_eq!(document.edges().len(), 4);
        assert_eq!(document.weight_range(), Some((1.0, 4.0)));

        let graph = document.to_adjacency().expect("square must convert");
        assert_eq!(
            graph.edges().collect::<Vec<_>>(),
            vec![(0, 1), (0, 3), (1, 2), (2, 3)]
        );
    }

    #[rstest]
    #[case::weight("weight=2.5", 2.5)]
    #[case::label_alias("label=\"7\"", 7.0)]
    #[case::short_alias("color=red, w=3e1", 30.0)]
    #[case::no_weight("color=red", DEFAULT_WEIGHT)]
    fn weight_attributes_are_recognised(#[case] attributes: &str, #[case] expected: f64) {
        let text = format!("graph g {{\n\"a\";\n\"b\";\n\"a\" -- \"b\" [{attributes}];\n}}\n");
        let document = GraphDocument::parse(&text).expect("document must parse");
        let weight = document.edges().first().map(|edge| edge.weight);
        assert_eq!(weight, Some(expected));
    }

    #[test]
    fn edges_without_attributes_use_default_weight() {
        let document = GraphDocument::parse("graph g {\n'a';\n'b';\na -- b;\n}")
            .expect("document must parse");
        assert_eq!(document.edges().first().map(|edge| edge.weight), Some(DEFAULT_WEIGHT));
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let text = "// generated\n\ngraph SparseTSP {\n# vertices\n  \"0\";\n}\n\n";
        let document = GraphDocument::parse(text).expect("document must parse");
        assert_eq!(document.vertices(), ["0"]);
        assert!(document.edges().is_empty());
        assert_eq!(document.weight_range(), None);
    }

    #[rstest]
    #[case::empty("", ParseError::EmptyDocument)]
    #[case::no_header("\"0\";\n}", ParseError::MissingHeader { line: 1 })]
    #[case::digraph("digraph g {\n}", ParseError::MissingHeader { line: 1 })]
    #[case::unterminated("graph g {\n\"0\";\n", ParseError::Unterminated)]
    #[case::trailing("graph g {\n}\n\"0\";", ParseError::TrailingContent { line: 3 })]
    #[case::open_bracket(
        "graph g {\n\"0\";\n\"1\";\n\"0\" -- \"1\" [weight=1;\n}",
        ParseError::MalformedStatement { line: 4 },
    )]
    #[case::empty_label("graph g {\n\"\";\n}", ParseError::MalformedStatement { line: 2 })]
    #[case::bad_weight(
        "graph g {\n\"0\";\n\"1\";\n\"0\" -- \"1\" [weight=heavy];\n}",
        ParseError::InvalidWeight { line: 4, value: "heavy".to_owned() },
    )]
    #[case::undeclared(
        "graph g {\n\"0\";\n\"0\" -- \"9\";\n}",
        ParseError::UnknownVertex { line: 3, label: "9".to_owned() },
    )]
    #[case::duplicate_vertex(
        "graph g {\n\"0\";\n\"0\";\n}",
        ParseError::DuplicateVertex { line: 3, label: "0".to_owned() },
    )]
    fn parse_rejects_malformed_documents(#[case] text: &str, #[case] expected: ParseError) {
        assert_eq!(GraphDocument::parse(text), Err(expected));
    }

    #[rstest]
    #[case::named(
        "graph g {\n\"a\";\n}",
        ParseError::NonIndexVertex { label: "a".to_owned(), vertex_count: 1 },
    )]
    #[case::padded(
        "graph g {\n\"00\";\n}",
        ParseError::NonIndexVertex { label: "00".to_owned(), vertex_count: 1 },
    )]
    #[case::out_of_range(
        "graph g {\n\"0\";\n\"2\";\n}",
        ParseError::NonIndexVertex { label: "2".to_owned(), vertex_count: 2 },
    )]
    #[case::self_loop(
        "graph g {\n\"0\";\n\"0\" -- \"0\";\n}",
        ParseError::SelfLoop { line: 3, label: "0".to_owned() },
    )]
    #[case::duplicate_edge(
        "graph g {\n\"0\";\n\"1\";\n\"0\" -- \"1\";\n\"1\" -- \"0\";\n}",
        ParseError::DuplicateEdge { line: 5, from: "1".to_owned(), to: "0".to_owned() },
    )]
    fn to_adjacency_rejects_non_simple_graphs(#[case] text: &str, #[case] expected: ParseError) {
        let document = GraphDocument::parse(text).expect("document must parse");
        assert_eq!(document.to_adjacency(), Err(expected));
    }

    #[test]
    fn error_codes_are_stable() {
        assert_eq!(ParseError::Unterminated.code().as_str(), "PARSE_UNTERMINATED");
        assert_eq!(
            ParseError::MissingHeader { line: 1 }.code(),
            ParseErrorCode::MissingHeader
        );
    }
}
