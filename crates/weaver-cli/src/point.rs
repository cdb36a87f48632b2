//! Command-line addressing of boundary points.
//!
//! A point is `PATH:OFFSET`, where `PATH` is dot-separated child indices
//! from `<body>` (empty for the body itself). A range is `START..END`.

use std::str::FromStr;

use miette::Result;
use weaver_editor_dom::{BoundaryPoint, Dom, DomError, NodeId, Range};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointSpec {
    pub path: Vec<usize>,
    pub offset: usize,
}

impl FromStr for PointSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (path, offset) = s
            .rsplit_once(':')
            .ok_or_else(|| format!("`{s}` is not PATH:OFFSET"))?;
        let offset = offset
            .parse()
            .map_err(|_| format!("bad offset `{offset}` in `{s}`"))?;
        let path = if path.is_empty() {
            Vec::new()
        } else {
            path.split('.')
                .map(|index| {
                    index
                        .parse()
                        .map_err(|_| format!("bad child index `{index}` in `{s}`"))
                })
                .collect::<Result<_, _>>()?
        };
        Ok(Self { path, offset })
    }
}

impl std::fmt::Display for PointSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let path: Vec<String> = self.path.iter().map(ToString::to_string).collect();
        write!(f, "{}:{}", path.join("."), self.offset)
    }
}

impl PointSpec {
    /// The boundary point at this path and offset under `body`.
    pub fn resolve(&self, dom: &Dom, body: NodeId) -> Result<BoundaryPoint> {
        let node = dom
            .node_at_path(body, &self.path)
            .ok_or_else(|| DomError::InvalidPath(self.to_string()))?;
        let len = dom.node_length(node);
        if self.offset > len {
            return Err(miette::miette!(
                help = "offsets count characters in text nodes and children elsewhere",
                "offset {} is past the end of {} (length {})",
                self.offset,
                self,
                len
            ));
        }
        Ok(BoundaryPoint::new(node, self.offset))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeSpec {
    pub start: PointSpec,
    pub end: PointSpec,
}

impl FromStr for RangeSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s
            .split_once("..")
            .ok_or_else(|| format!("`{s}` is not START..END"))?;
        Ok(Self {
            start: start.parse()?,
            end: end.parse()?,
        })
    }
}

impl RangeSpec {
    pub fn resolve(&self, dom: &Dom, body: NodeId) -> Result<Range> {
        Ok(Range::new(
            self.start.resolve(dom, body)?,
            self.end.resolve(dom, body)?,
        ))
    }
}
