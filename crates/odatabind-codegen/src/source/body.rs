use std::fmt;

const MARKER: &str = "// @anchor ";

/// A named insertion point inside a synthesized method body.
///
/// Anchors are written to the file as `// @anchor <name>` comment lines so
/// that a later session, parsing the file back, finds them by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    /// Before the create/update request chain of `persist`/`merge`.
    Links,

    /// Inside the request chain, before `.execute()`.
    Properties,

    /// Where per-field mapping code of `find`/`findAll` accumulates.
    Mapping,

    /// Inside the relationship exception guard of `find`/`findAll`.
    Relationships,
}

/// One line of a method body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Line(String),
    Anchor { anchor: Anchor, indent: String },
}

/// The lines of a method body, without the enclosing braces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Body {
    segments: Vec<Segment>,
}

impl Anchor {
    pub fn as_str(self) -> &'static str {
        match self {
            Anchor::Links => "links",
            Anchor::Properties => "properties",
            Anchor::Mapping => "mapping",
            Anchor::Relationships => "relationships",
        }
    }

    pub fn from_name(name: &str) -> Option<Anchor> {
        match name {
            "links" => Some(Anchor::Links),
            "properties" => Some(Anchor::Properties),
            "mapping" => Some(Anchor::Mapping),
            "relationships" => Some(Anchor::Relationships),
            _ => None,
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Segment {
    /// Recognizes anchor marker lines. Everything else is kept verbatim.
    pub fn parse(line: &str) -> Segment {
        let trimmed = line.trim_start();

        if let Some(anchor) = trimmed
            .strip_prefix(MARKER)
            .and_then(|name| Anchor::from_name(name.trim()))
        {
            return Segment::Anchor {
                anchor,
                indent: line[..line.len() - trimmed.len()].to_string(),
            };
        }

        Segment::Line(line.to_string())
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Line(line) => f.write_str(line),
            Segment::Anchor { anchor, indent } => write!(f, "{indent}{MARKER}{anchor}"),
        }
    }
}

impl Body {
    pub fn new() -> Body {
        Body::default()
    }

    pub fn from_lines<I, S>(lines: I) -> Body
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Body {
            segments: lines
                .into_iter()
                .map(|line| Segment::parse(line.as_ref()))
                .collect(),
        }
    }

    /// Appends `text` indented by `indent` tabs.
    pub fn line(&mut self, indent: usize, text: impl AsRef<str>) -> &mut Body {
        let text = text.as_ref();
        self.segments.push(Segment::Line(if text.is_empty() {
            String::new()
        } else {
            format!("{}{text}", std_util::str::tabs(indent))
        }));
        self
    }

    /// Appends each of `lines`, indented by `indent` tabs.
    pub fn lines<I, S>(&mut self, indent: usize, lines: I) -> &mut Body
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.line(indent, line);
        }
        self
    }

    pub fn blank(&mut self) -> &mut Body {
        self.segments.push(Segment::Line(String::new()));
        self
    }

    pub fn anchor(&mut self, indent: usize, anchor: Anchor) -> &mut Body {
        self.segments.push(Segment::Anchor {
            anchor,
            indent: std_util::str::tabs(indent),
        });
        self
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn has_anchor(&self, anchor: Anchor) -> bool {
        self.anchor_position(anchor).is_some()
    }

    /// Inserts `lines` just before the marker of `anchor`, re-indented to
    /// the marker's indentation. Returns `false` when the body has no such
    /// marker.
    ///
    /// Lines are given relative to the splice point: a line with one
    /// leading tab ends up one level deeper than the marker.
    pub fn splice<I, S>(&mut self, anchor: Anchor, lines: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let Some(pos) = self.anchor_position(anchor) else {
            return false;
        };

        let indent = match &self.segments[pos] {
            Segment::Anchor { indent, .. } => indent.clone(),
            Segment::Line(_) => String::new(),
        };

        let spliced = lines.into_iter().map(|line| {
            let line = line.as_ref();
            Segment::Line(if line.is_empty() {
                String::new()
            } else {
                format!("{indent}{line}")
            })
        });

        self.segments.splice(pos..pos, spliced);
        true
    }

    fn anchor_position(&self, anchor: Anchor) -> Option<usize> {
        self.segments.iter().position(|segment| {
            matches!(segment, Segment::Anchor { anchor: a, .. } if *a == anchor)
        })
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            writeln!(f, "{segment}")?;
        }
        Ok(())
    }
}
