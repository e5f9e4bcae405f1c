//! Keyword templates such as `FIRST {0}` or `OFFSET {0} ROWS`.
//!
//! `{n}` is a positional argument; `{{` and `}}` are literal braces.

use nom::{
    IResult,
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::digit1,
    combinator::{all_consuming, map, map_res},
    multi::many0,
    sequence::delimited,
};

use crate::error::{RenderError, RenderResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Arg(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

fn arg(input: &str) -> IResult<&str, Segment> {
    map(
        map_res(delimited(tag("{"), digit1, tag("}")), str::parse::<usize>),
        Segment::Arg,
    )(input)
}

fn escaped_brace(input: &str) -> IResult<&str, Segment> {
    alt((
        map(tag("{{"), |_| Segment::Text("{".to_string())),
        map(tag("}}"), |_| Segment::Text("}".to_string())),
    ))(input)
}

fn text(input: &str) -> IResult<&str, Segment> {
    map(take_while1(|c| c != '{' && c != '}'), |s: &str| {
        Segment::Text(s.to_string())
    })(input)
}

impl Template {
    pub fn parse(source: &str) -> RenderResult<Self> {
        let (_, raw) = all_consuming(many0(alt((escaped_brace, arg, text))))(source)
            .map_err(|e| RenderError::template(source, e.to_string()))?;

        // Merge adjacent text so escapes don't fragment the output.
        let mut segments: Vec<Segment> = Vec::with_capacity(raw.len());
        for seg in raw {
            match (segments.last_mut(), seg) {
                (Some(Segment::Text(prev)), Segment::Text(next)) => prev.push_str(&next),
                (_, seg) => segments.push(seg),
            }
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    /// Number of arguments the template expects.
    pub fn arity(&self) -> usize {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Arg(n) => Some(n + 1),
                Segment::Text(_) => None,
            })
            .max()
            .unwrap_or(0)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn apply(&self, args: &[&str]) -> RenderResult<String> {
        let mut out = String::with_capacity(self.source.len() + 8);
        for seg in &self.segments {
            match seg {
                Segment::Text(t) => out.push_str(t),
                Segment::Arg(n) => {
                    let value = args.get(*n).ok_or_else(|| {
                        RenderError::template(
                            &self.source,
                            format!("argument {{{}}} not supplied", n),
                        )
                    })?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }
}

/// Parse and apply in one step.
pub fn apply_template(source: &str, args: &[&str]) -> RenderResult<String> {
    Template::parse(source)?.apply(args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_segments() {
        let t = Template::parse("FIRST {0}").unwrap();
        assert_eq!(
            t.segments(),
            &[Segment::Text("FIRST ".to_string()), Segment::Arg(0)]
        );
        assert_eq!(t.arity(), 1);
    }

    #[test]
    fn test_apply() {
        assert_eq!(apply_template("SKIP {0}", &["5"]).unwrap(), "SKIP 5");
        assert_eq!(
            apply_template("OFFSET {0} ROWS", &["?"]).unwrap(),
            "OFFSET ? ROWS"
        );
        assert_eq!(apply_template("TOP ({0})", &["10"]).unwrap(), "TOP (10)");
    }

    #[test]
    fn test_escaped_braces() {
        let t = Template::parse("{{x}} {0}").unwrap();
        assert_eq!(t.segments()[0], Segment::Text("{x} ".to_string()));
        assert_eq!(t.apply(&["1"]).unwrap(), "{x} 1");
    }

    #[test]
    fn test_missing_argument() {
        let err = apply_template("{0} {1}", &["a"]).unwrap_err();
        assert!(matches!(err, RenderError::InvalidTemplate { .. }));
    }

    #[test]
    fn test_malformed() {
        assert!(Template::parse("LIMIT {").is_err());
        assert!(Template::parse("LIMIT }").is_err());
        assert!(Template::parse("LIMIT {a}").is_err());
    }

    #[test]
    fn test_no_args() {
        let t = Template::parse("FETCH FIRST ROW ONLY").unwrap();
        assert_eq!(t.arity(), 0);
    }
}
