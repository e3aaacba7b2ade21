//! Reader for settings documents of the form
//! `title1 key1: value1, value2 key2: value3 title2 key3: value4`.
//!
//! A document is a sequence of sections; a section is a title followed by one
//! or more `key: value, value ...` pairs. Values are typed on the fly
//! (integer, float, boolean, otherwise string). Lines starting with `//`,
//! `#` or `%` are comments.
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{alpha1, alphanumeric1, multispace0, space0},
    combinator::{map, recognize},
    multi::{many0, many1, separated_list1},
    sequence::{delimited, pair, separated_pair, terminated},
};
use std::collections::HashMap;
use std::fmt;

pub type SectionMap = HashMap<String, Vec<Value>>;
pub type DocumentMap = HashMap<String, SectionMap>;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Float(f64),
    Integer(i64),
    Boolean(bool),
}

impl Value {
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        if let Value::Integer(i) = self {
            Some(*i)
        } else {
            None
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        if let Value::Boolean(b) = self {
            Some(*b)
        } else {
            None
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{}", s),
            Value::Float(val) => write!(f, "{}", val),
            Value::Integer(val) => write!(f, "{}", val),
            Value::Boolean(val) => write!(f, "{}", val),
        }
    }
}

/// word: letter or underscore, then letters, digits, underscores
fn word(input: &str) -> IResult<&str, String> {
    map(
        recognize(pair(
            alt((alpha1, tag("_"))),
            many0(alt((alphanumeric1, tag("_")))),
        )),
        String::from,
    )
    .parse(input)
}

fn parse_title(input: &str) -> IResult<&str, String> {
    let (input, title) = word(input)?;
    let (input, _) = multispace0(input)?;
    Ok((input, title))
}

fn parse_key(input: &str) -> IResult<&str, String> {
    word(input)
}

fn parse_value(input: &str) -> IResult<&str, Value> {
    map(
        take_while1(|c: char| !matches!(c, ',' | ' ' | '\t' | '\r' | '\n' | ';')),
        |s: &str| {
            if let Ok(val) = s.parse::<i64>() {
                Value::Integer(val)
            } else if let Ok(val) = s.parse::<f64>() {
                Value::Float(val)
            } else if let Ok(val) = s.parse::<bool>() {
                Value::Boolean(val)
            } else {
                Value::String(s.to_string())
            }
        },
    )
    .parse(input)
}

fn parse_value_list(input: &str) -> IResult<&str, Vec<Value>> {
    let separator = delimited(space0, tag(","), space0);
    separated_list1(separator, parse_value).parse(input)
}

/// `key: value, value`; whitespace (newlines included) after the pair is eaten
fn parse_key_value_pair(input: &str) -> IResult<&str, (String, Vec<Value>)> {
    let colon = delimited(space0, tag(":"), space0);
    terminated(
        separated_pair(parse_key, colon, parse_value_list),
        multispace0,
    )
    .parse(input)
}

fn parse_section(input: &str) -> IResult<&str, (String, SectionMap)> {
    let (input, title) = parse_title(input)?;
    let (input, pairs) = many1(parse_key_value_pair).parse(input)?;
    Ok((input, (title, pairs.into_iter().collect())))
}

fn filter_comments(input: &str) -> String {
    input
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !(trimmed.is_empty()
                || trimmed.starts_with("//")
                || trimmed.starts_with('#')
                || trimmed.starts_with('%'))
        })
        .collect::<Vec<&str>>()
        .join("\n")
}

/// Parses as many sections as possible; the unparsed rest is returned.
/// Keys of a repeated title are merged into the first occurrence.
pub fn parse_document(input: &str) -> IResult<&str, DocumentMap> {
    let (input, sections) =
        many1(delimited(multispace0, parse_section, multispace0)).parse(input)?;
    let mut document = DocumentMap::new();
    for (title, section) in sections {
        document.entry(title).or_default().extend(section);
    }
    Ok((input, document))
}

/// Parses a whole document, comments removed. An empty document gives an
/// empty map; anything left unparsed is an error.
pub fn parse_document_as(input: &str) -> Result<DocumentMap, String> {
    let filtered = filter_comments(input);
    if filtered.trim().is_empty() {
        return Ok(DocumentMap::new());
    }
    match parse_document(&filtered) {
        Ok((remaining, document)) => {
            if remaining.trim().is_empty() {
                Ok(document)
            } else {
                Err(format!(
                    "Failed to parse entire document. Remaining: '{}'",
                    remaining.trim()
                ))
            }
        }
        Err(e) => Err(format!("Parsing error: {:?}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value_types() {
        assert_eq!(parse_value("800 x").unwrap(), (" x", Value::Integer(800)));
        assert_eq!(parse_value("0.5,").unwrap(), (",", Value::Float(0.5)));
        assert_eq!(parse_value("true").unwrap(), ("", Value::Boolean(true)));
        assert_eq!(
            parse_value("plot.svg").unwrap(),
            ("", Value::String("plot.svg".to_string()))
        );
    }

    #[test]
    fn test_parse_value_list() {
        let (rest, values) = parse_value_list("1, 2.5 ,abc next: 1").unwrap();
        assert_eq!(
            values,
            vec![
                Value::Integer(1),
                Value::Float(2.5),
                Value::String("abc".to_string())
            ]
        );
        assert_eq!(rest, " next: 1");
    }

    #[test]
    fn test_section_stops_at_next_title() {
        let (rest, (title, section)) =
            parse_section("plot width: 800 height: 600\nlog level: info").unwrap();
        assert_eq!(title, "plot");
        assert_eq!(section["width"], vec![Value::Integer(800)]);
        assert_eq!(section["height"], vec![Value::Integer(600)]);
        assert_eq!(rest, "log level: info");
    }

    #[test]
    fn test_document_with_comments() {
        let doc = "
            // calculator settings
            plot width: 800 height: 600 output: plot.png samples: 1000
            # logging
            log level: info file: calc.log console: true
        ";
        let map = parse_document_as(doc).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["plot"]["output"], vec![Value::String("plot.png".into())]);
        assert_eq!(map["log"]["console"], vec![Value::Boolean(true)]);
        assert_eq!(map["log"]["file"][0].to_string(), "calc.log");
    }

    #[test]
    fn test_single_line_document() {
        let map = parse_document_as("plot samples: 11 log level: debug").unwrap();
        assert_eq!(map["plot"]["samples"][0].as_integer(), Some(11));
        assert_eq!(map["log"]["level"][0].to_string(), "debug");
    }

    #[test]
    fn test_repeated_title_is_merged() {
        let map = parse_document_as("plot width: 1\nplot height: 2").unwrap();
        assert_eq!(map["plot"].len(), 2);
    }

    #[test]
    fn test_empty_and_malformed() {
        assert!(parse_document_as("% nothing here\n").unwrap().is_empty());
        assert!(parse_document_as("plot").is_err());
        assert!(parse_document_as("plot width: 800 !!!").is_err());
    }
}
