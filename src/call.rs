//! Parser for predicate-call segments of the form `:name(arg, key: value):`.

use crate::error::{PathQueryError, Result};

/// One argument of a predicate call.
///
/// `position` is the 0-based index among all parameters in source order,
/// named ones included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallParameter {
    pub name: Option<String>,
    pub value: String,
    pub position: usize,
}

impl CallParameter {
    pub fn is_named(&self) -> bool {
        self.name.is_some()
    }
}

/// A parsed predicate call: `:hasFile(test.txt):` → name `hasFile`, one
/// positional parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyCall {
    pub name: String,
    pub parameters: Vec<CallParameter>,
}

impl StrategyCall {
    /// Parses a segment token into a call.
    ///
    /// The token must start with `:` and end with `):`. The argument body is
    /// split on unescaped commas (`\` escapes the following character); each
    /// piece with an unescaped `:` is a named parameter, split at the first
    /// such colon. Escape characters are kept in values as written.
    pub fn parse(segment: &str) -> Result<Self> {
        if segment.is_empty() || !segment.starts_with(':') || !segment.ends_with("):") {
            return Err(format_error(segment));
        }
        let open = segment.find('(').ok_or_else(|| format_error(segment))?;
        let name = segment[1..open].trim().to_string();
        let body = &segment[open + 1..segment.len() - 2];

        let mut parameters = Vec::new();
        let mut rest = body;
        let mut position = 0usize;
        loop {
            match index_of_unescaped(rest, ',') {
                Some(comma) => {
                    parameters.push(parse_parameter(rest[..comma].trim(), position, segment)?);
                    position += 1;
                    rest = &rest[comma + 1..];
                }
                None => {
                    if !rest.is_empty() || !parameters.is_empty() {
                        parameters.push(parse_parameter(rest.trim(), position, segment)?);
                    }
                    break;
                }
            }
        }

        Ok(Self { name, parameters })
    }

    /// Looks up a named parameter, case-insensitively.
    pub fn parameter(&self, name: &str) -> Option<&CallParameter> {
        self.parameters.iter().find(|parameter| {
            parameter
                .name
                .as_deref()
                .is_some_and(|candidate| candidate.eq_ignore_ascii_case(name))
        })
    }

    /// Returns the unnamed parameter at `position`, counting unnamed
    /// parameters only.
    pub fn positional(&self, position: usize) -> Option<&CallParameter> {
        self.parameters
            .iter()
            .filter(|parameter| !parameter.is_named())
            .nth(position)
    }
}

fn parse_parameter(piece: &str, position: usize, segment: &str) -> Result<CallParameter> {
    let Some(colon) = index_of_unescaped(piece, ':') else {
        return Ok(CallParameter {
            name: None,
            value: piece.to_string(),
            position,
        });
    };

    let name = piece[..colon].trim();
    let value = piece[colon + 1..].trim();
    if name.is_empty() || value.is_empty() {
        return Err(PathQueryError::CallFormat(format!(
            "malformed named parameter '{piece}' in segment '{segment}'"
        )));
    }

    Ok(CallParameter {
        name: Some(name.to_string()),
        value: value.to_string(),
        position,
    })
}

/// Finds `target`, skipping any character preceded by a backslash.
fn index_of_unescaped(text: &str, target: char) -> Option<usize> {
    let mut chars = text.char_indices();
    while let Some((index, ch)) = chars.next() {
        if ch == '\\' {
            chars.next();
            continue;
        }
        if ch == target {
            return Some(index);
        }
    }
    None
}

fn format_error(segment: &str) -> PathQueryError {
    PathQueryError::CallFormat(format!("segment '{segment}' is not a predicate call"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positional_values(call: &StrategyCall) -> Vec<&str> {
        call.parameters
            .iter()
            .map(|parameter| parameter.value.as_str())
            .collect()
    }

    #[test]
    fn parses_positional_parameters_in_order() {
        let call = StrategyCall::parse(":MethodName(param1, param2, param3):").unwrap();
        assert_eq!(call.name, "MethodName");
        assert_eq!(positional_values(&call), vec!["param1", "param2", "param3"]);
        assert!(call.parameters.iter().all(|parameter| !parameter.is_named()));
        assert_eq!(
            call.parameters
                .iter()
                .map(|parameter| parameter.position)
                .collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
    }

    #[test]
    fn parses_named_parameters_trimmed() {
        let call = StrategyCall::parse(":MethodName(param1: value1, param2: value2):").unwrap();
        assert_eq!(call.parameters.len(), 2);
        assert_eq!(call.parameters[0].name.as_deref(), Some("param1"));
        assert_eq!(call.parameters[0].value, "value1");
        assert_eq!(call.parameters[1].name.as_deref(), Some("param2"));
        assert_eq!(call.parameters[1].value, "value2");
    }

    #[test]
    fn empty_body_has_no_parameters() {
        let call = StrategyCall::parse(":MethodName():").unwrap();
        assert_eq!(call.name, "MethodName");
        assert!(call.parameters.is_empty());
    }

    #[test]
    fn commas_alone_yield_empty_positionals() {
        let call = StrategyCall::parse(":MethodName(,,):").unwrap();
        assert_eq!(positional_values(&call), vec!["", "", ""]);
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let call = StrategyCall::parse(":MethodName( param1 , param2 ):").unwrap();
        assert_eq!(positional_values(&call), vec!["param1", "param2"]);
    }

    #[test]
    fn argument_values_may_contain_brackets() {
        let call =
            StrategyCall::parse(":hasJson(my.json, $..Products[?(@.Price >= 50)].Name, Anvil):")
                .unwrap();
        assert_eq!(call.name, "hasJson");
        assert_eq!(
            positional_values(&call),
            vec!["my.json", "$..Products[?(@.Price >= 50)].Name", "Anvil"]
        );
    }

    #[test]
    fn escaped_commas_do_not_split() {
        let call = StrategyCall::parse(":m(a\\,b, c):").unwrap();
        assert_eq!(positional_values(&call), vec!["a\\,b", "c"]);
    }

    #[test]
    fn malformed_input_is_a_format_error() {
        for input in ["InvalidInput", "", ":noBody:", ":m(x)", "m(x):"] {
            let error = StrategyCall::parse(input).unwrap_err();
            assert!(matches!(error, PathQueryError::CallFormat(_)), "{input}");
        }
    }

    #[test]
    fn named_parameter_with_empty_side_is_a_format_error() {
        let error = StrategyCall::parse(":m(key:):").unwrap_err();
        assert!(matches!(error, PathQueryError::CallFormat(_)));
    }

    #[test]
    fn lookup_by_name_is_case_insensitive() {
        let call = StrategyCall::parse(":m(Depth: 3, root):").unwrap();
        assert_eq!(call.parameter("depth").unwrap().value, "3");
        assert!(call.parameter("missing").is_none());
    }

    #[test]
    fn positional_lookup_skips_named_parameters() {
        let call = StrategyCall::parse(":m(depth: 3, first, second):").unwrap();
        assert_eq!(call.positional(0).unwrap().value, "first");
        assert_eq!(call.positional(1).unwrap().value, "second");
        assert!(call.positional(2).is_none());
    }
}
