/*
[INPUT]:  RFC 6570 URL templates with path and query values
[OUTPUT]: Expanded, percent-encoded request URLs
[POS]:    Request layer - URL template expansion
[UPDATE]: When templates start using new operators or modifiers
*/

use std::collections::BTreeMap;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use super::query::QueryValue;
use crate::http::{GraphError, Result};

/// Characters left untouched by simple and form-style expansion
const UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Characters left untouched by reserved (`+`) expansion
const RESERVED: &AsciiSet = &UNRESERVED
    .remove(b':')
    .remove(b'/')
    .remove(b'?')
    .remove(b'#')
    .remove(b'[')
    .remove(b']')
    .remove(b'@')
    .remove(b'!')
    .remove(b'$')
    .remove(b'&')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'+')
    .remove(b',')
    .remove(b';')
    .remove(b'=')
    .remove(b'%');

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    Simple,
    Reserved,
    Query,
    Continuation,
}

/// Expander for the level-3 subset of RFC 6570 used by Graph templates:
/// `{var}`, `{+var}`, `{?a,b}` and `{&a,b}`.
pub struct UrlTemplate;

impl UrlTemplate {
    /// Expand `template`, resolving variables from `query` first, then `path`.
    pub fn expand(
        template: &str,
        path: &BTreeMap<String, String>,
        query: &BTreeMap<String, QueryValue>,
    ) -> Result<String> {
        let mut output = String::with_capacity(template.len() + 32);
        let mut rest = template;

        while let Some(start) = rest.find(['{', '}']) {
            if rest.as_bytes()[start] == b'}' {
                return Err(template_error(template, "unmatched '}'"));
            }
            output.push_str(&rest[..start]);

            let after = &rest[start + 1..];
            let end = after
                .find('}')
                .ok_or_else(|| template_error(template, "unterminated expression"))?;
            expand_expression(template, &after[..end], path, query, &mut output)?;
            rest = &after[end + 1..];
        }

        output.push_str(rest);
        Ok(output)
    }
}

fn expand_expression(
    template: &str,
    expression: &str,
    path: &BTreeMap<String, String>,
    query: &BTreeMap<String, QueryValue>,
    output: &mut String,
) -> Result<()> {
    let (operator, body) = match expression.chars().next() {
        Some('+') => (Operator::Reserved, &expression[1..]),
        Some('?') => (Operator::Query, &expression[1..]),
        Some('&') => (Operator::Continuation, &expression[1..]),
        Some('#' | '.' | '/' | ';' | '=' | ',' | '!' | '@' | '|') => {
            return Err(template_error(template, "unsupported operator"));
        }
        Some(_) => (Operator::Simple, expression),
        None => return Err(template_error(template, "empty expression")),
    };

    let mut first = true;
    for name in body.split(',') {
        if name.is_empty() || name.contains(['*', ':']) {
            return Err(template_error(template, "unsupported variable specification"));
        }

        let value = match query.get(name) {
            Some(value) => Some(value.clone()),
            None => path.get(name).cloned().map(QueryValue::String),
        };
        let Some(value) = value else {
            continue;
        };
        if matches!(&value, QueryValue::List(items) if items.is_empty()) {
            continue;
        }

        let encoded = render(&value, operator);
        match operator {
            Operator::Simple | Operator::Reserved => {
                if !first {
                    output.push(',');
                }
                output.push_str(&encoded);
            }
            Operator::Query | Operator::Continuation => {
                let separator = if first && operator == Operator::Query { '?' } else { '&' };
                output.push(separator);
                output.push_str(name);
                output.push('=');
                output.push_str(&encoded);
            }
        }
        first = false;
    }

    Ok(())
}

fn render(value: &QueryValue, operator: Operator) -> String {
    let set = if operator == Operator::Reserved { RESERVED } else { UNRESERVED };
    match value {
        QueryValue::String(text) => utf8_percent_encode(text, set).to_string(),
        QueryValue::Int(number) => number.to_string(),
        QueryValue::Bool(flag) => flag.to_string(),
        QueryValue::List(items) => items
            .iter()
            .map(|item| utf8_percent_encode(item, set).to_string())
            .collect::<Vec<_>>()
            .join(","),
    }
}

fn template_error(template: &str, reason: &str) -> GraphError {
    GraphError::UrlTemplate(format!("{reason} in template '{template}'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn path(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn base() -> BTreeMap<String, String> {
        path(&[("baseurl", "https://graph.microsoft.com/v1.0")])
    }

    #[rstest]
    #[case("{+baseurl}/users", "https://graph.microsoft.com/v1.0/users")]
    #[case("{+baseurl}/users/$count", "https://graph.microsoft.com/v1.0/users/$count")]
    #[case(
        "{+baseurl}/reports/getMailboxUsageDetail(period='{period}')",
        "https://graph.microsoft.com/v1.0/reports/getMailboxUsageDetail(period='D7')"
    )]
    fn test_expands_literal_templates(#[case] template: &str, #[case] expected: &str) {
        let mut params = base();
        params.insert("period".to_string(), "D7".to_string());
        let url = UrlTemplate::expand(template, &params, &BTreeMap::new()).unwrap();
        assert_eq!(url, expected);
    }

    #[test]
    fn test_simple_expansion_encodes_reserved_characters() {
        let mut params = base();
        params.insert("user%2Did".to_string(), "adele@contoso.com".to_string());

        let url = UrlTemplate::expand(
            "{+baseurl}/users/{user%2Did}{?%24expand,%24select}",
            &params,
            &BTreeMap::new(),
        )
        .unwrap();

        assert_eq!(
            url,
            "https://graph.microsoft.com/v1.0/users/adele%40contoso.com"
        );
    }

    #[test]
    fn test_query_expansion_skips_undefined_values() {
        let mut query = BTreeMap::new();
        query.insert(
            "%24select".to_string(),
            QueryValue::List(vec!["id".to_string(), "displayName".to_string()]),
        );
        query.insert("%24top".to_string(), QueryValue::Int(10));
        query.insert("%24count".to_string(), QueryValue::Bool(true));

        let url = UrlTemplate::expand(
            "{+baseurl}/users{?%24count,%24expand,%24filter,%24select,%24top}",
            &base(),
            &query,
        )
        .unwrap();

        assert_eq!(
            url,
            "https://graph.microsoft.com/v1.0/users?%24count=true&%24select=id,displayName&%24top=10"
        );
    }

    #[test]
    fn test_query_values_are_percent_encoded() {
        let mut query = BTreeMap::new();
        query.insert(
            "%24filter".to_string(),
            QueryValue::from("startswith(displayName,'a')"),
        );

        let url = UrlTemplate::expand("{+baseurl}/groups{?%24filter}", &base(), &query).unwrap();

        assert_eq!(
            url,
            "https://graph.microsoft.com/v1.0/groups?%24filter=startswith%28displayName%2C%27a%27%29"
        );
    }

    #[test]
    fn test_continuation_and_empty_lists() {
        let mut query = BTreeMap::new();
        query.insert("%24expand".to_string(), QueryValue::List(Vec::new()));
        query.insert("%24skip".to_string(), QueryValue::Int(20));

        let url =
            UrlTemplate::expand("/users?fixed=1{&%24expand,%24skip}", &BTreeMap::new(), &query)
                .unwrap();

        assert_eq!(url, "/users?fixed=1&%24skip=20");
    }

    #[rstest]
    #[case("{+baseurl/users")]
    #[case("{+baseurl}}")]
    #[case("{/segments}")]
    #[case("{list*}")]
    #[case("{}")]
    fn test_rejects_malformed_templates(#[case] template: &str) {
        let err = UrlTemplate::expand(template, &base(), &BTreeMap::new()).unwrap_err();
        assert!(matches!(err, GraphError::UrlTemplate(_)));
    }
}
