use crate::error::TemplateError;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment<'a> {
    Text(&'a str),
    Placeholder(&'a str),
}

/// Strict `$name` / `${name}` substitution. `$$` renders a single `$`.
///
/// Every placeholder needs a value. There are no defaults, filters or
/// escaping: values are copied into the output as they are.
#[derive(Debug, Clone)]
pub struct Template<'a> {
    source: &'a str,
}

fn is_identifier_start(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic()
}

fn is_identifier_char(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric()
}

impl<'a> Template<'a> {
    pub fn new(source: &'a str) -> Template<'a> {
        Template { source }
    }

    fn invalid_at(&self, offset: usize) -> TemplateError {
        let before = &self.source[..offset];
        let line = before.matches('\n').count() + 1;
        let column = before.len() - before.rfind('\n').map_or(0, |i| i + 1) + 1;

        TemplateError::InvalidPlaceholder { line, column }
    }

    fn identifier_len(text: &str) -> usize {
        match text.chars().next() {
            Some(c) if is_identifier_start(c) => text
                .find(|c: char| !is_identifier_char(c))
                .unwrap_or(text.len()),
            _ => 0,
        }
    }

    fn segments(&self) -> Result<Vec<Segment<'a>>, TemplateError> {
        let source = self.source;
        let mut segments = Vec::new();
        let mut text_start = 0;
        let mut position = 0;

        while let Some(found) = source[position..].find('$') {
            let dollar = position + found;
            let rest = &source[dollar + 1..];

            if dollar > text_start {
                segments.push(Segment::Text(&source[text_start..dollar]));
            }

            if rest.starts_with('$') {
                segments.push(Segment::Text("$"));
                position = dollar + 2;
            } else if let Some(braced) = rest.strip_prefix('{') {
                let len = Self::identifier_len(braced);
                if len == 0 || !braced[len..].starts_with('}') {
                    return Err(self.invalid_at(dollar));
                }
                segments.push(Segment::Placeholder(&braced[..len]));
                position = dollar + len + 3;
            } else {
                let len = Self::identifier_len(rest);
                if len == 0 {
                    return Err(self.invalid_at(dollar));
                }
                segments.push(Segment::Placeholder(&rest[..len]));
                position = dollar + len + 1;
            }

            text_start = position;
        }

        if text_start < source.len() {
            segments.push(Segment::Text(&source[text_start..]));
        }

        Ok(segments)
    }

    /// Placeholder names in order of first appearance.
    pub fn placeholders(&self) -> Result<Vec<&'a str>, TemplateError> {
        let mut names: Vec<&str> = Vec::new();

        for segment in self.segments()? {
            if let Segment::Placeholder(name) = segment {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }

        Ok(names)
    }

    pub fn substitute(&self, values: &HashMap<String, String>) -> Result<String, TemplateError> {
        let mut rendered = String::with_capacity(self.source.len());

        for segment in self.segments()? {
            match segment {
                Segment::Text(text) => rendered.push_str(text),
                Segment::Placeholder(name) => {
                    let value = values
                        .get(name)
                        .ok_or_else(|| TemplateError::MissingKey(name.to_owned()))?;
                    rendered.push_str(value);
                }
            }
        }

        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn it_substitutes_plain_and_braced_placeholders() {
        let template = Template::new("key = \"$client_id\"\nurl = ${server_url}/oauth\n");

        let rendered = template
            .substitute(&values(&[
                ("client_id", "svc-acct"),
                ("server_url", "https://idp"),
            ]))
            .unwrap();

        assert_eq!(rendered, "key = \"svc-acct\"\nurl = https://idp/oauth\n");
    }

    #[test]
    fn it_stops_names_at_non_identifier_characters() {
        let template = Template::new("$a.$b-$c_d!");

        let rendered = template
            .substitute(&values(&[("a", "1"), ("b", "2"), ("c_d", "3")]))
            .unwrap();

        assert_eq!(rendered, "1.2-3!");
    }

    #[test]
    fn it_unescapes_double_dollar() {
        let template = Template::new("cost: $$5 and $$$name");

        let rendered = template.substitute(&values(&[("name", "x")])).unwrap();

        assert_eq!(rendered, "cost: $5 and $x");
    }

    #[test]
    fn it_fails_on_missing_value() {
        let template = Template::new("$client_id $client_secret");

        let err = template
            .substitute(&values(&[("client_id", "svc-acct")]))
            .unwrap_err();

        assert_eq!(err, TemplateError::MissingKey("client_secret".to_owned()));
    }

    #[test]
    fn it_ignores_unused_values() {
        let template = Template::new("plain text");

        let rendered = template.substitute(&values(&[("unused", "x")])).unwrap();

        assert_eq!(rendered, "plain text");
    }

    #[test]
    fn it_inserts_values_verbatim() {
        let template = Template::new("ROLE = \"$role\"");

        let rendered = template
            .substitute(&values(&[("role", "Ad\"min $other")]))
            .unwrap();

        assert_eq!(rendered, "ROLE = \"Ad\"min $other\"");
    }

    #[test]
    fn it_reports_position_of_invalid_placeholder() {
        let template = Template::new("first\nsecond $ 1");

        let err = template.substitute(&HashMap::new()).unwrap_err();

        assert_eq!(err, TemplateError::InvalidPlaceholder { line: 2, column: 8 });
    }

    #[test]
    fn it_rejects_unterminated_braces() {
        assert_eq!(
            Template::new("${name").placeholders().unwrap_err(),
            TemplateError::InvalidPlaceholder { line: 1, column: 1 }
        );
        assert_eq!(
            Template::new("a${}").placeholders().unwrap_err(),
            TemplateError::InvalidPlaceholder { line: 1, column: 2 }
        );
    }

    #[test]
    fn it_rejects_trailing_dollar() {
        assert!(Template::new("price$").substitute(&HashMap::new()).is_err());
    }

    #[test]
    fn it_lists_placeholders_once() {
        let template = Template::new("$b ${a} $b $$c");

        assert_eq!(template.placeholders().unwrap(), vec!["b", "a"]);
    }
}
