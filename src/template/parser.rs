use winnow::{
    Parser as _,
    combinator::{alt, delimited, opt, preceded},
    token::take_while,
};

/// How a substituted value is written into the surrounding text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Raw,
    PercentEncode,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    Variable { name: &'a str, format: Format },
}

type ParseResult<T> = Result<T, winnow::error::ErrMode<winnow::error::ContextError>>;

fn variable_name<'a>(input: &mut &'a str) -> ParseResult<&'a str> {
    take_while(1.., |c: char| {
        c.is_alphanumeric() || c == '_' || c == '.' || c == '-'
    })
    .verify(|name: &str| !name.starts_with(['.', '-']))
    .parse_next(input)
}

fn format(input: &mut &str) -> ParseResult<Format> {
    preceded(
        ':',
        alt((
            "raw".value(Format::Raw),
            "percentencode".value(Format::PercentEncode),
            "json".value(Format::Json),
        )),
    )
    .parse_next(input)
}

fn placeholder<'a>(input: &mut &'a str) -> ParseResult<(&'a str, Option<Format>)> {
    delimited("${", (variable_name, opt(format)), '}').parse_next(input)
}

/// Split a template into literal text and `${name}` / `${name:format}`
/// placeholders. Anything that does not form a complete placeholder is kept
/// as text.
pub fn parse(template: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut text_start = 0;
    let mut cursor = 0;
    while let Some(offset) = template[cursor..].find("${") {
        let start = cursor + offset;
        let mut rest = &template[start..];
        match placeholder.parse_next(&mut rest) {
            Ok((name, format)) => {
                if text_start < start {
                    segments.push(Segment::Text(&template[text_start..start]));
                }
                segments.push(Segment::Variable {
                    name,
                    format: format.unwrap_or_default(),
                });
                cursor = template.len() - rest.len();
                text_start = cursor;
            }
            // '$' is one byte, so this stays on a char boundary
            Err(_) => cursor = start + 1,
        }
    }
    if text_start < template.len() {
        segments.push(Segment::Text(&template[text_start..]));
    }
    segments
}
