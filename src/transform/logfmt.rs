use indexmap::IndexMap;
use winnow::{
    Parser as _,
    ascii::multispace0,
    combinator::{alt, separated_pair},
    token::{any, take_till, take_while},
};

type ParseResult<T> = Result<T, winnow::error::ErrMode<winnow::error::ContextError>>;

fn key<'a>(input: &mut &'a str) -> ParseResult<&'a str> {
    take_while(1.., |c: char| !c.is_whitespace() && c != '=' && c != '"').parse_next(input)
}

fn quote(input: &mut &str) -> ParseResult<char> {
    '"'.parse_next(input)
}

fn any_char(input: &mut &str) -> ParseResult<char> {
    any.parse_next(input)
}

fn quoted_value(input: &mut &str) -> ParseResult<String> {
    quote.parse_next(input)?;
    let mut result = String::new();

    loop {
        match any_char.parse_next(input)? {
            '"' => break,
            '\\' => match any_char.parse_next(input)? {
                '"' => result.push('"'),
                '\\' => result.push('\\'),
                'n' => result.push('\n'),
                't' => result.push('\t'),
                'r' => result.push('\r'),
                escaped_char => {
                    result.push('\\');
                    result.push(escaped_char);
                }
            },
            ch => result.push(ch),
        }
    }

    Ok(result)
}

fn bare_value<'a>(input: &mut &'a str) -> ParseResult<&'a str> {
    take_till(0.., char::is_whitespace)
        .verify(|value: &str| !value.starts_with('"'))
        .parse_next(input)
}

fn pair(input: &mut &str) -> ParseResult<(String, String)> {
    separated_pair(
        key.map(|s: &str| s.to_string()),
        '=',
        alt((quoted_value, bare_value.map(|s: &str| s.to_string()))),
    )
    .parse_next(input)
}

fn skip_token(input: &mut &str) -> ParseResult<()> {
    take_till(1.., char::is_whitespace)
        .void()
        .parse_next(input)
}

/// Parse a logfmt line into its key/value pairs.
///
/// Values stay strings: `online=true` yields `"true"`. Tokens that are not a
/// `key=value` pair are skipped, and a repeated key keeps its last value.
pub fn parse(line: &str) -> IndexMap<String, String> {
    let mut input = line;
    let mut pairs = IndexMap::new();
    loop {
        let _: ParseResult<&str> = multispace0.parse_next(&mut input);
        if input.is_empty() {
            break;
        }
        let checkpoint = input;
        match pair.parse_next(&mut input) {
            Ok((key, value)) => {
                pairs.insert(key, value);
            }
            Err(_) => {
                input = checkpoint;
                if skip_token.parse_next(&mut input).is_err() {
                    break;
                }
            }
        }
    }
    pairs
}
