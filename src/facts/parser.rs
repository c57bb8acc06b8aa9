//! S-expression reader for fact resources and query templates
//!
//! Grammar:
//! - `;` comments run to end of line
//! - each top-level `( ... )` is one fact; atoms are symbols or `"strings"`
//! - `!( ... )` directives are skipped
//! - inside templates, symbols starting with `$` are variables

use super::models::{Atom, Fact, Template, Term};
use crate::error::{AdvisorError, Result};
use nom::{
    branch::alt,
    bytes::complete::{escaped_transform, take_while, take_while1},
    character::complete::{anychar, char, multispace1, none_of},
    combinator::{all_consuming, map, opt, recognize, value},
    error::{ErrorKind, ParseError},
    multi::{many0, many0_count},
    sequence::{delimited, pair, preceded, terminated},
    IResult,
};

/// Output of reading a whole fact resource
#[derive(Debug, Default)]
pub struct ParsedSource {
    pub facts: Vec<Fact>,
    pub skipped_directives: usize,
}

/// Parse failure pinned to the remaining input where it was raised
#[derive(Debug)]
struct SyntaxError<'a> {
    at: &'a str,
    message: String,
}

impl<'a> ParseError<&'a str> for SyntaxError<'a> {
    fn from_error_kind(input: &'a str, kind: ErrorKind) -> Self {
        Self {
            at: input,
            message: format!("unexpected input ({})", kind.description()),
        }
    }

    fn append(_: &'a str, _: ErrorKind, other: Self) -> Self {
        other
    }
}

type PResult<'a, O> = IResult<&'a str, O, SyntaxError<'a>>;

fn failure<'a>(at: &'a str, message: impl Into<String>) -> nom::Err<SyntaxError<'a>> {
    nom::Err::Failure(SyntaxError {
        at,
        message: message.into(),
    })
}

/// Turn a recoverable error of `parser` into a failure carrying `message`
fn expect<'a, O>(
    mut parser: impl FnMut(&'a str) -> PResult<'a, O>,
    message: &'static str,
) -> impl FnMut(&'a str) -> PResult<'a, O> {
    move |input| {
        parser(input).map_err(|e| match e {
            nom::Err::Error(_) => failure(input, message),
            other => other,
        })
    }
}

fn line_at(source: &str, at: &str) -> usize {
    let offset = source.len() - at.len();
    source[..offset].matches('\n').count() + 1
}

fn into_parse_error(source: &str, err: nom::Err<SyntaxError<'_>>) -> AdvisorError {
    match err {
        nom::Err::Error(e) | nom::Err::Failure(e) => AdvisorError::parse(line_at(source, e.at), e.message),
        nom::Err::Incomplete(_) => AdvisorError::parse(line_at(source, ""), "incomplete input"),
    }
}

// Whitespace and comments

fn comment(input: &str) -> PResult<'_, &str> {
    recognize(pair(char(';'), take_while(|c: char| c != '\n')))(input)
}

fn skip(input: &str) -> PResult<'_, ()> {
    value((), many0_count(alt((multispace1, comment))))(input)
}

// Atoms

fn symbol(input: &str) -> PResult<'_, &str> {
    take_while1(|c: char| !c.is_whitespace() && !matches!(c, '(' | ')' | '"' | ';'))(input)
}

fn string(input: &str) -> PResult<'_, String> {
    let (rest, _) = char('"')(input)?;
    let (rest, text) = opt(escaped_transform(
        none_of("\"\\"),
        '\\',
        alt((
            value('\n', char('n')),
            value('\r', char('r')),
            value('\t', char('t')),
            anychar,
        )),
    ))(rest)?;

    match char::<_, SyntaxError>('"')(rest) {
        Ok((rest, _)) => Ok((rest, text.unwrap_or_default())),
        Err(nom::Err::Error(_)) => Err(failure(input, "unterminated string literal")),
        Err(e) => Err(e),
    }
}

fn atom(input: &str) -> PResult<'_, Atom> {
    alt((
        map(string, Atom::Str),
        map(list, Atom::Expr),
        map(symbol, |s: &str| Atom::Symbol(s.to_string())),
    ))(input)
}

/// `( atom* )`; a missing close paren is reported at the opening one
fn list(input: &str) -> PResult<'_, Vec<Atom>> {
    let (rest, _) = char('(')(input)?;
    let (rest, items) = many0(preceded(skip, atom))(rest)?;
    let (rest, _) = skip(rest)?;

    match char::<_, SyntaxError>(')')(rest) {
        Ok((rest, _)) => Ok((rest, items)),
        Err(nom::Err::Error(_)) => Err(failure(input, "unbalanced parentheses")),
        Err(e) => Err(e),
    }
}

// Top level

#[derive(Clone)]
enum Entry {
    Fact(Vec<Atom>),
    Directive,
}

fn fact(input: &str) -> PResult<'_, Entry> {
    let (rest, atoms) = list(input)?;
    if atoms.is_empty() {
        return Err(failure(input, "empty expression"));
    }
    Ok((rest, Entry::Fact(atoms)))
}

fn directive(input: &str) -> PResult<'_, Entry> {
    value(
        Entry::Directive,
        preceded(char('!'), expect(list, "'!' must precede an expression")),
    )(input)
}

/// Anything else at top level is a failure; only end of input stays recoverable
fn stray(input: &str) -> PResult<'_, Entry> {
    match input.chars().next() {
        None => Err(nom::Err::Error(SyntaxError::from_error_kind(input, ErrorKind::Eof))),
        Some(')') => Err(failure(input, "unexpected ')'")),
        Some('"') => Err(failure(input, "unexpected string outside of an expression")),
        Some(_) => {
            let (_, s) = symbol(input)?;
            Err(failure(
                input,
                format!("unexpected atom '{}' outside of an expression", s),
            ))
        }
    }
}

fn entry(input: &str) -> PResult<'_, Entry> {
    alt((directive, fact, stray))(input)
}

/// Parse a complete fact resource
pub fn parse_facts(source: &str) -> Result<ParsedSource> {
    let (_, entries) = all_consuming(terminated(many0(preceded(skip, entry)), skip))(source)
        .map_err(|e| into_parse_error(source, e))?;

    let mut parsed = ParsedSource::default();
    for entry in entries {
        match entry {
            Entry::Fact(atoms) => parsed.facts.push(Fact::new(atoms)),
            Entry::Directive => parsed.skipped_directives += 1,
        }
    }
    Ok(parsed)
}

fn template(input: &str) -> PResult<'_, Vec<Atom>> {
    let (rest, atoms) = delimited(skip, expect(list, "template must be an expression"), skip)(input)?;
    if !rest.is_empty() {
        return Err(failure(rest, "trailing input after template"));
    }
    Ok((rest, atoms))
}

/// Parse a single query template such as `(Lender $lender Offers Education-Loan)`
pub fn parse_template(source: &str) -> Result<Template> {
    let (_, atoms) = template(source).map_err(|e| into_parse_error(source, e))?;

    let terms = atoms
        .into_iter()
        .map(|atom| match atom {
            Atom::Symbol(s) if s.len() > 1 && s.starts_with('$') => Term::Var(s[1..].to_string()),
            other => Term::Const(other),
        })
        .collect();

    Ok(Template::new(terms))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_facts_with_comments_and_strings() {
        let source = r#"
            ; lenders
            (Lender L1 Offers Education-Loan)
            (Lender L1 Has-Name "Acme Bank") ; trailing comment
            (John Has-CreditScore 620)
        "#;

        let parsed = parse_facts(source).unwrap();
        assert_eq!(parsed.facts.len(), 3);
        assert_eq!(parsed.facts[1].atoms[3], Atom::string("Acme Bank"));
        assert_eq!(parsed.facts[2].atoms[2], Atom::symbol("620"));
    }

    #[test]
    fn test_parse_nested_expression() {
        let parsed = parse_facts("(Loan-Types Housing-Loan Tags (secured long-term))").unwrap();
        let fact = &parsed.facts[0];
        assert_eq!(
            fact.atoms[3],
            Atom::Expr(vec![Atom::symbol("secured"), Atom::symbol("long-term")])
        );
    }

    #[test]
    fn test_directives_are_skipped() {
        let parsed = parse_facts("(A B C)\n!(match &self (A $x C) $x)\n(D E F)").unwrap();
        assert_eq!(parsed.facts.len(), 2);
        assert_eq!(parsed.skipped_directives, 1);
    }

    #[test]
    fn test_escaped_quote_in_string() {
        let parsed = parse_facts(r#"(Lender L2 Has-Name "The \"Best\" Bank")"#).unwrap();
        assert_eq!(parsed.facts[0].atoms[3].value(), "The \"Best\" Bank");
    }

    #[test]
    fn test_unbalanced_parens_reports_line() {
        let err = parse_facts("(A B C)\n(D E\n").unwrap_err();
        match err {
            AdvisorError::FactParse { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unterminated_string() {
        let err = parse_facts("(A \"open").unwrap_err();
        assert!(matches!(err, AdvisorError::FactParse { line: 1, .. }));
    }

    #[test]
    fn test_stray_atom_is_error() {
        let err = parse_facts("(A B C)\nstray").unwrap_err();
        assert!(matches!(err, AdvisorError::FactParse { line: 2, .. }));
    }

    #[test]
    fn test_parse_template_variables() {
        let template = parse_template("(Lender $lender Offers Education-Loan)").unwrap();
        assert_eq!(template.variables(), vec!["lender"]);
        assert_eq!(template.terms[2], Term::Const(Atom::symbol("Offers")));
    }

    #[test]
    fn test_empty_string_and_escapes() {
        let parsed = parse_facts("(Note N1 \"\" \"tab\\there\")").unwrap();
        assert_eq!(parsed.facts[0].atoms[2], Atom::string(""));
        assert_eq!(parsed.facts[0].atoms[3], Atom::string("tab\there"));
    }

    #[test]
    fn test_error_line_counts_preceding_comments() {
        let err = parse_facts("; header\n; more\n(A B)\n)").unwrap_err();
        match err {
            AdvisorError::FactParse { line, message } => {
                assert_eq!(line, 4);
                assert_eq!(message, "unexpected ')'");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_expression_is_error() {
        let err = parse_facts("(A B)\n\n()").unwrap_err();
        assert!(matches!(err, AdvisorError::FactParse { line: 3, .. }));
    }

    #[test]
    fn test_parse_template_rejects_trailing_input() {
        assert!(parse_template("(A $x) (B $y)").is_err());
        assert!(parse_template("").is_err());
    }
}
