use nom::{
	branch::alt,
	bytes::complete::{is_not, tag},
	character::complete::char,
	combinator::{all_consuming, map, rest, verify},
	sequence::{separated_pair, terminated, tuple},
	Finish, IResult,
};

const REFERENCE_TAG: &str = "reference";
const LIST_REFERENCE_TAG: &str = "listReference";

/// Classified cell text.
///
/// Cell text of the form `reference:<spec>` embeds a single resolved row, and
/// `listReference:<spec>,<spec>,...` embeds an array of them. Any other text,
/// including text that merely contains a colon, is a plain scalar. There is no
/// escape for scalars that happen to start with one of the tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression<'a> {
	Scalar(&'a str),
	Reference(&'a str),
	ListReference(Vec<&'a str>),
}

impl<'a> Expression<'a> {
	pub fn classify(text: &'a str) -> Self {
		match tagged(text) {
			Ok((_, (LIST_REFERENCE_TAG, specs))) => Self::ListReference(specs.split(',').collect()),
			Ok((_, (_, spec))) => Self::Reference(spec),
			Err(_) => Self::Scalar(text),
		}
	}
}

fn tagged(input: &str) -> IResult<&str, (&str, &str)> {
	separated_pair(
		alt((tag(LIST_REFERENCE_TAG), tag(REFERENCE_TAG))),
		char(':'),
		rest,
	)(input)
}

/// A parsed `<sheet>@<column>#<value>` target specifier.
///
/// Sheet and column names may not be empty, and may not contain `@`, `#` or
/// `,`. The value runs to the end of the specifier and may contain anything
/// but `#`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target<'a> {
	pub sheet: &'a str,
	pub column: &'a str,
	pub value: &'a str,
}

impl<'a> Target<'a> {
	pub fn parse(spec: &'a str) -> Result<Self, String> {
		let (_, target) = all_consuming(target)(spec)
			.finish()
			.map_err(|_| format!("expected <sheet>@<column>#<value>, got \"{spec}\""))?;

		Ok(target)
	}
}

fn target(input: &str) -> IResult<&str, Target<'_>> {
	map(
		tuple((
			terminated(name, char('@')),
			terminated(name, char('#')),
			verify(rest, |value: &str| !value.contains('#')),
		)),
		|(sheet, column, value)| Target {
			sheet,
			column,
			value,
		},
	)(input)
}

fn name(input: &str) -> IResult<&str, &str> {
	is_not("@#,")(input)
}
